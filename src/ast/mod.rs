use crate::error::EvalErrorKind;
use std::fmt;

mod compiler;
mod evaluator;
mod lexer;
mod parser;

pub use compiler::*;
pub use evaluator::Evaluator;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

/// Expression tree produced by the parser. Every node records the character
/// offset of the token that defined it: the literal itself, the operator, or
/// the function name.
#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Number {
        value: f64,
        position: usize,
    },
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<ASTNode>,
        position: usize,
    },
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
        position: usize,
    },
    FunctionCall {
        name: String,
        args: Vec<ASTNode>,
        position: usize,
    },
}

impl ASTNode {
    pub fn number(value: f64, position: usize) -> Self {
        ASTNode::Number { value, position }
    }

    pub fn unary(operator: UnaryOperator, operand: ASTNode, position: usize) -> Self {
        ASTNode::UnaryOperation {
            operator,
            operand: Box::new(operand),
            position,
        }
    }

    pub fn binary(left: ASTNode, operator: Operator, right: ASTNode, position: usize) -> Self {
        ASTNode::BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            position,
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<ASTNode>, position: usize) -> Self {
        ASTNode::FunctionCall {
            name: name.into(),
            args,
            position,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            ASTNode::Number { position, .. }
            | ASTNode::UnaryOperation { position, .. }
            | ASTNode::BinaryOperation { position, .. }
            | ASTNode::FunctionCall { position, .. } => *position,
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            ASTNode::Number { .. } => 1,
            ASTNode::UnaryOperation { operand, .. } => 1 + operand.depth(),
            ASTNode::BinaryOperation { left, right, .. } => 1 + left.depth().max(right.depth()),
            ASTNode::FunctionCall { args, .. } => {
                1 + args.iter().map(ASTNode::depth).max().unwrap_or(0)
            }
        }
    }
}

/// Renders the tree fully parenthesised, e.g. `(2 + (3 * 4))`.
impl fmt::Display for ASTNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ASTNode::Number { value, .. } => write!(f, "{value}"),
            ASTNode::UnaryOperation {
                operator, operand, ..
            } => write!(f, "({operator}{operand})"),
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
                ..
            } => write!(f, "({left} {operator} {right})"),
            ASTNode::FunctionCall { name, args, .. } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    Plus,
}

impl UnaryOperator {
    pub fn apply(&self, operand: f64) -> f64 {
        match self {
            UnaryOperator::Negate => -operand,
            UnaryOperator::Plus => operand,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            UnaryOperator::Negate => '-',
            UnaryOperator::Plus => '+',
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<&TokenKind> for UnaryOperator {
    type Error = ();

    fn try_from(kind: &TokenKind) -> Result<Self, Self::Error> {
        match kind {
            TokenKind::Minus => Ok(UnaryOperator::Negate),
            TokenKind::Plus => Ok(UnaryOperator::Plus),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    /// Applies the operator with IEEE-754 double semantics, except that a
    /// zero divisor is reported instead of producing an infinity or NaN.
    pub fn apply(&self, left: f64, right: f64) -> Result<f64, EvalErrorKind> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => {
                if right == 0.0 {
                    Err(EvalErrorKind::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
            Operator::Power => Ok(left.powf(right)),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<&TokenKind> for Operator {
    type Error = ();

    fn try_from(kind: &TokenKind) -> Result<Self, Self::Error> {
        match kind {
            TokenKind::Plus => Ok(Operator::Add),
            TokenKind::Minus => Ok(Operator::Subtract),
            TokenKind::Star => Ok(Operator::Multiply),
            TokenKind::Slash => Ok(Operator::Divide),
            TokenKind::Caret => Ok(Operator::Power),
            _ => Err(()),
        }
    }
}
