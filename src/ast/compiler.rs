use crate::ast::{ASTNode, Operator, UnaryOperator};
use crate::context::{Builtin, EvaluationContext};
use crate::error::{EvalError, EvalErrorKind};
use log::{debug, trace};

/// One step of a compiled program. Operands are taken from a value stack in
/// postfix order.
#[derive(Debug, Clone)]
pub enum Instruction {
    Push {
        value: f64,
        position: usize,
    },
    Negate {
        position: usize,
    },
    Binary {
        operator: Operator,
        position: usize,
    },
    Call {
        name: String,
        builtin: Builtin,
        position: usize,
    },
}

impl Instruction {
    /// Source position of the node this instruction was lowered from.
    pub fn position(&self) -> usize {
        match self {
            Instruction::Push { position, .. }
            | Instruction::Negate { position }
            | Instruction::Binary { position, .. }
            | Instruction::Call { position, .. } => *position,
        }
    }
}

/// Postfix program lowered from an AST, with every function call already
/// resolved against the context it was compiled with.
///
/// Executing a program gives exactly the value or error that the tree
/// evaluator gives for the same AST.
#[derive(Debug, Clone)]
pub struct Program {
    instructions: Vec<Instruction>,
    max_stack: usize,
}

impl Program {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn execute(&self) -> Result<f64, EvalError> {
        let mut stack: Vec<f64> = Vec::with_capacity(self.max_stack);

        for instruction in &self.instructions {
            trace!("execute {:?} with stack {:?}", instruction, stack);
            match instruction {
                Instruction::Push { value, .. } => stack.push(*value),
                Instruction::Negate { position } => {
                    let value = pop(&mut stack, *position)?;
                    stack.push(UnaryOperator::Negate.apply(value));
                }
                Instruction::Binary { operator, position } => {
                    let right = pop(&mut stack, *position)?;
                    let left = pop(&mut stack, *position)?;
                    let value = operator
                        .apply(left, right)
                        .map_err(|kind| EvalError::new(kind, *position))?;
                    stack.push(value);
                }
                Instruction::Call {
                    name,
                    builtin,
                    position,
                } => {
                    let split = stack
                        .len()
                        .checked_sub(builtin.arity)
                        .ok_or_else(|| EvalError::new(EvalErrorKind::StackUnderflow, *position))?;
                    let value = builtin
                        .call(&stack[split..])
                        .map_err(|error| error.into_eval_error(name, *position))?;
                    stack.truncate(split);
                    stack.push(value);
                }
            }
        }

        let position = self.instructions.last().map_or(0, Instruction::position);
        pop(&mut stack, position)
    }
}

/// Takes the next operand for the instruction at `position`.
fn pop(stack: &mut Vec<f64>, position: usize) -> Result<f64, EvalError> {
    stack
        .pop()
        .ok_or_else(|| EvalError::new(EvalErrorKind::StackUnderflow, position))
}

pub struct Compiler<'c> {
    context: &'c EvaluationContext,
}

impl<'c> Compiler<'c> {
    pub fn new(context: &'c EvaluationContext) -> Self {
        Self { context }
    }

    /// Lowers `ast` to a program. Fails if a call names an unknown function
    /// or has the wrong number of arguments.
    pub fn compile(&self, ast: &ASTNode) -> Result<Program, EvalError> {
        self.context.validate(ast)?;

        let mut instructions = Vec::new();
        self.compile_node(ast, &mut instructions)?;
        let max_stack = stack_depth(&instructions);
        debug!(
            "Compiled {} into {} instructions (stack depth {})",
            ast,
            instructions.len(),
            max_stack
        );

        Ok(Program {
            instructions,
            max_stack,
        })
    }

    fn compile_node(
        &self,
        node: &ASTNode,
        instructions: &mut Vec<Instruction>,
    ) -> Result<(), EvalError> {
        match node {
            ASTNode::Number { value, position } => instructions.push(Instruction::Push {
                value: *value,
                position: *position,
            }),
            ASTNode::UnaryOperation {
                operator,
                operand,
                position,
            } => {
                self.compile_node(operand, instructions)?;
                match operator {
                    UnaryOperator::Negate => instructions.push(Instruction::Negate {
                        position: *position,
                    }),
                    UnaryOperator::Plus => {}
                }
            }
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
                position,
            } => {
                self.compile_node(left, instructions)?;
                self.compile_node(right, instructions)?;
                instructions.push(Instruction::Binary {
                    operator: *operator,
                    position: *position,
                });
            }
            ASTNode::FunctionCall {
                name,
                args,
                position,
            } => {
                let builtin = self.context.get(name).copied().ok_or_else(|| {
                    EvalError::new(EvalErrorKind::UnknownFunction(name.clone()), *position)
                })?;
                for arg in args {
                    self.compile_node(arg, instructions)?;
                }
                instructions.push(Instruction::Call {
                    name: name.clone(),
                    builtin,
                    position: *position,
                });
            }
        }
        Ok(())
    }
}

/// Highest number of values the program keeps on the stack at once.
fn stack_depth(instructions: &[Instruction]) -> usize {
    let mut depth: usize = 0;
    let mut max_depth: usize = 0;
    for instruction in instructions {
        match instruction {
            Instruction::Push { .. } => depth += 1,
            Instruction::Negate { .. } => {}
            Instruction::Binary { .. } => depth = depth.saturating_sub(1),
            Instruction::Call { builtin, .. } => {
                depth = depth.saturating_sub(builtin.arity) + 1;
            }
        }
        max_depth = max_depth.max(depth);
    }
    max_depth
}
