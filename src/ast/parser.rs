use crate::ast::{ASTNode, Lexer, Operator, Token, TokenKind, UnaryOperator};
use crate::config::DEFAULT_MAX_DEPTH;
use crate::context::EvaluationContext;
use crate::error::{EvaluationError, ParseError, ParseErrorKind};
use log::debug;

type ParseResult<T> = Result<T, EvaluationError>;

/// Recursive-descent parser for arithmetic expressions.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := power (('*' | '/') power)*
/// power   := unary ('^' power)?
/// unary   := ('-' | '+') unary | primary
/// primary := Number
///          | Identifier '(' (expr (',' expr)*)? ')'
///          | '(' expr ')'
/// ```
///
/// Function names are resolved against the context while parsing, so unknown
/// functions and arity mismatches never reach the evaluator.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'c> {
    context: &'c EvaluationContext,
    max_depth: usize,
}

impl<'c> Parser<'c> {
    pub fn new(context: &'c EvaluationContext) -> Self {
        Self {
            context,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses `input` against the standard context.
    pub fn parse_expression(input: &str) -> Result<ASTNode, EvaluationError> {
        Parser::new(EvaluationContext::standard()).parse(input)
    }

    pub fn parse(&self, input: &str) -> Result<ASTNode, EvaluationError> {
        debug!("Parsing expression: {}", input);
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        let mut state = ParseState {
            lexer,
            current,
            context: self.context,
            max_depth: self.max_depth,
            depth: 0,
        };
        let ast = state.parse_root()?;
        debug!("Parse result: {}", ast);
        Ok(ast)
    }
}

fn parse_error(kind: ParseErrorKind, position: usize) -> EvaluationError {
    ParseError::new(kind, position).into()
}

/// Per-request parsing state: the token source plus one token of lookahead.
struct ParseState<'a, 'c> {
    lexer: Lexer<'a>,
    current: Token,
    context: &'c EvaluationContext,
    max_depth: usize,
    depth: usize,
}

impl ParseState<'_, '_> {
    fn parse_root(&mut self) -> ParseResult<ASTNode> {
        if self.current.kind == TokenKind::EndOfInput {
            return Err(parse_error(
                ParseErrorKind::EmptyExpression,
                self.current.position,
            ));
        }

        let ast = self.parse_expr()?;
        match &self.current.kind {
            TokenKind::EndOfInput => Ok(ast),
            TokenKind::RParen => Err(parse_error(
                ParseErrorKind::UnmatchedParenthesis,
                self.current.position,
            )),
            other => Err(parse_error(
                ParseErrorKind::TrailingInput(other.to_string()),
                self.current.position,
            )),
        }
    }

    /// Consumes the lookahead token and returns it.
    fn advance(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Consumes the lookahead if it is one of `accepted` binary operators.
    fn eat_operator(&mut self, accepted: &[Operator]) -> ParseResult<Option<(Operator, usize)>> {
        match Operator::try_from(&self.current.kind) {
            Ok(operator) if accepted.contains(&operator) => {
                let token = self.advance()?;
                Ok(Some((operator, token.position)))
            }
            _ => Ok(None),
        }
    }

    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= self.max_depth {
            return Err(parse_error(
                ParseErrorKind::NestingTooDeep(self.max_depth),
                self.current.position,
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_expr(&mut self) -> ParseResult<ASTNode> {
        self.parse_chain(&[Operator::Add, Operator::Subtract], Self::parse_term)
    }

    fn parse_term(&mut self) -> ParseResult<ASTNode> {
        self.parse_chain(&[Operator::Multiply, Operator::Divide], Self::parse_power)
    }

    /// Parses a left-associative run of `operand (operator operand)*`.
    ///
    /// Every operator deepens the left spine of the tree by one, so each one
    /// raises the depth seen by the operands after it until the run ends.
    fn parse_chain(
        &mut self,
        accepted: &[Operator],
        operand: fn(&mut Self) -> ParseResult<ASTNode>,
    ) -> ParseResult<ASTNode> {
        let outer = self.depth;
        let result = self.parse_chain_links(accepted, operand);
        self.depth = outer;
        result
    }

    fn parse_chain_links(
        &mut self,
        accepted: &[Operator],
        operand: fn(&mut Self) -> ParseResult<ASTNode>,
    ) -> ParseResult<ASTNode> {
        let mut node = operand(self)?;
        while let Some((operator, position)) = self.eat_operator(accepted)? {
            self.depth += 1;
            let right = operand(self)?;
            node = ASTNode::binary(node, operator, right, position);
        }
        Ok(node)
    }

    fn parse_power(&mut self) -> ParseResult<ASTNode> {
        self.nested(|parser| {
            let base = parser.parse_unary()?;
            match parser.eat_operator(&[Operator::Power])? {
                Some((operator, position)) => {
                    let exponent = parser.parse_power()?;
                    Ok(ASTNode::binary(base, operator, exponent, position))
                }
                None => Ok(base),
            }
        })
    }

    fn parse_unary(&mut self) -> ParseResult<ASTNode> {
        match UnaryOperator::try_from(&self.current.kind) {
            Ok(operator) => {
                let token = self.advance()?;
                self.nested(|parser| {
                    let operand = parser.parse_unary()?;
                    Ok(ASTNode::unary(operator, operand, token.position))
                })
            }
            Err(()) => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> ParseResult<ASTNode> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Number(value) => Ok(ASTNode::number(value, token.position)),
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                self.expect_closing(token.position)?;
                Ok(inner)
            }
            TokenKind::Identifier(name) => self.parse_call(name, token.position),
            TokenKind::EndOfInput => Err(parse_error(
                ParseErrorKind::UnexpectedEndOfInput,
                token.position,
            )),
            other => Err(parse_error(
                ParseErrorKind::UnexpectedToken(other.to_string()),
                token.position,
            )),
        }
    }

    /// Consumes the `)` closing the `(` found at `open`.
    fn expect_closing(&mut self, open: usize) -> ParseResult<()> {
        match &self.current.kind {
            TokenKind::RParen => {
                self.advance()?;
                Ok(())
            }
            TokenKind::EndOfInput => Err(parse_error(ParseErrorKind::UnmatchedParenthesis, open)),
            other => Err(parse_error(
                ParseErrorKind::UnexpectedToken(other.to_string()),
                self.current.position,
            )),
        }
    }

    fn parse_call(&mut self, name: String, position: usize) -> ParseResult<ASTNode> {
        let Some(arity) = self.context.get(&name).map(|builtin| builtin.arity) else {
            return Err(parse_error(ParseErrorKind::UnknownFunction(name), position));
        };

        if self.current.kind != TokenKind::LParen {
            return Err(parse_error(
                ParseErrorKind::MissingCallParenthesis(name),
                self.current.position,
            ));
        }
        let open = self.advance()?;

        let mut args = Vec::with_capacity(arity);
        if self.current.kind != TokenKind::RParen {
            args.push(self.parse_expr()?);
            while self.current.kind == TokenKind::Comma {
                self.advance()?;
                args.push(self.parse_expr()?);
            }
        }
        self.expect_closing(open.position)?;

        if args.len() != arity {
            return Err(parse_error(
                ParseErrorKind::WrongArity {
                    name,
                    expected: arity,
                    found: args.len(),
                },
                position,
            ));
        }

        Ok(ASTNode::call(name, args, position))
    }
}
