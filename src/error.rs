use thiserror::Error;

/// Any failure produced while turning an expression string into a number.
///
/// Each variant corresponds to the pipeline stage that detected the problem.
/// The first failing stage aborts the rest of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl EvaluationError {
    /// 0-based character offset into the input where the error was detected.
    pub fn position(&self) -> usize {
        match self {
            EvaluationError::Lex(error) => error.position,
            EvaluationError::Parse(error) => error.position,
            EvaluationError::Eval(error) => error.position,
        }
    }

    /// Human-readable description, without the position suffix.
    pub fn message(&self) -> String {
        match self {
            EvaluationError::Lex(error) => error.kind.to_string(),
            EvaluationError::Parse(error) => error.kind.to_string(),
            EvaluationError::Eval(error) => error.kind.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: usize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    /// The character that could not be tokenized, if the input had not ended.
    pub fn character(&self) -> Option<char> {
        match self.kind {
            LexErrorKind::UnexpectedCharacter(ch) | LexErrorKind::MalformedNumber(ch) => Some(ch),
            LexErrorKind::MalformedExponent(ch) => ch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// A second decimal point inside a number.
    #[error("malformed number: unexpected '{0}'")]
    MalformedNumber(char),
    #[error("malformed exponent: expected digit, found {}", describe_char(.0))]
    MalformedExponent(Option<char>),
}

fn describe_char(ch: &Option<char>) -> String {
    match ch {
        Some(ch) => format!("'{ch}'"),
        None => "end of input".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("empty expression")]
    EmptyExpression,
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unmatched parenthesis")]
    UnmatchedParenthesis,
    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("expected '(' after function name '{0}'")]
    MissingCallParenthesis(String),
    #[error("wrong arity: '{name}' takes {expected} argument(s), found {found}")]
    WrongArity {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("expression nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub position: usize,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    #[error("division by zero")]
    DivisionByZero,
    #[error("domain error in '{function}': {reason}")]
    DomainError { function: String, reason: String },
    /// Only reachable for ASTs built by hand; the parser rejects unknown names.
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("wrong arity: '{name}' takes {expected} argument(s), found {found}")]
    WrongArity {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("stack underflow while executing compiled program")]
    StackUnderflow,
}

/// Failure reported by a builtin function. The evaluator attaches the call
/// position and function name when converting it into an [`EvalError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    #[error("{0}")]
    Domain(String),
    #[error("expected {expected} argument(s), found {found}")]
    Arity { expected: usize, found: usize },
}

impl FunctionError {
    pub fn domain(reason: impl Into<String>) -> Self {
        FunctionError::Domain(reason.into())
    }

    pub(crate) fn into_eval_error(self, name: &str, position: usize) -> EvalError {
        let kind = match self {
            FunctionError::Domain(reason) => EvalErrorKind::DomainError {
                function: name.to_string(),
                reason,
            },
            FunctionError::Arity { expected, found } => EvalErrorKind::WrongArity {
                name: name.to_string(),
                expected,
                found,
            },
        };
        EvalError::new(kind, position)
    }
}
