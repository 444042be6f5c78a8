//! Arithmetic expression engine: tokenizer, recursive-descent parser and
//! evaluator producing `f64` results or positioned errors.
//!
//! ```
//! assert_eq!(calculator_rs::evaluate("2 ^ 3 ^ 2"), Ok(512.0));
//! assert!(calculator_rs::evaluate("1 / 0").is_err());
//! ```

pub mod ast;
mod calculator;
pub mod config;
pub mod context;
pub mod error;
pub mod functions;

pub use ast::{ASTNode, Compiler, Evaluator, Parser, Program};
pub use calculator::Calculator;
pub use config::EvaluatorConfig;
pub use context::{Builtin, BuiltinFn, EvaluationContext};
pub use error::{
    EvalError, EvalErrorKind, EvaluationError, FunctionError, LexError, LexErrorKind, ParseError,
    ParseErrorKind,
};

/// Evaluates `expression` with the standard builtins and default limits.
pub fn evaluate(expression: &str) -> Result<f64, EvaluationError> {
    Evaluator::new(EvaluationContext::standard()).evaluate_expression(expression)
}

/// Evaluates many expressions in parallel, returning results in input order.
pub fn evaluate_batch<S>(expressions: &[S]) -> Vec<Result<f64, EvaluationError>>
where
    S: AsRef<str> + Sync,
{
    Evaluator::new(EvaluationContext::standard()).evaluate_batch(expressions)
}
