use crate::ast::ASTNode;
use crate::error::{EvalError, EvalErrorKind, FunctionError};
use crate::functions::register_functions;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Native implementation of a builtin. Arguments arrive in call order.
pub type BuiltinFn = fn(&[f64]) -> Result<f64, FunctionError>;

#[derive(Clone, Copy)]
pub struct Builtin {
    pub arity: usize,
    pub function: BuiltinFn,
}

impl Builtin {
    pub fn call(&self, args: &[f64]) -> Result<f64, FunctionError> {
        (self.function)(args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

static STANDARD: LazyLock<EvaluationContext> = LazyLock::new(EvaluationContext::with_builtins);

/// Table of builtin functions available to expressions.
///
/// A context is filled once and then only read, so a single instance can be
/// shared by any number of concurrent evaluations.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    functions: HashMap<String, Builtin>,
}

impl EvaluationContext {
    /// Creates a context with no functions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context holding the standard builtin library.
    pub fn with_builtins() -> Self {
        let mut context = Self::new();
        register_functions(&mut context);
        context
    }

    /// The process-wide standard context, built on first use.
    pub fn standard() -> &'static EvaluationContext {
        &STANDARD
    }

    /// Registers a function, replacing any previous one with the same name.
    pub fn register_function(&mut self, name: &str, arity: usize, function: BuiltinFn) {
        self.functions
            .insert(name.to_string(), Builtin { arity, function });
    }

    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names in alphabetical order.
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Checks that every call in `ast` names a registered function with the
    /// right number of arguments. Trees from the parser always pass; this
    /// guards trees assembled by hand.
    pub fn validate(&self, ast: &ASTNode) -> Result<(), EvalError> {
        match ast {
            ASTNode::Number { .. } => Ok(()),
            ASTNode::UnaryOperation { operand, .. } => self.validate(operand),
            ASTNode::BinaryOperation { left, right, .. } => {
                self.validate(left)?;
                self.validate(right)
            }
            ASTNode::FunctionCall {
                name,
                args,
                position,
            } => {
                let builtin = self.get(name).ok_or_else(|| {
                    EvalError::new(EvalErrorKind::UnknownFunction(name.clone()), *position)
                })?;
                if builtin.arity != args.len() {
                    return Err(EvalError::new(
                        EvalErrorKind::WrongArity {
                            name: name.clone(),
                            expected: builtin.arity,
                            found: args.len(),
                        },
                        *position,
                    ));
                }
                args.iter().try_for_each(|arg| self.validate(arg))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double(args: &[f64]) -> Result<f64, FunctionError> {
        match args {
            [x] => Ok(x * 2.0),
            _ => Err(FunctionError::Arity {
                expected: 1,
                found: args.len(),
            }),
        }
    }

    #[test]
    fn test_register_and_call() {
        let mut context = EvaluationContext::new();
        context.register_function("double", 1, double);

        let builtin = context.get("double").unwrap();
        assert_eq!(builtin.arity, 1);
        assert_eq!(builtin.call(&[21.0]), Ok(42.0));
        assert!(context.contains("double"));
        assert!(!context.contains("triple"));
    }

    #[test]
    fn test_standard_context_is_shared() {
        let first = EvaluationContext::standard();
        let second = EvaluationContext::standard();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.get("sqrt").map(|builtin| builtin.arity), Some(1));
        assert_eq!(first.get("pow").map(|builtin| builtin.arity), Some(2));
    }

    #[test]
    fn test_function_names_sorted() {
        let mut context = EvaluationContext::new();
        context.register_function("zeta", 1, double);
        context.register_function("alpha", 1, double);
        assert_eq!(context.function_names(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_validate_hand_built_ast() {
        let context = EvaluationContext::standard();

        let unknown = ASTNode::call("nope", vec![], 3);
        assert_eq!(
            context.validate(&unknown),
            Err(EvalError::new(
                EvalErrorKind::UnknownFunction("nope".to_string()),
                3
            ))
        );

        let wrong_arity = ASTNode::unary(
            crate::ast::UnaryOperator::Negate,
            ASTNode::call("sqrt", vec![ASTNode::number(1.0, 5), ASTNode::number(2.0, 8)], 0),
            0,
        );
        assert_eq!(
            context.validate(&wrong_arity).unwrap_err().kind,
            EvalErrorKind::WrongArity {
                name: "sqrt".to_string(),
                expected: 1,
                found: 2,
            }
        );

        let valid = ASTNode::call("max", vec![ASTNode::number(1.0, 4), ASTNode::number(2.0, 7)], 0);
        assert_eq!(context.validate(&valid), Ok(()));
    }
}
