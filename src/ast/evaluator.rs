use crate::ast::{ASTNode, Parser};
use crate::config::EvaluatorConfig;
use crate::context::EvaluationContext;
use crate::error::{EvalError, EvalErrorKind, EvaluationError};
use log::{debug, trace};
use rayon::prelude::*;

/// Tree-walking evaluator.
///
/// The evaluator borrows a read-only context and keeps no other state, so
/// one instance can serve concurrent requests.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'c> {
    context: &'c EvaluationContext,
    config: EvaluatorConfig,
}

impl<'c> Evaluator<'c> {
    pub fn new(context: &'c EvaluationContext) -> Self {
        Self {
            context,
            config: EvaluatorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn context(&self) -> &'c EvaluationContext {
        self.context
    }

    pub fn config(&self) -> EvaluatorConfig {
        self.config
    }

    /// Parse an expression string into an AST.
    pub fn parse_expression(&self, expression: &str) -> Result<ASTNode, EvaluationError> {
        Parser::new(self.context)
            .with_max_depth(self.config.max_depth)
            .parse(expression)
    }

    /// Parses and evaluates `expression`, stopping at the first error.
    pub fn evaluate_expression(&self, expression: &str) -> Result<f64, EvaluationError> {
        let ast = self.parse_expression(expression)?;
        let value = self.evaluate(&ast)?;
        debug!("{} = {}", expression, value);
        Ok(value)
    }

    /// Evaluates an AST that may have been built by hand. Calls are checked
    /// against the context before any arithmetic happens.
    pub fn evaluate_ast(&self, ast: &ASTNode) -> Result<f64, EvalError> {
        self.context.validate(ast)?;
        self.evaluate(ast)
    }

    /// Evaluates every expression in parallel. Results keep the input order.
    pub fn evaluate_batch<S>(&self, expressions: &[S]) -> Vec<Result<f64, EvaluationError>>
    where
        S: AsRef<str> + Sync,
    {
        debug!("Evaluating batch of {} expressions", expressions.len());
        expressions
            .par_iter()
            .map(|expression| self.evaluate_expression(expression.as_ref()))
            .collect()
    }

    /// Evaluates an already validated AST.
    ///
    /// Children are evaluated left to right, function arguments in call order.
    pub(crate) fn evaluate(&self, ast: &ASTNode) -> Result<f64, EvalError> {
        let result = match ast {
            ASTNode::Number { value, .. } => *value,

            ASTNode::UnaryOperation {
                operator, operand, ..
            } => operator.apply(self.evaluate(operand)?),

            ASTNode::BinaryOperation {
                left,
                operator,
                right,
                position,
            } => {
                let left_value = self.evaluate(left)?;
                let right_value = self.evaluate(right)?;
                operator
                    .apply(left_value, right_value)
                    .map_err(|kind| EvalError::new(kind, *position))?
            }

            ASTNode::FunctionCall {
                name,
                args,
                position,
            } => {
                let builtin = self.context.get(name).ok_or_else(|| {
                    EvalError::new(EvalErrorKind::UnknownFunction(name.clone()), *position)
                })?;
                let values = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<Result<Vec<f64>, EvalError>>()?;
                trace!("call {}({:?})", name, values);
                builtin
                    .call(&values)
                    .map_err(|error| error.into_eval_error(name, *position))?
            }
        };

        Ok(result)
    }
}
