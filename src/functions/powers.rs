use super::FunctionError;
use crate::context::EvaluationContext;
use calculator_macros::builtin_fn;

pub fn register(context: &mut EvaluationContext) {
    context.register_function("sqrt", 1, sqrt);
    context.register_function("cbrt", 1, cbrt);
    context.register_function("pow", 2, pow);
    context.register_function("exp", 1, exp);
    context.register_function("ln", 1, ln);
    context.register_function("log", 1, log);
}

#[builtin_fn]
pub fn sqrt(x: f64) -> Result<f64, FunctionError> {
    if x < 0.0 {
        return Err(FunctionError::domain("argument must be non-negative"));
    }
    Ok(x.sqrt())
}

#[builtin_fn]
pub fn cbrt(x: f64) -> Result<f64, FunctionError> {
    Ok(x.cbrt())
}

/// Same semantics as the `^` operator: a negative base with a fractional
/// exponent yields NaN rather than an error.
#[builtin_fn]
pub fn pow(base: f64, exponent: f64) -> Result<f64, FunctionError> {
    Ok(base.powf(exponent))
}

#[builtin_fn]
pub fn exp(x: f64) -> Result<f64, FunctionError> {
    Ok(x.exp())
}

/// Natural logarithm.
#[builtin_fn]
pub fn ln(x: f64) -> Result<f64, FunctionError> {
    if x <= 0.0 {
        return Err(FunctionError::domain("argument must be positive"));
    }
    Ok(x.ln())
}

/// Base-10 logarithm.
#[builtin_fn]
pub fn log(x: f64) -> Result<f64, FunctionError> {
    if x <= 0.0 {
        return Err(FunctionError::domain("argument must be positive"));
    }
    Ok(x.log10())
}
