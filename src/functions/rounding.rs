use super::FunctionError;
use crate::context::EvaluationContext;
use calculator_macros::builtin_fn;

pub fn register(context: &mut EvaluationContext) {
    context.register_function("abs", 1, abs);
    context.register_function("floor", 1, floor);
    context.register_function("ceil", 1, ceil);
    context.register_function("round", 1, round);
    context.register_function("min", 2, min);
    context.register_function("max", 2, max);
    context.register_function("hypot", 2, hypot);
}

#[builtin_fn]
pub fn abs(x: f64) -> Result<f64, FunctionError> {
    Ok(x.abs())
}

#[builtin_fn]
pub fn floor(x: f64) -> Result<f64, FunctionError> {
    Ok(x.floor())
}

#[builtin_fn]
pub fn ceil(x: f64) -> Result<f64, FunctionError> {
    Ok(x.ceil())
}

/// Rounds half away from zero.
#[builtin_fn]
pub fn round(x: f64) -> Result<f64, FunctionError> {
    Ok(x.round())
}

#[builtin_fn]
pub fn min(a: f64, b: f64) -> Result<f64, FunctionError> {
    Ok(a.min(b))
}

#[builtin_fn]
pub fn max(a: f64, b: f64) -> Result<f64, FunctionError> {
    Ok(a.max(b))
}

#[builtin_fn]
pub fn hypot(x: f64, y: f64) -> Result<f64, FunctionError> {
    Ok(x.hypot(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(floor(&[-2.5]), Ok(-3.0));
        assert_eq!(ceil(&[-2.5]), Ok(-2.0));
        assert_eq!(round(&[2.5]), Ok(3.0));
        assert_eq!(round(&[-2.5]), Ok(-3.0));
        assert_eq!(abs(&[-0.25]), Ok(0.25));
    }

    #[test]
    fn test_min_max_hypot() {
        assert_eq!(min(&[3.0, -1.0]), Ok(-1.0));
        assert_eq!(max(&[3.0, -1.0]), Ok(3.0));
        assert_eq!(hypot(&[3.0, 4.0]), Ok(5.0));
    }
}
