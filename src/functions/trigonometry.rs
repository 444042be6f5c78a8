use super::FunctionError;
use crate::context::EvaluationContext;
use calculator_macros::builtin_fn;

pub fn register(context: &mut EvaluationContext) {
    context.register_function("sin", 1, sin);
    context.register_function("cos", 1, cos);
    context.register_function("tan", 1, tan);
    context.register_function("asin", 1, asin);
    context.register_function("acos", 1, acos);
    context.register_function("atan", 1, atan);
}

fn check_unit_interval(x: f64) -> Result<(), FunctionError> {
    if (-1.0..=1.0).contains(&x) || x.is_nan() {
        Ok(())
    } else {
        Err(FunctionError::domain("argument must be within [-1, 1]"))
    }
}

#[builtin_fn]
pub fn sin(x: f64) -> Result<f64, FunctionError> {
    Ok(x.sin())
}

#[builtin_fn]
pub fn cos(x: f64) -> Result<f64, FunctionError> {
    Ok(x.cos())
}

#[builtin_fn]
pub fn tan(x: f64) -> Result<f64, FunctionError> {
    Ok(x.tan())
}

#[builtin_fn]
pub fn asin(x: f64) -> Result<f64, FunctionError> {
    check_unit_interval(x)?;
    Ok(x.asin())
}

#[builtin_fn]
pub fn acos(x: f64) -> Result<f64, FunctionError> {
    check_unit_interval(x)?;
    Ok(x.acos())
}

#[builtin_fn]
pub fn atan(x: f64) -> Result<f64, FunctionError> {
    Ok(x.atan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(actual: Result<f64, FunctionError>, expected: f64) -> bool {
        actual.is_ok_and(|value| (value - expected).abs() < 1e-12)
    }

    #[test]
    fn test_basic_identities() {
        assert!(close(sin(&[0.0]), 0.0));
        assert!(close(cos(&[PI]), -1.0));
        assert!(close(tan(&[0.0]), 0.0));
        assert!(close(asin(&[1.0]), FRAC_PI_2));
        assert!(close(acos(&[1.0]), 0.0));
        assert!(close(atan(&[1.0]), PI / 4.0));
    }

    #[test]
    fn test_inverse_domain() {
        assert!(matches!(asin(&[1.5]), Err(FunctionError::Domain(_))));
        assert!(matches!(acos(&[-2.0]), Err(FunctionError::Domain(_))));
        assert!(asin(&[f64::NAN]).unwrap().is_nan());
    }
}
