use super::FunctionError;
use crate::context::EvaluationContext;
use calculator_macros::builtin_fn;

pub fn register(context: &mut EvaluationContext) {
    context.register_function("pi", 0, pi);
    context.register_function("e", 0, e);
}

#[builtin_fn]
pub fn pi() -> Result<f64, FunctionError> {
    Ok(std::f64::consts::PI)
}

#[builtin_fn]
pub fn e() -> Result<f64, FunctionError> {
    Ok(std::f64::consts::E)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(pi(&[]), Ok(std::f64::consts::PI));
        assert_eq!(e(&[]), Ok(std::f64::consts::E));
    }
}
