//! Builtin function library, grouped by category.
//!
//! Every builtin takes its arguments as a slice in call order; the
//! `#[builtin_fn]` attribute derives that signature and the arity check from
//! an ordinary `f64` parameter list.

pub mod constants;
pub mod powers;
pub mod rounding;
pub mod trigonometry;

use crate::context::EvaluationContext;

pub use crate::error::FunctionError;

pub fn register_functions(context: &mut EvaluationContext) {
    constants::register(context);
    powers::register(context);
    rounding::register(context);
    trigonometry::register(context);
}
