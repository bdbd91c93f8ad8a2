use crate::ast::Comparator;
use crate::runtime::class::{self, EQ_METHOD, LT_METHOD};
use crate::runtime::context::Context;
use crate::runtime::error::RuntimeError;
use crate::runtime::value::{Holder, Value, is_true, type_name};

/// Generic equality. Primitives compare by value, two empty holders are
/// equal, and an instance on the left dispatches `__eq__(rhs)`. Every other
/// pairing faults.
pub fn equal(
    lhs: &Holder,
    rhs: &Holder,
    context: &mut dyn Context,
) -> Result<bool, RuntimeError> {
    match (lhs.get(), rhs.get()) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => Ok(a == b),
        (Some(Value::String(a)), Some(Value::String(b))) => Ok(a == b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => Ok(a == b),
        (None, None) => Ok(true),
        _ => dispatch(lhs, rhs, EQ_METHOD, "==", context),
    }
}

/// Generic ordering: numeric for numbers, lexicographic for strings,
/// `False < True` for bools, `__lt__(rhs)` for an instance on the left.
pub fn less(
    lhs: &Holder,
    rhs: &Holder,
    context: &mut dyn Context,
) -> Result<bool, RuntimeError> {
    match (lhs.get(), rhs.get()) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => Ok(a < b),
        (Some(Value::String(a)), Some(Value::String(b))) => Ok(a < b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => Ok(a < b),
        _ => dispatch(lhs, rhs, LT_METHOD, "<", context),
    }
}

pub fn not_equal(
    lhs: &Holder,
    rhs: &Holder,
    context: &mut dyn Context,
) -> Result<bool, RuntimeError> {
    Ok(!equal(lhs, rhs, context)?)
}

pub fn greater(
    lhs: &Holder,
    rhs: &Holder,
    context: &mut dyn Context,
) -> Result<bool, RuntimeError> {
    Ok(!less(lhs, rhs, context)? && !equal(lhs, rhs, context)?)
}

pub fn less_or_equal(
    lhs: &Holder,
    rhs: &Holder,
    context: &mut dyn Context,
) -> Result<bool, RuntimeError> {
    Ok(!greater(lhs, rhs, context)?)
}

pub fn greater_or_equal(
    lhs: &Holder,
    rhs: &Holder,
    context: &mut dyn Context,
) -> Result<bool, RuntimeError> {
    Ok(!less(lhs, rhs, context)?)
}

impl Comparator {
    pub fn apply(
        self,
        lhs: &Holder,
        rhs: &Holder,
        context: &mut dyn Context,
    ) -> Result<bool, RuntimeError> {
        match self {
            Comparator::Equal => equal(lhs, rhs, context),
            Comparator::NotEqual => not_equal(lhs, rhs, context),
            Comparator::Less => less(lhs, rhs, context),
            Comparator::Greater => greater(lhs, rhs, context),
            Comparator::LessOrEqual => less_or_equal(lhs, rhs, context),
            Comparator::GreaterOrEqual => greater_or_equal(lhs, rhs, context),
        }
    }
}

// Left-hand instances with a one-argument dunder dispatch it; the result is
// coerced through truthiness. Anything else is incomparable.
fn dispatch(
    lhs: &Holder,
    rhs: &Holder,
    method: &str,
    operation: &str,
    context: &mut dyn Context,
) -> Result<bool, RuntimeError> {
    if let Some(instance) = lhs.as_instance()
        && instance
            .borrow()
            .class()
            .method_with_arity(method, 1)
            .is_some()
    {
        let result = class::call_method(lhs, method, vec![rhs.clone()], context)?;
        return Ok(is_true(&result));
    }
    Err(RuntimeError::UnsupportedOperation {
        operation: operation.to_owned(),
        lhs: type_name(lhs),
        rhs: type_name(rhs),
    })
}
