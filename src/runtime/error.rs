use thiserror::Error;

/// Typed runtime faults. Fatal to the program run; the evaluator propagates
/// them out of `execute` unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },
    #[error("Unknown attribute '{attribute}' on {type_name}")]
    UnknownAttribute { attribute: String, type_name: String },
    #[error("{type_name} is not a class instance")]
    NotAnInstance { type_name: String },
    #[error("Unknown method '{method}' for class {class}")]
    UnknownMethod { method: String, class: String },
    #[error("Method '{method}' expected {expected} arguments, got {found}")]
    MethodArityMismatch {
        method: String,
        expected: usize,
        found: usize,
    },
    #[error("Operation '{operation}' is not supported for {lhs} and {rhs}")]
    UnsupportedOperation {
        operation: String,
        lhs: String,
        rhs: String,
    },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Expected a class object, got {type_name}")]
    ExpectedClass { type_name: String },
    #[error("Return outside of a method body")]
    ReturnOutsideMethod,
    #[error("Output stream error: {message}")]
    OutputStream { message: String },
}
