use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::runtime::class::{self, Class, Instance, STR_METHOD};
use crate::runtime::context::Context;
use crate::runtime::error::RuntimeError;

/// Symbol table mapping names to holders; used as a call frame and as an
/// instance field table. Assignment inserts or overwrites; there is no
/// scope chain beyond what the evaluator threads explicitly.
pub type Closure = HashMap<String, Holder>;

/// A dynamically typed runtime value. Absence (`None`) is represented by an
/// empty `Holder`, not by a variant.
#[derive(Debug)]
pub enum Value {
    Number(i64),
    String(String),
    Bool(bool),
    Class(Rc<Class>),
    Instance(RefCell<Instance>),
}

/// Shared-ownership handle to a heap-resident value. The empty holder
/// denotes `None`; cloning shares the referent, which is how `self` gets
/// bound without fabricating a second owner.
#[derive(Debug, Clone, Default)]
pub struct Holder {
    data: Option<Rc<Value>>,
}

impl Holder {
    pub fn none() -> Self {
        Self { data: None }
    }

    /// Moves `value` to the heap and returns the owning holder.
    pub fn own(value: Value) -> Self {
        Self {
            data: Some(Rc::new(value)),
        }
    }

    pub fn get(&self) -> Option<&Value> {
        self.data.as_deref()
    }

    pub fn is_none(&self) -> bool {
        self.data.is_none()
    }

    pub fn as_number(&self) -> Option<i64> {
        match self.get() {
            Some(Value::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self.get() {
            Some(Value::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.get() {
            Some(Value::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&Rc<Class>> {
        match self.get() {
            Some(Value::Class(class)) => Some(class),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&RefCell<Instance>> {
        match self.get() {
            Some(Value::Instance(instance)) => Some(instance),
            _ => None,
        }
    }
}

/// Truthiness: non-zero numbers, non-empty strings, and `True` are truthy;
/// everything else, `None` included, is falsy.
pub fn is_true(holder: &Holder) -> bool {
    match holder.get() {
        Some(Value::Number(value)) => *value != 0,
        Some(Value::String(value)) => !value.is_empty(),
        Some(Value::Bool(value)) => *value,
        _ => false,
    }
}

/// Type tag used in fault messages; instances report their class name.
pub fn type_name(holder: &Holder) -> String {
    match holder.get() {
        None => "None".to_owned(),
        Some(Value::Number(_)) => "Number".to_owned(),
        Some(Value::String(_)) => "String".to_owned(),
        Some(Value::Bool(_)) => "Bool".to_owned(),
        Some(Value::Class(_)) => "Class".to_owned(),
        Some(Value::Instance(instance)) => instance.borrow().class().name().to_owned(),
    }
}

/// Renders a holder the way `print` would. Instances dispatch a zero-arity
/// `__str__` when one exists, and fall back to an address-like tag.
pub fn render(holder: &Holder, context: &mut dyn Context) -> Result<String, RuntimeError> {
    let Some(value) = holder.get() else {
        return Ok("None".to_owned());
    };
    match value {
        Value::Number(number) => Ok(number.to_string()),
        Value::String(text) => Ok(text.clone()),
        Value::Bool(true) => Ok("True".to_owned()),
        Value::Bool(false) => Ok("False".to_owned()),
        Value::Class(class) => Ok(format!("Class {}", class.name())),
        Value::Instance(instance) => {
            let class = instance.borrow().class();
            if class.method_with_arity(STR_METHOD, 0).is_some() {
                let result = class::call_method(holder, STR_METHOD, Vec::new(), context)?;
                render(&result, context)
            } else {
                Ok(format!(
                    "<{} object at {:p}>",
                    class.name(),
                    value as *const Value
                ))
            }
        }
    }
}
