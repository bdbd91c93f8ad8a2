use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::Statement;
use crate::interpreter;
use crate::runtime::context::Context;
use crate::runtime::error::RuntimeError;
use crate::runtime::value::{Closure, Holder, Value, type_name};

pub const SELF_NAME: &str = "self";
pub const INIT_METHOD: &str = "__init__";
pub const STR_METHOD: &str = "__str__";
pub const ADD_METHOD: &str = "__add__";
pub const EQ_METHOD: &str = "__eq__";
pub const LT_METHOD: &str = "__lt__";

/// A named method: formal parameter names plus the body to execute. `self`
/// is bound by the call machinery and never listed as a formal.
#[derive(Debug)]
pub struct Method {
    pub name: String,
    pub formal_params: Vec<String>,
    pub body: Statement,
}

/// Immutable class descriptor. The lookup index is flattened over the
/// parent chain at construction, subclass entries winning on collision, so
/// no call-site ever walks the chain.
#[derive(Debug)]
pub struct Class {
    name: String,
    methods: Vec<Rc<Method>>,
    index: HashMap<String, Rc<Method>>,
    parent: Option<Rc<Class>>,
}

impl Class {
    pub fn new(name: String, methods: Vec<Method>, parent: Option<Rc<Class>>) -> Self {
        let methods: Vec<Rc<Method>> = methods.into_iter().map(Rc::new).collect();
        let mut index = match &parent {
            Some(parent) => parent.index.clone(),
            None => HashMap::new(),
        };
        for method in &methods {
            index.insert(method.name.clone(), Rc::clone(method));
        }
        Self {
            name,
            methods,
            index,
            parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Methods declared on this class only, in declaration order.
    pub fn methods(&self) -> &[Rc<Method>] {
        &self.methods
    }

    pub fn parent(&self) -> Option<&Rc<Class>> {
        self.parent.as_ref()
    }

    pub fn method(&self, name: &str) -> Option<&Rc<Method>> {
        self.index.get(name)
    }

    pub fn method_with_arity(&self, name: &str, arity: usize) -> Option<&Rc<Method>> {
        self.method(name)
            .filter(|method| method.formal_params.len() == arity)
    }
}

/// A class instance: its descriptor plus the per-instance field table.
/// Fields are created by assignment; reads of absent fields fault.
#[derive(Debug)]
pub struct Instance {
    class: Rc<Class>,
    fields: Closure,
}

impl Instance {
    pub fn new(class: Rc<Class>) -> Self {
        Self {
            class,
            fields: Closure::new(),
        }
    }

    pub fn class(&self) -> Rc<Class> {
        Rc::clone(&self.class)
    }

    pub fn fields(&self) -> &Closure {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut Closure {
        &mut self.fields
    }
}

/// Materialises a fresh instance of `class`. A declared `__init__` runs
/// only when its formal arity matches `args`; otherwise the instance is
/// returned uninitialised.
pub fn new_instance(
    class: &Rc<Class>,
    args: Vec<Holder>,
    context: &mut dyn Context,
) -> Result<Holder, RuntimeError> {
    let holder = Holder::own(Value::Instance(RefCell::new(Instance::new(Rc::clone(
        class,
    )))));
    if class.method_with_arity(INIT_METHOD, args.len()).is_some() {
        call_method(&holder, INIT_METHOD, args, context)?;
    }
    Ok(holder)
}

/// Dispatches `method` on an instance holder: builds a fresh frame binding
/// `self` plus the formals positionally, then executes the method body.
pub fn call_method(
    receiver: &Holder,
    method: &str,
    args: Vec<Holder>,
    context: &mut dyn Context,
) -> Result<Holder, RuntimeError> {
    let Some(instance) = receiver.as_instance() else {
        return Err(RuntimeError::NotAnInstance {
            type_name: type_name(receiver),
        });
    };
    let class = instance.borrow().class();
    let Some(entry) = class.method(method) else {
        return Err(RuntimeError::UnknownMethod {
            method: method.to_owned(),
            class: class.name().to_owned(),
        });
    };
    if entry.formal_params.len() != args.len() {
        return Err(RuntimeError::MethodArityMismatch {
            method: method.to_owned(),
            expected: entry.formal_params.len(),
            found: args.len(),
        });
    }
    let mut frame = Closure::new();
    frame.insert(SELF_NAME.to_owned(), receiver.clone());
    for (param, arg) in entry.formal_params.iter().zip(args) {
        frame.insert(param.clone(), arg);
    }
    interpreter::run(&entry.body, &mut frame, context)
}
