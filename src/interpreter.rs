//! Tree-walking evaluation of the statement family.
//!
//! Every node executes against a closure and a context and yields a holder.
//! `return` travels as an out-of-band `Interrupt` that only `MethodBody`
//! intercepts; runtime faults pass through every node unchanged.

use crate::ast::{BinaryOperator, Statement};
use crate::runtime::class::{ADD_METHOD, call_method, new_instance};
use crate::runtime::context::Context;
use crate::runtime::error::RuntimeError;
use crate::runtime::value::{Closure, Holder, Value, is_true, render, type_name};

/// Out-of-band control signal raised during execution.
#[derive(Debug)]
pub enum Interrupt {
    /// A propagating `return`, caught by the nearest enclosing method body.
    Return(Holder),
    /// A runtime fault; never caught by the evaluator.
    Fault(RuntimeError),
}

impl From<RuntimeError> for Interrupt {
    fn from(error: RuntimeError) -> Self {
        Interrupt::Fault(error)
    }
}

pub type ExecResult = Result<Holder, Interrupt>;

/// Executes a whole program or a method body. A `return` escaping past
/// every method body is a fault.
pub fn run(
    program: &Statement,
    closure: &mut Closure,
    context: &mut dyn Context,
) -> Result<Holder, RuntimeError> {
    match program.execute(closure, context) {
        Ok(holder) => Ok(holder),
        Err(Interrupt::Return(_)) => Err(RuntimeError::ReturnOutsideMethod),
        Err(Interrupt::Fault(error)) => Err(error),
    }
}

impl Statement {
    pub fn execute(&self, closure: &mut Closure, context: &mut dyn Context) -> ExecResult {
        match self {
            Statement::NumericConst(value) => Ok(Holder::own(Value::Number(*value))),
            Statement::StringConst(text) => Ok(Holder::own(Value::String(text.clone()))),
            Statement::BoolConst(value) => Ok(Holder::own(Value::Bool(*value))),
            Statement::NoneConst => Ok(Holder::none()),
            Statement::Variable(ids) => Ok(resolve_chain(ids, closure)?),
            Statement::Assignment { var, value } => {
                let holder = value.execute(closure, context)?;
                closure.insert(var.clone(), holder.clone());
                Ok(holder)
            }
            Statement::FieldAssignment {
                object,
                field,
                value,
            } => {
                let target = object.execute(closure, context)?;
                let Some(instance) = target.as_instance() else {
                    return Err(RuntimeError::NotAnInstance {
                        type_name: type_name(&target),
                    }
                    .into());
                };
                let holder = value.execute(closure, context)?;
                instance
                    .borrow_mut()
                    .fields_mut()
                    .insert(field.clone(), holder.clone());
                Ok(holder)
            }
            Statement::Print { args } => {
                let mut last = Holder::none();
                for (index, arg) in args.iter().enumerate() {
                    last = arg.execute(closure, context)?;
                    let text = render(&last, context)?;
                    if index > 0 {
                        write_output(context, " ")?;
                    }
                    write_output(context, &text)?;
                }
                write_output(context, "\n")?;
                Ok(last)
            }
            Statement::MethodCall {
                object,
                method,
                args,
            } => {
                let receiver = object.execute(closure, context)?;
                let actual = eval_args(args, closure, context)?;
                Ok(call_method(&receiver, method, actual, context)?)
            }
            Statement::NewInstance { class, args } => {
                let actual = eval_args(args, closure, context)?;
                Ok(new_instance(class, actual, context)?)
            }
            Statement::Stringify(argument) => {
                let holder = argument.execute(closure, context)?;
                let text = render(&holder, context)?;
                Ok(Holder::own(Value::String(text)))
            }
            Statement::BinaryOp { op, lhs, rhs } => match op {
                BinaryOperator::And => {
                    let lhs_true = is_true(&lhs.execute(closure, context)?);
                    let result = lhs_true && is_true(&rhs.execute(closure, context)?);
                    Ok(Holder::own(Value::Bool(result)))
                }
                BinaryOperator::Or => {
                    let lhs_true = is_true(&lhs.execute(closure, context)?);
                    let result = lhs_true || is_true(&rhs.execute(closure, context)?);
                    Ok(Holder::own(Value::Bool(result)))
                }
                _ => {
                    let left = lhs.execute(closure, context)?;
                    let right = rhs.execute(closure, context)?;
                    Ok(arithmetic(*op, &left, &right, context)?)
                }
            },
            Statement::Not(argument) => {
                let holder = argument.execute(closure, context)?;
                Ok(Holder::own(Value::Bool(!is_true(&holder))))
            }
            Statement::Comparison {
                comparator,
                lhs,
                rhs,
            } => {
                let left = lhs.execute(closure, context)?;
                let right = rhs.execute(closure, context)?;
                let result = comparator.apply(&left, &right, context)?;
                Ok(Holder::own(Value::Bool(result)))
            }
            Statement::Compound(statements) => {
                for statement in statements {
                    statement.execute(closure, context)?;
                }
                Ok(Holder::none())
            }
            Statement::MethodBody(body) => match body.execute(closure, context) {
                Ok(_) => Ok(Holder::none()),
                Err(Interrupt::Return(holder)) => Ok(holder),
                Err(fault) => Err(fault),
            },
            Statement::Return(value) => {
                let holder = value.execute(closure, context)?;
                Err(Interrupt::Return(holder))
            }
            Statement::ClassDefinition(class_object) => match class_object.as_class() {
                Some(class) => {
                    closure.insert(class.name().to_owned(), class_object.clone());
                    Ok(class_object.clone())
                }
                None => Err(RuntimeError::ExpectedClass {
                    type_name: type_name(class_object),
                }
                .into()),
            },
            Statement::IfElse {
                condition,
                then_body,
                else_body,
            } => {
                if is_true(&condition.execute(closure, context)?) {
                    then_body.execute(closure, context)
                } else if let Some(else_body) = else_body {
                    else_body.execute(closure, context)
                } else {
                    Ok(Holder::none())
                }
            }
        }
    }
}

// Dotted lookup: the head resolves in the closure, every later segment in
// the fields of the instance reached so far.
fn resolve_chain(ids: &[String], closure: &Closure) -> Result<Holder, RuntimeError> {
    let Some((head, rest)) = ids.split_first() else {
        return Ok(Holder::none());
    };
    let mut current = closure
        .get(head)
        .cloned()
        .ok_or_else(|| RuntimeError::UndefinedVariable { name: head.clone() })?;
    for field in rest {
        let next = {
            let Some(instance) = current.as_instance() else {
                return Err(RuntimeError::UnknownAttribute {
                    attribute: field.clone(),
                    type_name: type_name(&current),
                });
            };
            instance
                .borrow()
                .fields()
                .get(field)
                .cloned()
                .ok_or_else(|| RuntimeError::UnknownAttribute {
                    attribute: field.clone(),
                    type_name: type_name(&current),
                })?
        };
        current = next;
    }
    Ok(current)
}

fn eval_args(
    args: &[Statement],
    closure: &mut Closure,
    context: &mut dyn Context,
) -> Result<Vec<Holder>, Interrupt> {
    let mut actual = Vec::with_capacity(args.len());
    for arg in args {
        actual.push(arg.execute(closure, context)?);
    }
    Ok(actual)
}

fn arithmetic(
    op: BinaryOperator,
    left: &Holder,
    right: &Holder,
    context: &mut dyn Context,
) -> Result<Holder, RuntimeError> {
    if let (Some(lhs), Some(rhs)) = (left.as_number(), right.as_number()) {
        let value = match op {
            BinaryOperator::Add => lhs.wrapping_add(rhs),
            BinaryOperator::Sub => lhs.wrapping_sub(rhs),
            BinaryOperator::Mult => lhs.wrapping_mul(rhs),
            BinaryOperator::Div => {
                if rhs == 0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                lhs.wrapping_div(rhs)
            }
            BinaryOperator::And | BinaryOperator::Or => {
                unreachable!("logical operators are handled before arithmetic")
            }
        };
        return Ok(Holder::own(Value::Number(value)));
    }
    if op == BinaryOperator::Add {
        if let (Some(lhs), Some(rhs)) = (left.as_string(), right.as_string()) {
            return Ok(Holder::own(Value::String(format!("{lhs}{rhs}"))));
        }
        if let Some(instance) = left.as_instance()
            && instance
                .borrow()
                .class()
                .method_with_arity(ADD_METHOD, 1)
                .is_some()
        {
            return call_method(left, ADD_METHOD, vec![right.clone()], context);
        }
    }
    Err(RuntimeError::UnsupportedOperation {
        operation: op.symbol().to_owned(),
        lhs: type_name(left),
        rhs: type_name(right),
    })
}

fn write_output(context: &mut dyn Context, text: &str) -> Result<(), RuntimeError> {
    context
        .output()
        .write_all(text.as_bytes())
        .map_err(|error| RuntimeError::OutputStream {
            message: error.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::ast::Comparator;
    use crate::runtime::class::{Class, EQ_METHOD, Instance, Method, SELF_NAME, STR_METHOD};
    use crate::runtime::context::BufferContext;

    fn num(value: i64) -> Statement {
        Statement::NumericConst(value)
    }

    fn text(value: &str) -> Statement {
        Statement::StringConst(value.to_owned())
    }

    fn var(ids: &[&str]) -> Statement {
        Statement::Variable(ids.iter().map(|id| (*id).to_owned()).collect())
    }

    fn assign(name: &str, value: Statement) -> Statement {
        Statement::Assignment {
            var: name.to_owned(),
            value: Box::new(value),
        }
    }

    fn print(args: Vec<Statement>) -> Statement {
        Statement::Print { args }
    }

    fn binary(op: BinaryOperator, lhs: Statement, rhs: Statement) -> Statement {
        Statement::BinaryOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    fn method(name: &str, params: &[&str], body: Statement) -> Method {
        Method {
            name: name.to_owned(),
            formal_params: params.iter().map(|p| (*p).to_owned()).collect(),
            body: Statement::MethodBody(Box::new(body)),
        }
    }

    fn execute(statement: &Statement) -> (Result<Holder, RuntimeError>, String) {
        let mut closure = Closure::new();
        let mut context = BufferContext::new();
        let result = run(statement, &mut closure, &mut context);
        (result, context.contents())
    }

    fn expect_fault(statement: &Statement) -> RuntimeError {
        execute(statement).0.expect_err("expected runtime fault")
    }

    #[test]
    fn constants_yield_their_values() {
        assert_eq!(execute(&num(42)).0.expect("run").as_number(), Some(42));
        assert_eq!(execute(&text("hi")).0.expect("run").as_string(), Some("hi"));
        assert_eq!(
            execute(&Statement::BoolConst(true)).0.expect("run").as_bool(),
            Some(true)
        );
        assert!(execute(&Statement::NoneConst).0.expect("run").is_none());
    }

    #[test]
    fn assignment_stores_exactly_one_binding_and_returns_it() {
        let mut closure = Closure::new();
        let mut context = BufferContext::new();
        let statement = assign("n", binary(BinaryOperator::Add, num(1), num(2)));
        let result = run(&statement, &mut closure, &mut context).expect("run");
        assert_eq!(result.as_number(), Some(3));
        assert_eq!(closure.len(), 1);
        assert_eq!(closure.get("n").and_then(Holder::as_number), Some(3));
    }

    #[test]
    fn pure_expressions_do_not_mutate_the_closure() {
        let mut closure = Closure::new();
        closure.insert("x".to_owned(), Holder::own(Value::Number(1)));
        let mut context = BufferContext::new();
        let statement = Statement::Comparison {
            comparator: Comparator::Less,
            lhs: Box::new(var(&["x"])),
            rhs: Box::new(num(5)),
        };
        run(&statement, &mut closure, &mut context).expect("run");
        run(&statement, &mut closure, &mut context).expect("run");
        assert_eq!(closure.len(), 1);
    }

    #[test]
    fn print_renders_space_separated_with_trailing_newline() {
        let statement = print(vec![
            Statement::BoolConst(true),
            text("hello"),
            Statement::NoneConst,
            num(7),
        ]);
        let (result, output) = execute(&statement);
        assert_eq!(output, "True hello None 7\n");
        // Print yields the last evaluated holder.
        assert_eq!(result.expect("run").as_number(), Some(7));
    }

    #[test]
    fn empty_print_emits_a_bare_newline() {
        let (result, output) = execute(&print(Vec::new()));
        assert_eq!(output, "\n");
        assert!(result.expect("run").is_none());
    }

    #[test]
    fn arithmetic_covers_numbers_strings_and_faults() {
        let cases = [
            (binary(BinaryOperator::Add, num(2), num(3)), 5),
            (binary(BinaryOperator::Sub, num(2), num(3)), -1),
            (binary(BinaryOperator::Mult, num(4), num(5)), 20),
            (binary(BinaryOperator::Div, num(7), num(2)), 3),
            (binary(BinaryOperator::Div, num(-7), num(2)), -3),
        ];
        for (statement, expected) in cases {
            assert_eq!(execute(&statement).0.expect("run").as_number(), Some(expected));
        }

        let concat = binary(BinaryOperator::Add, text("ab"), text("cd"));
        assert_eq!(execute(&concat).0.expect("run").as_string(), Some("abcd"));

        let mixed = binary(BinaryOperator::Add, num(1), text("x"));
        assert_eq!(
            expect_fault(&mixed),
            RuntimeError::UnsupportedOperation {
                operation: "+".to_owned(),
                lhs: "Number".to_owned(),
                rhs: "String".to_owned(),
            }
        );
        let strings = binary(BinaryOperator::Mult, text("a"), text("b"));
        assert!(matches!(
            expect_fault(&strings),
            RuntimeError::UnsupportedOperation { .. }
        ));
    }

    #[test]
    fn division_by_zero_faults() {
        let statement = binary(BinaryOperator::Div, num(1), num(0));
        assert_eq!(expect_fault(&statement), RuntimeError::DivisionByZero);
    }

    #[test]
    fn and_or_short_circuit_and_yield_bools() {
        // The right operand prints, so short-circuiting is visible in the
        // output.
        let and_statement = binary(
            BinaryOperator::And,
            num(0),
            print(vec![text("evaluated")]),
        );
        let (result, output) = execute(&and_statement);
        assert_eq!(result.expect("run").as_bool(), Some(false));
        assert_eq!(output, "");

        let or_statement = binary(
            BinaryOperator::Or,
            num(1),
            print(vec![text("evaluated")]),
        );
        let (result, output) = execute(&or_statement);
        assert_eq!(result.expect("run").as_bool(), Some(true));
        assert_eq!(output, "");

        let or_falls_through = binary(BinaryOperator::Or, num(0), text("yes"));
        assert_eq!(
            execute(&or_falls_through).0.expect("run").as_bool(),
            Some(true)
        );
    }

    #[test]
    fn not_negates_truthiness() {
        assert_eq!(
            execute(&Statement::Not(Box::new(num(0)))).0.expect("run").as_bool(),
            Some(true)
        );
        assert_eq!(
            execute(&Statement::Not(Box::new(text("x")))).0.expect("run").as_bool(),
            Some(false)
        );
    }

    #[test]
    fn stringify_matches_print_rendering() {
        let cases = [
            (Statement::Stringify(Box::new(text("x"))), "x"),
            (Statement::Stringify(Box::new(num(-3))), "-3"),
            (Statement::Stringify(Box::new(Statement::NoneConst)), "None"),
            (Statement::Stringify(Box::new(Statement::BoolConst(false))), "False"),
        ];
        for (statement, expected) in cases {
            assert_eq!(execute(&statement).0.expect("run").as_string(), Some(expected));
        }
    }

    #[test]
    fn if_else_picks_a_branch_by_truthiness() {
        let statement = Statement::IfElse {
            condition: Box::new(num(0)),
            then_body: Box::new(print(vec![text("no")])),
            else_body: Some(Box::new(print(vec![text("yes")]))),
        };
        assert_eq!(execute(&statement).1, "yes\n");

        let no_else = Statement::IfElse {
            condition: Box::new(num(0)),
            then_body: Box::new(print(vec![text("no")])),
            else_body: None,
        };
        let (result, output) = execute(&no_else);
        assert_eq!(output, "");
        assert!(result.expect("run").is_none());
    }

    #[test]
    fn dotted_chain_reads_fields_and_faults_on_misses() {
        let class = Rc::new(Class::new("Box".to_owned(), Vec::new(), None));
        let mut closure = Closure::new();
        let holder = Holder::own(Value::Instance(RefCell::new(Instance::new(class))));
        holder
            .as_instance()
            .expect("instance")
            .borrow_mut()
            .fields_mut()
            .insert("x".to_owned(), Holder::own(Value::Number(7)));
        closure.insert("b".to_owned(), holder);
        let mut context = BufferContext::new();

        let read = var(&["b", "x"]);
        assert_eq!(
            run(&read, &mut closure, &mut context).expect("run").as_number(),
            Some(7)
        );

        let missing_var = run(&var(&["nope"]), &mut closure, &mut context).expect_err("fault");
        assert_eq!(
            missing_var,
            RuntimeError::UndefinedVariable {
                name: "nope".to_owned(),
            }
        );

        let missing_field = run(&var(&["b", "y"]), &mut closure, &mut context).expect_err("fault");
        assert_eq!(
            missing_field,
            RuntimeError::UnknownAttribute {
                attribute: "y".to_owned(),
                type_name: "Box".to_owned(),
            }
        );

        closure.insert("n".to_owned(), Holder::own(Value::Number(1)));
        let through_number = run(&var(&["n", "x"]), &mut closure, &mut context).expect_err("fault");
        assert_eq!(
            through_number,
            RuntimeError::UnknownAttribute {
                attribute: "x".to_owned(),
                type_name: "Number".to_owned(),
            }
        );
    }

    #[test]
    fn field_assignment_requires_an_instance() {
        let statement = Statement::FieldAssignment {
            object: Box::new(num(1)),
            field: "x".to_owned(),
            value: Box::new(num(2)),
        };
        assert_eq!(
            expect_fault(&statement),
            RuntimeError::NotAnInstance {
                type_name: "Number".to_owned(),
            }
        );
    }

    #[test]
    fn class_definition_binds_the_class_under_its_name() {
        let class = Rc::new(Class::new("Greeter".to_owned(), Vec::new(), None));
        let statement = Statement::Compound(vec![
            Statement::ClassDefinition(Holder::own(Value::Class(class))),
            print(vec![var(&["Greeter"])]),
        ]);
        assert_eq!(execute(&statement).1, "Class Greeter\n");
    }

    #[test]
    fn return_short_circuits_the_enclosing_method_body() {
        let body = Statement::Compound(vec![
            print(vec![text("a")]),
            Statement::Return(Box::new(num(7))),
            print(vec![text("b")]),
        ]);
        let class = Rc::new(Class::new(
            "M".to_owned(),
            vec![method("m", &[], body)],
            None,
        ));
        let statement = Statement::Compound(vec![
            Statement::ClassDefinition(Holder::own(Value::Class(Rc::clone(&class)))),
            assign("m", Statement::NewInstance { class, args: Vec::new() }),
            print(vec![Statement::MethodCall {
                object: Box::new(var(&["m"])),
                method: "m".to_owned(),
                args: Vec::new(),
            }]),
        ]);
        assert_eq!(execute(&statement).1, "a\n7\n");
    }

    #[test]
    fn method_body_without_return_yields_none() {
        let class = Rc::new(Class::new(
            "M".to_owned(),
            vec![method("m", &[], print(vec![text("ran")]))],
            None,
        ));
        let statement = Statement::Compound(vec![
            assign("m", Statement::NewInstance { class, args: Vec::new() }),
            print(vec![Statement::MethodCall {
                object: Box::new(var(&["m"])),
                method: "m".to_owned(),
                args: Vec::new(),
            }]),
        ]);
        assert_eq!(execute(&statement).1, "ran\nNone\n");
    }

    #[test]
    fn return_outside_a_method_body_is_a_fault() {
        let statement = Statement::Return(Box::new(num(1)));
        assert_eq!(expect_fault(&statement), RuntimeError::ReturnOutsideMethod);
    }

    #[test]
    fn faults_pass_through_method_bodies_unchanged() {
        let body = binary(BinaryOperator::Div, num(1), num(0));
        let class = Rc::new(Class::new(
            "M".to_owned(),
            vec![method("m", &[], body)],
            None,
        ));
        let statement = Statement::Compound(vec![
            assign("m", Statement::NewInstance { class, args: Vec::new() }),
            Statement::MethodCall {
                object: Box::new(var(&["m"])),
                method: "m".to_owned(),
                args: Vec::new(),
            },
        ]);
        assert_eq!(expect_fault(&statement), RuntimeError::DivisionByZero);
    }

    #[test]
    fn subclass_method_wins_on_dispatch() {
        let base = Rc::new(Class::new(
            "A".to_owned(),
            vec![method("f", &[], Statement::Return(Box::new(num(1))))],
            None,
        ));
        let derived = Rc::new(Class::new(
            "B".to_owned(),
            vec![method("f", &[], Statement::Return(Box::new(num(2))))],
            Some(Rc::clone(&base)),
        ));
        let statement = Statement::Compound(vec![
            assign("a", Statement::NewInstance { class: base, args: Vec::new() }),
            assign("b", Statement::NewInstance { class: derived, args: Vec::new() }),
            print(vec![
                Statement::MethodCall {
                    object: Box::new(var(&["a"])),
                    method: "f".to_owned(),
                    args: Vec::new(),
                },
                Statement::MethodCall {
                    object: Box::new(var(&["b"])),
                    method: "f".to_owned(),
                    args: Vec::new(),
                },
            ]),
        ]);
        assert_eq!(execute(&statement).1, "1 2\n");
    }

    #[test]
    fn instance_add_dispatches_dunder() {
        let body = Statement::Return(Box::new(binary(
            BinaryOperator::Add,
            var(&[SELF_NAME, "value"]),
            var(&["other"]),
        )));
        let class = Rc::new(Class::new(
            "Wrapper".to_owned(),
            vec![method(ADD_METHOD, &["other"], body)],
            None,
        ));
        let statement = Statement::Compound(vec![
            assign("w", Statement::NewInstance { class, args: Vec::new() }),
            Statement::FieldAssignment {
                object: Box::new(var(&["w"])),
                field: "value".to_owned(),
                value: Box::new(num(40)),
            },
            print(vec![binary(BinaryOperator::Add, var(&["w"]), num(2))]),
        ]);
        assert_eq!(execute(&statement).1, "42\n");
    }

    #[test]
    fn comparison_dispatches_dunder_eq_on_instances() {
        let class = Rc::new(Class::new(
            "Anything".to_owned(),
            vec![method(
                EQ_METHOD,
                &["other"],
                Statement::Return(Box::new(Statement::BoolConst(true))),
            )],
            None,
        ));
        let statement = Statement::Compound(vec![
            assign("x", Statement::NewInstance { class, args: Vec::new() }),
            print(vec![Statement::Comparison {
                comparator: Comparator::Equal,
                lhs: Box::new(var(&["x"])),
                rhs: Box::new(num(5)),
            }]),
        ]);
        assert_eq!(execute(&statement).1, "True\n");
    }

    #[test]
    fn print_uses_str_dunder_when_present() {
        let class = Rc::new(Class::new(
            "Named".to_owned(),
            vec![method(
                STR_METHOD,
                &[],
                Statement::Return(Box::new(text("a named thing"))),
            )],
            None,
        ));
        let statement = Statement::Compound(vec![
            assign("n", Statement::NewInstance { class, args: Vec::new() }),
            print(vec![var(&["n"])]),
        ]);
        assert_eq!(execute(&statement).1, "a named thing\n");
    }

    #[test]
    fn repeated_execution_of_a_pure_expression_is_stable() {
        let statement = binary(BinaryOperator::Mult, num(6), num(7));
        let mut closure = Closure::new();
        let mut context = BufferContext::new();
        let first = run(&statement, &mut closure, &mut context).expect("run");
        let second = run(&statement, &mut closure, &mut context).expect("run");
        assert_eq!(first.as_number(), second.as_number());
    }

    #[test]
    fn new_instance_node_materialises_a_fresh_instance_each_time() {
        let class = Rc::new(Class::new("Box".to_owned(), Vec::new(), None));
        let node = Statement::NewInstance {
            class,
            args: Vec::new(),
        };
        let mut closure = Closure::new();
        let mut context = BufferContext::new();
        let first = run(&node, &mut closure, &mut context).expect("run");
        let second = run(&node, &mut closure, &mut context).expect("run");
        first
            .as_instance()
            .expect("instance")
            .borrow_mut()
            .fields_mut()
            .insert("x".to_owned(), Holder::own(Value::Number(1)));
        assert!(
            second
                .as_instance()
                .expect("instance")
                .borrow()
                .fields()
                .is_empty()
        );
    }
}
