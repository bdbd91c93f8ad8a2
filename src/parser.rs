use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Result, anyhow, bail};

use crate::ast::{BinaryOperator, Comparator, Statement};
use crate::lexer::Lexer;
use crate::runtime::class::{Class, Method};
use crate::runtime::value::{Holder, Value};
use crate::token::Token;

/// Recursive-descent parser over the lexer's one-token lookahead.
///
/// The parser owns class-descriptor construction: declared classes are kept
/// in a table so later `Name(args)` expressions lower to `NewInstance` and
/// base-class names resolve at parse time.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    classes: HashMap<String, Rc<Class>>,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            classes: HashMap::new(),
        }
    }

    pub fn parse_program(mut self) -> Result<Statement> {
        let mut statements = Vec::new();
        while !matches!(self.lexer.current(), Token::Eof) {
            if matches!(self.lexer.current(), Token::Newline) {
                self.lexer.next_token()?;
                continue;
            }
            statements.push(self.parse_statement()?);
        }
        Ok(Statement::Compound(statements))
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.lexer.current() {
            Token::Class => self.parse_class_definition(),
            Token::If => self.parse_if_else(),
            _ => self.parse_simple_line(),
        }
    }

    // One logical line of `;`-separated simple statements, closed by a
    // newline.
    fn parse_simple_line(&mut self) -> Result<Statement> {
        let mut statements = vec![self.parse_simple_statement()?];
        while matches!(self.lexer.current(), Token::Char(';')) {
            self.lexer.next_token()?;
            if matches!(self.lexer.current(), Token::Newline | Token::Eof) {
                break;
            }
            statements.push(self.parse_simple_statement()?);
        }
        self.expect_newline()?;
        if statements.len() == 1 {
            return Ok(statements.remove(0));
        }
        Ok(Statement::Compound(statements))
    }

    fn parse_simple_statement(&mut self) -> Result<Statement> {
        match self.lexer.current() {
            Token::Print => self.parse_print(),
            Token::Return => self.parse_return(),
            _ => self.parse_assignment_or_expression(),
        }
    }

    fn parse_print(&mut self) -> Result<Statement> {
        self.lexer.next_token()?;
        let mut args = Vec::new();
        if !self.at_line_end() {
            args.push(self.parse_expression()?);
            while matches!(self.lexer.current(), Token::Char(',')) {
                self.lexer.next_token()?;
                args.push(self.parse_expression()?);
            }
        }
        Ok(Statement::Print { args })
    }

    fn parse_return(&mut self) -> Result<Statement> {
        self.lexer.next_token()?;
        if self.at_line_end() {
            return Ok(Statement::Return(Box::new(Statement::NoneConst)));
        }
        let value = self.parse_expression()?;
        Ok(Statement::Return(Box::new(value)))
    }

    fn parse_assignment_or_expression(&mut self) -> Result<Statement> {
        let expr = self.parse_expression()?;
        if matches!(self.lexer.current(), Token::Char('=')) {
            self.lexer.next_token()?;
            let value = self.parse_expression()?;
            return lower_assignment(expr, value);
        }
        Ok(expr)
    }

    fn parse_class_definition(&mut self) -> Result<Statement> {
        let name = self.lexer.expect_next_id()?;
        self.lexer.next_token()?;
        let parent = if matches!(self.lexer.current(), Token::Char('(')) {
            let base = self.lexer.expect_next_id()?;
            let class = self
                .classes
                .get(&base)
                .cloned()
                .ok_or_else(|| anyhow!("Unknown base class '{base}'"))?;
            self.lexer.expect_next(&Token::Char(')'))?;
            self.lexer.next_token()?;
            Some(class)
        } else {
            None
        };
        self.expect_char(':')?;
        self.expect_newline()?;
        self.expect_token(&Token::Indent)?;

        let mut methods = Vec::new();
        while !matches!(self.lexer.current(), Token::Dedent | Token::Eof) {
            if matches!(self.lexer.current(), Token::Newline) {
                self.lexer.next_token()?;
                continue;
            }
            methods.push(self.parse_method_definition()?);
        }
        self.expect_token(&Token::Dedent)?;

        let class = Rc::new(Class::new(name.clone(), methods, parent));
        self.classes.insert(name, Rc::clone(&class));
        Ok(Statement::ClassDefinition(Holder::own(Value::Class(class))))
    }

    fn parse_method_definition(&mut self) -> Result<Method> {
        self.lexer.expect(&Token::Def)?;
        let name = self.lexer.expect_next_id()?;
        self.lexer.next_token()?;
        self.expect_char('(')?;
        let mut formal_params = Vec::new();
        if let Token::Id(param) = self.lexer.current() {
            formal_params.push(param.clone());
            self.lexer.next_token()?;
            while matches!(self.lexer.current(), Token::Char(',')) {
                formal_params.push(self.lexer.expect_next_id()?);
                self.lexer.next_token()?;
            }
        }
        self.expect_char(')')?;
        self.expect_char(':')?;
        let body = self.parse_suite()?;
        Ok(Method {
            name,
            formal_params,
            body: Statement::MethodBody(Box::new(body)),
        })
    }

    fn parse_if_else(&mut self) -> Result<Statement> {
        self.lexer.next_token()?;
        let condition = self.parse_expression()?;
        self.expect_char(':')?;
        let then_body = self.parse_suite()?;
        let else_body = if matches!(self.lexer.current(), Token::Else) {
            self.lexer.next_token()?;
            self.expect_char(':')?;
            Some(Box::new(self.parse_suite()?))
        } else {
            None
        };
        Ok(Statement::IfElse {
            condition: Box::new(condition),
            then_body: Box::new(then_body),
            else_body,
        })
    }

    // A suite is an indented block, or an inline simple-statement list on
    // the same line.
    fn parse_suite(&mut self) -> Result<Statement> {
        if matches!(self.lexer.current(), Token::Newline) {
            self.lexer.next_token()?;
            self.expect_token(&Token::Indent)?;
            let mut statements = Vec::new();
            while !matches!(self.lexer.current(), Token::Dedent | Token::Eof) {
                if matches!(self.lexer.current(), Token::Newline) {
                    self.lexer.next_token()?;
                    continue;
                }
                statements.push(self.parse_statement()?);
            }
            self.expect_token(&Token::Dedent)?;
            Ok(Statement::Compound(statements))
        } else {
            self.parse_simple_line()
        }
    }

    fn parse_expression(&mut self) -> Result<Statement> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Statement> {
        let mut expr = self.parse_and()?;
        while matches!(self.lexer.current(), Token::Or) {
            self.lexer.next_token()?;
            let rhs = self.parse_and()?;
            expr = Statement::BinaryOp {
                op: BinaryOperator::Or,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
            };
        }
        Ok(expr)
    }

    fn parse_and(&mut self) -> Result<Statement> {
        let mut expr = self.parse_not()?;
        while matches!(self.lexer.current(), Token::And) {
            self.lexer.next_token()?;
            let rhs = self.parse_not()?;
            expr = Statement::BinaryOp {
                op: BinaryOperator::And,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
            };
        }
        Ok(expr)
    }

    fn parse_not(&mut self) -> Result<Statement> {
        if matches!(self.lexer.current(), Token::Not) {
            self.lexer.next_token()?;
            let argument = self.parse_not()?;
            return Ok(Statement::Not(Box::new(argument)));
        }
        self.parse_comparison()
    }

    // A single, non-chaining comparison level.
    fn parse_comparison(&mut self) -> Result<Statement> {
        let lhs = self.parse_additive()?;
        let comparator = match self.lexer.current() {
            Token::Eq => Comparator::Equal,
            Token::NotEq => Comparator::NotEqual,
            Token::Char('<') => Comparator::Less,
            Token::Char('>') => Comparator::Greater,
            Token::LessOrEq => Comparator::LessOrEqual,
            Token::GreaterOrEq => Comparator::GreaterOrEqual,
            _ => return Ok(lhs),
        };
        self.lexer.next_token()?;
        let rhs = self.parse_additive()?;
        Ok(Statement::Comparison {
            comparator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    fn parse_additive(&mut self) -> Result<Statement> {
        let mut expr = self.parse_term()?;
        loop {
            let op = match self.lexer.current() {
                Token::Char('+') => BinaryOperator::Add,
                Token::Char('-') => BinaryOperator::Sub,
                _ => break,
            };
            self.lexer.next_token()?;
            let rhs = self.parse_term()?;
            expr = Statement::BinaryOp {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
            };
        }
        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Statement> {
        let mut expr = self.parse_unary()?;
        loop {
            let op = match self.lexer.current() {
                Token::Char('*') => BinaryOperator::Mult,
                Token::Char('/') => BinaryOperator::Div,
                _ => break,
            };
            self.lexer.next_token()?;
            let rhs = self.parse_unary()?;
            expr = Statement::BinaryOp {
                op,
                lhs: Box::new(expr),
                rhs: Box::new(rhs),
            };
        }
        Ok(expr)
    }

    // Unary minus lowers to a subtraction from zero; unary plus is a no-op.
    fn parse_unary(&mut self) -> Result<Statement> {
        match self.lexer.current() {
            Token::Char('-') => {
                self.lexer.next_token()?;
                let operand = self.parse_unary()?;
                Ok(Statement::BinaryOp {
                    op: BinaryOperator::Sub,
                    lhs: Box::new(Statement::NumericConst(0)),
                    rhs: Box::new(operand),
                })
            }
            Token::Char('+') => {
                self.lexer.next_token()?;
                self.parse_unary()
            }
            _ => self.parse_postfix(),
        }
    }

    // Method-call trailers chain off any call or parenthesised result.
    fn parse_postfix(&mut self) -> Result<Statement> {
        let mut expr = self.parse_primary()?;
        while matches!(self.lexer.current(), Token::Char('.')) {
            let method = self.lexer.expect_next_id()?;
            self.lexer.next_token()?;
            self.expect_char('(')?;
            let args = self.parse_call_args()?;
            expr = Statement::MethodCall {
                object: Box::new(expr),
                method,
                args,
            };
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Statement> {
        match self.lexer.current().clone() {
            Token::Number(value) => {
                self.lexer.next_token()?;
                Ok(Statement::NumericConst(value))
            }
            Token::String(text) => {
                self.lexer.next_token()?;
                Ok(Statement::StringConst(text))
            }
            Token::True => {
                self.lexer.next_token()?;
                Ok(Statement::BoolConst(true))
            }
            Token::False => {
                self.lexer.next_token()?;
                Ok(Statement::BoolConst(false))
            }
            Token::None => {
                self.lexer.next_token()?;
                Ok(Statement::NoneConst)
            }
            Token::Char('(') => {
                self.lexer.next_token()?;
                let expr = self.parse_expression()?;
                self.expect_char(')')?;
                Ok(expr)
            }
            Token::Id(name) => {
                self.lexer.next_token()?;
                self.parse_name_chain(name)
            }
            other => bail!("Expected an expression, got {other:?}"),
        }
    }

    // Dotted chains rooted at a name: `a.b.c` reads fields, and a trailing
    // call becomes `str(..)`, an instantiation, or a method call.
    fn parse_name_chain(&mut self, first: String) -> Result<Statement> {
        let mut ids = vec![first];
        loop {
            if matches!(self.lexer.current(), Token::Char('(')) {
                self.lexer.next_token()?;
                let args = self.parse_call_args()?;
                return self.lower_name_call(ids, args);
            }
            if matches!(self.lexer.current(), Token::Char('.')) {
                let id = self.lexer.expect_next_id()?;
                self.lexer.next_token()?;
                ids.push(id);
                continue;
            }
            return Ok(Statement::Variable(ids));
        }
    }

    fn lower_name_call(
        &mut self,
        mut ids: Vec<String>,
        mut args: Vec<Statement>,
    ) -> Result<Statement> {
        let callee = ids.pop().ok_or_else(|| anyhow!("Expected a callable name"))?;
        if ids.is_empty() {
            if callee == "str" {
                if args.len() != 1 {
                    bail!("str() takes exactly one argument, got {}", args.len());
                }
                return Ok(Statement::Stringify(Box::new(args.remove(0))));
            }
            if let Some(class) = self.classes.get(&callee) {
                return Ok(Statement::NewInstance {
                    class: Rc::clone(class),
                    args,
                });
            }
            bail!("Unknown callable '{callee}'");
        }
        Ok(Statement::MethodCall {
            object: Box::new(Statement::Variable(ids)),
            method: callee,
            args,
        })
    }

    // Arguments after a consumed '('; consumes the closing ')'.
    fn parse_call_args(&mut self) -> Result<Vec<Statement>> {
        let mut args = Vec::new();
        if !matches!(self.lexer.current(), Token::Char(')')) {
            args.push(self.parse_expression()?);
            while matches!(self.lexer.current(), Token::Char(',')) {
                self.lexer.next_token()?;
                args.push(self.parse_expression()?);
            }
        }
        self.expect_char(')')?;
        Ok(args)
    }

    fn at_line_end(&self) -> bool {
        matches!(
            self.lexer.current(),
            Token::Newline | Token::Eof | Token::Char(';')
        )
    }

    fn expect_char(&mut self, c: char) -> Result<()> {
        self.expect_token(&Token::Char(c))
    }

    fn expect_token(&mut self, expected: &Token) -> Result<()> {
        self.lexer.expect(expected)?;
        self.lexer.next_token()?;
        Ok(())
    }

    fn expect_newline(&mut self) -> Result<()> {
        match self.lexer.current() {
            Token::Newline => {
                self.lexer.next_token()?;
                Ok(())
            }
            other => bail!("Expected end of line, got {other:?}"),
        }
    }
}

fn lower_assignment(target: Statement, value: Statement) -> Result<Statement> {
    let Statement::Variable(mut ids) = target else {
        bail!("Invalid assignment target");
    };
    let field = ids.pop().ok_or_else(|| anyhow!("Invalid assignment target"))?;
    if ids.is_empty() {
        return Ok(Statement::Assignment {
            var: field,
            value: Box::new(value),
        });
    }
    Ok(Statement::FieldAssignment {
        object: Box::new(Statement::Variable(ids)),
        field,
        value: Box::new(value),
    })
}

/// Parses `source` into the program's root compound statement.
pub fn parse_source(source: &str) -> Result<Statement> {
    let lexer = Lexer::new(source)?;
    Parser::new(lexer).parse_program()
}
