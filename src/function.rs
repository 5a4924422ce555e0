use crate::class::{LoxInstance, THIS_KEYWORD};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::interpreter::{Completion, Interpreter};
use crate::object::Object;
use crate::statement::Statement;
use crate::token::Token;
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// The parsed shape of a function: shared between the statement that
/// declared it and every closure constructed over it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Token,
    pub parameters: Vec<Token>,
    pub body: Vec<Statement>,
}

/// A declaration paired with the environment captured where it was
/// evaluated.
#[derive(Clone)]
pub struct LoxFunction {
    pub declaration: Rc<FunctionDecl>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl LoxFunction {
    pub fn arity(&self) -> usize {
        self.declaration.parameters.len()
    }

    /// A fresh function whose closure extends the original one with
    /// `this` bound to the instance. Never cached: each bind is its own
    /// closure.
    pub fn bind(&self, instance: Rc<RefCell<LoxInstance>>) -> LoxFunction {
        let mut environment = Environment::from(self.closure.clone());
        environment.define(THIS_KEYWORD.to_string(), Object::Instance(instance));
        LoxFunction {
            declaration: self.declaration.clone(),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        }
    }

    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: &[Object],
    ) -> Result<Object, RuntimeError> {
        let mut environment = Environment::from(self.closure.clone());
        for (parameter, argument) in self.declaration.parameters.iter().zip(arguments) {
            environment.define(parameter.lexeme.clone(), argument.clone());
        }
        let completion =
            interpreter.execute_block(&self.declaration.body, Rc::new(RefCell::new(environment)))?;

        // An initializer yields its receiver no matter how the body exits.
        if self.is_initializer {
            return self
                .closure
                .as_ref()
                .borrow()
                .get_at_distance(0, THIS_KEYWORD)
                .map_err(|kind| RuntimeError::new(&self.declaration.name, kind));
        }
        match completion {
            Completion::Return(value) => Ok(value),
            _ => Ok(Object::Nil),
        }
    }
}

impl Debug for LoxFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}
