use crate::callable::Callable;
use crate::error::{RuntimeError, RuntimeErrorKind};
use crate::function::LoxFunction;
use crate::interpreter::Interpreter;
use crate::object::Object;
use crate::token::Token;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

pub const CONSTRUCTOR_KEYWORD: &str = "init";
pub const THIS_KEYWORD: &str = "this";
pub const SUPER_KEYWORD: &str = "super";

pub struct LoxClass {
    pub name: String,
    pub superclass: Option<Rc<LoxClass>>,
    pub methods: HashMap<String, LoxFunction>,
}

pub struct LoxInstance {
    class: Rc<LoxClass>,
    fields: HashMap<String, Object>,
}

impl LoxClass {
    pub fn find_method(&self, name: &str) -> Option<&LoxFunction> {
        self.methods.get(name).or_else(|| {
            self.superclass
                .as_ref()
                .and_then(|class| class.find_method(name))
        })
    }

    /// Constructor arity is the arity of `init` wherever it lives in the
    /// chain; a class with no initializer takes no arguments.
    pub fn arity(&self) -> usize {
        self.find_method(CONSTRUCTOR_KEYWORD)
            .map(LoxFunction::arity)
            .unwrap_or(0)
    }

    pub fn construct(
        class: &Rc<LoxClass>,
        interpreter: &mut Interpreter,
        arguments: &[Object],
    ) -> Result<Object, RuntimeError> {
        let instance = Rc::new(RefCell::new(LoxInstance::new(class.clone())));
        if let Some(initializer) = class.find_method(CONSTRUCTOR_KEYWORD) {
            initializer.bind(instance.clone()).call(interpreter, arguments)?;
        }
        Ok(Object::Instance(instance))
    }
}

impl LoxInstance {
    pub fn new(class: Rc<LoxClass>) -> Self {
        Self {
            class,
            fields: HashMap::new(),
        }
    }

    /// Fields shadow methods; method lookup walks the superclass chain
    /// and binds the receiver.
    pub fn get(
        &self,
        name: &Token,
        this: Rc<RefCell<LoxInstance>>,
    ) -> Result<Object, RuntimeError> {
        if let Some(value) = self.fields.get(&name.lexeme) {
            return Ok(value.clone());
        }
        self.class
            .find_method(&name.lexeme)
            .map(|method| Object::Callable(Callable::Function(method.bind(this))))
            .ok_or_else(|| {
                RuntimeError::new(name, RuntimeErrorKind::UndefinedProperty(name.lexeme.clone()))
            })
    }

    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl Debug for LoxClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Debug for LoxInstance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} instance", self.class.name)
    }
}
