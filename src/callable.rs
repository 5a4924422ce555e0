use crate::class::LoxClass;
use crate::error::RuntimeError;
use crate::function::LoxFunction;
use crate::interpreter::Interpreter;
use crate::native_function::NativeFunction;
use crate::object::Object;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// The three invocable shapes: user functions, classes acting as
/// constructors and built-in natives.
#[derive(Clone)]
pub enum Callable {
    Function(LoxFunction),
    Class(Rc<LoxClass>),
    Native(NativeFunction),
}

impl Callable {
    pub fn arity(&self) -> usize {
        match self {
            Callable::Function(function) => function.arity(),
            Callable::Class(class) => class.arity(),
            Callable::Native(native) => native.arity,
        }
    }

    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: &[Object],
    ) -> Result<Object, RuntimeError> {
        match self {
            Callable::Function(function) => function.call(interpreter, arguments),
            Callable::Class(class) => LoxClass::construct(class, interpreter, arguments),
            Callable::Native(native) => Ok(native.call(arguments)),
        }
    }

    /// Identity comparison. Every `bind` produces a fresh closure, so a
    /// bound method never equals another bound method.
    pub fn is_identical(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Function(left), Callable::Function(right)) => {
                Rc::ptr_eq(&left.declaration, &right.declaration)
                    && Rc::ptr_eq(&left.closure, &right.closure)
            }
            (Callable::Class(left), Callable::Class(right)) => Rc::ptr_eq(left, right),
            (Callable::Native(left), Callable::Native(right)) => left.name == right.name,
            _ => false,
        }
    }
}

impl Debug for Callable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Callable::Function(function) => function.fmt(f),
            Callable::Class(class) => class.fmt(f),
            Callable::Native(native) => native.fmt(f),
        }
    }
}
