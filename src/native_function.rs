use crate::object::Object;
use std::fmt::{Debug, Formatter};

#[derive(Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub on_call: fn(&[Object]) -> Object,
}

impl NativeFunction {
    pub fn call(&self, arguments: &[Object]) -> Object {
        (self.on_call)(arguments)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}
