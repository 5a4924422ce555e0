use crate::token::Token;

pub trait Error {
    fn message(&self) -> String;
    fn line(&self) -> u32;

    fn description(&self) -> String {
        format!("[line {}] Error: {}", self.line(), self.message())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    TypeMismatch(&'static str),
    DivisionByZero,
    UndefinedVariable(String),
    UndefinedProperty(String),
    NotCallable,
    ArityMismatch { expected: usize, found: usize },
    SuperclassNotClass,
    FieldAccessOnNonInstance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    line: u32,
}

impl RuntimeError {
    pub fn new(token: &Token, kind: RuntimeErrorKind) -> Self {
        Self {
            kind,
            line: token.line,
        }
    }
}

impl Error for RuntimeError {
    fn message(&self) -> String {
        match &self.kind {
            RuntimeErrorKind::TypeMismatch(message) => (*message).to_string(),
            RuntimeErrorKind::DivisionByZero => "Division by zero.".to_string(),
            RuntimeErrorKind::UndefinedVariable(name) => {
                format!("Undefined variable '{}'.", name)
            }
            RuntimeErrorKind::UndefinedProperty(name) => {
                format!("Undefined property '{}'.", name)
            }
            RuntimeErrorKind::NotCallable => "Can only call functions and classes.".to_string(),
            RuntimeErrorKind::ArityMismatch { expected, found } => {
                format!("Expected {} arguments but got {}.", expected, found)
            }
            RuntimeErrorKind::SuperclassNotClass => "Superclass must be a class.".to_string(),
            RuntimeErrorKind::FieldAccessOnNonInstance => {
                "Only instances have properties.".to_string()
            }
        }
    }

    fn line(&self) -> u32 {
        self.line
    }
}
