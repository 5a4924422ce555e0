use error::Error;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::{fs, result::Result};

pub mod callable;
pub mod class;
pub mod clock;
pub mod environment;
pub mod error;
pub mod expression;
pub mod function;
pub mod interpreter;
pub mod native_function;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod statement;
pub mod token;
pub mod token_type;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
    Success,
    StaticError,
    RuntimeError,
}

/// Interpreter state that survives across REPL lines: globals, resolved
/// distances and the token id counter they are keyed by.
struct Session {
    interpreter: Rc<RefCell<Interpreter>>,
    next_token_id: usize,
}

impl Session {
    fn new() -> Self {
        Self {
            interpreter: Rc::new(RefCell::new(Interpreter::new())),
            next_token_id: 0,
        }
    }

    fn run(&mut self, source: &str) -> RunOutcome {
        let scanner = Scanner::new(source, self.next_token_id);
        let (tokens, scan_errors) = scanner.scan_tokens();
        if let Some(last) = tokens.last() {
            self.next_token_id = last.id + 1;
        }
        for error in &scan_errors {
            eprintln!("{}", error.description());
        }

        let mut parser = Parser::new(&tokens);
        let statements = match parser.parse() {
            Ok(statements) => statements,
            Err(errors) => {
                for error in errors {
                    eprintln!("{}", error.description());
                }
                return RunOutcome::StaticError;
            }
        };
        if !scan_errors.is_empty() {
            return RunOutcome::StaticError;
        }

        let mut resolver = Resolver::new(self.interpreter.clone());
        if let Err(error) = resolver.resolve_statements(&statements) {
            eprintln!("{}", error.description());
            return RunOutcome::StaticError;
        }

        match self.interpreter.as_ref().borrow_mut().interpret(&statements) {
            Ok(()) => RunOutcome::Success,
            Err(error) => {
                eprintln!("{}", error.description());
                RunOutcome::RuntimeError
            }
        }
    }
}

pub fn run_file(path: String) -> RunOutcome {
    let content = fs::read_to_string(path).expect("File not found");
    Session::new().run(&content)
}

pub fn run_prompt() -> Result<(), io::Error> {
    let mut session = Session::new();

    print!("> ");
    io::stdout().flush()?;
    for read_result in io::stdin().lock().lines() {
        let line = read_result?;
        session.run(&line);

        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
