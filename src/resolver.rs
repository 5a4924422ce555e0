use crate::class::{CONSTRUCTOR_KEYWORD, SUPER_KEYWORD, THIS_KEYWORD};
use crate::error::Error;
use crate::expression::{self, Expression, LiteralExpression, Visitor};
use crate::function::FunctionDecl;
use crate::interpreter::Interpreter;
use crate::statement::{self, Statement};
use crate::token::Token;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Walks the AST once before execution, reporting binding errors and
/// telling the interpreter how many scopes to skip for every local
/// reference. References it stays silent about are globals.
pub struct Resolver {
    interpreter: Rc<RefCell<Interpreter>>,
    scopes: VecDeque<HashMap<String, VariableState>>,
    current_function: FunctionType,
    current_class: ClassType,
    loop_depth: usize,
}

#[derive(Copy, Clone, PartialEq)]
enum VariableState {
    Declared,
    Defined,
}

#[derive(Copy, Clone, PartialEq)]
enum FunctionType {
    None,
    Function,
    Method,
    Initializer,
}

#[derive(Copy, Clone)]
enum ClassType {
    None,
    Class,
    Subclass,
}

#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: &'static str,
}

impl ResolveError {
    fn new(token: &Token, message: &'static str) -> Self {
        Self {
            token: token.clone(),
            message,
        }
    }
}

impl Error for ResolveError {
    fn message(&self) -> String {
        self.message.to_string()
    }

    fn line(&self) -> u32 {
        self.token.line
    }
}

type ResolveResult = Result<(), ResolveError>;

impl Resolver {
    pub fn new(interpreter: Rc<RefCell<Interpreter>>) -> Self {
        Self {
            interpreter,
            scopes: VecDeque::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
            loop_depth: 0,
        }
    }

    pub fn resolve_statements(&mut self, statements: &[Statement]) -> ResolveResult {
        for statement in statements {
            self.resolve_statement(statement)?;
        }
        Ok(())
    }

    fn resolve_statement(&mut self, statement: &Statement) -> ResolveResult {
        statement.accept(self)
    }

    fn resolve_expression(&mut self, expression: &Expression) -> ResolveResult {
        expression.accept(self)
    }

    fn begin_scope(&mut self) {
        self.scopes.push_front(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop_front();
    }

    fn declare(&mut self, name: &Token) -> ResolveResult {
        match self.scopes.front_mut() {
            Some(scope) if scope.contains_key(&name.lexeme) => Err(ResolveError::new(
                name,
                "Already a variable with this name in this scope.",
            )),
            Some(scope) => {
                scope.insert(name.lexeme.clone(), VariableState::Declared);
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn define(&mut self, name: &Token) {
        if let Some(state) = self.scopes.front_mut().and_then(|scope| scope.get_mut(&name.lexeme)) {
            *state = VariableState::Defined;
        }
    }

    /// Puts a name the runtime itself binds (`this`, `super`) into the
    /// innermost scope.
    fn define_implicit(&mut self, name: &str) {
        if let Some(scope) = self.scopes.front_mut() {
            scope.insert(name.to_string(), VariableState::Defined);
        }
    }

    /// Innermost scope holding the name wins; its index is the number of
    /// environments to skip at runtime.
    fn resolve_local(&mut self, name: &str, token_id: usize) {
        for (depth, scope) in self.scopes.iter().enumerate() {
            if scope.contains_key(name) {
                self.interpreter.as_ref().borrow_mut().resolve(token_id, depth);
                return;
            }
        }
    }

    fn resolve_function(
        &mut self,
        declaration: &FunctionDecl,
        function_type: FunctionType,
    ) -> ResolveResult {
        let enclosing_function = std::mem::replace(&mut self.current_function, function_type);
        // A function body starts a fresh loop context: a `break` inside it
        // cannot target a loop surrounding the declaration.
        let enclosing_loop_depth = std::mem::replace(&mut self.loop_depth, 0);

        self.begin_scope();
        for parameter in &declaration.parameters {
            self.declare(parameter)?;
            self.define(parameter);
        }
        self.resolve_statements(&declaration.body)?;
        self.end_scope();

        self.current_function = enclosing_function;
        self.loop_depth = enclosing_loop_depth;
        Ok(())
    }
}

impl statement::Visitor<ResolveResult> for Resolver {
    fn visit_expression(&mut self, expression: &Expression) -> ResolveResult {
        self.resolve_expression(expression)
    }

    fn visit_print(&mut self, expression: &Expression) -> ResolveResult {
        self.resolve_expression(expression)
    }

    fn visit_variable_stmt(
        &mut self,
        name: &Token,
        initializer: &Option<Expression>,
    ) -> ResolveResult {
        self.declare(name)?;
        if let Some(expression) = initializer {
            self.resolve_expression(expression)?;
        }
        self.define(name);
        Ok(())
    }

    fn visit_block(&mut self, statements: &[Statement]) -> ResolveResult {
        self.begin_scope();
        self.resolve_statements(statements)?;
        self.end_scope();
        Ok(())
    }

    fn visit_if(
        &mut self,
        condition: &Expression,
        then_branch: &Statement,
        else_branch: &Option<Box<Statement>>,
    ) -> ResolveResult {
        self.resolve_expression(condition)?;
        self.resolve_statement(then_branch)?;
        if let Some(else_branch) = else_branch {
            self.resolve_statement(else_branch)?;
        }
        Ok(())
    }

    fn visit_while(&mut self, condition: &Expression, body: &Statement) -> ResolveResult {
        self.resolve_expression(condition)?;
        self.loop_depth += 1;
        let result = self.resolve_statement(body);
        self.loop_depth -= 1;
        result
    }

    fn visit_break(&mut self, keyword: &Token) -> ResolveResult {
        if self.loop_depth == 0 {
            return Err(ResolveError::new(keyword, "Can't use 'break' outside of a loop."));
        }
        Ok(())
    }

    fn visit_function(&mut self, declaration: &Rc<FunctionDecl>) -> ResolveResult {
        self.declare(&declaration.name)?;
        self.define(&declaration.name);
        self.resolve_function(declaration, FunctionType::Function)
    }

    fn visit_return(&mut self, keyword: &Token, value: &Option<Expression>) -> ResolveResult {
        match self.current_function {
            FunctionType::None => Err(ResolveError::new(
                keyword,
                "Can't return from top-level code.",
            )),
            FunctionType::Initializer if value.is_some() => Err(ResolveError::new(
                keyword,
                "Can't return a value from an initializer.",
            )),
            _ => {
                if let Some(expression) = value {
                    self.resolve_expression(expression)?;
                }
                Ok(())
            }
        }
    }

    fn visit_class(
        &mut self,
        name: &Token,
        superclass: &Option<Token>,
        methods: &[Rc<FunctionDecl>],
    ) -> ResolveResult {
        self.declare(name)?;
        self.define(name);

        let enclosing_class = std::mem::replace(
            &mut self.current_class,
            if superclass.is_some() {
                ClassType::Subclass
            } else {
                ClassType::Class
            },
        );

        if let Some(superclass_name) = superclass {
            if superclass_name.lexeme == name.lexeme {
                return Err(ResolveError::new(
                    superclass_name,
                    "A class can't inherit from itself.",
                ));
            }
            self.visit_variable(superclass_name)?;
            self.begin_scope();
            self.define_implicit(SUPER_KEYWORD);
        }

        self.begin_scope();
        self.define_implicit(THIS_KEYWORD);
        for method in methods {
            let function_type = if method.name.lexeme == CONSTRUCTOR_KEYWORD {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(method, function_type)?;
        }
        self.end_scope();

        if superclass.is_some() {
            self.end_scope();
        }
        self.current_class = enclosing_class;
        Ok(())
    }
}

impl expression::Visitor<ResolveResult> for Resolver {
    fn visit_literal(&mut self, _literal: &LiteralExpression) -> ResolveResult {
        Ok(())
    }

    fn visit_unary(&mut self, _operator: &Token, right: &Expression) -> ResolveResult {
        self.resolve_expression(right)
    }

    fn visit_binary(
        &mut self,
        left: &Expression,
        _operator: &Token,
        right: &Expression,
    ) -> ResolveResult {
        self.resolve_expression(left)?;
        self.resolve_expression(right)
    }

    fn visit_logical(
        &mut self,
        left: &Expression,
        _operator: &Token,
        right: &Expression,
    ) -> ResolveResult {
        self.resolve_expression(left)?;
        self.resolve_expression(right)
    }

    fn visit_grouping(&mut self, expression: &Expression) -> ResolveResult {
        self.resolve_expression(expression)
    }

    fn visit_variable(&mut self, name: &Token) -> ResolveResult {
        let state = self
            .scopes
            .front()
            .and_then(|scope| scope.get(&name.lexeme))
            .copied();
        if state == Some(VariableState::Declared) {
            return Err(ResolveError::new(
                name,
                "Can't read local variable in its own initializer.",
            ));
        }
        self.resolve_local(&name.lexeme, name.id);
        Ok(())
    }

    fn visit_assignment(&mut self, name: &Token, value: &Expression) -> ResolveResult {
        self.resolve_expression(value)?;
        self.resolve_local(&name.lexeme, name.id);
        Ok(())
    }

    fn visit_call(
        &mut self,
        callee: &Expression,
        _close_paren: &Token,
        arguments: &[Expression],
    ) -> ResolveResult {
        self.resolve_expression(callee)?;
        for argument in arguments {
            self.resolve_expression(argument)?;
        }
        Ok(())
    }

    fn visit_get(&mut self, object: &Expression, _name: &Token) -> ResolveResult {
        self.resolve_expression(object)
    }

    fn visit_set(
        &mut self,
        object: &Expression,
        _name: &Token,
        value: &Expression,
    ) -> ResolveResult {
        self.resolve_expression(object)?;
        self.resolve_expression(value)
    }

    fn visit_this(&mut self, keyword: &Token) -> ResolveResult {
        if let ClassType::None = self.current_class {
            return Err(ResolveError::new(
                keyword,
                "Can't use 'this' outside of a class.",
            ));
        }
        self.resolve_local(THIS_KEYWORD, keyword.id);
        Ok(())
    }

    fn visit_super(&mut self, keyword: &Token, _method: &Token) -> ResolveResult {
        match self.current_class {
            ClassType::None => Err(ResolveError::new(
                keyword,
                "Can't use 'super' outside of a class.",
            )),
            ClassType::Class => Err(ResolveError::new(
                keyword,
                "Can't use 'super' in a class with no superclass.",
            )),
            ClassType::Subclass => {
                self.resolve_local(SUPER_KEYWORD, keyword.id);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::scanner::Scanner;

    fn resolve_source(source: &str) -> (Rc<RefCell<Interpreter>>, ResolveResult) {
        let (tokens, errors) = Scanner::new(source, 0).scan_tokens();
        assert!(errors.is_empty());
        let statements = Parser::new(&tokens).parse().expect("source should parse");
        let interpreter = Rc::new(RefCell::new(Interpreter::new()));
        let result = Resolver::new(interpreter.clone()).resolve_statements(&statements);
        (interpreter, result)
    }

    fn assert_rejects(source: &str, expected_message: &str) {
        let (_, result) = resolve_source(source);
        match result {
            Err(error) => assert_eq!(error.message, expected_message),
            Ok(()) => panic!("expected resolve error: {}", expected_message),
        }
    }

    #[test]
    fn test_that_top_level_return_is_rejected() {
        assert_rejects("return 1;", "Can't return from top-level code.");
    }

    #[test]
    fn test_that_initializer_cannot_return_a_value() {
        assert_rejects(
            "class P { init() { return 1; } }",
            "Can't return a value from an initializer.",
        );
        let (_, result) = resolve_source("class P { init() { return; } }");
        assert!(result.is_ok());
    }

    #[test]
    fn test_that_break_outside_a_loop_is_rejected() {
        assert_rejects("break;", "Can't use 'break' outside of a loop.");
        assert_rejects(
            "while (true) { fun inner() { break; } }",
            "Can't use 'break' outside of a loop.",
        );
        let (_, result) = resolve_source("while (true) { if (true) break; }");
        assert!(result.is_ok());
    }

    #[test]
    fn test_that_self_initialization_is_rejected() {
        assert_rejects(
            "fun outer() { var a = a; }",
            "Can't read local variable in its own initializer.",
        );
    }

    #[test]
    fn test_that_redeclaration_in_local_scope_is_rejected() {
        assert_rejects(
            "fun outer() { var a = 1; var a = 2; }",
            "Already a variable with this name in this scope.",
        );
        // Globals may be redefined freely.
        let (_, result) = resolve_source("var a = 1; var a = 2;");
        assert!(result.is_ok());
    }

    #[test]
    fn test_that_this_outside_a_class_is_rejected() {
        assert_rejects("print this;", "Can't use 'this' outside of a class.");
        assert_rejects(
            "fun alone() { return this; }",
            "Can't use 'this' outside of a class.",
        );
    }

    #[test]
    fn test_that_super_requires_a_subclass() {
        assert_rejects(
            "class A { speak() { super.speak(); } }",
            "Can't use 'super' in a class with no superclass.",
        );
        assert_rejects("print super.x;", "Can't use 'super' outside of a class.");
    }

    #[test]
    fn test_that_a_class_cannot_inherit_from_itself() {
        assert_rejects("class A < A {}", "A class can't inherit from itself.");
    }

    #[test]
    fn test_that_local_references_get_scope_distances() {
        let source = "fun outer() { var a = 1; fun inner() { print a; } }";
        let (interpreter, result) = resolve_source(source);
        assert!(result.is_ok());

        let (tokens, _) = Scanner::new(source, 0).scan_tokens();
        // Identical ids come out of an identical scan, so the reference to
        // `a` inside `inner` is the last identifier token named "a".
        let read_of_a = tokens
            .iter()
            .rev()
            .find(|token| token.lexeme == "a")
            .unwrap();
        // `print a;` sits one parameter scope and one body scope away from
        // the frame `a` was declared in.
        assert_eq!(
            interpreter.as_ref().borrow().resolved_depth(read_of_a.id),
            Some(1)
        );
    }

    #[test]
    fn test_that_global_references_stay_unresolved() {
        let source = "var a = 1; fun show() { print a; }";
        let (interpreter, result) = resolve_source(source);
        assert!(result.is_ok());

        let (tokens, _) = Scanner::new(source, 0).scan_tokens();
        let read_of_a = tokens
            .iter()
            .rev()
            .find(|token| token.lexeme == "a")
            .unwrap();
        assert_eq!(interpreter.as_ref().borrow().resolved_depth(read_of_a.id), None);
    }
}
