use crate::callable::Callable;
use crate::class::{LoxClass, CONSTRUCTOR_KEYWORD, SUPER_KEYWORD, THIS_KEYWORD};
use crate::environment::Environment;
use crate::error::{RuntimeError, RuntimeErrorKind};
use crate::expression::{self, Expression, LiteralExpression};
use crate::function::{FunctionDecl, LoxFunction};
use crate::object::Object;
use crate::statement::{self, Statement};
use crate::token::Token;
use crate::token_type::{
    ExpressionOperatorTokenType, KeywordTokenType, SingleCharTokenType, TokenType,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;
use std::result;

/// How a statement finished: fell through, unwound a `return` towards
/// the active call, or unwound a `break` towards the innermost loop.
pub enum Completion {
    Normal,
    Return(Object),
    Break,
}

type StmtInterpretResult = Result<Completion, RuntimeError>;
type ExprInterpretResult = Result<Object, RuntimeError>;

pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    pub environment: Rc<RefCell<Environment>>,
    locals: HashMap<usize, usize>,
    output: Rc<RefCell<dyn Write>>,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter::with_output(Rc::new(RefCell::new(io::stdout())))
    }

    pub fn with_output(output: Rc<RefCell<dyn Write>>) -> Self {
        let globals = Rc::new(RefCell::new(Interpreter::make_globals()));
        Self {
            globals: globals.clone(),
            environment: globals,
            locals: HashMap::new(),
            output,
        }
    }

    fn make_globals() -> Environment {
        let mut environment = Environment::new();
        environment.define("clock".to_string(), Object::make_clock_fn());
        environment
    }

    /// Executes statements in order; the first runtime error aborts the
    /// rest of the program.
    pub fn interpret(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
        for statement in statements {
            statement.accept(self)?;
        }
        Ok(())
    }

    /// Records the scope distance the resolver computed for the
    /// expression identified by `token_id`. References without an entry
    /// are globals.
    pub fn resolve(&mut self, token_id: usize, depth: usize) {
        self.locals.insert(token_id, depth);
    }

    pub fn resolved_depth(&self, token_id: usize) -> Option<usize> {
        self.locals.get(&token_id).copied()
    }

    pub fn execute_block(
        &mut self,
        statements: &[Statement],
        environment: Rc<RefCell<Environment>>,
    ) -> StmtInterpretResult {
        let previous = std::mem::replace(&mut self.environment, environment);
        for statement in statements {
            match statement.accept(self) {
                Ok(Completion::Normal) => {}
                completion => {
                    // Errors, `return` and `break` all leave through here.
                    self.environment = previous;
                    return completion;
                }
            }
        }
        self.environment = previous;
        Ok(Completion::Normal)
    }

    fn look_up_variable(&self, name: &Token) -> ExprInterpretResult {
        let result = match self.locals.get(&name.id) {
            Some(distance) => self
                .environment
                .as_ref()
                .borrow()
                .get_at_distance(*distance, &name.lexeme),
            None => self.globals.as_ref().borrow().get(&name.lexeme),
        };
        result.map_err(|kind| RuntimeError::new(name, kind))
    }
}

impl statement::Visitor<StmtInterpretResult> for Interpreter {
    fn visit_expression(&mut self, expression: &Expression) -> StmtInterpretResult {
        expression.accept(self).map(|_| Completion::Normal)
    }

    fn visit_print(&mut self, expression: &Expression) -> StmtInterpretResult {
        let object = expression.accept(self)?;
        let _ = writeln!(self.output.borrow_mut(), "{}", object);
        Ok(Completion::Normal)
    }

    fn visit_variable_stmt(
        &mut self,
        name: &Token,
        initializer: &Option<Expression>,
    ) -> StmtInterpretResult {
        let object = match initializer {
            Some(expression) => expression.accept(self)?,
            None => Object::Nil,
        };
        self.environment
            .as_ref()
            .borrow_mut()
            .define(name.lexeme.clone(), object);
        Ok(Completion::Normal)
    }

    fn visit_block(&mut self, statements: &[Statement]) -> StmtInterpretResult {
        let environment = Environment::from(self.environment.clone());
        self.execute_block(statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if(
        &mut self,
        condition: &Expression,
        then_branch: &Statement,
        else_branch: &Option<Box<Statement>>,
    ) -> StmtInterpretResult {
        if condition.accept(self)?.is_truthy() {
            then_branch.accept(self)
        } else {
            else_branch
                .as_ref()
                .map(|statement| statement.as_ref().accept(self))
                .unwrap_or(Ok(Completion::Normal))
        }
    }

    fn visit_while(&mut self, condition: &Expression, body: &Statement) -> StmtInterpretResult {
        loop {
            if !condition.accept(self)?.is_truthy() {
                return Ok(Completion::Normal);
            }
            match body.accept(self)? {
                Completion::Normal => {}
                Completion::Break => return Ok(Completion::Normal),
                Completion::Return(value) => return Ok(Completion::Return(value)),
            }
        }
    }

    fn visit_break(&mut self, _keyword: &Token) -> StmtInterpretResult {
        Ok(Completion::Break)
    }

    fn visit_function(&mut self, declaration: &Rc<FunctionDecl>) -> StmtInterpretResult {
        let function = LoxFunction {
            declaration: declaration.clone(),
            closure: self.environment.clone(),
            is_initializer: false,
        };
        self.environment.as_ref().borrow_mut().define(
            declaration.name.lexeme.clone(),
            Object::Callable(Callable::Function(function)),
        );
        Ok(Completion::Normal)
    }

    fn visit_return(
        &mut self,
        _keyword: &Token,
        value: &Option<Expression>,
    ) -> StmtInterpretResult {
        let object = match value {
            Some(expression) => expression.accept(self)?,
            None => Object::Nil,
        };
        Ok(Completion::Return(object))
    }

    fn visit_class(
        &mut self,
        name: &Token,
        superclass: &Option<Token>,
        methods: &[Rc<FunctionDecl>],
    ) -> StmtInterpretResult {
        self.environment
            .as_ref()
            .borrow_mut()
            .define(name.lexeme.clone(), Object::Nil);

        let superclass = match superclass {
            Some(token) => Some(self.evaluate_superclass(token)?),
            None => None,
        };

        // Methods close over an extra frame holding `super` when there is
        // a superclass; otherwise directly over the surrounding scope.
        let methods_environment = match &superclass {
            Some(class) => {
                let mut environment = Environment::from(self.environment.clone());
                environment.define(
                    SUPER_KEYWORD.to_string(),
                    Object::Callable(Callable::Class(class.clone())),
                );
                Rc::new(RefCell::new(environment))
            }
            None => self.environment.clone(),
        };

        let methods = methods.iter().fold(HashMap::new(), |mut map, declaration| {
            let function = LoxFunction {
                declaration: declaration.clone(),
                closure: methods_environment.clone(),
                is_initializer: declaration.name.lexeme == CONSTRUCTOR_KEYWORD,
            };
            map.insert(declaration.name.lexeme.clone(), function);
            map
        });

        let class = LoxClass {
            name: name.lexeme.clone(),
            superclass,
            methods,
        };
        self.environment
            .as_ref()
            .borrow_mut()
            .assign(&name.lexeme, Object::Callable(Callable::Class(Rc::new(class))))
            .map_err(|kind| RuntimeError::new(name, kind))?;
        Ok(Completion::Normal)
    }
}

impl expression::Visitor<ExprInterpretResult> for Interpreter {
    fn visit_literal(&mut self, literal: &LiteralExpression) -> ExprInterpretResult {
        let object = match literal {
            LiteralExpression::Nil => Object::Nil,
            LiteralExpression::True => Object::Boolean(true),
            LiteralExpression::False => Object::Boolean(false),
            LiteralExpression::Number(number) => Object::Number(*number),
            LiteralExpression::String(string) => Object::String(string.clone()),
        };
        Ok(object)
    }

    fn visit_unary(&mut self, operator: &Token, right: &Expression) -> ExprInterpretResult {
        let right = right.accept(self)?;
        match (&operator.token_type, right) {
            (&TokenType::SingleChar(SingleCharTokenType::Minus), Object::Number(number)) => {
                Ok(Object::Number(-number))
            }
            (&TokenType::ExpressionOperator(ExpressionOperatorTokenType::Not), object) => {
                Ok(Object::Boolean(!object.is_truthy()))
            }
            _ => Err(RuntimeError::new(
                operator,
                RuntimeErrorKind::TypeMismatch("Operand must be a number."),
            )),
        }
    }

    fn visit_binary(
        &mut self,
        left: &Expression,
        operator: &Token,
        right: &Expression,
    ) -> ExprInterpretResult {
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        let result = match &operator.token_type {
            TokenType::SingleChar(token_type) => {
                Interpreter::apply_arithmetic_operator(token_type, &left, &right)
            }
            TokenType::ExpressionOperator(token_type) => {
                Interpreter::apply_comparison_operator(token_type, &left, &right)
            }
            _ => Err(RuntimeErrorKind::TypeMismatch("Unexpected operator.")),
        };
        result.map_err(|kind| RuntimeError::new(operator, kind))
    }

    fn visit_logical(
        &mut self,
        left: &Expression,
        operator: &Token,
        right: &Expression,
    ) -> ExprInterpretResult {
        let left = left.accept(self)?;
        match operator.token_type {
            TokenType::Keyword(KeywordTokenType::Or) if left.is_truthy() => Ok(left),
            TokenType::Keyword(KeywordTokenType::And) if !left.is_truthy() => Ok(left),
            _ => right.accept(self),
        }
    }

    fn visit_grouping(&mut self, expression: &Expression) -> ExprInterpretResult {
        expression.accept(self)
    }

    fn visit_variable(&mut self, name: &Token) -> ExprInterpretResult {
        self.look_up_variable(name)
    }

    fn visit_assignment(&mut self, name: &Token, value: &Expression) -> ExprInterpretResult {
        let object = value.accept(self)?;
        let result = match self.locals.get(&name.id) {
            Some(distance) => self.environment.as_ref().borrow_mut().assign_at_distance(
                *distance,
                &name.lexeme,
                object.clone(),
            ),
            None => self
                .globals
                .as_ref()
                .borrow_mut()
                .assign(&name.lexeme, object.clone()),
        };
        result
            .map(|()| object)
            .map_err(|kind| RuntimeError::new(name, kind))
    }

    fn visit_call(
        &mut self,
        callee: &Expression,
        close_paren: &Token,
        arguments: &[Expression],
    ) -> ExprInterpretResult {
        let callee = callee.accept(self)?;
        let mut evaluated_arguments = Vec::with_capacity(arguments.len());
        for argument in arguments {
            evaluated_arguments.push(argument.accept(self)?);
        }

        let callable = match callee {
            Object::Callable(callable) => callable,
            _ => return Err(RuntimeError::new(close_paren, RuntimeErrorKind::NotCallable)),
        };
        let arity = callable.arity();
        if arity != evaluated_arguments.len() {
            return Err(RuntimeError::new(
                close_paren,
                RuntimeErrorKind::ArityMismatch {
                    expected: arity,
                    found: evaluated_arguments.len(),
                },
            ));
        }
        callable.call(self, &evaluated_arguments)
    }

    fn visit_get(&mut self, object: &Expression, name: &Token) -> ExprInterpretResult {
        match object.accept(self)? {
            Object::Instance(instance) => instance.as_ref().borrow().get(name, instance.clone()),
            _ => Err(RuntimeError::new(
                name,
                RuntimeErrorKind::FieldAccessOnNonInstance,
            )),
        }
    }

    fn visit_set(
        &mut self,
        object: &Expression,
        name: &Token,
        value: &Expression,
    ) -> ExprInterpretResult {
        let object = object.accept(self)?;
        if let Object::Instance(instance) = object {
            let value = value.accept(self)?;
            instance.as_ref().borrow_mut().set(name, value.clone());
            Ok(value)
        } else {
            Err(RuntimeError::new(
                name,
                RuntimeErrorKind::FieldAccessOnNonInstance,
            ))
        }
    }

    fn visit_this(&mut self, keyword: &Token) -> ExprInterpretResult {
        self.look_up_variable(keyword)
    }

    fn visit_super(&mut self, keyword: &Token, method: &Token) -> ExprInterpretResult {
        let distance = match self.locals.get(&keyword.id) {
            Some(distance) => *distance,
            None => {
                let kind = RuntimeErrorKind::UndefinedVariable(SUPER_KEYWORD.to_string());
                return Err(RuntimeError::new(keyword, kind));
            }
        };
        let superclass = self
            .environment
            .as_ref()
            .borrow()
            .get_at_distance(distance, SUPER_KEYWORD)
            .map_err(|kind| RuntimeError::new(keyword, kind))?;
        let instance = self
            .environment
            .as_ref()
            .borrow()
            .get_at_distance(distance - 1, THIS_KEYWORD)
            .map_err(|kind| RuntimeError::new(keyword, kind))?;

        let bound = match (superclass, instance) {
            (Object::Callable(Callable::Class(class)), Object::Instance(instance)) => class
                .find_method(&method.lexeme)
                .map(|function| function.bind(instance.clone())),
            _ => None,
        };
        bound
            .map(|function| Object::Callable(Callable::Function(function)))
            .ok_or_else(|| {
                RuntimeError::new(
                    method,
                    RuntimeErrorKind::UndefinedProperty(method.lexeme.clone()),
                )
            })
    }
}

impl Interpreter {
    fn apply_arithmetic_operator(
        token_type: &SingleCharTokenType,
        left: &Object,
        right: &Object,
    ) -> result::Result<Object, RuntimeErrorKind> {
        match (token_type, left, right) {
            (SingleCharTokenType::Minus, Object::Number(left), Object::Number(right)) => {
                Ok(Object::Number(left - right))
            }
            (SingleCharTokenType::Slash, Object::Number(left), Object::Number(right)) => {
                if *right == 0f64 {
                    Err(RuntimeErrorKind::DivisionByZero)
                } else {
                    Ok(Object::Number(left / right))
                }
            }
            (SingleCharTokenType::Star, Object::Number(left), Object::Number(right)) => {
                Ok(Object::Number(left * right))
            }
            (SingleCharTokenType::Plus, Object::Number(left), Object::Number(right)) => {
                Ok(Object::Number(left + right))
            }
            (SingleCharTokenType::Plus, Object::String(left), Object::String(right)) => {
                Ok(Object::String(format!("{}{}", left, right)))
            }
            (SingleCharTokenType::Plus, Object::String(left), Object::Number(right)) => {
                Ok(Object::String(format!("{}{}", left, Object::Number(*right))))
            }
            (SingleCharTokenType::Plus, _, _) => Err(RuntimeErrorKind::TypeMismatch(
                "Operands must be two numbers or two strings.",
            )),
            _ => Err(RuntimeErrorKind::TypeMismatch("Operands must be numbers.")),
        }
    }

    fn apply_comparison_operator(
        token_type: &ExpressionOperatorTokenType,
        left: &Object,
        right: &Object,
    ) -> result::Result<Object, RuntimeErrorKind> {
        match (token_type, left, right) {
            (ExpressionOperatorTokenType::Greater, Object::Number(left), Object::Number(right)) => {
                Ok(Object::Boolean(left > right))
            }
            (
                ExpressionOperatorTokenType::GreaterEqual,
                Object::Number(left),
                Object::Number(right),
            ) => Ok(Object::Boolean(left >= right)),
            (ExpressionOperatorTokenType::Less, Object::Number(left), Object::Number(right)) => {
                Ok(Object::Boolean(left < right))
            }
            (
                ExpressionOperatorTokenType::LessEqual,
                Object::Number(left),
                Object::Number(right),
            ) => Ok(Object::Boolean(left <= right)),
            (ExpressionOperatorTokenType::EqualEqual, left, right) => {
                Ok(Object::Boolean(left.is_equal(right)))
            }
            (ExpressionOperatorTokenType::NotEqual, left, right) => {
                Ok(Object::Boolean(!left.is_equal(right)))
            }
            _ => Err(RuntimeErrorKind::TypeMismatch("Operands must be numbers.")),
        }
    }

    fn evaluate_superclass(&mut self, token: &Token) -> Result<Rc<LoxClass>, RuntimeError> {
        match self.look_up_variable(token)? {
            Object::Callable(Callable::Class(class)) => Ok(class),
            _ => Err(RuntimeError::new(token, RuntimeErrorKind::SuperclassNotClass)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::resolver::Resolver;
    use crate::scanner::Scanner;

    fn run_source(source: &str) -> (String, Result<(), RuntimeError>) {
        let output = Rc::new(RefCell::new(Vec::<u8>::new()));
        let (tokens, scan_errors) = Scanner::new(source, 0).scan_tokens();
        assert!(scan_errors.is_empty(), "source should scan cleanly");
        let statements = Parser::new(&tokens).parse().expect("source should parse");

        let interpreter = Rc::new(RefCell::new(Interpreter::with_output(output.clone())));
        Resolver::new(interpreter.clone())
            .resolve_statements(&statements)
            .expect("source should resolve");
        let result = interpreter.as_ref().borrow_mut().interpret(&statements);

        let printed = String::from_utf8(output.as_ref().borrow().clone()).unwrap();
        (printed, result)
    }

    fn assert_prints(source: &str, expected: &str) {
        let (printed, result) = run_source(source);
        assert!(result.is_ok(), "unexpected runtime error: {:?}", result);
        assert_eq!(printed, expected);
    }

    fn assert_fails(source: &str, expected_kind: RuntimeErrorKind) {
        let (_, result) = run_source(source);
        match result {
            Err(error) => assert_eq!(error.kind, expected_kind),
            Ok(()) => panic!("expected runtime error {:?}", expected_kind),
        }
    }

    #[test]
    fn test_that_closure_counter_increments_captured_variable() {
        assert_prints(
            "fun makeCounter() { var i = 0; fun c() { i = i + 1; print i; } return c; } \
             var c = makeCounter(); c(); c();",
            "1\n2\n",
        );
    }

    #[test]
    fn test_that_super_calls_the_superclass_method() {
        assert_prints(
            "class A { speak() { print \"A\"; } } \
             class B < A { speak() { super.speak(); print \"B\"; } } \
             B().speak();",
            "A\nB\n",
        );
    }

    #[test]
    fn test_that_super_skips_the_dispatching_class() {
        // `this` is a C, but `super` inside B must start at A.
        assert_prints(
            "class A { name() { print \"A\"; } } \
             class B < A { name() { print \"B\"; } parent() { super.name(); } } \
             class C < B { name() { print \"C\"; } } \
             C().parent();",
            "A\n",
        );
    }

    #[test]
    fn test_that_initializer_stores_constructor_arguments() {
        assert_prints("class P { init(x) { this.x = x; } } var p = P(7); print p.x;", "7\n");
    }

    #[test]
    fn test_that_direct_initializer_call_returns_the_instance() {
        assert_prints(
            "class P { init(x) { this.x = x; } } var p = P(7); print p.init(9) == p;",
            "true\n",
        );
    }

    #[test]
    fn test_that_bare_return_in_initializer_yields_the_instance() {
        assert_prints(
            "class P { init() { this.x = 1; return; this.x = 2; } } print P().x;",
            "1\n",
        );
    }

    #[test]
    fn test_that_division_by_zero_fails_without_printing() {
        let (printed, result) = run_source("print 1 / 0;");
        assert_eq!(printed, "");
        assert_eq!(result.unwrap_err().kind, RuntimeErrorKind::DivisionByZero);
    }

    #[test]
    fn test_that_string_number_concatenation_uses_integer_form() {
        assert_prints("print \"n=\" + 3;", "n=3\n");
        assert_prints("print \"n=\" + 3.5;", "n=3.5\n");
    }

    #[test]
    fn test_that_break_exits_only_the_innermost_loop() {
        assert_prints(
            "var i = 0; \
             while (i < 3) { \
                 var j = 0; \
                 while (j < 3) { if (j == 1) break; j = j + 1; } \
                 i = i + 1; \
             } \
             print i;",
            "3\n",
        );
    }

    #[test]
    fn test_that_return_unwinds_through_nested_loops() {
        assert_prints(
            "fun first() { while (true) { while (true) { return 42; } } } print first();",
            "42\n",
        );
    }

    #[test]
    fn test_that_block_writes_to_outer_variables_persist() {
        assert_prints("var a = 1; { a = 2; var b = 3; } print a;", "2\n");
    }

    #[test]
    fn test_that_block_locals_do_not_leak_outside() {
        assert_fails(
            "{ var b = 3; } print b;",
            RuntimeErrorKind::UndefinedVariable("b".to_string()),
        );
    }

    #[test]
    fn test_that_closures_capture_the_declaration_scope() {
        // The classic shadowing probe: the closure keeps seeing the
        // binding that existed where it was declared.
        assert_prints(
            "var a = \"global\"; \
             { \
                 fun show() { print a; } \
                 show(); \
                 var a = \"block\"; \
                 show(); \
             }",
            "global\nglobal\n",
        );
    }

    #[test]
    fn test_that_logical_operators_short_circuit() {
        assert_prints(
            "var a = 1; \
             fun touch() { a = 2; return true; } \
             var unused = false and touch(); \
             print a; \
             var also_unused = true or touch(); \
             print a;",
            "1\n1\n",
        );
    }

    #[test]
    fn test_that_for_loop_desugars_and_runs() {
        assert_prints("for (var i = 0; i < 3; i = i + 1) print i;", "0\n1\n2\n");
    }

    #[test]
    fn test_that_fields_shadow_methods() {
        assert_prints(
            "class Box { label() { return \"method\"; } } \
             var box = Box(); \
             box.label = \"field\"; \
             print box.label;",
            "field\n",
        );
    }

    #[test]
    fn test_that_methods_dispatch_on_this() {
        assert_prints(
            "class Speaker { say() { print this.word; } } \
             var s = Speaker(); \
             s.word = \"hi\"; \
             var say = s.say; \
             say();",
            "hi\n",
        );
    }

    #[test]
    fn test_that_comparisons_require_numbers() {
        assert_fails(
            "print \"a\" < 3;",
            RuntimeErrorKind::TypeMismatch("Operands must be numbers."),
        );
    }

    #[test]
    fn test_that_plus_rejects_number_then_string() {
        assert_fails(
            "print 3 + \"n\";",
            RuntimeErrorKind::TypeMismatch("Operands must be two numbers or two strings."),
        );
    }

    #[test]
    fn test_that_equality_never_fails_across_types() {
        assert_prints("print 1 == \"1\"; print nil == nil; print nil != false;", "false\ntrue\ntrue\n");
    }

    #[test]
    fn test_that_calling_a_non_callable_fails() {
        assert_fails("var x = 1; x();", RuntimeErrorKind::NotCallable);
    }

    #[test]
    fn test_that_arity_is_checked_before_the_call() {
        assert_fails(
            "fun pair(a, b) {} pair(1);",
            RuntimeErrorKind::ArityMismatch {
                expected: 2,
                found: 1,
            },
        );
    }

    #[test]
    fn test_that_missing_property_fails() {
        assert_fails(
            "class Empty {} Empty().missing;",
            RuntimeErrorKind::UndefinedProperty("missing".to_string()),
        );
    }

    #[test]
    fn test_that_property_access_on_primitive_fails() {
        assert_fails("var x = 1; x.field;", RuntimeErrorKind::FieldAccessOnNonInstance);
        assert_fails("var x = 1; x.field = 2;", RuntimeErrorKind::FieldAccessOnNonInstance);
    }

    #[test]
    fn test_that_superclass_expression_must_be_a_class() {
        assert_fails("var NotClass = 1; class Sub < NotClass {}", RuntimeErrorKind::SuperclassNotClass);
    }

    #[test]
    fn test_that_undefined_variable_read_fails() {
        assert_fails(
            "print missing;",
            RuntimeErrorKind::UndefinedVariable("missing".to_string()),
        );
    }

    #[test]
    fn test_that_runtime_error_halts_following_statements() {
        let (printed, result) = run_source("print 1; print missing; print 2;");
        assert_eq!(printed, "1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_that_assignment_evaluates_to_the_assigned_value() {
        assert_prints("var a = 1; print a = 5;", "5\n");
    }

    #[test]
    fn test_that_uninitialized_variables_default_to_nil() {
        assert_prints("var a; print a;", "nil\n");
    }

    #[test]
    fn test_that_functions_print_their_name() {
        assert_prints("fun greet() {} print greet;", "<fn greet>\n");
        assert_prints("class Thing {} print Thing; print Thing();", "Thing\nThing instance\n");
    }

    #[test]
    fn test_that_clock_returns_a_positive_number_of_seconds() {
        assert_prints("print clock() > 0;", "true\n");
    }

    #[test]
    fn test_that_inherited_methods_are_found_through_the_chain() {
        assert_prints(
            "class A { ping() { return \"pong\"; } } \
             class B < A {} \
             class C < B {} \
             print C().ping();",
            "pong\n",
        );
    }

    #[test]
    fn test_that_initializer_arity_is_inherited() {
        assert_fails(
            "class A { init(x) { this.x = x; } } class B < A {} B();",
            RuntimeErrorKind::ArityMismatch {
                expected: 1,
                found: 0,
            },
        );
    }
}
