use crate::error::Error;
use crate::token::Token;
use crate::token_type::{
    Delimiter, ExpressionOperatorTokenType, KeywordTokenType, LiteralTokenType,
    SingleCharTokenType, TokenType,
};
use peekmore::{PeekMore, PeekMoreIterator};
use std::collections::HashMap;
use std::str::Chars;

pub struct ScanError {
    line: u32,
    message: &'static str,
}

impl Error for ScanError {
    fn message(&self) -> String {
        self.message.to_string()
    }

    fn line(&self) -> u32 {
        self.line
    }
}

pub struct Scanner<'a> {
    chars: PeekMoreIterator<Chars<'a>>,
    keywords: HashMap<&'static str, KeywordTokenType>,
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
    line: u32,
    next_id: usize,
}

impl<'a> Scanner<'a> {
    /// `first_id` is the id of the first produced token. A REPL session
    /// passes the id following the previous line's Eof token so that
    /// distances resolved for earlier lines stay valid.
    pub fn new(source: &'a str, first_id: usize) -> Scanner<'a> {
        Scanner {
            chars: source.chars().peekmore(),
            keywords: KeywordTokenType::make_keywords(),
            tokens: Vec::new(),
            errors: Vec::new(),
            line: 1,
            next_id: first_id,
        }
    }

    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<ScanError>) {
        while let Some(character) = self.chars.next() {
            self.scan_token(character);
        }
        self.push_token(TokenType::Eof, String::new());
        (self.tokens, self.errors)
    }

    fn scan_token(&mut self, character: char) {
        match character {
            '(' => self.push_single_char(TokenType::OpenDelimiter(Delimiter::Paren), character),
            ')' => self.push_single_char(TokenType::CloseDelimiter(Delimiter::Paren), character),
            '{' => self.push_single_char(TokenType::OpenDelimiter(Delimiter::Brace), character),
            '}' => self.push_single_char(TokenType::CloseDelimiter(Delimiter::Brace), character),
            ',' => self.push_single_char(
                TokenType::SingleChar(SingleCharTokenType::Comma),
                character,
            ),
            '.' => self.push_single_char(TokenType::SingleChar(SingleCharTokenType::Dot), character),
            '-' => self.push_single_char(
                TokenType::SingleChar(SingleCharTokenType::Minus),
                character,
            ),
            '+' => self.push_single_char(TokenType::SingleChar(SingleCharTokenType::Plus), character),
            ';' => self.push_single_char(
                TokenType::SingleChar(SingleCharTokenType::Semicolon),
                character,
            ),
            '*' => self.push_single_char(TokenType::SingleChar(SingleCharTokenType::Star), character),
            '!' => self.scan_operator(
                character,
                ExpressionOperatorTokenType::NotEqual,
                ExpressionOperatorTokenType::Not,
            ),
            '=' => self.scan_operator(
                character,
                ExpressionOperatorTokenType::EqualEqual,
                ExpressionOperatorTokenType::Equal,
            ),
            '<' => self.scan_operator(
                character,
                ExpressionOperatorTokenType::LessEqual,
                ExpressionOperatorTokenType::Less,
            ),
            '>' => self.scan_operator(
                character,
                ExpressionOperatorTokenType::GreaterEqual,
                ExpressionOperatorTokenType::Greater,
            ),
            '/' => self.scan_slash(character),
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.scan_string(),
            character if character.is_ascii_digit() => self.scan_number(character),
            character if character.is_alphabetic() || character == '_' => {
                self.scan_identifier(character)
            }
            _ => self.errors.push(ScanError {
                line: self.line,
                message: "Unexpected character.",
            }),
        }
    }

    /// Two-character operator when the next char is `=`, otherwise the
    /// single-character variant (maximal munch).
    fn scan_operator(
        &mut self,
        first_char: char,
        matched: ExpressionOperatorTokenType,
        single: ExpressionOperatorTokenType,
    ) {
        if self.chars.peek() == Some(&'=') {
            self.chars.next();
            self.push_token(
                TokenType::ExpressionOperator(matched),
                format!("{}=", first_char),
            );
        } else {
            self.push_token(
                TokenType::ExpressionOperator(single),
                first_char.to_string(),
            );
        }
    }

    fn scan_slash(&mut self, character: char) {
        if self.chars.peek() == Some(&'/') {
            // A comment runs to the end of the line; the newline itself is
            // left for the main loop so the line counter stays right.
            while let Some(next) = self.chars.peek() {
                if *next == '\n' {
                    break;
                }
                self.chars.next();
            }
        } else {
            self.push_single_char(TokenType::SingleChar(SingleCharTokenType::Slash), character);
        }
    }

    fn scan_string(&mut self) {
        let mut literal = String::new();
        let mut newline_count = 0u32;
        loop {
            match self.chars.next() {
                Some('"') => {
                    let lexeme = literal.clone();
                    self.push_token(TokenType::Literal(LiteralTokenType::String(literal)), lexeme);
                    self.line += newline_count;
                    return;
                }
                Some('\n') => {
                    newline_count += 1;
                    literal.push('\n');
                }
                Some(next) => literal.push(next),
                None => {
                    self.errors.push(ScanError {
                        line: self.line + newline_count,
                        message: "Unterminated string.",
                    });
                    return;
                }
            }
        }
    }

    fn scan_number(&mut self, first_digit: char) {
        let mut lexeme = String::new();
        lexeme.push(first_digit);
        self.consume_digits(&mut lexeme);

        // A '.' is part of the number only when a digit follows it, which
        // needs a second character of lookahead.
        if self.chars.peek() == Some(&'.') {
            self.chars.advance_cursor();
            let fraction_follows = self.chars.peek().map_or(false, |c| c.is_ascii_digit());
            self.chars.reset_cursor();
            if fraction_follows {
                self.chars.next();
                lexeme.push('.');
                self.consume_digits(&mut lexeme);
            }
        }

        let value: f64 = lexeme.parse().unwrap();
        self.push_token(TokenType::Literal(LiteralTokenType::Number(value)), lexeme);
    }

    fn consume_digits(&mut self, lexeme: &mut String) {
        while let Some(next) = self.chars.peek() {
            if next.is_ascii_digit() {
                lexeme.push(*next);
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self, first_char: char) {
        let mut lexeme = String::new();
        lexeme.push(first_char);
        while let Some(next) = self.chars.peek() {
            if next.is_alphanumeric() || *next == '_' {
                lexeme.push(*next);
                self.chars.next();
            } else {
                break;
            }
        }
        let token_type = match self.keywords.get(lexeme.as_str()) {
            Some(keyword) => TokenType::Keyword(*keyword),
            None => TokenType::Literal(LiteralTokenType::Identifier(lexeme.clone())),
        };
        self.push_token(token_type, lexeme);
    }

    fn push_single_char(&mut self, token_type: TokenType, lexeme: char) {
        self.push_token(token_type, lexeme.to_string());
    }

    fn push_token(&mut self, token_type: TokenType, lexeme: String) {
        let id = self.next_id;
        self.next_id += 1;
        self.tokens.push(Token::new(token_type, lexeme, self.line, id));
    }
}
