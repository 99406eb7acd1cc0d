//! Reader for the web `config.js` globals file
//!
//! Only the assignment subset the web pages use is accepted:
//!
//! ```js
//! window.FLEZ_BOT_SITE_URL = "https://app.example.com";
//! window.FLEZ_BOT_SIGNUP_URL = window.FLEZ_BOT_SITE_URL + "/signup.html";
//! ```
//!
//! Right-hand sides are `+`-concatenations of string literals and globals
//! assigned earlier in the file. Anything else is rejected with a line number.

use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

use super::RawSource;
use crate::config::Field;

/// Objects whose properties are treated as globals
const GLOBAL_OBJECTS: [&str; 3] = ["window", "globalThis", "self"];

/// Parse failure inside a script source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl ScriptError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Dot,
    Assign,
    Plus,
    Semi,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn tokenize(mut self) -> Result<Vec<(Token, usize)>, ScriptError> {
        let mut tokens = Vec::new();

        while let Some(&c) = self.chars.peek() {
            let line = self.line;
            match c {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '/' => {
                    self.bump();
                    match self.bump() {
                        Some('/') => {
                            while let Some(&n) = self.chars.peek() {
                                if n == '\n' {
                                    break;
                                }
                                self.bump();
                            }
                        }
                        Some('*') => self.skip_block_comment(line)?,
                        _ => return Err(ScriptError::new(line, "unexpected '/'")),
                    }
                }
                '"' | '\'' => {
                    self.bump();
                    let value = self.string_literal(c, line)?;
                    tokens.push((Token::Str(value), line));
                }
                '`' => {
                    return Err(ScriptError::new(line, "template literals are not supported"));
                }
                '.' => {
                    self.bump();
                    tokens.push((Token::Dot, line));
                }
                '=' => {
                    self.bump();
                    if self.chars.peek() == Some(&'=') {
                        return Err(ScriptError::new(line, "comparison operators are not supported"));
                    }
                    tokens.push((Token::Assign, line));
                }
                '+' => {
                    self.bump();
                    tokens.push((Token::Plus, line));
                }
                ';' => {
                    self.bump();
                    tokens.push((Token::Semi, line));
                }
                c if c == '_' || c == '$' || c.is_alphabetic() => {
                    let mut ident = String::new();
                    while let Some(&n) = self.chars.peek() {
                        if n == '_' || n == '$' || n.is_alphanumeric() {
                            ident.push(n);
                            self.bump();
                        } else {
                            break;
                        }
                    }
                    tokens.push((Token::Ident(ident), line));
                }
                other => {
                    return Err(ScriptError::new(line, format!("unexpected character '{}'", other)));
                }
            }
        }

        Ok(tokens)
    }

    fn skip_block_comment(&mut self, start: usize) -> Result<(), ScriptError> {
        let mut prev = '\0';
        while let Some(c) = self.bump() {
            if prev == '*' && c == '/' {
                return Ok(());
            }
            prev = c;
        }
        Err(ScriptError::new(start, "unterminated block comment"))
    }

    fn string_literal(&mut self, quote: char, start: usize) -> Result<String, ScriptError> {
        let mut value = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(ScriptError::new(start, "unterminated string literal"));
                }
                Some(c) if c == quote => return Ok(value),
                Some('\\') => {
                    let escaped = match self.bump() {
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('u') => self.unicode_escape(start)?,
                        Some(c @ ('\\' | '"' | '\'' | '/')) => c,
                        Some(c) => {
                            return Err(ScriptError::new(
                                self.line,
                                format!("unsupported escape '\\{}'", c),
                            ));
                        }
                        None => return Err(ScriptError::new(start, "unterminated string literal")),
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }
    }

    fn unicode_escape(&mut self, start: usize) -> Result<char, ScriptError> {
        let mut hex = String::with_capacity(4);
        for _ in 0..4 {
            match self.bump() {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                _ => return Err(ScriptError::new(start, "invalid \\u escape")),
            }
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| ScriptError::new(start, format!("invalid code point \\u{}", hex)))
    }
}

/// Globals assigned by a config script, in assignment order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptGlobals {
    entries: Vec<(String, String)>,
}

impl ScriptGlobals {
    pub fn parse(input: &str) -> Result<Self, ScriptError> {
        let tokens = Lexer::new(input).tokenize()?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            globals: ScriptGlobals::default(),
        };
        parser.program()?;
        Ok(parser.globals)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Input fields assigned by the script; other globals are dropped
    pub fn to_raw(&self) -> RawSource {
        RawSource::from_pairs(self.iter().filter(|(name, _)| Field::from_key(name).is_some()))
    }

    fn assign(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    globals: ScriptGlobals,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|(_, l)| *l)
            .unwrap_or(1)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<(), ScriptError> {
        let line = self.line();
        match self.advance() {
            Some(t) if t == expected => Ok(()),
            _ => Err(ScriptError::new(line, format!("expected {}", what))),
        }
    }

    fn ident(&mut self) -> Result<String, ScriptError> {
        let line = self.line();
        match self.advance() {
            Some(Token::Ident(name)) => Ok(name),
            _ => Err(ScriptError::new(line, "expected identifier")),
        }
    }

    fn program(&mut self) -> Result<(), ScriptError> {
        while let Some(token) = self.peek() {
            if *token == Token::Semi {
                self.pos += 1;
                continue;
            }
            self.statement()?;
        }
        Ok(())
    }

    fn statement(&mut self) -> Result<(), ScriptError> {
        let line = self.line();
        let object = self.ident()?;
        if !GLOBAL_OBJECTS.contains(&object.as_str()) {
            return Err(ScriptError::new(
                line,
                format!("expected assignment to window.<NAME>, found '{}'", object),
            ));
        }
        self.expect(Token::Dot, "'.'")?;
        let name = self.ident()?;
        self.expect(Token::Assign, "'='")?;

        let mut value = self.term()?;
        while self.peek() == Some(&Token::Plus) {
            self.pos += 1;
            value.push_str(&self.term()?);
        }

        if self.peek() == Some(&Token::Semi) {
            self.pos += 1;
        }

        self.globals.assign(name, value);
        Ok(())
    }

    fn term(&mut self) -> Result<String, ScriptError> {
        let line = self.line();
        match self.advance() {
            Some(Token::Str(value)) => Ok(value),
            Some(Token::Ident(first)) => {
                let name = if GLOBAL_OBJECTS.contains(&first.as_str())
                    && self.peek() == Some(&Token::Dot)
                {
                    self.pos += 1;
                    self.ident()?
                } else {
                    first
                };
                self.globals
                    .get(&name)
                    .map(str::to_string)
                    .ok_or_else(|| ScriptError::new(line, format!("'{}' is not defined", name)))
            }
            _ => Err(ScriptError::new(line, "expected string literal or global reference")),
        }
    }
}
