use std::collections::VecDeque;

use thiserror::Error;

use crate::token::Token;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("Unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter { character: char, offset: usize },
    #[error("Tabs are not allowed in indentation at offset {offset}")]
    TabIndentation { offset: usize },
    #[error("Indentation of {spaces} spaces at offset {offset} is not a multiple of two")]
    OddIndentation { spaces: usize, offset: usize },
    #[error("Invalid number literal '{literal}' at offset {offset}")]
    InvalidNumberLiteral { literal: String, offset: usize },
    #[error("Unterminated string literal starting at offset {offset}")]
    UnterminatedString { offset: usize },
    #[error("Expected {expected:?}, got {got:?}")]
    UnexpectedToken { expected: Token, got: Token },
    #[error("Expected an identifier, got {got:?}")]
    ExpectedIdentifier { got: Token },
}

pub type LexResult<T> = Result<T, LexError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexerState {
    LineBegin,
    TokenStart,
}

/// Streaming tokenizer with one-token lookahead.
///
/// The first token is parsed eagerly on construction so `current` is always
/// defined. Indentation is measured in two-space units against a level
/// counter; level changes surface as runs of `Indent`/`Dedent` tokens queued
/// ahead of the line's content.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    level: usize,
    pending: VecDeque<Token>,
    state: LexerState,
    line_has_content: bool,
    current: Token,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> LexResult<Self> {
        let mut lexer = Self {
            source,
            pos: 0,
            level: 0,
            pending: VecDeque::new(),
            state: LexerState::LineBegin,
            line_has_content: false,
            current: Token::Eof,
        };
        lexer.current = lexer.scan_token()?;
        Ok(lexer)
    }

    /// Non-advancing peek at the current token.
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Advances and returns the new current token. Advancing past `Eof`
    /// keeps yielding `Eof`.
    pub fn next_token(&mut self) -> LexResult<&Token> {
        if self.current != Token::Eof {
            self.current = self.scan_token()?;
        }
        Ok(&self.current)
    }

    /// Fails unless the current token equals `expected`, payload included.
    pub fn expect(&self, expected: &Token) -> LexResult<&Token> {
        if &self.current == expected {
            Ok(&self.current)
        } else {
            Err(LexError::UnexpectedToken {
                expected: expected.clone(),
                got: self.current.clone(),
            })
        }
    }

    /// Advances, then fails unless the new current token equals `expected`.
    pub fn expect_next(&mut self, expected: &Token) -> LexResult<&Token> {
        self.next_token()?;
        self.expect(expected)
    }

    /// Fails unless the current token is an identifier; returns its name.
    pub fn expect_id(&self) -> LexResult<&str> {
        match &self.current {
            Token::Id(name) => Ok(name),
            other => Err(LexError::ExpectedIdentifier { got: other.clone() }),
        }
    }

    /// Advances, then fails unless the new current token is an identifier.
    pub fn expect_next_id(&mut self) -> LexResult<String> {
        self.next_token()?;
        self.expect_id().map(str::to_owned)
    }

    fn scan_token(&mut self) -> LexResult<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            match self.state {
                LexerState::LineBegin => self.begin_line()?,
                LexerState::TokenStart => {
                    if let Some(token) = self.read_token()? {
                        return Ok(token);
                    }
                }
            }
        }
    }

    // Skips blank and comment-only lines entirely, then queues the
    // Indent/Dedent run for the first content line, or the EOF sequence.
    fn begin_line(&mut self) -> LexResult<()> {
        loop {
            let line_start = self.pos;
            let spaces = self.consume_while(|c| c == ' ');
            match self.peek_char() {
                None => {
                    self.queue_eof();
                    return Ok(());
                }
                Some('\n') => {
                    self.consume_char();
                }
                Some('#') => {
                    self.skip_comment();
                }
                Some('\t') => {
                    return Err(LexError::TabIndentation { offset: self.pos });
                }
                Some(_) => {
                    if spaces % 2 != 0 {
                        return Err(LexError::OddIndentation {
                            spaces,
                            offset: line_start,
                        });
                    }
                    let new_level = spaces / 2;
                    while self.level < new_level {
                        self.level += 1;
                        self.pending.push_back(Token::Indent);
                    }
                    while self.level > new_level {
                        self.level -= 1;
                        self.pending.push_back(Token::Dedent);
                    }
                    self.state = LexerState::TokenStart;
                    return Ok(());
                }
            }
        }
    }

    fn read_token(&mut self) -> LexResult<Option<Token>> {
        self.consume_while(|c| c == ' ');
        let start = self.pos;
        let Some(ch) = self.peek_char() else {
            self.queue_eof();
            return Ok(None);
        };
        let token = match ch {
            '\n' => {
                self.consume_char();
                self.state = LexerState::LineBegin;
                self.line_has_content = false;
                return Ok(Some(Token::Newline));
            }
            '#' => {
                self.skip_comment();
                return Ok(None);
            }
            '=' | '!' | '<' | '>' => self.read_comparison(ch),
            '.' | ',' | '(' | ')' | '*' | '/' | '+' | '-' | ':' | ';' => {
                self.consume_char();
                Token::Char(ch)
            }
            '\'' | '"' => self.read_string(start)?,
            c if c.is_ascii_digit() => self.read_number(start)?,
            c if c.is_ascii_alphabetic() || c == '_' => self.read_identifier(start),
            other => {
                return Err(LexError::UnexpectedCharacter {
                    character: other,
                    offset: start,
                });
            }
        };
        self.line_has_content = true;
        Ok(Some(token))
    }

    // A compound comparison when '=' follows, otherwise the bare character.
    fn read_comparison(&mut self, first: char) -> Token {
        self.consume_char();
        if self.peek_char() == Some('=') {
            self.consume_char();
            match first {
                '=' => Token::Eq,
                '!' => Token::NotEq,
                '<' => Token::LessOrEq,
                _ => Token::GreaterOrEq,
            }
        } else {
            Token::Char(first)
        }
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        self.consume_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let ident = &self.source[start..self.pos];
        match ident {
            "class" => Token::Class,
            "return" => Token::Return,
            "if" => Token::If,
            "else" => Token::Else,
            "def" => Token::Def,
            "print" => Token::Print,
            "and" => Token::And,
            "or" => Token::Or,
            "not" => Token::Not,
            "None" => Token::None,
            "True" => Token::True,
            "False" => Token::False,
            _ => Token::Id(ident.to_owned()),
        }
    }

    fn read_number(&mut self, start: usize) -> LexResult<Token> {
        self.consume_while(|c| c.is_ascii_digit());
        // A digit run flowing directly into a name is malformed, not two
        // tokens.
        if let Some(c) = self.peek_char()
            && (c.is_ascii_alphabetic() || c == '_')
        {
            return Err(self.invalid_number(start));
        }
        let value = self.source[start..self.pos]
            .parse::<i64>()
            .map_err(|_| self.invalid_number(start))?;
        Ok(Token::Number(value))
    }

    fn invalid_number(&self, start: usize) -> LexError {
        LexError::InvalidNumberLiteral {
            literal: self.source[start..self.pos].to_owned(),
            offset: start,
        }
    }

    fn read_string(&mut self, start: usize) -> LexResult<Token> {
        let Some(delimiter) = self.consume_char() else {
            return Err(LexError::UnterminatedString { offset: start });
        };
        let mut text = String::new();
        loop {
            match self.peek_char() {
                None | Some('\n') => {
                    return Err(LexError::UnterminatedString { offset: start });
                }
                Some(c) if c == delimiter => {
                    self.consume_char();
                    return Ok(Token::String(text));
                }
                Some('\\') => {
                    self.consume_char();
                    let Some(escaped) = self.consume_char() else {
                        return Err(LexError::UnterminatedString { offset: start });
                    };
                    // \n and \t decode; any other escaped character carries
                    // through verbatim.
                    match escaped {
                        'n' => text.push('\n'),
                        't' => text.push('\t'),
                        other => text.push(other),
                    }
                }
                Some(c) => {
                    self.consume_char();
                    text.push(c);
                }
            }
        }
    }

    fn skip_comment(&mut self) {
        self.consume_while(|c| c != '\n');
    }

    // EOF protocol: synthesize a final Newline after trailing content,
    // close every open indent level, then yield Eof.
    fn queue_eof(&mut self) {
        if self.line_has_content {
            self.line_has_content = false;
            self.pending.push_back(Token::Newline);
        }
        while self.level > 0 {
            self.level -= 1;
            self.pending.push_back(Token::Dedent);
        }
        self.pending.push_back(Token::Eof);
    }

    fn consume_while<P>(&mut self, keep: P) -> usize
    where
        P: Fn(char) -> bool,
    {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if !keep(c) {
                break;
            }
            self.consume_char();
        }
        self.pos - start
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn consume_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }
}

/// Collects the whole token stream, `Eof` included.
pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    let mut lexer = Lexer::new(source)?;
    let mut tokens = vec![lexer.current().clone()];
    while tokens.last() != Some(&Token::Eof) {
        tokens.push(lexer.next_token()?.clone());
    }
    Ok(tokens)
}
