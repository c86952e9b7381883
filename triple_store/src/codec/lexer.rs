//! Tokenizer for the N3 subset the contact file uses.

use crate::error::{ParseError, ParseErrorKind};

/// A lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// `@prefix` or `PREFIX`.
    PrefixKeyword { sparql: bool },
    /// `<...>`
    Iri(String),
    /// `prefix:local`, either part may be empty.
    PrefixedName { prefix: String, local: String },
    /// `_:label`
    BlankLabel(String),
    /// `[]`
    Anonymous,
    /// String literal, escapes already resolved.
    Literal(String),
    /// `@lang` or `^^` after a literal.
    Annotation(String),
    /// A bare word such as `a`, `true` or a number.
    Bare(String),
    Dot,
    Semicolon,
    Comma,
}

impl Token {
    /// Short rendering for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::PrefixKeyword { sparql: false } => "`@prefix`".to_string(),
            Token::PrefixKeyword { sparql: true } => "`PREFIX`".to_string(),
            Token::Iri(iri) => format!("<{}>", iri),
            Token::PrefixedName { prefix, local } => format!("`{}:{}`", prefix, local),
            Token::BlankLabel(label) => format!("`_:{}`", label),
            Token::Anonymous => "`[]`".to_string(),
            Token::Literal(value) => format!("{:?}", value),
            Token::Annotation(a) => format!("`{}`", a),
            Token::Bare(word) => format!("`{}`", word),
            Token::Dot => "`.`".to_string(),
            Token::Semicolon => "`;`".to_string(),
            Token::Comma => "`,`".to_string(),
        }
    }
}

/// A token with the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub line: usize,
}

/// Split `source` into tokens, failing on the first lexical error.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Spanned>, ParseError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    tokens: Vec<Spanned>,
}

pub(crate) fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            tokens: Vec::new(),
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.line, kind)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn push(&mut self, token: Token, line: usize) {
        self.tokens.push(Spanned { token, line });
    }

    fn take_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(&c) = self.chars.peek() {
            if !is_name_char(c) {
                break;
            }
            name.push(c);
            self.bump();
        }
        name
    }

    fn run(mut self) -> Result<Vec<Spanned>, ParseError> {
        while let Some(&c) = self.chars.peek() {
            let line = self.line;
            match c {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '#' => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                '.' => {
                    self.bump();
                    self.push(Token::Dot, line);
                }
                ';' => {
                    self.bump();
                    self.push(Token::Semicolon, line);
                }
                ',' => {
                    self.bump();
                    self.push(Token::Comma, line);
                }
                '<' => {
                    self.bump();
                    let iri = self.iri()?;
                    self.push(Token::Iri(iri), line);
                }
                '"' | '\'' => {
                    self.bump();
                    let value = self.literal(c)?;
                    self.push(Token::Literal(value), line);
                }
                '[' => {
                    self.bump();
                    while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
                        self.bump();
                    }
                    match self.bump() {
                        Some(']') => self.push(Token::Anonymous, line),
                        Some(other) => return Err(self.error(ParseErrorKind::UnexpectedChar(other))),
                        None => return Err(self.error(ParseErrorKind::UnexpectedEnd("`]`"))),
                    }
                }
                '@' => {
                    self.bump();
                    let word = self.take_name();
                    if word == "prefix" {
                        self.push(Token::PrefixKeyword { sparql: false }, line);
                    } else {
                        self.push(Token::Annotation(format!("@{}", word)), line);
                    }
                }
                '^' => {
                    self.bump();
                    if self.bump() != Some('^') {
                        return Err(self.error(ParseErrorKind::UnexpectedChar('^')));
                    }
                    self.push(Token::Annotation("^^".to_string()), line);
                }
                '_' => {
                    self.bump();
                    if self.chars.peek() != Some(&':') {
                        return Err(self.error(ParseErrorKind::UnexpectedChar('_')));
                    }
                    self.bump();
                    let label = self.take_name();
                    if label.is_empty() {
                        return Err(self.error(ParseErrorKind::UnexpectedEnd("blank node label")));
                    }
                    self.push(Token::BlankLabel(label), line);
                }
                ':' => {
                    self.bump();
                    let local = self.take_name();
                    self.push(
                        Token::PrefixedName {
                            prefix: String::new(),
                            local,
                        },
                        line,
                    );
                }
                c if is_name_char(c) || c == '+' => {
                    let mut word = String::new();
                    if c == '+' {
                        word.push(c);
                        self.bump();
                    }
                    word.push_str(&self.take_name());
                    if self.chars.peek() == Some(&':') {
                        self.bump();
                        let local = self.take_name();
                        self.push(Token::PrefixedName { prefix: word, local }, line);
                    } else if word == "PREFIX" {
                        self.push(Token::PrefixKeyword { sparql: true }, line);
                    } else {
                        self.push(Token::Bare(word), line);
                    }
                }
                other => return Err(self.error(ParseErrorKind::UnexpectedChar(other))),
            }
        }
        Ok(self.tokens)
    }

    fn iri(&mut self) -> Result<String, ParseError> {
        let mut iri = String::new();
        loop {
            match self.bump() {
                Some('>') => return Ok(iri),
                Some(c) if c.is_whitespace() => {
                    return Err(self.error(ParseErrorKind::UnexpectedChar(c)));
                }
                Some(c) => iri.push(c),
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd("`>`"))),
            }
        }
    }

    fn literal(&mut self, quote: char) -> Result<String, ParseError> {
        let start = self.line;
        let unterminated = || ParseError::new(start, ParseErrorKind::UnterminatedLiteral);

        // `""` is either the empty literal or the start of a long literal.
        let long = if self.chars.peek() == Some(&quote) {
            self.bump();
            if self.chars.peek() == Some(&quote) {
                self.bump();
                true
            } else {
                return Ok(String::new());
            }
        } else {
            false
        };

        let mut value = String::new();
        loop {
            let c = self.bump().ok_or_else(unterminated)?;
            match c {
                '\\' => value.push(self.escape()?),
                '\n' if !long => return Err(unterminated()),
                c if c == quote && !long => return Ok(value),
                c if c == quote => {
                    if self.chars.peek() == Some(&quote) {
                        self.bump();
                        if self.chars.peek() == Some(&quote) {
                            self.bump();
                            // Quotes right before the closing delimiter belong to the value.
                            while self.chars.peek() == Some(&quote) {
                                value.push(quote);
                                self.bump();
                            }
                            return Ok(value);
                        }
                        value.push(quote);
                        value.push(quote);
                    } else {
                        value.push(quote);
                    }
                }
                c => value.push(c),
            }
        }
    }

    fn escape(&mut self) -> Result<char, ParseError> {
        let c = self
            .bump()
            .ok_or_else(|| self.error(ParseErrorKind::UnterminatedLiteral))?;
        let resolved = match c {
            't' => '\t',
            'b' => '\u{8}',
            'n' => '\n',
            'r' => '\r',
            'f' => '\u{c}',
            '"' => '"',
            '\'' => '\'',
            '\\' => '\\',
            'u' => self.code_point(4)?,
            'U' => self.code_point(8)?,
            other => return Err(self.error(ParseErrorKind::InvalidEscape(other.to_string()))),
        };
        Ok(resolved)
    }

    fn code_point(&mut self, digits: usize) -> Result<char, ParseError> {
        let mut hex = String::with_capacity(digits);
        for _ in 0..digits {
            match self.bump() {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                Some(c) => {
                    hex.push(c);
                    return Err(self.error(ParseErrorKind::InvalidEscape(format!("u{}", hex))));
                }
                None => return Err(self.error(ParseErrorKind::UnterminatedLiteral)),
            }
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(ParseErrorKind::InvalidEscape(format!("u{}", hex))))
    }
}
