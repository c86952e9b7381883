//! Statement parser turning tokens into facts.

use std::collections::HashMap;

use super::lexer::{Spanned, Token};
use crate::entities::{Attribute, EntityId};
use crate::error::{ParseError, ParseErrorKind};
use crate::graph::Fact;

pub(crate) struct Parser<'a> {
    tokens: std::iter::Peekable<std::vec::IntoIter<Spanned>>,
    namespace: &'a str,
    prefixes: HashMap<String, String>,
    labels: HashMap<String, EntityId>,
    facts: Vec<Fact>,
    last_line: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: Vec<Spanned>, namespace: &'a str) -> Self {
        let last_line = tokens.last().map(|s| s.line).unwrap_or(1);
        Self {
            tokens: tokens.into_iter().peekable(),
            namespace,
            prefixes: HashMap::new(),
            labels: HashMap::new(),
            facts: Vec::new(),
            last_line,
        }
    }

    /// Parse every statement, keeping file order.
    pub(crate) fn parse(mut self) -> Result<Vec<Fact>, ParseError> {
        while let Some(spanned) = self.tokens.next() {
            match spanned.token {
                Token::PrefixKeyword { sparql } => self.prefix_directive(sparql)?,
                Token::BlankLabel(label) => {
                    let entity = self.entity_for(label);
                    self.predicate_object_list(entity)?;
                }
                Token::Anonymous => self.predicate_object_list(EntityId::new())?,
                Token::Iri(_) | Token::PrefixedName { .. } | Token::Literal(_) | Token::Bare(_) => {
                    return Err(ParseError::new(
                        spanned.line,
                        ParseErrorKind::UnknownTermType(spanned.token.describe(), "subject"),
                    ));
                }
                other => {
                    return Err(ParseError::new(
                        spanned.line,
                        ParseErrorKind::UnexpectedToken {
                            expected: "a statement",
                            found: other.describe(),
                        },
                    ));
                }
            }
        }
        Ok(self.facts)
    }

    fn next(&mut self, expected: &'static str) -> Result<Spanned, ParseError> {
        self.tokens
            .next()
            .ok_or_else(|| ParseError::new(self.last_line, ParseErrorKind::UnexpectedEnd(expected)))
    }

    fn expect_dot(&mut self) -> Result<(), ParseError> {
        let spanned = self.next("`.`")?;
        match spanned.token {
            Token::Dot => Ok(()),
            other => Err(unexpected(spanned.line, "`.`", &other)),
        }
    }

    fn entity_for(&mut self, label: String) -> EntityId {
        *self.labels.entry(label).or_default()
    }

    fn prefix_directive(&mut self, sparql: bool) -> Result<(), ParseError> {
        let spanned = self.next("a prefix name")?;
        let prefix = match spanned.token {
            Token::PrefixedName { prefix, local } if local.is_empty() => prefix,
            other => return Err(unexpected(spanned.line, "a prefix name", &other)),
        };
        let spanned = self.next("an IRI")?;
        let iri = match spanned.token {
            Token::Iri(iri) => iri,
            other => return Err(unexpected(spanned.line, "an IRI", &other)),
        };
        self.prefixes.insert(prefix, iri);
        if !sparql {
            self.expect_dot()?;
        }
        Ok(())
    }

    fn predicate_object_list(&mut self, entity: EntityId) -> Result<(), ParseError> {
        loop {
            let attribute = self.predicate()?;
            loop {
                let value = self.object()?;
                self.facts.push(Fact::new(entity, attribute.clone(), value));

                let spanned = self.next("`.`")?;
                match spanned.token {
                    Token::Comma => continue,
                    Token::Dot => return Ok(()),
                    Token::Semicolon => {
                        // A trailing `;` before the final `.` is allowed.
                        if matches!(self.tokens.peek(), Some(Spanned { token: Token::Dot, .. })) {
                            self.tokens.next();
                            return Ok(());
                        }
                        break;
                    }
                    other => return Err(unexpected(spanned.line, "`,`, `;` or `.`", &other)),
                }
            }
        }
    }

    fn predicate(&mut self) -> Result<Attribute, ParseError> {
        let spanned = self.next("a predicate")?;
        let iri = match spanned.token {
            Token::Iri(iri) => iri,
            Token::PrefixedName { prefix, local } => match self.prefixes.get(&prefix) {
                Some(base) => format!("{}{}", base, local),
                None => {
                    return Err(ParseError::new(
                        spanned.line,
                        ParseErrorKind::UndeclaredPrefix(prefix),
                    ))
                }
            },
            other => return Err(unexpected(spanned.line, "a predicate", &other)),
        };
        match iri.strip_prefix(self.namespace) {
            Some(local) if !local.is_empty() => Ok(Attribute::from_local_name(local)),
            _ => Err(ParseError::new(
                spanned.line,
                ParseErrorKind::ForeignPredicate(iri),
            )),
        }
    }

    fn object(&mut self) -> Result<String, ParseError> {
        let spanned = self.next("a literal")?;
        let value = match spanned.token {
            Token::Literal(value) => value,
            Token::Iri(_)
            | Token::PrefixedName { .. }
            | Token::BlankLabel(_)
            | Token::Anonymous
            | Token::Bare(_) => {
                return Err(ParseError::new(
                    spanned.line,
                    ParseErrorKind::UnknownTermType(spanned.token.describe(), "object"),
                ))
            }
            other => return Err(unexpected(spanned.line, "a literal", &other)),
        };
        if let Some(Spanned {
            token: Token::Annotation(annotation),
            line,
        }) = self.tokens.peek()
        {
            return Err(ParseError::new(
                *line,
                ParseErrorKind::UnknownTermType(annotation.clone(), "object"),
            ));
        }
        Ok(value)
    }
}

fn unexpected(line: usize, expected: &'static str, found: &Token) -> ParseError {
    ParseError::new(
        line,
        ParseErrorKind::UnexpectedToken {
            expected,
            found: found.describe(),
        },
    )
}
