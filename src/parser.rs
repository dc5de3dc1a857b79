// Copyright 2024-2025 Irreducible Inc.

//! Parser for variable lists of the form `(type) name, (type) name, ...`.
//!
//! The list is scanned once, left to right. Commas and whitespace separate
//! entries, `(` opens a type annotation that applies to the name following
//! its `)`, and anything else is part of a name. Names longer than the limit
//! are truncated while the scan keeps consuming up to the next separator, so
//! later entries stay aligned. Type annotations longer than the limit are an
//! error instead.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::errors::ParseError;
use crate::registry::{self, TypeIndex};

/// Default name buffer size, terminator slot included.
pub const MAX_NAME_LEN: usize = 101;
/// Default type annotation buffer size, terminator slot included.
pub const MAX_TYPE_LEN: usize = 51;

/// Buffer sizes used while parsing.
///
/// Both sizes count a terminator slot, so a name keeps at most
/// `max_name_len - 1` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_name_len: usize,
    pub max_type_len: usize,
}

impl Limits {
    fn name_capacity(&self) -> usize {
        self.max_name_len.saturating_sub(1)
    }

    fn type_capacity(&self) -> usize {
        self.max_type_len.saturating_sub(1)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_name_len: MAX_NAME_LEN,
            max_type_len: MAX_TYPE_LEN,
        }
    }
}

/// A declared variable recovered from the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVariable {
    pub name: String,
    pub type_index: TypeIndex,
    /// The name in the list was longer than the limit and has been cut.
    pub truncated: bool,
}

/// Parses `spec` with the default [`Limits`].
pub fn parse(spec: &str, declared_count: usize) -> Result<Vec<ParsedVariable>, ParseError> {
    Parser::new(Limits::default()).parse(spec, declared_count)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    limits: Limits,
}

/// Entry being assembled by the scan.
#[derive(Default)]
struct Entry {
    annotation: Option<(TypeIndex, String)>,
    name: String,
    name_len: usize,
    in_name: bool,
    truncated: bool,
}

impl Entry {
    fn push_name_char(&mut self, c: char, capacity: usize) {
        self.in_name = true;
        if self.name_len < capacity {
            self.name.push(c);
            self.name_len += 1;
        } else {
            self.truncated = true;
        }
    }

    fn finish(&mut self) -> Result<ParsedVariable, ParseError> {
        let entry = std::mem::take(self);
        let Some((type_index, _)) = entry.annotation else {
            return Err(ParseError::MissingType(entry.name));
        };

        if entry.truncated {
            tracing::debug!(name = %entry.name, "variable name truncated");
        }

        Ok(ParsedVariable {
            name: entry.name,
            type_index,
            truncated: entry.truncated,
        })
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

impl Parser {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// Recovers up to `declared_count` variables from `spec`.
    ///
    /// Entries past `declared_count` are ignored. A list with fewer entries
    /// than declared yields the entries it has.
    pub fn parse(
        &self,
        spec: &str,
        declared_count: usize,
    ) -> Result<Vec<ParsedVariable>, ParseError> {
        let mut chars = spec.char_indices().peekable();
        let mut parsed = Vec::with_capacity(declared_count);
        let mut entry = Entry::default();

        while parsed.len() < declared_count {
            let Some((offset, c)) = chars.next() else {
                break;
            };

            match c {
                '(' => {
                    if entry.in_name {
                        parsed.push(entry.finish()?);
                        if parsed.len() == declared_count {
                            break;
                        }
                    } else if let Some((_, text)) = entry.annotation.take() {
                        return Err(ParseError::MissingName(text));
                    }
                    entry.annotation = Some(self.read_type(&mut chars, offset)?);
                }
                c if is_separator(c) => {
                    if entry.in_name {
                        parsed.push(entry.finish()?);
                    }
                }
                c => entry.push_name_char(c, self.limits.name_capacity()),
            }
        }

        if parsed.len() < declared_count {
            if entry.in_name {
                parsed.push(entry.finish()?);
            } else if let Some((_, text)) = entry.annotation {
                return Err(ParseError::MissingName(text));
            }
        }

        if parsed.len() < declared_count {
            tracing::debug!(
                declared_count,
                found = parsed.len(),
                "variable list has fewer entries than declared"
            );
        }

        Ok(parsed)
    }

    /// Reads a type annotation whose `(` sits at `open` and has already been
    /// consumed, up to and including the closing `)`.
    fn read_type(
        &self,
        chars: &mut Peekable<CharIndices<'_>>,
        open: usize,
    ) -> Result<(TypeIndex, String), ParseError> {
        while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}

        let capacity = self.limits.type_capacity();
        let mut text = String::new();
        let mut len = 0;
        loop {
            match chars.next() {
                None => return Err(ParseError::UnterminatedType(open)),
                Some((_, ')')) => break,
                Some((_, c)) => {
                    if len == capacity {
                        tracing::debug!(text = %text, max = capacity, "type annotation too long");
                        return Err(ParseError::TypeTextTooLong {
                            text,
                            max: capacity,
                        });
                    }
                    text.push(c);
                    len += 1;
                }
            }
        }

        let normalized = registry::normalize(&text);
        let Some(type_index) = registry::resolve(normalized) else {
            tracing::debug!(text = %normalized, "unknown type annotation");
            return Err(ParseError::UnknownType(normalized.to_string()));
        };
        tracing::trace!(text = %text, resolved = %type_index, "resolved type annotation");

        let text = text.trim_end().to_string();
        Ok((type_index, text))
    }
}
