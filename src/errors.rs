// Copyright 2024-2025 Irreducible Inc.

use thiserror::Error;

// use this instead of eprintln! for failures of the reporting machinery itself
macro_rules! err_msg {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
        assert!(cfg!(not(feature = "panic")))
    }};
}

pub(crate) use err_msg;

/// Reasons a variable list could not be parsed.
///
/// The dispatcher reacts to every variant the same way (it prints the raw
/// variable list instead of values), the variant only refines the note.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("type annotation `{text}...` is longer than {max} characters")]
    TypeTextTooLong { text: String, max: usize },
    #[error("unknown type `{0}`")]
    UnknownType(String),
    #[error("type annotation starting at byte {0} is never closed")]
    UnterminatedType(usize),
    #[error("variable `{0}` has no type annotation")]
    MissingType(String),
    #[error("type annotation `{0}` is not followed by a name")]
    MissingName(String),
}
