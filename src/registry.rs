// Copyright 2024-2025 Irreducible Inc.

//! Fixed table of the types a variable list may declare.

use std::fmt;

/// Broad family of a type, used to decide whether a supplied value can be
/// printed under a declared descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Int,
    Char,
    Double,
    Float,
    LongInt,
    Pointer,
}

impl TypeKind {
    /// `float`/`double` and `int`/`long int` print the same way once widened.
    pub fn is_compatible_with(self, other: TypeKind) -> bool {
        use TypeKind::*;

        self == other
            || matches!(
                (self, other),
                (Double, Float) | (Float, Double) | (Int, LongInt) | (LongInt, Int)
            )
    }
}

/// One registry entry.
#[derive(Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub canonical_name: &'static str,
    /// printf-style single conversion this type is displayed with.
    pub display_format: &'static str,
    pub kind: TypeKind,
}

/// Canonical name every pointer annotation normalizes to.
pub const POINTER_NAME: &str = "void *";

static TYPES: [TypeDescriptor; 6] = [
    TypeDescriptor {
        canonical_name: "int",
        display_format: "%d",
        kind: TypeKind::Int,
    },
    TypeDescriptor {
        canonical_name: "char",
        display_format: "%c",
        kind: TypeKind::Char,
    },
    TypeDescriptor {
        canonical_name: "double",
        display_format: "%f",
        kind: TypeKind::Double,
    },
    TypeDescriptor {
        canonical_name: "float",
        display_format: "%f",
        kind: TypeKind::Float,
    },
    TypeDescriptor {
        canonical_name: "long int",
        display_format: "%ld",
        kind: TypeKind::LongInt,
    },
    TypeDescriptor {
        canonical_name: POINTER_NAME,
        display_format: "%p",
        kind: TypeKind::Pointer,
    },
];

/// Position of a descriptor in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeIndex(usize);

impl TypeIndex {
    pub fn descriptor(self) -> &'static TypeDescriptor {
        &TYPES[self.0]
    }
}

impl fmt::Display for TypeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().canonical_name)
    }
}

/// All registered descriptors, in table order.
pub fn descriptors() -> &'static [TypeDescriptor] {
    &TYPES
}

/// Exact, case-sensitive lookup of a canonical name.
pub fn resolve(canonical_name: &str) -> Option<TypeIndex> {
    TYPES
        .iter()
        .position(|descriptor| descriptor.canonical_name == canonical_name)
        .map(TypeIndex)
}

/// Trims trailing whitespace and collapses any text ending in `*` to the
/// pointer name, whatever base type precedes it.
pub fn normalize(type_text: &str) -> &str {
    let trimmed = type_text.trim_end();
    if trimmed.ends_with('*') {
        POINTER_NAME
    } else {
        trimmed
    }
}

/// [`normalize`] followed by [`resolve`].
pub fn resolve_annotation(type_text: &str) -> Option<TypeIndex> {
    resolve(normalize(type_text))
}
