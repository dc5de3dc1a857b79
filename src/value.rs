// Copyright 2024-2025 Irreducible Inc.

use std::fmt::{self, Write};

use crate::registry::{TypeDescriptor, TypeKind};

/// A variable's value, tagged with the family it was taken from.
///
/// The tag travels with the value, so a declared type that disagrees with the
/// actual argument is noticed at report time instead of misreading memory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i32),
    Char(char),
    Double(f64),
    Float(f32),
    LongInt(i64),
    Pointer(usize),
}

impl Value {
    pub fn kind(&self) -> TypeKind {
        match self {
            Value::Int(_) => TypeKind::Int,
            Value::Char(_) => TypeKind::Char,
            Value::Double(_) => TypeKind::Double,
            Value::Float(_) => TypeKind::Float,
            Value::LongInt(_) => TypeKind::LongInt,
            Value::Pointer(_) => TypeKind::Pointer,
        }
    }

    /// Writes the value the way `descriptor.display_format` would print it.
    ///
    /// When the value's family is not compatible with the descriptor, the
    /// value is written under its own family instead.
    pub fn write_as<W: Write>(&self, out: &mut W, descriptor: &TypeDescriptor) -> fmt::Result {
        if !self.kind().is_compatible_with(descriptor.kind) {
            return write!(out, "{self}");
        }

        match (descriptor.kind, *self) {
            (TypeKind::Double | TypeKind::Float, Value::Double(v)) => write!(out, "{v:.6}"),
            (TypeKind::Double | TypeKind::Float, Value::Float(v)) => {
                write!(out, "{:.6}", f64::from(v))
            }
            // %d truncates a long to int
            (TypeKind::Int, Value::LongInt(v)) => write!(out, "{}", v as i32),
            _ => write!(out, "{self}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v:.6}"),
            Value::Float(v) => write!(f, "{:.6}", f64::from(*v)),
            Value::LongInt(v) => write!(f, "{v}"),
            Value::Pointer(0) => f.write_str("(nil)"),
            Value::Pointer(v) => write!(f, "{v:#x}"),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::LongInt(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Char(char::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl<T: ?Sized> From<*const T> for Value {
    fn from(v: *const T) -> Self {
        Value::Pointer(v.cast::<()>() as usize)
    }
}

impl<T: ?Sized> From<*mut T> for Value {
    fn from(v: *mut T) -> Self {
        Value::Pointer(v.cast::<()>() as usize)
    }
}

impl<T: ?Sized> From<&T> for Value {
    fn from(v: &T) -> Self {
        Value::from(v as *const T)
    }
}

impl<T: ?Sized> From<&mut T> for Value {
    fn from(v: &mut T) -> Self {
        Value::from(v as *const T)
    }
}
