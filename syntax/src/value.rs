use crate::intern::{LiteralId, LiteralPool};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeKind {
  None,
  Int32,
  UInt32,
  Float,
  Bool,
  Str,
}
impl fmt::Display for TypeKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::None => write!(f, "None"),
      Self::Int32 => write!(f, "i32"),
      Self::UInt32 => write!(f, "u32"),
      Self::Float => write!(f, "f32"),
      Self::Bool => write!(f, "bool"),
      Self::Str => write!(f, "string"),
    }
  }
}

/// A dynamically typed script value.
///
/// Strings are not copied into values: `Str` points at the decoded literal in
/// the [`LiteralPool`] of the source that produced it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Object {
  #[default]
  None,
  Int32(i32),
  UInt32(u32),
  Float(f32),
  Bool(bool),
  Str(LiteralId),
}
impl Object {
  pub fn type_kind(&self) -> TypeKind {
    match self {
      Self::None => TypeKind::None,
      Self::Int32(_) => TypeKind::Int32,
      Self::UInt32(_) => TypeKind::UInt32,
      Self::Float(_) => TypeKind::Float,
      Self::Bool(_) => TypeKind::Bool,
      Self::Str(_) => TypeKind::Str,
    }
  }

  pub fn display<'a>(&'a self, literals: &'a LiteralPool) -> DisplayObject<'a> {
    DisplayObject {
      object: self,
      literals,
    }
  }

  pub fn to_text(self, literals: &LiteralPool) -> String {
    self.display(literals).to_string()
  }
}
impl From<bool> for Object {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}
impl From<f32> for Object {
  fn from(value: f32) -> Self {
    Self::Float(value)
  }
}
impl From<i32> for Object {
  fn from(value: i32) -> Self {
    Self::Int32(value)
  }
}
impl From<u32> for Object {
  fn from(value: u32) -> Self {
    Self::UInt32(value)
  }
}

pub struct DisplayObject<'a> {
  object: &'a Object,
  literals: &'a LiteralPool,
}
impl fmt::Display for DisplayObject<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self.object {
      Object::None => write!(f, "None"),
      Object::Int32(value) => write!(f, "{value}"),
      Object::UInt32(value) => write!(f, "{value}"),
      Object::Float(value) => write!(f, "{value:.6}"),
      Object::Bool(value) => write!(f, "{value}"),
      Object::Str(id) => match self.literals.get(*id) {
        Some(literal) => write!(f, "{literal}"),
        None => Ok(()),
      },
    }
  }
}
