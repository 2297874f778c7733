use thiserror::Error;
use zlua_syntax::{
  ast::BinaryOperator,
  tokens::{ColumnNumber, LineNumber},
  Diagnostic, TypeKind,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Fault {
  #[error("Operation '{operator}' is not supported between {left} and {right}")]
  UnsupportedOperation {
    operator: BinaryOperator,
    left: TypeKind,
    right: TypeKind,
  },
  #[error("Division by zero")]
  DivisionByZero,
  #[error("Condition must be a bool, got {got}")]
  NonBooleanCondition { got: TypeKind },
  #[error("Can only assign to a variable")]
  InvalidAssignmentTarget,
  #[error("Builtin '{name}' expected {expected} arguments, got {found}")]
  ArityMismatch {
    name: &'static str,
    expected: usize,
    found: usize,
  },
  #[error("Argument {position} of '{name}' expected {expected}, got {got}")]
  ArgumentType {
    name: &'static str,
    position: usize,
    expected: &'static str,
    got: TypeKind,
  },
}
impl Fault {
  /// Fatal faults end the whole scripting session, not only the entry.
  pub fn is_fatal(&self) -> bool {
    matches!(self, Self::UnsupportedOperation { .. })
  }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{fault} at line {line}, column {column}")]
pub struct RuntimeError {
  pub fault: Fault,
  pub line: LineNumber,
  pub column: ColumnNumber,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
  #[error("failed to tokenize '{name}'")]
  Tokenize {
    name: String,
    diagnostics: Vec<Diagnostic>,
  },
  #[error("failed to parse '{name}'")]
  Parse {
    name: String,
    diagnostics: Vec<Diagnostic>,
  },
}
impl LoadError {
  pub fn diagnostics(&self) -> &[Diagnostic] {
    match self {
      Self::Tokenize { diagnostics, .. } | Self::Parse { diagnostics, .. } => diagnostics,
    }
  }
}
