use crate::tokens::{CharacterPosition, ColumnNumber, LineNumber, Token};
use std::{error, fmt};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Span {
  pub start: CharacterPosition,
  pub end: CharacterPosition,
}
impl From<&Token> for Span {
  fn from(token: &Token) -> Self {
    Self {
      start: token.start,
      end: token.end,
    }
  }
}
impl fmt::Display for Span {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}..{}", self.start, self.end)
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
  pub title: String,
  pub message: String,
  pub span: Span,
  pub line: LineNumber,
  pub column: ColumnNumber,
}
impl Diagnostic {
  pub fn at(token: &Token, title: &str, message: String) -> Self {
    Self {
      title: title.to_string(),
      message,
      span: token.into(),
      line: token.line,
      column: token.column,
    }
  }
}
impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "error at line={}, column={}: {}",
      self.line, self.column, self.title
    )?;

    if !self.message.is_empty() {
      write!(f, " ({})", self.message)?;
    }

    Ok(())
  }
}
impl error::Error for Diagnostic {}
