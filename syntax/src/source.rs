use crate::{
  ast::Program,
  diagnostic::Diagnostic,
  intern::{Interner, LiteralPool},
  lexer::tokenize,
  parser::parse,
  tokens::{Token, TokenId, TokenStream},
};

/// One unit of script source and everything derived from it.
///
/// The source owns its tokens, its interned names, its decoded string
/// literals, the diagnostics produced while reading it and the parsed
/// program. Dropping it releases all of them.
#[derive(Clone, Debug, Default)]
pub struct SourceFile {
  name: String,
  text: String,
  diagnostics: Vec<Diagnostic>,
  names: Interner,
  literals: LiteralPool,
  tokens: Option<TokenStream>,
  program: Option<Program>,
}

impl SourceFile {
  pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      text: text.into(),
      ..Self::default()
    }
  }

  /// Replaces the text with new source, keeping the interned names and
  /// string literals so that ids handed out earlier stay valid.
  pub fn resume(self, name: impl Into<String>, text: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      text: text.into(),
      names: self.names,
      literals: self.literals,
      ..Self::default()
    }
  }

  /// Tokenizes the source. Returns `false` if the lexer reported anything.
  pub fn lex(&mut self) -> bool {
    let before = self.diagnostics.len();
    let tokens = tokenize(
      &self.text,
      &mut self.names,
      &mut self.literals,
      &mut self.diagnostics,
    );
    self.tokens = Some(tokens);

    self.diagnostics.len() == before
  }

  /// Parses the source, lexing it first if that has not happened yet.
  pub fn parse(&mut self) -> bool {
    if self.tokens.is_none() {
      self.lex();
    }

    if let Some(tokens) = &self.tokens {
      self.program = parse(tokens, &self.names, &mut self.diagnostics);
    }

    self.program.is_some()
  }

  pub fn is_parsed(&self) -> bool {
    self.program.is_some()
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn diagnostics(&self) -> &[Diagnostic] {
    &self.diagnostics
  }

  pub fn names(&self) -> &Interner {
    &self.names
  }

  pub fn literals(&self) -> &LiteralPool {
    &self.literals
  }

  pub fn tokens(&self) -> Option<&TokenStream> {
    self.tokens.as_ref()
  }

  pub fn token(&self, id: TokenId) -> Option<&Token> {
    self
      .tokens
      .as_ref()
      .filter(|tokens| id.index() < tokens.len())
      .map(|tokens| tokens.get(id))
  }

  pub fn program(&self) -> Option<&Program> {
    self.program.as_ref()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn should_lex_and_parse() {
    let mut source = SourceFile::new("test", "x = 1");

    assert!(source.lex());
    assert!(source.parse());
    assert!(source.is_parsed());
    assert!(source.diagnostics().is_empty());
    assert_eq!(source.program().map(|p| p.statements.len()), Some(1));
  }

  #[test]
  fn should_parse_without_explicit_lex() {
    let mut source = SourceFile::new("test", "x = 1 y = 2");

    assert!(source.parse());
    assert_eq!(source.tokens().map(TokenStream::len), Some(7));
  }

  #[test]
  fn should_collect_diagnostics() {
    let mut source = SourceFile::new("test", "x = \"abc");

    assert!(!source.lex());
    assert_eq!(source.diagnostics().len(), 1);
    assert_eq!(source.diagnostics()[0].title, "Unterminated String");
  }

  #[test]
  fn should_keep_names_when_resumed() {
    let mut first = SourceFile::new("line 1", "speed = 1");
    first.parse();
    let speed = first.names().get("speed");

    let mut second = first.resume("line 2", "speed = speed + 1");
    second.parse();

    assert!(speed.is_some());
    assert_eq!(second.names().get("speed"), speed);
    assert!(second.diagnostics().is_empty());
  }
}
