use crate::{
  diagnostic::{Diagnostic, Span},
  intern::{Interner, LiteralPool, WideString},
  tokens::{
    CharacterPosition, ColumnNumber, Keyword, LineNumber, LiteralKind, Token, TokenId, TokenKind,
    TokenStream, TokenValue, BRACKETS, OPERATORS, PUNCTUATORS,
  },
};
use smallvec::SmallVec;
use std::{mem, ops::Range};

type Scanned = (TokenKind, TokenValue);

pub struct Lexer<'source, 'pools> {
  text: &'source str,
  source: &'source [u8],

  position: usize,
  line: LineNumber,
  column: ColumnNumber,

  start: usize,
  start_line: LineNumber,
  start_column: ColumnNumber,

  tokens: TokenStream,
  names: &'pools mut Interner,
  literals: &'pools mut LiteralPool,
  diagnostics: &'pools mut Vec<Diagnostic>,

  literal_span: Option<Range<usize>>,
  pending_literals: SmallVec<[(TokenId, Range<usize>); 8]>,
}

impl<'source, 'pools> Lexer<'source, 'pools> {
  pub fn new(
    text: &'source str,
    names: &'pools mut Interner,
    literals: &'pools mut LiteralPool,
    diagnostics: &'pools mut Vec<Diagnostic>,
  ) -> Self {
    Self {
      text,
      source: text.as_bytes(),

      position: 0,
      line: 1,
      column: 1,

      start: 0,
      start_line: 1,
      start_column: 1,

      tokens: TokenStream::default(),
      names,
      literals,
      diagnostics,

      literal_span: None,
      pending_literals: SmallVec::new(),
    }
  }

  pub fn lex(mut self) -> TokenStream {
    self.skip_trivia();

    while !self.at_end() {
      self.start = self.position;
      self.start_line = self.line;
      self.start_column = self.column;

      let (kind, value) = self.scan_token();
      let id = self.push_token(kind, value);

      if let Some(span) = self.literal_span.take() {
        self.pending_literals.push((id, span));
      }

      self.skip_trivia();
    }

    self.start = self.position;
    self.start_line = self.line;
    self.start_column = self.column;
    self.push_token(TokenKind::EndOfFile, TokenValue::None);

    self.decode_literals();

    tracing::trace!(
      tokens = self.tokens.len(),
      literals = self.literals.len(),
      "lexed source"
    );

    self.tokens
  }

  fn at_end(&self) -> bool {
    self.position >= self.source.len()
  }

  fn peek(&self) -> Option<u8> {
    self.source.get(self.position).copied()
  }

  fn advance(&mut self) {
    if let Some(character) = self.peek() {
      if character == b'\n' {
        self.line += 1;
        self.column = 1;
      } else {
        self.column += 1;
      }
      self.position += 1;
    }
  }

  fn advance_by(&mut self, count: usize) {
    for _ in 0..count {
      self.advance();
    }
  }

  fn matches_str(&self, expected: &[u8]) -> bool {
    self.source[self.position..].starts_with(expected)
  }

  fn consume(&mut self, expected: u8) -> bool {
    if self.peek() == Some(expected) {
      self.advance();
      true
    } else {
      false
    }
  }

  fn consume_str(&mut self, expected: &[u8]) -> bool {
    if self.matches_str(expected) {
      self.advance_by(expected.len());
      true
    } else {
      false
    }
  }

  fn consume_while(&mut self, predicate: impl Fn(u8) -> bool) {
    while matches!(self.peek(), Some(c) if predicate(c)) {
      self.advance();
    }
  }

  fn error(&mut self, title: &str, message: String) {
    #[allow(clippy::cast_possible_truncation)]
    let span = Span {
      start: self.start as CharacterPosition,
      end: self.position as CharacterPosition,
    };

    self.diagnostics.push(Diagnostic {
      title: title.to_string(),
      message,
      span,
      line: self.start_line,
      column: self.start_column,
    });
  }

  fn push_token(&mut self, kind: TokenKind, value: TokenValue) -> TokenId {
    let spelling = self.text.get(self.start..self.position).unwrap_or_default();
    let name = self.names.intern(spelling);

    #[allow(clippy::cast_possible_truncation)]
    // assume files are less than 2^32 characters
    self.tokens.push(Token {
      kind,
      value,
      name,
      start: self.start as CharacterPosition,
      end: self.position as CharacterPosition,
      line: self.start_line,
      column: self.start_column,
    })
  }

  fn skip_trivia(&mut self) {
    loop {
      self.consume_while(|c| c.is_ascii_whitespace());

      if self.matches_str(b"--") {
        self.comment();
      } else {
        break;
      }
    }
  }

  fn comment(&mut self) {
    self.advance_by(2);

    if self.consume_str(b"[[") {
      while !self.at_end() && !self.consume_str(b"]]") {
        self.advance();
      }
    } else {
      self.consume_while(|c| c != b'\n');
    }
  }

  fn scan_token(&mut self) -> Scanned {
    if self.consume_str(b"0x") || self.consume_str(b"0X") {
      return self.radix_number(16);
    }
    if self.consume_str(b"0b") || self.consume_str(b"0B") {
      return self.radix_number(2);
    }

    match self.peek() {
      Some(b'0'..=b'9') => self.decimal_number(),
      Some(b'_' | b'a'..=b'z' | b'A'..=b'Z') => self.identifier(),
      Some(quote @ (b'"' | b'\'')) => self.string(quote),
      _ => self.symbol(),
    }
  }

  fn radix_number(&mut self, radix: u32) -> Scanned {
    let digits_start = self.position;
    self.consume_while(|c| c.is_ascii_alphanumeric());
    let digits = &self.text[digits_start..self.position];

    let value = match u32::from_str_radix(digits, radix) {
      Ok(value) => value,
      Err(_) => {
        let spelling = self.text[self.start..self.position].to_string();
        self.error(
          "Invalid Integer Literal",
          format!("'{spelling}' is not a valid base {radix} number"),
        );
        0
      }
    };

    (TokenKind::Literal(LiteralKind::U32), TokenValue::U32(value))
  }

  fn decimal_number(&mut self) -> Scanned {
    self.consume_while(|c| c.is_ascii_digit());
    let digits_end = self.position;

    if self.consume(b'.') {
      self.consume_while(|c| c.is_ascii_digit());
      let value = self.text[self.start..self.position]
        .parse::<f32>()
        .unwrap_or_default();
      let _ = self.consume(b'f') || self.consume(b'F');

      return (
        TokenKind::Literal(LiteralKind::Float),
        TokenValue::Float(value),
      );
    }

    let digits = &self.text[self.start..digits_end];

    let (kind, value) = if self.consume_str(b"UL") {
      (LiteralKind::U64, digits.parse().map(TokenValue::U64).ok())
    } else if self.consume(b'U') {
      (LiteralKind::U32, digits.parse().map(TokenValue::U32).ok())
    } else if self.consume_str(b"LL") {
      (LiteralKind::I64, digits.parse().map(TokenValue::I64).ok())
    } else {
      self.consume(b'l');
      (LiteralKind::I32, digits.parse().map(TokenValue::I32).ok())
    };

    let value = value.unwrap_or_else(|| {
      let digits = digits.to_string();
      self.error(
        "Invalid Integer Literal",
        format!("'{digits}' does not fit in {kind:?}"),
      );

      match kind {
        LiteralKind::U64 => TokenValue::U64(0),
        LiteralKind::U32 => TokenValue::U32(0),
        LiteralKind::I64 => TokenValue::I64(0),
        _ => TokenValue::I32(0),
      }
    });

    (TokenKind::Literal(kind), value)
  }

  fn identifier(&mut self) -> Scanned {
    self.consume_while(|c| c.is_ascii_alphanumeric() || c == b'_');

    let spelling = &self.source[self.start..self.position];
    let kind = match Keyword::from_spelling(spelling) {
      Some(keyword) => TokenKind::Keyword(keyword),
      None => TokenKind::Identifier,
    };

    (kind, TokenValue::None)
  }

  fn string(&mut self, quote: u8) -> Scanned {
    self.advance();

    if self.consume(quote) {
      self.literal_span = Some(self.position..self.position);
      return (
        TokenKind::Literal(LiteralKind::StringEmpty),
        TokenValue::None,
      );
    }

    let content_start = self.position;
    let content_end = loop {
      match self.peek() {
        None => {
          let quote = char::from(quote);
          self.error(
            "Unterminated String",
            format!("missing closing quote {quote}"),
          );
          break self.position;
        }
        Some(b'\\') => self.advance_by(2),
        Some(c) if c == quote => {
          let end = self.position;
          self.advance();
          break end;
        }
        Some(_) => self.advance(),
      }
    };

    self.literal_span = Some(content_start..content_end);
    (TokenKind::Literal(LiteralKind::String), TokenValue::None)
  }

  fn symbol(&mut self) -> Scanned {
    for (spelling, punctuator) in PUNCTUATORS {
      if self.consume_str(spelling.as_bytes()) {
        return (TokenKind::Punctuator(punctuator), TokenValue::None);
      }
    }

    for (spelling, operator) in OPERATORS {
      if self.consume_str(spelling.as_bytes()) {
        return (TokenKind::Operator(operator), TokenValue::None);
      }
    }

    for (pair, bracket) in BRACKETS {
      if self.consume(pair[0]) {
        return (TokenKind::Bracket(bracket, true), TokenValue::None);
      }
      if self.consume(pair[1]) {
        return (TokenKind::Bracket(bracket, false), TokenValue::None);
      }
    }

    let character = self.text[self.position..]
      .chars()
      .next()
      .unwrap_or(char::REPLACEMENT_CHARACTER);
    self.advance_by(character.len_utf8());
    self.error("Invalid Token", format!("unknown character '{character}'"));

    (TokenKind::Unknown, TokenValue::None)
  }

  fn decode_literals(&mut self) {
    for (id, span) in mem::take(&mut self.pending_literals) {
      let raw = self.text.get(span).unwrap_or_default();
      let literal = self.literals.add(WideString::from(unescape(raw).as_str()));
      self.tokens.get_mut(id).value = TokenValue::Str(literal);
    }
  }
}

fn unescape(raw: &str) -> String {
  let mut decoded = String::with_capacity(raw.len());
  let mut characters = raw.chars();

  while let Some(character) = characters.next() {
    if character != '\\' {
      decoded.push(character);
      continue;
    }

    match characters.next() {
      Some('n') => decoded.push('\n'),
      Some('t') => decoded.push('\t'),
      Some('r') => decoded.push('\r'),
      Some('0') => decoded.push('\0'),
      Some(other) => decoded.push(other),
      None => decoded.push('\\'),
    }
  }

  decoded
}

pub fn tokenize(
  source: &str,
  names: &mut Interner,
  literals: &mut LiteralPool,
  diagnostics: &mut Vec<Diagnostic>,
) -> TokenStream {
  Lexer::new(source, names, literals, diagnostics).lex()
}
