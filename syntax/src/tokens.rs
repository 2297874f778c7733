use crate::intern::{LiteralId, StringId};
use std::str;

pub type LineNumber = u32;
pub type ColumnNumber = u32;
pub type CharacterPosition = u32;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LiteralKind {
  I32,
  I64,
  U32,
  U64,
  Float,
  String,
  StringEmpty,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operator {
  LeftShiftAssign,
  RightShiftAssign,
  AddAssign,
  SubAssign,
  MulAssign,
  DivAssign,
  ModAssign,
  BitAndAssign,
  BitOrAssign,
  BitXorAssign,
  LeftShift,
  RightShift,
  Equal,
  NotEqual,
  GreaterEqual,
  LessEqual,
  LogicalAnd,
  LogicalOr,
  Assign,
  Greater,
  Less,
  BitAnd,
  BitOr,
  BitXor,
  BitNot,
  LogicalNot,
  Add,
  Sub,
  Mul,
  Div,
  Mod,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Punctuator {
  Ellipsis,
  RightArrow,
  Dollar,
  Sharp,
  Colon,
  Semicolon,
  Dot,
  Comma,
  At,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bracket {
  Round,
  Curly,
  Square,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Keyword {
  True,
  False,
  None,
  I32,
  F32,
  And,
  Or,
  If,
  Then,
  Else,
  Elseif,
  For,
  While,
  Repeat,
  Until,
  Do,
  End,
  Break,
  Return,
  Function,
  Enum,
  Import,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
  Literal(LiteralKind),
  Identifier,
  Keyword(Keyword),
  Punctuator(Punctuator),
  Operator(Operator),
  Bracket(Bracket, bool),
  Unknown,
  EndOfFile,
}

// Every table is ordered longest spelling first, so the first match is the
// longest one.
pub(crate) const PUNCTUATORS: [(&str, Punctuator); 9] = [
  ("...", Punctuator::Ellipsis),
  ("->", Punctuator::RightArrow),
  ("$", Punctuator::Dollar),
  ("#", Punctuator::Sharp),
  (":", Punctuator::Colon),
  (";", Punctuator::Semicolon),
  (".", Punctuator::Dot),
  (",", Punctuator::Comma),
  ("@", Punctuator::At),
];

pub(crate) const OPERATORS: [(&str, Operator); 31] = [
  ("<<=", Operator::LeftShiftAssign),
  (">>=", Operator::RightShiftAssign),
  ("+=", Operator::AddAssign),
  ("-=", Operator::SubAssign),
  ("*=", Operator::MulAssign),
  ("/=", Operator::DivAssign),
  ("%=", Operator::ModAssign),
  ("&=", Operator::BitAndAssign),
  ("|=", Operator::BitOrAssign),
  ("^=", Operator::BitXorAssign),
  ("<<", Operator::LeftShift),
  (">>", Operator::RightShift),
  ("==", Operator::Equal),
  ("!=", Operator::NotEqual),
  (">=", Operator::GreaterEqual),
  ("<=", Operator::LessEqual),
  ("&&", Operator::LogicalAnd),
  ("||", Operator::LogicalOr),
  ("=", Operator::Assign),
  (">", Operator::Greater),
  ("<", Operator::Less),
  ("&", Operator::BitAnd),
  ("|", Operator::BitOr),
  ("^", Operator::BitXor),
  ("~", Operator::BitNot),
  ("!", Operator::LogicalNot),
  ("+", Operator::Add),
  ("-", Operator::Sub),
  ("*", Operator::Mul),
  ("/", Operator::Div),
  ("%", Operator::Mod),
];

pub(crate) const BRACKETS: [(&[u8; 2], Bracket); 3] = [
  (b"()", Bracket::Round),
  (b"{}", Bracket::Curly),
  (b"[]", Bracket::Square),
];

pub(crate) const KEYWORDS: [(&str, Keyword); 22] = [
  ("true", Keyword::True),
  ("false", Keyword::False),
  ("None", Keyword::None),
  ("i32", Keyword::I32),
  ("f32", Keyword::F32),
  ("and", Keyword::And),
  ("or", Keyword::Or),
  ("if", Keyword::If),
  ("then", Keyword::Then),
  ("else", Keyword::Else),
  ("elseif", Keyword::Elseif),
  ("for", Keyword::For),
  ("while", Keyword::While),
  ("repeat", Keyword::Repeat),
  ("until", Keyword::Until),
  ("do", Keyword::Do),
  ("end", Keyword::End),
  ("break", Keyword::Break),
  ("return", Keyword::Return),
  ("function", Keyword::Function),
  ("enum", Keyword::Enum),
  ("import", Keyword::Import),
];

impl Keyword {
  pub fn from_spelling(spelling: &[u8]) -> Option<Self> {
    KEYWORDS
      .iter()
      .find(|(keyword, _)| keyword.as_bytes() == spelling)
      .map(|(_, keyword)| *keyword)
  }

  pub fn spelling(self) -> &'static str {
    KEYWORDS
      .iter()
      .find(|(_, keyword)| *keyword == self)
      .map_or("", |(spelling, _)| spelling)
  }
}

impl Operator {
  pub fn spelling(self) -> &'static str {
    OPERATORS
      .iter()
      .find(|(_, operator)| *operator == self)
      .map_or("", |(spelling, _)| spelling)
  }
}

impl Punctuator {
  pub fn spelling(self) -> &'static str {
    PUNCTUATORS
      .iter()
      .find(|(_, punctuator)| *punctuator == self)
      .map_or("", |(spelling, _)| spelling)
  }
}

impl Bracket {
  pub fn spelling(self, open: bool) -> char {
    let pair = BRACKETS
      .iter()
      .find(|(_, bracket)| *bracket == self)
      .map_or(b"()", |(pair, _)| *pair);

    char::from(if open { pair[0] } else { pair[1] })
  }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TokenValue {
  None,
  I32(i32),
  I64(i64),
  U32(u32),
  U64(u64),
  Float(f32),
  Str(LiteralId),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Token {
  pub kind: TokenKind,
  pub value: TokenValue,
  /// Interned spelling of the token, as written in the source.
  pub name: StringId,
  pub start: CharacterPosition,
  pub end: CharacterPosition,
  pub line: LineNumber,
  pub column: ColumnNumber,
}
impl Token {
  pub fn len(&self) -> CharacterPosition {
    self.end - self.start
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }

  pub fn is(&self, kind: TokenKind) -> bool {
    self.kind == kind
  }

  pub fn is_keyword(&self, keyword: Keyword) -> bool {
    self.kind == TokenKind::Keyword(keyword)
  }

  pub fn is_punctuator(&self, punctuator: Punctuator) -> bool {
    self.kind == TokenKind::Punctuator(punctuator)
  }

  pub fn is_open(&self, bracket: Bracket) -> bool {
    self.kind == TokenKind::Bracket(bracket, true)
  }

  pub fn is_close(&self, bracket: Bracket) -> bool {
    self.kind == TokenKind::Bracket(bracket, false)
  }

  pub fn is_eof(&self) -> bool {
    self.kind == TokenKind::EndOfFile
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(u32);
impl TokenId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// The lexed token chain.
///
/// Tokens live in one arena and are addressed by [`TokenId`]. Successor and
/// predecessor links are index arithmetic, so the stream owns every token and
/// dropping it releases the whole chain at once. The last token is always the
/// only [`TokenKind::EndOfFile`].
#[derive(Clone, Debug, Default)]
pub struct TokenStream {
  tokens: Vec<Token>,
}
impl TokenStream {
  pub(crate) fn push(&mut self, token: Token) -> TokenId {
    #[allow(clippy::cast_possible_truncation)]
    // assume sources have less than 2^32 tokens
    let id = TokenId(self.tokens.len() as u32);
    self.tokens.push(token);
    id
  }

  pub(crate) fn get_mut(&mut self, id: TokenId) -> &mut Token {
    &mut self.tokens[id.index()]
  }

  pub fn first(&self) -> TokenId {
    TokenId(0)
  }

  pub fn get(&self, id: TokenId) -> &Token {
    &self.tokens[id.index()]
  }

  pub fn next(&self, id: TokenId) -> Option<TokenId> {
    if self.get(id).is_eof() {
      None
    } else {
      Some(TokenId(id.0 + 1))
    }
  }

  pub fn prev(&self, id: TokenId) -> Option<TokenId> {
    id.0.checked_sub(1).map(TokenId)
  }

  pub fn len(&self) -> usize {
    self.tokens.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tokens.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Token> {
    self.tokens.iter()
  }
}
