use rustc_hash::FxHashMap as HashMap;
use smartstring::alias::String;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringId(u32);
impl StringId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// Insertion-ordered pool of distinct spellings.
///
/// A string's identity is its position in the pool, so comparing two
/// [`StringId`]s is the same as comparing the strings they were made from.
#[derive(Clone, Debug, Default)]
pub struct Interner {
  strings: Vec<String>,
  lookup: HashMap<String, StringId>,
}
impl Interner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn intern(&mut self, string: &str) -> StringId {
    if let Some(id) = self.lookup.get(string) {
      return *id;
    }

    #[allow(clippy::cast_possible_truncation)]
    let id = StringId(self.strings.len() as u32);
    self.strings.push(String::from(string));
    self.lookup.insert(String::from(string), id);
    id
  }

  pub fn get(&self, string: &str) -> Option<StringId> {
    self.lookup.get(string).copied()
  }

  pub fn resolve(&self, id: StringId) -> &str {
    self.strings.get(id.index()).map_or("", String::as_str)
  }

  pub fn len(&self) -> usize {
    self.strings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.strings.is_empty()
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LiteralId(u32);
impl LiteralId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// A decoded string literal, stored as UTF-16 code units.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WideString(Vec<u16>);
impl WideString {
  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
impl From<&str> for WideString {
  fn from(string: &str) -> Self {
    Self(string.encode_utf16().collect())
  }
}
impl fmt::Display for WideString {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    char::decode_utf16(self.0.iter().copied())
      .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
      .try_for_each(|c| write!(f, "{c}"))
  }
}

/// Decoded string literals, owned by the source they were lexed from.
#[derive(Clone, Debug, Default)]
pub struct LiteralPool {
  literals: Vec<WideString>,
}
impl LiteralPool {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&mut self, literal: WideString) -> LiteralId {
    #[allow(clippy::cast_possible_truncation)]
    let id = LiteralId(self.literals.len() as u32);
    self.literals.push(literal);
    id
  }

  pub fn get(&self, id: LiteralId) -> Option<&WideString> {
    self.literals.get(id.index())
  }

  pub fn len(&self) -> usize {
    self.literals.len()
  }

  pub fn is_empty(&self) -> bool {
    self.literals.is_empty()
  }
}
