pub mod ast;
mod diagnostic;
mod intern;
mod lexer;
mod parser;
mod source;
pub mod tokens;
mod value;

pub use diagnostic::{Diagnostic, Span};
pub use intern::{Interner, LiteralId, LiteralPool, StringId, WideString};
pub use lexer::{tokenize, Lexer};
pub use parser::parse;
pub use source::SourceFile;
pub use tokens::{LineNumber, Token, TokenId, TokenKind, TokenStream, TokenValue};
pub use value::{Object, TypeKind};
