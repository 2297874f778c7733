use crate::{
  intern::StringId,
  tokens::{Keyword, Operator, TokenId, TokenKind},
  value::Object,
};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt;

#[derive(Clone, Debug)]
pub struct Expression {
  pub expr: Expr,
  pub token: TokenId,
}

macro_rules! expression {
  ($type:ident $struct:tt, $token:expr) => {
    Expression {
      expr: Expr::$type $struct,
      token: $token,
    }
  };
}
pub(crate) use expression;

#[derive(Clone, Debug)]
pub enum Expr {
  Value {
    object: Object,
  },
  Variable {
    name: StringId,
  },
  Call {
    functor: Box<Expression>,
    arguments: Vec<Expression>,
  },
  /// A left-associative chain of operators that share one precedence level.
  Terms {
    precedence: Precedence,
    base: Box<Expression>,
    terms: Vec<Term>,
  },
}

#[derive(Clone, Debug)]
pub struct Term {
  pub operator: BinaryOperator,
  pub token: TokenId,
  pub operand: Expression,
}

#[derive(Debug, FromPrimitive, PartialOrd, Ord, PartialEq, Eq, Clone, Copy)]
pub enum Precedence {
  LogicalOr = 0,  // or ||
  LogicalAnd,     // and &&
  BitwiseOr,      // |
  BitwiseXor,     // ^
  BitwiseAnd,     // &
  Equality,       // == !=
  Comparison,     // < > <= >=
  Shift,          // << >>
  Additive,       // + -
  Multiplicative, // * / %
  Primary,
}
impl Precedence {
  pub const LOWEST: Self = Self::LogicalOr;

  pub fn next(self) -> Self {
    FromPrimitive::from_u8(self as u8 + 1).unwrap_or(Self::Primary)
  }
}
impl fmt::Display for Precedence {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::LogicalOr => write!(f, "logical or"),
      Self::LogicalAnd => write!(f, "logical and"),
      Self::BitwiseOr => write!(f, "bitwise or"),
      Self::BitwiseXor => write!(f, "bitwise xor"),
      Self::BitwiseAnd => write!(f, "bitwise and"),
      Self::Equality => write!(f, "equality"),
      Self::Comparison => write!(f, "comparison"),
      Self::Shift => write!(f, "shift"),
      Self::Additive => write!(f, "additive"),
      Self::Multiplicative => write!(f, "multiplicative"),
      Self::Primary => write!(f, "primary"),
    }
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
  Or,
  And,
  BitOr,
  BitXor,
  BitAnd,
  Equal,
  NotEqual,
  Less,
  Greater,
  LessEqual,
  GreaterEqual,
  LeftShift,
  RightShift,
  Add,
  Subtract,
  Multiply,
  Divide,
  Remainder,
}
impl BinaryOperator {
  pub fn from_token(kind: TokenKind) -> Option<Self> {
    match kind {
      TokenKind::Keyword(Keyword::Or) | TokenKind::Operator(Operator::LogicalOr) => Some(Self::Or),
      TokenKind::Keyword(Keyword::And) | TokenKind::Operator(Operator::LogicalAnd) => {
        Some(Self::And)
      }
      TokenKind::Operator(operator) => match operator {
        Operator::BitOr => Some(Self::BitOr),
        Operator::BitXor => Some(Self::BitXor),
        Operator::BitAnd => Some(Self::BitAnd),
        Operator::Equal => Some(Self::Equal),
        Operator::NotEqual => Some(Self::NotEqual),
        Operator::Less => Some(Self::Less),
        Operator::Greater => Some(Self::Greater),
        Operator::LessEqual => Some(Self::LessEqual),
        Operator::GreaterEqual => Some(Self::GreaterEqual),
        Operator::LeftShift => Some(Self::LeftShift),
        Operator::RightShift => Some(Self::RightShift),
        Operator::Add => Some(Self::Add),
        Operator::Sub => Some(Self::Subtract),
        Operator::Mul => Some(Self::Multiply),
        Operator::Div => Some(Self::Divide),
        Operator::Mod => Some(Self::Remainder),
        _ => None,
      },
      _ => None,
    }
  }

  /// The operator a compound assignment applies, such as `+` for `+=`.
  pub fn from_assignment(operator: Operator) -> Option<Self> {
    match operator {
      Operator::AddAssign => Some(Self::Add),
      Operator::SubAssign => Some(Self::Subtract),
      Operator::MulAssign => Some(Self::Multiply),
      Operator::DivAssign => Some(Self::Divide),
      Operator::ModAssign => Some(Self::Remainder),
      Operator::BitAndAssign => Some(Self::BitAnd),
      Operator::BitOrAssign => Some(Self::BitOr),
      Operator::BitXorAssign => Some(Self::BitXor),
      Operator::LeftShiftAssign => Some(Self::LeftShift),
      Operator::RightShiftAssign => Some(Self::RightShift),
      _ => None,
    }
  }

  pub fn precedence(self) -> Precedence {
    match self {
      Self::Or => Precedence::LogicalOr,
      Self::And => Precedence::LogicalAnd,
      Self::BitOr => Precedence::BitwiseOr,
      Self::BitXor => Precedence::BitwiseXor,
      Self::BitAnd => Precedence::BitwiseAnd,
      Self::Equal | Self::NotEqual => Precedence::Equality,
      Self::Less | Self::Greater | Self::LessEqual | Self::GreaterEqual => Precedence::Comparison,
      Self::LeftShift | Self::RightShift => Precedence::Shift,
      Self::Add | Self::Subtract => Precedence::Additive,
      Self::Multiply | Self::Divide | Self::Remainder => Precedence::Multiplicative,
    }
  }
}
impl fmt::Display for BinaryOperator {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Or => write!(f, "or"),
      Self::And => write!(f, "and"),
      Self::BitOr => write!(f, "|"),
      Self::BitXor => write!(f, "^"),
      Self::BitAnd => write!(f, "&"),
      Self::Equal => write!(f, "=="),
      Self::NotEqual => write!(f, "!="),
      Self::Less => write!(f, "<"),
      Self::Greater => write!(f, ">"),
      Self::LessEqual => write!(f, "<="),
      Self::GreaterEqual => write!(f, ">="),
      Self::LeftShift => write!(f, "<<"),
      Self::RightShift => write!(f, ">>"),
      Self::Add => write!(f, "+"),
      Self::Subtract => write!(f, "-"),
      Self::Multiply => write!(f, "*"),
      Self::Divide => write!(f, "/"),
      Self::Remainder => write!(f, "%"),
    }
  }
}
