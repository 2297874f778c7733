use super::expression::{BinaryOperator, Expression};
use crate::tokens::TokenId;

#[derive(Clone, Debug)]
pub struct Statement {
  pub stmt: Stmt,
  pub token: TokenId,
}

macro_rules! statement {
  ($type:ident $struct:tt, $token:expr) => {
    Statement {
      stmt: Stmt::$type $struct,
      token: $token,
    }
  };
}
pub(crate) use statement;

// Loop, `do` block, `break` and `return` statements are rejected by the parser
// as unsupported, so they have no node here.
#[derive(Clone, Debug)]
pub enum Stmt {
  Assign {
    destination: Expression,
    /// `None` for plain `=`, the applied operator for compound assignment.
    operator: Option<BinaryOperator>,
    value: Expression,
  },
  Expression {
    expression: Expression,
  },
  If(If),
}

/// An ordered statement list. Scopes do not introduce a new namespace.
#[derive(Clone, Debug)]
pub struct Scope {
  pub token: TokenId,
  pub body: Vec<Statement>,
}

#[derive(Clone, Debug)]
pub struct If {
  pub token: TokenId,
  pub condition: Expression,
  pub then: Scope,
  pub elseif: Option<Box<If>>,
  pub otherwise: Option<Scope>,
}
