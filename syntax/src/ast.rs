use crate::{intern::StringId, tokens::TokenId};

pub mod expression;
pub mod statement;

pub use expression::{BinaryOperator, Expr, Expression, Precedence, Term};
pub use statement::{If, Scope, Statement, Stmt};

/// A declared script function. Bodies are kept but never invoked.
#[derive(Clone, Debug)]
pub struct Function {
  pub token: TokenId,
  pub name: StringId,
  pub parameters: Vec<StringId>,
  pub body: Option<Scope>,
}

#[derive(Clone, Debug, Default)]
pub struct Program {
  pub functions: Vec<Function>,
  pub statements: Vec<Statement>,
}
impl Program {
  pub fn is_empty(&self) -> bool {
    self.functions.is_empty() && self.statements.is_empty()
  }

  pub fn get_function(&self, name: StringId) -> Option<&Function> {
    self.functions.iter().find(|function| function.name == name)
  }
}
