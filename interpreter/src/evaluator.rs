use crate::{
  builtins::Builtin,
  error::{Fault, RuntimeError},
  host::Host,
  operators,
};
use rustc_hash::FxHashMap as HashMap;
use smallvec::SmallVec;
use zlua_syntax::{
  ast::{BinaryOperator, Expr, Expression, If, Scope, Statement, Stmt, Term},
  Interner, LiteralPool, Object, SourceFile, StringId, TokenId,
};

type EvaluationResult<T> = Result<T, (Fault, TokenId)>;

/// Walks a parsed program, keeping global variables between runs.
#[derive(Debug, Default)]
pub struct Evaluator {
  globals: HashMap<StringId, Object>,
}

impl Evaluator {
  pub fn new() -> Self {
    Self::default()
  }

  /// Executes the top-level statements of `source` in order, stopping at the
  /// first fault. Declared functions are never run.
  pub fn run(&mut self, source: &SourceFile, host: &mut dyn Host) -> Result<(), RuntimeError> {
    let Some(program) = source.program() else {
      return Ok(());
    };

    let mut frame = Frame {
      names: source.names(),
      literals: source.literals(),
      host,
      globals: &mut self.globals,
    };

    for statement in &program.statements {
      if let Err((fault, token)) = frame.statement(statement) {
        let (line, column) = source
          .token(token)
          .map_or((0, 0), |token| (token.line, token.column));

        tracing::debug!(%fault, line, column, "script faulted");
        return Err(RuntimeError {
          fault,
          line,
          column,
        });
      }
    }

    Ok(())
  }

  pub fn get_global(&self, name: StringId) -> Option<Object> {
    self.globals.get(&name).copied()
  }

  pub fn globals(&self) -> impl Iterator<Item = (StringId, Object)> + '_ {
    self.globals.iter().map(|(name, value)| (*name, *value))
  }
}

struct Frame<'run> {
  names: &'run Interner,
  literals: &'run LiteralPool,
  host: &'run mut dyn Host,
  globals: &'run mut HashMap<StringId, Object>,
}

impl Frame<'_> {
  fn statement(&mut self, statement: &Statement) -> EvaluationResult<()> {
    match &statement.stmt {
      Stmt::Assign {
        destination,
        operator,
        value,
      } => self.assign(destination, *operator, value),
      Stmt::Expression { expression } => self.expression(expression).map(|_| ()),
      Stmt::If(statement) => self.if_statement(statement),
    }
  }

  fn scope(&mut self, scope: &Scope) -> EvaluationResult<()> {
    scope
      .body
      .iter()
      .try_for_each(|statement| self.statement(statement))
  }

  fn assign(
    &mut self,
    destination: &Expression,
    operator: Option<BinaryOperator>,
    value: &Expression,
  ) -> EvaluationResult<()> {
    let Expr::Variable { name } = destination.expr else {
      tracing::warn!("assignment destination is not a variable");
      return Err((Fault::InvalidAssignmentTarget, destination.token));
    };

    let value = self.expression(value)?;

    match operator {
      None => {
        self.globals.insert(name, value);
      }
      Some(operator) => {
        let slot = self.globals.entry(name).or_default();
        operators::apply(operator, slot, value, self.literals)
          .map_err(|fault| (fault, destination.token))?;
      }
    }

    Ok(())
  }

  fn if_statement(&mut self, statement: &If) -> EvaluationResult<()> {
    let condition = match self.expression(&statement.condition)? {
      Object::Bool(condition) => condition,
      Object::None => false,
      other => {
        return Err((
          Fault::NonBooleanCondition {
            got: other.type_kind(),
          },
          statement.condition.token,
        ))
      }
    };

    if condition {
      self.scope(&statement.then)
    } else if let Some(elseif) = &statement.elseif {
      self.if_statement(elseif)
    } else if let Some(otherwise) = &statement.otherwise {
      self.scope(otherwise)
    } else {
      Ok(())
    }
  }

  fn expression(&mut self, expression: &Expression) -> EvaluationResult<Object> {
    match &expression.expr {
      Expr::Value { object } => Ok(*object),
      Expr::Variable { name } => Ok(*self.globals.entry(*name).or_default()),
      Expr::Call { functor, arguments } => self.call(functor, arguments),
      Expr::Terms { base, terms, .. } => self.terms(base, terms),
    }
  }

  fn call(&mut self, functor: &Expression, arguments: &[Expression]) -> EvaluationResult<Object> {
    let mut values: SmallVec<[Object; 4]> = SmallVec::new();
    for argument in arguments {
      values.push(self.expression(argument)?);
    }

    let name = match functor.expr {
      Expr::Variable { name } => self.names.resolve(name),
      _ => "",
    };

    match Builtin::from_name(name) {
      Some(builtin) => builtin
        .call(&values, self.literals, &mut *self.host)
        .map_err(|fault| (fault, functor.token)),
      None => {
        tracing::debug!(name, "call to unknown function");
        Ok(Object::None)
      }
    }
  }

  fn terms(&mut self, base: &Expression, terms: &[Term]) -> EvaluationResult<Object> {
    let mut accumulator = self.expression(base)?;

    for term in terms {
      if matches!(
        (term.operator, accumulator),
        (BinaryOperator::And, Object::Bool(false)) | (BinaryOperator::Or, Object::Bool(true))
      ) {
        continue;
      }

      let operand = self.expression(&term.operand)?;
      operators::apply(term.operator, &mut accumulator, operand, self.literals)
        .map_err(|fault| (fault, term.token))?;
    }

    Ok(accumulator)
  }
}
