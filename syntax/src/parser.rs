use crate::{
  ast::{
    expression::{expression, BinaryOperator, Expr, Expression, Precedence, Term},
    statement::{statement, If, Scope, Statement, Stmt},
    Function, Program,
  },
  diagnostic::Diagnostic,
  intern::{Interner, StringId},
  tokens::{
    Bracket, Keyword, Operator, Punctuator, Token, TokenId, TokenKind, TokenStream, TokenValue,
  },
  value::Object,
};

enum Error {
  ExpectedExpression,
  ExpectedThen,
  ExpectedOpeningBracket,
  ExpectedClosingBracket,
  ExpectedIdentifier,
  UnexpectedToken,
  UnterminatedIf { start: TokenId },
  UnterminatedFunction { start: TokenId },
  UnsupportedStatement,
  UnsupportedLiteral,
  TooDeeplyNested,
}
impl Error {
  fn get_title(&self) -> &'static str {
    match self {
      Self::ExpectedExpression => "Expected Expression",
      Self::ExpectedThen => "Expected 'then'",
      Self::ExpectedOpeningBracket => "Expected '('",
      Self::ExpectedClosingBracket => "Expected ')'",
      Self::ExpectedIdentifier => "Expected Identifier",
      Self::UnexpectedToken => "Unexpected Token",
      Self::UnterminatedIf { .. } => "Unterminated If Statement",
      Self::UnterminatedFunction { .. } => "Unterminated Function",
      Self::UnsupportedStatement => "Unsupported Statement",
      Self::UnsupportedLiteral => "Unsupported Literal",
      Self::TooDeeplyNested => "Too Deeply Nested",
    }
  }

  fn get_message(&self, spelling: &str) -> String {
    match self {
      Self::ExpectedExpression => "expected expression after this token".to_string(),
      Self::ExpectedThen => "expected 'then' after this token".to_string(),
      Self::ExpectedOpeningBracket | Self::ExpectedClosingBracket | Self::ExpectedIdentifier => {
        if spelling.is_empty() {
          "but reached the end of the file".to_string()
        } else {
          format!("but received '{spelling}'")
        }
      }
      Self::UnexpectedToken => format!("unexpected token '{spelling}'"),
      Self::UnterminatedIf { .. } => "if statement not terminated, expected 'end'".to_string(),
      Self::UnterminatedFunction { .. } => "function not terminated, expected 'end'".to_string(),
      Self::UnsupportedStatement => format!("'{spelling}' statements are not supported"),
      Self::UnsupportedLiteral => {
        format!("'{spelling}' is a 64-bit integer, which scripts cannot represent")
      }
      Self::TooDeeplyNested => {
        format!("nesting goes deeper than {MAX_NESTING_DEPTH} levels here")
      }
    }
  }

  fn get_diagnostic(&self, names: &Interner, token: &Token) -> Diagnostic {
    let spelling = names.resolve(token.name);
    Diagnostic::at(token, self.get_title(), self.get_message(spelling))
  }
}

/// Expressions and `if` statements may nest this deep before parsing stops.
const MAX_NESTING_DEPTH: usize = 64;

type ExpressionResult = Result<Expression, Error>;
type StatementResult = Result<Statement, Error>;

struct Parser<'tokens> {
  tokens: &'tokens TokenStream,
  current: TokenId,
  depth: usize,
}

impl<'tokens> Parser<'tokens> {
  fn new(tokens: &'tokens TokenStream) -> Self {
    Self {
      tokens,
      current: tokens.first(),
      depth: 0,
    }
  }

  fn current(&self) -> &'tokens Token {
    self.tokens.get(self.current)
  }

  fn advance(&mut self) -> TokenId {
    let token = self.current;
    if let Some(next) = self.tokens.next(self.current) {
      self.current = next;
    }
    token
  }

  fn at_end(&self) -> bool {
    self.current().is_eof()
  }

  fn consume_keyword(&mut self, keyword: Keyword) -> bool {
    if self.current().is_keyword(keyword) {
      self.advance();
      true
    } else {
      false
    }
  }

  fn consume_punctuator(&mut self, punctuator: Punctuator) -> bool {
    if self.current().is_punctuator(punctuator) {
      self.advance();
      true
    } else {
      false
    }
  }

  fn expect(&mut self, kind: TokenKind, error: Error) -> Result<&'tokens Token, Error> {
    let token = self.current();
    if token.is(kind) {
      self.advance();
      Ok(token)
    } else {
      Err(error)
    }
  }

  fn nest<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T, Error>) -> Result<T, Error> {
    if self.depth >= MAX_NESTING_DEPTH {
      return Err(Error::TooDeeplyNested);
    }

    self.depth += 1;
    let result = parse(self);
    self.depth -= 1;

    result
  }

  /// Where a failure is reported. Errors worded "after this token" point at
  /// the token before the one that was rejected.
  fn error_token(&self, error: &Error) -> TokenId {
    match error {
      Error::ExpectedExpression | Error::ExpectedThen => {
        self.tokens.prev(self.current).unwrap_or(self.current)
      }
      Error::UnterminatedIf { start } | Error::UnterminatedFunction { start } => *start,
      _ => self.current,
    }
  }

  fn program(&mut self) -> Result<Program, Error> {
    let mut program = Program::default();

    while !self.at_end() {
      if self.current().is_keyword(Keyword::Function) {
        let function = self.function()?;
        program.functions.push(function);
      } else {
        let statement = self.statement()?;
        program.statements.push(statement);
      }
    }

    Ok(program)
  }

  fn function(&mut self) -> Result<Function, Error> {
    let start = self.advance();

    let name = self
      .expect(TokenKind::Identifier, Error::ExpectedIdentifier)?
      .name;
    self.expect(
      TokenKind::Bracket(Bracket::Round, true),
      Error::ExpectedOpeningBracket,
    )?;

    let mut parameters: Vec<StringId> = Vec::new();
    while self.current().is(TokenKind::Identifier) {
      parameters.push(self.current().name);
      self.advance();

      if !self.consume_punctuator(Punctuator::Comma) {
        break;
      }
    }
    self.expect(
      TokenKind::Bracket(Bracket::Round, false),
      Error::ExpectedClosingBracket,
    )?;

    let body = self.scope()?;
    if !self.consume_keyword(Keyword::End) {
      return Err(Error::UnterminatedFunction { start });
    }

    Ok(Function {
      token: start,
      name,
      parameters,
      body: if body.body.is_empty() { None } else { Some(body) },
    })
  }

  fn statement(&mut self) -> StatementResult {
    let token = self.current;

    let statement = match self.current().kind {
      TokenKind::Keyword(Keyword::If) => {
        self.advance();
        statement!(If(self.nest(|parser| parser.if_statement(token))?), token)
      }
      TokenKind::Keyword(
        Keyword::For
        | Keyword::While
        | Keyword::Repeat
        | Keyword::Until
        | Keyword::Do
        | Keyword::Break
        | Keyword::Return,
      ) => return Err(Error::UnsupportedStatement),
      TokenKind::Keyword(Keyword::End | Keyword::Else | Keyword::Elseif | Keyword::Then) => {
        return Err(Error::UnexpectedToken)
      }
      _ => self.expression_statement()?,
    };

    self.consume_punctuator(Punctuator::Semicolon);
    Ok(statement)
  }

  fn scope(&mut self) -> Result<Scope, Error> {
    let token = self.current;
    let mut body = Vec::new();

    while !self.at_end()
      && !matches!(
        self.current().kind,
        TokenKind::Keyword(Keyword::End | Keyword::Else | Keyword::Elseif)
      )
    {
      body.push(self.statement()?);
    }

    Ok(Scope { token, body })
  }

  fn if_statement(&mut self, start: TokenId) -> Result<If, Error> {
    let condition = self.expression()?;

    if !self.consume_keyword(Keyword::Then) {
      return Err(Error::ExpectedThen);
    }

    let then = self.scope()?;
    let mut elseif = None;
    let mut otherwise = None;

    match self.current().kind {
      TokenKind::Keyword(Keyword::Elseif) => {
        let token = self.advance();
        elseif = Some(Box::new(self.nest(|parser| parser.if_statement(token))?));
      }
      TokenKind::Keyword(Keyword::Else) => {
        self.advance();
        otherwise = Some(self.scope()?);

        if !self.consume_keyword(Keyword::End) {
          return Err(if self.at_end() {
            Error::UnterminatedIf { start }
          } else {
            Error::UnexpectedToken
          });
        }
      }
      TokenKind::Keyword(Keyword::End) => {
        self.advance();
      }
      _ => return Err(Error::UnterminatedIf { start }),
    }

    Ok(If {
      token: start,
      condition,
      then,
      elseif,
      otherwise,
    })
  }

  fn expression_statement(&mut self) -> StatementResult {
    let token = self.current;
    let expression = self.expression()?;

    let assignment = match self.current().kind {
      TokenKind::Operator(Operator::Assign) => Some(None),
      TokenKind::Operator(operator) => BinaryOperator::from_assignment(operator).map(Some),
      _ => None,
    };

    if let Some(operator) = assignment {
      self.advance();
      let value = self.expression()?;

      return Ok(statement!(
        Assign {
          destination: expression,
          operator,
          value,
        },
        token
      ));
    }

    Ok(statement!(Expression { expression }, token))
  }

  fn expression(&mut self) -> ExpressionResult {
    self.nest(|parser| parser.terms(Precedence::LOWEST))
  }

  fn binary_operator(&self, precedence: Precedence) -> Option<BinaryOperator> {
    BinaryOperator::from_token(self.current().kind)
      .filter(|operator| operator.precedence() == precedence)
  }

  fn terms(&mut self, precedence: Precedence) -> ExpressionResult {
    if precedence == Precedence::Primary {
      return self.primary();
    }

    let token = self.current;
    let base = self.terms(precedence.next())?;
    let mut terms = Vec::new();

    while let Some(operator) = self.binary_operator(precedence) {
      let operator_token = self.advance();
      let operand = self.terms(precedence.next())?;

      terms.push(Term {
        operator,
        token: operator_token,
        operand,
      });
    }

    if terms.is_empty() {
      Ok(base)
    } else {
      Ok(expression!(
        Terms {
          precedence,
          base: Box::new(base),
          terms,
        },
        token
      ))
    }
  }

  fn primary(&mut self) -> ExpressionResult {
    let token = self.current;
    let current = self.current();

    let atom = match current.kind {
      TokenKind::Literal(_) => {
        let object = self.literal(current.value)?;
        self.advance();
        expression!(Value { object }, token)
      }
      TokenKind::Keyword(keyword @ (Keyword::True | Keyword::False | Keyword::None)) => {
        self.advance();
        let object = match keyword {
          Keyword::True => Object::Bool(true),
          Keyword::False => Object::Bool(false),
          _ => Object::None,
        };
        expression!(Value { object }, token)
      }
      TokenKind::Identifier => {
        self.advance();
        expression!(Variable { name: current.name }, token)
      }
      TokenKind::Bracket(Bracket::Round, true) => {
        self.advance();
        let inner = self.expression()?;
        self.expect(
          TokenKind::Bracket(Bracket::Round, false),
          Error::ExpectedClosingBracket,
        )?;
        inner
      }
      _ => return Err(Error::ExpectedExpression),
    };

    if self.current().is_open(Bracket::Round) {
      self.call(atom)
    } else {
      Ok(atom)
    }
  }

  fn call(&mut self, functor: Expression) -> ExpressionResult {
    let token = functor.token;
    self.advance();

    let mut arguments = Vec::new();
    if !self.current().is_close(Bracket::Round) {
      loop {
        arguments.push(self.expression()?);

        if !self.consume_punctuator(Punctuator::Comma) {
          break;
        }
      }
    }

    self.expect(
      TokenKind::Bracket(Bracket::Round, false),
      Error::ExpectedClosingBracket,
    )?;

    Ok(expression!(
      Call {
        functor: Box::new(functor),
        arguments,
      },
      token
    ))
  }

  fn literal(&self, value: TokenValue) -> Result<Object, Error> {
    match value {
      TokenValue::I32(value) => Ok(Object::Int32(value)),
      TokenValue::U32(value) => Ok(Object::UInt32(value)),
      TokenValue::Float(value) => Ok(Object::Float(value)),
      TokenValue::Str(id) => Ok(Object::Str(id)),
      TokenValue::I64(_) | TokenValue::U64(_) => Err(Error::UnsupportedLiteral),
      TokenValue::None => Err(Error::ExpectedExpression),
    }
  }
}

/// Parses a lexed token stream.
///
/// On failure a single diagnostic describing the first failing item is
/// appended and no program is returned.
pub fn parse(
  tokens: &TokenStream,
  names: &Interner,
  diagnostics: &mut Vec<Diagnostic>,
) -> Option<Program> {
  if tokens.is_empty() {
    return Some(Program::default());
  }

  let mut parser = Parser::new(tokens);

  match parser.program() {
    Ok(program) => {
      tracing::trace!(
        statements = program.statements.len(),
        functions = program.functions.len(),
        "parsed program"
      );
      Some(program)
    }
    Err(error) => {
      let token = tokens.get(parser.error_token(&error));
      diagnostics.push(error.get_diagnostic(names, token));
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{intern::LiteralPool, lexer::tokenize};

  struct Parsed {
    program: Option<Program>,
    names: Interner,
    diagnostics: Vec<Diagnostic>,
  }

  fn parse(source: &str) -> Parsed {
    let mut names = Interner::new();
    let mut literals = LiteralPool::new();
    let mut diagnostics = Vec::new();
    let tokens = tokenize(source, &mut names, &mut literals, &mut diagnostics);
    let program = super::parse(&tokens, &names, &mut diagnostics);

    Parsed {
      program,
      names,
      diagnostics,
    }
  }

  fn statements(source: &str) -> Vec<Statement> {
    let parsed = parse(source);
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    parsed.program.map(|program| program.statements).unwrap_or_default()
  }

  fn unwrap_expression(statement: &Statement) -> &Expr {
    if let Stmt::Expression { expression } = &statement.stmt {
      &expression.expr
    } else {
      panic!("Expected expression");
    }
  }

  fn first_error(source: &str) -> Diagnostic {
    let parsed = parse(source);
    assert!(parsed.program.is_none());
    parsed.diagnostics[0].clone()
  }

  #[test]
  fn should_parse_empty_program() {
    let parsed = parse("");
    assert!(parsed.program.is_some_and(|program| program.is_empty()));

    let parsed = parse("-- only a comment");
    assert!(parsed.program.is_some_and(|program| program.is_empty()));
  }

  #[test]
  fn should_flatten_same_precedence_chain() {
    let statements = statements("a + b - c + d");
    assert_eq!(statements.len(), 1);

    match unwrap_expression(&statements[0]) {
      Expr::Terms {
        precedence,
        base,
        terms,
      } => {
        assert_eq!(*precedence, Precedence::Additive);
        assert!(matches!(base.expr, Expr::Variable { .. }));
        let operators: Vec<_> = terms.iter().map(|term| term.operator).collect();
        assert_eq!(
          operators,
          vec![
            BinaryOperator::Add,
            BinaryOperator::Subtract,
            BinaryOperator::Add
          ]
        );
      }
      _ => panic!("Expected terms"),
    }
  }

  #[test]
  fn should_nest_higher_precedence() {
    let statements = statements("a + b * c");

    match unwrap_expression(&statements[0]) {
      Expr::Terms { terms, .. } => {
        assert_eq!(terms.len(), 1);
        assert!(matches!(
          terms[0].operand.expr,
          Expr::Terms {
            precedence: Precedence::Multiplicative,
            ..
          }
        ));
      }
      _ => panic!("Expected terms"),
    }
  }

  #[test]
  fn should_keep_groups_nested() {
    let statements = statements("(a + b) + c");

    match unwrap_expression(&statements[0]) {
      Expr::Terms { base, terms, .. } => {
        assert_eq!(terms.len(), 1);
        assert!(matches!(
          base.expr,
          Expr::Terms {
            precedence: Precedence::Additive,
            ..
          }
        ));
      }
      _ => panic!("Expected terms"),
    }
  }

  #[test]
  fn should_parse_both_logical_spellings_at_one_level() {
    let statements = statements("a or b || c and d");

    match unwrap_expression(&statements[0]) {
      Expr::Terms {
        precedence, terms, ..
      } => {
        assert_eq!(*precedence, Precedence::LogicalOr);
        assert_eq!(terms.len(), 2);
      }
      _ => panic!("Expected terms"),
    }
  }

  #[test]
  fn should_parse_assignment() {
    let statements = statements("speed = 1.5");

    match &statements[0].stmt {
      Stmt::Assign {
        destination,
        operator,
        value,
      } => {
        assert!(matches!(destination.expr, Expr::Variable { .. }));
        assert_eq!(*operator, None);
        assert!(matches!(
          value.expr,
          Expr::Value {
            object: Object::Float(_)
          }
        ));
      }
      _ => panic!("Expected assignment"),
    }
  }

  #[test]
  fn should_parse_compound_assignment() {
    let statements = statements("x += 2; y <<= 1");
    assert_eq!(statements.len(), 2);

    match &statements[1].stmt {
      Stmt::Assign { operator, .. } => assert_eq!(*operator, Some(BinaryOperator::LeftShift)),
      _ => panic!("Expected assignment"),
    }
  }

  #[test]
  fn should_parse_call_arguments() {
    let parsed = parse("notify('a', 1, x + 1)");
    let statements = parsed.program.map(|p| p.statements).unwrap_or_default();

    match unwrap_expression(&statements[0]) {
      Expr::Call { functor, arguments } => {
        match functor.expr {
          Expr::Variable { name } => assert_eq!(parsed.names.resolve(name), "notify"),
          _ => panic!("Expected variable"),
        }
        assert_eq!(arguments.len(), 3);
      }
      _ => panic!("Expected call"),
    }

    let statements = self::statements("on_enabled()");
    assert!(matches!(
      unwrap_expression(&statements[0]),
      Expr::Call { arguments, .. } if arguments.is_empty()
    ));
  }

  #[test]
  fn should_parse_if_elseif_else() {
    let statements = statements(
      "if a then x = 1 elseif b then x = 2 elseif c then x = 3 else x = 4 end",
    );
    assert_eq!(statements.len(), 1);

    let Stmt::If(statement) = &statements[0].stmt else {
      panic!("Expected if");
    };
    assert_eq!(statement.then.body.len(), 1);
    assert!(statement.otherwise.is_none());

    let second = statement.elseif.as_ref().expect("first elseif");
    let third = second.elseif.as_ref().expect("second elseif");
    assert!(third.elseif.is_none());
    assert_eq!(third.otherwise.as_ref().map(|s| s.body.len()), Some(1));
  }

  #[test]
  fn should_parse_empty_if() {
    let statements = statements("if true then end");

    let Stmt::If(statement) = &statements[0].stmt else {
      panic!("Expected if");
    };
    assert!(statement.then.body.is_empty());
  }

  #[test]
  fn should_parse_function_declaration() {
    let parsed = parse("function boost(a, b) a = b end x = 1");
    let program = parsed.program.expect("program");

    assert_eq!(program.functions.len(), 1);
    assert_eq!(program.statements.len(), 1);

    let function = &program.functions[0];
    assert_eq!(parsed.names.resolve(function.name), "boost");
    assert_eq!(function.parameters.len(), 2);
    assert!(function.body.is_some());
  }

  #[test]
  fn should_error_on_missing_then() {
    let error = first_error("if a x = 1 end");

    assert_eq!(error.title, "Expected 'then'");
    assert_eq!(error.column, 4);
  }

  #[test]
  fn should_error_on_unterminated_if() {
    let error = first_error("x = 1\nif a then x = 2");

    assert_eq!(error.title, "Unterminated If Statement");
    assert_eq!(error.line, 2);
    assert_eq!(error.column, 1);
  }

  #[test]
  fn should_error_on_missing_expression() {
    let error = first_error("x = ");

    assert_eq!(error.title, "Expected Expression");
    assert_eq!(error.column, 3);
  }

  #[test]
  fn should_error_on_unclosed_call() {
    let error = first_error("notify(1, 2");
    assert_eq!(error.title, "Expected ')'");
    assert_eq!(error.message, "but reached the end of the file");
  }

  #[test]
  fn should_reject_loop_statements() {
    for source in ["while true do end", "return 1", "break", "for i = 1, 2 do end"] {
      let error = first_error(source);
      assert_eq!(error.title, "Unsupported Statement");
    }
  }

  #[test]
  fn should_reject_stray_end() {
    let error = first_error("x = 1 end");
    assert_eq!(error.title, "Unexpected Token");
  }

  #[test]
  fn should_reject_64_bit_literals() {
    let error = first_error("x = 10LL");
    assert_eq!(error.title, "Unsupported Literal");
    assert_eq!(error.column, 5);
  }

  #[test]
  fn should_stop_at_deeply_nested_brackets() {
    let depth = 1000;
    let source = format!("x = {}1{}", "(".repeat(depth), ")".repeat(depth));
    let error = first_error(&source);

    assert_eq!(error.title, "Too Deeply Nested");
    assert_eq!(error.line, 1);
  }

  #[test]
  fn should_stop_at_long_elseif_chains() {
    let mut source = String::from("if a then x = 0");
    for i in 0..1000 {
      source.push_str(&format!("\nelseif a then x = {i}"));
    }
    source.push_str("\nend");

    let error = first_error(&source);
    assert_eq!(error.title, "Too Deeply Nested");
  }

  #[test]
  fn should_allow_moderate_nesting() {
    let source = format!("x = {}1{}", "(".repeat(30), ")".repeat(30));
    assert!(parse(&source).program.is_some());
  }

  #[test]
  fn should_report_only_first_failure() {
    let parsed = parse("x = \ny = ");
    assert!(parsed.program.is_none());
    assert_eq!(parsed.diagnostics.len(), 1);
  }
}
