use zlua_syntax::{
  ast::{Expr, Expression, Function, If, Scope, Statement, Stmt},
  Object, SourceFile,
};

pub fn print(source: &SourceFile) {
  let Some(program) = source.program() else {
    return;
  };

  println!("  ╭─[Abstract Syntax Tree]");
  for function in &program.functions {
    print_function(source, function, "  ├─ ", "  │  ");
  }
  for statement in &program.statements {
    print_statement(source, statement, "  ├─ ", "  │  ");
  }
  println!("──╯");
}

fn print_function(source: &SourceFile, function: &Function, prefix: &str, prefix_raw: &str) {
  let names = source.names();
  let parameters = function
    .parameters
    .iter()
    .map(|parameter| names.resolve(*parameter))
    .collect::<Vec<_>>()
    .join(", ");

  println!(
    "{prefix}Function {}({parameters})",
    names.resolve(function.name)
  );
  if let Some(body) = &function.body {
    print_scope(source, body, &format!("{prefix_raw}╰─ "), &format!("{prefix_raw}   "));
  }
}

fn print_expression(source: &SourceFile, expression: &Expression, prefix: &str, prefix_raw: &str) {
  let prefix_start = &format!("{prefix_raw}╰─ ");
  let prefix_blank = &format!("{prefix_raw}   ");
  let prefix_list_inline_start = &format!("{prefix_raw}├─ ");
  let prefix_list_inline = &format!("{prefix_raw}│  ");

  match &expression.expr {
    Expr::Value { object } => match object {
      Object::Str(_) => println!("{prefix}Value ('{}')", object.display(source.literals())),
      _ => println!("{prefix}Value ({})", object.display(source.literals())),
    },
    Expr::Variable { name } => println!("{prefix}Variable ({})", source.names().resolve(*name)),
    Expr::Call { functor, arguments } => {
      println!("{prefix}Call");

      if arguments.is_empty() {
        print_expression(source, functor, prefix_start, prefix_blank);
      } else {
        print_expression(source, functor, prefix_list_inline_start, prefix_list_inline);
        println!("{prefix_start}Arguments");

        let prefix_argument_start = &format!("{prefix_blank}├─ ");
        let prefix_argument = &format!("{prefix_blank}│  ");
        let prefix_last_start = &format!("{prefix_blank}╰─ ");
        let prefix_last = &format!("{prefix_blank}   ");

        if let Some((last, arguments)) = arguments.split_last() {
          for argument in arguments {
            print_expression(source, argument, prefix_argument_start, prefix_argument);
          }
          print_expression(source, last, prefix_last_start, prefix_last);
        }
      }
    }
    Expr::Terms {
      precedence,
      base,
      terms,
    } => {
      println!("{prefix}Terms ({precedence})");
      print_expression(source, base, prefix_list_inline_start, prefix_list_inline);

      if let Some((last, terms)) = terms.split_last() {
        for term in terms {
          print_expression(
            source,
            &term.operand,
            &format!("{prefix_raw}├─ {} ", term.operator),
            prefix_list_inline,
          );
        }
        print_expression(
          source,
          &last.operand,
          &format!("{prefix_raw}╰─ {} ", last.operator),
          prefix_blank,
        );
      }
    }
  }
}

fn print_scope(source: &SourceFile, scope: &Scope, prefix: &str, prefix_raw: &str) {
  println!("{prefix}Scope");

  if let Some((last, statements)) = scope.body.split_last() {
    for statement in statements {
      print_statement(
        source,
        statement,
        &format!("{prefix_raw}├─ "),
        &format!("{prefix_raw}│  "),
      );
    }
    print_statement(
      source,
      last,
      &format!("{prefix_raw}╰─ "),
      &format!("{prefix_raw}   "),
    );
  }
}

fn print_if(source: &SourceFile, statement: &If, prefix: &str, prefix_raw: &str) {
  let prefix_list_start = &format!("{prefix_raw}│  ╰─ ");
  let prefix_list = &format!("{prefix_raw}│     ");
  let prefix_indented_start = &format!("{prefix_raw}   ╰─ ");
  let prefix_indented = &format!("{prefix_raw}      ");

  println!("{prefix}If");
  println!("{prefix_raw}├─ Condition");
  print_expression(source, &statement.condition, prefix_list_start, prefix_list);

  let has_more = statement.elseif.is_some() || statement.otherwise.is_some();
  if has_more {
    println!("{prefix_raw}├─ Then");
    print_scope(source, &statement.then, prefix_list_start, prefix_list);
  } else {
    println!("{prefix_raw}╰─ Then");
    print_scope(source, &statement.then, prefix_indented_start, prefix_indented);
  }

  if let Some(elseif) = &statement.elseif {
    print_if(
      source,
      elseif,
      &format!("{prefix_raw}╰─ Else"),
      &format!("{prefix_raw}   "),
    );
  } else if let Some(otherwise) = &statement.otherwise {
    println!("{prefix_raw}╰─ Else");
    print_scope(source, otherwise, prefix_indented_start, prefix_indented);
  }
}

fn print_statement(source: &SourceFile, statement: &Statement, prefix: &str, prefix_raw: &str) {
  let prefix_start = &format!("{prefix_raw}╰─ ");
  let prefix_blank = &format!("{prefix_raw}   ");
  let prefix_list_inline_start = &format!("{prefix_raw}├─ ");
  let prefix_list_inline = &format!("{prefix_raw}│  ");

  match &statement.stmt {
    Stmt::Assign {
      destination,
      operator,
      value,
    } => {
      match operator {
        Some(operator) => println!("{prefix}Assign ({operator}=)"),
        None => println!("{prefix}Assign (=)"),
      }
      print_expression(source, destination, prefix_list_inline_start, prefix_list_inline);
      print_expression(source, value, prefix_start, prefix_blank);
    }
    Stmt::Expression { expression } => {
      println!("{prefix}Expression");
      print_expression(source, expression, prefix_start, prefix_blank);
    }
    Stmt::If(statement) => print_if(source, statement, prefix, prefix_raw),
  }
}
