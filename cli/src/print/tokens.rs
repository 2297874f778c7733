use super::remove_carriage_returns;
use zlua_syntax::{SourceFile, TokenKind, TokenValue};

pub fn print(source: &SourceFile) {
  let Some(tokens) = source.tokens() else {
    return;
  };
  let mut line = 0;

  println!("     ╭─[Tokens]");
  for token in tokens.iter() {
    if token.line == line {
      print!("     │ ");
    } else {
      print!("{:>4} │ ", token.line);
      line = token.line;
    }

    let spelling = source.names().resolve(token.name);
    match (token.kind, token.value) {
      (TokenKind::EndOfFile, _) => println!("EndOfFile"),
      (_, TokenValue::None) => println!("{:?} ({})", token.kind, remove_carriage_returns(spelling)),
      (_, TokenValue::Str(id)) => println!(
        "{:?} ({}) = '{}'",
        token.kind,
        remove_carriage_returns(spelling),
        source.literals().get(id).map(ToString::to_string).unwrap_or_default()
      ),
      (_, value) => println!("{:?} ({spelling}) = {value:?}", token.kind),
    }
  }
  println!("─────╯");
}
