mod ast;
mod diagnostics;
mod tokens;

fn remove_carriage_returns(value: &str) -> String {
  str::replace(value, "\r", "")
}

pub use ast::print as ast;
pub use diagnostics::{diagnostic, error_message, runtime_error, warning_message};
pub use tokens::print as tokens;
