use super::remove_carriage_returns;
use ariadne::{Label, Report, ReportKind, Source};
use std::ops::Range;
use zlua_interpreter::RuntimeError;
use zlua_syntax::Diagnostic;

fn red(text: &str) -> String {
  format!("\u{001b}[31m{text}\u{001b}[0m")
}

fn yellow(text: &str) -> String {
  format!("\u{001b}[33m{text}\u{001b}[0m")
}

fn bold(text: &str) -> String {
  format!("\u{001b}[1m{text}\u{001b}[0m")
}

pub fn error_message(message: &str) {
  eprintln!("{} {}", bold(&red("Error:")), bold(message));
}

pub fn warning_message(message: &str) {
  eprintln!("{} {}", bold(&yellow("Warning:")), bold(message));
}

// ariadne counts characters, spans count bytes
fn character_range(text: &str, start: usize, end: usize) -> Range<usize> {
  let start_char = text.get(..start).map_or(0, |prefix| prefix.chars().count());
  let length = text.get(start..end).map_or(0, |span| span.chars().count());

  start_char..start_char + length.max(1)
}

fn report(file: &str, text: &str, range: Range<usize>, title: &str, label: &str, note: &str) {
  let mut builder = Report::build(ReportKind::Error, file, range.start)
    .with_message(title)
    .with_label(Label::new((file, range)).with_message(label));

  if !note.is_empty() {
    builder = builder.with_note(note);
  }

  if builder
    .finish()
    .eprint((file, Source::from(text)))
    .is_err()
  {
    error_message(title);
  }
}

pub fn diagnostic(file: &str, text: &str, diagnostic: &Diagnostic) {
  let range = character_range(
    text,
    diagnostic.span.start as usize,
    diagnostic.span.end as usize,
  );

  report(
    file,
    text,
    range,
    &diagnostic.title,
    &remove_carriage_returns(&diagnostic.message),
    &format!("at line {}, column {}", diagnostic.line, diagnostic.column),
  );
}

pub fn runtime_error(file: &str, text: &str, error: &RuntimeError) {
  let start = text
    .split_inclusive('\n')
    .take(error.line.saturating_sub(1) as usize)
    .map(str::len)
    .sum::<usize>()
    + error.column.saturating_sub(1) as usize;
  let start = start.min(text.len());
  let end = text
    .get(start..)
    .and_then(|rest| rest.find(char::is_whitespace))
    .map_or(text.len(), |offset| start + offset);

  report(
    file,
    text,
    character_range(text, start, end),
    "Runtime Error",
    &error.fault.to_string(),
    if error.fault.is_fatal() {
      "the scripting session has been abandoned"
    } else {
      "the script has been disabled"
    },
  );
}
