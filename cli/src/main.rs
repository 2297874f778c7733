use clap::{Arg, ArgAction, Command};
use rustyline::error::ReadlineError;
use rustyline::Editor;
use std::process::ExitCode;
use tracing::Level;
use zlua_interpreter::{Entry, Evaluator};
use zlua_syntax::SourceFile;

mod console;
mod helpers;
mod print;

use console::ConsoleHost;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_logging(verbosity: u8) {
  let level = match verbosity {
    0 => Level::WARN,
    1 => Level::INFO,
    2 => Level::DEBUG,
    _ => Level::TRACE,
  };

  tracing_subscriber::fmt()
    .with_max_level(level)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(args: &clap::ArgMatches) -> Result<(), ()> {
  let filename = helpers::get_filename(args)?;
  let text = helpers::read_file(filename)?;
  let frames = args.get_one::<u32>("frames").copied().unwrap_or(1);
  let mut host = ConsoleHost::new(helpers::get_memory(args)?, helpers::get_keys(args)?);

  let mut entry = match Entry::load(filename, text.as_str()) {
    Ok(entry) => entry,
    Err(error) => {
      for diagnostic in error.diagnostics() {
        print::diagnostic(filename, &text, diagnostic);
      }
      print::error_message(&error.to_string());
      return Err(());
    }
  };

  for frame in 0..frames {
    host.set_frame(frame);

    if let Err(error) = entry.run_frame(&mut host) {
      print::runtime_error(filename, &text, &error);
      return Err(());
    }
  }

  let names = entry.source().names();
  for (name, value) in entry.evaluator().globals() {
    tracing::debug!(
      name = names.resolve(name),
      value = %value.display(entry.source().literals()),
      "global"
    );
  }
  for (address, value) in host.memory() {
    tracing::info!(address = %format!("{address:#x}"), value, "memory");
  }

  Ok(())
}

fn tokens(args: &clap::ArgMatches) -> Result<(), ()> {
  let filename = helpers::get_filename(args)?;
  let text = helpers::read_file(filename)?;
  let mut source = SourceFile::new(filename, text);

  source.lex();
  print::tokens(&source);

  for diagnostic in source.diagnostics() {
    print::diagnostic(source.name(), source.text(), diagnostic);
  }

  if source.diagnostics().is_empty() {
    Ok(())
  } else {
    Err(())
  }
}

fn ast(args: &clap::ArgMatches) -> Result<(), ()> {
  let filename = helpers::get_filename(args)?;
  let text = helpers::read_file(filename)?;
  let mut source = SourceFile::new(filename, text);

  helpers::parse(&mut source)?;
  print::ast(&source);

  Ok(())
}

fn repl() -> Result<(), ()> {
  let mut editor = match Editor::<()>::new() {
    Ok(editor) => editor,
    Err(error) => {
      print::error_message(&error.to_string());
      return Err(());
    }
  };

  let mut host = ConsoleHost::default();
  let mut evaluator = Evaluator::new();
  let mut source = SourceFile::default();
  let mut line_number = 0;

  loop {
    match editor.readline("> ") {
      Ok(line) => {
        editor.add_history_entry(line.as_str());
        line_number += 1;

        source = source.resume(format!("REPL:{line_number}"), line);
        if helpers::parse(&mut source).is_err() {
          continue;
        }

        if let Err(error) = evaluator.run(&source, &mut host) {
          print::runtime_error(source.name(), source.text(), &error);

          if host.is_abandoned() {
            break;
          }
        }
        host.set_frame(line_number);
      }
      Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
        break;
      }
      Err(err) => {
        println!("Error: {err:?}");
        break;
      }
    }
  }

  Ok(())
}

fn main() -> ExitCode {
  let file_arg = || Arg::new("file").help("The script file").required(true);

  let app = Command::new("zlua")
    .version(VERSION)
    .about("Run and inspect zlua scripts")
    .arg(
      Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Increase logging verbosity (-v info, -vv debug, -vvv trace)"),
    )
    .subcommand(
      Command::new("run")
        .about("Run a script for a number of frames")
        .arg(file_arg())
        .arg(
          Arg::new("frames")
            .long("frames")
            .value_parser(clap::value_parser!(u32))
            .default_value("1")
            .help("How many frames to run the script for"),
        )
        .arg(
          Arg::new("keys")
            .long("keys")
            .value_name("MASK")
            .help("Keys held down, as a bit mask"),
        )
        .arg(
          Arg::new("memory")
            .long("memory")
            .value_name("ADDRESS=VALUE")
            .action(ArgAction::Append)
            .help("Seed a float memory cell"),
        ),
    )
    .subcommand(
      Command::new("tokens")
        .about("Display the tokens of a script")
        .arg(file_arg()),
    )
    .subcommand(
      Command::new("ast")
        .about("Display the Abstract Syntax Tree of a script")
        .arg(file_arg()),
    )
    .get_matches();

  init_logging(app.get_count("verbose"));

  let result = match app.subcommand() {
    Some(("run", args)) => run(args),
    Some(("tokens", args)) => tokens(args),
    Some(("ast", args)) => ast(args),
    _ => {
      println!("zlua ({VERSION})");
      repl()
    }
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(()) => ExitCode::FAILURE,
  }
}
