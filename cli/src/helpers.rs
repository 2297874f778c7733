use super::print;
use rustc_hash::FxHashMap as HashMap;
use std::fs;
use zlua_syntax::SourceFile;

pub fn get_filename(args: &clap::ArgMatches) -> Result<&str, ()> {
  if let Some(filename) = args.get_one::<String>("file") {
    Ok(filename)
  } else {
    print::error_message("No file specified");
    Err(())
  }
}

pub fn read_file(filename: &str) -> Result<String, ()> {
  if let Ok(file) = fs::read_to_string(filename) {
    if file.is_empty() {
      print::warning_message("File is empty");
    }

    Ok(file)
  } else {
    print::error_message("Problem reading file");
    Err(())
  }
}

/// Parses an integer written the way scripts write them: decimal, `0x` hex or
/// `0b` binary.
pub fn parse_integer(text: &str) -> Option<u32> {
  let text = text.trim();

  if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
    u32::from_str_radix(digits, 16).ok()
  } else if let Some(digits) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
    u32::from_str_radix(digits, 2).ok()
  } else {
    text.parse().ok()
  }
}

pub fn get_keys(args: &clap::ArgMatches) -> Result<u32, ()> {
  match args.get_one::<String>("keys") {
    None => Ok(0),
    Some(keys) => parse_integer(keys).ok_or_else(|| {
      print::error_message(&format!("Invalid key mask '{keys}'"));
    }),
  }
}

pub fn get_memory(args: &clap::ArgMatches) -> Result<HashMap<u32, f32>, ()> {
  let mut memory = HashMap::default();

  for cell in args.get_many::<String>("memory").into_iter().flatten() {
    let parsed = cell.split_once('=').and_then(|(address, value)| {
      Some((parse_integer(address)?, value.trim().parse::<f32>().ok()?))
    });

    match parsed {
      Some((address, value)) => {
        memory.insert(address, value);
      }
      None => {
        print::error_message(&format!("Invalid memory cell '{cell}', expected ADDRESS=VALUE"));
        return Err(());
      }
    }
  }

  Ok(memory)
}

/// Lexes and parses `source`, printing every diagnostic that comes up.
pub fn parse(source: &mut SourceFile) -> Result<(), ()> {
  let parsed = source.parse();

  for diagnostic in source.diagnostics() {
    print::diagnostic(source.name(), source.text(), diagnostic);
  }

  if parsed && source.diagnostics().is_empty() {
    Ok(())
  } else {
    Err(())
  }
}
