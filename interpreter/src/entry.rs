use crate::{
  error::{LoadError, RuntimeError},
  evaluator::Evaluator,
  host::Host,
};
use zlua_syntax::{Object, SourceFile};

/// A loaded script, run once per host frame until it faults.
#[derive(Debug)]
pub struct Entry {
  source: SourceFile,
  evaluator: Evaluator,
  enabled: bool,
}

impl Entry {
  pub fn load(name: impl Into<String>, text: impl Into<String>) -> Result<Self, LoadError> {
    let mut source = SourceFile::new(name, text);

    if !source.lex() {
      return Err(LoadError::Tokenize {
        name: source.name().to_string(),
        diagnostics: source.diagnostics().to_vec(),
      });
    }

    if !source.parse() {
      return Err(LoadError::Parse {
        name: source.name().to_string(),
        diagnostics: source.diagnostics().to_vec(),
      });
    }

    tracing::debug!(name = source.name(), "loaded script");

    Ok(Self {
      source,
      evaluator: Evaluator::new(),
      enabled: true,
    })
  }

  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  /// Runs the script once. A disabled entry does nothing.
  ///
  /// On a fault the host is notified, the entry is disabled for good and the
  /// error is handed back. Fatal faults also abandon the host session.
  pub fn run_frame(&mut self, host: &mut dyn Host) -> Result<(), RuntimeError> {
    if !self.enabled {
      return Ok(());
    }

    let result = self.evaluator.run(&self.source, host);

    if let Err(error) = &result {
      tracing::error!(name = self.source.name(), %error, "disabling script");

      host.notify(&format!("Runtime error! {error}"));
      host.disable_entry();
      if error.fault.is_fatal() {
        host.abandon_session();
      }

      self.enabled = false;
    }

    result
  }

  pub fn source(&self) -> &SourceFile {
    &self.source
  }

  pub fn evaluator(&self) -> &Evaluator {
    &self.evaluator
  }

  pub fn get_global(&self, name: &str) -> Option<Object> {
    let name = self.source.names().get(name)?;
    self.evaluator.get_global(name)
  }
}
