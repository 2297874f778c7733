mod builtins;
mod entry;
mod error;
mod evaluator;
mod host;
mod operators;

// Load a script and run it every frame
pub use entry::Entry;
pub use evaluator::Evaluator;

// What a script can call into
pub use builtins::Builtin;
pub use host::{Empty, Host};

pub use error::{Fault, LoadError, RuntimeError};
pub use operators::apply;
