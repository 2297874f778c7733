use crate::{error::Fault, host::Host};
use itertools::Itertools;
use zlua_syntax::{LiteralPool, Object};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Builtin {
  ReadFloat,
  WriteFloat,
  IsPressed,
  CheckAddress,
  Notify,
  OnEnabled,
}

const BUILTINS: [(&str, Builtin); 6] = [
  ("readf", Builtin::ReadFloat),
  ("writef", Builtin::WriteFloat),
  ("is_pressed", Builtin::IsPressed),
  ("check_addr", Builtin::CheckAddress),
  ("notify", Builtin::Notify),
  ("on_enabled", Builtin::OnEnabled),
];

impl Builtin {
  pub fn from_name(name: &str) -> Option<Self> {
    BUILTINS
      .iter()
      .find(|(builtin, _)| *builtin == name)
      .map(|(_, builtin)| *builtin)
  }

  pub fn name(self) -> &'static str {
    BUILTINS
      .iter()
      .find(|(_, builtin)| *builtin == self)
      .map_or("", |(name, _)| name)
  }

  /// Number of arguments taken, `None` when any number is accepted.
  pub fn arity(self) -> Option<usize> {
    match self {
      Self::OnEnabled => Some(0),
      Self::ReadFloat | Self::IsPressed | Self::CheckAddress => Some(1),
      Self::WriteFloat => Some(2),
      Self::Notify => None,
    }
  }

  pub fn call(
    self,
    arguments: &[Object],
    literals: &LiteralPool,
    host: &mut dyn Host,
  ) -> Result<Object, Fault> {
    if let Some(expected) = self.arity() {
      if arguments.len() != expected {
        return Err(Fault::ArityMismatch {
          name: self.name(),
          expected,
          found: arguments.len(),
        });
      }
    }

    let result = match self {
      Self::ReadFloat => {
        let address = self.integer_argument(arguments, 0)?;
        Object::Float(host.read_float(address).unwrap_or(0.0))
      }
      Self::WriteFloat => {
        let address = self.integer_argument(arguments, 0)?;
        let value = self.float_argument(arguments, 1)?;
        Object::Bool(host.write_float(address, value))
      }
      Self::IsPressed => {
        let keys = self.integer_argument(arguments, 0)?;
        Object::Bool(keys != 0 && host.is_key_pressed(keys))
      }
      Self::CheckAddress => {
        let address = self.integer_argument(arguments, 0)?;
        Object::Bool(host.check_address(address))
      }
      Self::Notify => {
        let message = arguments
          .iter()
          .map(|argument| argument.display(literals))
          .join("");
        host.notify(&message);
        Object::None
      }
      Self::OnEnabled => Object::Bool(host.was_just_activated()),
    };

    Ok(result)
  }

  // Addresses and key masks are unsigned; signed integers are reinterpreted.
  #[allow(clippy::cast_sign_loss)]
  fn integer_argument(self, arguments: &[Object], position: usize) -> Result<u32, Fault> {
    match arguments[position] {
      Object::UInt32(value) => Ok(value),
      Object::Int32(value) => Ok(value as u32),
      other => Err(Fault::ArgumentType {
        name: self.name(),
        position,
        expected: "an integer",
        got: other.type_kind(),
      }),
    }
  }

  fn float_argument(self, arguments: &[Object], position: usize) -> Result<f32, Fault> {
    match arguments[position] {
      Object::Float(value) => Ok(value),
      other => Err(Fault::ArgumentType {
        name: self.name(),
        position,
        expected: "a float",
        got: other.type_kind(),
      }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::host::Empty;
  use zlua_syntax::{TypeKind, WideString};

  #[test]
  fn should_find_builtins_by_name() {
    assert_eq!(Builtin::from_name("readf"), Some(Builtin::ReadFloat));
    assert_eq!(Builtin::from_name("check_addr"), Some(Builtin::CheckAddress));
    assert_eq!(Builtin::from_name("Readf"), None);
    assert_eq!(Builtin::WriteFloat.name(), "writef");
  }

  #[test]
  fn should_check_arity() {
    let literals = LiteralPool::new();
    let result = Builtin::ReadFloat.call(&[], &literals, &mut Empty);

    assert_eq!(
      result,
      Err(Fault::ArityMismatch {
        name: "readf",
        expected: 1,
        found: 0
      })
    );
  }

  #[test]
  fn should_check_argument_types() {
    let literals = LiteralPool::new();
    let result = Builtin::WriteFloat.call(
      &[Object::UInt32(16), Object::Int32(1)],
      &literals,
      &mut Empty,
    );

    assert_eq!(
      result,
      Err(Fault::ArgumentType {
        name: "writef",
        position: 1,
        expected: "a float",
        got: TypeKind::Int32
      })
    );
  }

  #[test]
  fn should_not_press_empty_key_mask() {
    struct AllPressed;
    impl Host for AllPressed {
      fn read_float(&mut self, _: u32) -> Option<f32> {
        None
      }
      fn write_float(&mut self, _: u32, _: f32) -> bool {
        false
      }
      fn is_key_pressed(&mut self, _: u32) -> bool {
        true
      }
      fn check_address(&mut self, _: u32) -> bool {
        false
      }
      fn notify(&mut self, _: &str) {}
      fn was_just_activated(&mut self) -> bool {
        false
      }
    }

    let literals = LiteralPool::new();
    let mut host = AllPressed;

    assert_eq!(
      Builtin::IsPressed.call(&[Object::UInt32(0)], &literals, &mut host),
      Ok(Object::Bool(false))
    );
    assert_eq!(
      Builtin::IsPressed.call(&[Object::UInt32(4)], &literals, &mut host),
      Ok(Object::Bool(true))
    );
  }

  #[test]
  fn should_read_zero_on_failed_read() {
    let literals = LiteralPool::new();
    let result = Builtin::ReadFloat.call(&[Object::UInt32(8)], &literals, &mut Empty);

    assert_eq!(result, Ok(Object::Float(0.0)));
  }

  #[test]
  fn should_accept_any_number_of_notify_arguments() {
    let mut literals = LiteralPool::new();
    let prefix = literals.add(WideString::from("speed: "));

    for arguments in [vec![], vec![Object::Str(prefix), Object::Float(2.0)]] {
      let result = Builtin::Notify.call(&arguments, &literals, &mut Empty);
      assert_eq!(result, Ok(Object::None));
    }
  }
}
