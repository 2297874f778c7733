/// Everything a script can reach outside itself.
///
/// Builtin calls are the only way scripts touch the host, and each builtin is
/// backed by exactly one method here. The entry lifecycle uses the last two
/// methods when a script faults.
pub trait Host {
  /// Reads a float from target memory, `None` if the read failed.
  fn read_float(&mut self, address: u32) -> Option<f32>;
  fn write_float(&mut self, address: u32, value: f32) -> bool;
  /// Whether every key in the mask is currently held.
  fn is_key_pressed(&mut self, keys: u32) -> bool;
  fn check_address(&mut self, address: u32) -> bool;
  fn notify(&mut self, message: &str);
  /// Whether the entry was switched on since the previous frame.
  fn was_just_activated(&mut self) -> bool;

  fn disable_entry(&mut self) {}
  fn abandon_session(&mut self) {}
}

/// A host with no memory, no input and nowhere to send notifications.
pub struct Empty;
impl Host for Empty {
  fn read_float(&mut self, _: u32) -> Option<f32> {
    None
  }
  fn write_float(&mut self, _: u32, _: f32) -> bool {
    false
  }
  fn is_key_pressed(&mut self, _: u32) -> bool {
    false
  }
  fn check_address(&mut self, _: u32) -> bool {
    false
  }
  fn notify(&mut self, _: &str) {}
  fn was_just_activated(&mut self) -> bool {
    false
  }
}
