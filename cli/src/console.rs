use rustc_hash::FxHashMap as HashMap;
use zlua_interpreter::Host;

/// Stands in for a game process when running scripts from a terminal.
///
/// Memory is a sparse map of float cells seeded from the command line; only
/// seeded addresses are readable or writable. The entry counts as freshly
/// activated on its first frame.
#[derive(Debug, Default)]
pub struct ConsoleHost {
  memory: HashMap<u32, f32>,
  keys: u32,
  frame: u32,
  abandoned: bool,
}

impl ConsoleHost {
  pub fn new(memory: HashMap<u32, f32>, keys: u32) -> Self {
    Self {
      memory,
      keys,
      ..Self::default()
    }
  }

  pub fn set_frame(&mut self, frame: u32) {
    self.frame = frame;
  }

  pub fn is_abandoned(&self) -> bool {
    self.abandoned
  }

  pub fn memory(&self) -> Vec<(u32, f32)> {
    let mut cells: Vec<_> = self.memory.iter().map(|(a, v)| (*a, *v)).collect();
    cells.sort_by_key(|(address, _)| *address);
    cells
  }
}

impl Host for ConsoleHost {
  fn read_float(&mut self, address: u32) -> Option<f32> {
    self.memory.get(&address).copied()
  }

  fn write_float(&mut self, address: u32, value: f32) -> bool {
    match self.memory.get_mut(&address) {
      Some(cell) => {
        tracing::debug!(address, value, "write");
        *cell = value;
        true
      }
      None => false,
    }
  }

  fn is_key_pressed(&mut self, keys: u32) -> bool {
    self.keys & keys == keys
  }

  fn check_address(&mut self, address: u32) -> bool {
    self.memory.contains_key(&address)
  }

  fn notify(&mut self, message: &str) {
    println!("{message}");
  }

  fn was_just_activated(&mut self) -> bool {
    self.frame == 0
  }

  fn disable_entry(&mut self) {
    tracing::info!(frame = self.frame, "script disabled");
  }

  fn abandon_session(&mut self) {
    tracing::warn!(frame = self.frame, "session abandoned");
    self.abandoned = true;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn should_only_write_seeded_addresses() {
    let mut host = ConsoleHost::new([(16, 1.0)].into_iter().collect(), 0);

    assert!(host.write_float(16, 2.0));
    assert!(!host.write_float(32, 2.0));
    assert_eq!(host.memory(), vec![(16, 2.0)]);
  }

  #[test]
  fn should_activate_on_first_frame_only() {
    let mut host = ConsoleHost::default();
    assert!(host.was_just_activated());

    host.set_frame(1);
    assert!(!host.was_just_activated());
  }

  #[test]
  fn should_need_every_key_in_mask() {
    let mut host = ConsoleHost::new(HashMap::default(), 0b101);

    assert!(host.is_key_pressed(0b100));
    assert!(host.is_key_pressed(0b101));
    assert!(!host.is_key_pressed(0b111));
  }
}
