use crate::ring::Ring;

/// Capacity of the history and pid rings.
pub const RING_CAPACITY: usize = 15;

/// Per-session loop state, threaded explicitly through dispatch instead of
/// living in globals.
///
/// `history` records every accepted raw line; `pids` records the process id
/// of every spawned external command. Both are created once at startup with
/// fixed capacity and never resized.
#[derive(Debug)]
pub struct Session {
    pub history: Ring<String>,
    pub pids: Ring<u32>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            history: Ring::new(RING_CAPACITY),
            pids: Ring::new(RING_CAPACITY),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
