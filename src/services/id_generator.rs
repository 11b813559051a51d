//! Bookmark identifier generation
//!
//! An identifier is 25 ASCII digits: wall-clock milliseconds zero-padded to
//! 15 digits, followed by a per-process sequence counter zero-padded to 10
//! digits. Identifiers from one generator sort lexicographically in the
//! order they were produced.

use std::sync::Mutex;

use chrono::Utc;

/// Process-scoped identifier source.
///
/// The counter starts at zero when the generator is constructed and is never
/// persisted. Ordering across restarts rests on the timestamp digits alone.
#[derive(Debug, Default)]
pub struct IdGenerator {
    state: Mutex<GeneratorState>,
}

#[derive(Debug, Default)]
struct GeneratorState {
    last_ms: i64,
    counter: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next identifier, using the current wall clock.
    pub fn next_id(&self) -> String {
        self.next_at(Utc::now().timestamp_millis())
    }

    /// Next identifier for the given wall-clock reading.
    ///
    /// A reading older than the last one is clamped to the last one, so a
    /// clock step backwards never breaks ordering.
    pub fn next_at(&self, now_ms: i64) -> String {
        // 时间戳与计数器必须一起推进，否则并发调用可能交错
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.last_ms = state.last_ms.max(now_ms.max(0));
        let counter = state.counter;
        state.counter = state.counter.wrapping_add(1);
        format_id(state.last_ms, counter)
    }
}

fn format_id(ms: i64, counter: u64) -> String {
    format!("{:015}{:010}", ms, counter % 10_000_000_000)
}
