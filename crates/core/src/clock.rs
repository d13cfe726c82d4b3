//! Frame clock: turns host timestamps into update deltas.

/// Tracks the previous frame timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    last_ms: Option<u64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous call.
    ///
    /// The first call has no reference point and returns 0. A timestamp older
    /// than the previous one also yields 0; deltas are clamped to `u32`.
    pub fn delta(&mut self, now_ms: u64) -> u32 {
        let delta = match self.last_ms {
            Some(last) => now_ms.saturating_sub(last),
            None => 0,
        };
        self.last_ms = Some(now_ms.max(self.last_ms.unwrap_or(0)));
        u32::try_from(delta).unwrap_or(u32::MAX)
    }

    /// Forget the previous timestamp (e.g. after the host was suspended).
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
