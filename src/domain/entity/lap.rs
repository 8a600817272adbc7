use serde::Serialize;

/// Lap bookkeeping for AMRAP sessions. Each marker is the number of seconds
/// between two successive "round complete" taps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoundMarkers {
    laps: Vec<u64>,
    #[serde(skip)]
    last_elapsed: u64,
}

impl RoundMarkers {
    /// Creates an empty [`RoundMarkers`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a round finished at `elapsed` seconds into the session and
    /// return the lap time.
    pub fn mark(&mut self, elapsed: u64) -> u64 {
        let lap = elapsed.saturating_sub(self.last_elapsed);
        self.laps.push(lap);
        self.last_elapsed = elapsed;
        lap
    }

    /// Average lap time rounded half up to the nearest second, or zero when
    /// nothing has been marked.
    pub fn average(&self) -> u64 {
        let count = self.laps.len() as u64;
        if count == 0 {
            return 0;
        }
        let sum: u64 = self.laps.iter().sum();
        (2 * sum + count) / (2 * count)
    }

    pub fn count(&self) -> usize {
        self.laps.len()
    }

    pub fn laps(&self) -> &[u64] {
        &self.laps
    }
}
