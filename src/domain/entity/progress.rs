use serde::Serialize;

/// How the progress ring moves as the percentage grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The ring fills up (clockwise).
    Filling,
    /// The ring drains (counter-clockwise).
    Emptying,
}

/// A progress percentage in `[0, 100]` together with its direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    percent: f64,
    direction: Direction,
}

impl Progress {
    /// Build a [`Progress`] from a ratio, clamping it into `[0, 1]`.
    pub fn from_ratio(ratio: f64, direction: Direction) -> Self {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        Self {
            percent: ratio * 100.0,
            direction,
        }
    }

    /// Build a [`Progress`] from `part / whole`.
    pub fn of(part: i64, whole: i64, direction: Direction) -> Self {
        if whole <= 0 {
            return Self::from_ratio(0.0, direction);
        }
        Self::from_ratio(part as f64 / whole as f64, direction)
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Format seconds as `m:ss`. Minutes are not padded and may exceed 59.
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
