use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use snafu::prelude::*;

/// The kind of workout timer. Fixed for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TimerVariant {
    /// Every minute on the minute: a fixed interval repeated for some rounds.
    #[serde(rename = "EMOM")]
    Emom,
    /// As many rounds as possible: one countdown with user-marked laps.
    #[serde(rename = "AMRAP")]
    Amrap,
    /// An open-ended stopwatch.
    ForTime,
    /// Alternating work and rest intervals.
    Tabata,
}

impl TimerVariant {
    /// All variants in catalog order.
    pub const ALL: [TimerVariant; 4] = [Self::Emom, Self::Amrap, Self::ForTime, Self::Tabata];

    /// Returns the machine-readable name of this [`TimerVariant`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Emom => "EMOM",
            Self::Amrap => "AMRAP",
            Self::ForTime => "ForTime",
            Self::Tabata => "Tabata",
        }
    }
}

impl Display for TimerVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Emom => f.write_str("EMOM"),
            Self::Amrap => f.write_str("AMRAP"),
            Self::ForTime => f.write_str("For Time"),
            Self::Tabata => f.write_str("Tabata"),
        }
    }
}

impl FromStr for TimerVariant {
    type Err = ParseTimerVariantError;

    /// Parse a variant name case-insensitively. `HIIT` is an alias of
    /// [`TimerVariant::Tabata`], and the catalog timer kinds `interval`,
    /// `countdown` and `stopwatch` map to EMOM, AMRAP and For Time.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emom" | "interval" => Ok(Self::Emom),
            "amrap" | "countdown" => Ok(Self::Amrap),
            "fortime" | "for-time" | "for_time" | "for time" | "stopwatch" => Ok(Self::ForTime),
            "tabata" | "hiit" => Ok(Self::Tabata),
            _ => UnknownSnafu { name: s }.fail(),
        }
    }
}

impl TryFrom<String> for TimerVariant {
    type Error = ParseTimerVariantError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An error type of parsing a [`TimerVariant`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseTimerVariantError {
    #[snafu(display("Unknown timer kind {name:?}, expected one of EMOM, AMRAP, ForTime, Tabata"))]
    #[non_exhaustive]
    Unknown { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_from_str() {
        assert_eq!("EMOM".parse(), Ok(TimerVariant::Emom));
        assert_eq!("amrap".parse(), Ok(TimerVariant::Amrap));
        assert_eq!("For-Time".parse(), Ok(TimerVariant::ForTime));
        assert_eq!(" tabata ".parse(), Ok(TimerVariant::Tabata));
        assert!("yoga".parse::<TimerVariant>().is_err());
    }

    #[test]
    fn variant_aliases() {
        assert_eq!("HIIT".parse(), Ok(TimerVariant::Tabata));
        assert_eq!("interval".parse(), Ok(TimerVariant::Emom));
        assert_eq!("countdown".parse(), Ok(TimerVariant::Amrap));
        assert_eq!("stopwatch".parse(), Ok(TimerVariant::ForTime));
    }

    #[test]
    fn variant_serde() {
        let variant: TimerVariant = serde_json::from_value(serde_json::json!("hiit")).unwrap();
        assert_eq!(variant, TimerVariant::Tabata);
        assert_eq!(
            serde_json::to_value(TimerVariant::Emom).unwrap(),
            serde_json::json!("EMOM")
        );
        assert_eq!(
            serde_json::to_value(TimerVariant::ForTime).unwrap(),
            serde_json::json!("ForTime")
        );
    }

    #[test]
    fn variant_names() {
        for variant in TimerVariant::ALL {
            assert_eq!(variant.name().parse(), Ok(variant));
        }
        assert_eq!(TimerVariant::ForTime.to_string(), "For Time");
    }
}
