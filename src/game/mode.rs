use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// one long countdown for the whole round
    #[strum(to_string = "Timed round")]
    TimedRound,
    /// a short countdown for every word
    #[strum(to_string = "Timed word")]
    TimedWord,
}

impl GameMode {
    /// Round length applied whenever this mode is selected.
    pub fn default_length(self) -> RoundLength {
        match self {
            GameMode::TimedRound => RoundLength::from_secs(60),
            GameMode::TimedWord => RoundLength::from_secs(10),
        }
    }

    pub fn next(self) -> Self {
        match self {
            GameMode::TimedRound => GameMode::TimedWord,
            GameMode::TimedWord => GameMode::TimedRound,
        }
    }

    pub fn previous(self) -> Self {
        // only two modes, so both directions land on the other one
        self.next()
    }
}

/// Positive number of seconds a countdown starts from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundLength(NonZeroU32);

impl RoundLength {
    pub fn new(secs: u32) -> Option<Self> {
        NonZeroU32::new(secs).map(Self)
    }

    fn from_secs(secs: u32) -> Self {
        Self(NonZeroU32::new(secs).unwrap_or(NonZeroU32::MIN))
    }

    pub fn secs(self) -> u32 {
        self.0.get()
    }
}

/// Whether showing a new word puts the countdown back to the full round length.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerRules {
    pub timed_round_resets: bool,
    pub timed_word_resets: bool,
}

impl Default for TimerRules {
    fn default() -> Self {
        Self {
            timed_round_resets: false,
            timed_word_resets: true,
        }
    }
}

impl TimerRules {
    pub fn resets_on_new_word(&self, mode: GameMode) -> bool {
        match mode {
            GameMode::TimedRound => self.timed_round_resets,
            GameMode::TimedWord => self.timed_word_resets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lengths() {
        assert_eq!(GameMode::TimedRound.default_length().secs(), 60);
        assert_eq!(GameMode::TimedWord.default_length().secs(), 10);
    }

    #[test]
    fn test_mode_cycling() {
        assert_eq!(GameMode::TimedRound.next(), GameMode::TimedWord);
        assert_eq!(GameMode::TimedWord.next(), GameMode::TimedRound);
        assert_eq!(GameMode::TimedWord.previous(), GameMode::TimedRound);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(GameMode::TimedRound.to_string(), "Timed round");
        assert_eq!(GameMode::TimedWord.to_string(), "Timed word");
    }

    #[test]
    fn test_mode_serde_names() {
        let json = serde_json::to_string(&GameMode::TimedWord).unwrap();
        assert_eq!(json, "\"timed-word\"");
        let mode: GameMode = serde_json::from_str("\"timed-round\"").unwrap();
        assert_eq!(mode, GameMode::TimedRound);
    }

    #[test]
    fn test_round_length_rejects_zero() {
        assert!(RoundLength::new(0).is_none());
        assert_eq!(RoundLength::new(45).map(RoundLength::secs), Some(45));
    }

    #[test]
    fn test_default_timer_rules() {
        let rules = TimerRules::default();
        assert!(!rules.resets_on_new_word(GameMode::TimedRound));
        assert!(rules.resets_on_new_word(GameMode::TimedWord));
    }

    #[test]
    fn test_timer_rules_partial_json_uses_defaults() {
        let rules: TimerRules = serde_json::from_str(r#"{ "timed_round_resets": true }"#).unwrap();
        assert!(rules.resets_on_new_word(GameMode::TimedRound));
        assert!(rules.resets_on_new_word(GameMode::TimedWord));
    }
}
