use super::mode::{GameMode, RoundLength};

/// Mode and round length chosen on the setup screen. Survives between rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Configuration {
    pub mode: Option<GameMode>,
    pub round_length: Option<RoundLength>,
}

/// What a round-length text edit does to the configured length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthEdit {
    Clear,
    Keep,
    Set(RoundLength),
}

/// Interprets free-form round-length text.
///
/// Only a plain decimal number of seconds counts; anything else (signs,
/// whitespace, trailing letters, zero) leaves the length as it was.
pub fn parse_length_text(text: &str) -> LengthEdit {
    if text.is_empty() {
        return LengthEdit::Clear;
    }

    // u32's parser takes a leading '+'
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return LengthEdit::Keep;
    }
    match text.parse::<u32>().ok().and_then(RoundLength::new) {
        Some(length) => LengthEdit::Set(length),
        None => LengthEdit::Keep,
    }
}

impl Configuration {
    /// Choosing a mode always applies its default length, even over a manual override.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = Some(mode);
        self.round_length = Some(mode.default_length());
    }

    /// Returns false when the text was ignored.
    pub fn set_round_length_text(&mut self, text: &str) -> bool {
        match parse_length_text(text) {
            LengthEdit::Clear => {
                self.round_length = None;
                true
            }
            LengthEdit::Set(length) => {
                self.round_length = Some(length);
                true
            }
            LengthEdit::Keep => false,
        }
    }

    /// Both halves, when set.
    pub fn complete(&self) -> Option<(GameMode, RoundLength)> {
        self.mode.zip(self.round_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u32) -> Option<RoundLength> {
        RoundLength::new(n)
    }

    #[test]
    fn test_empty_text_clears_length() {
        let mut config = Configuration::default();
        config.set_mode(GameMode::TimedRound);

        assert!(config.set_round_length_text(""));
        assert_eq!(config.round_length, None);
        assert_eq!(config.mode, Some(GameMode::TimedRound));
    }

    #[test]
    fn test_numeric_text_replaces_length() {
        let mut config = Configuration::default();
        config.set_mode(GameMode::TimedRound);

        assert!(config.set_round_length_text("45"));
        assert_eq!(config.round_length, secs(45));
    }

    #[test]
    fn test_non_numeric_text_is_ignored() {
        let mut config = Configuration::default();
        config.set_mode(GameMode::TimedWord);

        for text in ["abc", "4x", " 45", "-3", "+5", "0", "1.5"] {
            assert!(!config.set_round_length_text(text), "{text:?} should be ignored");
            assert_eq!(config.round_length, secs(10));
        }
    }

    #[test]
    fn test_non_numeric_text_keeps_unset_length() {
        let mut config = Configuration::default();
        assert!(!config.set_round_length_text("abc"));
        assert_eq!(config.round_length, None);
    }

    #[test]
    fn test_mode_change_resets_override() {
        let mut config = Configuration::default();
        config.set_mode(GameMode::TimedRound);
        assert_eq!(config.round_length, secs(60));

        config.set_round_length_text("90");
        config.set_mode(GameMode::TimedWord);
        assert_eq!(config.round_length, secs(10));

        config.set_round_length_text("25");
        config.set_mode(GameMode::TimedWord);
        assert_eq!(config.round_length, secs(10));
    }

    #[test]
    fn test_complete_requires_both() {
        let mut config = Configuration::default();
        assert_eq!(config.complete(), None);

        config.set_mode(GameMode::TimedRound);
        assert!(config.complete().is_some());

        config.set_round_length_text("");
        assert_eq!(config.complete(), None);
    }

    #[test]
    fn test_parse_length_text() {
        assert_eq!(parse_length_text(""), LengthEdit::Clear);
        assert_eq!(parse_length_text("7"), LengthEdit::Set(RoundLength::new(7).unwrap()));
        assert_eq!(parse_length_text("seven"), LengthEdit::Keep);
        assert_eq!(parse_length_text("99999999999"), LengthEdit::Keep);
    }
}
