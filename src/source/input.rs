//! Input text gating before a generation request is sent.

use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

/// Minimum number of characters (after trimming) worth generating from.
pub const MIN_INPUT_CHARS: usize = 50;

pub const FREE_TIER_MAX_WORDS: usize = 200;
pub const PAID_TIER_MAX_WORDS: usize = 1000;

/// Product tier controlling how much text a single request may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tier {
    Free,
    Paid,
    #[default]
    Unlimited,
}

impl Tier {
    pub fn max_words(self) -> Option<usize> {
        match self {
            Tier::Free => Some(FREE_TIER_MAX_WORDS),
            Tier::Paid => Some(PAID_TIER_MAX_WORDS),
            Tier::Unlimited => None,
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Tier::Free),
            "paid" => Ok(Tier::Paid),
            "unlimited" => Ok(Tier::Unlimited),
            other => Err(format!(
                "unknown tier '{}', expected free, paid or unlimited",
                other
            )),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Free => "free",
            Tier::Paid => "paid",
            Tier::Unlimited => "unlimited",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputPolicy {
    pub min_chars: usize,
    pub tier: Tier,
}

impl Default for InputPolicy {
    fn default() -> Self {
        Self::for_tier(Tier::default())
    }
}

impl InputPolicy {
    pub fn for_tier(tier: Tier) -> Self {
        Self {
            min_chars: MIN_INPUT_CHARS,
            tier,
        }
    }

    /// Returns the trimmed text when it may be sent for generation.
    pub fn validate<'a>(&self, text: &'a str) -> Result<&'a str, QuizError> {
        let trimmed = text.trim();

        let chars = trimmed.chars().count();
        if chars < self.min_chars {
            return Err(QuizError::InputTooShort {
                min: self.min_chars,
                actual: chars,
            });
        }

        if let Some(max) = self.tier.max_words() {
            let words = trimmed.split_whitespace().count();
            if words > max {
                return Err(QuizError::InputTooLong { max, actual: words });
            }
        }

        Ok(trimmed)
    }

    /// Whether the entry screen should allow submitting `text`.
    pub fn accepts(&self, text: &str) -> bool {
        self.validate(text).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short() {
        let text = "a".repeat(49);
        let err = InputPolicy::default().validate(&text).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InputTooShort {
                min: 50,
                actual: 49
            }
        ));
    }

    #[test]
    fn test_whitespace_is_trimmed_before_counting() {
        let text = format!("   {}   ", "b".repeat(49));
        assert!(InputPolicy::default().validate(&text).is_err());

        let text = format!("  {}\n", "b".repeat(50));
        assert_eq!(
            InputPolicy::default().validate(&text).unwrap(),
            "b".repeat(50)
        );
    }

    #[test]
    fn test_word_ceiling_per_tier() {
        let text = vec!["word"; 201].join(" ");

        let err = InputPolicy::for_tier(Tier::Free).validate(&text).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InputTooLong {
                max: 200,
                actual: 201
            }
        ));
        assert!(InputPolicy::for_tier(Tier::Paid).accepts(&text));
        assert!(InputPolicy::for_tier(Tier::Unlimited).accepts(&text));
    }

    #[test]
    fn test_parse_tier() {
        assert_eq!("Free".parse::<Tier>(), Ok(Tier::Free));
        assert_eq!(" paid ".parse::<Tier>(), Ok(Tier::Paid));
        assert!("gold".parse::<Tier>().is_err());
        assert_eq!(Tier::Unlimited.to_string(), "unlimited");
    }
}
