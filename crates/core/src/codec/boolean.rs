use super::Codec;

/// How [`BoolAsInteger`] reads integers that are neither 0 nor 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegerDecodeRule {
    /// Only 1 and 0 decode
    Strict,
    /// Anything from 1 up is `true`, everything else `false`
    #[default]
    Nearest,
}

/// Stores booleans as `1`/`0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoolAsInteger {
    rule: IntegerDecodeRule,
}

impl BoolAsInteger {
    #[must_use]
    pub fn new(rule: IntegerDecodeRule) -> Self {
        Self { rule }
    }

    #[must_use]
    pub fn strict() -> Self {
        Self::new(IntegerDecodeRule::Strict)
    }

    #[must_use]
    pub fn nearest() -> Self {
        Self::new(IntegerDecodeRule::Nearest)
    }
}

impl Codec for BoolAsInteger {
    type Value = bool;
    type Stored = i64;

    fn encode(&self, value: &bool) -> Option<i64> {
        Some(i64::from(*value))
    }

    fn decode(&self, stored: &i64) -> Option<bool> {
        match self.rule {
            IntegerDecodeRule::Strict => match stored {
                1 => Some(true),
                0 => Some(false),
                _ => None,
            },
            IntegerDecodeRule::Nearest => Some(*stored >= 1),
        }
    }
}

/// Letter case applied to the built-in boolean words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextCase {
    #[default]
    Lowercase,
    Uppercase,
    Capitalized,
}

impl TextCase {
    fn apply(self, word: &str) -> String {
        match self {
            TextCase::Lowercase => word.to_lowercase(),
            TextCase::Uppercase => word.to_uppercase(),
            TextCase::Capitalized => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// Literal pair written by [`BoolAsString`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolStringFormat {
    /// `true` / `false`
    TrueFalse(TextCase),
    /// `yes` / `no`
    YesNo(TextCase),
    /// Caller supplied literals
    Custom {
        true_value: String,
        false_value: String,
        case_insensitive: bool,
    },
}

impl Default for BoolStringFormat {
    fn default() -> Self {
        BoolStringFormat::TrueFalse(TextCase::Lowercase)
    }
}

/// Stores booleans as text
///
/// The built-in formats decode any of `true`, `false`, `yes` and `no` in any
/// letter case, whichever pair they encode with. Custom literals only decode
/// their own pair. Surrounding whitespace is ignored when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoolAsString {
    format: BoolStringFormat,
}

impl BoolAsString {
    #[must_use]
    pub fn new(format: BoolStringFormat) -> Self {
        Self { format }
    }

    #[must_use]
    pub fn true_false(case: TextCase) -> Self {
        Self::new(BoolStringFormat::TrueFalse(case))
    }

    #[must_use]
    pub fn yes_no(case: TextCase) -> Self {
        Self::new(BoolStringFormat::YesNo(case))
    }

    /// Custom literals, matched case-insensitively
    #[must_use]
    pub fn custom(true_value: impl Into<String>, false_value: impl Into<String>) -> Self {
        Self::new(BoolStringFormat::Custom {
            true_value: true_value.into(),
            false_value: false_value.into(),
            case_insensitive: true,
        })
    }

    /// Custom literals, matched exactly
    #[must_use]
    pub fn custom_exact(true_value: impl Into<String>, false_value: impl Into<String>) -> Self {
        Self::new(BoolStringFormat::Custom {
            true_value: true_value.into(),
            false_value: false_value.into(),
            case_insensitive: false,
        })
    }

    #[must_use]
    pub fn format(&self) -> &BoolStringFormat {
        &self.format
    }
}

impl Codec for BoolAsString {
    type Value = bool;
    type Stored = String;

    fn encode(&self, value: &bool) -> Option<String> {
        let text = match &self.format {
            BoolStringFormat::TrueFalse(case) => case.apply(if *value { "true" } else { "false" }),
            BoolStringFormat::YesNo(case) => case.apply(if *value { "yes" } else { "no" }),
            BoolStringFormat::Custom {
                true_value,
                false_value,
                ..
            } => {
                if *value {
                    true_value.clone()
                } else {
                    false_value.clone()
                }
            }
        };
        Some(text)
    }

    fn decode(&self, stored: &String) -> Option<bool> {
        let text = stored.trim();
        match &self.format {
            BoolStringFormat::TrueFalse(_) | BoolStringFormat::YesNo(_) => {
                match text.to_lowercase().as_str() {
                    "true" | "yes" => Some(true),
                    "false" | "no" => Some(false),
                    _ => None,
                }
            }
            BoolStringFormat::Custom {
                true_value,
                false_value,
                case_insensitive,
            } => {
                let matches = |literal: &str| {
                    if *case_insensitive {
                        literal.trim().to_lowercase() == text.to_lowercase()
                    } else {
                        literal.trim() == text
                    }
                };
                if matches(true_value.as_str()) {
                    Some(true)
                } else if matches(false_value.as_str()) {
                    Some(false)
                } else {
                    None
                }
            }
        }
    }
}
