//! Recovering value kinds from number boxes
//!
//! Parsed formats hand back every number in a [`NumberBox`]. The box keeps
//! the storage width tag its producer recorded, and that tag is the only
//! signal left about what kind the number used to be:
//!
//! | tag        | candidates                       | classified as          |
//! |------------|----------------------------------|------------------------|
//! | `Char`     | boolean, `i8`                    | `Bool` if boolean-marked, else `Int` |
//! | `Short`    | `u8`, `i16`                      | `Int`                  |
//! | `Int`      | `u16`, `i32`                     | `Int`                  |
//! | `LongLong` | `i64`, `u32`, `u64`              | `Int` when it fits `i64` |
//! | `Float`    | `f32`                            | `F32`                  |
//! | `Double`   | `f64`                            | `F64`                  |
//!
//! A `Char` box holding 0 or 1 is still an integer unless the producer
//! marked it as a boolean.

use prefkit_core::{NumberBox, NumberTag, RawValue};

/// Why a number box could not be classified
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifyError {
    #[error("{value} does not fit a 64-bit signed integer")]
    OutOfRange { value: String },

    #[error("number {value} carries unknown width tag '{code}'")]
    UnknownTag { code: char, value: String },
}

/// Outcome of classifying one box
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classified {
    Bool(bool),
    Int(i64),
    F32(f32),
    F64(f64),
    /// Left boxed because type erasure was requested
    Erased(NumberBox),
}

impl From<Classified> for RawValue {
    fn from(value: Classified) -> Self {
        match value {
            Classified::Bool(v) => RawValue::Bool(v),
            Classified::Int(v) => RawValue::Int(v),
            Classified::F32(v) => RawValue::F32(v),
            Classified::F64(v) => RawValue::F64(v),
            Classified::Erased(number) => RawValue::Number(number),
        }
    }
}

/// Deterministic tag driven classifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumericClassifier {
    /// Keep floating point boxes untouched so a round trip is lossless
    pub type_erase_ambiguous_floats: bool,
}

impl NumericClassifier {
    #[must_use]
    pub fn new(type_erase_ambiguous_floats: bool) -> Self {
        Self {
            type_erase_ambiguous_floats,
        }
    }

    pub fn classify(&self, number: &NumberBox) -> Result<Classified, ClassifyError> {
        let classified = match number.tag() {
            NumberTag::Char if number.is_boolean() => Classified::Bool(number.as_bool_lossy()),
            NumberTag::Char | NumberTag::Short | NumberTag::Int | NumberTag::LongLong => {
                let value = number.to_i64().ok_or_else(|| ClassifyError::OutOfRange {
                    value: number.to_string(),
                })?;
                Classified::Int(value)
            }
            NumberTag::Float | NumberTag::Double if self.type_erase_ambiguous_floats => {
                Classified::Erased(*number)
            }
            NumberTag::Float => Classified::F32(number.as_f64_lossy() as f32),
            NumberTag::Double => Classified::F64(number.as_f64_lossy()),
            NumberTag::Unknown => {
                return Err(ClassifyError::UnknownTag {
                    code: number.tag().type_code(),
                    value: number.to_string(),
                })
            }
        };
        tracing::trace!("Classified {} ({:?}) as {:?}", number, number.tag(), classified);
        Ok(classified)
    }
}
