//! Dynamically typed number boxes
//!
//! Parsed interchange formats and platform preference stores hand back numbers
//! without their original width: an integer, a boolean and a float all arrive
//! in the same box. A [`NumberBox`] keeps the payload together with the storage
//! width tag the producer recorded, so the original kind can be recovered later.

use std::fmt;

/// Storage width signal carried by a [`NumberBox`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberTag {
    /// One signed byte (`c`); booleans and `i8`
    Char,
    /// Two bytes (`s`); `u8` and `i16`
    Short,
    /// Four bytes (`i`); `u16` and `i32`
    Int,
    /// Eight bytes (`q`); every wider integer
    LongLong,
    /// Single precision float (`f`)
    Float,
    /// Double precision float (`d`)
    Double,
    /// Any other width marker
    Unknown,
}

impl NumberTag {
    /// Map a one-character type code onto a tag
    #[must_use]
    pub fn from_type_code(code: char) -> Self {
        match code {
            'c' => NumberTag::Char,
            's' => NumberTag::Short,
            'i' | 'l' => NumberTag::Int,
            'q' | 'Q' => NumberTag::LongLong,
            'f' => NumberTag::Float,
            'd' => NumberTag::Double,
            _ => NumberTag::Unknown,
        }
    }

    /// One-character type code for this tag
    #[must_use]
    pub fn type_code(self) -> char {
        match self {
            NumberTag::Char => 'c',
            NumberTag::Short => 's',
            NumberTag::Int => 'i',
            NumberTag::LongLong => 'q',
            NumberTag::Float => 'f',
            NumberTag::Double => 'd',
            NumberTag::Unknown => '?',
        }
    }

    /// Whether the tag marks a floating point payload
    #[must_use]
    pub fn is_floating(self) -> bool {
        matches!(self, NumberTag::Float | NumberTag::Double)
    }
}

/// Numeric payload of a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

/// A number whose original kind is only known through its width tag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberBox {
    tag: NumberTag,
    number: Number,
    boolean: bool,
}

impl NumberBox {
    /// Box a payload under an explicit tag
    #[must_use]
    pub fn new(tag: NumberTag, number: Number) -> Self {
        Self {
            tag,
            number,
            boolean: false,
        }
    }

    /// Box a boolean; the box remembers its boolean origin
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self {
            tag: NumberTag::Char,
            number: Number::Signed(i64::from(value)),
            boolean: true,
        }
    }

    #[must_use]
    pub fn from_i8(value: i8) -> Self {
        Self::new(NumberTag::Char, Number::Signed(i64::from(value)))
    }

    #[must_use]
    pub fn from_i16(value: i16) -> Self {
        Self::new(NumberTag::Short, Number::Signed(i64::from(value)))
    }

    #[must_use]
    pub fn from_i32(value: i32) -> Self {
        Self::new(NumberTag::Int, Number::Signed(i64::from(value)))
    }

    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        Self::new(NumberTag::LongLong, Number::Signed(value))
    }

    /// Box an unsigned integer, keeping it signed whenever it fits
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(signed) => Self::from_i64(signed),
            Err(_) => Self::new(NumberTag::LongLong, Number::Unsigned(value)),
        }
    }

    #[must_use]
    pub fn from_f32(value: f32) -> Self {
        Self::new(NumberTag::Float, Number::Float(f64::from(value)))
    }

    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self::new(NumberTag::Double, Number::Float(value))
    }

    #[must_use]
    pub fn tag(&self) -> NumberTag {
        self.tag
    }

    #[must_use]
    pub fn number(&self) -> Number {
        self.number
    }

    /// Whether the producer boxed a boolean
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        self.boolean
    }

    /// Exact conversion to `i64`
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        match self.number {
            Number::Signed(value) => Some(value),
            Number::Unsigned(value) => i64::try_from(value).ok(),
            Number::Float(value) => float_to_i64(value),
        }
    }

    /// Exact conversion to `u64`
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        match self.number {
            Number::Signed(value) => u64::try_from(value).ok(),
            Number::Unsigned(value) => Some(value),
            Number::Float(value) => {
                float_to_i64(value).and_then(|v| u64::try_from(v).ok())
            }
        }
    }

    /// Exact conversion to `f64`
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        match self.number {
            Number::Signed(value) => {
                let float = value as f64;
                (float as i128 == i128::from(value)).then_some(float)
            }
            Number::Unsigned(value) => {
                let float = value as f64;
                (float as u128 == u128::from(value)).then_some(float)
            }
            Number::Float(value) => Some(value),
        }
    }

    /// Exact conversion to `f32`
    #[must_use]
    pub fn to_f32(&self) -> Option<f32> {
        let wide = self.to_f64()?;
        let narrow = wide as f32;
        (f64::from(narrow) == wide || wide.is_nan()).then_some(narrow)
    }

    /// Boolean unboxing: boolean boxes always, other boxes only for 0 and 1
    #[must_use]
    pub fn to_bool(&self) -> Option<bool> {
        if self.boolean {
            return Some(self.to_i64() != Some(0));
        }
        match self.to_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        }
    }

    /// Truncating, saturating conversion used by coercing stores
    #[must_use]
    pub fn as_i64_lossy(&self) -> i64 {
        match self.number {
            Number::Signed(value) => value,
            Number::Unsigned(value) => i64::try_from(value).unwrap_or(i64::MAX),
            Number::Float(value) => value as i64,
        }
    }

    #[must_use]
    pub fn as_f64_lossy(&self) -> f64 {
        match self.number {
            Number::Signed(value) => value as f64,
            Number::Unsigned(value) => value as f64,
            Number::Float(value) => value,
        }
    }

    /// Non-zero test used by coercing stores
    #[must_use]
    pub fn as_bool_lossy(&self) -> bool {
        match self.number {
            Number::Signed(value) => value != 0,
            Number::Unsigned(value) => value != 0,
            Number::Float(value) => value != 0.0,
        }
    }
}

impl fmt::Display for NumberBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Number::Signed(value) => write!(f, "{value}"),
            Number::Unsigned(value) => write!(f, "{value}"),
            Number::Float(value) => write!(f, "{value}"),
        }
    }
}

fn float_to_i64(value: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if value.fract() == 0.0 && value >= -LIMIT && value < LIMIT {
        Some(value as i64)
    } else {
        None
    }
}
