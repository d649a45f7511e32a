//! Single binary digit held by one flip-flop.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::sim::SimError;

/// The value stored in one flip-flop.
///
/// Serialized as the integers `0` and `1` so snapshots read naturally
/// in JSON.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Bit {
    /// Logic low (0)
    #[default]
    Zero,
    /// Logic high (1)
    One,
}

impl Bit {
    /// Both values in order: 0, 1
    pub const ALL: [Bit; 2] = [Bit::Zero, Bit::One];

    /// Convert to 0 or 1.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }

    /// Returns true if this bit is high.
    #[inline]
    pub const fn is_one(self) -> bool {
        matches!(self, Bit::One)
    }

    /// The character used for this bit in bit strings.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl fmt::Debug for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u8())
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit.is_one()
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit.to_u8()
    }
}

impl TryFrom<u8> for Bit {
    type Error = SimError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(SimError::InvalidInput(format!(
                "bit value must be 0 or 1, got {}",
                other
            ))),
        }
    }
}

impl TryFrom<char> for Bit {
    type Error = SimError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            other => Err(SimError::InvalidInput(format!(
                "'{}' is not a binary digit",
                other
            ))),
        }
    }
}

/// Parse a non-empty string of `0`s and `1`s.
///
/// Surrounding whitespace is ignored; anything else fails with
/// [`SimError::InvalidInput`].
pub fn parse_bits(text: &str) -> Result<Vec<Bit>, SimError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SimError::InvalidInput(
            "input must be a non-empty string of 0s and 1s".into(),
        ));
    }
    text.chars().map(Bit::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_conversion() {
        assert_eq!(Bit::try_from(0u8).unwrap(), Bit::Zero);
        assert_eq!(Bit::try_from(1u8).unwrap(), Bit::One);
        assert!(matches!(Bit::try_from(2u8), Err(SimError::InvalidInput(_))));
    }

    #[test]
    fn test_char_conversion() {
        assert_eq!(Bit::try_from('1').unwrap(), Bit::One);
        assert!(Bit::try_from('x').is_err());
        for b in Bit::ALL {
            assert_eq!(Bit::try_from(b.to_char()).unwrap(), b);
        }
    }

    #[test]
    fn test_parse_bits() {
        assert_eq!(
            parse_bits("1011").unwrap(),
            vec![Bit::One, Bit::Zero, Bit::One, Bit::One]
        );
        assert_eq!(parse_bits(" 01 ").unwrap(), vec![Bit::Zero, Bit::One]);
        assert!(parse_bits("").is_err());
        assert!(parse_bits("   ").is_err());
        assert!(parse_bits("102").is_err());
        assert!(parse_bits("1 0").is_err());
    }

    #[test]
    fn test_serde_as_integer() {
        let json = serde_json::to_string(&vec![Bit::One, Bit::Zero]).unwrap();
        assert_eq!(json, "[1,0]");
        let back: Vec<Bit> = serde_json::from_str("[0,1]").unwrap();
        assert_eq!(back, vec![Bit::Zero, Bit::One]);
        assert!(serde_json::from_str::<Bit>("2").is_err());
    }
}
