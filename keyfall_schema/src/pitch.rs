use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::A => 'A',
            Self::B => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchParseError {
    #[error("empty pitch name")]
    Empty,
    #[error("invalid pitch letter '{0}'")]
    Letter(char),
    #[error("invalid octave in pitch name `{0}`")]
    Octave(String),
}

/// A spelled pitch such as `C4`, `F#5` or `Bb3`.
///
/// Equality is by spelling: `C#4` and `Db4` are different keys on the
/// input side and never match each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pitch {
    letter: Letter,
    accidental: Accidental,
    octave: i8,
}

impl Pitch {
    pub const MIN_OCTAVE: i8 = -1;
    pub const MAX_OCTAVE: i8 = 9;

    pub fn new(letter: Letter, accidental: Accidental, octave: i8) -> Self {
        Self {
            letter,
            accidental,
            octave: octave.clamp(Self::MIN_OCTAVE, Self::MAX_OCTAVE),
        }
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    pub fn octave(&self) -> i8 {
        self.octave
    }

}

impl FromStr for Pitch {
    type Err = PitchParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let first = chars.next().ok_or(PitchParseError::Empty)?;
        let letter = Letter::from_char(first).ok_or(PitchParseError::Letter(first))?;

        let rest = chars.as_str();
        let (accidental, octave_str) = match rest.chars().next() {
            Some('#') => (Accidental::Sharp, &rest[1..]),
            Some('b') => (Accidental::Flat, &rest[1..]),
            _ => (Accidental::Natural, rest),
        };

        // Octaves run -1..=9, so the only valid spellings are "-1" and one digit.
        let octave: i8 = match octave_str.as_bytes() {
            b"-1" => -1,
            [d @ b'0'..=b'9'] => (d - b'0') as i8,
            _ => return Err(PitchParseError::Octave(s.to_string())),
        };

        Ok(Self {
            letter,
            accidental,
            octave,
        })
    }
}

impl TryFrom<String> for Pitch {
    type Error = PitchParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pitch> for String {
    fn from(pitch: Pitch) -> Self {
        pitch.to_string()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accidental = match self.accidental {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        };
        write!(f, "{}{}{}", self.letter.as_char(), accidental, self.octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naturals_sharps_and_flats() {
        let c4: Pitch = "C4".parse().unwrap();
        assert_eq!(c4.letter(), Letter::C);
        assert_eq!(c4.accidental(), Accidental::Natural);
        assert_eq!(c4.octave(), 4);

        let fs5: Pitch = "F#5".parse().unwrap();
        assert_eq!(fs5.accidental(), Accidental::Sharp);
        assert_eq!(fs5.octave(), 5);

        let bb3: Pitch = "Bb3".parse().unwrap();
        assert_eq!(bb3.letter(), Letter::B);
        assert_eq!(bb3.accidental(), Accidental::Flat);
        assert_eq!(bb3.to_string(), "Bb3");
    }

    #[test]
    fn lowercase_letter_is_normalized() {
        let p: Pitch = "a#4".parse().unwrap();
        assert_eq!(p.to_string(), "A#4");
    }

    #[test]
    fn enharmonics_are_distinct() {
        let cs: Pitch = "C#4".parse().unwrap();
        let db: Pitch = "Db4".parse().unwrap();
        assert_ne!(cs, db);
    }

    #[test]
    fn rejects_malformed_names() {
        assert_eq!("".parse::<Pitch>(), Err(PitchParseError::Empty));
        assert_eq!("H4".parse::<Pitch>(), Err(PitchParseError::Letter('H')));
        assert!(matches!("C".parse::<Pitch>(), Err(PitchParseError::Octave(_))));
        assert!(matches!("C#".parse::<Pitch>(), Err(PitchParseError::Octave(_))));
        assert!(matches!("C12".parse::<Pitch>(), Err(PitchParseError::Octave(_))));
    }

    #[test]
    fn octave_must_be_plain_digits() {
        assert_eq!("C-1".parse::<Pitch>().unwrap().octave(), -1);
        assert_eq!("B9".parse::<Pitch>().unwrap().octave(), 9);

        for name in ["C+4", "C-0", "C04", "C-2", "C 4", "C#+1"] {
            assert!(
                matches!(name.parse::<Pitch>(), Err(PitchParseError::Octave(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        let p: Pitch = "G#5".parse().unwrap();
        assert_eq!(serde_json::to_value(p).unwrap(), serde_json::json!("G#5"));

        let err = serde_json::from_value::<Pitch>(serde_json::json!("X9"));
        assert!(err.is_err());
    }
}
