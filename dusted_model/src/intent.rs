use std::fmt;

use crate::{Error, FormatError};

/// A single control on a single frame.
///
/// Intents are listed in the order they are stored in a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Intent {
    /// Horizontal direction: 0 = left, 1 = neutral, 2 = right.
    X,
    /// Vertical direction: 0 = up, 1 = neutral, 2 = down.
    Y,
    /// Jump: 0 = released, 1 = pressed, 2 = held.
    Jump,
    /// Dash.
    Dash,
    /// Fall.
    Fall,
    /// Light attack, counting down from 10 after a press.
    Light,
    /// Heavy attack, counting down from 10 after a press.
    Heavy,
    /// Taunt.
    Taunt,
}

impl Intent {
    /// The number of intents stored per frame.
    pub const COUNT: usize = 8;

    /// Return all intents in storage order.
    pub fn all() -> &'static [Intent] {
        &[
            Self::X,
            Self::Y,
            Self::Jump,
            Self::Dash,
            Self::Fall,
            Self::Light,
            Self::Heavy,
            Self::Taunt,
        ]
    }

    /// The row of this intent in a snapshot.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The largest value this intent can hold.
    pub fn max_value(self) -> u8 {
        match self {
            Intent::X | Intent::Y | Intent::Jump => 2,
            Intent::Dash | Intent::Fall | Intent::Taunt => 1,
            Intent::Light | Intent::Heavy => 10,
        }
    }

    /// The value on a frame with no input.
    pub fn default_value(self) -> u8 {
        match self {
            Intent::X | Intent::Y => 1,
            _ => 0,
        }
    }

    /// Return an error if `value` is not valid for this intent.
    pub fn check(self, value: u8) -> Result<u8, FormatError> {
        if value > self.max_value() {
            Err(FormatError::ValueOutOfRange {
                intent: self,
                value,
            })
        } else {
            Ok(value)
        }
    }

    /// Decode a snapshot character.
    pub fn decode(self, c: char) -> Option<u8> {
        c.to_digit(16)
            .map(|digit| digit as u8)
            .filter(|&value| value <= self.max_value())
    }

    /// Encode a value as a snapshot character.
    pub fn encode(self, value: u8) -> char {
        std::char::from_digit(value as u32, 16).unwrap_or('0')
    }

    fn name(self) -> &'static str {
        match self {
            Intent::X => "x",
            Intent::Y => "y",
            Intent::Jump => "jump",
            Intent::Dash => "dash",
            Intent::Fall => "fall",
            Intent::Light => "light",
            Intent::Heavy => "heavy",
            Intent::Taunt => "taunt",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The intents for one frame.
///
/// The values are always within range for their intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    values: [u8; Intent::COUNT],
}

impl Frame {
    /// A neutral frame with one intent changed.
    pub fn with(intent: Intent, value: u8) -> Result<Self, Error> {
        let mut frame = Self::default();
        frame.set(intent, value)?;
        Ok(frame)
    }

    /// Get the value of an intent.
    pub fn get(&self, intent: Intent) -> u8 {
        self.values[intent.index()]
    }

    /// Set the value of an intent.
    ///
    /// Returns an error if the value is larger than the intent allows.
    pub fn set(&mut self, intent: Intent, value: u8) -> Result<&mut Self, Error> {
        self.values[intent.index()] = intent.check(value)?;
        Ok(self)
    }

    /// Return true if no intent differs from its default.
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for Frame {
    fn default() -> Self {
        let mut values = [0; Intent::COUNT];
        for &intent in Intent::all() {
            values[intent.index()] = intent.default_value();
        }
        Self { values }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame(")?;
        for (i, &intent) in Intent::all().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", intent, self.get(intent))?;
        }
        write!(f, ")")
    }
}
