#![allow(missing_docs)]

use std::{error, fmt};

use crate::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A snapshot or frame value does not have the shape of a replay's inputs.
    InvalidFormat(FormatError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidFormat(error) => write!(f, "invalid inputs: {}", error),
        }
    }
}

impl error::Error for Error {}

impl From<FormatError> for Error {
    fn from(v: FormatError) -> Self {
        Self::InvalidFormat(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    RowCount {
        expected: usize,
        actual: usize,
    },
    RowLength {
        intent: Intent,
        expected: usize,
        actual: usize,
    },
    InvalidCharacter {
        intent: Intent,
        frame: usize,
        character: char,
    },
    ValueOutOfRange {
        intent: Intent,
        value: u8,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::RowCount { expected, actual } => {
                write!(f, "expected {} intent rows, found {}", expected, actual)
            }
            FormatError::RowLength {
                intent,
                expected,
                actual,
            } => write!(
                f,
                "{} row has {} frames, expected {}",
                intent, actual, expected
            ),
            FormatError::InvalidCharacter {
                intent,
                frame,
                character,
            } => write!(
                f,
                "invalid {} value {:?} on frame {}",
                intent, character, frame
            ),
            FormatError::ValueOutOfRange { intent, value } => write!(
                f,
                "{} value {} is out of range (max {})",
                intent,
                value,
                intent.max_value()
            ),
        }
    }
}

impl error::Error for FormatError {}
