use std::{ops::Range, slice};

use crate::{Error, FormatError, Frame, Intent};

/// The inputs of a replay in its stored layout: one string per intent, one character per
/// frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InputsSnapshot {
    /// The intent rows, in [Intent::all] order.
    pub rows: Vec<String>,
}

impl InputsSnapshot {
    /// Build a snapshot from its intent rows.
    pub fn new(rows: Vec<String>) -> Self {
        Self { rows }
    }
}

/// The timeline of frame inputs being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    frames: Vec<Frame>,
}

impl Inputs {
    /// An empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// A timeline containing the given frames.
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// The number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return true if there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The frame at `index`, if it exists.
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// All frames in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Iterate over the frames.
    pub fn iter(&self) -> slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Return a copy of the inputs in snapshot form.
    pub fn get(&self) -> InputsSnapshot {
        let rows = Intent::all()
            .iter()
            .map(|&intent| {
                self.frames
                    .iter()
                    .map(|frame| intent.encode(frame.get(intent)))
                    .collect()
            })
            .collect();
        InputsSnapshot { rows }
    }

    /// Replace the inputs with the contents of a snapshot.
    ///
    /// The inputs are unchanged if the snapshot is malformed.
    pub fn set(&mut self, snapshot: &InputsSnapshot) -> Result<(), Error> {
        self.frames = parse_snapshot(snapshot)?;
        Ok(())
    }

    /// Remove all frames.
    pub fn reset(&mut self) {
        self.frames.clear();
    }

    /// Replace `range` with `inserted`, returning the removed frames.
    ///
    /// `range` must be within bounds.
    pub(crate) fn splice(&mut self, range: Range<usize>, inserted: &[Frame]) -> Vec<Frame> {
        self.frames
            .splice(range, inserted.iter().copied())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Inputs {
    type Item = &'a Frame;
    type IntoIter = slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn parse_snapshot(snapshot: &InputsSnapshot) -> Result<Vec<Frame>, Error> {
    if snapshot.rows.len() != Intent::COUNT {
        return Err(FormatError::RowCount {
            expected: Intent::COUNT,
            actual: snapshot.rows.len(),
        }
        .into());
    }

    let len = snapshot.rows[0].chars().count();
    let mut frames = vec![Frame::default(); len];

    for (&intent, row) in Intent::all().iter().zip(&snapshot.rows) {
        let row_len = row.chars().count();
        if row_len != len {
            return Err(FormatError::RowLength {
                intent,
                expected: len,
                actual: row_len,
            }
            .into());
        }

        for (index, (c, frame)) in row.chars().zip(frames.iter_mut()).enumerate() {
            let value = intent
                .decode(c)
                .ok_or(FormatError::InvalidCharacter {
                    intent,
                    frame: index,
                    character: c,
                })?;
            frame.set(intent, value)?;
        }
    }

    Ok(frames)
}
