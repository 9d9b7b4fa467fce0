//! Edit requests and the reversible commands they resolve to.

use std::ops::Range;

use crate::{Cursor, CursorState, Error, Frame, Inputs, Intent};

/// A requested change to the inputs.
///
/// Frame indices are clamped to `0..=inputs.len()` when the edit is applied, in the same
/// way the cursor is clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Insert frames before `at`, shifting later frames back.
    InsertFrames {
        /// The index the first inserted frame will have.
        at: usize,
        /// The frames to insert.
        frames: Vec<Frame>,
    },
    /// Delete a span of frames, shifting later frames forward.
    DeleteFrames {
        /// The frames to delete.
        frames: Range<usize>,
    },
    /// Set one intent to the same value on every frame in a span.
    SetIntent {
        /// The frames to change.
        frames: Range<usize>,
        /// The intent to change.
        intent: Intent,
        /// The new value.
        value: u8,
    },
    /// Write frames over the existing ones starting at `at`, extending the timeline if they
    /// run past the end.
    OverwriteFrames {
        /// The index of the first overwritten frame.
        at: usize,
        /// The new frames.
        frames: Vec<Frame>,
    },
}

impl Edit {
    /// Insert a single frame.
    pub fn insert_frame_at(at: usize, frame: Frame) -> Self {
        Edit::InsertFrames {
            at,
            frames: vec![frame],
        }
    }

    /// Insert frames at the cursor.
    pub fn insert_at_cursor(cursor: &Cursor, frames: Vec<Frame>) -> Self {
        Edit::InsertFrames {
            at: cursor.frame(),
            frames,
        }
    }

    /// Delete the selected frames.
    pub fn delete_selection(cursor: &Cursor, inputs: &Inputs) -> Self {
        Edit::DeleteFrames {
            frames: cursor.selection(inputs),
        }
    }

    /// Set the cursor's intent row to `value` across the selection.
    pub fn fill_selection(cursor: &Cursor, inputs: &Inputs, value: u8) -> Result<Self, Error> {
        let intent = cursor.intent();
        intent.check(value)?;
        Ok(Edit::SetIntent {
            frames: cursor.selection(inputs),
            intent,
            value,
        })
    }

    /// Overwrite frames starting at the cursor.
    pub fn paste_at_cursor(cursor: &Cursor, frames: Vec<Frame>) -> Self {
        Edit::OverwriteFrames {
            at: cursor.frame(),
            frames,
        }
    }

    /// Resolve the edit against the current inputs.
    ///
    /// Returns `None` if the edit would not change anything.
    pub(crate) fn resolve(self, inputs: &Inputs, cursor: &Cursor) -> Result<Option<Command>, Error> {
        let len = inputs.len();
        let before = cursor.state();

        let command = match self {
            Edit::InsertFrames { at, frames } => {
                if frames.is_empty() {
                    return Ok(None);
                }
                let at = at.min(len);
                Command {
                    description: format!("insert {} at {}", count(frames.len()), at),
                    start: at,
                    removed: Vec::new(),
                    cursor_after: moved(before, at + frames.len()),
                    inserted: frames,
                    cursor_before: before,
                }
            }
            Edit::DeleteFrames { frames } => {
                let frames = clamp_span(frames, len);
                if frames.is_empty() {
                    return Ok(None);
                }
                Command {
                    description: format!("delete {}", span(&frames)),
                    start: frames.start,
                    removed: inputs.frames()[frames.clone()].to_vec(),
                    inserted: Vec::new(),
                    cursor_before: before,
                    cursor_after: moved(before, frames.start),
                }
            }
            Edit::SetIntent {
                frames,
                intent,
                value,
            } => {
                intent.check(value)?;
                let frames = clamp_span(frames, len);
                let removed = inputs.frames()[frames.clone()].to_vec();
                let mut inserted = removed.clone();
                for frame in &mut inserted {
                    frame.set(intent, value)?;
                }
                if inserted == removed {
                    return Ok(None);
                }
                Command {
                    description: format!("set {} to {} on {}", intent, value, span(&frames)),
                    start: frames.start,
                    removed,
                    inserted,
                    cursor_before: before,
                    cursor_after: before,
                }
            }
            Edit::OverwriteFrames { at, frames } => {
                let at = at.min(len);
                let end = (at + frames.len()).min(len);
                let removed = inputs.frames()[at..end].to_vec();
                if frames.is_empty() || frames == removed {
                    return Ok(None);
                }
                Command {
                    description: format!("paste {} at {}", count(frames.len()), at),
                    start: at,
                    removed,
                    cursor_after: moved(before, at + frames.len()),
                    inserted: frames,
                    cursor_before: before,
                }
            }
        };

        Ok(Some(command))
    }
}

/// A recorded edit that can be applied and reverted exactly.
///
/// A command replaces `removed` with `inserted` starting at a fixed frame, so the inverse
/// is the same replacement in the other direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    description: String,
    start: usize,
    removed: Vec<Frame>,
    inserted: Vec<Frame>,
    cursor_before: CursorState,
    cursor_after: CursorState,
}

impl Command {
    /// A short description, e.g. `insert 1 frame at 0`.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The frames occupied by the command's content once applied.
    pub fn applied_frames(&self) -> Range<usize> {
        self.start..self.start + self.inserted.len()
    }

    /// The cursor state before the edit was made.
    pub fn cursor_before(&self) -> CursorState {
        self.cursor_before
    }

    /// The cursor state right after the edit was made.
    pub fn cursor_after(&self) -> CursorState {
        self.cursor_after
    }

    pub(crate) fn apply(&self, inputs: &mut Inputs, cursor: &mut Cursor) {
        let removed = inputs.splice(self.start..self.start + self.removed.len(), &self.inserted);
        debug_assert_eq!(removed, self.removed);
        cursor.restore(inputs, self.cursor_after);
    }

    pub(crate) fn revert(&self, inputs: &mut Inputs, cursor: &mut Cursor) {
        let removed = inputs.splice(self.start..self.start + self.inserted.len(), &self.removed);
        debug_assert_eq!(removed, self.inserted);
        cursor.restore(inputs, self.cursor_before);
    }
}

fn clamp_span(frames: Range<usize>, len: usize) -> Range<usize> {
    let start = frames.start.min(len);
    let end = frames.end.min(len).max(start);
    start..end
}

fn moved(state: CursorState, frame: usize) -> CursorState {
    CursorState {
        frame,
        anchor: None,
        ..state
    }
}

fn count(frames: usize) -> String {
    if frames == 1 {
        "1 frame".to_string()
    } else {
        format!("{} frames", frames)
    }
}

fn span(frames: &Range<usize>) -> String {
    if frames.len() == 1 {
        format!("frame {}", frames.start)
    } else {
        format!("frames {}-{}", frames.start, frames.end - 1)
    }
}
