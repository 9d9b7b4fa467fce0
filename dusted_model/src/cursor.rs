use std::ops::Range;

use crate::{Inputs, Intent};

/// A saved cursor position and selection, used to restore the cursor on undo and redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorState {
    /// The frame index.
    pub frame: usize,
    /// The intent row.
    pub intent: Intent,
    /// The frame where the selection started, if there is a selection.
    pub anchor: Option<usize>,
}

/// The edit position in the inputs grid.
///
/// The frame index is always in `0..=inputs.len()`, where `inputs.len()` is the append
/// position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    frame: usize,
    intent: Intent,
    anchor: Option<usize>,
}

impl Cursor {
    /// A cursor at frame 0 on the first intent row, with no selection.
    pub fn new() -> Self {
        Self {
            frame: 0,
            intent: Intent::X,
            anchor: None,
        }
    }

    /// The current frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// The current intent row.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// The frame where the selection started, if any.
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// The selected frames.
    ///
    /// The selection spans from the anchor to the cursor, inclusive of both ends but
    /// excluding the append position. Without an anchor, the selection is the frame under
    /// the cursor.
    pub fn selection(&self, inputs: &Inputs) -> Range<usize> {
        let anchor = self.anchor.unwrap_or(self.frame);
        let start = anchor.min(self.frame);
        let end = (anchor.max(self.frame) + 1).min(inputs.len());
        start.min(end)..end
    }

    /// Return true if a multi-frame selection is being made.
    pub fn has_selection(&self) -> bool {
        self.anchor.is_some()
    }

    /// Move to `frame`, clamped to `0..=inputs.len()`, and clear the selection.
    ///
    /// Does nothing if the cursor is already on that frame, so the selection is kept.
    pub fn move_to(&mut self, inputs: &Inputs, frame: usize) {
        let frame = frame.min(inputs.len());
        if frame == self.frame {
            return;
        }
        self.frame = frame;
        self.anchor = None;
    }

    /// Move by `delta` frames, saturating at the ends of the timeline.
    pub fn move_by(&mut self, inputs: &Inputs, delta: isize) {
        let frame = if delta < 0 {
            self.frame.saturating_sub(delta.unsigned_abs())
        } else {
            self.frame.saturating_add(delta as usize)
        };
        self.move_to(inputs, frame);
    }

    /// Select the intent row.
    pub fn set_intent(&mut self, intent: Intent) {
        self.intent = intent;
    }

    /// Move to `frame` while extending the selection from the current position.
    pub fn select_to(&mut self, inputs: &Inputs, frame: usize) {
        let anchor = self.anchor.unwrap_or(self.frame);
        self.frame = frame.min(inputs.len());
        self.anchor = Some(anchor.min(inputs.len()));
    }

    /// Drop the selection, keeping the position.
    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Pull the cursor back into range after the inputs shrank.
    pub fn clamp(&mut self, inputs: &Inputs) {
        self.frame = self.frame.min(inputs.len());
        if let Some(anchor) = &mut self.anchor {
            *anchor = (*anchor).min(inputs.len());
        }
    }

    /// Move to frame 0 with no selection.
    pub fn reset(&mut self) {
        self.frame = 0;
        self.anchor = None;
    }

    /// Save the cursor position and selection.
    pub fn state(&self) -> CursorState {
        CursorState {
            frame: self.frame,
            intent: self.intent,
            anchor: self.anchor,
        }
    }

    /// Restore a saved position, clamped to the current inputs.
    pub fn restore(&mut self, inputs: &Inputs, state: CursorState) {
        self.frame = state.frame;
        self.intent = state.intent;
        self.anchor = state.anchor;
        self.clamp(inputs);
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}
