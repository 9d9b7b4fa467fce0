//! The editing core of Dusted: the inputs timeline, the cursor, and the undo stack.
//!
//! All edits to a document go through [UndoStack::push], which applies an [Edit] to
//! [Inputs] and records a reversible [Command]. The stack does not own the inputs or the
//! cursor; they are passed in by the application for each operation.
//!
//! # Example
//!
//! ```
//! use dusted_model::{Cursor, Edit, Frame, Inputs, Intent, UndoStack};
//!
//! let mut inputs = Inputs::new();
//! let mut cursor = Cursor::new();
//! let mut undo_stack = UndoStack::new();
//!
//! let jump = Frame::with(Intent::Jump, 1).unwrap();
//! undo_stack
//!     .push(Edit::insert_frame_at(0, jump), &mut inputs, &mut cursor)
//!     .unwrap();
//! assert_eq!(inputs.frames(), &[jump]);
//!
//! undo_stack.undo(&mut inputs, &mut cursor);
//! assert!(inputs.is_empty());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub use command::*;
pub use cursor::*;
pub use error::*;
pub use inputs::*;
pub use intent::*;
pub use undo_stack::*;

mod command;
mod cursor;
mod error;
mod inputs;
mod intent;
mod undo_stack;
