use std::fmt;

use crate::{Command, Cursor, Edit, Error, Inputs};

/// Identifies a callback registered with [UndoStack::subscribe].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// The state of the undo stack as seen by the menus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoStatus {
    /// Whether there is a command to undo.
    pub can_undo: bool,
    /// Whether there is a command to redo.
    pub can_redo: bool,
    /// Description of the next command to undo.
    pub undo_text: String,
    /// Description of the next command to redo.
    pub redo_text: String,
}

type Callback = Box<dyn FnMut(&UndoStatus)>;

/// History of the edits made to a document.
///
/// The stack doesn't own the inputs or cursor. Each operation takes them as arguments and
/// applies the recorded commands to them, so the caller must always pass the same
/// document. Subscribers are notified synchronously after every change to the history.
#[derive(Default)]
pub struct UndoStack {
    undo: Vec<Command>,
    /// Most recently undone command last.
    redo: Vec<Command>,
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_subscription_id: usize,
}

impl UndoStack {
    /// An empty history with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an edit and record it.
    ///
    /// Any undone commands are discarded. Edits which don't change the inputs are not
    /// recorded and don't notify subscribers.
    pub fn push(&mut self, edit: Edit, inputs: &mut Inputs, cursor: &mut Cursor) -> Result<(), Error> {
        let command = match edit.resolve(inputs, cursor)? {
            Some(command) => command,
            None => {
                tracing::debug!("ignoring edit with no effect");
                return Ok(());
            }
        };

        tracing::debug!("do: {}", command.description());
        command.apply(inputs, cursor);
        self.undo.push(command);
        self.redo.clear();
        self.notify();
        Ok(())
    }

    /// Revert the most recent command and restore the cursor to where it was before it.
    ///
    /// Returns false without doing anything if there is nothing to undo.
    pub fn undo(&mut self, inputs: &mut Inputs, cursor: &mut Cursor) -> bool {
        match self.undo.pop() {
            Some(command) => {
                tracing::debug!("undo: {}", command.description());
                command.revert(inputs, cursor);
                self.redo.push(command);
                self.notify();
                true
            }
            None => {
                tracing::debug!("nothing to undo");
                false
            }
        }
    }

    /// Reapply the most recently undone command and restore the cursor to where it was
    /// after it.
    ///
    /// Returns false without doing anything if there is nothing to redo.
    pub fn redo(&mut self, inputs: &mut Inputs, cursor: &mut Cursor) -> bool {
        match self.redo.pop() {
            Some(command) => {
                tracing::debug!("redo: {}", command.description());
                command.apply(inputs, cursor);
                self.undo.push(command);
                self.notify();
                true
            }
            None => {
                tracing::debug!("nothing to redo");
                false
            }
        }
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.notify();
    }

    /// Whether [undo](Self::undo) would do anything.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether [redo](Self::redo) would do anything.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Describe the command that [undo](Self::undo) would revert, or an empty string.
    pub fn undo_text(&self) -> String {
        self.undo
            .last()
            .map(|command| command.description().to_string())
            .unwrap_or_default()
    }

    /// Describe the command that [redo](Self::redo) would reapply, or an empty string.
    pub fn redo_text(&self) -> String {
        self.redo
            .last()
            .map(|command| command.description().to_string())
            .unwrap_or_default()
    }

    /// The number of commands that can be undone.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// The number of commands that can be redone.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// The applied commands, oldest first.
    pub fn undo_commands(&self) -> &[Command] {
        &self.undo
    }

    /// The undone commands, with the next one to redo last.
    pub fn redo_commands(&self) -> &[Command] {
        &self.redo
    }

    /// The current state of the stack.
    pub fn status(&self) -> UndoStatus {
        UndoStatus {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_text: self.undo_text(),
            redo_text: self.redo_text(),
        }
    }

    /// Call `callback` after every change to the history.
    pub fn subscribe(&mut self, callback: impl FnMut(&UndoStatus) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len = self.subscribers.len();
        self.subscribers.retain(|(subscriber_id, _)| *subscriber_id != id);
        self.subscribers.len() != len
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let status = self.status();
        for (_, callback) in &mut self.subscribers {
            callback(&status);
        }
    }
}

impl fmt::Debug for UndoStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoStack")
            .field("undo", &self.undo)
            .field("redo", &self.redo)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use proptest::prelude::*;

    use super::*;
    use crate::{CursorState, Frame, InputsSnapshot, Intent};

    fn jump() -> Frame {
        Frame::with(Intent::Jump, 1).unwrap()
    }

    fn document(len: usize) -> (Inputs, Cursor) {
        (
            Inputs::from_frames(vec![Frame::default(); len]),
            Cursor::new(),
        )
    }

    #[test]
    fn insert_undo_redo_scenario() {
        let (mut inputs, mut cursor) = document(0);
        let mut stack = UndoStack::new();

        stack
            .push(Edit::insert_frame_at(0, jump()), &mut inputs, &mut cursor)
            .unwrap();
        assert_eq!(inputs.frames(), &[jump()]);
        assert_eq!(inputs.get().rows[Intent::Jump.index()], "1");

        assert!(stack.undo(&mut inputs, &mut cursor));
        assert!(inputs.is_empty());

        assert!(stack.redo(&mut inputs, &mut cursor));
        assert_eq!(inputs.frames(), &[jump()]);
    }

    #[test]
    fn new_edit_discards_redo_branch() {
        let (mut inputs, mut cursor) = document(4);
        let mut stack = UndoStack::new();

        let a = Edit::DeleteFrames { frames: 0..1 };
        let b = Edit::insert_frame_at(1, jump());
        let c = Edit::SetIntent {
            frames: 0..2,
            intent: Intent::Dash,
            value: 1,
        };

        stack.push(a, &mut inputs, &mut cursor).unwrap();
        stack.push(b, &mut inputs, &mut cursor).unwrap();
        stack.undo(&mut inputs, &mut cursor);
        assert!(stack.can_redo());
        stack.push(c, &mut inputs, &mut cursor).unwrap();

        assert!(!stack.can_redo());
        assert_eq!(stack.redo_len(), 0);
        let descriptions: Vec<&str> = stack
            .undo_commands()
            .iter()
            .map(|command| command.description())
            .collect();
        assert_eq!(descriptions, ["delete frame 0", "set dash to 1 on frames 0-1"]);
    }

    #[test]
    fn undo_and_redo_on_empty_stack_do_nothing() {
        let (mut inputs, mut cursor) = document(3);
        cursor.move_to(&inputs, 2);
        let mut stack = UndoStack::new();

        assert!(!stack.undo(&mut inputs, &mut cursor));
        assert!(!stack.redo(&mut inputs, &mut cursor));
        assert_eq!(inputs.len(), 3);
        assert_eq!(cursor.frame(), 2);
    }

    #[test]
    fn undo_restores_cursor_before_edit() {
        let (mut inputs, mut cursor) = document(10);
        let mut stack = UndoStack::new();

        cursor.move_to(&inputs, 3);
        cursor.select_to(&inputs, 6);
        let edit = Edit::delete_selection(&cursor, &inputs);
        stack.push(edit, &mut inputs, &mut cursor).unwrap();
        assert_eq!(inputs.len(), 6);
        assert_eq!(cursor.frame(), 3);
        assert!(!cursor.has_selection());

        cursor.move_to(&inputs, 0);
        stack.undo(&mut inputs, &mut cursor);
        assert_eq!(inputs.len(), 10);
        assert_eq!(cursor.frame(), 6);
        assert_eq!(cursor.selection(&inputs), 3..7);

        cursor.move_to(&inputs, 9);
        stack.redo(&mut inputs, &mut cursor);
        assert_eq!(cursor.frame(), 3);
    }

    #[test]
    fn text_describes_next_command() {
        let (mut inputs, mut cursor) = document(0);
        let mut stack = UndoStack::new();
        assert_eq!(stack.undo_text(), "");
        assert_eq!(stack.redo_text(), "");

        stack
            .push(Edit::insert_frame_at(0, jump()), &mut inputs, &mut cursor)
            .unwrap();
        assert_eq!(stack.undo_text(), "insert 1 frame at 0");

        stack.undo(&mut inputs, &mut cursor);
        assert_eq!(stack.undo_text(), "");
        assert_eq!(stack.redo_text(), "insert 1 frame at 0");
    }

    #[test]
    fn clear_forgets_everything() {
        let (mut inputs, mut cursor) = document(2);
        let mut stack = UndoStack::new();
        for i in 0..5 {
            stack
                .push(Edit::insert_frame_at(i, jump()), &mut inputs, &mut cursor)
                .unwrap();
        }
        stack.undo(&mut inputs, &mut cursor);
        stack.clear();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn no_op_edit_is_not_recorded() {
        let (mut inputs, mut cursor) = document(2);
        let mut stack = UndoStack::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        stack.subscribe(move |_| *counter.borrow_mut() += 1);

        stack
            .push(Edit::DeleteFrames { frames: 2..5 }, &mut inputs, &mut cursor)
            .unwrap();
        assert!(!stack.can_undo());
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn invalid_edit_leaves_history_untouched() {
        let (mut inputs, mut cursor) = document(2);
        let mut stack = UndoStack::new();
        let result = stack.push(
            Edit::SetIntent {
                frames: 0..2,
                intent: Intent::Fall,
                value: 4,
            },
            &mut inputs,
            &mut cursor,
        );
        assert!(result.is_err());
        assert!(!stack.can_undo());
        assert_eq!(inputs, Inputs::from_frames(vec![Frame::default(); 2]));
    }

    #[test]
    fn subscribers_see_every_change() {
        let (mut inputs, mut cursor) = document(0);
        let mut stack = UndoStack::new();
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(0));

        let log = Rc::clone(&first);
        stack.subscribe(move |status: &UndoStatus| {
            log.borrow_mut().push((status.can_undo, status.can_redo))
        });
        let counter = Rc::clone(&second);
        let second_id = stack.subscribe(move |_| *counter.borrow_mut() += 1);

        stack
            .push(Edit::insert_frame_at(0, jump()), &mut inputs, &mut cursor)
            .unwrap();
        stack.undo(&mut inputs, &mut cursor);
        stack.redo(&mut inputs, &mut cursor);
        assert!(stack.unsubscribe(second_id));
        assert!(!stack.unsubscribe(second_id));
        stack.clear();

        assert_eq!(
            *first.borrow(),
            [(true, false), (false, true), (true, false), (false, false)]
        );
        assert_eq!(*second.borrow(), 3);
    }

    fn arb_frame() -> impl Strategy<Value = Frame> {
        (0u8..=2, 0u8..=1, 0u8..=10).prop_map(|(jump, dash, light)| {
            let mut frame = Frame::default();
            frame.set(Intent::Jump, jump).unwrap();
            frame.set(Intent::Dash, dash).unwrap();
            frame.set(Intent::Light, light).unwrap();
            frame
        })
    }

    fn arb_edit() -> impl Strategy<Value = Edit> {
        prop_oneof![
            (0usize..12, prop::collection::vec(arb_frame(), 0..4))
                .prop_map(|(at, frames)| Edit::InsertFrames { at, frames }),
            (0usize..12, 0usize..6).prop_map(|(start, len)| Edit::DeleteFrames {
                frames: start..start + len
            }),
            (0usize..12, 0usize..6, 0u8..=2).prop_map(|(start, len, value)| {
                Edit::SetIntent {
                    frames: start..start + len,
                    intent: Intent::Jump,
                    value,
                }
            }),
            (0usize..12, prop::collection::vec(arb_frame(), 0..4))
                .prop_map(|(at, frames)| Edit::OverwriteFrames { at, frames }),
        ]
    }

    /// One user action: either navigation or an edit.
    #[derive(Debug, Clone)]
    enum Step {
        MoveTo(usize),
        SelectTo(usize),
        SetIntent(Intent),
        Edit(Edit),
        InsertAtCursor(Vec<Frame>),
        PasteAtCursor(Vec<Frame>),
        DeleteSelection,
        FillSelection(u8),
    }

    fn arb_step() -> impl Strategy<Value = Step> {
        prop_oneof![
            (0usize..14).prop_map(Step::MoveTo),
            (0usize..14).prop_map(Step::SelectTo),
            prop::sample::select(Intent::all().to_vec()).prop_map(Step::SetIntent),
            arb_edit().prop_map(Step::Edit),
            prop::collection::vec(arb_frame(), 0..4).prop_map(Step::InsertAtCursor),
            prop::collection::vec(arb_frame(), 0..4).prop_map(Step::PasteAtCursor),
            Just(Step::DeleteSelection),
            (0u8..=10).prop_map(Step::FillSelection),
        ]
    }

    type DocumentState = (InputsSnapshot, CursorState);

    fn document_state(inputs: &Inputs, cursor: &Cursor) -> DocumentState {
        (inputs.get(), cursor.state())
    }

    /// Perform a navigation step, or return the edit the step asks for.
    fn edit_for(step: Step, inputs: &Inputs, cursor: &mut Cursor) -> Option<Edit> {
        match step {
            Step::MoveTo(frame) => {
                cursor.move_to(inputs, frame);
                None
            }
            Step::SelectTo(frame) => {
                cursor.select_to(inputs, frame);
                None
            }
            Step::SetIntent(intent) => {
                cursor.set_intent(intent);
                None
            }
            Step::Edit(edit) => Some(edit),
            Step::InsertAtCursor(frames) => Some(Edit::insert_at_cursor(cursor, frames)),
            Step::PasteAtCursor(frames) => Some(Edit::paste_at_cursor(cursor, frames)),
            Step::DeleteSelection => Some(Edit::delete_selection(cursor, inputs)),
            Step::FillSelection(value) => {
                let value = value.min(cursor.intent().max_value());
                Some(Edit::fill_selection(cursor, inputs, value).unwrap())
            }
        }
    }

    proptest! {
        #[test]
        fn each_undo_restores_state_before_its_edit(
            initial in prop::collection::vec(arb_frame(), 0..8),
            steps in prop::collection::vec(arb_step(), 0..16),
        ) {
            let mut inputs = Inputs::from_frames(initial);
            let original_inputs = inputs.get();
            let mut cursor = Cursor::new();
            let mut stack = UndoStack::new();

            let mut before_edits = Vec::new();
            for step in steps {
                if let Some(edit) = edit_for(step, &inputs, &mut cursor) {
                    let before = document_state(&inputs, &cursor);
                    let recorded = stack.undo_len();
                    stack.push(edit, &mut inputs, &mut cursor).unwrap();
                    prop_assert!(!stack.can_redo());
                    if stack.undo_len() > recorded {
                        before_edits.push(before);
                    }
                }
            }

            while let Some(before) = before_edits.pop() {
                prop_assert!(stack.undo(&mut inputs, &mut cursor));
                prop_assert_eq!(document_state(&inputs, &cursor), before);
            }
            prop_assert!(!stack.can_undo());
            prop_assert_eq!(inputs.get(), original_inputs);
        }

        #[test]
        fn redo_after_undo_returns_to_each_edit(
            initial in prop::collection::vec(arb_frame(), 0..8),
            steps in prop::collection::vec(arb_step(), 1..16),
            undos in 1usize..10,
        ) {
            let mut inputs = Inputs::from_frames(initial);
            let mut cursor = Cursor::new();
            let mut stack = UndoStack::new();

            let mut after_edits = Vec::new();
            for step in steps {
                if let Some(edit) = edit_for(step, &inputs, &mut cursor) {
                    let recorded = stack.undo_len();
                    stack.push(edit, &mut inputs, &mut cursor).unwrap();
                    if stack.undo_len() > recorded {
                        after_edits.push(document_state(&inputs, &cursor));
                    }
                }
            }

            let mut undone = 0;
            while undone < undos && stack.undo(&mut inputs, &mut cursor) {
                undone += 1;
            }
            for expected in &after_edits[after_edits.len() - undone..] {
                prop_assert!(stack.redo(&mut inputs, &mut cursor));
                prop_assert_eq!(&document_state(&inputs, &cursor), expected);
            }
            prop_assert!(!stack.can_redo());
        }
    }
}
