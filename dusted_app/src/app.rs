use std::{
    cell::RefCell,
    env,
    path::{Path, PathBuf},
    rc::Rc,
    sync::mpsc::{Receiver, TryRecvError},
};

use dusted_model::{Cursor, Edit, Inputs, UndoStack, UndoStatus};

use crate::{
    global_env, logging, AppError, Character, Config, DustedEnv, GameOutput, Level, PlayerPath,
    Replay,
};

/// Label and enabled state of a menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub enabled: bool,
}

/// The undo and redo entries of the Edit menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditMenu {
    pub undo: MenuItem,
    pub redo: MenuItem,
}

impl EditMenu {
    fn from_status(status: &UndoStatus) -> Self {
        Self {
            undo: MenuItem {
                label: menu_label("Undo", &status.undo_text),
                enabled: status.can_undo,
            },
            redo: MenuItem {
                label: menu_label("Redo", &status.redo_text),
                enabled: status.can_redo,
            },
        }
    }
}

fn menu_label(action: &str, text: &str) -> String {
    if text.is_empty() {
        action.to_string()
    } else {
        format!("{} {}", action, text)
    }
}

/// The open document and the editor state around it.
#[derive(Debug)]
pub struct App {
    config: Config,
    file: Option<PathBuf>,
    level: Level,
    character: Character,
    inputs: Inputs,
    cursor: Cursor,
    undo_stack: UndoStack,
    edit_menu: Rc<RefCell<EditMenu>>,
    player_path: PlayerPath,
}

impl App {
    /// Create an editor with an empty document.
    pub fn new(config: Config) -> Self {
        if !config.has_dustforce_dir() {
            tracing::warn!(
                "could not find the Dustforce directory {}, please update it in settings",
                config.dustforce_path.display()
            );
        }

        let mut undo_stack = UndoStack::new();
        let edit_menu = Rc::new(RefCell::new(EditMenu::from_status(&undo_stack.status())));
        let menu = Rc::clone(&edit_menu);
        undo_stack.subscribe(move |status| *menu.borrow_mut() = EditMenu::from_status(status));

        Self {
            config,
            file: None,
            level: Level::default(),
            character: Character::default(),
            inputs: Inputs::new(),
            cursor: Cursor::new(),
            undo_stack,
            edit_menu,
            player_path: PlayerPath::default(),
        }
    }

    /// Set up logging and load the config from the environment's directory.
    pub fn start(env: &DustedEnv) -> Result<Self, AppError> {
        logging::init(&env.log_file_path())?;
        tracing::info!("Dusted {}", env.dusted_version());
        tracing::info!("Platform: {} {}", env::consts::OS, env::consts::ARCH);

        let config = Config::load(&env.config_file_path())?;
        Ok(Self::new(config))
    }

    /// [start](Self::start) in the process-wide environment.
    pub fn start_default() -> Result<Self, AppError> {
        let env = global_env()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        Self::start(&env)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Change the Dustforce directory and save the config.
    pub fn set_dustforce_directory(
        &mut self,
        path: impl Into<PathBuf>,
        config_path: &Path,
    ) -> Result<(), AppError> {
        self.config.dustforce_path = path.into();
        self.config.write(config_path)
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn set_file(&mut self, path: impl Into<PathBuf>) {
        self.file = Some(path.into());
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn character(&self) -> Character {
        self.character
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Cursor navigation. Edits must go through [edit](Self::edit).
    pub fn cursor_mut(&mut self) -> (&mut Cursor, &Inputs) {
        (&mut self.cursor, &self.inputs)
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo_stack
    }

    pub fn player_path(&self) -> &PlayerPath {
        &self.player_path
    }

    /// The current labels and enabled state of Undo and Redo.
    pub fn edit_menu(&self) -> EditMenu {
        self.edit_menu.borrow().clone()
    }

    /// Start an empty replay.
    pub fn new_file(&mut self, level_id: &str, character: Character) {
        tracing::info!("new replay: {} as {}", level_id, character);
        self.file = None;
        self.level.set(level_id);
        self.character = character;
        self.inputs.reset();
        self.cursor.reset();
        self.undo_stack.clear();
        self.player_path.clear();
    }

    /// Open a replay, replacing the current document.
    ///
    /// If the replay's inputs or character are malformed, the current document is kept.
    pub fn load_replay(&mut self, replay: &Replay, path: Option<PathBuf>) -> Result<(), AppError> {
        let snapshot = replay.inputs.first().ok_or(AppError::MissingPlayer)?;
        let &index = replay.characters.first().ok_or(AppError::MissingPlayer)?;
        let character = Character::from_index(index).ok_or(AppError::InvalidCharacter(index))?;

        self.inputs.set(snapshot)?;
        tracing::info!(
            "loaded replay: {} as {}, {} frames",
            replay.level,
            character,
            self.inputs.len()
        );
        self.file = path;
        self.level.set(&replay.level);
        self.character = character;
        self.cursor.reset();
        self.undo_stack.clear();
        self.player_path.clear();
        Ok(())
    }

    /// The document as a replay, ready to be written.
    pub fn replay(&self) -> Replay {
        Replay {
            username: "TAS".to_string(),
            level: self.level.get().to_string(),
            characters: vec![self.character.index()],
            inputs: vec![self.inputs.get()],
        }
    }

    pub fn edit(&mut self, edit: Edit) -> Result<(), AppError> {
        self.undo_stack
            .push(edit, &mut self.inputs, &mut self.cursor)?;
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        self.undo_stack.undo(&mut self.inputs, &mut self.cursor)
    }

    pub fn redo(&mut self) -> bool {
        self.undo_stack.redo(&mut self.inputs, &mut self.cursor)
    }

    /// Handle one line printed by the game.
    pub fn handle_output_line(&mut self, line: &str) {
        match GameOutput::parse(line) {
            Some(GameOutput::LevelStart(level)) => {
                tracing::info!("game started level {}", level);
                self.player_path.clear();
            }
            Some(GameOutput::Coordinate(coordinate)) => self.player_path.add(coordinate),
            None => {}
        }
    }

    /// Handle every line the game has printed so far without blocking.
    ///
    /// Returns false once the game's output has closed.
    pub fn drain_output(&mut self, lines: &Receiver<String>) -> bool {
        loop {
            match lines.try_recv() {
                Ok(line) => self.handle_output_line(&line),
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return false,
            }
        }
    }
}
