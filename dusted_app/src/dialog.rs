//! Modal prompts, described as data.
//!
//! A frontend implements [Prompt] to show the request however it likes and return what the
//! user entered, or `None` if they cancelled.

use crate::Character;

/// A single-line text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub label: String,
    pub button: String,
    pub initial: String,
}

/// A choice between fixed options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceRequest {
    pub label: String,
    pub options: Vec<String>,
    pub selected: usize,
}

pub trait Prompt {
    /// Ask for a line of text.
    fn ask(&mut self, request: &PromptRequest) -> Option<String>;

    /// Ask the user to pick one of `request.options`, returning its index.
    fn choose(&mut self, request: &ChoiceRequest) -> Option<usize>;
}

/// The settings for a new, empty replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReplay {
    pub level_id: String,
    pub character: Character,
}

/// Ask for a replay id to download.
///
/// Keeps asking until the user enters a number or cancels.
pub fn ask_replay_id(prompt: &mut impl Prompt) -> Option<u64> {
    let mut request = PromptRequest {
        label: "Replay id:".to_string(),
        button: "Load".to_string(),
        initial: String::new(),
    };
    loop {
        let text = prompt.ask(&request)?;
        match text.trim().parse::<u64>() {
            Ok(replay_id) => return Some(replay_id),
            Err(_) => {
                tracing::info!("invalid replay id {:?}", text);
                request.initial = text;
            }
        }
    }
}

/// Ask for the character and level of a new replay.
pub fn ask_new_replay(prompt: &mut impl Prompt, character: Character) -> Option<NewReplay> {
    let choice = ChoiceRequest {
        label: "Character:".to_string(),
        options: Character::all()
            .iter()
            .map(|character| character.name().to_string())
            .collect(),
        selected: character.index(),
    };
    let character = Character::from_index(prompt.choose(&choice)?)?;

    let level_id = prompt.ask(&PromptRequest {
        label: "Level id:".to_string(),
        button: "Create".to_string(),
        initial: String::new(),
    })?;
    let level_id = level_id.trim();
    if level_id.is_empty() {
        return None;
    }

    Some(NewReplay {
        level_id: level_id.to_string(),
        character,
    })
}
