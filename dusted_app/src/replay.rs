use dusted_model::InputsSnapshot;

/// The contents of a replay file.
///
/// Reading and writing the file format is done elsewhere; the editor only needs the level,
/// the characters, and the inputs of each player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replay {
    pub username: String,
    pub level: String,
    /// Character index for each player.
    pub characters: Vec<usize>,
    /// Inputs for each player.
    pub inputs: Vec<InputsSnapshot>,
}
