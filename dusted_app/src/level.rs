use std::fmt;

/// The playable characters, in replay order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Character {
    #[default]
    Dustman,
    Dustgirl,
    Dustkid,
    Dustworth,
}

impl Character {
    pub fn all() -> &'static [Character] {
        &[
            Self::Dustman,
            Self::Dustgirl,
            Self::Dustkid,
            Self::Dustworth,
        ]
    }

    /// The character's index in a replay's character list.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Character::Dustman => "dustman",
            Character::Dustgirl => "dustgirl",
            Character::Dustkid => "dustkid",
            Character::Dustworth => "dustworth",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|character| character.name() == name)
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The level a replay is played on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Level {
    id: String,
}

impl Level {
    pub fn get(&self) -> &str {
        &self.id
    }

    pub fn set(&mut self, id: &str) {
        self.id = id.to_string();
    }
}
