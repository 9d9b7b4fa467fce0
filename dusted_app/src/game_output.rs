use std::str::FromStr;

/// Dustforce draws the player origin this far below the reported position.
const PLAYER_Y_OFFSET: i32 = 48;

/// A line printed by the game while watching a replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutput {
    /// A level was started.
    LevelStart(String),
    /// The player's position on a frame.
    Coordinate(Coordinate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    pub frame: u32,
    pub x: i32,
    pub y: i32,
}

impl GameOutput {
    /// Parse a line of game output. Unrecognized lines return `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end();
        if let Some(level) = line.strip_prefix("START ") {
            return Some(GameOutput::LevelStart(level.to_string()));
        }

        let mut parts = line.split(' ');
        let frame = parse_part(parts.next())?;
        let x: i32 = parse_part(parts.next())?;
        let y: i32 = parse_part(parts.next())?;
        if parts.next().is_some() {
            return None;
        }
        Some(GameOutput::Coordinate(Coordinate {
            frame,
            x,
            y: y - PLAYER_Y_OFFSET,
        }))
    }
}

fn parse_part<T: FromStr>(part: Option<&str>) -> Option<T> {
    part.and_then(|part| part.parse().ok())
}

/// The player positions reported during the current playback, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPath {
    coordinates: Vec<Coordinate>,
}

impl PlayerPath {
    pub fn add(&mut self, coordinate: Coordinate) {
        self.coordinates.push(coordinate);
    }

    pub fn clear(&mut self) {
        self.coordinates.clear();
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// The most recent position reported for `frame`.
    pub fn at_frame(&self, frame: u32) -> Option<Coordinate> {
        self.coordinates
            .iter()
            .rev()
            .find(|coordinate| coordinate.frame == frame)
            .copied()
    }
}
