use crate::error::UsageError;
use std::fmt;
use std::str::FromStr;

/// Camera orientation, in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub fn from_quarter_turns(turns: u8) -> Result<Self, UsageError> {
        match turns {
            0 => Ok(Rotation::R0),
            1 => Ok(Rotation::R90),
            2 => Ok(Rotation::R180),
            3 => Ok(Rotation::R270),
            other => Err(UsageError::InvalidRotation(other.to_string())),
        }
    }

    pub fn quarter_turns(self) -> u8 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 1,
            Rotation::R180 => 2,
            Rotation::R270 => 3,
        }
    }

    pub fn degrees(self) -> u16 {
        self.quarter_turns() as u16 * 90
    }
}

impl FromStr for Rotation {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| UsageError::InvalidRotation(s.to_string()))
            .and_then(Rotation::from_quarter_turns)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    #[default]
    Overworld,
    Nether,
    End,
}

/// Accepted spellings, canonical identifiers first.
pub const DIMENSION_ALIASES: &[(&str, Dimension)] = &[
    ("overworld", Dimension::Overworld),
    ("the_nether", Dimension::Nether),
    ("the_end", Dimension::End),
    ("nether", Dimension::Nether),
    ("end", Dimension::End),
];

impl Dimension {
    pub fn id(self) -> &'static str {
        match self {
            Dimension::Overworld => "overworld",
            Dimension::Nether => "the_nether",
            Dimension::End => "the_end",
        }
    }

    /// Name Mineways uses for its "View" script command.
    pub(crate) fn mineways_name(self) -> &'static str {
        match self {
            Dimension::Overworld => "Overworld",
            Dimension::Nether => "Nether",
            Dimension::End => "The End",
        }
    }
}

impl FromStr for Dimension {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = wanted.strip_prefix("minecraft:").unwrap_or(&wanted);
        DIMENSION_ALIASES
            .iter()
            .find(|(alias, _)| *alias == wanted)
            .map(|(_, dimension)| *dimension)
            .ok_or_else(|| UsageError::UnknownDimension(s.to_string()))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub rotation: Rotation,
    pub dimension: Dimension,
    /// Passed to the compositor's exposure node; 0 leaves the render unchanged.
    pub exposure: f32,
    pub trim: bool,
    pub force: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            rotation: Rotation::R0,
            dimension: Dimension::Overworld,
            exposure: 0.0,
            trim: true,
            force: false,
        }
    }
}
