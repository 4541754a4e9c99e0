//! Table snapshot a hand is valued against.

use std::fmt;
use std::path::Path;

use serde_derive::{Deserialize, Serialize};

use super::dora::dora_of;
use super::hand::{Te, TeError};
use super::tiles::{Fon, Hai, FON};
use super::yaku::WinningMethod;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Round wind
    pub wind: Fon,
    /// 4 players indexed by Ton/Nan/Shaa/Pee
    pub players: [Player; 4],
    #[serde(default)]
    pub dora_indicators: Vec<Hai>,
    /// Only read for a player in riichi
    #[serde(default)]
    pub uradora_indicators: Vec<Hai>,
    #[serde(default)]
    pub agari: Agari,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    pub te: Te,
    pub riichi: Option<Riichi>,
    /// Own turns already started, counting from 0
    pub turn: usize,
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Riichi {
    /// Own turn on which riichi was declared
    pub turn: usize,
    /// Some call happened at the table before the declaration
    #[serde(default)]
    pub called_before: bool,
    /// Some call happened at the table after the declaration
    #[serde(default)]
    pub called_after: bool,
}

/// How the winning tile came in.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Agari {
    pub method: WinningMethod,
    /// Last tile of the wall, or its discard
    #[serde(default)]
    pub haitei: bool,
    /// Replacement tile after a kan
    #[serde(default)]
    pub rinshan: bool,
    /// Tile robbed from an added kan
    #[serde(default)]
    pub chankan: bool,
}

#[derive(Debug)]
pub enum LoadGameError {
    Io(std::io::Error),
    Ron(ron::error::SpannedError),
    Te(TeError),
}

impl fmt::Display for LoadGameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadGameError::Io(e) => write!(f, "cannot read game state: {}", e),
            LoadGameError::Ron(e) => write!(f, "invalid game state: {}", e),
            LoadGameError::Te(e) => write!(f, "invalid hand in game state: {}", e),
        }
    }
}

impl std::error::Error for LoadGameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadGameError::Io(e) => Some(e),
            LoadGameError::Ron(e) => Some(e),
            LoadGameError::Te(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoadGameError {
    fn from(e: std::io::Error) -> Self {
        LoadGameError::Io(e)
    }
}

impl From<ron::error::SpannedError> for LoadGameError {
    fn from(e: ron::error::SpannedError) -> Self {
        LoadGameError::Ron(e)
    }
}

impl From<TeError> for LoadGameError {
    fn from(e: TeError) -> Self {
        LoadGameError::Te(e)
    }
}

impl Game {
    pub fn new(wind: Fon) -> Self {
        Self {
            wind,
            players: Default::default(),
            dora_indicators: vec![],
            uradora_indicators: vec![],
            agari: Agari::default(),
        }
    }

    pub fn from_ron_str(s: &str) -> Result<Self, LoadGameError> {
        let game: Game = ron::de::from_str(s)?;
        game.validate()?;
        Ok(game)
    }

    pub fn from_ron_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadGameError> {
        let file = std::fs::File::open(path)?;
        let game: Game = ron::de::from_reader(file)?;
        game.validate()?;
        Ok(game)
    }

    /// Check every hand's call melds.
    pub fn validate(&self) -> Result<(), TeError> {
        self.players.iter().try_for_each(|player| player.te.validate())
    }

    pub fn player(&self, wind: Fon) -> &Player {
        &self.players[wind as usize]
    }

    pub fn player_mut(&mut self, wind: Fon) -> &mut Player {
        &mut self.players[wind as usize]
    }

    /// Dora shown by the revealed indicators
    pub fn dora(&self) -> impl Iterator<Item = Hai> + '_ {
        self.dora_indicators.iter().map(|hai| dora_of(*hai))
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Round: {}", Hai::fon(self.wind))?;
        write!(f, "Dora:")?;
        for hai in self.dora() {
            write!(f, " {}", hai)?;
        }
        writeln!(f)?;
        for fon in FON {
            let player = self.player(fon);
            write!(f, "{} {}", Hai::fon(fon), player.te)?;
            if player.riichi.is_some() {
                write!(f, " (riichi)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
