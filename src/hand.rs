use std::fmt;

use serde_derive::{Deserialize, Serialize};

use super::group::Group;
use super::tiles::{Hai, Tile};

/// Slots in a hand, the drawn tile included.
pub const MAX_HAND_SIZE: usize = 20;
/// Slot reserved for the drawn tile.
pub const DRAWN_INDEX: usize = MAX_HAND_SIZE - 1;
/// Groups of 3 or more tiles in a complete hand.
pub const MAX_GROUPS: usize = 4;

/// A player's hand.
///
/// Tiles locked by calls occupy the first `call_tiles` slots; `fuuro` holds
/// the groups formed by those calls. Empty slots are `None`.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Te {
    hai: [Option<Tile>; MAX_HAND_SIZE],
    call_tiles: usize,
    fuuro: Vec<Group>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TeError {
    /// No free slot is left for the tiles
    Full,
    /// Already 4 call melds
    TooManyFuuro,
    /// A call meld has 3 or 4 tiles
    InvalidFuuroSize(usize),
    /// Call tiles overlap the drawn slot
    InvalidCallTiles(usize),
    /// A call meld points outside the call tiles
    FuuroOutOfRange(usize),
}

impl fmt::Display for TeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeError::Full => write!(f, "hand is full"),
            TeError::TooManyFuuro => write!(f, "cannot have more than {} calls", MAX_GROUPS),
            TeError::InvalidFuuroSize(size) => write!(f, "invalid call meld size: {}", size),
            TeError::InvalidCallTiles(n) => write!(f, "invalid number of call tiles: {}", n),
            TeError::FuuroOutOfRange(index) => {
                write!(f, "call meld slot {} is not a call tile", index)
            }
        }
    }
}

impl std::error::Error for TeError {}

impl Te {
    /// Concealed hand made of `tiles`, in order.
    pub fn from_tiles(tiles: &[Tile]) -> Result<Self, TeError> {
        if tiles.len() > DRAWN_INDEX {
            return Err(TeError::Full);
        }
        let mut te = Te::default();
        for (slot, tile) in te.hai.iter_mut().zip(tiles) {
            *slot = Some(*tile);
        }
        Ok(te)
    }

    /// Lock `tiles` as a call meld in front of the hand.
    ///
    /// Open calls (pon, chi, open kan) are `open`; a closed kan is locked but
    /// not open.
    pub fn push_fuuro(&mut self, tiles: &[Tile], open: bool) -> Result<(), TeError> {
        if !(3..=4).contains(&tiles.len()) {
            return Err(TeError::InvalidFuuroSize(tiles.len()));
        }
        if self.fuuro.len() >= MAX_GROUPS {
            return Err(TeError::TooManyFuuro);
        }
        let concealed: Vec<Tile> = self.hai[self.call_tiles..DRAWN_INDEX]
            .iter()
            .flatten()
            .copied()
            .collect();
        let start = self.call_tiles;
        if start + tiles.len() + concealed.len() > DRAWN_INDEX {
            return Err(TeError::Full);
        }

        for (i, tile) in tiles.iter().chain(concealed.iter()).enumerate() {
            self.hai[start + i] = Some(*tile);
        }
        for slot in &mut self.hai[start + tiles.len() + concealed.len()..DRAWN_INDEX] {
            *slot = None;
        }

        let indices: Vec<usize> = (start..start + tiles.len()).collect();
        self.fuuro.push(Group::new(&indices, open, !open));
        self.call_tiles += tiles.len();
        Ok(())
    }

    /// Put a tile in the drawn slot.
    pub fn draw(&mut self, tile: Tile) {
        self.hai[DRAWN_INDEX] = Some(tile);
    }

    /// Swap the drawn tile with the tile at `index`.
    pub fn swap_drawn(&mut self, index: usize) {
        self.hai.swap(index, DRAWN_INDEX);
    }

    /// Take the drawn tile out of the hand.
    pub fn discard_drawn(&mut self) -> Option<Tile> {
        self.hai[DRAWN_INDEX].take()
    }

    pub fn clear(&mut self) {
        *self = Te::default();
    }

    pub fn get(&self, index: usize) -> Option<Tile> {
        self.hai.get(index).copied().flatten()
    }

    pub fn hai(&self, index: usize) -> Option<Hai> {
        self.get(index).map(Tile::identity)
    }

    pub fn call_tiles(&self) -> usize {
        self.call_tiles
    }

    pub fn fuuro(&self) -> &[Group] {
        &self.fuuro
    }

    /// Check the call melds of a hand built outside `push_fuuro`, such as a
    /// loaded snapshot.
    pub fn validate(&self) -> Result<(), TeError> {
        if self.call_tiles > DRAWN_INDEX {
            return Err(TeError::InvalidCallTiles(self.call_tiles));
        }
        if self.fuuro.len() > MAX_GROUPS {
            return Err(TeError::TooManyFuuro);
        }
        for group in &self.fuuro {
            if !(3..=4).contains(&group.size()) {
                return Err(TeError::InvalidFuuroSize(group.size()));
            }
            if let Some(index) = group.indices().find(|i| *i >= self.call_tiles) {
                return Err(TeError::FuuroOutOfRange(index));
            }
        }
        Ok(())
    }

    /// A hand is closed as long as it has no open call. Closed kans keep it
    /// closed.
    pub fn is_closed(&self) -> bool {
        self.fuuro.iter().all(|group| !group.open())
    }

    /// Every tile in the hand, call tiles included.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.hai.iter().flatten()
    }

    /// Tiles not locked by a call.
    pub fn concealed(&self) -> impl Iterator<Item = &Tile> {
        self.hai[self.call_tiles..].iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.tiles().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bit mask of every occupied slot.
    pub fn occupied_mask(&self) -> u32 {
        self.hai
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_some())
            .fold(0, |mask, (i, _)| mask | 1 << i)
    }
}

impl fmt::Display for Te {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tile) in self.hai.iter().enumerate() {
            if i == self.call_tiles && i != 0 {
                write!(f, "| ")?;
            }
            if let Some(tile) = tile {
                write!(f, "{}", tile)?;
            }
        }
        Ok(())
    }
}
