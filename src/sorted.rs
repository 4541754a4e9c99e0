//! Sorted view of the concealed part of a hand.
//!
//! Groups reference hand slots, but candidate search wants the tiles in
//! order. `SortedHand` translates between the two.

use std::ops::Index;

use super::hand::{Te, MAX_HAND_SIZE};
use super::tiles::Hai;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SortedHai {
    pub hai: Hai,
    /// Slot of this tile in the hand
    pub index: usize,
    /// Sorted position of the next tile with a different identity, or the
    /// length of the sorted hand
    pub next_type: usize,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SortedHand {
    tiles: Vec<SortedHai>,
}

impl SortedHand {
    /// Sort every non-call, non-empty slot of `te` by identity. Red fives sort
    /// like plain fives; ties keep slot order.
    pub fn new(te: &Te) -> Self {
        let mut tiles: Vec<SortedHai> = (te.call_tiles()..MAX_HAND_SIZE)
            .filter_map(|index| {
                te.hai(index).map(|hai| SortedHai {
                    hai,
                    index,
                    next_type: 0,
                })
            })
            .collect();
        tiles.sort_by_key(|tile| tile.hai);

        let len = tiles.len();
        for i in (0..len).rev() {
            tiles[i].next_type = if i + 1 < len && tiles[i + 1].hai == tiles[i].hai {
                tiles[i + 1].next_type
            } else {
                i + 1
            };
        }

        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&SortedHai> {
        self.tiles.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SortedHai> {
        self.tiles.iter()
    }

    pub fn as_slice(&self) -> &[SortedHai] {
        &self.tiles
    }

    pub fn hai(&self) -> impl Iterator<Item = Hai> + '_ {
        self.tiles.iter().map(|tile| tile.hai)
    }

    /// Hand slot of the tile at sorted `position`.
    pub fn original_index(&self, position: usize) -> Option<usize> {
        self.get(position).map(|tile| tile.index)
    }

    /// Sorted position of the tile in hand slot `index`.
    pub fn position(&self, index: usize) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.index == index)
    }
}

impl Index<usize> for SortedHand {
    type Output = SortedHai;

    fn index(&self, position: usize) -> &SortedHai {
        &self.tiles[position]
    }
}
