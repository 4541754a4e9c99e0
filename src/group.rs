use std::fmt;

use serde_derive::{Deserialize, Serialize};

use super::hand::{Te, MAX_GROUPS};
use super::tiles::{Hai, SuuHai, Values};

/// Up to 4 tiles of a hand, referenced by slot index.
///
/// Groups only hold indices: two candidate groups may share a slot until the
/// enumerator picks disjoint ones.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Group {
    indices: [u8; 4],
    size: u8,
    open: bool,
    locked: bool,
}

impl Group {
    pub fn new(indices: &[usize], open: bool, locked: bool) -> Self {
        debug_assert!((2..=4).contains(&indices.len()), "Group of {}", indices.len());
        let mut group = Group {
            indices: [0; 4],
            size: indices.len() as u8,
            open,
            locked,
        };
        for (slot, index) in group.indices.iter_mut().zip(indices) {
            *slot = *index as u8;
        }
        group
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn open(&self) -> bool {
        self.open
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().take(self.size()).map(|i| *i as usize)
    }

    /// One bit per occupied hand slot
    pub fn mask(&self) -> u32 {
        self.indices().fold(0, |mask, i| mask | 1 << i)
    }

    /// Whether the referenced tiles form a set (2 to 4 identical tiles) or a
    /// run (3 consecutive ranks of one suit).
    pub fn valid(&self, te: &Te) -> bool {
        self.mentsu(te).is_some()
    }

    /// Resolve the group against the hand it indexes.
    pub fn mentsu(&self, te: &Te) -> Option<Mentsu> {
        let mut hai = [None; 4];
        for (slot, index) in hai.iter_mut().zip(self.indices()) {
            *slot = Some(te.hai(index)?);
        }
        let hai = &mut hai[..self.size()];
        hai.sort();
        let first = hai[0]?;

        let kind = if hai.iter().all(|h| *h == Some(first)) {
            match self.size() {
                2 => MentsuKind::Toitsu,
                3 => MentsuKind::Kootsu,
                4 => MentsuKind::Kantsu,
                _ => return None,
            }
        } else {
            let middle = first.next_in_run();
            let last = middle.and_then(Hai::next_in_run);
            if self.size() != 3 || middle.is_none() || hai[1] != middle || hai[2] != last {
                return None;
            }
            MentsuKind::Shuntsu
        };

        Some(Mentsu {
            kind,
            hai: first,
            open: self.open,
        })
    }
}

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum MentsuKind {
    Toitsu,
    Shuntsu,
    Kootsu,
    Kantsu,
}

/// Resolved shape of a group.
///
/// `hai` is the tile of a set, or the lowest tile of a run.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct Mentsu {
    pub kind: MentsuKind,
    pub hai: Hai,
    pub open: bool,
}

impl Mentsu {
    pub fn is_toitsu(&self) -> bool {
        self.kind == MentsuKind::Toitsu
    }

    pub fn is_shuntsu(&self) -> bool {
        self.kind == MentsuKind::Shuntsu
    }

    /// Triplet or quad
    pub fn is_kootsu(&self) -> bool {
        matches!(self.kind, MentsuKind::Kootsu | MentsuKind::Kantsu)
    }

    pub fn is_kantsu(&self) -> bool {
        self.kind == MentsuKind::Kantsu
    }

    pub fn size(&self) -> usize {
        match self.kind {
            MentsuKind::Toitsu => 2,
            MentsuKind::Shuntsu | MentsuKind::Kootsu => 3,
            MentsuKind::Kantsu => 4,
        }
    }

    /// Contains a terminal or an honor
    pub fn has_yaochuu(&self) -> bool {
        match self.kind {
            MentsuKind::Shuntsu => matches!(
                self.hai,
                Hai::Suu(SuuHai {
                    value: Values::Ii | Values::Chii,
                    ..
                })
            ),
            _ => self.hai.is_jihai_or_1_9(),
        }
    }
}

impl fmt::Display for Mentsu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hai = self.hai;
        for _ in 0..self.size() {
            write!(f, "{}", hai)?;
            if self.is_shuntsu() {
                hai = hai.next();
            }
        }
        Ok(())
    }
}

/// Disjoint groups covering a hand: call melds first, then the rest.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct GroupSet {
    groups: [Group; MAX_GROUPS + 1],
    len: usize,
}

impl GroupSet {
    pub fn push(&mut self, group: Group) {
        self.groups[self.len] = group;
        self.len += 1;
    }

    pub fn pop(&mut self) -> Option<Group> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            Some(self.groups[self.len])
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == MAX_GROUPS + 1
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups[..self.len]
    }

    pub fn mask(&self) -> u32 {
        self.groups().iter().fold(0, |mask, g| mask | g.mask())
    }

    /// Resolved shapes, in group order. `None` if a group is not valid.
    pub fn mentsu(&self, te: &Te) -> Option<Vec<Mentsu>> {
        self.groups().iter().map(|g| g.mentsu(te)).collect()
    }
}
