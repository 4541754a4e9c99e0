//! Decomposition of a hand into scoring shapes.

use std::collections::HashSet;

use log::trace;

use super::group::{Group, GroupSet, Mentsu};
use super::hand::{Te, MAX_GROUPS};
use super::sorted::SortedHand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WinningCombination {
    /// 4 groups and a pair
    Normal(GroupSet),
    Chiitoitsu,
    Kokushimusou,
}

/// Every decomposition of the hand, normal shapes first.
pub fn winning_combinations(te: &Te, sorted: &SortedHand) -> Vec<WinningCombination> {
    let groups = candidates(te, sorted);
    let mut out: Vec<_> = group_sets(te, &groups)
        .into_iter()
        .map(WinningCombination::Normal)
        .collect();

    if try_chiitoitsu(te, sorted) {
        out.push(WinningCombination::Chiitoitsu);
    }
    if try_kokushimusou(te, sorted) {
        out.push(WinningCombination::Kokushimusou);
    }
    out
}

/// All groups that could be part of a decomposition. They may overlap.
///
/// Call melds come first, in call order, followed by the sets (pairs,
/// triplets, quads) and the runs found in the sorted hand.
pub fn candidates(te: &Te, sorted: &SortedHand) -> Vec<Group> {
    let mut groups: Vec<Group> = te.fuuro().to_vec();

    for size in 2..=4 {
        for window in sorted.as_slice().windows(size) {
            // Sorted, so comparing both ends is enough
            if window[0].hai != window[size - 1].hai {
                continue;
            }
            let indices: Vec<usize> = window.iter().map(|tile| tile.index).collect();
            groups.push(Group::new(&indices, false, false));
        }
    }

    for first in sorted.iter() {
        let (middle, last) = match first.hai.next_in_run() {
            Some(middle) => match middle.next_in_run() {
                Some(last) => (middle, last),
                None => continue,
            },
            None => continue,
        };
        let mut j = first.next_type;
        while j < sorted.len() && sorted[j].hai == middle {
            let mut k = sorted[j].next_type;
            while k < sorted.len() && sorted[k].hai == last {
                groups.push(Group::new(
                    &[first.index, sorted[j].index, sorted[k].index],
                    false,
                    false,
                ));
                k += 1;
            }
            j += 1;
        }
    }

    trace!("Candidate groups: {:?}", groups);
    groups
}

/// Every set of disjoint candidates covering the hand with 4 groups and a
/// pair.
///
/// `groups` must start with the hand's call melds, as returned by
/// [`candidates`]; they are always part of the result. Sets that only differ
/// by which copy of a tile went where are returned once.
pub fn group_sets(te: &Te, groups: &[Group]) -> Vec<GroupSet> {
    let fuuro = te.fuuro().len();
    let mut set = GroupSet::default();
    let mut used = 0;
    for group in &groups[..fuuro] {
        set.push(*group);
        used |= group.mask();
    }

    let mut search = GroupSetSearch {
        te,
        groups,
        full: te.occupied_mask(),
        seen: HashSet::new(),
        out: vec![],
    };
    search.run(&mut set, fuuro, used, false);

    for set in &search.out {
        trace!("Group set: {:?}", set.groups());
    }
    search.out
}

struct GroupSetSearch<'a> {
    te: &'a Te,
    groups: &'a [Group],
    /// Slots the selected groups must cover
    full: u32,
    /// Compositions already returned
    seen: HashSet<Vec<Mentsu>>,
    out: Vec<GroupSet>,
}

impl<'a> GroupSetSearch<'a> {
    fn run(&mut self, set: &mut GroupSet, start: usize, used: u32, pair: bool) {
        if set.len() == MAX_GROUPS + 1 {
            if pair && used == self.full {
                self.accept(set);
            }
            return;
        }

        for i in start..self.groups.len() {
            let group = self.groups[i];
            let mask = group.mask();
            let is_pair = group.size() == 2;
            if used & mask != 0 || (pair && is_pair) {
                continue;
            }
            set.push(group);
            self.run(set, i + 1, used | mask, pair || is_pair);
            set.pop();
        }
    }

    fn accept(&mut self, set: &GroupSet) {
        if let Some(mut key) = set.mentsu(self.te) {
            key.sort();
            if self.seen.insert(key) {
                self.out.push(*set);
            }
        }
    }
}

/// Seven pairs when the sorted hand is read two tiles at a time, closed 14
/// tile hand only. Four identical tiles make two pairs.
pub fn try_chiitoitsu(te: &Te, sorted: &SortedHand) -> bool {
    if !te.fuuro().is_empty() || sorted.len() != 14 {
        return false;
    }
    sorted
        .as_slice()
        .chunks(2)
        .all(|pair| pair[0].hai == pair[1].hai)
}

/// One of each terminal and honor plus one duplicate, closed 14 tile hand only
pub fn try_kokushimusou(te: &Te, sorted: &SortedHand) -> bool {
    if !te.fuuro().is_empty() || sorted.len() != 14 {
        return false;
    }
    if !sorted.hai().all(|hai| hai.is_jihai_or_1_9()) {
        return false;
    }
    let mut kinds: Vec<_> = sorted.hai().collect();
    kinds.dedup();
    kinds.len() == 13
}
