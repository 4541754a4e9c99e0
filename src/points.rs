use serde_derive::{Deserialize, Serialize};

use crate::yaku::{WinningMethod, YakuValue};

pub const MANGAN: usize = 2000;
pub const HANEMAN: usize = 3000;
pub const BAIMAN: usize = 4000;
pub const SANBAIMAN: usize = 6000;
pub const YAKUMAN: usize = 8000;
pub const DOUBLE_YAKUMAN: usize = 16000;

fn ceil100(points: usize) -> usize {
    (points + 99) / 100 * 100
}

/// Limit value reached by the hand, if any
fn limit(han: YakuValue, fu: usize) -> Option<usize> {
    match han {
        YakuValue::Yakuman(0) | YakuValue::Yakuman(1) => Some(YAKUMAN),
        YakuValue::Yakuman(_) => Some(DOUBLE_YAKUMAN),
        YakuValue::Han(han) => match han {
            13.. => Some(YAKUMAN),
            11 | 12 => Some(SANBAIMAN),
            8..=10 => Some(BAIMAN),
            6 | 7 => Some(HANEMAN),
            5 => Some(MANGAN),
            4 if fu >= 40 => Some(MANGAN),
            3 if fu >= 70 => Some(MANGAN),
            _ => None,
        },
    }
}

/// `fu × 2^(2 + han)`, or the limit value. Not rounded.
pub fn base_points(han: YakuValue, fu: usize) -> usize {
    if han == YakuValue::Han(0) {
        return 0;
    }
    match (limit(han, fu), han) {
        (Some(points), _) => points,
        (None, YakuValue::Han(han)) => fu << (2 + han),
        (None, YakuValue::Yakuman(_)) => unreachable!("Yakuman always reach a limit"),
    }
}

/// Basic points of a hand, rounded up to the next hundred.
pub fn basic_points(han: YakuValue, fu: usize) -> usize {
    ceil100(base_points(han, fu))
}

pub fn points_ron_oya(han: YakuValue, fu: usize) -> usize {
    ceil100(base_points(han, fu) * 6)
}

pub fn points_ron_ko(han: YakuValue, fu: usize) -> usize {
    ceil100(base_points(han, fu) * 4)
}

/// What each other player pays when the dealer self-draws.
pub fn points_tsumo_oya(han: YakuValue, fu: usize) -> usize {
    ceil100(base_points(han, fu) * 2)
}

/// What the dealer and each non-dealer pay when a non-dealer self-draws.
pub fn points_tsumo_ko(han: YakuValue, fu: usize) -> (usize, usize) {
    let base = base_points(han, fu);
    (ceil100(base * 2), ceil100(base))
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Payment {
    /// Paid in full by the discarder
    Ron(usize),
    /// Dealer self-draw, paid by each other player
    TsumoOya(usize),
    /// Non-dealer self-draw
    TsumoKo { oya: usize, ko: usize },
}

impl Payment {
    pub fn new(han: YakuValue, fu: usize, oya: bool, method: WinningMethod) -> Self {
        match (method, oya) {
            (WinningMethod::Ron, true) => Payment::Ron(points_ron_oya(han, fu)),
            (WinningMethod::Ron, false) => Payment::Ron(points_ron_ko(han, fu)),
            (WinningMethod::Tsumo, true) => Payment::TsumoOya(points_tsumo_oya(han, fu)),
            (WinningMethod::Tsumo, false) => {
                let (oya, ko) = points_tsumo_ko(han, fu);
                Payment::TsumoKo { oya, ko }
            }
        }
    }

    /// Points collected by the winner
    pub fn total(&self) -> usize {
        match *self {
            Payment::Ron(points) => points,
            Payment::TsumoOya(each) => 3 * each,
            Payment::TsumoKo { oya, ko } => oya + 2 * ko,
        }
    }
}
