//! Fu of a decomposed hand.
//!
//! Waits are not analysed: they add no fu.

use super::group::Mentsu;
use super::tiles::Fon;
use super::yaku::WinningMethod;

/// Fu every winning hand starts with
pub const FUUTEI: usize = 20;
pub const CHIITOITSU_FU: usize = 25;

/// Fu of the shape alone: base, pair and sets.
pub fn mentsu_fu(mentsu: &[Mentsu], round_wind: Fon, seat_wind: Fon) -> usize {
    let mut fu = FUUTEI;
    for m in mentsu {
        if m.is_toitsu() {
            fu += 2 * m.hai.yakuhai_count(round_wind, seat_wind);
        } else if m.is_kootsu() {
            let closed = !m.open as usize;
            let non_simple = m.hai.is_jihai_or_1_9() as usize;
            fu += 1 << ((m.size() - 2) * 2 + closed + non_simple);
        }
    }
    fu
}

/// Add the winning method bonuses to `mentsu_fu` and round up.
pub fn agari_fu(mentsu_fu: usize, closed: bool, method: WinningMethod) -> usize {
    let mut fu = mentsu_fu;
    match method {
        WinningMethod::Ron if closed => fu += 10,
        WinningMethod::Tsumo if fu > FUUTEI => fu += 2,
        _ => {}
    }
    if !closed && fu == FUUTEI {
        fu += 2;
    }
    round_up(fu)
}

fn round_up(fu: usize) -> usize {
    (fu + 9) / 10 * 10
}
