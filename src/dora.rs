//! Dora succession and bonus tile counting.

use std::sync::OnceLock;

use serde_derive::{Deserialize, Serialize};

use super::tiles::{Hai, Tile};

static DORA_TABLE: OnceLock<[Hai; 34]> = OnceLock::new();

/// Indicator → dora table, indexed by [`Hai::index`]. Built on first use and
/// never written again.
pub fn dora_table() -> &'static [Hai; 34] {
    DORA_TABLE.get_or_init(|| Hai::all().map(Hai::next))
}

/// Dora indicated by `indicator`.
pub fn dora_of(indicator: Hai) -> Hai {
    dora_table()[indicator.index()]
}

/// Bonus tile counts of one hand.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DoraCount {
    pub dora: usize,
    pub uradora: usize,
    pub akadora: usize,
}

impl DoraCount {
    /// Count dora, uradora and red fives in `tiles`.
    ///
    /// A tile counts once per matching indicator, so a doubled indicator
    /// doubles the bonus.
    pub fn count<'a>(
        tiles: impl IntoIterator<Item = &'a Tile>,
        dora_indicators: &[Hai],
        uradora_indicators: &[Hai],
    ) -> Self {
        let dora: Vec<Hai> = dora_indicators.iter().map(|h| dora_of(*h)).collect();
        let uradora: Vec<Hai> = uradora_indicators.iter().map(|h| dora_of(*h)).collect();

        let mut count = DoraCount::default();
        for tile in tiles {
            let hai = tile.identity();
            count.dora += dora.iter().filter(|d| **d == hai).count();
            count.uradora += uradora.iter().filter(|d| **d == hai).count();
            count.akadora += tile.is_aka() as usize;
        }
        count
    }

    pub fn total(&self) -> usize {
        self.dora + self.uradora + self.akadora
    }
}
