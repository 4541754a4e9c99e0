use std::fmt;

use serde_derive::{Deserialize, Serialize};

use super::dora::DoraCount;
use super::game::{Game, Player};
use super::combination::WinningCombination;
use super::group::Mentsu;
use super::hand::Te;
use super::sorted::SortedHand;
use super::tiles::{Fon, Hai, JiHai, Sangen, Values, SUU, VALUES};

#[derive(Debug, Default, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum WinningMethod {
    Ron,
    #[default]
    Tsumo,
}

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Yaku {
    Menzentsumo,
    Riichi,
    Ippatsu,
    Tanyao,
    Pinfu,
    Iipeikou,
    Haku,
    Hatsu,
    Chun,
    BaNoKaze,
    JibunNoKaze,
    Chankan,
    RinshanKaihou,
    Haiteiraoyue,
    Houteiraoyui,
    Daburii,
    Chiitoitsu,
    Toitoi,
    SanAnkou,
    SanshokuDoukou,
    SanshokuDoujun,
    Honroutou,
    Ittsuu,
    Chanta,
    Shousangen,
    Sankantsu,
    Junchan,
    Ryanpeikou,
    Ryuuiisou,
    Daisangen,
    Shousuushii,
    Tsuuiisou,
    Kokushimusou,
    Suuankou,
    Chinroutou,
    Suukantsu,
    Daisuushi,
}

use Yaku::*;

impl Yaku {
    pub fn han(self, closed: bool) -> YakuValue {
        use YakuValue::*;
        match self {
            Menzentsumo => Han(1),
            Riichi => Han(1),
            Ippatsu => Han(1),
            Tanyao => Han(1),
            Pinfu => Han(1),
            Iipeikou => Han(1),
            Haku => Han(1),
            Hatsu => Han(1),
            Chun => Han(1),
            BaNoKaze => Han(1),
            JibunNoKaze => Han(1),
            Chankan => Han(1),
            RinshanKaihou => Han(1),
            Haiteiraoyue => Han(1),
            Houteiraoyui => Han(1),
            Daburii => Han(2),
            Chiitoitsu => Han(2),
            Toitoi => Han(2),
            SanAnkou => Han(2),
            SanshokuDoukou => Han(2),
            SanshokuDoujun => Han(if closed { 2 } else { 1 }),
            Honroutou => Han(2),
            Ittsuu => Han(if closed { 2 } else { 1 }),
            Chanta => Han(if closed { 2 } else { 1 }),
            Shousangen => Han(2),
            Sankantsu => Han(2),
            Junchan => Han(if closed { 3 } else { 2 }),
            Ryanpeikou => Han(3),
            Ryuuiisou => Yakuman(1),
            Daisangen => Yakuman(1),
            Shousuushii => Yakuman(1),
            Tsuuiisou => Yakuman(1),
            Kokushimusou => Yakuman(1),
            Suuankou => Yakuman(1),
            Chinroutou => Yakuman(1),
            Suukantsu => Yakuman(1),
            Daisuushi => Yakuman(2),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Menzentsumo => "Menzen Tsumo",
            Riichi => "Riichi",
            Ippatsu => "Ippatsu",
            Tanyao => "Tanyao",
            Pinfu => "Pinfu",
            Iipeikou => "Iipeikou",
            Haku => "Yakuhai (Haku)",
            Hatsu => "Yakuhai (Hatsu)",
            Chun => "Yakuhai (Chun)",
            BaNoKaze => "Yakuhai (Round wind)",
            JibunNoKaze => "Yakuhai (Seat wind)",
            Chankan => "Chankan",
            RinshanKaihou => "Rinshan Kaihou",
            Haiteiraoyue => "Haitei Raoyue",
            Houteiraoyui => "Houtei Raoyui",
            Daburii => "Double Riichi",
            Chiitoitsu => "Chiitoitsu",
            Toitoi => "Toitoi",
            SanAnkou => "San Ankou",
            SanshokuDoukou => "Sanshoku Doukou",
            SanshokuDoujun => "Sanshoku Doujun",
            Honroutou => "Honroutou",
            Ittsuu => "Ittsuu",
            Chanta => "Chanta",
            Shousangen => "Shousangen",
            Sankantsu => "Sankantsu",
            Junchan => "Junchan",
            Ryanpeikou => "Ryanpeikou",
            Ryuuiisou => "Ryuuiisou",
            Daisangen => "Daisangen",
            Shousuushii => "Shousuushii",
            Tsuuiisou => "Tsuuiisou",
            Kokushimusou => "Kokushi Musou",
            Suuankou => "Suu Ankou",
            Chinroutou => "Chinroutou",
            Suukantsu => "Suukantsu",
            Daisuushi => "Daisuushii",
        }
    }
}

impl fmt::Display for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of a yaku or of a whole hand.
///
/// `Yakuman(1)` is a yakuman, `Yakuman(2)` a double yakuman. Counted han
/// never make a yakuman stronger, and two yakuman keep the higher tier.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum YakuValue {
    Han(usize),
    Yakuman(usize),
}

impl Default for YakuValue {
    fn default() -> Self {
        YakuValue::Han(0)
    }
}

impl std::ops::Add for YakuValue {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        use YakuValue::*;
        match (self, other) {
            (Han(han1), Han(han2)) => Han(han1 + han2),
            (Yakuman(yakuman), Han(_)) => Yakuman(yakuman),
            (Han(_), Yakuman(yakuman)) => Yakuman(yakuman),
            (Yakuman(yakuman1), Yakuman(yakuman2)) => Yakuman(yakuman1.max(yakuman2)),
        }
    }
}

impl fmt::Display for YakuValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YakuValue::Han(han) => write!(f, "{} han", han),
            YakuValue::Yakuman(1) => write!(f, "yakuman"),
            YakuValue::Yakuman(n) => write!(f, "{}x yakuman", n),
        }
    }
}

/// A hand about to be valued, with the table state it is valued against.
#[derive(Debug, Clone)]
pub struct AgariTe<'g> {
    game: &'g Game,
    player: &'g Player,
    wind: Fon,
    sorted: SortedHand,
}

impl<'g> AgariTe<'g> {
    pub fn new(game: &'g Game, wind: Fon) -> AgariTe<'g> {
        let player = game.player(wind);
        AgariTe {
            game,
            player,
            wind,
            sorted: SortedHand::new(&player.te),
        }
    }

    pub fn te(&self) -> &'g Te {
        &self.player.te
    }

    pub fn sorted(&self) -> &SortedHand {
        &self.sorted
    }

    pub fn round_wind(&self) -> Fon {
        self.game.wind
    }

    pub fn seat_wind(&self) -> Fon {
        self.wind
    }

    pub fn method(&self) -> WinningMethod {
        self.game.agari.method
    }

    pub fn closed(&self) -> bool {
        self.te().is_closed()
    }

    pub fn riichi(&self) -> bool {
        self.player.riichi.is_some()
    }

    /// Every tile of the hand, call melds included
    fn hai(&self) -> impl Iterator<Item = Hai> + 'g {
        self.te().tiles().map(|tile| tile.identity())
    }

    /// Dora, uradora (riichi only) and red fives held in the hand.
    pub fn dora(&self) -> DoraCount {
        let uradora: &[Hai] = if self.riichi() {
            &self.game.uradora_indicators
        } else {
            &[]
        };
        DoraCount::count(self.te().tiles(), &self.game.dora_indicators, uradora)
    }

    /// Yaku that depend on how the hand is split into groups.
    ///
    /// `mentsu_fu` is the fu of the shape before any winning method bonus.
    pub fn group_yaku(&self, mentsu: &[Mentsu], mentsu_fu: usize) -> Vec<Yaku> {
        let mut yakus = vec![];
        let closed = self.closed();

        if closed && mentsu_fu == super::fu::FUUTEI {
            yakus.push(Pinfu);
        }
        if closed {
            match peikou_count(mentsu) {
                0 => {}
                1 => yakus.push(Iipeikou),
                _ => yakus.push(Ryanpeikou),
            }
        }
        if sanshoku_doujun(mentsu) {
            yakus.push(SanshokuDoujun);
        }
        if ittsuu(mentsu) {
            yakus.push(Ittsuu);
        }
        if mentsu.iter().filter(|m| !m.is_toitsu()).all(Mentsu::is_kootsu) {
            yakus.push(Toitoi);
        }
        match mentsu.iter().filter(|m| m.is_kootsu() && !m.open).count() {
            3 => yakus.push(SanAnkou),
            4 => yakus.push(Suuankou),
            _ => {}
        }
        if sanshoku_doukou(mentsu) {
            yakus.push(SanshokuDoukou);
        }
        match mentsu.iter().filter(|m| m.is_kantsu()).count() {
            3 => yakus.push(Sankantsu),
            4 => yakus.push(Suukantsu),
            _ => {}
        }
        yakus.extend(yakuhai(mentsu, self.round_wind(), self.seat_wind()));
        if let Some(yaku) = chanta(mentsu) {
            yakus.push(yaku);
        }

        let sangen = count_sets(mentsu, Hai::is_sangen);
        let sangen_pair = mentsu.iter().any(|m| m.is_toitsu() && m.hai.is_sangen());
        match (sangen, sangen_pair) {
            (3, _) => yakus.push(Daisangen),
            (2, true) => yakus.push(Shousangen),
            _ => {}
        }
        let fon = count_sets(mentsu, Hai::is_fon);
        let fon_pair = mentsu.iter().any(|m| m.is_toitsu() && m.hai.is_fon());
        match (fon, fon_pair) {
            (4, _) => yakus.push(Daisuushi),
            (3, true) => yakus.push(Shousuushii),
            _ => {}
        }

        yakus
    }

    /// Yaku that only look at the tiles and the table, whatever the shape.
    /// The combination is only read to keep honroutou off a kokushi hand.
    pub fn hand_yaku(&self, combination: &WinningCombination) -> Vec<Yaku> {
        let mut yakus = vec![];

        if let Some(riichi) = &self.player.riichi {
            if riichi.turn == 0 && !riichi.called_before {
                yakus.push(Daburii);
            } else {
                yakus.push(Riichi);
            }
        }
        if self.hai().all(Hai::is_simple) {
            yakus.push(Tanyao);
        }

        let tsuuiisou = self.hai().all(Hai::is_jihai);
        let chinroutou = self.hai().all(Hai::is_terminal);
        if tsuuiisou {
            yakus.push(Tsuuiisou);
        }
        if chinroutou {
            yakus.push(Chinroutou);
        }
        if self.hai().all(Hai::is_green) {
            yakus.push(Ryuuiisou);
        }
        let kokushi = *combination == WinningCombination::Kokushimusou;
        if !tsuuiisou && !chinroutou && !kokushi && self.hai().all(Hai::is_jihai_or_1_9) {
            yakus.push(Honroutou);
        }

        if let Some(riichi) = &self.player.riichi {
            if !riichi.called_after && self.player.turn <= riichi.turn + 1 {
                yakus.push(Ippatsu);
            }
        }

        let agari = &self.game.agari;
        match self.method() {
            WinningMethod::Tsumo => {
                if agari.haitei {
                    yakus.push(Haiteiraoyue);
                }
                if agari.rinshan {
                    yakus.push(RinshanKaihou);
                }
            }
            WinningMethod::Ron => {
                if agari.haitei {
                    yakus.push(Houteiraoyui);
                }
                if agari.chankan {
                    yakus.push(Chankan);
                }
            }
        }

        yakus
    }
}

/// Runs counted by their lowest tile
fn shuntsu_count(mentsu: &[Mentsu]) -> [usize; 34] {
    let mut count = [0; 34];
    for m in mentsu.iter().filter(|m| m.is_shuntsu()) {
        count[m.hai.index()] += 1;
    }
    count
}

/// Triplets and quads, by tile
fn kootsu_set(mentsu: &[Mentsu]) -> [bool; 34] {
    let mut set = [false; 34];
    for m in mentsu.iter().filter(|m| m.is_kootsu()) {
        set[m.hai.index()] = true;
    }
    set
}

/// Number of pairs of identical runs
fn peikou_count(mentsu: &[Mentsu]) -> usize {
    shuntsu_count(mentsu).iter().map(|count| count / 2).sum()
}

fn sanshoku_doujun(mentsu: &[Mentsu]) -> bool {
    let runs = shuntsu_count(mentsu);
    VALUES[..7]
        .iter()
        .any(|value| SUU.iter().all(|suu| runs[Hai::suu(*suu, *value).index()] > 0))
}

fn ittsuu(mentsu: &[Mentsu]) -> bool {
    let runs = shuntsu_count(mentsu);
    SUU.iter().any(|suu| {
        [Values::Ii, Values::Suu, Values::Chii]
            .iter()
            .all(|value| runs[Hai::suu(*suu, *value).index()] > 0)
    })
}

fn sanshoku_doukou(mentsu: &[Mentsu]) -> bool {
    let sets = kootsu_set(mentsu);
    VALUES
        .iter()
        .any(|value| SUU.iter().all(|suu| sets[Hai::suu(*suu, *value).index()]))
}

fn count_sets(mentsu: &[Mentsu], filter: fn(Hai) -> bool) -> usize {
    mentsu
        .iter()
        .filter(|m| m.is_kootsu() && filter(m.hai))
        .count()
}

/// One yaku per value triplet or quad. A double wind counts twice.
fn yakuhai(mentsu: &[Mentsu], round_wind: Fon, seat_wind: Fon) -> Vec<Yaku> {
    let mut yakus = vec![];
    for m in mentsu.iter().filter(|m| m.is_kootsu()) {
        match m.hai {
            Hai::Ji(JiHai::Sangen(Sangen::Haku)) => yakus.push(Haku),
            Hai::Ji(JiHai::Sangen(Sangen::Hatsu)) => yakus.push(Hatsu),
            Hai::Ji(JiHai::Sangen(Sangen::Chun)) => yakus.push(Chun),
            Hai::Ji(JiHai::Fon(fon)) => {
                if fon == round_wind {
                    yakus.push(BaNoKaze);
                }
                if fon == seat_wind {
                    yakus.push(JibunNoKaze);
                }
            }
            Hai::Suu(..) => {}
        }
    }
    yakus
}

/// Every group holds a terminal or an honor.
/// Junchan when no honor is left in the hand.
fn chanta(mentsu: &[Mentsu]) -> Option<Yaku> {
    if !mentsu.iter().all(Mentsu::has_yaochuu) {
        return None;
    }
    if mentsu.iter().any(|m| m.hai.is_jihai()) {
        Some(Chanta)
    } else {
        Some(Junchan)
    }
}
