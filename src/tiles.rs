use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Values {
    Ii = 1,
    Ryan = 2,
    San = 3,
    Suu = 4,
    Uu = 5,
    Roo = 6,
    Chii = 7,
    Paa = 8,
    Kyuu = 9,
}
pub const VALUES: [Values; 9] = [
    Values::Ii,
    Values::Ryan,
    Values::San,
    Values::Suu,
    Values::Uu,
    Values::Roo,
    Values::Chii,
    Values::Paa,
    Values::Kyuu,
];

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Suu {
    Wan,
    Pin,
    Sou,
}
pub const SUU: [Suu; 3] = [Suu::Wan, Suu::Pin, Suu::Sou];

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum JiHai {
    Fon(Fon),
    Sangen(Sangen),
}

/// Identity of a numbered tile. The red flag lives on [`Tile`].
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct SuuHai {
    pub suu: Suu,
    pub value: Values,
}

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Fon {
    Ton = 0,
    Nan = 1,
    Shaa = 2,
    Pee = 3,
}

impl Fon {
    pub fn next(self) -> Self {
        match self {
            Fon::Ton => Fon::Nan,
            Fon::Nan => Fon::Shaa,
            Fon::Shaa => Fon::Pee,
            Fon::Pee => Fon::Ton,
        }
    }
    pub fn prev(self) -> Self {
        match self {
            Fon::Ton => Fon::Pee,
            Fon::Nan => Fon::Ton,
            Fon::Shaa => Fon::Nan,
            Fon::Pee => Fon::Shaa,
        }
    }
}

pub const FON: [Fon; 4] = [Fon::Ton, Fon::Nan, Fon::Shaa, Fon::Pee];

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Sangen {
    Haku,
    Hatsu,
    Chun,
}
pub const SANGEN: [Sangen; 3] = [Sangen::Haku, Sangen::Hatsu, Sangen::Chun];

impl Sangen {
    pub fn next(self) -> Self {
        match self {
            Sangen::Haku => Sangen::Hatsu,
            Sangen::Hatsu => Sangen::Chun,
            Sangen::Chun => Sangen::Haku,
        }
    }
    pub fn prev(self) -> Self {
        match self {
            Sangen::Haku => Sangen::Chun,
            Sangen::Hatsu => Sangen::Haku,
            Sangen::Chun => Sangen::Hatsu,
        }
    }
}

/// Tile identity: the 34 distinct kinds of tile.
///
/// Sorting puts numbered tiles first (by suit, then rank) and honors last, so
/// the tiles of one run are always adjacent in a sorted hand.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Hai {
    Suu(SuuHai),
    Ji(JiHai),
}

impl Values {
    /// Cyclic successor (9 wraps to 1), as used by dora indicators.
    pub fn next(self) -> Self {
        match self {
            Values::Ii => Values::Ryan,
            Values::Ryan => Values::San,
            Values::San => Values::Suu,
            Values::Suu => Values::Uu,
            Values::Uu => Values::Roo,
            Values::Roo => Values::Chii,
            Values::Chii => Values::Paa,
            Values::Paa => Values::Kyuu,
            Values::Kyuu => Values::Ii,
        }
    }
    pub fn prev(self) -> Self {
        match self {
            Values::Ii => Values::Kyuu,
            Values::Ryan => Values::Ii,
            Values::San => Values::Ryan,
            Values::Suu => Values::San,
            Values::Uu => Values::Suu,
            Values::Roo => Values::Uu,
            Values::Chii => Values::Roo,
            Values::Paa => Values::Chii,
            Values::Kyuu => Values::Paa,
        }
    }
}

impl Hai {
    pub const fn suu(suu: Suu, value: Values) -> Self {
        Hai::Suu(SuuHai { suu, value })
    }

    pub const fn fon(fon: Fon) -> Self {
        Hai::Ji(JiHai::Fon(fon))
    }

    pub const fn sangen(sangen: Sangen) -> Self {
        Hai::Ji(JiHai::Sangen(sangen))
    }

    pub fn is_suuhai(self) -> bool {
        match self {
            Hai::Suu(..) => true,
            Hai::Ji(..) => false,
        }
    }

    pub fn is_jihai(self) -> bool {
        !self.is_suuhai()
    }

    /// Cyclic successor within the tile's own family. This is the dora
    /// indicated by `self`.
    pub fn next(self) -> Self {
        match self {
            Hai::Suu(SuuHai { suu, value }) => Hai::suu(suu, value.next()),
            Hai::Ji(JiHai::Fon(fon)) => Hai::fon(fon.next()),
            Hai::Ji(JiHai::Sangen(sangen)) => Hai::sangen(sangen.next()),
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Hai::Suu(SuuHai { suu, value }) => Hai::suu(suu, value.prev()),
            Hai::Ji(JiHai::Fon(fon)) => Hai::fon(fon.prev()),
            Hai::Ji(JiHai::Sangen(sangen)) => Hai::sangen(sangen.prev()),
        }
    }

    /// Tile one rank above in the same suit. `None` for 9 and for honors.
    pub fn next_in_run(self) -> Option<Self> {
        match self {
            Hai::Suu(SuuHai {
                value: Values::Kyuu,
                ..
            })
            | Hai::Ji(..) => None,
            hai => Some(hai.next()),
        }
    }

    /// Tile one rank below in the same suit. `None` for 1 and for honors.
    pub fn prev_in_run(self) -> Option<Self> {
        match self {
            Hai::Suu(SuuHai {
                value: Values::Ii, ..
            })
            | Hai::Ji(..) => None,
            hai => Some(hai.prev()),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Hai::Suu(SuuHai {
                value: Values::Ii | Values::Kyuu,
                ..
            })
        )
    }

    pub fn is_jihai_or_1_9(self) -> bool {
        self.is_jihai() || self.is_terminal()
    }

    pub fn is_simple(self) -> bool {
        !self.is_jihai_or_1_9()
    }

    pub fn is_sangen(self) -> bool {
        matches!(self, Hai::Ji(JiHai::Sangen(_)))
    }

    pub fn is_fon(self) -> bool {
        matches!(self, Hai::Ji(JiHai::Fon(_)))
    }

    /// Tiles allowed in an all green hand: 2, 3, 4, 6, 8 of bamboo and the
    /// green dragon.
    pub fn is_green(self) -> bool {
        matches!(
            self,
            Hai::Suu(SuuHai {
                suu: Suu::Sou,
                value: Values::Ryan | Values::San | Values::Suu | Values::Roo | Values::Paa,
            }) | Hai::Ji(JiHai::Sangen(Sangen::Hatsu))
        )
    }

    /// Number of value-tile titles this tile holds: one for the round wind,
    /// one for the seat wind, one for any dragon.
    pub fn yakuhai_count(self, round_wind: Fon, seat_wind: Fon) -> usize {
        match self {
            Hai::Ji(JiHai::Fon(fon)) => (fon == round_wind) as usize + (fon == seat_wind) as usize,
            Hai::Ji(JiHai::Sangen(_)) => 1,
            Hai::Suu(..) => 0,
        }
    }

    pub fn is_yakuhai(self, round_wind: Fon, seat_wind: Fon) -> bool {
        self.yakuhai_count(round_wind, seat_wind) > 0
    }

    /// Dense index in `0..34`, in sort order.
    pub fn index(self) -> usize {
        match self {
            Hai::Suu(SuuHai { suu, value }) => suu as usize * 9 + value as usize - 1,
            Hai::Ji(JiHai::Fon(fon)) => 27 + fon as usize,
            Hai::Ji(JiHai::Sangen(sangen)) => 31 + sangen as usize,
        }
    }

    /// All 34 identities, in sort order.
    pub fn all() -> [Hai; 34] {
        let mut hai = [Hai::sangen(Sangen::Haku); 34];
        let mut cnt = 0;
        for suu in &SUU {
            for value in &VALUES {
                hai[cnt] = Hai::suu(*suu, *value);
                cnt += 1;
            }
        }
        for fon in &FON {
            hai[cnt] = Hai::fon(*fon);
            cnt += 1;
        }
        for sangen in &SANGEN {
            hai[cnt] = Hai::sangen(*sangen);
            cnt += 1;
        }
        hai
    }

    /// The 13 terminal and honor identities.
    pub fn yaochuu() -> impl Iterator<Item = Hai> {
        Hai::all().into_iter().filter(|hai| hai.is_jihai_or_1_9())
    }

    pub fn to_char(self) -> char {
        let code = match self {
            Hai::Suu(SuuHai {
                suu: Suu::Wan,
                value,
            }) => 0x1F007 + value as u32 - 1,
            Hai::Suu(SuuHai {
                suu: Suu::Pin,
                value,
            }) => 0x1F019 + value as u32 - 1,
            Hai::Suu(SuuHai {
                suu: Suu::Sou,
                value,
            }) => 0x1F010 + value as u32 - 1,
            Hai::Ji(JiHai::Fon(fon)) => 0x1F000 + fon as u32,
            Hai::Ji(JiHai::Sangen(Sangen::Haku)) => 0x1F006,
            Hai::Ji(JiHai::Sangen(Sangen::Hatsu)) => 0x1F005,
            Hai::Ji(JiHai::Sangen(Sangen::Chun)) => 0x1F004,
        };
        std::char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

impl fmt::Display for Hai {
    /// Terminal-friendly rendering
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Add VS15 after the Chun tile for it to be shown as char (not emoji)
            Hai::Ji(JiHai::Sangen(Sangen::Chun)) => write!(f, "{}\u{FE0E}", self.to_char()),
            // Except for Chun, all tiles seem to be shown as half-width characters, so add space
            _ => write!(f, "{} ", self.to_char()),
        }
    }
}

/// A physical tile: an identity plus the red five flag.
///
/// Equality, ordering and hashing only look at the identity.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Tile {
    hai: Hai,
    #[serde(default)]
    aka: bool,
}

impl Tile {
    pub fn new(hai: Hai) -> Self {
        Self { hai, aka: false }
    }

    /// Red five of the given suit
    pub fn aka(suu: Suu) -> Self {
        Self {
            hai: Hai::suu(suu, Values::Uu),
            aka: true,
        }
    }

    pub fn identity(self) -> Hai {
        self.hai
    }

    pub fn is_aka(self) -> bool {
        self.aka
    }
}

impl From<Hai> for Tile {
    fn from(hai: Hai) -> Self {
        Tile::new(hai)
    }
}

impl PartialEq for Tile {
    /// Ignore akadora during comparison
    fn eq(&self, other: &Self) -> bool {
        self.hai.eq(&other.hai)
    }
}
impl Eq for Tile {}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.hai.cmp(&other.hai)
    }
}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hai.hash(state)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.hai.fmt(f)
    }
}

/// The 136 tiles of a set, with one red five in each suit.
pub fn make_all_tiles() -> [Tile; 136] {
    let mut tiles = [Tile::new(Hai::sangen(Sangen::Hatsu)); 136];
    let mut cnt = 0;

    for copy in 0..4 {
        for hai in Hai::all() {
            tiles[cnt] = match hai {
                Hai::Suu(SuuHai {
                    suu,
                    value: Values::Uu,
                }) if copy == 3 => Tile::aka(suu),
                _ => Tile::new(hai),
            };
            cnt += 1;
        }
    }
    tiles
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseHaiError {
    EmptyString,
    NoMahjongCharFound { string: String },
}

impl fmt::Display for ParseHaiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseHaiError::EmptyString => write!(f, "empty tile string"),
            ParseHaiError::NoMahjongCharFound { string } => {
                write!(f, "no mahjong tile character found in {:?}", string)
            }
        }
    }
}

impl std::error::Error for ParseHaiError {}

impl FromStr for Hai {
    type Err = ParseHaiError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(c) = s.chars().next() {
            for hai in Hai::all().iter() {
                if hai.to_char() == c {
                    return Ok(*hai);
                }
            }

            Err(ParseHaiError::NoMahjongCharFound {
                string: s.to_owned(),
            })
        } else {
            Err(ParseHaiError::EmptyString)
        }
    }
}

/// Parse a run of tile characters such as `"🀇🀈🀉"`. Whitespace and the VS15
/// selector are skipped.
pub fn hai_from_string(s: &str) -> Result<Vec<Hai>, ParseHaiError> {
    let mut out = vec![];
    for c in s.chars() {
        if c.is_whitespace() || c == '\u{FE0E}' {
            continue;
        }
        let mut buf = [0; 4];
        out.push(c.encode_utf8(&mut buf).parse()?);
    }
    Ok(out)
}
