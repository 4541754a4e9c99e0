//! Riichi mahjong hand valuation.
//!
//! Given a table snapshot ([`Game`]) and the seat of a player, [`evaluate`]
//! finds every way to read the player's hand, scores each one and returns
//! the most valuable.

pub mod combination;
pub mod dora;
pub mod fu;
pub mod game;
pub mod group;
pub mod hand;
pub mod points;
pub mod score;
pub mod sorted;
pub mod tiles;
pub mod yaku;

pub use game::{Agari, Game, LoadGameError, Player, Riichi};
pub use hand::{Te, TeError};
pub use points::Payment;
pub use score::{evaluate, ScoreResult};
pub use tiles::{Fon, Hai, ParseHaiError, Tile};
pub use yaku::{WinningMethod, Yaku, YakuValue};
