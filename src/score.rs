//! Hand valuation: try every decomposition and keep the most valuable one.

use std::fmt;

use log::debug;
use serde_derive::{Deserialize, Serialize};

use super::combination::{winning_combinations, WinningCombination};
use super::dora::DoraCount;
use super::fu;
use super::game::Game;
use super::points::{self, Payment};
use super::tiles::Fon;
use super::yaku::{AgariTe, WinningMethod, Yaku, YakuValue};

/// Value of the best decomposition of a hand.
///
/// A hand that does not win, or wins without yaku, is worth
/// `ScoreResult::default()`: no han, no fu, no points.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub han: YakuValue,
    pub fu: usize,
    /// In the order they were found
    pub yaku: Vec<(Yaku, YakuValue)>,
    pub dora: DoraCount,
    pub basic_points: usize,
}

impl ScoreResult {
    pub fn is_agari(&self) -> bool {
        self.basic_points > 0
    }

    pub fn payment(&self, oya: bool, method: WinningMethod) -> Payment {
        Payment::new(self.han, self.fu, oya, method)
    }

    fn key(&self) -> (usize, YakuValue, usize) {
        (self.basic_points, self.han, self.fu)
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_agari() {
            return writeln!(f, "No yaku");
        }
        for (yaku, value) in &self.yaku {
            writeln!(f, "{:<24}{}", yaku.name(), value)?;
        }
        let dora = [
            ("Dora", self.dora.dora),
            ("Uradora", self.dora.uradora),
            ("Akadora", self.dora.akadora),
        ];
        for (name, count) in dora.iter().filter(|(_, count)| *count > 0) {
            writeln!(f, "{:<24}{}", name, YakuValue::Han(*count))?;
        }
        writeln!(f, "{}, {} fu: {} basic points", self.han, self.fu, self.basic_points)
    }
}

/// Tally of one decomposition
#[derive(Debug, Default)]
struct ScoreInfo {
    han: YakuValue,
    fu: usize,
    yaku: Vec<(Yaku, YakuValue)>,
    dora: DoraCount,
}

impl ScoreInfo {
    fn new(fu: usize) -> Self {
        Self {
            fu,
            ..Default::default()
        }
    }

    fn push(&mut self, yaku: Yaku, closed: bool) {
        let value = yaku.han(closed);
        self.han = self.han + value;
        self.yaku.push((yaku, value));
    }

    fn add_dora(&mut self, dora: DoraCount) {
        self.han = self.han + YakuValue::Han(dora.total());
        self.dora = dora;
    }

    fn finish(self) -> ScoreResult {
        ScoreResult {
            basic_points: points::basic_points(self.han, self.fu),
            han: self.han,
            fu: self.fu,
            yaku: self.yaku,
            dora: self.dora,
        }
    }
}

/// Value the hand of the player seated `wind`, as it stands in `game`.
pub fn evaluate(game: &Game, wind: Fon) -> ScoreResult {
    let agari_te = AgariTe::new(game, wind);

    let mut best = ScoreResult::default();
    for combination in winning_combinations(agari_te.te(), agari_te.sorted()) {
        let result = score_combination(&agari_te, &combination);
        debug!("{:?} => {:?}", combination, result);
        if result.key() > best.key() {
            best = result;
        }
    }

    debug!("Best for {:?}: {:?}", wind, best);
    best
}

fn score_combination(agari_te: &AgariTe, combination: &WinningCombination) -> ScoreResult {
    let closed = agari_te.closed();
    let method = agari_te.method();

    let mut info = match combination {
        WinningCombination::Normal(set) => {
            let mentsu = match set.mentsu(agari_te.te()) {
                Some(mentsu) => mentsu,
                None => unreachable!("Enumerated group sets only hold valid groups"),
            };
            let mentsu_fu = fu::mentsu_fu(&mentsu, agari_te.round_wind(), agari_te.seat_wind());
            let mut info = ScoreInfo::new(fu::agari_fu(mentsu_fu, closed, method));
            for yaku in agari_te.group_yaku(&mentsu, mentsu_fu) {
                info.push(yaku, closed);
            }
            info
        }
        WinningCombination::Chiitoitsu => {
            let mut info = ScoreInfo::new(fu::CHIITOITSU_FU);
            info.push(Yaku::Chiitoitsu, closed);
            info
        }
        WinningCombination::Kokushimusou => {
            let mut info = ScoreInfo::new(fu::agari_fu(fu::FUUTEI, closed, method));
            info.push(Yaku::Kokushimusou, closed);
            info
        }
    };

    for yaku in agari_te.hand_yaku(combination) {
        info.push(yaku, closed);
    }
    if info.han == YakuValue::Han(0) {
        return ScoreResult::default();
    }

    if closed && method == WinningMethod::Tsumo {
        info.push(Yaku::Menzentsumo, closed);
    }
    info.add_dora(agari_te.dora());
    info.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Agari, Riichi};
    use crate::hand::tests::{te_from_string, te_with_fuuro};
    use crate::hand::Te;
    use crate::tiles::{hai_from_string, Hai, Suu, Tile};

    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn game_with(te: Te, method: WinningMethod) -> Game {
        let mut game = Game::new(Fon::Ton);
        game.player_mut(Fon::Nan).te = te;
        game.agari = Agari {
            method,
            ..Default::default()
        };
        game
    }

    fn yaku_names(result: &ScoreResult) -> Vec<Yaku> {
        result.yaku.iter().map(|(yaku, _)| *yaku).collect()
    }

    #[test]
    fn test_suuankou_tsumo() {
        let te = te_from_string("🀕🀕🀕🀖🀖🀖🀗🀗🀗🀘🀘🀘🀔🀔").unwrap();
        let game = game_with(te, WinningMethod::Tsumo);
        let result = evaluate(&game, Fon::Nan);
        let yaku = yaku_names(&result);
        assert!(yaku.contains(&Yaku::Toitoi));
        assert!(yaku.contains(&Yaku::Suuankou));
        assert_eq!(result.han, YakuValue::Yakuman(1));
        assert_eq!(result.basic_points, 8000);
    }

    #[test]
    fn test_kokushimusou() {
        let te = te_from_string("🀇🀏🀙🀡🀐🀘🀀🀀🀁🀂🀃🀆🀅🀄").unwrap();
        let game = game_with(te, WinningMethod::Ron);
        let result = evaluate(&game, Fon::Nan);
        // Not honroutou too
        assert_eq!(yaku_names(&result), vec![Yaku::Kokushimusou]);
        assert_eq!(result.han, YakuValue::Yakuman(1));
        assert_eq!(result.fu, 30);
        assert_eq!(result.basic_points, 8000);
        assert_eq!(result.payment(false, WinningMethod::Ron), Payment::Ron(32000));
    }

    #[test]
    fn test_chiitoitsu() {
        let te = te_from_string("🀇🀇🀈🀈🀏🀏🀙🀙🀀🀀🀁🀁🀆🀆").unwrap();
        let game = game_with(te, WinningMethod::Ron);
        let result = evaluate(&game, Fon::Nan);
        assert_eq!(yaku_names(&result), vec![Yaku::Chiitoitsu]);
        assert_eq!(result.fu, 25);
        assert_eq!(result.han, YakuValue::Han(2));
        assert_eq!(result.basic_points, 400);
    }

    #[test]
    fn test_chiitoitsu_with_four_identical_tiles() {
        let te = te_from_string("🀇🀇🀇🀇🀏🀏🀙🀙🀀🀀🀁🀁🀆🀆").unwrap();
        let game = game_with(te, WinningMethod::Ron);
        let result = evaluate(&game, Fon::Nan);
        assert_eq!(yaku_names(&result), vec![Yaku::Chiitoitsu, Yaku::Honroutou]);
        assert_eq!(result.fu, 25);
        assert_eq!(result.han, YakuValue::Han(4));
        assert_eq!(result.basic_points, 1600);
    }

    #[test]
    fn test_ryanpeikou_beats_chiitoitsu() {
        let te = te_from_string("🀇🀇🀈🀈🀉🀉🀙🀙🀚🀚🀛🀛🀊🀊").unwrap();
        let game = game_with(te, WinningMethod::Ron);
        let result = evaluate(&game, Fon::Nan);
        assert_eq!(yaku_names(&result), vec![Yaku::Pinfu, Yaku::Ryanpeikou]);
        assert_eq!(result.fu, 30);
        assert_eq!(result.han, YakuValue::Han(4));
    }

    #[test]
    fn test_pinfu_tsumo() {
        let te = te_from_string("🀇🀈🀉🀊🀋🀌🀙🀚🀛🀕🀖🀗🀐🀐").unwrap();
        let game = game_with(te, WinningMethod::Tsumo);
        let result = evaluate(&game, Fon::Nan);
        assert_eq!(yaku_names(&result), vec![Yaku::Pinfu, Yaku::Menzentsumo]);
        assert_eq!(result.fu, 20);
        assert_eq!(result.han, YakuValue::Han(2));
        assert_eq!(result.basic_points, 400);
        assert_eq!(
            result.payment(false, WinningMethod::Tsumo),
            Payment::TsumoKo { oya: 700, ko: 400 }
        );
    }

    #[test]
    fn test_no_yaku_is_worthless_even_with_dora() {
        // Open hand, no yaku
        let te = te_with_fuuro("🀇🀈🀉🀊🀋🀌🀙🀚🀛🀊🀊", &[("🀕🀖🀗", true)]);
        let mut game = game_with(te, WinningMethod::Ron);
        game.dora_indicators = hai_from_string("🀉🀡").unwrap();
        let result = evaluate(&game, Fon::Nan);
        assert_eq!(result, ScoreResult::default());
        assert!(!result.is_agari());
    }

    #[test]
    fn test_not_a_winning_hand() {
        let te = te_from_string("🀇🀈🀉🀊🀋🀌🀙🀚🀛🀕🀖🀗🀐🀀").unwrap();
        let game = game_with(te, WinningMethod::Tsumo);
        assert_eq!(evaluate(&game, Fon::Nan), ScoreResult::default());
    }

    #[test]
    fn test_riichi_ippatsu_and_dora() {
        let mut te = te_from_string("🀇🀈🀉🀊🀋🀌🀙🀚🀛🀕🀖🀗🀐").unwrap();
        te.draw(Tile::from("🀐".parse::<Hai>().unwrap()));
        let mut game = game_with(te, WinningMethod::Ron);
        game.dora_indicators = hai_from_string("🀏").unwrap();
        game.uradora_indicators = hai_from_string("🀘").unwrap();
        let player = game.player_mut(Fon::Nan);
        player.turn = 4;
        player.riichi = Some(Riichi {
            turn: 4,
            called_before: true,
            called_after: false,
        });

        let result = evaluate(&game, Fon::Nan);
        assert_eq!(
            yaku_names(&result),
            vec![Yaku::Pinfu, Yaku::Riichi, Yaku::Ippatsu]
        );
        // 1m dora, two 1s uradora
        assert_eq!(result.dora.dora, 1);
        assert_eq!(result.dora.uradora, 2);
        assert_eq!(result.han, YakuValue::Han(6));
        assert_eq!(result.basic_points, 3000);
    }

    #[test]
    fn test_uradora_needs_riichi() {
        let te = te_from_string("🀇🀈🀉🀊🀋🀌🀙🀚🀛🀕🀖🀗🀐🀐").unwrap();
        let mut game = game_with(te, WinningMethod::Tsumo);
        game.uradora_indicators = hai_from_string("🀘").unwrap();
        let result = evaluate(&game, Fon::Nan);
        assert_eq!(result.dora, DoraCount::default());
    }

    #[test]
    fn test_double_riichi_and_no_ippatsu_after_call() {
        let te = te_from_string("🀇🀈🀉🀊🀋🀌🀙🀚🀛🀕🀖🀗🀐🀐").unwrap();
        let mut game = game_with(te, WinningMethod::Ron);
        let player = game.player_mut(Fon::Nan);
        player.turn = 3;
        player.riichi = Some(Riichi {
            turn: 0,
            called_before: false,
            called_after: true,
        });
        let yaku = yaku_names(&evaluate(&game, Fon::Nan));
        assert!(yaku.contains(&Yaku::Daburii));
        assert!(!yaku.contains(&Yaku::Riichi));
        assert!(!yaku.contains(&Yaku::Ippatsu));
    }

    #[test]
    fn test_akadora_and_tanyao() {
        let mut tiles: Vec<Tile> = hai_from_string("🀈🀉🀊🀋🀌🀍🀚🀛🀜🀓🀔🀕🀔")
            .unwrap()
            .into_iter()
            .map(Tile::from)
            .collect();
        tiles.push(Tile::aka(Suu::Sou));
        let te = Te::from_tiles(&tiles).unwrap();
        let game = game_with(te, WinningMethod::Ron);
        let result = evaluate(&game, Fon::Nan);
        assert!(yaku_names(&result).contains(&Yaku::Tanyao));
        assert_eq!(result.dora.akadora, 1);
    }

    #[test]
    fn test_last_tile_and_kan_yaku() {
        let te = te_with_fuuro("🀇🀈🀉🀊🀋🀌🀙🀚🀛🀐🀐", &[("🀕🀖🀗", true)]);
        let mut game = game_with(te.clone(), WinningMethod::Tsumo);
        game.agari.haitei = true;
        game.agari.rinshan = true;
        let yaku = yaku_names(&evaluate(&game, Fon::Nan));
        assert_eq!(yaku, vec![Yaku::Haiteiraoyue, Yaku::RinshanKaihou]);

        let mut game = game_with(te, WinningMethod::Ron);
        game.agari.haitei = true;
        game.agari.chankan = true;
        let result = evaluate(&game, Fon::Nan);
        assert_eq!(yaku_names(&result), vec![Yaku::Houteiraoyui, Yaku::Chankan]);
        // Open pinfu shape
        assert_eq!(result.fu, 30);
    }

    #[test]
    fn test_daisuushi_is_double_yakuman() {
        let te = te_from_string("🀀🀀🀀🀁🀁🀁🀂🀂🀂🀃🀃🀃🀄🀄").unwrap();
        let game = game_with(te, WinningMethod::Ron);
        let result = evaluate(&game, Fon::Nan);
        assert_eq!(result.han, YakuValue::Yakuman(2));
        assert_eq!(result.basic_points, 16000);
    }

    #[test]
    fn test_no_cap_below_mangan() {
        // Two closed terminal kans: 20 + 64 + 64 + 10 for ron
        let te = te_with_fuuro("🀚🀛🀜🀓🀔🀕🀋🀋", &[("🀇🀇🀇🀇", false), ("🀡🀡🀡🀡", false)]);
        let mut game = game_with(te, WinningMethod::Ron);
        let player = game.player_mut(Fon::Nan);
        player.turn = 3;
        player.riichi = Some(Riichi {
            turn: 3,
            called_before: true,
            called_after: false,
        });
        let result = evaluate(&game, Fon::Nan);
        assert_eq!(yaku_names(&result), vec![Yaku::Riichi, Yaku::Ippatsu]);
        assert_eq!(result.han, YakuValue::Han(2));
        assert_eq!(result.fu, 160);
        assert_eq!(result.basic_points, 2600);
        assert_eq!(result.payment(false, WinningMethod::Ron), Payment::Ron(10300));
    }

    #[test]
    fn test_chanta_on_all_triplets() {
        let te = te_with_fuuro("🀇🀇🀇🀡🀡🀡🀐🀐🀐🀏🀏", &[("🀀🀀🀀", true)]);
        let game = game_with(te, WinningMethod::Ron);
        let yaku = yaku_names(&evaluate(&game, Fon::Nan));
        assert!(yaku.contains(&Yaku::Toitoi));
        assert!(yaku.contains(&Yaku::Chanta));
        assert!(yaku.contains(&Yaku::Honroutou));
        assert!(yaku.contains(&Yaku::BaNoKaze));
    }

    #[test]
    fn test_tile_class_yakuman() {
        let te = te_from_string("🀀🀀🀀🀁🀁🀁🀆🀆🀆🀅🀅🀅🀄🀄").unwrap();
        let result = evaluate(&game_with(te, WinningMethod::Ron), Fon::Nan);
        assert!(yaku_names(&result).contains(&Yaku::Tsuuiisou));
        assert!(!yaku_names(&result).contains(&Yaku::Honroutou));
        assert_eq!(result.basic_points, 8000);

        let te = te_from_string("🀇🀇🀇🀏🀏🀏🀙🀙🀙🀡🀡🀡🀐🀐").unwrap();
        let result = evaluate(&game_with(te, WinningMethod::Ron), Fon::Nan);
        assert!(yaku_names(&result).contains(&Yaku::Chinroutou));
        assert!(!yaku_names(&result).contains(&Yaku::Honroutou));
        assert_eq!(result.basic_points, 8000);

        let te = te_from_string("🀑🀒🀓🀑🀒🀓🀕🀕🀕🀗🀗🀗🀅🀅").unwrap();
        let result = evaluate(&game_with(te, WinningMethod::Ron), Fon::Nan);
        assert!(yaku_names(&result).contains(&Yaku::Ryuuiisou));
        assert_eq!(result.basic_points, 8000);
    }

    #[test]
    fn test_suukantsu() {
        let te = te_with_fuuro(
            "🀋🀋",
            &[
                ("🀚🀚🀚🀚", false),
                ("🀒🀒🀒🀒", true),
                ("🀍🀍🀍🀍", false),
                ("🀟🀟🀟🀟", true),
            ],
        );
        let result = evaluate(&game_with(te, WinningMethod::Ron), Fon::Nan);
        assert!(yaku_names(&result).contains(&Yaku::Suukantsu));
        assert_eq!(result.han, YakuValue::Yakuman(1));
        assert_eq!(result.basic_points, 8000);
    }

    #[test]
    fn test_menzen_tsumo_needs_closed_hand() {
        let open = te_with_fuuro("🀇🀈🀉🀙🀚🀛🀕🀖🀗🀐🀐", &[("🀆🀆🀆", true)]);
        let result = evaluate(&game_with(open, WinningMethod::Tsumo), Fon::Nan);
        assert_eq!(yaku_names(&result), vec![Yaku::Haku]);

        // A closed kan keeps the hand closed
        let closed_kan = te_with_fuuro("🀇🀈🀉🀙🀚🀛🀕🀖🀗🀐🀐", &[("🀆🀆🀆🀆", false)]);
        let yaku = yaku_names(&evaluate(&game_with(closed_kan, WinningMethod::Tsumo), Fon::Nan));
        assert!(yaku.contains(&Yaku::Haku));
        assert!(yaku.contains(&Yaku::Menzentsumo));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let te = te_from_string("🀇🀇🀇🀈🀈🀈🀉🀉🀉🀟🀠🀡🀔🀔").unwrap();
        let game = game_with(te, WinningMethod::Tsumo);
        let first = evaluate(&game, Fon::Nan);
        assert!(first.is_agari());
        assert_eq!(evaluate(&game, Fon::Nan), first);
    }

    #[test]
    fn test_demo_snapshot() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/riichi_pinfu_tsumo.ron");
        let game = Game::from_ron_file(path).unwrap();
        let result = evaluate(&game, Fon::Nan);
        assert_eq!(
            yaku_names(&result),
            vec![Yaku::Pinfu, Yaku::Riichi, Yaku::Ippatsu, Yaku::Menzentsumo]
        );
        assert_eq!(result.dora.total(), 3);
        assert_eq!(result.han, YakuValue::Han(7));
        assert_eq!(result.fu, 20);
        assert_eq!(result.basic_points, 3000);
        assert_eq!(
            result.payment(false, WinningMethod::Tsumo),
            Payment::TsumoKo { oya: 6000, ko: 3000 }
        );
    }

    /// Random closed winning hand: 4 groups and a pair drawn from a full set.
    fn random_winning_te<R: Rng>(rng: &mut R) -> Te {
        loop {
            let mut count = [0; 34];
            let mut tiles = vec![];
            let all = Hai::all();
            let mut ok = true;
            for _ in 0..4 {
                let hai = *all.choose(rng).unwrap();
                let group: Vec<Hai> = if rng.gen_bool(0.5) {
                    vec![hai; 3]
                } else {
                    match hai.next_in_run().and_then(|m| Some((m, m.next_in_run()?))) {
                        Some((middle, last)) => vec![hai, middle, last],
                        None => vec![hai; 3],
                    }
                };
                tiles.extend(group);
            }
            tiles.extend(vec![*all.choose(rng).unwrap(); 2]);
            for hai in &tiles {
                count[hai.index()] += 1;
                ok &= count[hai.index()] <= 4;
            }
            if ok {
                tiles.shuffle(rng);
                let tiles: Vec<Tile> = tiles.into_iter().map(Tile::from).collect();
                return Te::from_tiles(&tiles).unwrap();
            }
        }
    }

    #[test]
    fn test_random_winning_hands() {
        let mut rng = StdRng::seed_from_u64(0x6d6a);
        for _ in 0..200 {
            let te = random_winning_te(&mut rng);
            let method = if rng.gen_bool(0.5) {
                WinningMethod::Ron
            } else {
                WinningMethod::Tsumo
            };
            let mut game = game_with(te, method);
            game.player_mut(Fon::Nan).riichi = Some(Riichi {
                turn: 2,
                called_before: true,
                called_after: true,
            });
            game.player_mut(Fon::Nan).turn = 6;

            let result = evaluate(&game, Fon::Nan);
            // Riichi alone makes any complete hand worth something
            assert!(result.is_agari(), "{}", game);
            assert!(result.fu >= 20);
            assert!(result.fu % 10 == 0 || result.fu == 25);
            match result.han {
                YakuValue::Yakuman(_) => assert!([8000, 16000].contains(&result.basic_points)),
                YakuValue::Han(han) if han >= 13 => assert_eq!(result.basic_points, 8000),
                YakuValue::Han(han) => {
                    assert!(han >= 1);
                    assert!(result.basic_points <= 6000);
                }
            }
            if yaku_names(&result).contains(&Yaku::Chiitoitsu) {
                assert_eq!(result.fu, 25);
            }
            assert_eq!(evaluate(&game, Fon::Nan), result);
        }
    }
}
