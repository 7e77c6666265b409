//! Integration tests for league (round-robin) fixtures.

use lounge_tournament::{
    generate_fixtures, record_result, resolve_winner, EngineError, Format, Player, Stage,
};
use std::collections::HashSet;

fn roster(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("P{i}"))).collect()
}

#[test]
fn every_pair_meets_exactly_once() {
    for n in 2..=12 {
        let players = roster(n);
        let matches = generate_fixtures(&players, Format::League).unwrap();
        assert_eq!(matches.len(), n * (n - 1) / 2, "n={n}");

        let mut pairs = HashSet::new();
        for m in &matches {
            let (a, b) = (m.player1_id.unwrap(), m.player2_id.unwrap());
            assert_ne!(a, b);
            let key = if a < b { (a, b) } else { (b, a) };
            assert!(pairs.insert(key), "pair repeated (n={n})");
            assert_eq!(m.next_match_id, None);
            assert_eq!(m.stage, Stage::RoundMatch);
        }
    }
}

#[test]
fn nobody_plays_twice_in_a_round() {
    let matches = generate_fixtures(&roster(7), Format::League).unwrap();
    let rounds: HashSet<u32> = matches.iter().map(|m| m.round).collect();
    for round in rounds {
        let mut seen = HashSet::new();
        for m in matches.iter().filter(|m| m.round == round) {
            assert!(seen.insert(m.player1_id.unwrap()));
            assert!(seen.insert(m.player2_id.unwrap()));
        }
    }
}

#[test]
fn odd_rosters_are_fine_but_one_player_is_not() {
    assert_eq!(generate_fixtures(&roster(3), Format::League).unwrap().len(), 3);
    assert_eq!(
        generate_fixtures(&roster(1), Format::League),
        Err(EngineError::InsufficientPlayers)
    );
}

#[test]
fn three_player_league_never_has_a_champion() {
    let players: Vec<Player> = ["A", "B", "C"].into_iter().map(Player::new).collect();
    let mut matches = generate_fixtures(&players, Format::League).unwrap();
    assert_eq!(matches.len(), 3);
    assert_eq!(resolve_winner(&matches, &players), (None, None));

    let ids: Vec<_> = matches.iter().map(|m| (m.id, m.player1_id.unwrap())).collect();
    for (match_id, winner) in ids {
        matches = record_result(&matches, match_id, winner).unwrap();
        assert_eq!(resolve_winner(&matches, &players), (None, None));
    }
    assert!(matches.iter().all(|m| m.completed));
}

#[test]
fn two_player_league_is_not_a_final() {
    let players = roster(2);
    let matches = generate_fixtures(&players, Format::League).unwrap();
    let matches = record_result(&matches, matches[0].id, players[0].id).unwrap();
    assert_eq!(matches[0].stage, Stage::RoundMatch);
    assert_eq!(resolve_winner(&matches, &players), (None, None));
}
