//! Integration tests for mid-tournament edits: renames and match reassignment.

use lounge_tournament::{
    find_match, generate_fixtures, has_downstream_dependents, reassign_match_players,
    record_result, rename_player, reschedule_match, EngineError, Format, GameMatch, MatchId,
    Player,
};
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;

fn roster(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("P{i}"))).collect()
}

fn assert_knockout_graph(matches: &[GameMatch]) {
    let mut feeders: HashMap<MatchId, usize> = HashMap::new();
    for m in matches {
        if let Some(next) = m.next_match_id {
            *feeders.entry(next).or_default() += 1;
        }
    }
    for m in matches.iter().filter(|m| m.round > 1) {
        assert_eq!(feeders.get(&m.id), Some(&2));
    }
}

#[test]
fn rename_trims_and_keeps_the_id() {
    let players = roster(4);
    let renamed = rename_player(&players, players[0].id, "  Ace ").unwrap();
    assert_eq!(renamed[0].name, "Ace");
    assert_eq!(renamed[0].id, players[0].id);
    assert_eq!(&renamed[1..], &players[1..]);
}

#[test]
fn rename_validation() {
    let players = roster(3);
    assert_eq!(
        rename_player(&players, players[0].id, "   "),
        Err(EngineError::EmptyPlayerName)
    );
    assert_eq!(
        rename_player(&players, players[0].id, "p1"),
        Err(EngineError::DuplicatePlayerName)
    );
    let stranger = uuid::Uuid::new_v4();
    assert_eq!(
        rename_player(&players, stranger, "New"),
        Err(EngineError::PlayerNotFound(stranger))
    );
    // Changing only the case of your own name is allowed.
    assert_eq!(rename_player(&players, players[0].id, "p0").unwrap()[0].name, "p0");
}

#[test]
fn reassign_with_same_players_is_a_no_op() {
    let players = roster(4);
    let matches = generate_fixtures(&players, Format::Knockout).unwrap();
    let matches = record_result(&matches, MatchId(1), players[0].id).unwrap();
    let after =
        reassign_match_players(&players, &matches, MatchId(1), players[0].id, players[1].id).unwrap();
    assert_eq!(after, matches);
}

#[test]
fn reassign_without_downstream_results_only_touches_that_match() {
    let players = roster(8);
    let matches = generate_fixtures(&players, Format::Knockout).unwrap();
    let matches = record_result(&matches, MatchId(3), players[4].id).unwrap();
    assert!(!has_downstream_dependents(&matches, MatchId(1)));

    let after =
        reassign_match_players(&players, &matches, MatchId(1), players[0].id, players[7].id).unwrap();
    for (before, now) in matches.iter().zip(&after) {
        if before.id == MatchId(1) {
            assert_eq!(now.player1_id, Some(players[0].id));
            assert_eq!(now.player2_id, Some(players[7].id));
        } else {
            assert_eq!(before, now);
        }
    }
}

#[test]
fn reassign_of_an_advanced_feeder_keeps_other_results() {
    let players = roster(4);
    let ids: Vec<_> = players.iter().map(|p| p.id).collect();
    let matches = generate_fixtures(&players, Format::Knockout).unwrap();
    let matches = record_result(&matches, MatchId(1), ids[0]).unwrap();
    let matches = record_result(&matches, MatchId(2), ids[2]).unwrap();
    assert!(!has_downstream_dependents(&matches, MatchId(1)));

    let after = reassign_match_players(&players, &matches, MatchId(1), ids[1], ids[0]).unwrap();

    let edited = find_match(&after, MatchId(1)).unwrap();
    assert_eq!((edited.player1_id, edited.player2_id), (Some(ids[1]), Some(ids[0])));
    assert!(!edited.completed);
    assert_eq!(find_match(&after, MatchId(2)), find_match(&matches, MatchId(2)));
    assert!(find_match(&after, MatchId(2)).unwrap().completed);
    assert_eq!(find_match(&after, MatchId(3)), find_match(&matches, MatchId(3)));
}

#[test]
fn reassign_clears_an_unpropagated_result() {
    let players = roster(2);
    let extra = Player::new("Late");
    let mut roster = players.clone();
    roster.push(extra.clone());
    let matches = generate_fixtures(&players, Format::Knockout).unwrap();
    let matches = record_result(&matches, MatchId(1), players[0].id).unwrap();

    let after =
        reassign_match_players(&roster, &matches, MatchId(1), players[0].id, extra.id).unwrap();
    let final_match = find_match(&after, MatchId(1)).unwrap();
    assert!(!final_match.completed);
    assert_eq!(final_match.winner_id, None);
    assert_eq!(final_match.player2_id, Some(extra.id));
}

#[test]
fn reassign_with_downstream_results_regenerates_the_bracket() {
    let players = roster(8);
    let ids: Vec<_> = players.iter().map(|p| p.id).collect();
    let mut matches = generate_fixtures(&players, Format::Knockout).unwrap();
    matches = reschedule_match(
        &matches,
        MatchId(6),
        NaiveDate::from_ymd_opt(2026, 10, 17),
        NaiveTime::from_hms_opt(19, 0, 0),
    )
    .unwrap();
    matches = record_result(&matches, MatchId(1), ids[0]).unwrap();
    matches = record_result(&matches, MatchId(2), ids[2]).unwrap();
    matches = record_result(&matches, MatchId(5), ids[0]).unwrap();
    assert!(has_downstream_dependents(&matches, MatchId(1)));

    let after = reassign_match_players(&players, &matches, MatchId(1), ids[0], ids[5]).unwrap();
    assert_eq!(after.len(), 7);
    assert_knockout_graph(&after);

    let edited = find_match(&after, MatchId(1)).unwrap();
    assert_eq!((edited.player1_id, edited.player2_id), (Some(ids[0]), Some(ids[5])));
    assert!(after.iter().all(|m| !m.completed));
    assert_eq!(find_match(&after, MatchId(5)).unwrap().player1_id, None);
    assert_eq!(
        find_match(&after, MatchId(6)).unwrap().scheduled_date,
        NaiveDate::from_ymd_opt(2026, 10, 17)
    );
}

#[test]
fn reassign_validation() {
    let players = roster(4);
    let matches = generate_fixtures(&players, Format::Knockout).unwrap();
    assert_eq!(
        reassign_match_players(&players, &matches, MatchId(42), players[0].id, players[1].id),
        Err(EngineError::MatchNotFound(MatchId(42)))
    );
    assert_eq!(
        reassign_match_players(&players, &matches, MatchId(1), players[2].id, players[2].id),
        Err(EngineError::DuplicateMatchPlayer)
    );
    let stranger = uuid::Uuid::new_v4();
    assert_eq!(
        reassign_match_players(&players, &matches, MatchId(1), players[0].id, stranger),
        Err(EngineError::PlayerNotFound(stranger))
    );
}
