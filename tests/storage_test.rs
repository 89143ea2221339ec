//! Integration tests for the league store

use chrono::NaiveDate;
use ffa_predict::{storage::*, FfaError, GameId, PlayerId, Position, Stat, TeamId};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn create_test_db() -> LeagueDatabase {
    let mut db = LeagueDatabase::new_in_memory().unwrap();
    for (id, code) in [(1, "KC"), (2, "BUF")] {
        db.upsert_team(&Team {
            team_id: TeamId::new(id),
            code: code.to_string(),
            name: code.to_string(),
            division: "AFC".to_string(),
        })
        .unwrap();
    }
    db.upsert_player(&Player {
        player_id: PlayerId::new(7),
        name: "Test Passer".to_string(),
        position: Position::QB,
    })
    .unwrap();
    db
}

#[test]
fn test_database_creation() {
    let _db = create_test_db();
    // Should not panic - database creation successful
}

#[test]
fn test_file_backed_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("league.db");

    {
        let mut db = LeagueDatabase::open(&path).unwrap();
        db.upsert_player(&Player {
            player_id: PlayerId::new(1),
            name: "Persisted Player".to_string(),
            position: Position::TE,
        })
        .unwrap();
    }

    let db = LeagueDatabase::open(&path).unwrap();
    let player = db.get_player(PlayerId::new(1)).unwrap().unwrap();
    assert_eq!(player.position, Position::TE);
}

#[test]
fn test_find_player_by_name_ignores_case() {
    let db = create_test_db();
    let player = db.find_player_by_name("TEST PASSER").unwrap().unwrap();
    assert_eq!(player.player_id, PlayerId::new(7));
    assert!(db.find_player_by_name("Someone Else").unwrap().is_none());
}

#[test]
fn test_position_games_filters_position_and_date() {
    let mut db = create_test_db();
    db.upsert_player(&Player {
        player_id: PlayerId::new(8),
        name: "Test Receiver".to_string(),
        position: Position::WR,
    })
    .unwrap();

    for (id, d) in [(1u64, date(9, 8)), (2, date(9, 15))] {
        db.upsert_game(&Game {
            game_id: GameId::new(id),
            home_team: TeamId::new(1),
            away_team: TeamId::new(2),
            date: Some(d),
            home_score: None,
            away_score: None,
            spread: None,
        })
        .unwrap();
        for player in [7, 8] {
            db.upsert_player_game(&PlayerGame {
                player_id: PlayerId::new(player),
                game_id: GameId::new(id),
                stats: StatLine::default().with(Stat::PassYards, 200.0),
            })
            .unwrap();
        }
    }

    let all_qb = db.query_position_games(Position::QB, None).unwrap();
    assert_eq!(all_qb.len(), 2);
    assert!(all_qb.iter().all(|r| r.position == Position::QB));

    let early = db.query_position_games(Position::QB, Some(date(9, 15))).unwrap();
    assert_eq!(early.len(), 1);
    assert_eq!(early[0].game_id, GameId::new(1));

    let against_buf = db
        .query_position_games_involving_team(TeamId::new(2), Position::WR, date(9, 16))
        .unwrap();
    let ids: Vec<u64> = against_buf.iter().map(|r| r.game_id.as_u64()).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn test_roster_overlap_is_typed() {
    let mut db = create_test_db();
    db.insert_roster_interval(&PlayerTeam {
        player_id: PlayerId::new(7),
        team_id: TeamId::new(1),
        start_date: date(1, 1),
        end_date: Some(date(6, 30)),
    })
    .unwrap();

    let err = db
        .insert_roster_interval(&PlayerTeam {
            player_id: PlayerId::new(7),
            team_id: TeamId::new(2),
            start_date: date(6, 30),
            end_date: None,
        })
        .unwrap_err();
    assert!(matches!(
        FfaError::from(err),
        FfaError::RosterOverlap { .. }
    ));
}

#[test]
fn test_undated_stat_lines_are_ignored() {
    let mut db = create_test_db();
    db.upsert_game(&Game {
        game_id: GameId::new(99),
        home_team: TeamId::new(1),
        away_team: TeamId::new(2),
        date: None,
        home_score: None,
        away_score: None,
        spread: None,
    })
    .unwrap();
    db.upsert_player_game(&PlayerGame {
        player_id: PlayerId::new(7),
        game_id: GameId::new(99),
        stats: StatLine::default().with(Stat::PassYards, 300.0),
    })
    .unwrap();

    assert!(db
        .query_player_games(PlayerId::new(7), None, GameOrder::MostRecentFirst, None)
        .unwrap()
        .is_empty());
    assert!(db.query_position_games(Position::QB, None).unwrap().is_empty());
    assert!(db.roster_gaps().unwrap().is_empty());
}
