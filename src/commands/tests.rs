//! Unit tests for command handlers

use super::*;

#[cfg(test)]
mod command_tests {
    use super::*;
    use crate::{
        commands::{
            dataset::run_dataset,
            predict::{run_prediction, PredictParams},
            roster_audit::run_roster_audit,
        },
        model::ModelKind,
        pipeline::PipelineConfig,
        storage::{Player, Team},
        PlayerId, Position, TeamId,
    };

    fn params(player: &str, opponent: &str) -> PredictParams {
        PredictParams {
            player_name: player.to_string(),
            opponent_code: opponent.to_string(),
            as_of: None,
            model: ModelKind::Linear,
            config: PipelineConfig::default(),
            as_json: false,
        }
    }

    #[test]
    fn test_resolve_database_path_prefers_flag() {
        let path = PathBuf::from("/tmp/explicit.db");
        let result = resolve_database_path(Some(path.clone()));
        assert_eq!(result.unwrap(), path);
    }

    #[test]
    fn test_resolve_database_path_from_env_then_default() {
        // Set test env var
        std::env::set_var(DATABASE_PATH_ENV_VAR, "/tmp/from-env.db");
        let result = resolve_database_path(None).unwrap();
        assert_eq!(result, PathBuf::from("/tmp/from-env.db"));

        // An empty value falls through to the data dir
        std::env::set_var(DATABASE_PATH_ENV_VAR, "");
        if let Ok(path) = resolve_database_path(None) {
            assert!(path.ends_with("ffa-predict/ffa.db"));
        }

        // Clean up
        std::env::remove_var(DATABASE_PATH_ENV_VAR);
    }

    #[test]
    fn test_open_database_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("league.db");

        let db = open_database(Some(path.clone())).unwrap();
        assert!(path.exists());
        assert!(run_roster_audit(&db).unwrap().is_empty());
    }

    #[test]
    fn test_prediction_unknown_player() {
        let db = LeagueDatabase::new_in_memory().unwrap();
        match run_prediction(&db, &params("Nobody", "AAA")) {
            Err(FfaError::NotFound { entity, key }) => {
                assert_eq!(entity, "player");
                assert_eq!(key, "Nobody");
            }
            other => panic!("Expected NotFound, got {:?}", other.map(|r| r.player_name)),
        }
    }

    #[test]
    fn test_prediction_unknown_team() {
        let mut db = LeagueDatabase::new_in_memory().unwrap();
        db.upsert_player(&Player {
            player_id: PlayerId::new(1),
            name: "Some Receiver".to_string(),
            position: Position::WR,
        })
        .unwrap();

        assert!(matches!(
            run_prediction(&db, &params("some receiver", "ZZZ")),
            Err(FfaError::NotFound { entity: "team", .. })
        ));
    }

    #[test]
    fn test_prediction_rejects_kicker() {
        let mut db = LeagueDatabase::new_in_memory().unwrap();
        db.upsert_player(&Player {
            player_id: PlayerId::new(2),
            name: "Big Leg".to_string(),
            position: Position::K,
        })
        .unwrap();
        db.upsert_team(&Team {
            team_id: TeamId::new(1),
            code: "AAA".to_string(),
            name: "AAA Football".to_string(),
            division: "West".to_string(),
        })
        .unwrap();

        assert!(matches!(
            run_prediction(&db, &params("Big Leg", "AAA")),
            Err(FfaError::UnsupportedPosition { position: Position::K })
        ));
    }

    #[test]
    fn test_prediction_needs_training_rows() {
        let mut db = LeagueDatabase::new_in_memory().unwrap();
        db.upsert_player(&Player {
            player_id: PlayerId::new(3),
            name: "Rookie Back".to_string(),
            position: Position::RB,
        })
        .unwrap();
        db.upsert_team(&Team {
            team_id: TeamId::new(1),
            code: "AAA".to_string(),
            name: "AAA Football".to_string(),
            division: "West".to_string(),
        })
        .unwrap();

        assert!(matches!(
            run_prediction(&db, &params("Rookie Back", "aaa")),
            Err(FfaError::InsufficientHistory { .. })
        ));
    }

    #[test]
    fn test_dataset_on_empty_store() {
        let db = LeagueDatabase::new_in_memory().unwrap();
        let dataset = run_dataset(&db, Position::TE, None, &PipelineConfig::default()).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.summary.candidates, 0);

        assert!(run_dataset(&db, Position::DEF, None, &PipelineConfig::default()).is_err());
    }
}
