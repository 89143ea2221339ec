//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod ffa_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let ffa_error = FfaError::from(json_error);

        match ffa_error {
            FfaError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let ffa_error = FfaError::from(io_error);

        match ffa_error {
            FfaError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_error = "not_a_number".parse::<u64>().unwrap_err();
        let ffa_error = FfaError::from(parse_error);

        match ffa_error {
            FfaError::InvalidId(_) => (),
            _ => panic!("Expected InvalidId error variant"),
        }
    }

    #[test]
    fn test_parse_date_error_conversion() {
        let parse_error = NaiveDate::parse_from_str("2024-13-45", "%Y-%m-%d").unwrap_err();
        let ffa_error = FfaError::from(parse_error);

        match ffa_error {
            FfaError::InvalidDate(_) => (),
            _ => panic!("Expected InvalidDate error variant"),
        }
    }

    #[test]
    fn test_not_found_error() {
        let error = FfaError::NotFound {
            entity: "Player",
            key: "Breece Hall".to_string(),
        };

        assert_eq!(error.to_string(), "Player not found: Breece Hall");
    }

    #[test]
    fn test_roster_gap_error() {
        let error = FfaError::RosterGap {
            player_id: PlayerId::new(22526),
            date: NaiveDate::from_ymd_opt(2024, 9, 8).unwrap(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("22526"));
        assert!(error_string.contains("2024-09-08"));
    }

    #[test]
    fn test_missing_feature_error() {
        let error = FfaError::MissingFeature {
            stat: Stat::RushYards,
            column: "defense_rush_yards".to_string(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("defense_rush_yards"));
        assert!(error_string.contains("rush_yards"));
    }

    #[test]
    fn test_unsupported_position_error() {
        let error = FfaError::UnsupportedPosition {
            position: Position::K,
        };

        assert!(error.to_string().contains("Position K"));
    }

    #[test]
    fn test_missing_data_dir_error() {
        let error = FfaError::MissingDataDir {
            env_var: "FFA_DATABASE_PATH".to_string(),
        };

        let error_string = error.to_string();
        assert!(error_string.contains("Database path not provided"));
        assert!(error_string.contains("FFA_DATABASE_PATH"));
    }

    #[test]
    fn test_anyhow_error_conversion() {
        let anyhow_error = anyhow::anyhow!("disk I/O error");
        let ffa_error = FfaError::from(anyhow_error);

        match ffa_error {
            FfaError::Storage { message } => {
                assert!(message.contains("disk I/O error"));
            }
            _ => panic!("Expected Storage error variant"),
        }
    }

    #[test]
    fn test_anyhow_error_conversion_keeps_typed_errors() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        let anyhow_error: anyhow::Error = FfaError::RosterOverlap {
            player_id: PlayerId::new(7),
            date,
        }
        .into();

        match FfaError::from(anyhow_error) {
            FfaError::RosterOverlap { player_id, .. } => assert_eq!(player_id, PlayerId::new(7)),
            other => panic!("Expected RosterOverlap, got {other:?}"),
        }
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let ffa_error = FfaError::from(io_error);

        let error_trait: &dyn std::error::Error = &ffa_error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_result_type_alias_error() {
        fn test_function() -> Result<String> {
            Err(FfaError::InsufficientHistory {
                context: "no games".to_string(),
            })
        }

        match test_function().unwrap_err() {
            FfaError::InsufficientHistory { context } => assert_eq!(context, "no games"),
            _ => panic!("Expected InsufficientHistory error"),
        }
    }
}
