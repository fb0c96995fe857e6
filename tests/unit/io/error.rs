//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use markov_wfc::AlgorithmError;
    use markov_wfc::io::error::invalid_parameter;
    use markov_wfc::spatial::Direction;
    use std::error::Error;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = AlgorithmError::FileSystem {
            path: "/tmp/scene.json".into(),
            operation: "read scene",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("read scene"));
        assert!(error.to_string().contains("/tmp/scene.json"));
    }

    // Tests parse errors chain to the JSON error
    // Verified by returning None for parse errors
    #[test]
    fn test_scene_parse_source() {
        let Err(json_error) = serde_json::from_str::<u32>("not json") else {
            return;
        };
        let error = AlgorithmError::SceneParse {
            path: "broken.json".into(),
            source: json_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().starts_with("Failed to parse scene 'broken.json'"));
    }

    // Tests algorithm errors carry no source
    // Verified by returning a source for every variant
    #[test]
    fn test_algorithm_errors_have_no_source() {
        let error = AlgorithmError::Stuck {
            iteration: 3,
            uncollapsed: 4,
        };
        assert!(error.source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("grid_size", &0, &"must be positive");

        let message = error.to_string();
        assert!(message.contains("grid_size"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be positive"));
    }

    // Tests position and iteration appear in collapse failures
    // Verified by swapping x and y in the message
    #[test]
    fn test_collapse_error_messages() {
        let degenerate = AlgorithmError::DegenerateDistribution {
            position: [2, 5],
            iteration: 17,
        };
        assert_eq!(
            degenerate.to_string(),
            "Degenerate distribution at cell (2, 5) in iteration 17"
        );

        let stuck = AlgorithmError::Stuck {
            iteration: 8,
            uncollapsed: 3,
        };
        assert!(stuck.to_string().contains("iteration 8"));
        assert!(stuck.to_string().contains("3 cells uncollapsed"));
    }

    // Tests matrix and tile errors name what is wrong
    // Verified by omitting the direction from the message
    #[test]
    fn test_matrix_and_tile_messages() {
        let matrix = AlgorithmError::InvalidMatrix {
            direction: Direction::Left,
            reason: "expected 2 rows, got 1".to_string(),
        };
        assert_eq!(
            matrix.to_string(),
            "Invalid left transition matrix: expected 2 rows, got 1"
        );

        let tile = AlgorithmError::InvalidTileIndex {
            index: 4,
            max_tiles: 3,
        };
        assert_eq!(tile.to_string(), "Tile index 4 is out of bounds (tiles: 3)");
    }

    // Tests conversion from io errors keeps the source
    // Verified by dropping the source in the conversion
    #[test]
    fn test_from_io_error() {
        let error: AlgorithmError = std::io::Error::other("disk full").into();

        assert!(matches!(error, AlgorithmError::FileSystem { .. }));
        assert!(error.source().is_some());
    }
}
