//! Tests for model configuration defaults

#[cfg(test)]
mod tests {
    use wavecollapse::algorithm::selection::Heuristic;
    use wavecollapse::io::configuration::{
        DEFAULT_PATTERN_SIZE, DEFAULT_SCREENSHOTS, DEFAULT_SYMMETRY, MAX_INDIVIDUAL_PROGRESS_BARS,
        ModelConfig, ModelKind,
    };

    // Verifies overlapping defaults match the batch description defaults
    // Verified by defaulting periodic input to false
    #[test]
    fn test_overlapping_defaults() {
        let config = ModelConfig::overlapping("flowers", 32);
        assert_eq!(config.name, "flowers");
        assert_eq!((config.width, config.height), (32, 32));
        assert!(!config.periodic);
        assert_eq!(config.heuristic, Heuristic::Entropy);
        assert_eq!(config.screenshots, DEFAULT_SCREENSHOTS);
        assert_eq!(config.limit, None);

        let ModelKind::Overlapping { options, ground } = config.kind else {
            panic!("expected an overlapping configuration");
        };
        assert_eq!(options.pattern_size, DEFAULT_PATTERN_SIZE);
        assert_eq!(options.symmetry, DEFAULT_SYMMETRY);
        assert!(options.periodic_input);
        assert!(!ground);
    }

    // Tests tiled defaults disable every optional output
    // Verified by enabling text output by default
    #[test]
    fn test_tiled_defaults() {
        let config = ModelConfig::tiled("castle", 20);
        assert_eq!(
            config.kind,
            ModelKind::Tiled {
                subset: None,
                black_background: false,
                text_output: false,
            }
        );
    }

    // Tests the footprint is the pattern size for overlapping models and 1 for tiles
    // Verified by returning the pattern size for both kinds
    #[test]
    fn test_footprint() {
        assert_eq!(ModelConfig::overlapping("a", 8).footprint(), DEFAULT_PATTERN_SIZE);
        assert_eq!(ModelConfig::tiled("b", 8).footprint(), 1);
    }

    // Tests the progress threshold is small enough to keep bars readable
    // Verified by setting the threshold to zero
    #[test]
    fn test_progress_threshold() {
        assert!((1..=10).contains(&MAX_INDIVIDUAL_PROGRESS_BARS));
    }
}
