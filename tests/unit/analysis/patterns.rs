//! Tests for color indexing, overlap agreement and extraction

#[cfg(test)]
mod tests {
    use wavecollapse::WfcError;
    use wavecollapse::analysis::patterns::{
        MAX_COLORS, OverlappingOptions, PatternSet, agrees, index_colors,
    };
    use wavecollapse::io::image::{Bitmap, argb};

    const RED: u32 = argb(0xff, 0xff, 0, 0);
    const BLUE: u32 = argb(0xff, 0, 0, 0xff);
    const GREEN: u32 = argb(0xff, 0, 0xff, 0);

    fn stripes() -> Bitmap {
        let pixels = (0..16).map(|i| if i % 2 == 0 { RED } else { BLUE }).collect();
        Bitmap::new(4, 4, pixels).expect("4x4 sample")
    }

    fn options(pattern_size: usize, periodic_input: bool, symmetry: usize) -> OverlappingOptions {
        OverlappingOptions {
            pattern_size,
            periodic_input,
            symmetry,
        }
    }

    // Verifies colors are indexed in first-seen row-major order
    // Verified by scanning columns before rows
    #[test]
    fn test_index_colors_first_seen() {
        let sample = Bitmap::new(2, 2, vec![RED, BLUE, BLUE, GREEN]).expect("2x2 sample");
        let (indices, colors) = index_colors(&sample).expect("few colors");

        assert_eq!(colors, vec![RED, BLUE, GREEN]);
        assert_eq!(indices.dim(), (2, 2));
        assert_eq!(indices.get((0, 1)), Some(&1));
        assert_eq!(indices.get((1, 0)), Some(&1));
        assert_eq!(indices.get((1, 1)), Some(&2));
    }

    // Tests samples with too many colors are rejected
    // Verified by removing the palette size check
    #[test]
    fn test_index_colors_rejects_large_palette() {
        let pixels = (0..=MAX_COLORS as u32)
            .map(|i| argb(0xff, (i % 256) as u8, (i / 256) as u8, 0))
            .collect();
        let sample = Bitmap::new(MAX_COLORS + 1, 1, pixels).expect("wide sample");
        assert!(matches!(
            index_colors(&sample),
            Err(WfcError::InvalidSourceData { .. })
        ));
    }

    // Tests overlap agreement for horizontal and vertical shifts
    // Verified by comparing the unshifted cells
    #[test]
    fn test_agrees() {
        let left = [0, 1, 0, 1];
        let right = [1, 0, 1, 0];
        assert!(agrees(&left, &right, 1, 0, 2));
        assert!(agrees(&left, &right, -1, 0, 2));
        assert!(!agrees(&left, &left, 1, 0, 2));
        assert!(agrees(&left, &left, 0, 1, 2));
        assert!(!agrees(&left, &right, 0, -1, 2));
    }

    // Tests stripes yield two equally weighted, horizontally alternating patterns
    // Verified by skipping the duplicate check so every window is its own pattern
    #[test]
    fn test_extract_stripes() {
        let set = PatternSet::extract(&stripes(), &options(2, true, 1)).expect("extraction");

        assert_eq!(set.patterns(), &[vec![0u8, 1, 0, 1], vec![1u8, 0, 1, 0]]);
        assert_eq!(set.colors(), &[RED, BLUE]);
        assert_eq!(set.pattern_size(), 2);
        assert_eq!(set.alphabet().weights(), &[8.0, 8.0]);

        let propagator = set.alphabet().propagator();
        assert_eq!(propagator.compatible(2, 0), &[1]);
        assert_eq!(propagator.compatible(0, 0), &[1]);
        assert_eq!(propagator.compatible(1, 0), &[0]);
        assert!(propagator.is_symmetric());
    }

    // Tests symmetry variants merge into existing patterns as extra weight
    // Verified by adding reflections as new patterns unconditionally
    #[test]
    fn test_extract_symmetry_adds_weight() {
        let set = PatternSet::extract(&stripes(), &options(2, true, 2)).expect("extraction");
        assert_eq!(set.patterns().len(), 2);
        assert_eq!(set.alphabet().weights(), &[16.0, 16.0]);

        let rotated = PatternSet::extract(&stripes(), &options(2, true, 3)).expect("extraction");
        assert_eq!(rotated.patterns().len(), 4);
    }

    // Tests large windows that differ only in their first cell stay distinct
    // Verified by deduplicating on a wrapping positional hash in base colors
    #[test]
    fn test_extract_keeps_windows_differing_in_first_cell() {
        const YELLOW: u32 = argb(0xff, 0xff, 0xff, 0);
        let column = [RED, BLUE, GREEN, YELLOW, RED, RED];
        let pixels = (0..6)
            .flat_map(|y| {
                (0..7).map(move |x| if x == 0 && y == 0 { BLUE } else { column[y] })
            })
            .collect();
        let sample = Bitmap::new(7, 6, pixels).expect("7x6 sample");

        let set = PatternSet::extract(&sample, &options(6, false, 1)).expect("extraction");
        assert_eq!(set.colors().len(), 4);
        assert_eq!(set.patterns().len(), 2);
        assert_eq!(set.alphabet().weights(), &[1.0, 1.0]);

        let (first, second) = (&set.patterns()[0], &set.patterns()[1]);
        assert_ne!(first[0], second[0]);
        assert_eq!(first[1..], second[1..]);
    }

    // Tests non-periodic input only uses windows fully inside the sample
    // Verified by wrapping windows regardless of the option
    #[test]
    fn test_extract_non_periodic_windows() {
        let sample = Bitmap::new(3, 1, vec![RED, BLUE, GREEN]).expect("3x1 sample");
        let set = PatternSet::extract(&sample, &options(1, false, 1)).expect("extraction");
        assert_eq!(set.patterns().len(), 3);

        let wide = Bitmap::new(3, 2, vec![RED, BLUE, GREEN, RED, BLUE, GREEN]).expect("3x2 sample");
        let windows = PatternSet::extract(&wide, &options(2, false, 1)).expect("extraction");
        assert_eq!(windows.alphabet().weights().iter().sum::<f64>(), 2.0);
    }

    // Tests invalid options and undersized samples are rejected
    // Verified by removing the sample size check
    #[test]
    fn test_extract_rejects_invalid_input() {
        let sample = stripes();
        assert!(PatternSet::extract(&sample, &options(0, true, 1)).is_err());
        assert!(PatternSet::extract(&sample, &options(2, true, 0)).is_err());
        assert!(PatternSet::extract(&sample, &options(2, true, 9)).is_err());
        assert!(PatternSet::extract(&sample, &options(5, false, 1)).is_err());
        assert!(PatternSet::extract(&sample, &options(5, true, 1)).is_ok());
    }

    // Tests colors are read from the pattern's own palette entry
    // Verified by swapping dx and dy in the lookup
    #[test]
    fn test_color_at() {
        let set = PatternSet::extract(&stripes(), &options(2, true, 1)).expect("extraction");
        assert_eq!(set.color_at(0, 0, 0), Some(RED));
        assert_eq!(set.color_at(0, 1, 0), Some(BLUE));
        assert_eq!(set.color_at(0, 0, 1), Some(RED));
        assert_eq!(set.color_at(1, 0, 1), Some(BLUE));
        assert_eq!(set.color_at(0, 2, 0), None);
        assert_eq!(set.color_at(5, 0, 0), None);
    }
}
