//! Tests for building and querying the directional adjacency table

#[cfg(test)]
mod tests {
    use wavecollapse::WfcError;
    use wavecollapse::algorithm::bitset::SymbolSet;
    use wavecollapse::algorithm::propagation::Propagator;

    fn chain() -> [Vec<Vec<usize>>; 4] {
        [
            vec![vec![1], vec![0]],
            vec![vec![0, 1], vec![0, 1]],
            vec![vec![1], vec![0]],
            vec![vec![0, 1], vec![0, 1]],
        ]
    }

    // Verifies lists are sorted and deduplicated on construction
    // Verified by skipping the dedup step
    #[test]
    fn test_new_normalizes_lists() {
        let propagator = Propagator::new([
            vec![vec![1, 0, 1], vec![]],
            vec![vec![0], vec![1]],
            vec![vec![0], vec![0]],
            vec![vec![0], vec![1]],
        ])
        .expect("valid lists");

        assert_eq!(propagator.symbol_count(), 2);
        assert_eq!(propagator.compatible(0, 0), &[0, 1]);
        assert_eq!(propagator.support_count(0, 0), 2);
        assert_eq!(propagator.support_count(0, 1), 0);
    }

    // Tests mismatched direction sizes are rejected
    // Verified by only checking the first direction's length
    #[test]
    fn test_new_rejects_size_mismatch() {
        let mut sets = chain();
        sets[3].push(vec![0]);
        assert!(matches!(
            Propagator::new(sets),
            Err(WfcError::InvalidSourceData { .. })
        ));
    }

    // Tests indices outside the alphabet are rejected
    // Verified by removing the range check
    #[test]
    fn test_new_rejects_out_of_range_symbol() {
        let mut sets = chain();
        sets[1][0].push(2);
        assert!(matches!(
            Propagator::new(sets),
            Err(WfcError::InvalidSymbolIndex { index: 2, symbols: 2 })
        ));
    }

    // Tests dense sets compile to the same sparse lists
    // Verified by transposing directions during compilation
    #[test]
    fn test_from_dense() {
        let dense: [Vec<SymbolSet>; 4] = std::array::from_fn(|direction| {
            (0..2)
                .map(|symbol| {
                    let mut set = SymbolSet::new(2);
                    if direction % 2 == 0 {
                        set.insert(1 - symbol);
                    } else {
                        set.insert(0);
                        set.insert(1);
                    }
                    set
                })
                .collect()
        });

        let expected = Propagator::new(chain()).expect("valid lists");
        assert_eq!(Propagator::from_dense(&dense).expect("valid sets"), expected);
    }

    // Tests out-of-range queries return an empty list
    // Verified by indexing the lists directly
    #[test]
    fn test_compatible_out_of_range() {
        let propagator = Propagator::new(chain()).expect("valid lists");
        assert!(propagator.compatible(7, 0).is_empty());
        assert!(propagator.compatible(0, 9).is_empty());
    }

    // Tests isolated entries are reported per direction
    // Verified by reporting only the first isolated entry
    #[test]
    fn test_isolated() {
        let propagator = Propagator::new([
            vec![vec![], vec![0]],
            vec![vec![0], vec![]],
            vec![vec![1], vec![]],
            vec![vec![0], vec![1]],
        ])
        .expect("valid lists");
        assert_eq!(propagator.isolated(), vec![(0, 0), (1, 1), (2, 1)]);
    }

    // Tests symmetry detection against the reverse direction
    // Verified by comparing each direction with itself
    #[test]
    fn test_is_symmetric() {
        assert!(Propagator::new(chain()).expect("valid lists").is_symmetric());

        let lopsided = Propagator::new([
            vec![vec![0, 1], vec![1]],
            vec![vec![0], vec![1]],
            vec![vec![0], vec![1]],
            vec![vec![0], vec![1]],
        ])
        .expect("valid lists");
        assert!(!lopsided.is_symmetric());
    }
}
