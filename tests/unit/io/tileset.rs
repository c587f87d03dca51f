//! Tests for tileset description parsing

#[cfg(test)]
mod tests {
    use wavecollapse::WfcError;
    use wavecollapse::analysis::tileset::{SymmetryClass, TileRef};
    use wavecollapse::io::tileset::{load_tileset, parse_tileset};

    const KNOTS: &str = r#"<set unique="False">
        <tiles>
            <tile name="corner" symmetry="L" weight="0.5"/>
            <tile name="cross" symmetry="I"/>
            <tile name="empty"></tile>
        </tiles>
        <neighbors>
            <neighbor left="corner 1" right="corner"/>
            <neighbor left="cross" right="empty 0"/>
        </neighbors>
        <subsets>
            <subset name="simple">
                <tile name="corner"/>
                <tile name="empty"/>
            </subset>
            <subset name="nothing"/>
        </subsets>
    </set>"#;

    // Verifies tiles are read in order with their symmetry and weight
    // Verified by defaulting the weight to zero
    #[test]
    fn test_parse_tiles() {
        let description = parse_tileset(KNOTS).expect("valid tileset");
        assert!(!description.unique);

        let names: Vec<&str> = description.tiles.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["corner", "cross", "empty"]);
        assert_eq!(description.tiles[0].symmetry, SymmetryClass::L);
        assert!((description.tiles[0].weight - 0.5).abs() < f64::EPSILON);
        assert_eq!(description.tiles[1].symmetry, SymmetryClass::I);
        assert!((description.tiles[1].weight - 1.0).abs() < f64::EPSILON);
        assert_eq!(description.tiles[2].symmetry, SymmetryClass::X);
    }

    // Tests neighbor references keep their orientations
    // Verified by dropping the orientation suffix while parsing
    #[test]
    fn test_parse_neighbors() {
        let description = parse_tileset(KNOTS).expect("valid tileset");
        assert_eq!(description.neighbors.len(), 2);
        assert_eq!(
            description.neighbors[0].left,
            TileRef {
                tile: "corner".to_string(),
                orientation: 1
            }
        );
        assert_eq!(description.neighbors[0].right.orientation, 0);
    }

    // Tests subsets collect their tiles without adding them to the tile list
    // Verified by pushing subset tiles into the main tile list
    #[test]
    fn test_parse_subsets() {
        let description = parse_tileset(KNOTS).expect("valid tileset");
        assert_eq!(description.tiles.len(), 3);
        assert_eq!(
            description.subsets.get("simple"),
            Some(&vec!["corner".to_string(), "empty".to_string()])
        );
        assert_eq!(description.subsets.get("nothing"), Some(&Vec::new()));
    }

    // Tests the unique flag and that elements outside their section are ignored
    // Verified by accepting neighbor elements anywhere
    #[test]
    fn test_parse_unique_and_stray_elements() {
        let description = parse_tileset(
            r#"<set unique="True">
                <neighbor left="a" right="a"/>
                <tile name="stray"/>
                <tiles><tile name="a"/></tiles>
            </set>"#,
        )
        .expect("valid tileset");

        assert!(description.unique);
        assert_eq!(description.tiles.len(), 1);
        assert!(description.neighbors.is_empty());
    }

    // Tests entity references in names are decoded everywhere a name appears
    // Verified by storing the raw attribute bytes
    #[test]
    fn test_parse_decodes_entities() {
        let description = parse_tileset(
            r#"<set>
                <tiles><tile name="salt&amp;pepper"/><tile name="&lt;edge&gt;"/></tiles>
                <neighbors><neighbor left="salt&amp;pepper 1" right="&lt;edge&gt;"/></neighbors>
                <subsets><subset name="a&amp;b"><tile name="salt&amp;pepper"/></subset></subsets>
            </set>"#,
        )
        .expect("valid tileset");

        let names: Vec<&str> = description.tiles.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["salt&pepper", "<edge>"]);
        assert_eq!(description.neighbors[0].left.tile, "salt&pepper");
        assert_eq!(description.neighbors[0].left.orientation, 1);
        assert_eq!(description.neighbors[0].right.tile, "<edge>");
        assert_eq!(
            description.subsets.get("a&b"),
            Some(&vec!["salt&pepper".to_string()])
        );
    }

    // Tests missing attributes and bad numbers are rejected
    // Verified by skipping tiles without a name
    #[test]
    fn test_parse_rejects_invalid() {
        assert!(matches!(
            parse_tileset(r#"<set><tiles><tile symmetry="L"/></tiles></set>"#),
            Err(WfcError::InvalidDescriptor { element: "tile", .. })
        ));
        assert!(matches!(
            parse_tileset(r#"<set><tiles><tile name="a" weight="heavy"/></tiles></set>"#),
            Err(WfcError::InvalidDescriptor { .. })
        ));
        assert!(matches!(
            parse_tileset(r#"<set><neighbors><neighbor left="a"/></neighbors></set>"#),
            Err(WfcError::InvalidDescriptor { element: "neighbor", .. })
        ));
    }

    // Tests loading from disk
    // Verified by parsing the path instead of the file contents
    #[test]
    fn test_load_tileset() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("knots.xml");
        std::fs::write(&path, KNOTS).expect("write tileset");

        assert_eq!(load_tileset(&path).expect("valid file").tiles.len(), 3);
        assert!(load_tileset(dir.path().join("absent.xml")).is_err());
    }
}
