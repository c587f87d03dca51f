//! Tests for ARGB packing, bitmap access and PNG round trips on disk

#[cfg(test)]
mod tests {
    use wavecollapse::WfcError;
    use wavecollapse::io::image::{Bitmap, argb, channels};

    // Verifies channels pack with alpha in the high byte
    // Verified by packing channels in RGBA order
    #[test]
    fn test_argb_layout() {
        assert_eq!(argb(0xff, 0x12, 0x34, 0x56), 0xff12_3456);
        assert_eq!(channels(0x80ab_cdef), [0x80, 0xab, 0xcd, 0xef]);
    }

    // Tests pixel buffers must match the dimensions
    // Verified by accepting buffers longer than width * height
    #[test]
    fn test_new_checks_length() {
        assert!(Bitmap::new(2, 2, vec![0; 4]).is_ok());
        assert!(matches!(
            Bitmap::new(2, 2, vec![0; 5]),
            Err(WfcError::InvalidParameter { .. })
        ));
    }

    // Tests pixel reads and writes, ignoring out-of-range writes
    // Verified by computing the offset as x * height + y
    #[test]
    fn test_pixel_access() {
        let mut bitmap = Bitmap::filled(3, 2, 7);
        bitmap.set_pixel(2, 1, 9);
        bitmap.set_pixel(3, 0, 5);
        bitmap.set_pixel(0, 2, 5);

        assert_eq!(bitmap.pixel(2, 1), Some(9));
        assert_eq!(bitmap.pixel(0, 0), Some(7));
        assert_eq!(bitmap.pixel(3, 0), None);
        assert_eq!(bitmap.pixels().iter().filter(|&&p| p == 5).count(), 0);
        assert_eq!((bitmap.width(), bitmap.height()), (3, 2));
    }

    // Tests conversion to and from the image crate's RGBA buffer
    // Verified by swapping red and blue during conversion
    #[test]
    fn test_rgba_conversion() {
        let bitmap = Bitmap::new(2, 1, vec![argb(0xff, 1, 2, 3), argb(0x40, 4, 5, 6)]).expect("bitmap");
        let rgba = bitmap.to_rgba_image();
        assert_eq!(rgba.get_pixel(0, 0).0, [1, 2, 3, 0xff]);
        assert_eq!(rgba.get_pixel(1, 0).0, [4, 5, 6, 0x40]);
        assert_eq!(Bitmap::from_rgba_image(&rgba), bitmap);
    }

    // Tests saving creates missing directories and loading restores the pixels
    // Verified by skipping parent directory creation in save
    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("out.png");
        let bitmap = Bitmap::new(2, 2, vec![
            argb(0xff, 0xff, 0, 0),
            argb(0xff, 0, 0xff, 0),
            argb(0xff, 0, 0, 0xff),
            argb(0xff, 0, 0, 0),
        ])
        .expect("bitmap");

        bitmap.save(&path).expect("save");
        assert_eq!(Bitmap::load(&path).expect("load"), bitmap);
    }

    // Tests loading a missing file reports the path
    // Verified by converting load errors without the path
    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.png");
        match Bitmap::load(&path) {
            Err(WfcError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected an image load error, got {other:?}"),
        }
    }
}
