//! Property tests for the deterministic gzip layer.

use proptest::prelude::*;

use flashpack::compress::{gzip_compress, gzip_decompress, GZIP_MAGIC};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Compression round-trips arbitrary payloads exactly.
    #[test]
    fn property_gzip_round_trip(
        data in proptest::collection::vec(any::<u8>(), 0..2048)
    ) {
        let gz = gzip_compress(&data).unwrap();
        prop_assert_eq!(gzip_decompress(&gz).unwrap(), data);
    }

    /// PROPERTY: Compression is deterministic - identical input, identical bytes.
    #[test]
    fn property_gzip_deterministic(
        data in proptest::collection::vec(any::<u8>(), 0..2048)
    ) {
        prop_assert_eq!(gzip_compress(&data).unwrap(), gzip_compress(&data).unwrap());
    }

    /// PROPERTY: Every stream carries the gzip magic and a zeroed mtime field.
    #[test]
    fn property_gzip_header_fields_fixed(
        data in proptest::collection::vec(any::<u8>(), 0..512)
    ) {
        let gz = gzip_compress(&data).unwrap();
        prop_assert_eq!(&gz[..2], &GZIP_MAGIC[..]);
        prop_assert_eq!(&gz[4..8], &[0u8, 0, 0, 0][..]);
    }
}
