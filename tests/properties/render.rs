//! Property tests for header rendering and re-parsing.

use std::path::Path;

use proptest::prelude::*;

use flashpack::manifest::EncoderOptions;
use flashpack::models::Symbol;
use flashpack::render::{parse_header_bytes, render_header};

fn symbol() -> Symbol {
    Symbol::new("blob_gz", Path::new("blob")).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Rendered headers re-parse to exactly the input bytes.
    #[test]
    fn property_render_parse_round_trip(
        data in proptest::collection::vec(any::<u8>(), 0..512),
        per_row in 1usize..32,
    ) {
        let opts = EncoderOptions {
            bytes_per_row: per_row,
            ..EncoderOptions::default()
        };
        let header = render_header(&symbol(), &data, &opts);
        prop_assert_eq!(parse_header_bytes(&header), Some(data));
    }

    /// PROPERTY: The emitted array holds exactly one literal per input byte.
    #[test]
    fn property_literal_count_matches_length(
        data in proptest::collection::vec(any::<u8>(), 0..512)
    ) {
        let header = render_header(&symbol(), &data, &EncoderOptions::default());
        prop_assert_eq!(header.matches("0x").count(), data.len());
    }

    /// PROPERTY: Rendering never panics and always terminates with a newline,
    /// whatever the row width.
    #[test]
    fn property_render_never_panics(
        data in proptest::collection::vec(any::<u8>(), 0..256),
        per_row in 0usize..64,
    ) {
        let opts = EncoderOptions {
            bytes_per_row: per_row,
            ..EncoderOptions::default()
        };
        let header = render_header(&symbol(), &data, &opts);
        prop_assert!(header.ends_with('\n'));
        prop_assert!(header.is_ascii());
    }

    /// PROPERTY: parse_header_bytes never panics on arbitrary small input.
    #[test]
    fn property_parse_never_panics(
        content in "(?s).{0,512}"
    ) {
        let _ = parse_header_bytes(&content);
    }
}
