//! Property tests for symbol derivation.

use std::path::Path;

use proptest::prelude::*;

use flashpack::models::Symbol;

fn file_name() -> impl Strategy<Value = String> {
    // Realistic asset file names: letters, digits, dots, dashes, spaces.
    proptest::string::string_regex("[A-Za-z0-9._ -]{1,24}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Derived symbols are always valid C identifiers.
    #[test]
    fn property_derived_symbol_is_valid(name in file_name()) {
        let sym = Symbol::derive(Path::new(&name));
        prop_assert!(
            Symbol::is_valid(sym.as_str()),
            "derived symbol '{}' from '{}' is not a valid identifier",
            sym.as_str(),
            name
        );
    }

    /// PROPERTY: Derived symbols always carry the `_gz` suffix.
    #[test]
    fn property_derived_symbol_has_gz_suffix(name in file_name()) {
        let sym = Symbol::derive(Path::new(&name));
        prop_assert!(sym.as_str().ends_with("_gz"));
    }

    /// PROPERTY: Derivation is insensitive to the directory part.
    #[test]
    fn property_derivation_ignores_directories(name in "[A-Za-z][A-Za-z0-9.]{0,16}") {
        let bare = Symbol::derive(Path::new(&name));
        let nested = Symbol::derive(&Path::new("web/static").join(&name));
        prop_assert_eq!(bare, nested);
    }
}
