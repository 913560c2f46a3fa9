//! Shared proptest strategies.

use proptest::prelude::*;

/// A single query token: mostly short names, sometimes falsy.
pub(crate) fn arb_token() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => prop::string::string_regex("[a-e]{1,3}").unwrap(),
        1 => Just(String::new()),
        1 => Just(" ".to_string()),
        1 => Just("0".to_string()),
    ]
}

/// A list of tokens with frequent duplicates.
pub(crate) fn arb_token_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_token(), 0..12)
}

/// A list of plain names without falsy entries.
pub(crate) fn arb_name_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[a-e]{1,3}").unwrap(), 0..8)
}
