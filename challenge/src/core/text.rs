//! Prefix/suffix check: does a string start with `B` and end with `A`?

/// Case-sensitive check. Empty text never matches; `"BA"` does.
pub fn starts_with_b_ends_with_a(text: &str) -> bool {
    !text.is_empty() && text.starts_with('B') && text.ends_with('A')
}

/// Same check after uppercasing, so `"banana"` matches.
pub fn starts_with_b_ends_with_a_ignore_case(text: &str) -> bool {
    starts_with_b_ends_with_a(&text.to_uppercase())
}
