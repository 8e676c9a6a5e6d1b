// File: src/parser/tokenizer.rs
//! Splits command arguments into a preamble and prefixed values.
//!
//! `delete 2` has preamble "2"; `edit 1 p/91234567 t/friend t/golf` has
//! preamble "1", one `p/` value and two `t/` values. A prefix only counts at
//! the start of a word and only if the caller declared it; anything else is
//! plain text belonging to the value before it. A preamble opening with a
//! double quote runs to the closing quote, so `"Pine a/b Court"` is a name.
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix(&'static str);

impl Prefix {
    pub const fn new(marker: &'static str) -> Self {
        Prefix(marker)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const PREFIX_NAME: Prefix = Prefix::new("n/");
pub const PREFIX_PHONE: Prefix = Prefix::new("p/");
pub const PREFIX_EMAIL: Prefix = Prefix::new("e/");
pub const PREFIX_TAG: Prefix = Prefix::new("t/");
pub const PREFIX_DATE: Prefix = Prefix::new("d/");
pub const PREFIX_FROM: Prefix = Prefix::new("from/");
pub const PREFIX_TO: Prefix = Prefix::new("to/");
pub const PREFIX_PROPERTY: Prefix = Prefix::new("prop/");
pub const PREFIX_ADDRESS: Prefix = Prefix::new("a/");
pub const PREFIX_PRICE: Prefix = Prefix::new("pr/");
pub const PREFIX_BUYER: Prefix = Prefix::new("buyer/");

/// Result of tokenizing: the preamble plus every value seen per prefix, in
/// the order they appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`, if any.
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|v| v.last())
            .map(|s| s.as_str())
    }

    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn has(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    /// Single-valued prefixes that were given more than once.
    pub fn repeated(&self, prefixes: &[Prefix]) -> Vec<Prefix> {
        prefixes
            .iter()
            .copied()
            .filter(|p| self.all_values(*p).len() > 1)
            .collect()
    }
}

/// Tokenizes `args` against the declared `prefixes`.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let mut markers = find_markers(args, prefixes);
    markers.sort_by_key(|(pos, _)| *pos);

    let mut map = ArgumentMultimap::default();
    let preamble_end = markers.first().map(|(pos, _)| *pos).unwrap_or(args.len());
    map.preamble = args[..preamble_end].trim().to_string();

    for (i, (pos, prefix)) in markers.iter().enumerate() {
        let value_start = pos + prefix.as_str().len();
        let value_end = markers.get(i + 1).map(|(p, _)| *p).unwrap_or(args.len());
        let value = args[value_start..value_end].trim().to_string();
        map.values.entry(*prefix).or_default().push(value);
    }
    map
}

/// End of a leading quoted span, just past the closing quote.
fn quoted_preamble_end(args: &str) -> Option<usize> {
    let start = args.len() - args.trim_start().len();
    let rest = args[start..].strip_prefix('"')?;
    rest.find('"').map(|close| start + 1 + close + 1)
}

/// Byte offsets of every declared prefix that starts a word.
fn find_markers(args: &str, prefixes: &[Prefix]) -> Vec<(usize, Prefix)> {
    let mut found = Vec::new();
    let mut at_word_start = true;
    let skip_until = quoted_preamble_end(args).unwrap_or(0);

    for (idx, c) in args.char_indices() {
        if idx < skip_until {
            at_word_start = false;
            continue;
        }
        if c.is_whitespace() {
            at_word_start = true;
            continue;
        }
        if at_word_start {
            let rest = &args[idx..];
            // Longest declared marker wins when several match.
            if let Some(prefix) = prefixes
                .iter()
                .filter(|p| rest.starts_with(p.as_str()))
                .max_by_key(|p| p.as_str().len())
            {
                found.push((idx, *prefix));
            }
        }
        at_word_start = false;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_prefixes_everything_is_preamble() {
        let map = tokenize("  some random string /?! ", &[PREFIX_NAME]);
        assert_eq!(map.preamble(), "some random string /?!");
        assert!(!map.has(PREFIX_NAME));
    }

    #[test]
    fn test_preamble_and_values() {
        let map = tokenize(
            " 1 n/Alex Yeoh p/91234567 t/friends t/golf",
            &[PREFIX_NAME, PREFIX_PHONE, PREFIX_TAG],
        );
        assert_eq!(map.preamble(), "1");
        assert_eq!(map.value(PREFIX_NAME), Some("Alex Yeoh"));
        assert_eq!(map.value(PREFIX_PHONE), Some("91234567"));
        assert_eq!(map.all_values(PREFIX_TAG), &["friends", "golf"]);
    }

    #[test]
    fn test_undeclared_and_mid_word_markers_are_text() {
        let map = tokenize("n/Alex e/a@b.com x/y", &[PREFIX_NAME]);
        assert_eq!(map.value(PREFIX_NAME), Some("Alex e/a@b.com x/y"));

        let map = tokenize("n/Jan/Feb", &[PREFIX_NAME]);
        assert_eq!(map.value(PREFIX_NAME), Some("Jan/Feb"));
    }

    #[test]
    fn test_empty_value_is_kept() {
        let map = tokenize("1 t/", &[PREFIX_TAG]);
        assert!(map.has(PREFIX_TAG));
        assert_eq!(map.all_values(PREFIX_TAG), &[""]);
    }

    #[test]
    fn test_longest_marker_wins() {
        let map = tokenize("Pinewood pr/500000 p/123", &[PREFIX_PHONE, PREFIX_PRICE]);
        assert_eq!(map.value(PREFIX_PRICE), Some("500000"));
        assert_eq!(map.value(PREFIX_PHONE), Some("123"));
    }

    #[test]
    fn test_quoted_preamble_hides_markers() {
        let map = tokenize(r#" "Pine a/b Court" pr/450000"#, &[PREFIX_ADDRESS, PREFIX_PRICE]);
        assert_eq!(map.preamble(), r#""Pine a/b Court""#);
        assert!(!map.has(PREFIX_ADDRESS));
        assert_eq!(map.value(PREFIX_PRICE), Some("450000"));

        // An unclosed quote protects nothing.
        let map = tokenize(r#""Pine a/b"#, &[PREFIX_ADDRESS]);
        assert_eq!(map.preamble(), r#""Pine"#);
        assert_eq!(map.value(PREFIX_ADDRESS), Some("b"));
    }

    #[test]
    fn test_repeated_single_valued() {
        let map = tokenize("n/A n/B p/123", &[PREFIX_NAME, PREFIX_PHONE]);
        assert_eq!(map.repeated(&[PREFIX_NAME, PREFIX_PHONE]), vec![PREFIX_NAME]);
        assert_eq!(map.value(PREFIX_NAME), Some("B"));
    }
}
