// File: ./src/parser/mod.rs
//! Turns command text into `Command` values.
//!
//! Each command word has one parse function; the registry maps words to
//! them. Parsers only check shape and field validity. Anything that depends
//! on what is in the store is left to `Command::execute`.
pub mod listing;
pub mod person;
pub mod registry;
pub mod tokenizer;

use crate::command::{Index, Target};
use crate::error::{InvalidFieldError, ParseError};
use crate::model::{Name, NameFilter, Tag};
use crate::parser::tokenizer::{ArgumentMultimap, Prefix};
use std::collections::BTreeSet;

pub use registry::{CommandRegistry, Dispatcher};

/// Signature shared by every command parser.
pub type ParseFn = fn(&str) -> Result<crate::command::Command, ParseError>;

/// Validates one raw value, attaching the command's usage on failure.
pub fn field<T>(
    raw: &str,
    parse: fn(&str) -> Result<T, InvalidFieldError>,
    usage: &'static str,
) -> Result<T, ParseError> {
    parse(raw).map_err(|source| ParseError::InvalidField { source, usage })
}

/// Like `field`, for a prefix that may be absent.
pub fn optional_field<T>(
    map: &ArgumentMultimap,
    prefix: Prefix,
    parse: fn(&str) -> Result<T, InvalidFieldError>,
    usage: &'static str,
) -> Result<Option<T>, ParseError> {
    map.value(prefix).map(|raw| field(raw, parse, usage)).transpose()
}

fn is_quoted(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

/// Removes one pair of surrounding double quotes, so `"123 Main St"` and
/// `123 Main St` name the same listing.
pub fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    if is_quoted(s) { s[1..s.len() - 1].trim() } else { s }
}

/// Reads the preamble as a target: bare digits mean a one-based index,
/// anything else is a name. A quoted preamble is always a name, so `"88"`
/// reaches a record named 88.
pub fn parse_target(preamble: &str, usage: &'static str) -> Result<Target, ParseError> {
    let quoted = is_quoted(preamble.trim());
    let preamble = strip_quotes(preamble);
    if preamble.is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    if !quoted && preamble.chars().all(|c| c.is_ascii_digit()) {
        return preamble
            .parse::<usize>()
            .ok()
            .and_then(Index::from_one_based)
            .map(Target::Index)
            .ok_or(ParseError::InvalidIndex { usage });
    }
    field(preamble, Name::parse, usage).map(Target::Name)
}

/// Reads the preamble as a required name.
pub fn parse_preamble_name(preamble: &str, usage: &'static str) -> Result<Name, ParseError> {
    let preamble = strip_quotes(preamble);
    if preamble.is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    field(preamble, Name::parse, usage)
}

pub fn parse_tags(values: &[String], usage: &'static str) -> Result<BTreeSet<Tag>, ParseError> {
    values.iter().map(|v| field(v, Tag::parse, usage)).collect()
}

/// Parses each value as a name, dropping repeats while keeping first-seen order.
pub fn parse_name_list(values: &[String], usage: &'static str) -> Result<Vec<Name>, ParseError> {
    let mut names: Vec<Name> = Vec::new();
    for value in values {
        let name = field(value, Name::parse, usage)?;
        if !names.contains(&name) {
            names.push(name);
        }
    }
    Ok(names)
}

/// Splits whitespace-separated keywords; at least one is required.
pub fn parse_keywords(args: &str, usage: &'static str) -> Result<NameFilter, ParseError> {
    let filter = NameFilter::new(args.split_whitespace());
    if filter.keywords().is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    Ok(filter)
}

/// Fails when any single-valued prefix was given more than once.
pub fn reject_repeats(
    map: &ArgumentMultimap,
    single_valued: &[Prefix],
    usage: &'static str,
) -> Result<(), ParseError> {
    let repeated = map.repeated(single_valued);
    if repeated.is_empty() {
        return Ok(());
    }
    Err(ParseError::DuplicatePrefix {
        prefixes: repeated.iter().map(|p| p.to_string()).collect(),
        usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const USAGE: &str = "test usage";

    #[test]
    fn test_parse_target_index_and_name() {
        assert_eq!(
            parse_target(" 3 ", USAGE).unwrap(),
            Target::Index(Index::from_zero_based(2))
        );
        assert_eq!(
            parse_target("Alex Yeoh", USAGE).unwrap(),
            Target::Name(Name::parse("alex yeoh").unwrap())
        );
        assert_eq!(
            parse_target("\"12th Avenue\"", USAGE).unwrap(),
            Target::Name(Name::parse("12th Avenue").unwrap())
        );
        assert_eq!(
            parse_target(" \"88\" ", USAGE).unwrap(),
            Target::Name(Name::parse("88").unwrap())
        );
    }

    #[test]
    fn test_parse_target_rejects_zero_and_overflow() {
        assert_eq!(
            parse_target("0", USAGE),
            Err(ParseError::InvalidIndex { usage: USAGE })
        );
        assert_eq!(
            parse_target("99999999999999999999999999", USAGE),
            Err(ParseError::InvalidIndex { usage: USAGE })
        );
        assert_eq!(
            parse_target("", USAGE),
            Err(ParseError::InvalidFormat { usage: USAGE })
        );
        assert!(matches!(
            parse_target("-1", USAGE),
            Err(ParseError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_name_list_dedups() {
        let values = vec!["Bernice Yu".to_string(), "bernice  yu".to_string(), "David".to_string()];
        let names = parse_name_list(&values, USAGE).unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names[0].as_str(), "Bernice Yu");
    }

    #[test]
    fn test_keywords_required() {
        assert!(parse_keywords("   ", USAGE).is_err());
        assert_eq!(parse_keywords(" alex  bob ", USAGE).unwrap().keywords(), &["alex", "bob"]);
    }
}
