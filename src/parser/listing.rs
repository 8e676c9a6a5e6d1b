// File: ./src/parser/listing.rs
use crate::command::listing::{
    ADD_BUYERS_USAGE, ADD_LISTING_USAGE, DELETE_LISTING_USAGE, EDIT_LISTING_USAGE,
    FIND_LISTING_USAGE, REMOVE_BUYERS_USAGE,
};
use crate::command::{Command, EditListingDescriptor};
use crate::error::ParseError;
use crate::model::{Address, Listing, Name, Price};
use crate::parser::tokenizer::{
    PREFIX_ADDRESS, PREFIX_BUYER, PREFIX_NAME, PREFIX_PRICE, Prefix, tokenize,
};
use crate::parser::{
    optional_field, parse_keywords, parse_name_list, parse_preamble_name, parse_target,
    reject_repeats,
};

const ADD_PREFIXES: &[Prefix] = &[PREFIX_ADDRESS, PREFIX_PRICE, PREFIX_BUYER];
const EDIT_PREFIXES: &[Prefix] = &[PREFIX_NAME, PREFIX_ADDRESS, PREFIX_PRICE];

pub fn parse_add(args: &str) -> Result<Command, ParseError> {
    let usage = ADD_LISTING_USAGE;
    let map = tokenize(args, ADD_PREFIXES);
    let name = parse_preamble_name(map.preamble(), usage)?;
    reject_repeats(&map, &[PREFIX_ADDRESS, PREFIX_PRICE], usage)?;

    let listing = Listing::new(
        name,
        optional_field(&map, PREFIX_ADDRESS, Address::parse, usage)?,
        optional_field(&map, PREFIX_PRICE, Price::parse, usage)?,
    )
    .with_buyers(parse_name_list(map.all_values(PREFIX_BUYER), usage)?);
    Ok(Command::AddListing(listing))
}

pub fn parse_edit(args: &str) -> Result<Command, ParseError> {
    let usage = EDIT_LISTING_USAGE;
    let map = tokenize(args, EDIT_PREFIXES);
    let target = parse_target(map.preamble(), usage)?;
    reject_repeats(&map, EDIT_PREFIXES, usage)?;

    let edit = EditListingDescriptor {
        name: optional_field(&map, PREFIX_NAME, Name::parse, usage)?,
        address: optional_field(&map, PREFIX_ADDRESS, Address::parse, usage)?,
        price: optional_field(&map, PREFIX_PRICE, Price::parse, usage)?,
    };
    if !edit.is_any_field_edited() {
        return Err(ParseError::NoFieldsProvided { usage });
    }
    Ok(Command::EditListing { target, edit })
}

pub fn parse_delete(args: &str) -> Result<Command, ParseError> {
    parse_target(args, DELETE_LISTING_USAGE).map(Command::DeleteListing)
}

/// Shared shape of `addbuyers` and `removebuyers`: a listing name followed
/// by at least one `buyer/`.
fn parse_buyer_change(args: &str, usage: &'static str) -> Result<(Name, Vec<Name>), ParseError> {
    let map = tokenize(args, &[PREFIX_BUYER]);
    if !map.has(PREFIX_BUYER) {
        return Err(ParseError::InvalidFormat { usage });
    }
    let listing = parse_preamble_name(map.preamble(), usage)?;
    let buyers = parse_name_list(map.all_values(PREFIX_BUYER), usage)?;
    Ok((listing, buyers))
}

pub fn parse_add_buyers(args: &str) -> Result<Command, ParseError> {
    let (listing, buyers) = parse_buyer_change(args, ADD_BUYERS_USAGE)?;
    Ok(Command::AddBuyers { listing, buyers })
}

pub fn parse_remove_buyers(args: &str) -> Result<Command, ParseError> {
    let (listing, buyers) = parse_buyer_change(args, REMOVE_BUYERS_USAGE)?;
    Ok(Command::RemoveBuyers { listing, buyers })
}

pub fn parse_find(args: &str) -> Result<Command, ParseError> {
    parse_keywords(args, FIND_LISTING_USAGE).map(Command::FindListings)
}

pub fn parse_list(_args: &str) -> Result<Command, ParseError> {
    Ok(Command::ListListings)
}

pub fn parse_clear(_args: &str) -> Result<Command, ParseError> {
    Ok(Command::ClearListings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Index, Target};

    fn name(s: &str) -> Name {
        Name::parse(s).unwrap()
    }

    #[test]
    fn test_add_listing_full() {
        let Command::AddListing(l) =
            parse_add(" Pinewood Villa a/12 Pine Road pr/450000 buyer/Bernice Yu buyer/David Li")
                .unwrap()
        else {
            panic!("expected AddListing");
        };
        assert_eq!(l.name, name("Pinewood Villa"));
        assert_eq!(l.address.as_ref().map(|a| a.as_str()), Some("12 Pine Road"));
        assert_eq!(l.price.as_ref().map(|p| p.as_str()), Some("450000"));
        assert_eq!(l.buyers(), &[name("Bernice Yu"), name("David Li")]);
    }

    #[test]
    fn test_add_listing_name_only_and_quoted() {
        let Command::AddListing(l) = parse_add(" \"Harbour View\"").unwrap() else {
            panic!("expected AddListing");
        };
        assert_eq!(l.name.as_str(), "Harbour View");
        assert!(l.buyers().is_empty());
        assert!(l.address.is_none());
    }

    #[test]
    fn test_add_listing_requires_name() {
        assert_eq!(
            parse_add(" buyer/Bernice Yu"),
            Err(ParseError::InvalidFormat { usage: ADD_LISTING_USAGE })
        );
    }

    #[test]
    fn test_add_listing_rejects_bad_price() {
        assert!(matches!(
            parse_add(" Villa pr/12k"),
            Err(ParseError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_edit_listing() {
        assert_eq!(
            parse_edit(" 1 pr/460000").unwrap(),
            Command::EditListing {
                target: Target::Index(Index::from_zero_based(0)),
                edit: EditListingDescriptor {
                    price: Some(Price::parse("460000").unwrap()),
                    ..Default::default()
                },
            }
        );
        assert!(matches!(
            parse_edit(" Villa"),
            Err(ParseError::NoFieldsProvided { .. })
        ));
    }

    #[test]
    fn test_buyer_changes_need_a_buyer() {
        assert_eq!(
            parse_add_buyers(" Villa"),
            Err(ParseError::InvalidFormat { usage: ADD_BUYERS_USAGE })
        );
        assert_eq!(
            parse_remove_buyers(" buyer/Bob"),
            Err(ParseError::InvalidFormat { usage: REMOVE_BUYERS_USAGE })
        );
        assert_eq!(
            parse_add_buyers(" Villa buyer/Bob buyer/bob").unwrap(),
            Command::AddBuyers {
                listing: name("Villa"),
                buyers: vec![name("Bob")],
            }
        );
    }
}
