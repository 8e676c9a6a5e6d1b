// File: ./src/parser/registry.rs
//! Routes a command line to the parser that owns its first word.
//!
//! Person and listing commands live in separate dispatchers with disjoint
//! vocabularies. `CommandRegistry` asks the listing dispatcher first and
//! falls back to the person dispatcher, which also owns `help` and `exit`.
use crate::command::listing::{
    ADD_BUYERS_WORD, ADD_LISTING_WORD, CLEAR_LISTINGS_WORD, DELETE_LISTING_WORD,
    EDIT_LISTING_WORD, FIND_LISTING_WORD, LIST_LISTINGS_WORD, REMOVE_BUYERS_WORD,
};
use crate::command::person::{
    ADD_BUYER_WORD, ADD_SELLER_WORD, CLEAR_WORD, DELETE_APPOINTMENT_WORD, DELETE_WORD, EDIT_WORD,
    FIND_WORD, LIST_WORD,
};
use crate::command::{Command, EXIT_WORD, HELP_USAGE, HELP_WORD};
use crate::error::ParseError;
use crate::parser::{ParseFn, listing, person};
use std::collections::HashMap;

/// Maps command words to their parse functions.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    table: HashMap<&'static str, ParseFn>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, word: &'static str, parse: ParseFn) -> Self {
        self.table.insert(word, parse);
        self
    }

    /// Dispatcher for every person-side word plus `help` and `exit`.
    pub fn persons() -> Self {
        Self::new()
            .register(ADD_BUYER_WORD, person::parse_add_buyer)
            .register(ADD_SELLER_WORD, person::parse_add_seller)
            .register(EDIT_WORD, person::parse_edit)
            .register(DELETE_WORD, person::parse_delete)
            .register(DELETE_APPOINTMENT_WORD, person::parse_delete_appointment)
            .register(FIND_WORD, person::parse_find)
            .register(LIST_WORD, person::parse_list)
            .register(CLEAR_WORD, person::parse_clear)
            .register(HELP_WORD, person::parse_help)
            .register(EXIT_WORD, person::parse_exit)
    }

    pub fn listings() -> Self {
        Self::new()
            .register(ADD_LISTING_WORD, listing::parse_add)
            .register(EDIT_LISTING_WORD, listing::parse_edit)
            .register(DELETE_LISTING_WORD, listing::parse_delete)
            .register(ADD_BUYERS_WORD, listing::parse_add_buyers)
            .register(REMOVE_BUYERS_WORD, listing::parse_remove_buyers)
            .register(FIND_LISTING_WORD, listing::parse_find)
            .register(LIST_LISTINGS_WORD, listing::parse_list)
            .register(CLEAR_LISTINGS_WORD, listing::parse_clear)
    }

    /// Command words are matched exactly; `Buyer` is not `buyer`.
    pub fn owns(&self, word: &str) -> bool {
        self.table.contains_key(word)
    }

    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }

    /// Splits `input` into command word and arguments and runs the matching
    /// parser. The arguments keep their leading whitespace.
    pub fn dispatch(&self, input: &str) -> Result<Command, ParseError> {
        let (word, args) = split_command(input).ok_or(ParseError::InvalidFormat { usage: HELP_USAGE })?;
        let parse = self.table.get(word).ok_or(ParseError::UnknownCommand)?;
        log::debug!("Dispatching '{}'", word);
        parse(args)
    }
}

fn split_command(input: &str) -> Option<(&str, &str)> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(match trimmed.find(char::is_whitespace) {
        Some(at) => trimmed.split_at(at),
        None => (trimmed, ""),
    })
}

/// Front door for all command text.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    persons: Dispatcher,
    listings: Dispatcher,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            persons: Dispatcher::persons(),
            listings: Dispatcher::listings(),
        }
    }

    pub fn parse(&self, input: &str) -> Result<Command, ParseError> {
        match split_command(input) {
            Some((word, _)) if self.listings.owns(word) => self.listings.dispatch(input),
            _ => self.persons.dispatch(input),
        }
    }
}
