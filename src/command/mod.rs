// File: src/command/mod.rs
//! Command objects.
//!
//! A `Command` is what a parser produces: a fully validated request that
//! still has to be checked against the store. `execute` runs all checks
//! before touching the store, so a failed command changes nothing.
pub mod listing;
pub mod person;

use crate::error::CommandError;
use crate::model::{Listing, Name, NameFilter, Person};
use crate::store::RecordStore;

pub use listing::EditListingDescriptor;
pub use person::EditPersonDescriptor;

pub const HELP_WORD: &str = "help";
pub const HELP_USAGE: &str = "help: Shows the list of commands.";
pub const EXIT_WORD: &str = "exit";

/// One-based position in a displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index(usize);

impl Index {
    /// Returns `None` for zero.
    pub fn from_one_based(n: usize) -> Option<Self> {
        n.checked_sub(1).map(Index)
    }

    pub fn from_zero_based(n: usize) -> Self {
        Index(n)
    }

    pub fn zero_based(&self) -> usize {
        self.0
    }

    pub fn one_based(&self) -> usize {
        self.0 + 1
    }
}

/// How a command picks the record it acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Position in the current filtered view.
    Index(Index),
    /// Identity key, looked up in the whole store.
    Name(Name),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddPerson(Person),
    EditPerson {
        target: Target,
        edit: EditPersonDescriptor,
    },
    DeletePerson(Target),
    DeleteAppointment(Target),
    FindPersons(NameFilter),
    ListPersons,
    ClearPersons,

    AddListing(Listing),
    EditListing {
        target: Target,
        edit: EditListingDescriptor,
    },
    DeleteListing(Target),
    AddBuyers {
        listing: Name,
        buyers: Vec<Name>,
    },
    RemoveBuyers {
        listing: Name,
        buyers: Vec<Name>,
    },
    FindListings(NameFilter),
    ListListings,
    ClearListings,

    Help,
    Exit,
}

/// Outcome of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    /// The store contents changed and should be persisted.
    pub mutated: bool,
    pub show_help: bool,
    pub exit: bool,
}

impl CommandResult {
    pub fn mutation(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            mutated: true,
            show_help: false,
            exit: false,
        }
    }

    pub fn view(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            mutated: false,
            show_help: false,
            exit: false,
        }
    }
}

impl Command {
    pub fn execute(&self, store: &mut RecordStore) -> Result<CommandResult, CommandError> {
        match self {
            Command::AddPerson(p) => person::add(store, p),
            Command::EditPerson { target, edit } => person::edit(store, target, edit),
            Command::DeletePerson(target) => person::delete(store, target),
            Command::DeleteAppointment(target) => person::delete_appointment(store, target),
            Command::FindPersons(filter) => Ok(person::find(store, filter)),
            Command::ListPersons => Ok(person::list(store)),
            Command::ClearPersons => Ok(person::clear(store)),

            Command::AddListing(l) => listing::add(store, l),
            Command::EditListing { target, edit } => listing::edit(store, target, edit),
            Command::DeleteListing(target) => listing::delete(store, target),
            Command::AddBuyers { listing, buyers } => listing::add_buyers(store, listing, buyers),
            Command::RemoveBuyers { listing, buyers } => {
                listing::remove_buyers(store, listing, buyers)
            }
            Command::FindListings(filter) => Ok(listing::find(store, filter)),
            Command::ListListings => Ok(listing::list(store)),
            Command::ClearListings => Ok(listing::clear(store)),

            Command::Help => Ok(CommandResult {
                show_help: true,
                ..CommandResult::view("Showing help.")
            }),
            Command::Exit => Ok(CommandResult {
                exit: true,
                ..CommandResult::view("Goodbye!")
            }),
        }
    }
}
