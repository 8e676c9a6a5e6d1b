// File: ./src/error.rs
//! Error taxonomy shared by parsers, commands and storage.
//!
//! Every failure the core can produce is one of these types. The controller
//! turns them into user-facing text; nothing below it prints.
use thiserror::Error;

pub const MESSAGE_INVALID_PERSON_INDEX: &str = "The person index provided is invalid";
pub const MESSAGE_INVALID_LISTING_INDEX: &str = "The listing index provided is invalid";

/// A raw value was rejected by a field's validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvalidFieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl InvalidFieldError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Malformed command text. Every variant tied to a command carries that
/// command's usage string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid command format!\n{usage}")]
    InvalidFormat { usage: &'static str },

    #[error("{source}\n{usage}")]
    InvalidField {
        source: InvalidFieldError,
        usage: &'static str,
    },

    #[error("At least one field to edit must be provided.\n{usage}")]
    NoFieldsProvided { usage: &'static str },

    #[error("Multiple values specified for the following single-valued field(s): {}\n{usage}", .prefixes.join(" "))]
    DuplicatePrefix {
        prefixes: Vec<String>,
        usage: &'static str,
    },

    #[error("Index is not a non-zero unsigned integer.\n{usage}")]
    InvalidIndex { usage: &'static str },

    #[error("Unknown command")]
    UnknownCommand,
}

impl ParseError {
    pub fn usage(&self) -> Option<&'static str> {
        match self {
            ParseError::InvalidFormat { usage }
            | ParseError::InvalidField { usage, .. }
            | ParseError::NoFieldsProvided { usage }
            | ParseError::DuplicatePrefix { usage, .. }
            | ParseError::InvalidIndex { usage } => Some(*usage),
            ParseError::UnknownCommand => None,
        }
    }
}

/// A well-formed command that cannot be applied to the current store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("{0}")]
    Duplicate(&'static str),

    #[error("{0}")]
    InvalidIndex(&'static str),

    #[error("{context}: {}", .names.join(", "))]
    InvalidName {
        context: &'static str,
        names: Vec<String>,
    },
}

impl CommandError {
    pub fn invalid_name(context: &'static str, name: impl Into<String>) -> Self {
        CommandError::InvalidName {
            context,
            names: vec![name.into()],
        }
    }
}

/// A persisted record that could not be turned back into a model value.
#[derive(Debug, Error)]
pub enum CorruptDataError {
    #[error("{entity}'s {field} field is missing!")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("{entity}: {source}")]
    InvalidField {
        entity: &'static str,
        source: InvalidFieldError,
    },

    #[error("Unknown role '{0}' (expected 'buyer' or 'seller')")]
    UnknownRole(String),

    #[error("Appointment must have a date, a start and an end, or none of them")]
    PartialAppointment,

    #[error("Duplicate {entity} '{name}' in stored data")]
    Duplicate { entity: &'static str, name: String },

    #[error("Unsupported storage version {0}")]
    UnsupportedVersion(u32),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything that can go wrong between reading a line and applying it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Command(#[from] CommandError),
}
