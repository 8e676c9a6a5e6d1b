// File: ./src/parser/person.rs
use crate::command::person::{
    ADD_BUYER_USAGE, ADD_SELLER_USAGE, DELETE_APPOINTMENT_USAGE, DELETE_USAGE, EDIT_USAGE,
    FIND_USAGE,
};
use crate::command::{Command, EditPersonDescriptor};
use crate::error::{InvalidFieldError, ParseError};
use crate::model::{
    Appointment, AppointmentDate, AppointmentTime, Email, Name, Person, Phone, Property, Role,
};
use crate::parser::tokenizer::{
    PREFIX_DATE, PREFIX_EMAIL, PREFIX_FROM, PREFIX_NAME, PREFIX_PHONE, PREFIX_PROPERTY,
    PREFIX_TAG, PREFIX_TO, Prefix, tokenize,
};
use crate::parser::{field, optional_field, parse_keywords, parse_tags, parse_target, reject_repeats};
use std::collections::BTreeSet;

pub const APPOINTMENT_PARTS_CONSTRAINTS: &str =
    "An appointment needs d/DATE, from/HH:MM and to/HH:MM together";

const ADD_PREFIXES: &[Prefix] = &[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_TAG];
const ADD_SINGLE: &[Prefix] = &[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL];

const EDIT_PREFIXES: &[Prefix] = &[
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_TAG,
    PREFIX_DATE,
    PREFIX_FROM,
    PREFIX_TO,
    PREFIX_PROPERTY,
];
const EDIT_SINGLE: &[Prefix] = &[
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_DATE,
    PREFIX_FROM,
    PREFIX_TO,
    PREFIX_PROPERTY,
];

pub fn parse_add_buyer(args: &str) -> Result<Command, ParseError> {
    parse_add(args, Role::Buyer, ADD_BUYER_USAGE)
}

pub fn parse_add_seller(args: &str) -> Result<Command, ParseError> {
    parse_add(args, Role::Seller, ADD_SELLER_USAGE)
}

fn parse_add(args: &str, role: Role, usage: &'static str) -> Result<Command, ParseError> {
    let map = tokenize(args, ADD_PREFIXES);

    let (Some(name), Some(phone), Some(email)) = (
        map.value(PREFIX_NAME),
        map.value(PREFIX_PHONE),
        map.value(PREFIX_EMAIL),
    ) else {
        return Err(ParseError::InvalidFormat { usage });
    };
    if !map.preamble().is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    reject_repeats(&map, ADD_SINGLE, usage)?;

    let person = Person::new(
        role,
        field(name, Name::parse, usage)?,
        field(phone, Phone::parse, usage)?,
        field(email, Email::parse, usage)?,
        parse_tags(map.all_values(PREFIX_TAG), usage)?,
    );
    Ok(Command::AddPerson(person))
}

pub fn parse_edit(args: &str) -> Result<Command, ParseError> {
    let usage = EDIT_USAGE;
    let map = tokenize(args, EDIT_PREFIXES);
    let target = parse_target(map.preamble(), usage)?;
    reject_repeats(&map, EDIT_SINGLE, usage)?;

    let edit = EditPersonDescriptor {
        name: optional_field(&map, PREFIX_NAME, Name::parse, usage)?,
        phone: optional_field(&map, PREFIX_PHONE, Phone::parse, usage)?,
        email: optional_field(&map, PREFIX_EMAIL, Email::parse, usage)?,
        tags: parse_tags_for_edit(map.all_values(PREFIX_TAG), usage)?,
        appointment: parse_appointment(
            map.value(PREFIX_DATE),
            map.value(PREFIX_FROM),
            map.value(PREFIX_TO),
            usage,
        )?,
        property: optional_field(&map, PREFIX_PROPERTY, Property::parse, usage)?,
    };

    if !edit.is_any_field_edited() {
        return Err(ParseError::NoFieldsProvided { usage });
    }
    Ok(Command::EditPerson { target, edit })
}

/// `t/` alone clears every tag; no `t/` at all leaves tags untouched.
fn parse_tags_for_edit(
    values: &[String],
    usage: &'static str,
) -> Result<Option<BTreeSet<crate::model::Tag>>, ParseError> {
    if values.is_empty() {
        return Ok(None);
    }
    if values.len() == 1 && values[0].is_empty() {
        return Ok(Some(BTreeSet::new()));
    }
    parse_tags(values, usage).map(Some)
}

fn parse_appointment(
    date: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    usage: &'static str,
) -> Result<Option<Appointment>, ParseError> {
    match (date, from, to) {
        (None, None, None) => Ok(None),
        (Some(date), Some(from), Some(to)) => {
            let date = field(date, AppointmentDate::parse, usage)?;
            let from = field(from, AppointmentTime::parse, usage)?;
            let to = field(to, AppointmentTime::parse, usage)?;
            Appointment::new(date, from, to)
                .map(Some)
                .map_err(|source| ParseError::InvalidField { source, usage })
        }
        _ => Err(ParseError::InvalidField {
            source: InvalidFieldError::new("appointment", APPOINTMENT_PARTS_CONSTRAINTS),
            usage,
        }),
    }
}

pub fn parse_delete(args: &str) -> Result<Command, ParseError> {
    parse_target(args, DELETE_USAGE).map(Command::DeletePerson)
}

pub fn parse_delete_appointment(args: &str) -> Result<Command, ParseError> {
    parse_target(args, DELETE_APPOINTMENT_USAGE).map(Command::DeleteAppointment)
}

pub fn parse_find(args: &str) -> Result<Command, ParseError> {
    parse_keywords(args, FIND_USAGE).map(Command::FindPersons)
}

pub fn parse_list(_args: &str) -> Result<Command, ParseError> {
    Ok(Command::ListPersons)
}

pub fn parse_clear(_args: &str) -> Result<Command, ParseError> {
    Ok(Command::ClearPersons)
}

pub fn parse_help(_args: &str) -> Result<Command, ParseError> {
    Ok(Command::Help)
}

pub fn parse_exit(_args: &str) -> Result<Command, ParseError> {
    Ok(Command::Exit)
}
