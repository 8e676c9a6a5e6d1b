// File: ./src/model/person.rs
use crate::model::fields::{
    AppointmentDate, AppointmentTime, Email, Name, Phone, Property, Tag,
};
use std::collections::BTreeSet;
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

pub const APPOINTMENT_CONSTRAINTS: &str = "Appointment end time must not be before its start time";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Role {
    Buyer,
    Seller,
}

impl Role {
    /// Lowercase keyword used by the command words and the data files.
    pub fn keyword(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        let s = s.trim();
        Role::iter().find(|role| role.keyword().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Buyer => write!(f, "Buyer"),
            Role::Seller => write!(f, "Seller"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Appointment {
    pub date: AppointmentDate,
    pub from: AppointmentTime,
    pub to: AppointmentTime,
}

impl Appointment {
    /// Builds an appointment, rejecting a range that ends before it starts.
    pub fn new(
        date: AppointmentDate,
        from: AppointmentTime,
        to: AppointmentTime,
    ) -> Result<Self, crate::error::InvalidFieldError> {
        if to < from {
            return Err(crate::error::InvalidFieldError::new(
                "appointment",
                APPOINTMENT_CONSTRAINTS,
            ));
        }
        Ok(Self { date, from, to })
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.date, self.from, self.to)
    }
}

/// A contact. Immutable once built: edits produce a new `Person` that
/// replaces the old one in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub role: Role,
    pub name: Name,
    pub phone: Phone,
    pub email: Email,
    pub tags: BTreeSet<Tag>,
    pub appointment: Option<Appointment>,
    pub property: Option<Property>,
}

impl Person {
    pub fn new(role: Role, name: Name, phone: Phone, email: Email, tags: BTreeSet<Tag>) -> Self {
        Self {
            role,
            name,
            phone,
            email,
            tags,
            appointment: None,
            property: None,
        }
    }

    pub fn with_appointment(mut self, appointment: Option<Appointment>) -> Self {
        self.appointment = appointment;
        self
    }

    pub fn with_property(mut self, property: Option<Property>) -> Self {
        self.property = property;
        self
    }

    pub fn is_buyer(&self) -> bool {
        self.role == Role::Buyer
    }

    /// Whether this contact owns a listing. Buyers never do; seller
    /// ownership is not tracked, so sellers report none either.
    pub fn has_listing(&self) -> bool {
        match self.role {
            Role::Buyer | Role::Seller => false,
        }
    }

    /// Identity check used for duplicate detection: two persons are the same
    /// contact when their names match.
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name == other.name
    }
}
