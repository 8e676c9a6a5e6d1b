// File: ./src/model/fields.rs
//! Validated field values.
//!
//! Every value that enters the model passes through one of these `parse`
//! functions, whether it comes from a typed command or from the data files.
use crate::error::InvalidFieldError;
use chrono::{NaiveDate, NaiveTime};
use std::fmt;
use std::hash::{Hash, Hasher};

pub const NAME_CONSTRAINTS: &str =
    "Names should only contain alphanumeric characters and spaces, and it should not be blank";
pub const PHONE_CONSTRAINTS: &str =
    "Phone numbers should only contain numbers, and it should be at least 3 digits long";
pub const EMAIL_CONSTRAINTS: &str = "Emails should be of the format local-part@domain. \
The local-part should only contain alphanumeric characters and these special characters: +_.- \
and may not start or end with a special character. The domain is made of labels separated by \
periods; each label starts and ends with an alphanumeric character, may contain hyphens, and \
the last label is at least 2 characters long";
pub const TAG_CONSTRAINTS: &str = "Tag names should be alphanumeric";
pub const DATE_CONSTRAINTS: &str = "Dates should be valid calendar dates in the format YYYY-MM-DD";
pub const TIME_CONSTRAINTS: &str = "Times should be in 24-hour HH:MM format";
pub const PROPERTY_CONSTRAINTS: &str = "Property should not be blank";
pub const ADDRESS_CONSTRAINTS: &str = "Addresses can take any values, and it should not be blank";
pub const PRICE_CONSTRAINTS: &str =
    "Price should only contain digits and must not have leading zeros";

const EMAIL_SPECIAL: &[char] = &['+', '_', '.', '-'];

// --- NAME ---

/// Person or listing name. Compared without regard to ASCII case, so
/// "alex yeoh" and "Alex Yeoh" are the same identity.
#[derive(Debug, Clone)]
pub struct Name(String);

impl Name {
    pub fn parse(raw: &str) -> Result<Self, InvalidFieldError> {
        let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let valid = normalized
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric())
            && normalized
                .chars()
                .all(|c| c.is_alphanumeric() || c == ' ');
        if !valid {
            return Err(InvalidFieldError::new("name", NAME_CONSTRAINTS));
        }
        Ok(Name(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The individual words of the name, used by keyword search.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ')
    }

    fn key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- PHONE ---

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn parse(raw: &str) -> Result<Self, InvalidFieldError> {
        let trimmed = raw.trim();
        if trimmed.len() < 3 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidFieldError::new("phone", PHONE_CONSTRAINTS));
        }
        Ok(Phone(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- EMAIL ---

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, InvalidFieldError> {
        let trimmed = raw.trim();
        if !is_valid_email(trimmed) {
            return Err(InvalidFieldError::new("email", EMAIL_CONSTRAINTS));
        }
        Ok(Email(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || EMAIL_SPECIAL.contains(&c))
        && !local.starts_with(EMAIL_SPECIAL)
        && !local.ends_with(EMAIL_SPECIAL);
    if !local_ok {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    });

    // Last label is the TLD-ish part
    labels_ok && labels.last().is_some_and(|last| last.len() >= 2)
}

// --- TAG ---

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    pub fn parse(raw: &str) -> Result<Self, InvalidFieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_alphanumeric()) {
            return Err(InvalidFieldError::new("tag", TAG_CONSTRAINTS));
        }
        Ok(Tag(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

// --- APPOINTMENT PARTS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppointmentDate(NaiveDate);

impl AppointmentDate {
    pub fn parse(raw: &str) -> Result<Self, InvalidFieldError> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(AppointmentDate)
            .map_err(|_| InvalidFieldError::new("date", DATE_CONSTRAINTS))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for AppointmentDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppointmentTime(NaiveTime);

impl AppointmentTime {
    pub fn parse(raw: &str) -> Result<Self, InvalidFieldError> {
        let trimmed = raw.trim();
        // chrono accepts "9:05"; insist on the zero-padded form we write back out.
        if trimmed.len() != 5 {
            return Err(InvalidFieldError::new("time", TIME_CONSTRAINTS));
        }
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map(AppointmentTime)
            .map_err(|_| InvalidFieldError::new("time", TIME_CONSTRAINTS))
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for AppointmentTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

// --- FREE TEXT ---

/// The address of a person's own property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property(String);

impl Property {
    pub fn parse(raw: &str) -> Result<Self, InvalidFieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidFieldError::new("property", PROPERTY_CONSTRAINTS));
        }
        Ok(Property(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> Result<Self, InvalidFieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidFieldError::new("address", ADDRESS_CONSTRAINTS));
        }
        Ok(Address(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Price(String);

impl Price {
    pub fn parse(raw: &str) -> Result<Self, InvalidFieldError> {
        let trimmed = raw.trim();
        let digits_only = !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit());
        let leading_zero = trimmed.len() > 1 && trimmed.starts_with('0');
        if !digits_only || leading_zero {
            return Err(InvalidFieldError::new("price", PRICE_CONSTRAINTS));
        }
        Ok(Price(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}
