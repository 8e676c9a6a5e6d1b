// File: ./src/model/sample.rs
//! Contacts used to populate the book on first start.
use crate::model::fields::{Email, Name, Phone, Tag};
use crate::model::person::{Person, Role};
use std::collections::BTreeSet;

const SAMPLE_PERSONS: &[(Role, &str, &str, &str, &[&str])] = &[
    (Role::Seller, "Alex Yeoh", "87438807", "alexyeoh@example.com", &["friends"]),
    (Role::Buyer, "Bernice Yu", "99272758", "berniceyu@example.com", &["colleagues", "friends"]),
    (Role::Seller, "Charlotte Oliveiro", "93210283", "charlotte@example.com", &["neighbours"]),
    (Role::Buyer, "David Li", "91031282", "lidavid@example.com", &["family"]),
    (Role::Seller, "Irfan Ibrahim", "92492021", "irfan@example.com", &["classmates"]),
    (Role::Buyer, "Roy Balakrishnan", "92624417", "royb@example.com", &["colleagues"]),
];

/// Returns the sample contacts. The table above is static and known-valid,
/// so any rejected row is skipped with a warning rather than aborting.
pub fn sample_persons() -> Vec<Person> {
    SAMPLE_PERSONS
        .iter()
        .filter_map(|(role, name, phone, email, tags)| {
            let built = (|| {
                let tags = tag_set(tags)?;
                Ok::<_, crate::error::InvalidFieldError>(Person::new(
                    *role,
                    Name::parse(name)?,
                    Phone::parse(phone)?,
                    Email::parse(email)?,
                    tags,
                ))
            })();
            match built {
                Ok(p) => Some(p),
                Err(e) => {
                    log::warn!("Skipping sample contact '{}': {}", name, e);
                    None
                }
            }
        })
        .collect()
}

pub fn tag_set(tags: &[&str]) -> Result<BTreeSet<Tag>, crate::error::InvalidFieldError> {
    tags.iter().map(|t| Tag::parse(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_all_valid() {
        let persons = sample_persons();
        assert_eq!(persons.len(), SAMPLE_PERSONS.len());
        assert_eq!(persons.iter().filter(|p| p.is_buyer()).count(), 3);
        assert!(persons.iter().all(|p| p.appointment.is_none() && p.property.is_none()));
    }
}
