// File: ./src/storage.rs
// Persists persons and listings as versioned JSON files.
//
// Every stored value goes back through the same field parsers the command
// parsers use, so a hand-edited file cannot smuggle in data a command
// could not have produced.
use crate::context::AppContext;
use crate::error::{CorruptDataError, InvalidFieldError};
use crate::model::{
    Address, Appointment, AppointmentDate, AppointmentTime, Email, Listing, Name, Person, Phone,
    Price, Property, Role, Tag,
};
use crate::store::RecordStore;
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

// Bump when the JSON layout of either file changes.
pub const STORAGE_VERSION: u32 = 1;

const PERSON: &str = "Person";
const LISTING: &str = "Listing";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JsonPerson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JsonListing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default)]
    pub buyers: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct PersonsFile {
    #[serde(default)]
    version: u32,
    persons: Vec<JsonPerson>,
}

#[derive(Serialize, Deserialize)]
struct ListingsFile {
    #[serde(default)]
    version: u32,
    listings: Vec<JsonListing>,
}

fn required<'a>(
    value: &'a Option<String>,
    entity: &'static str,
    field: &'static str,
) -> Result<&'a str, CorruptDataError> {
    value
        .as_deref()
        .ok_or(CorruptDataError::MissingField { entity, field })
}

fn valid<T>(
    raw: &str,
    parse: fn(&str) -> Result<T, InvalidFieldError>,
    entity: &'static str,
) -> Result<T, CorruptDataError> {
    parse(raw).map_err(|source| CorruptDataError::InvalidField { entity, source })
}

fn valid_optional<T>(
    raw: &Option<String>,
    parse: fn(&str) -> Result<T, InvalidFieldError>,
    entity: &'static str,
) -> Result<Option<T>, CorruptDataError> {
    raw.as_deref().map(|r| valid(r, parse, entity)).transpose()
}

impl JsonPerson {
    pub fn from_model(person: &Person) -> Self {
        Self {
            name: Some(person.name.as_str().to_string()),
            role: Some(person.role.keyword().to_string()),
            phone: Some(person.phone.as_str().to_string()),
            email: Some(person.email.as_str().to_string()),
            tags: person.tags.iter().map(|t| t.as_str().to_string()).collect(),
            date: person.appointment.map(|a| a.date.to_string()),
            from: person.appointment.map(|a| a.from.to_string()),
            to: person.appointment.map(|a| a.to.to_string()),
            property: person.property.as_ref().map(|p| p.as_str().to_string()),
        }
    }

    pub fn to_model(&self) -> Result<Person, CorruptDataError> {
        let name = valid(required(&self.name, PERSON, "name")?, Name::parse, PERSON)?;
        let role_raw = required(&self.role, PERSON, "role")?;
        let role = Role::from_keyword(role_raw)
            .ok_or_else(|| CorruptDataError::UnknownRole(role_raw.to_string()))?;
        let phone = valid(required(&self.phone, PERSON, "phone")?, Phone::parse, PERSON)?;
        let email = valid(required(&self.email, PERSON, "email")?, Email::parse, PERSON)?;
        let tags = self
            .tags
            .iter()
            .map(|t| valid(t, Tag::parse, PERSON))
            .collect::<Result<BTreeSet<_>, _>>()?;

        let appointment = match (&self.date, &self.from, &self.to) {
            (None, None, None) => None,
            (Some(date), Some(from), Some(to)) => Some(
                Appointment::new(
                    valid(date, AppointmentDate::parse, PERSON)?,
                    valid(from, AppointmentTime::parse, PERSON)?,
                    valid(to, AppointmentTime::parse, PERSON)?,
                )
                .map_err(|source| CorruptDataError::InvalidField {
                    entity: PERSON,
                    source,
                })?,
            ),
            _ => return Err(CorruptDataError::PartialAppointment),
        };
        let property = valid_optional(&self.property, Property::parse, PERSON)?;

        Ok(Person::new(role, name, phone, email, tags)
            .with_appointment(appointment)
            .with_property(property))
    }
}

impl JsonListing {
    pub fn from_model(listing: &Listing) -> Self {
        Self {
            name: Some(listing.name.as_str().to_string()),
            address: listing.address.as_ref().map(|a| a.as_str().to_string()),
            price: listing.price.as_ref().map(|p| p.as_str().to_string()),
            buyers: listing
                .buyers()
                .iter()
                .map(|b| b.as_str().to_string())
                .collect(),
        }
    }

    pub fn to_model(&self) -> Result<Listing, CorruptDataError> {
        let name = valid(required(&self.name, LISTING, "name")?, Name::parse, LISTING)?;
        let buyers = self
            .buyers
            .iter()
            .map(|b| valid(b, Name::parse, LISTING))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Listing::new(
            name,
            valid_optional(&self.address, Address::parse, LISTING)?,
            valid_optional(&self.price, Price::parse, LISTING)?,
        )
        .with_buyers(buyers))
    }
}

pub fn encode_persons(persons: &[Person]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&PersonsFile {
        version: STORAGE_VERSION,
        persons: persons.iter().map(JsonPerson::from_model).collect(),
    })
}

pub fn encode_listings(listings: &[Listing]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ListingsFile {
        version: STORAGE_VERSION,
        listings: listings.iter().map(JsonListing::from_model).collect(),
    })
}

fn check_version(version: u32) -> Result<(), CorruptDataError> {
    if version != STORAGE_VERSION {
        return Err(CorruptDataError::UnsupportedVersion(version));
    }
    Ok(())
}

/// Decodes a persons file. Two entries with the same name make the whole
/// file corrupt.
pub fn decode_persons(json: &str) -> Result<Vec<Person>, CorruptDataError> {
    let file: PersonsFile = serde_json::from_str(json)?;
    check_version(file.version)?;

    let mut persons: Vec<Person> = Vec::with_capacity(file.persons.len());
    for entry in &file.persons {
        let person = entry.to_model()?;
        if persons.iter().any(|p| p.is_same_person(&person)) {
            return Err(CorruptDataError::Duplicate {
                entity: PERSON,
                name: person.name.to_string(),
            });
        }
        persons.push(person);
    }
    Ok(persons)
}

/// Decodes a listings file against already loaded persons. Stored buyer
/// spellings are replaced by the person's. A name that no longer belongs to a
/// buyer is dropped from that listing only.
pub fn decode_listings(json: &str, persons: &[Person]) -> Result<Vec<Listing>, CorruptDataError> {
    let file: ListingsFile = serde_json::from_str(json)?;
    check_version(file.version)?;

    let mut seen: HashSet<Name> = HashSet::new();
    let mut listings = Vec::with_capacity(file.listings.len());
    for entry in &file.listings {
        let listing = entry.to_model()?;
        if !seen.insert(listing.name.clone()) {
            return Err(CorruptDataError::Duplicate {
                entity: LISTING,
                name: listing.name.to_string(),
            });
        }

        let mut canonical = Vec::with_capacity(listing.buyers().len());
        for buyer in listing.buyers() {
            match persons.iter().find(|p| p.is_buyer() && p.name == *buyer) {
                Some(person) => canonical.push(person.name.clone()),
                None => log::warn!(
                    "Listing '{}' references unknown buyer '{}', dropping it",
                    listing.name,
                    buyer
                ),
            }
        }
        let all = listing.buyers().to_vec();
        listings.push(listing.without_buyers(&all).with_buyers(canonical));
    }
    Ok(listings)
}

pub struct LocalStorage;

impl LocalStorage {
    /// Sidecar lock file next to `file_path`, e.g. `persons.json.lock`.
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive advisory lock for `file_path`.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// `Ok(None)` when the file does not exist yet.
    fn read_if_exists(path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::with_lock(path, || {
            fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("Failed to read {:?}", path))
        })
    }

    /// Writes `contents` next to `path` and returns the `.tmp` path.
    fn stage(path: &Path, contents: &str) -> Result<PathBuf> {
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)
            .with_context(|| format!("Failed to write {:?}", tmp_path))?;
        Ok(tmp_path)
    }

    /// Loads the persons file. `Ok(None)` means there is no file yet; a file
    /// that fails validation yields an error wrapping `CorruptDataError`.
    pub fn load_persons(ctx: &dyn AppContext) -> Result<Option<Vec<Person>>> {
        let path = ctx.get_persons_path()?;
        let Some(json) = Self::read_if_exists(&path)? else {
            return Ok(None);
        };
        let persons = decode_persons(&json)
            .with_context(|| format!("Invalid data in {:?}", path))?;
        log::info!("Loaded {} persons from {:?}", persons.len(), path);
        Ok(Some(persons))
    }

    /// Loads the listings file, resolving buyers against `persons`. A
    /// missing file is an empty list.
    pub fn load_listings(ctx: &dyn AppContext, persons: &[Person]) -> Result<Vec<Listing>> {
        let path = ctx.get_listings_path()?;
        let Some(json) = Self::read_if_exists(&path)? else {
            return Ok(Vec::new());
        };
        let listings = decode_listings(&json, persons)
            .with_context(|| format!("Invalid data in {:?}", path))?;
        log::info!("Loaded {} listings from {:?}", listings.len(), path);
        Ok(listings)
    }

    /// Writes both files. Both `.tmp` files are staged under both locks
    /// before either is renamed, so a failure while staging leaves the old
    /// pair in place.
    pub fn save(ctx: &dyn AppContext, store: &RecordStore) -> Result<()> {
        let persons_path = ctx.get_persons_path()?;
        let listings_path = ctx.get_listings_path()?;
        let persons_json = encode_persons(store.persons())?;
        let listings_json = encode_listings(store.listings())?;

        Self::with_lock(&persons_path, || {
            Self::with_lock(&listings_path, || {
                let persons_tmp = Self::stage(&persons_path, &persons_json)?;
                let listings_tmp = match Self::stage(&listings_path, &listings_json) {
                    Ok(tmp) => tmp,
                    Err(e) => {
                        let _ = fs::remove_file(&persons_tmp);
                        return Err(e);
                    }
                };
                fs::rename(&persons_tmp, &persons_path)
                    .with_context(|| format!("Failed to replace {:?}", persons_path))?;
                fs::rename(&listings_tmp, &listings_path)
                    .with_context(|| format!("Failed to replace {:?}", listings_path))?;
                Ok(())
            })
        })?;
        log::debug!(
            "Saved {} persons and {} listings",
            store.persons().len(),
            store.listings().len()
        );
        Ok(())
    }

    /// True when `err` came from data validation rather than I/O.
    pub fn is_corrupt_data_error(err: &anyhow::Error) -> bool {
        err.chain().any(|cause| cause.is::<CorruptDataError>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use std::sync::Arc;
    use std::thread;

    fn buyer(name: &str) -> Person {
        Person::new(
            Role::Buyer,
            Name::parse(name).unwrap(),
            Phone::parse("91234567").unwrap(),
            Email::parse("b@example.com").unwrap(),
            BTreeSet::new(),
        )
    }

    #[test]
    fn test_person_entry_keeps_every_field() {
        let person = buyer("Bernice Yu")
            .with_appointment(Some(
                Appointment::new(
                    AppointmentDate::parse("2025-03-01").unwrap(),
                    AppointmentTime::parse("09:00").unwrap(),
                    AppointmentTime::parse("10:30").unwrap(),
                )
                .unwrap(),
            ))
            .with_property(Some(Property::parse("4 Room HDB").unwrap()));
        let entry = JsonPerson::from_model(&person);
        assert_eq!(entry.date.as_deref(), Some("2025-03-01"));
        assert_eq!(entry.to.as_deref(), Some("10:30"));
        assert_eq!(entry.to_model().unwrap(), person);
    }

    #[test]
    fn test_missing_name_is_reported() {
        let entry = JsonPerson {
            role: Some("buyer".into()),
            phone: Some("123".into()),
            email: Some("a@b.co".into()),
            ..Default::default()
        };
        assert!(matches!(
            entry.to_model(),
            Err(CorruptDataError::MissingField { field: "name", .. })
        ));
    }

    #[test]
    fn test_unknown_role_and_partial_appointment() {
        let mut entry = JsonPerson::from_model(&buyer("Bob"));
        entry.role = Some("landlord".into());
        assert!(matches!(entry.to_model(), Err(CorruptDataError::UnknownRole(r)) if r == "landlord"));

        let mut entry = JsonPerson::from_model(&buyer("Bob"));
        entry.date = Some("2025-03-01".into());
        assert!(matches!(entry.to_model(), Err(CorruptDataError::PartialAppointment)));
    }

    #[test]
    fn test_duplicate_persons_rejected() {
        let json = encode_persons(&[buyer("Bob"), buyer("Alice")])
            .unwrap()
            .replace("Alice", "bob");
        assert!(matches!(
            decode_persons(&json),
            Err(CorruptDataError::Duplicate { entity: "Person", .. })
        ));
    }

    #[test]
    fn test_listing_buyers_must_resolve() {
        let persons = vec![buyer("Bernice Yu")];
        let listing = Listing::new(Name::parse("Villa").unwrap(), None, None)
            .with_buyers([Name::parse("bernice yu").unwrap()]);
        let json = encode_listings(&[listing]).unwrap();

        let loaded = decode_listings(&json, &persons).unwrap();
        assert_eq!(loaded[0].buyers()[0].as_str(), "Bernice Yu");

        let orphaned = decode_listings(&json, &[]).unwrap();
        assert_eq!(orphaned.len(), 1);
        assert!(orphaned[0].buyers().is_empty());
    }

    #[test]
    fn test_unsupported_version() {
        let json = r#"{ "version": 7, "persons": [] }"#;
        assert!(matches!(
            decode_persons(json),
            Err(CorruptDataError::UnsupportedVersion(7))
        ));
        assert!(matches!(decode_persons("not json"), Err(CorruptDataError::Json(_))));
    }

    #[test]
    fn test_save_and_load_through_context() {
        let ctx = TestContext::new();
        assert!(LocalStorage::load_persons(&ctx).unwrap().is_none());

        let mut store = RecordStore::new();
        store.add_person(buyer("Bernice Yu"));
        store.add_listing(
            Listing::new(Name::parse("Villa").unwrap(), None, Some(Price::parse("450000").unwrap()))
                .with_buyers([Name::parse("Bernice Yu").unwrap()]),
        );
        LocalStorage::save(&ctx, &store).unwrap();

        let persons = LocalStorage::load_persons(&ctx).unwrap().unwrap();
        let listings = LocalStorage::load_listings(&ctx, &persons).unwrap();
        assert_eq!(persons, store.persons());
        assert_eq!(listings, store.listings());
    }

    #[test]
    fn test_corrupt_file_is_flagged() {
        let ctx = TestContext::new();
        fs::write(ctx.get_persons_path().unwrap(), "{ broken").unwrap();
        let err = LocalStorage::load_persons(&ctx).unwrap_err();
        assert!(LocalStorage::is_corrupt_data_error(&err));
    }

    #[test]
    fn test_locking_concurrency() {
        let ctx = TestContext::new();
        let file_path = ctx.get_data_dir().unwrap().join("lock_test.txt");
        fs::write(&file_path, "0").unwrap();
        let path_ref = Arc::new(file_path.clone());

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let p = path_ref.clone();
                thread::spawn(move || {
                    LocalStorage::with_lock(&p, || {
                        let num: i32 = fs::read_to_string(&*p)?.parse()?;
                        std::thread::sleep(std::time::Duration::from_millis(10));
                        fs::write(&*p, (num + 1).to_string())?;
                        Ok(())
                    })
                    .unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "10");
    }
}
