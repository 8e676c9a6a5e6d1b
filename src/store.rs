// File: src/store.rs
//! In-memory record store.
//!
//! Holds every person and listing in insertion order plus the filter that
//! defines each visible view. Index-based commands always resolve against
//! the filtered view, never against the full collections.
use crate::model::{Listing, Name, NameFilter, Person};

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    persons: Vec<Person>,
    listings: Vec<Listing>,
    person_filter: Option<NameFilter>,
    listing_filter: Option<NameFilter>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already validated collections, e.g. freshly
    /// loaded data files. Both views start unfiltered.
    pub fn with_records(persons: Vec<Person>, listings: Vec<Listing>) -> Self {
        Self {
            persons,
            listings,
            person_filter: None,
            listing_filter: None,
        }
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    // --- Persons ---

    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.iter().any(|p| p.is_same_person(person))
    }

    pub fn person_by_name(&self, name: &Name) -> Option<&Person> {
        self.persons.iter().find(|p| p.name == *name)
    }

    pub fn buyer_by_name(&self, name: &Name) -> Option<&Person> {
        self.person_by_name(name).filter(|p| p.is_buyer())
    }

    /// Appends a person. Callers check `has_person` first.
    pub fn add_person(&mut self, person: Person) {
        debug_assert!(!self.has_person(&person), "duplicate person {}", person.name);
        self.persons.push(person);
    }

    /// Removes the person with the same identity as `target`. A removed
    /// buyer disappears from every listing's buyer set as well.
    pub fn remove_person(&mut self, target: &Person) -> Option<Person> {
        let idx = self.persons.iter().position(|p| p.is_same_person(target))?;
        let removed = self.persons.remove(idx);
        if removed.is_buyer() {
            self.drop_buyer_references(&removed.name);
        }
        Some(removed)
    }

    /// Replaces `target` with `edited` in place, keeping its position.
    /// Listing references follow a renamed buyer.
    pub fn set_person(&mut self, target: &Person, edited: Person) -> bool {
        let Some(idx) = self.persons.iter().position(|p| p.is_same_person(target)) else {
            return false;
        };
        let old = std::mem::replace(&mut self.persons[idx], edited);
        let new = &self.persons[idx];

        if old.is_buyer() && !new.is_buyer() {
            let name = old.name.clone();
            self.drop_buyer_references(&name);
        } else if old.is_buyer() && old.name.as_str() != new.name.as_str() {
            let new_name = new.name.clone();
            self.listings = std::mem::take(&mut self.listings)
                .into_iter()
                .map(|l| l.with_buyer_renamed(&old.name, &new_name))
                .collect();
        }
        true
    }

    /// Empties the person collection and with it every buyer reference.
    pub fn clear_persons(&mut self) {
        self.persons.clear();
        self.person_filter = None;
        self.listings = std::mem::take(&mut self.listings)
            .into_iter()
            .map(|l| {
                let all: Vec<Name> = l.buyers().to_vec();
                l.without_buyers(&all)
            })
            .collect();
    }

    fn drop_buyer_references(&mut self, name: &Name) {
        let target = [name.clone()];
        self.listings = std::mem::take(&mut self.listings)
            .into_iter()
            .map(|l| l.without_buyers(&target))
            .collect();
    }

    pub fn filtered_persons(&self) -> Vec<&Person> {
        match &self.person_filter {
            Some(filter) => self
                .persons
                .iter()
                .filter(|p| filter.matches(&p.name))
                .collect(),
            None => self.persons.iter().collect(),
        }
    }

    /// Changes which persons are visible. `None` shows everyone.
    pub fn update_person_filter(&mut self, filter: Option<NameFilter>) {
        self.person_filter = filter;
    }

    pub fn person_filter(&self) -> Option<&NameFilter> {
        self.person_filter.as_ref()
    }

    // --- Listings ---

    pub fn has_listing(&self, listing: &Listing) -> bool {
        self.listings.iter().any(|l| l.is_same_listing(listing))
    }

    pub fn listing_by_name(&self, name: &Name) -> Option<&Listing> {
        self.listings.iter().find(|l| l.name == *name)
    }

    /// Appends a listing. Callers check `has_listing` and resolve its buyers first.
    pub fn add_listing(&mut self, listing: Listing) {
        debug_assert!(!self.has_listing(&listing), "duplicate listing {}", listing.name);
        self.listings.push(listing);
    }

    pub fn remove_listing(&mut self, target: &Listing) -> Option<Listing> {
        let idx = self.listings.iter().position(|l| l.is_same_listing(target))?;
        Some(self.listings.remove(idx))
    }

    pub fn set_listing(&mut self, target: &Listing, edited: Listing) -> bool {
        match self.listings.iter().position(|l| l.is_same_listing(target)) {
            Some(idx) => {
                self.listings[idx] = edited;
                true
            }
            None => false,
        }
    }

    pub fn clear_listings(&mut self) {
        self.listings.clear();
        self.listing_filter = None;
    }

    pub fn filtered_listings(&self) -> Vec<&Listing> {
        match &self.listing_filter {
            Some(filter) => self
                .listings
                .iter()
                .filter(|l| filter.matches(&l.name))
                .collect(),
            None => self.listings.iter().collect(),
        }
    }

    pub fn update_listing_filter(&mut self, filter: Option<NameFilter>) {
        self.listing_filter = filter;
    }

    pub fn listing_filter(&self) -> Option<&NameFilter> {
        self.listing_filter.as_ref()
    }
}
