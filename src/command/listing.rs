// File: src/command/listing.rs
use crate::command::{CommandResult, Target};
use crate::error::{CommandError, MESSAGE_INVALID_LISTING_INDEX};
use crate::model::{Address, Listing, Name, NameFilter, Price, RecordDisplay};
use crate::store::RecordStore;

pub const ADD_LISTING_WORD: &str = "listing";
pub const EDIT_LISTING_WORD: &str = "editlisting";
pub const DELETE_LISTING_WORD: &str = "deletelisting";
pub const ADD_BUYERS_WORD: &str = "addbuyers";
pub const REMOVE_BUYERS_WORD: &str = "removebuyers";
pub const FIND_LISTING_WORD: &str = "findlisting";
pub const LIST_LISTINGS_WORD: &str = "listlistings";
pub const CLEAR_LISTINGS_WORD: &str = "clearlisting";

pub const ADD_LISTING_USAGE: &str = "listing: Adds a listing to the book. \
Parameters: LISTING_NAME [a/ADDRESS] [pr/PRICE] [buyer/BUYER_NAME]...\n\
Example: listing Pinewood Villa a/12 Pine Road pr/450000 buyer/Bernice Yu";
pub const EDIT_LISTING_USAGE: &str = "editlisting: Edits the listing identified by the index \
in the displayed listing list or by name. Existing values will be overwritten by the input values.\n\
Parameters: INDEX|LISTING_NAME [n/NAME] [a/ADDRESS] [pr/PRICE]\n\
Example: editlisting 1 pr/460000";
pub const DELETE_LISTING_USAGE: &str = "deletelisting: Deletes the listing identified by the \
index in the displayed listing list or by name.\n\
Parameters: INDEX|LISTING_NAME\n\
Example: deletelisting 1";
pub const ADD_BUYERS_USAGE: &str = "addbuyers: Adds buyers to the listing with the given name.\n\
Parameters: LISTING_NAME buyer/BUYER_NAME [buyer/BUYER_NAME]...\n\
Example: addbuyers Pinewood Villa buyer/Bernice Yu buyer/David Li";
pub const REMOVE_BUYERS_USAGE: &str = "removebuyers: Removes buyers from the listing with the \
given name.\n\
Parameters: LISTING_NAME buyer/BUYER_NAME [buyer/BUYER_NAME]...\n\
Example: removebuyers Pinewood Villa buyer/David Li";
pub const FIND_LISTING_USAGE: &str = "findlisting: Finds all listings whose names contain any of \
the specified keywords (case-insensitive, whole words) and displays them as a list.\n\
Parameters: KEYWORD [MORE_KEYWORDS]...\n\
Example: findlisting pinewood harbour";
pub const LIST_LISTINGS_USAGE: &str = "listlistings: Shows every listing in the book.";
pub const CLEAR_LISTINGS_USAGE: &str = "clearlisting: Deletes every listing from the book.";

pub const MESSAGE_DUPLICATE_LISTING: &str = "This listing already exists in the book";
pub const MESSAGE_LISTING_NOT_FOUND: &str = "No listing found with name";
pub const MESSAGE_UNKNOWN_BUYERS: &str = "The following buyers could not be found";
pub const MESSAGE_BUYERS_NOT_IN_LISTING: &str = "The following buyers are not in the listing";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditListingDescriptor {
    pub name: Option<Name>,
    pub address: Option<Address>,
    pub price: Option<Price>,
}

impl EditListingDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some() || self.address.is_some() || self.price.is_some()
    }

    /// Builds the replacement value. Buyers carry over untouched; use
    /// `addbuyers` / `removebuyers` to change them.
    pub fn apply(&self, original: &Listing) -> Listing {
        Listing::new(
            self.name.clone().unwrap_or_else(|| original.name.clone()),
            self.address.clone().or_else(|| original.address.clone()),
            self.price.clone().or_else(|| original.price.clone()),
        )
        .with_buyers(original.buyers().iter().cloned())
    }
}

pub fn resolve<'a>(store: &'a RecordStore, target: &Target) -> Result<&'a Listing, CommandError> {
    match target {
        Target::Index(index) => store
            .filtered_listings()
            .get(index.zero_based())
            .copied()
            .ok_or(CommandError::InvalidIndex(MESSAGE_INVALID_LISTING_INDEX)),
        Target::Name(name) => listing_named(store, name),
    }
}

fn listing_named<'a>(store: &'a RecordStore, name: &Name) -> Result<&'a Listing, CommandError> {
    store
        .listing_by_name(name)
        .ok_or_else(|| CommandError::invalid_name(MESSAGE_LISTING_NOT_FOUND, name.as_str()))
}

/// Names in `buyers` that are not buyers in the store, in the given order.
fn unresolved_buyers(store: &RecordStore, buyers: &[Name]) -> Vec<String> {
    buyers
        .iter()
        .filter(|b| store.buyer_by_name(b).is_none())
        .map(|b| b.to_string())
        .collect()
}

/// The stored spelling of each resolvable buyer name.
fn canonical_buyers(store: &RecordStore, buyers: &[Name]) -> Vec<Name> {
    buyers
        .iter()
        .filter_map(|b| store.buyer_by_name(b).map(|p| p.name.clone()))
        .collect()
}

pub fn add(store: &mut RecordStore, listing: &Listing) -> Result<CommandResult, CommandError> {
    if store.has_listing(listing) {
        return Err(CommandError::Duplicate(MESSAGE_DUPLICATE_LISTING));
    }
    let missing = unresolved_buyers(store, listing.buyers());
    if !missing.is_empty() {
        return Err(CommandError::InvalidName {
            context: MESSAGE_UNKNOWN_BUYERS,
            names: missing,
        });
    }

    let canonical = canonical_buyers(store, listing.buyers());
    let listing = Listing::new(
        listing.name.clone(),
        listing.address.clone(),
        listing.price.clone(),
    )
    .with_buyers(canonical);

    let feedback = format!("New listing added: {}", listing.to_display_string());
    store.add_listing(listing);
    store.update_listing_filter(None);
    Ok(CommandResult::mutation(feedback))
}

pub fn edit(
    store: &mut RecordStore,
    target: &Target,
    descriptor: &EditListingDescriptor,
) -> Result<CommandResult, CommandError> {
    let original = resolve(store, target)?.clone();
    let edited = descriptor.apply(&original);

    if !original.is_same_listing(&edited) && store.has_listing(&edited) {
        return Err(CommandError::Duplicate(MESSAGE_DUPLICATE_LISTING));
    }

    let feedback = format!("Edited Listing: {}", edited.to_display_string());
    store.set_listing(&original, edited);
    Ok(CommandResult::mutation(feedback))
}

pub fn delete(store: &mut RecordStore, target: &Target) -> Result<CommandResult, CommandError> {
    let victim = resolve(store, target)?.clone();
    store.remove_listing(&victim);
    Ok(CommandResult::mutation(format!(
        "Deleted Listing: {}",
        victim.to_display_string()
    )))
}

pub fn add_buyers(
    store: &mut RecordStore,
    listing_name: &Name,
    buyers: &[Name],
) -> Result<CommandResult, CommandError> {
    let original = listing_named(store, listing_name)?.clone();

    let missing = unresolved_buyers(store, buyers);
    if !missing.is_empty() {
        return Err(CommandError::InvalidName {
            context: MESSAGE_UNKNOWN_BUYERS,
            names: missing,
        });
    }

    let fresh = canonical_buyers(
        store,
        &buyers
            .iter()
            .filter(|b| !original.has_buyer(b))
            .cloned()
            .collect::<Vec<_>>(),
    );
    if fresh.is_empty() {
        return Ok(CommandResult::view(format!(
            "No new buyers added; all are already in listing: {}",
            original.to_display_string()
        )));
    }

    let updated = original.clone().with_buyers(fresh);
    let feedback = format!("Added buyers to listing: {}", updated.to_display_string());
    store.set_listing(&original, updated);
    Ok(CommandResult::mutation(feedback))
}

pub fn remove_buyers(
    store: &mut RecordStore,
    listing_name: &Name,
    buyers: &[Name],
) -> Result<CommandResult, CommandError> {
    let original = listing_named(store, listing_name)?.clone();

    let absent: Vec<String> = buyers
        .iter()
        .filter(|b| !original.has_buyer(b))
        .map(|b| b.to_string())
        .collect();
    if !absent.is_empty() {
        return Err(CommandError::InvalidName {
            context: MESSAGE_BUYERS_NOT_IN_LISTING,
            names: absent,
        });
    }

    let updated = original.clone().without_buyers(buyers);
    let feedback = format!("Removed buyers from listing: {}", updated.to_display_string());
    store.set_listing(&original, updated);
    Ok(CommandResult::mutation(feedback))
}

pub fn find(store: &mut RecordStore, filter: &NameFilter) -> CommandResult {
    store.update_listing_filter(Some(filter.clone()));
    let count = store.filtered_listings().len();
    CommandResult::view(format!("{} listings listed!", count))
}

pub fn list(store: &mut RecordStore) -> CommandResult {
    store.update_listing_filter(None);
    CommandResult::view("Listed all listings")
}

pub fn clear(store: &mut RecordStore) -> CommandResult {
    store.clear_listings();
    CommandResult::mutation("Listings have been cleared!")
}
