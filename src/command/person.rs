// File: src/command/person.rs
use crate::command::{CommandResult, Target};
use crate::error::{CommandError, MESSAGE_INVALID_PERSON_INDEX};
use crate::model::{
    Appointment, Email, Name, NameFilter, Person, Phone, Property, RecordDisplay, Tag,
};
use crate::store::RecordStore;
use std::collections::BTreeSet;

pub const ADD_BUYER_WORD: &str = "buyer";
pub const ADD_SELLER_WORD: &str = "seller";
pub const EDIT_WORD: &str = "edit";
pub const DELETE_WORD: &str = "delete";
pub const DELETE_APPOINTMENT_WORD: &str = "deleteappt";
pub const FIND_WORD: &str = "find";
pub const LIST_WORD: &str = "list";
pub const CLEAR_WORD: &str = "clear";

pub const ADD_BUYER_USAGE: &str = "buyer: Adds a buyer to the book. \
Parameters: n/NAME p/PHONE e/EMAIL [t/TAG]...\n\
Example: buyer n/John Doe p/98765432 e/johnd@example.com t/firsthome";
pub const ADD_SELLER_USAGE: &str = "seller: Adds a seller to the book. \
Parameters: n/NAME p/PHONE e/EMAIL [t/TAG]...\n\
Example: seller n/John Doe p/98765432 e/johnd@example.com";
pub const EDIT_USAGE: &str = "edit: Edits the details of the person identified by the index \
in the displayed person list or by name. Existing values will be overwritten by the input values.\n\
Parameters: INDEX|NAME [n/NAME] [p/PHONE] [e/EMAIL] [t/TAG]... [d/DATE from/HH:MM to/HH:MM] [prop/PROPERTY]\n\
Example: edit 1 p/91234567 e/johndoe@example.com";
pub const DELETE_USAGE: &str = "delete: Deletes the person identified by the index in the \
displayed person list or by name.\n\
Parameters: INDEX|NAME\n\
Example: delete 1";
pub const DELETE_APPOINTMENT_USAGE: &str = "deleteappt: Deletes the appointment of the person \
identified by the index in the displayed person list or by name.\n\
Parameters: INDEX|NAME\n\
Example: deleteappt 1";
pub const FIND_USAGE: &str = "find: Finds all persons whose names contain any of the specified \
keywords (case-insensitive, whole words) and displays them as a list.\n\
Parameters: KEYWORD [MORE_KEYWORDS]...\n\
Example: find alice bob charlie";
pub const LIST_USAGE: &str = "list: Shows every person in the book.";
pub const CLEAR_USAGE: &str = "clear: Deletes every person from the book.";

pub const MESSAGE_DUPLICATE_PERSON: &str = "This person already exists in the book";
pub const MESSAGE_PERSON_NOT_FOUND: &str = "No person found with name";

/// Fields to overwrite on an existing person. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPersonDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub tags: Option<BTreeSet<Tag>>,
    pub appointment: Option<Appointment>,
    pub property: Option<Property>,
}

impl EditPersonDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.tags.is_some()
            || self.appointment.is_some()
            || self.property.is_some()
    }

    /// Builds the replacement value; the role never changes through an edit.
    pub fn apply(&self, original: &Person) -> Person {
        Person {
            role: original.role,
            name: self.name.clone().unwrap_or_else(|| original.name.clone()),
            phone: self.phone.clone().unwrap_or_else(|| original.phone.clone()),
            email: self.email.clone().unwrap_or_else(|| original.email.clone()),
            tags: self.tags.clone().unwrap_or_else(|| original.tags.clone()),
            appointment: self.appointment.or(original.appointment),
            property: self.property.clone().or_else(|| original.property.clone()),
        }
    }
}

/// Finds the person a command refers to: by position in the visible list,
/// or by name anywhere in the store.
pub fn resolve<'a>(store: &'a RecordStore, target: &Target) -> Result<&'a Person, CommandError> {
    match target {
        Target::Index(index) => store
            .filtered_persons()
            .get(index.zero_based())
            .copied()
            .ok_or(CommandError::InvalidIndex(MESSAGE_INVALID_PERSON_INDEX)),
        Target::Name(name) => store
            .person_by_name(name)
            .ok_or_else(|| CommandError::invalid_name(MESSAGE_PERSON_NOT_FOUND, name.as_str())),
    }
}

pub fn add(store: &mut RecordStore, person: &Person) -> Result<CommandResult, CommandError> {
    if store.has_person(person) {
        return Err(CommandError::Duplicate(MESSAGE_DUPLICATE_PERSON));
    }
    store.add_person(person.clone());
    store.update_person_filter(None);

    Ok(CommandResult::mutation(format!(
        "New {} added: {}",
        person.role.keyword(),
        person.to_display_string()
    )))
}

pub fn edit(
    store: &mut RecordStore,
    target: &Target,
    descriptor: &EditPersonDescriptor,
) -> Result<CommandResult, CommandError> {
    let original = resolve(store, target)?.clone();
    let edited = descriptor.apply(&original);

    if !original.is_same_person(&edited) && store.has_person(&edited) {
        return Err(CommandError::Duplicate(MESSAGE_DUPLICATE_PERSON));
    }

    let feedback = format!("Edited Person: {}", edited.to_display_string());
    store.set_person(&original, edited);
    Ok(CommandResult::mutation(feedback))
}

pub fn delete(store: &mut RecordStore, target: &Target) -> Result<CommandResult, CommandError> {
    let victim = resolve(store, target)?.clone();
    store.remove_person(&victim);
    Ok(CommandResult::mutation(format!(
        "Deleted Person: {}",
        victim.to_display_string()
    )))
}

pub fn delete_appointment(
    store: &mut RecordStore,
    target: &Target,
) -> Result<CommandResult, CommandError> {
    let original = resolve(store, target)?.clone();
    let cleared = original.clone().with_appointment(None);
    store.set_person(&original, cleared);
    Ok(CommandResult::mutation(format!(
        "Deleted appointment of {}",
        original.name
    )))
}

pub fn find(store: &mut RecordStore, filter: &NameFilter) -> CommandResult {
    store.update_person_filter(Some(filter.clone()));
    let count = store.filtered_persons().len();
    CommandResult::view(format!("{} persons listed!", count))
}

pub fn list(store: &mut RecordStore) -> CommandResult {
    store.update_person_filter(None);
    CommandResult::view("Listed all persons")
}

pub fn clear(store: &mut RecordStore) -> CommandResult {
    store.clear_persons();
    CommandResult::mutation("Contact book has been cleared!")
}
