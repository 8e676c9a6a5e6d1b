// File: tests/person_commands.rs
use realtybook::command::CommandResult;
use realtybook::command::person::MESSAGE_DUPLICATE_PERSON;
use realtybook::error::{CommandError, ExecuteError, MESSAGE_INVALID_PERSON_INDEX};
use realtybook::model::{Name, RecordDisplay, Role};
use realtybook::parser::CommandRegistry;
use realtybook::store::RecordStore;

fn run(store: &mut RecordStore, line: &str) -> Result<CommandResult, ExecuteError> {
    let command = CommandRegistry::new().parse(line)?;
    Ok(command.execute(store)?)
}

fn alex_and_bernice() -> RecordStore {
    let mut store = RecordStore::new();
    run(&mut store, "seller n/Alex Yeoh p/87438807 e/alexyeoh@example.com t/friends").unwrap();
    run(&mut store, "buyer n/Bernice Yu p/99272758 e/berniceyu@example.com").unwrap();
    store
}

fn names(store: &RecordStore) -> Vec<String> {
    store.persons().iter().map(|p| p.name.to_string()).collect()
}

#[test]
fn test_delete_first_cites_deleted_person() {
    let mut store = alex_and_bernice();
    let alex = store.persons()[0].clone();

    let result = run(&mut store, "delete 1").unwrap();

    assert_eq!(names(&store), vec!["Bernice Yu"]);
    assert!(result.mutated);
    assert!(result.feedback.contains(&alex.to_display_string()));
}

#[test]
fn test_edit_phone_keeps_identity() {
    let mut store = alex_and_bernice();
    let before = store.persons()[1].clone();

    run(&mut store, "edit 2 p/99998888").unwrap();

    let after = &store.persons()[1];
    assert_eq!(after.phone.as_str(), "99998888");
    assert_eq!(after.name, before.name);
    assert_eq!(after.role, Role::Buyer);
    assert_eq!(after.email, before.email);
    assert_eq!(after.tags, before.tags);
}

#[test]
fn test_duplicate_add_leaves_store_unchanged() {
    let mut store = alex_and_bernice();
    let snapshot = store.persons().to_vec();

    let err = run(&mut store, "buyer n/alex  yeoh p/123 e/other@example.com").unwrap_err();

    assert_eq!(
        err,
        ExecuteError::Command(CommandError::Duplicate(MESSAGE_DUPLICATE_PERSON))
    );
    assert_eq!(store.persons(), snapshot.as_slice());
}

#[test]
fn test_edit_into_existing_name_is_duplicate() {
    let mut store = alex_and_bernice();
    assert!(matches!(
        run(&mut store, "edit 1 n/Bernice Yu"),
        Err(ExecuteError::Command(CommandError::Duplicate(_)))
    ));
    // Changing only the case of one's own name is not a clash.
    run(&mut store, "edit 1 n/ALEX YEOH").unwrap();
    assert_eq!(store.persons()[0].name.as_str(), "ALEX YEOH");
}

#[test]
fn test_index_resolves_against_filtered_view() {
    let mut store = alex_and_bernice();
    run(&mut store, "seller n/Charlotte Oliveiro p/93210283 e/charlotte@example.com").unwrap();

    run(&mut store, "find charlotte").unwrap();
    assert_eq!(store.filtered_persons().len(), 1);

    run(&mut store, "delete 1").unwrap();
    assert_eq!(names(&store), vec!["Alex Yeoh", "Bernice Yu"]);
}

#[test]
fn test_index_past_view_is_rejected() {
    let mut store = alex_and_bernice();
    run(&mut store, "find bernice").unwrap();
    assert_eq!(
        run(&mut store, "delete 2"),
        Err(ExecuteError::Command(CommandError::InvalidIndex(
            MESSAGE_INVALID_PERSON_INDEX
        )))
    );
    assert_eq!(store.persons().len(), 2);
}

#[test]
fn test_name_target_ignores_filter() {
    let mut store = alex_and_bernice();
    run(&mut store, "find bernice").unwrap();
    run(&mut store, "delete alex yeoh").unwrap();
    assert_eq!(names(&store), vec!["Bernice Yu"]);

    assert!(matches!(
        run(&mut store, "delete Nobody Here"),
        Err(ExecuteError::Command(CommandError::InvalidName { .. }))
    ));
}

#[test]
fn test_find_then_list_restores_order() {
    let mut store = alex_and_bernice();
    run(&mut store, "buyer n/David Li p/91031282 e/lidavid@example.com").unwrap();

    let result = run(&mut store, "find david alex").unwrap();
    assert_eq!(result.feedback, "2 persons listed!");
    assert!(!result.mutated);

    run(&mut store, "list").unwrap();
    let visible: Vec<String> = store.filtered_persons().iter().map(|p| p.name.to_string()).collect();
    assert_eq!(visible, vec!["Alex Yeoh", "Bernice Yu", "David Li"]);
}

#[test]
fn test_add_shows_everyone_again() {
    let mut store = alex_and_bernice();
    run(&mut store, "find alex").unwrap();
    run(&mut store, "buyer n/David Li p/91031282 e/lidavid@example.com").unwrap();
    assert_eq!(store.filtered_persons().len(), 3);
}

#[test]
fn test_appointment_set_and_removed() {
    let mut store = alex_and_bernice();
    run(&mut store, "edit Bernice Yu d/2025-03-01 from/09:00 to/10:00 prop/4 Room HDB").unwrap();

    let bernice = &store.persons()[1];
    assert_eq!(bernice.appointment.unwrap().to_string(), "2025-03-01 09:00-10:00");
    assert_eq!(bernice.property.as_ref().unwrap().as_str(), "4 Room HDB");

    let result = run(&mut store, "deleteappt 2").unwrap();
    assert_eq!(result.feedback, "Deleted appointment of Bernice Yu");
    assert!(store.persons()[1].appointment.is_none());
    assert!(store.persons()[1].property.is_some());

    // Nothing to remove is still a success.
    run(&mut store, "deleteappt 2").unwrap();
}

#[test]
fn test_tags_cleared_with_empty_tag() {
    let mut store = alex_and_bernice();
    run(&mut store, "edit 1 t/").unwrap();
    assert!(store.persons()[0].tags.is_empty());
}

#[test]
fn test_clear_empties_book() {
    let mut store = alex_and_bernice();
    let result = run(&mut store, "clear").unwrap();
    assert_eq!(result.feedback, "Contact book has been cleared!");
    assert!(store.persons().is_empty());
    assert!(store.person_by_name(&Name::parse("Alex Yeoh").unwrap()).is_none());
}

#[test]
fn test_help_and_exit_flags() {
    let mut store = RecordStore::new();
    let help = run(&mut store, "help").unwrap();
    assert!(help.show_help && !help.exit && !help.mutated);
    let exit = run(&mut store, "exit").unwrap();
    assert!(exit.exit && !exit.show_help);
}
