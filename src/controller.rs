// File: ./src/controller.rs
//! Runs command text against the record store.
//!
//! The controller owns the store and the command registry. Front ends hand
//! it raw lines and get back either a `CommandResult` or an `ExecuteError`
//! whose `Display` is the message to show. Successful mutations are written
//! to disk before `execute` returns.
use crate::config::Config;
use crate::context::AppContext;
use crate::error::ExecuteError;
use crate::model::sample::sample_persons;
use crate::model::{Listing, Person};
use crate::parser::CommandRegistry;
use crate::storage::LocalStorage;
use crate::store::RecordStore;
use anyhow::Result;
use std::sync::Arc;

pub struct RecordController {
    store: RecordStore,
    registry: CommandRegistry,
    ctx: Arc<dyn AppContext>,
}

impl RecordController {
    pub fn new(store: RecordStore, ctx: Arc<dyn AppContext>) -> Self {
        Self {
            store,
            registry: CommandRegistry::new(),
            ctx,
        }
    }

    /// Loads the book from disk.
    ///
    /// - no persons file: start from the sample contacts (if configured)
    /// - corrupt persons file: start empty, listings included
    /// - corrupt listings file: keep the persons, start with no listings
    ///
    /// Only I/O failures are returned as errors.
    pub fn open(ctx: Arc<dyn AppContext>, config: &Config) -> Result<Self> {
        let persons = match LocalStorage::load_persons(ctx.as_ref()) {
            Ok(Some(persons)) => Some(persons),
            Ok(None) if config.seed_sample_data => {
                log::info!("No data file found; starting with sample contacts");
                Some(sample_persons())
            }
            Ok(None) => Some(Vec::new()),
            Err(e) if LocalStorage::is_corrupt_data_error(&e) => {
                log::warn!("{:#}; starting with an empty book", e);
                None
            }
            Err(e) => return Err(e),
        };

        let store = match persons {
            Some(persons) => {
                let listings = Self::load_listings(ctx.as_ref(), &persons)?;
                RecordStore::with_records(persons, listings)
            }
            None => RecordStore::new(),
        };
        Ok(Self::new(store, ctx))
    }

    fn load_listings(ctx: &dyn AppContext, persons: &[Person]) -> Result<Vec<Listing>> {
        match LocalStorage::load_listings(ctx, persons) {
            Ok(listings) => Ok(listings),
            Err(e) if LocalStorage::is_corrupt_data_error(&e) => {
                log::warn!("{:#}; starting with no listings", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Parses and executes one line. A failed command leaves the store as
    /// it was. A save failure does not undo the command; it is logged and
    /// reported in the feedback.
    pub fn execute(&mut self, line: &str) -> Result<crate::command::CommandResult, ExecuteError> {
        let command = self.registry.parse(line)?;
        let mut result = command.execute(&mut self.store)?;

        if result.mutated
            && let Err(e) = LocalStorage::save(self.ctx.as_ref(), &self.store)
        {
            log::error!("Failed to save book: {:#}", e);
            result
                .feedback
                .push_str(&format!("\nWarning: changes could not be saved ({})", e));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use crate::error::{CommandError, ParseError};

    fn open_fresh(seed: bool) -> (Arc<TestContext>, RecordController) {
        let ctx = Arc::new(TestContext::new());
        let config = Config {
            seed_sample_data: seed,
            ..Config::default()
        };
        let controller = RecordController::open(ctx.clone(), &config).unwrap();
        (ctx, controller)
    }

    #[test]
    fn test_first_start_seeds_samples() {
        let (_ctx, controller) = open_fresh(true);
        assert_eq!(controller.store().persons().len(), sample_persons().len());
        assert!(controller.store().listings().is_empty());

        let (_ctx, controller) = open_fresh(false);
        assert!(controller.store().persons().is_empty());
    }

    #[test]
    fn test_mutation_is_persisted() {
        let (ctx, mut controller) = open_fresh(false);
        controller
            .execute("buyer n/Bernice Yu p/99272758 e/berniceyu@example.com")
            .unwrap();
        controller
            .execute("listing Villa pr/450000 buyer/bernice yu")
            .unwrap();

        let reopened = RecordController::open(ctx, &Config::default()).unwrap();
        assert_eq!(reopened.store().persons(), controller.store().persons());
        assert_eq!(reopened.store().listings(), controller.store().listings());
    }

    #[test]
    fn test_errors_surface_as_execute_errors() {
        let (_ctx, mut controller) = open_fresh(true);
        assert_eq!(
            controller.execute("bogus"),
            Err(ExecuteError::Parse(ParseError::UnknownCommand))
        );
        assert!(matches!(
            controller.execute("delete 99"),
            Err(ExecuteError::Command(CommandError::InvalidIndex(_)))
        ));
    }

    #[test]
    fn test_corrupt_persons_file_starts_empty() {
        let ctx = Arc::new(TestContext::new());
        std::fs::write(ctx.get_persons_path().unwrap(), "[oops").unwrap();
        let controller = RecordController::open(ctx.clone(), &Config::default()).unwrap();
        assert!(controller.store().persons().is_empty());
        assert!(controller.store().listings().is_empty());
    }
}
