// File: ./src/model/mod.rs
pub mod display;
pub mod fields;
pub mod listing;
pub mod matcher;
pub mod person;
pub mod sample;

pub use display::RecordDisplay;
pub use fields::{Address, AppointmentDate, AppointmentTime, Email, Name, Phone, Price, Property, Tag};
pub use listing::Listing;
pub use matcher::NameFilter;
pub use person::{Appointment, Person, Role};
