// File: ./src/cli.rs
//! Shared command-line interface logic: help text and list rendering.
use crate::command::listing::{
    ADD_BUYERS_USAGE, ADD_LISTING_USAGE, CLEAR_LISTINGS_USAGE, DELETE_LISTING_USAGE,
    EDIT_LISTING_USAGE, FIND_LISTING_USAGE, LIST_LISTINGS_USAGE, REMOVE_BUYERS_USAGE,
};
use crate::command::person::{
    ADD_BUYER_USAGE, ADD_SELLER_USAGE, CLEAR_USAGE, DELETE_APPOINTMENT_USAGE, DELETE_USAGE,
    EDIT_USAGE, FIND_USAGE, LIST_USAGE,
};
use crate::command::HELP_USAGE;
use crate::model::{Listing, Person};
use crate::store::RecordStore;
use unicode_width::UnicodeWidthStr;

pub fn print_help(binary_name: &str) {
    println!(
        "Realtybook v{} - contacts and listings for property agents",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("Commands are read from standard input, one per line.");
    println!("Type 'help' at the prompt for the list of commands.");
}

const COMMAND_USAGES: &[&str] = &[
    ADD_BUYER_USAGE,
    ADD_SELLER_USAGE,
    EDIT_USAGE,
    DELETE_USAGE,
    DELETE_APPOINTMENT_USAGE,
    FIND_USAGE,
    LIST_USAGE,
    CLEAR_USAGE,
    ADD_LISTING_USAGE,
    EDIT_LISTING_USAGE,
    DELETE_LISTING_USAGE,
    ADD_BUYERS_USAGE,
    REMOVE_BUYERS_USAGE,
    FIND_LISTING_USAGE,
    LIST_LISTINGS_USAGE,
    CLEAR_LISTINGS_USAGE,
    HELP_USAGE,
    "exit: Quits the program.",
];

/// Text shown by the `help` command.
pub fn command_reference() -> String {
    COMMAND_USAGES.join("\n\n")
}

/// Left-aligns `s` in a column `width` terminal cells wide.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

fn render_rows(title: &str, rows: Vec<(String, String)>) -> String {
    let mut out = format!("{} ({})\n", title, rows.len());
    let index_width = rows.len().to_string().len();
    let name_width = rows.iter().map(|(name, _)| name.width()).max().unwrap_or(0);

    for (i, (name, details)) in rows.iter().enumerate() {
        out.push_str(&format!(
            "  {:>iw$}. {}  {}\n",
            i + 1,
            pad(name, name_width),
            details,
            iw = index_width
        ));
    }
    out
}

fn person_details(p: &Person) -> String {
    let mut parts = vec![p.role.to_string(), p.phone.to_string(), p.email.to_string()];
    if let Some(appt) = &p.appointment {
        parts.push(format!("Appointment: {}", appt));
    }
    if let Some(prop) = &p.property {
        parts.push(format!("Property: {}", prop));
    }
    if !p.tags.is_empty() {
        parts.push(p.tags.iter().map(|t| t.to_string()).collect());
    }
    parts.join(" | ")
}

fn listing_details(l: &Listing) -> String {
    let mut parts = Vec::new();
    if let Some(price) = &l.price {
        parts.push(price.to_string());
    }
    if let Some(addr) = &l.address {
        parts.push(addr.to_string());
    }
    let buyers: Vec<&str> = l.buyers().iter().map(|b| b.as_str()).collect();
    parts.push(format!("Buyers: [{}]", buyers.join(", ")));
    parts.join(" | ")
}

/// The filtered person view, numbered the way index arguments count.
pub fn render_persons(store: &RecordStore) -> String {
    let rows = store
        .filtered_persons()
        .into_iter()
        .map(|p| (p.name.to_string(), person_details(p)))
        .collect();
    render_rows("Persons", rows)
}

pub fn render_listings(store: &RecordStore) -> String {
    let rows = store
        .filtered_listings()
        .into_iter()
        .map(|l| (l.name.to_string(), listing_details(l)))
        .collect();
    render_rows("Listings", rows)
}
