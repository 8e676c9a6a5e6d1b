// File: ./src/model/display.rs
//! One-line renderings used in command feedback and list views.
use crate::model::listing::Listing;
use crate::model::person::Person;

pub trait RecordDisplay {
    /// Full single-line description embedded in result messages.
    fn to_display_string(&self) -> String;
}

impl RecordDisplay for Person {
    fn to_display_string(&self) -> String {
        let mut s = format!(
            "{}; Role: {}; Phone: {}; Email: {}",
            self.name, self.role, self.phone, self.email
        );
        if let Some(appt) = &self.appointment {
            s.push_str(&format!("; Appointment: {}", appt));
        }
        if let Some(prop) = &self.property {
            s.push_str(&format!("; Property: {}", prop));
        }
        s.push_str("; Tags: ");
        for tag in &self.tags {
            s.push_str(&tag.to_string());
        }
        s
    }
}

impl RecordDisplay for Listing {
    fn to_display_string(&self) -> String {
        let mut s = self.name.to_string();
        if let Some(addr) = &self.address {
            s.push_str(&format!("; Address: {}", addr));
        }
        if let Some(price) = &self.price {
            s.push_str(&format!("; Price: {}", price));
        }
        let buyers: Vec<&str> = self.buyers().iter().map(|b| b.as_str()).collect();
        s.push_str(&format!("; Buyers: [{}]", buyers.join(", ")));
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fields::{Address, Email, Name, Phone, Price, Tag};
    use crate::model::person::Role;
    use std::collections::BTreeSet;

    #[test]
    fn test_person_display() {
        let tags: BTreeSet<Tag> = ["friends", "colleagues"]
            .iter()
            .map(|t| Tag::parse(t).unwrap())
            .collect();
        let p = Person::new(
            Role::Seller,
            Name::parse("Alex Yeoh").unwrap(),
            Phone::parse("87438807").unwrap(),
            Email::parse("alexyeoh@example.com").unwrap(),
            tags,
        );
        assert_eq!(
            p.to_display_string(),
            "Alex Yeoh; Role: Seller; Phone: 87438807; Email: alexyeoh@example.com; Tags: [colleagues][friends]"
        );
    }

    #[test]
    fn test_listing_display() {
        let l = Listing::new(
            Name::parse("Pinewood").unwrap(),
            Some(Address::parse("12 Pine Road").unwrap()),
            Some(Price::parse("450000").unwrap()),
        )
        .with_buyers([Name::parse("Bernice Yu").unwrap()]);
        assert_eq!(
            l.to_display_string(),
            "Pinewood; Address: 12 Pine Road; Price: $450000; Buyers: [Bernice Yu]"
        );
    }
}
