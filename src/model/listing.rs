// File: ./src/model/listing.rs
use crate::model::fields::{Address, Name, Price};

/// A property on the market and the buyers interested in it.
///
/// Buyer names keep insertion order and never repeat; they must resolve to
/// buyers in the store, which keeps them in sync on rename and delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub name: Name,
    pub address: Option<Address>,
    pub price: Option<Price>,
    buyers: Vec<Name>,
}

impl Listing {
    pub fn new(name: Name, address: Option<Address>, price: Option<Price>) -> Self {
        Self {
            name,
            address,
            price,
            buyers: Vec::new(),
        }
    }

    /// Returns a copy with `names` appended, skipping any already present.
    pub fn with_buyers<I>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = Name>,
    {
        for name in names {
            if !self.buyers.contains(&name) {
                self.buyers.push(name);
            }
        }
        self
    }

    /// Returns a copy without any of `names`.
    pub fn without_buyers(mut self, names: &[Name]) -> Self {
        self.buyers.retain(|b| !names.contains(b));
        self
    }

    /// Returns a copy with the reference to `old` pointed at `new`.
    pub fn with_buyer_renamed(mut self, old: &Name, new: &Name) -> Self {
        if let Some(slot) = self.buyers.iter_mut().find(|b| *b == old) {
            *slot = new.clone();
        }
        self
    }

    pub fn buyers(&self) -> &[Name] {
        &self.buyers
    }

    pub fn has_buyer(&self, name: &Name) -> bool {
        self.buyers.contains(name)
    }

    pub fn is_same_listing(&self, other: &Listing) -> bool {
        self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Name {
        Name::parse(s).unwrap()
    }

    #[test]
    fn test_buyer_set_semantics() {
        let listing = Listing::new(name("Pinewood"), None, None)
            .with_buyers([name("Bernice Yu"), name("David Li"), name("bernice yu")]);
        assert_eq!(listing.buyers().len(), 2);
        assert_eq!(listing.buyers()[0].as_str(), "Bernice Yu");

        let listing = listing.with_buyers([name("David Li")]);
        assert_eq!(listing.buyers().len(), 2);

        let listing = listing.without_buyers(&[name("DAVID LI")]);
        assert_eq!(listing.buyers(), &[name("Bernice Yu")]);
    }

    #[test]
    fn test_rename_keeps_position() {
        let listing = Listing::new(name("Pinewood"), None, None)
            .with_buyers([name("Bernice Yu"), name("David Li")])
            .with_buyer_renamed(&name("Bernice Yu"), &name("Bernice Tan"));
        assert_eq!(listing.buyers()[0].as_str(), "Bernice Tan");
        assert_eq!(listing.buyers()[1].as_str(), "David Li");
    }
}
