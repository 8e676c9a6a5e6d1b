// Logic for checking if records match find keywords.
//
// A record matches when any keyword equals one of the words of its name,
// ignoring case. Partial words do not match: "Han" finds "Han Solo" but not
// "Hans Gruber".

use crate::model::fields::Name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter {
    keywords: Vec<String>,
}

impl NameFilter {
    /// Builds a filter from raw keywords. Blank keywords are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn matches(&self, name: &Name) -> bool {
        self.keywords.iter().any(|keyword| {
            name.words()
                .any(|word| word.to_lowercase() == *keyword)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Name {
        Name::parse(s).unwrap()
    }

    #[test]
    fn test_whole_word_only() {
        let f = NameFilter::new(["han"]);
        assert!(f.matches(&name("Han Solo")));
        assert!(f.matches(&name("Leia HAN")));
        assert!(!f.matches(&name("Hans Gruber")));
    }

    #[test]
    fn test_any_keyword() {
        let f = NameFilter::new(["alice", "bob"]);
        assert!(f.matches(&name("Bob Carol")));
        assert!(f.matches(&name("Alice Dee")));
        assert!(!f.matches(&name("Carol Dee")));
    }

    #[test]
    fn test_blank_keywords_match_nothing() {
        let f = NameFilter::new(["  ", ""]);
        assert!(f.keywords().is_empty());
        assert!(!f.matches(&name("Alice")));
    }
}
