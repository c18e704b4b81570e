use std::cmp::Ordering;

use serde::Serialize;

/// One normalized catalog hit. Built once by the parser and never mutated.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub name: String,
    pub artist_name: String,
    #[serde(rename = "artworkSmallURL")]
    pub artwork_small_url: String,
    #[serde(rename = "artworkLargeURL")]
    pub artwork_large_url: String,
    #[serde(rename = "storeURL")]
    pub store_url: String,
    pub kind: String,
    pub currency: String,
    pub price: f64,
    pub genre: String,
}

impl SearchResult {
    /// Display order: byte-wise on `name`, nothing else.
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> SearchResult {
        SearchResult {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn compares_case_sensitively() {
        assert_eq!(named("Zebra").cmp_by_name(&named("apple")), Ordering::Less);
        assert_eq!(named("abc").cmp_by_name(&named("abd")), Ordering::Less);
    }

    #[test]
    fn ignores_fields_other_than_name() {
        let mut a = named("Same");
        a.price = 9.99;
        let mut b = named("Same");
        b.artist_name = "Other".into();
        assert_eq!(a.cmp_by_name(&b), Ordering::Equal);
    }
}
