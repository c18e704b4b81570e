//! Raw catalog items as the store returns them, one type per recognized variant.
//!
//! Mandatory fields are plain `String`s so that serde rejects an item that lacks
//! them. Price and genre go through lenient helpers and fall back to zero/empty.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::SearchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Track,
    Audiobook,
    Software,
    Ebook,
}

impl CatalogKind {
    /// A string `wrapperType` decides; without one (absent, null or any other
    /// type) only `kind == "ebook"` is recognized.
    pub fn classify(item: &Value) -> Option<Self> {
        match item.get("wrapperType").and_then(Value::as_str) {
            Some("track") => Some(CatalogKind::Track),
            Some("audiobook") => Some(CatalogKind::Audiobook),
            Some("software") => Some(CatalogKind::Software),
            Some(_) => None,
            None => match item.get("kind").and_then(Value::as_str) {
                Some("ebook") => Some(CatalogKind::Ebook),
                _ => None,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Track => "track",
            CatalogKind::Audiobook => "audiobook",
            CatalogKind::Software => "software",
            CatalogKind::Ebook => "ebook",
        }
    }
}

/// Fields every variant carries under the same keys.
#[derive(Debug, Deserialize)]
pub struct ItemArtwork {
    #[serde(rename = "artistName")]
    pub artist_name: String,
    #[serde(rename = "artworkUrl60")]
    pub artwork_url60: String,
    #[serde(rename = "artworkUrl100")]
    pub artwork_url100: String,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct TrackItem {
    #[serde(rename = "trackName")]
    pub track_name: String,
    #[serde(rename = "trackViewUrl")]
    pub track_view_url: String,
    pub kind: String,
    #[serde(rename = "trackPrice", default, deserialize_with = "lenient_price")]
    pub track_price: f64,
    #[serde(rename = "primaryGenreName", default, deserialize_with = "lenient_string")]
    pub primary_genre_name: String,
    #[serde(flatten)]
    pub artwork: ItemArtwork,
}

#[derive(Debug, Deserialize)]
pub struct AudiobookItem {
    #[serde(rename = "collectionName")]
    pub collection_name: String,
    #[serde(rename = "collectionViewUrl")]
    pub collection_view_url: String,
    #[serde(rename = "collectionPrice", default, deserialize_with = "lenient_price")]
    pub collection_price: f64,
    #[serde(rename = "primaryGenreName", default, deserialize_with = "lenient_string")]
    pub primary_genre_name: String,
    #[serde(flatten)]
    pub artwork: ItemArtwork,
}

#[derive(Debug, Deserialize)]
pub struct SoftwareItem {
    #[serde(rename = "trackName")]
    pub track_name: String,
    #[serde(rename = "trackViewUrl")]
    pub track_view_url: String,
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(rename = "primaryGenreName", default, deserialize_with = "lenient_string")]
    pub primary_genre_name: String,
    #[serde(flatten)]
    pub artwork: ItemArtwork,
}

#[derive(Debug, Deserialize)]
pub struct EbookItem {
    #[serde(rename = "trackName")]
    pub track_name: String,
    #[serde(rename = "trackViewUrl")]
    pub track_view_url: String,
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub genres: Vec<String>,
    #[serde(flatten)]
    pub artwork: ItemArtwork,
}

#[derive(Debug)]
pub enum CatalogItem {
    Track(TrackItem),
    Audiobook(AudiobookItem),
    Software(SoftwareItem),
    Ebook(EbookItem),
}

impl CatalogItem {
    pub fn from_value(kind: CatalogKind, item: &Value) -> Result<Self> {
        let parsed = match kind {
            CatalogKind::Track => TrackItem::deserialize(item).map(CatalogItem::Track),
            CatalogKind::Audiobook => AudiobookItem::deserialize(item).map(CatalogItem::Audiobook),
            CatalogKind::Software => SoftwareItem::deserialize(item).map(CatalogItem::Software),
            CatalogKind::Ebook => EbookItem::deserialize(item).map(CatalogItem::Ebook),
        };
        parsed.map_err(|e| AppError::MalformedItem {
            variant: kind.as_str(),
            reason: e.to_string(),
        })
    }

    pub fn into_result(self) -> SearchResult {
        let (name, store_url, kind, price, genre, artwork) = match self {
            CatalogItem::Track(t) => (
                t.track_name,
                t.track_view_url,
                t.kind,
                t.track_price,
                t.primary_genre_name,
                t.artwork,
            ),
            CatalogItem::Audiobook(a) => (
                a.collection_name,
                a.collection_view_url,
                "audiobook".to_string(),
                a.collection_price,
                a.primary_genre_name,
                a.artwork,
            ),
            CatalogItem::Software(s) => (
                s.track_name,
                s.track_view_url,
                s.kind,
                s.price,
                s.primary_genre_name,
                s.artwork,
            ),
            CatalogItem::Ebook(e) => (
                e.track_name,
                e.track_view_url,
                e.kind,
                e.price,
                e.genres.join(", "),
                e.artwork,
            ),
        };

        SearchResult {
            name,
            artist_name: artwork.artist_name,
            artwork_small_url: artwork.artwork_url60,
            artwork_large_url: artwork.artwork_url100,
            store_url,
            kind,
            currency: artwork.currency,
            price,
            genre,
        }
    }
}

fn lenient_price<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(0.0))
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().unwrap_or_default().to_string())
}

fn lenient_string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_prefers_wrapper_type() {
        assert_eq!(
            CatalogKind::classify(&json!({"wrapperType": "track", "kind": "ebook"})),
            Some(CatalogKind::Track)
        );
        assert_eq!(
            CatalogKind::classify(&json!({"wrapperType": "collection", "kind": "ebook"})),
            None
        );
        assert_eq!(
            CatalogKind::classify(&json!({"kind": "ebook"})),
            Some(CatalogKind::Ebook)
        );
        assert_eq!(CatalogKind::classify(&json!({"kind": "song"})), None);
        assert_eq!(CatalogKind::classify(&json!({"wrapperType": 7})), None);
    }

    #[test]
    fn non_string_wrapper_type_falls_back_to_ebook_kind() {
        assert_eq!(
            CatalogKind::classify(&json!({"wrapperType": null, "kind": "ebook"})),
            Some(CatalogKind::Ebook)
        );
        assert_eq!(
            CatalogKind::classify(&json!({"wrapperType": 7, "kind": "ebook"})),
            Some(CatalogKind::Ebook)
        );
        assert_eq!(
            CatalogKind::classify(&json!({"wrapperType": ["track"], "kind": "song"})),
            None
        );
    }

    #[test]
    fn genres_keep_only_string_entries() {
        let item = json!({
            "trackName": "Mixed",
            "artistName": "Author",
            "artworkUrl60": "s",
            "artworkUrl100": "l",
            "trackViewUrl": "v",
            "kind": "ebook",
            "currency": "USD",
            "genres": ["Fiction", 3, null, "Drama"]
        });
        let result = CatalogItem::from_value(CatalogKind::Ebook, &item)
            .unwrap()
            .into_result();
        assert_eq!(result.genre, "Fiction, Drama");
    }

    #[test]
    fn track_kind_is_copied_verbatim() {
        let item = json!({
            "wrapperType": "track",
            "trackName": "Film",
            "artistName": "Director",
            "artworkUrl60": "s",
            "artworkUrl100": "l",
            "trackViewUrl": "https://store.example/film",
            "kind": "feature-movie",
            "currency": "USD",
            "trackPrice": 14.99
        });
        let result = CatalogItem::from_value(CatalogKind::Track, &item)
            .unwrap()
            .into_result();
        assert_eq!(result.kind, "feature-movie");
        assert_eq!(result.store_url, "https://store.example/film");
        assert_eq!(result.price, 14.99);
    }

    #[test]
    fn missing_mandatory_field_is_malformed() {
        let item = json!({
            "wrapperType": "software",
            "trackName": "App",
            "artistName": "Dev",
            "artworkUrl60": "s",
            "artworkUrl100": "l",
            "kind": "software",
            "currency": "USD"
        });
        let err = CatalogItem::from_value(CatalogKind::Software, &item).unwrap_err();
        match err {
            AppError::MalformedItem { variant, reason } => {
                assert_eq!(variant, "software");
                assert!(reason.contains("trackViewUrl"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn mistyped_optional_fields_fall_back_to_defaults() {
        let item = json!({
            "trackName": "Book",
            "artistName": "Author",
            "artworkUrl60": "s",
            "artworkUrl100": "l",
            "trackViewUrl": "v",
            "kind": "ebook",
            "currency": "EUR",
            "price": "free",
            "genres": "Fiction"
        });
        let result = CatalogItem::from_value(CatalogKind::Ebook, &item)
            .unwrap()
            .into_result();
        assert_eq!(result.price, 0.0);
        assert_eq!(result.genre, "");
    }

    #[test]
    fn null_price_defaults_to_zero() {
        let item = json!({
            "wrapperType": "track",
            "trackName": "Song",
            "artistName": "",
            "artworkUrl60": "s",
            "artworkUrl100": "l",
            "trackViewUrl": "v",
            "kind": "song",
            "currency": "USD",
            "trackPrice": null
        });
        let result = CatalogItem::from_value(CatalogKind::Track, &item)
            .unwrap()
            .into_result();
        assert_eq!(result.price, 0.0);
        assert_eq!(result.artist_name, "");
    }
}
