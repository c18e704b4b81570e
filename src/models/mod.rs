pub mod catalog_item;
pub mod layout;
pub mod search_result;

// Re-exports for convenient access
pub use catalog_item::{AudiobookItem, CatalogItem, CatalogKind, EbookItem, SoftwareItem, TrackItem};
pub use layout::{LayoutPlan, LayoutProfile, TilePlacement, TILE_HEIGHT, TILE_WIDTH};
pub use search_result::SearchResult;
