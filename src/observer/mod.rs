pub mod search_session;
pub mod thumbnail_downloads;

// Re-exports for convenient access
pub use search_session::{DetailPresenter, SearchSession, SearchState};
pub use thumbnail_downloads::ThumbnailDownloads;
