//! Search the iTunes Store catalog and arrange the hits on paged grids.
//!
//! The pipeline is: build the query, fetch once, decode, normalize every
//! recognized item into a [`SearchResult`], sort by name. Searches run in the
//! background through [`SearchSession`]; artwork is fetched through a
//! cancellable [`ThumbnailDownloads`] group.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod observer;
pub mod utils;

pub use config::{MalformedItemPolicy, SearchConfig};
pub use error::{AppError, Result};
pub use handlers::{compute_layout, run_search, HttpStore, SearchOutcome, StoreTransport};
pub use models::{LayoutPlan, LayoutProfile, SearchResult, TilePlacement};
pub use observer::{DetailPresenter, SearchSession, SearchState, ThumbnailDownloads};
