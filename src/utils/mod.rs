pub mod string;

pub use string::{artist_line, kind_for_display, truncate_string};
