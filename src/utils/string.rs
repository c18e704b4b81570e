use crate::models::SearchResult;

/// Human label for a catalog `kind` tag; unknown tags pass through.
pub fn kind_for_display(kind: &str) -> &str {
    match kind {
        "album" => "Album",
        "audiobook" => "Audio Book",
        "book" => "Book",
        "ebook" => "E-Book",
        "feature-movie" => "Movie",
        "music-video" => "Music Video",
        "podcast" => "Podcast",
        "software" => "App",
        "song" => "Song",
        "tv-episode" => "TV Episode",
        other => other,
    }
}

/// Second line of a result row, e.g. "ABBA (Song)".
pub fn artist_line(result: &SearchResult) -> String {
    if result.artist_name.is_empty() {
        "Unknown".to_string()
    } else {
        format!(
            "{} ({})",
            result.artist_name,
            kind_for_display(&result.kind)
        )
    }
}

pub fn truncate_string(value: &str, max_length: usize) -> String {
    if value.chars().count() <= max_length {
        value.to_string()
    } else {
        let mut truncated: String = value.chars().take(max_length.saturating_sub(3)).collect();
        truncated.push_str("...");
        truncated
    }
}
