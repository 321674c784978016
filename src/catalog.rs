use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One catalog entry: a movie, a TV series, or a TV program.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ContentRecord {
    pub id: u32,
    pub title: String,
    pub year: u16,
    /// Comma-separated genre names, e.g. "Drama, Mystery". Multi-valued.
    pub genre: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub description: String,
    #[serde(rename = "posterUrl")]
    pub poster_url: String,
    /// Quality label shown on the card ("HD", "4K").
    pub quality: String,
    /// Catalog rating (editorial), not the user's star rating.
    pub rating: f32,
}

impl ContentRecord {
    /// Genre names as individual values. Order-insignificant for matching.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genre.split(", ")
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres().any(|g| g == genre)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Movie,
    #[serde(rename = "TV Series")]
    TvSeries,
    #[serde(rename = "TV Program")]
    TvProgram,
}

impl ContentKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ContentKind::Movie => "Movie",
            ContentKind::TvSeries => "TV Series",
            ContentKind::TvProgram => "TV Program",
        }
    }
}

static DEFAULT_CATALOG: Lazy<Vec<ContentRecord>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../assets/default_catalog.json"))
        .expect("bundled catalog is valid JSON")
});

/// The catalog shipped with the binary. Used on first run and whenever the
/// persisted content override is absent or corrupt.
pub fn default_catalog() -> Vec<ContentRecord> {
    DEFAULT_CATALOG.clone()
}

/// Sorted, de-duplicated genre names across the catalog, with "All" first.
/// Drives the genre picker.
pub fn unique_genres(items: &[ContentRecord]) -> Vec<String> {
    let mut genres: Vec<String> = items
        .iter()
        .flat_map(|item| item.genres())
        .map(str::to_string)
        .collect();
    genres.sort();
    genres.dedup();
    let mut out = Vec::with_capacity(genres.len() + 1);
    out.push("All".to_string());
    out.extend(genres);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_parses_and_has_unique_ids() {
        let items = default_catalog();
        assert!(!items.is_empty());
        let mut ids: Vec<u32> = items.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), items.len(), "catalog ids must be unique");
    }

    #[test]
    fn kind_round_trips_display_names_on_the_wire() {
        let json = serde_json::to_string(&ContentKind::TvSeries).unwrap();
        assert_eq!(json, "\"TV Series\"");
        let back: ContentKind = serde_json::from_str("\"TV Program\"").unwrap();
        assert_eq!(back, ContentKind::TvProgram);
    }

    #[test]
    fn unique_genres_sorted_with_all_first() {
        let items = default_catalog();
        let genres = unique_genres(&items);
        assert_eq!(genres[0], "All");
        let rest = &genres[1..];
        let mut sorted = rest.to_vec();
        sorted.sort();
        assert_eq!(rest, &sorted[..]);
        assert!(genres.iter().filter(|g| *g == "Drama").count() <= 1);
    }

    #[test]
    fn genre_matching_is_exact_per_value() {
        let item = &default_catalog()[1]; // "Drama, Mystery"
        assert!(item.has_genre("Mystery"));
        assert!(!item.has_genre("Myst"));
    }
}
