//! List filters and ordering

use crate::types::ArtistId;

/// Sort direction of one ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Sortable artist fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistOrderField {
    Name,
    FirstYearActive,
}

impl ArtistOrderField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "first_year_active" => Some(Self::FirstYearActive),
            _ => None,
        }
    }
}

/// Sortable lyric fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricOrderField {
    Text,
    SongName,
    AlbumName,
}

impl LyricOrderField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "text" => Some(Self::Text),
            "song__name" => Some(Self::SongName),
            "song__album__name" => Some(Self::AlbumName),
            _ => None,
        }
    }
}

/// Parse an `ordering` query value such as `-name,first_year_active`.
///
/// Unknown fields are dropped.
pub fn parse_ordering<F>(raw: Option<&str>, field: impl Fn(&str) -> Option<F>) -> Vec<(F, Direction)> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .filter_map(|term| match term.strip_prefix('-') {
            Some(name) => field(name).map(|f| (f, Direction::Desc)),
            None => field(term).map(|f| (f, Direction::Asc)),
        })
        .collect()
}

/// Filters accepted by the artist listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistFilter {
    pub first_year_active_lt: Option<i32>,
    pub first_year_active_gt: Option<i32>,
    pub name: Option<String>,
    pub name_contains: Option<String>,
    pub ordering: Vec<(ArtistOrderField, Direction)>,
}

impl ArtistFilter {
    pub fn with_ordering(mut self, raw: Option<&str>) -> Self {
        self.ordering = parse_ordering(raw, ArtistOrderField::parse);
        self
    }
}

/// Free-text search and ordering for the lyric listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricFilter {
    /// Every term must match lyric text, song name or album name
    pub search_terms: Vec<String>,
    pub ordering: Vec<(LyricOrderField, Direction)>,
}

impl LyricFilter {
    pub fn new(search: Option<&str>, ordering: Option<&str>) -> Self {
        let search_terms = search
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        Self {
            search_terms,
            ordering: parse_ordering(ordering, LyricOrderField::parse),
        }
    }
}

/// Candidate restriction for random lyric selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RandomLyricFilter {
    /// Case-insensitive substring of the artist name
    pub artist_name: Option<String>,
    pub artist_id: Option<ArtistId>,
}

impl RandomLyricFilter {
    /// Build from raw query values. `None` means the filter is malformed.
    pub fn parse(artist: Option<&str>, artist_id: Option<&str>) -> Option<Self> {
        let artist_id = match artist_id.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<ArtistId>().ok()?),
        };
        let artist_name = artist
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Some(Self {
            artist_name,
            artist_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_keeps_known_fields_in_order() {
        let filter = ArtistFilter::default().with_ordering(Some("-first_year_active, name,bogus"));
        assert_eq!(
            filter.ordering,
            vec![
                (ArtistOrderField::FirstYearActive, Direction::Desc),
                (ArtistOrderField::Name, Direction::Asc),
            ]
        );
    }

    #[test]
    fn lyric_filter_splits_search_terms() {
        let filter = LyricFilter::new(Some("  shake  it off "), Some("-song__album__name"));
        assert_eq!(filter.search_terms, vec!["shake", "it", "off"]);
        assert_eq!(filter.ordering, vec![(LyricOrderField::AlbumName, Direction::Desc)]);
    }

    #[test]
    fn random_filter_rejects_non_numeric_artist_id() {
        assert!(RandomLyricFilter::parse(None, Some("abc")).is_none());

        let filter = RandomLyricFilter::parse(Some(" swift "), Some("4")).unwrap();
        assert_eq!(filter.artist_name.as_deref(), Some("swift"));
        assert_eq!(filter.artist_id, Some(4));

        assert_eq!(
            RandomLyricFilter::parse(Some(""), Some("")).unwrap(),
            RandomLyricFilter::default()
        );
    }
}
