//! Request payloads and their validation.
//!
//! Related entities may be referenced either by numeric id or by an inline
//! object. Parsing only checks the shape of the input; whether referenced
//! rows exist is decided later, inside the write transaction.

use crate::error::FieldErrors;
use crate::types::{AlbumId, ArtistId, CreateArtist, CreateLyric, SongId, UpdateArtist, UpdateLyric};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const NULL: &str = "This field may not be null.";

/// Largest year accepted for artists and albums
pub const MAX_YEAR: i32 = 32767;

/// Reference to an artist from an album payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistRef {
    /// Existing artist by id
    Id(ArtistId),
    /// Artist reused by name, or created when no artist has that name
    Inline {
        name: String,
        first_year_active: Option<i32>,
    },
}

/// Reference to a song from a lyric payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongRef {
    /// Existing song by id
    Id(SongId),
    /// Song reused by `(name, album)`, or created in that album
    Inline { name: String, album_id: AlbumId },
}

/// Validated album creation input. The artist is still unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlbum {
    pub name: String,
    pub year: i32,
    pub artist: ArtistRef,
}

/// Body of `POST /artists` and `PATCH /artists/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub first_year_active: Option<Option<i32>>,
}

/// Body of `POST /albums`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub artist: Option<Value>,
}

/// Body of `POST /lyrics` and `PATCH /lyrics/{id}`.
///
/// `votes`, `upvotes`, `downvotes` and `artist` are read-only and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LyricPayload {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub song: Option<Value>,
}

/// Distinguishes an absent field from an explicit `null`
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ArtistPayload {
    /// Validate for creation: `name` is required.
    pub fn into_create(self) -> Result<CreateArtist, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required_name(self.name, "name", &mut errors);
        let first_year_active = self.first_year_active.flatten();
        if let Some(year) = first_year_active {
            check_year(year, "first_year_active", &mut errors);
        }
        errors.into_result()?;

        Ok(CreateArtist {
            name: name.unwrap_or_default(),
            first_year_active,
        })
    }

    /// Validate for a partial update: only supplied fields are checked.
    pub fn into_update(self) -> Result<UpdateArtist, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = match self.name {
            Some(name) => non_blank(&name, "name", &mut errors),
            None => None,
        };
        if let Some(Some(year)) = self.first_year_active {
            check_year(year, "first_year_active", &mut errors);
        }
        errors.into_result()?;

        Ok(UpdateArtist {
            name,
            first_year_active: self.first_year_active,
        })
    }
}

impl TryFrom<AlbumPayload> for NewAlbum {
    type Error = FieldErrors;

    fn try_from(payload: AlbumPayload) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let name = required_name(payload.name, "name", &mut errors);

        let year = match payload.year {
            Some(year) => {
                check_year(year, "year", &mut errors);
                Some(year)
            }
            None => {
                errors.add("year", REQUIRED);
                None
            }
        };

        let artist = match payload.artist {
            None => {
                errors.add("artist", REQUIRED);
                None
            }
            Some(value) => match parse_artist_ref(&value) {
                Ok(artist) => Some(artist),
                Err(nested) => {
                    merge_reference_errors(&mut errors, "artist", nested);
                    None
                }
            },
        };

        match (name, year, artist) {
            (Some(name), Some(year), Some(artist)) if errors.is_empty() => {
                Ok(NewAlbum { name, year, artist })
            }
            _ => Err(errors),
        }
    }
}

impl TryFrom<LyricPayload> for CreateLyric {
    type Error = FieldErrors;

    fn try_from(payload: LyricPayload) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let text = match payload.text {
            Some(text) => non_blank_text(text, &mut errors),
            None => {
                errors.add("text", REQUIRED);
                None
            }
        };

        let song = match payload.song {
            None => {
                errors.add("song", REQUIRED);
                None
            }
            Some(value) => match parse_song_ref(&value) {
                Ok(song) => Some(song),
                Err(nested) => {
                    merge_reference_errors(&mut errors, "song", nested);
                    None
                }
            },
        };

        match (text, song) {
            (Some(text), Some(song)) if errors.is_empty() => Ok(CreateLyric { text, song }),
            _ => Err(errors),
        }
    }
}

impl TryFrom<LyricPayload> for UpdateLyric {
    type Error = FieldErrors;

    fn try_from(payload: LyricPayload) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let text = payload
            .text
            .and_then(|text| non_blank_text(text, &mut errors));
        let song = match payload.song {
            None => None,
            Some(value) => match parse_song_ref(&value) {
                Ok(song) => Some(song),
                Err(nested) => {
                    merge_reference_errors(&mut errors, "song", nested);
                    None
                }
            },
        };
        errors.into_result()?;
        Ok(UpdateLyric { text, song })
    }
}

/// Parse the `artist` member of an album payload.
///
/// Accepts an integer id or `{name, first_year_active?}`. Errors are keyed
/// relative to the artist object; `""` marks the reference itself.
pub fn parse_artist_ref(value: &Value) -> Result<ArtistRef, FieldErrors> {
    let mut errors = FieldErrors::new();
    match value {
        Value::Number(_) => match value.as_i64() {
            Some(id) => return Ok(ArtistRef::Id(id)),
            None => errors.add("", "Expected an integer artist id."),
        },
        Value::Object(object) => {
            let name = match object.get("name") {
                None => {
                    errors.add("name", REQUIRED);
                    None
                }
                Some(Value::String(name)) => non_blank(name, "name", &mut errors),
                Some(Value::Null) => {
                    errors.add("name", NULL);
                    None
                }
                Some(_) => {
                    errors.add("name", "Not a valid string.");
                    None
                }
            };

            let first_year_active = match object.get("first_year_active") {
                None | Some(Value::Null) => None,
                Some(year) => match year.as_i64().and_then(|y| i32::try_from(y).ok()) {
                    Some(year) => {
                        check_year(year, "first_year_active", &mut errors);
                        Some(year)
                    }
                    None => {
                        errors.add("first_year_active", "A valid integer is required.");
                        None
                    }
                },
            };

            if let (Some(name), true) = (name, errors.is_empty()) {
                return Ok(ArtistRef::Inline {
                    name,
                    first_year_active,
                });
            }
        }
        Value::Null => errors.add("", NULL),
        _ => errors.add(
            "",
            "Expected an artist id or an object with `name` and `first_year_active`.",
        ),
    }
    Err(errors)
}

/// Parse the `song` member of a lyric payload.
///
/// Accepts an integer id or `{name, album}` where `album` is an integer id.
pub fn parse_song_ref(value: &Value) -> Result<SongRef, FieldErrors> {
    let mut errors = FieldErrors::new();
    match value {
        Value::Number(_) => match value.as_i64() {
            Some(id) => return Ok(SongRef::Id(id)),
            None => errors.add("", "Expected an integer song id."),
        },
        Value::Object(object) => {
            let name = match object.get("name") {
                None => {
                    errors.add("name", REQUIRED);
                    None
                }
                Some(Value::String(name)) => non_blank(name, "name", &mut errors),
                Some(Value::Null) => {
                    errors.add("name", NULL);
                    None
                }
                Some(_) => {
                    errors.add("name", "Not a valid string.");
                    None
                }
            };

            let album_id = match object.get("album") {
                None => {
                    errors.add("album", REQUIRED);
                    None
                }
                Some(Value::Null) => {
                    errors.add("album", NULL);
                    None
                }
                Some(album) => match album.as_i64() {
                    Some(id) => Some(id),
                    None => {
                        errors.add("album", "Expected an integer album id.");
                        None
                    }
                },
            };

            if let (Some(name), Some(album_id)) = (name, album_id) {
                if errors.is_empty() {
                    return Ok(SongRef::Inline { name, album_id });
                }
            }
        }
        Value::Null => errors.add("", NULL),
        _ => errors.add(
            "",
            "Expected a song id or an object with `name` and `album`.",
        ),
    }
    Err(errors)
}

fn merge_reference_errors(errors: &mut FieldErrors, field: &str, nested: FieldErrors) {
    // Errors about the reference itself are keyed by the bare field name
    let mut scoped = FieldErrors::new();
    for (key, messages) in nested {
        if key.is_empty() {
            for message in messages {
                errors.add(field, message);
            }
        } else {
            for message in messages {
                scoped.add(key.clone(), message);
            }
        }
    }
    errors.merge_nested(field, scoped);
}

fn required_name(name: Option<String>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match name {
        Some(name) => non_blank(&name, field, errors),
        None => {
            errors.add(field, REQUIRED);
            None
        }
    }
}

fn non_blank(value: &str, field: &str, errors: &mut FieldErrors) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, BLANK);
        None
    } else {
        Some(trimmed.to_string())
    }
}

// Lyric text keeps its inner and surrounding whitespace; line breaks matter.
fn non_blank_text(text: String, errors: &mut FieldErrors) -> Option<String> {
    if text.trim().is_empty() {
        errors.add("text", BLANK);
        None
    } else {
        Some(text)
    }
}

fn check_year(year: i32, field: &str, errors: &mut FieldErrors) {
    if year < 0 {
        errors.add(field, "Ensure this value is greater than or equal to 0.");
    } else if year > MAX_YEAR {
        errors.add(
            field,
            format!("Ensure this value is less than or equal to {MAX_YEAR}."),
        );
    }
}
