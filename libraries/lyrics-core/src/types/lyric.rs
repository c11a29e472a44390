//! Lyric types

use super::SongId;
use crate::payload::SongRef;
use serde::{Deserialize, Serialize};

pub type LyricId = i64;

/// A lyric excerpt with its vote counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lyric {
    pub id: LyricId,
    pub text: String,
    pub song_id: SongId,
    pub votes: i64,
    pub upvotes: i64,
    pub downvotes: i64,
}

/// Validated lyric creation input. The song is still unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLyric {
    pub text: String,
    pub song: SongRef,
}

/// Validated partial lyric update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateLyric {
    pub text: Option<String>,
    pub song: Option<SongRef>,
}
