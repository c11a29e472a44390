//! Vote arithmetic for lyric counters

use serde::{Deserialize, Serialize};

/// A single vote on a lyric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Up,
    Down,
}

/// How a downvote moves the net `votes` score.
///
/// `Increment` reproduces the historical API, where a downvote raises
/// `votes` just like an upvote. `Decrement` keeps
/// `votes == upvotes - downvotes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownvoteScoring {
    #[default]
    Increment,
    Decrement,
}

/// Amounts added to each counter, applied atomically by the datastore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteDelta {
    pub votes: i64,
    pub upvotes: i64,
    pub downvotes: i64,
}

impl Vote {
    pub fn delta(self, scoring: DownvoteScoring) -> VoteDelta {
        match self {
            Vote::Up => VoteDelta {
                votes: 1,
                upvotes: 1,
                downvotes: 0,
            },
            Vote::Down => VoteDelta {
                votes: match scoring {
                    DownvoteScoring::Increment => 1,
                    DownvoteScoring::Decrement => -1,
                },
                upvotes: 0,
                downvotes: 1,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Vote::Up => "up",
            Vote::Down => "down",
        }
    }
}
