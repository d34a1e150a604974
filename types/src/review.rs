//! Reviews and review submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ReviewId, User, ValidationError};

pub const MIN_COMMENT_CHARS: usize = 50;
pub const MAX_COMMENT_CHARS: usize = 300;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub date: DateTime<Utc>,
    pub comment: String,
    pub rating: u8,
    pub user: User,
}

impl Review {
    /// Month and year, the way review headers show it ("January 2024").
    #[must_use]
    pub fn display_date(&self) -> String {
        self.date.format("%B %Y").to_string()
    }
}

/// A review that passed client-side validation and may be posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentDraft {
    comment: String,
    rating: u8,
}

impl CommentDraft {
    pub fn new(comment: impl Into<String>, rating: u8) -> Result<Self, ValidationError> {
        let comment = comment.into();
        let trimmed = comment.trim();
        let len = trimmed.chars().count();
        if len < MIN_COMMENT_CHARS {
            return Err(ValidationError::CommentTooShort {
                min: MIN_COMMENT_CHARS,
                actual: len,
            });
        }
        if len > MAX_COMMENT_CHARS {
            return Err(ValidationError::CommentTooLong {
                max: MAX_COMMENT_CHARS,
                actual: len,
            });
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ValidationError::RatingOutOfRange(rating));
        }
        Ok(Self {
            comment: trimmed.to_string(),
            rating,
        })
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    #[must_use]
    pub fn rating(&self) -> u8 {
        self.rating
    }
}

/// Rating labels shown next to the star picker, indexed by `rating - 1`.
pub const RATING_TITLES: [&str; 5] = ["terribly", "badly", "not bad", "good", "perfect"];
