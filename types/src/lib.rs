//! Core domain types for Six Cities.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod auth;
mod city;
mod ids;
mod offer;
mod review;
mod sort;

pub use auth::{AuthInfo, AuthorizationStatus, Credentials, Token};
pub use city::{CITIES, City, CityName, CityParseError, Location};
pub use ids::{OfferId, ReviewId};
pub use offer::{Host, Offer, OfferType, User};
pub use review::{
    CommentDraft, MAX_COMMENT_CHARS, MAX_RATING, MIN_COMMENT_CHARS, MIN_RATING, RATING_TITLES,
    Review,
};
pub use sort::SortType;

use thiserror::Error;

/// Client-side form validation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("review must be at least {min} characters (got {actual})")]
    CommentTooShort { min: usize, actual: usize },
    #[error("review must be at most {max} characters (got {actual})")]
    CommentTooLong { max: usize, actual: usize },
    #[error("rating must be between 1 and 5 (got {0})")]
    RatingOutOfRange(u8),
    #[error("enter a valid e-mail address")]
    InvalidEmail,
    #[error("password must contain at least one letter and one number")]
    WeakPassword,
}

/// Upper bound on reviews shown on the offer page.
pub const MAX_REVIEWS_SHOWN: usize = 10;
/// Upper bound on nearby offers shown on the offer page.
pub const MAX_NEARBY_SHOWN: usize = 3;
/// Upper bound on gallery images shown on the offer page.
pub const MAX_GALLERY_IMAGES: usize = 6;
