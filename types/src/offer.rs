//! Rental offers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{City, Location, OfferId};

/// Offer host, also the author shape used by reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub is_pro: bool,
}

/// Review authors carry the same fields as hosts.
pub type User = Host;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OfferType {
    Apartment,
    Room,
    House,
    Hotel,
    /// Anything the client does not know about yet; shown verbatim.
    Other(String),
}

impl OfferType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Apartment => "apartment",
            Self::Room => "room",
            Self::House => "house",
            Self::Hotel => "hotel",
            Self::Other(raw) => raw,
        }
    }

    /// Capitalized label for the features list ("Apartment", "Private room").
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Apartment => "Apartment".to_string(),
            Self::Room => "Private room".to_string(),
            Self::House => "House".to_string(),
            Self::Hotel => "Hotel".to_string(),
            Self::Other(raw) => {
                let mut chars = raw.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

impl From<String> for OfferType {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "apartment" => Self::Apartment,
            "room" => Self::Room,
            "house" => Self::House,
            "hotel" => Self::Hotel,
            _ => Self::Other(value),
        }
    }
}

impl From<OfferType> for String {
    fn from(value: OfferType) -> Self {
        match value {
            OfferType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rental offer.
///
/// List endpoints return the preview subset; the detail endpoint fills in
/// `images`, `host`, `goods`, `description`, `bedrooms` and `max_adults`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: OfferType,
    pub price: u32,
    pub rating: f64,
    pub city: City,
    pub location: Location,
    #[serde(default)]
    pub preview_image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub host: Option<Host>,
    #[serde(default)]
    pub goods: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub max_adults: Option<u32>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_premium: bool,
}

impl Offer {
    /// Star bar fill, `rating / 5` as a percentage.
    #[must_use]
    pub fn rating_percent(&self) -> f64 {
        (self.rating.clamp(0.0, 5.0) / 5.0) * 100.0
    }

    /// Whole stars for compact displays.
    #[must_use]
    pub fn stars(&self) -> u8 {
        self.rating.clamp(0.0, 5.0).round() as u8
    }

    /// Whether the detail fields have been fetched.
    #[must_use]
    pub fn has_details(&self) -> bool {
        self.host.is_some()
    }
}
