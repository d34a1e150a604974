//! Cities and map coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point the map widget would plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub zoom: u8,
}

/// The closed set of cities the service lists offers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CityName {
    #[default]
    Paris,
    Cologne,
    Brussels,
    Amsterdam,
    Hamburg,
    Dusseldorf,
}

/// Tab order on the main page.
pub const CITIES: [CityName; 6] = [
    CityName::Paris,
    CityName::Cologne,
    CityName::Brussels,
    CityName::Amsterdam,
    CityName::Hamburg,
    CityName::Dusseldorf,
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown city: {0}")]
pub struct CityParseError(pub String);

impl CityName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paris => "Paris",
            Self::Cologne => "Cologne",
            Self::Brussels => "Brussels",
            Self::Amsterdam => "Amsterdam",
            Self::Hamburg => "Hamburg",
            Self::Dusseldorf => "Dusseldorf",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn parse(s: &str) -> Result<Self, CityParseError> {
        let trimmed = s.trim();
        CITIES
            .into_iter()
            .find(|city| city.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CityParseError(trimmed.to_string()))
    }

    /// Position in [`CITIES`].
    #[must_use]
    pub fn index(self) -> usize {
        CITIES.iter().position(|c| *c == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        CITIES[(self.index() + 1) % CITIES.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        CITIES[(self.index() + CITIES.len() - 1) % CITIES.len()]
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: CityName,
    pub location: Location,
}
