use std::cmp::Ordering;

use crate::Offer;

/// Ordering options for the offers list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortType {
    /// Server order.
    #[default]
    Popular,
    PriceLowToHigh,
    PriceHighToLow,
    TopRatedFirst,
}

impl SortType {
    pub const ALL: [SortType; 4] = [
        SortType::Popular,
        SortType::PriceLowToHigh,
        SortType::PriceHighToLow,
        SortType::TopRatedFirst,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popular => "Popular",
            Self::PriceLowToHigh => "Price: low to high",
            Self::PriceHighToLow => "Price: high to low",
            Self::TopRatedFirst => "Top rated first",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Ordering between two offers; `Popular` treats all offers as equal.
    #[must_use]
    pub fn compare(self, a: &Offer, b: &Offer) -> Ordering {
        match self {
            Self::Popular => Ordering::Equal,
            Self::PriceLowToHigh => a.price.cmp(&b.price),
            Self::PriceHighToLow => b.price.cmp(&a.price),
            Self::TopRatedFirst => b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal),
        }
    }

    /// Stable sort in place; `Popular` leaves the slice untouched.
    pub fn apply(self, offers: &mut [Offer]) {
        offers.sort_by(|a, b| self.compare(a, b));
    }
}
