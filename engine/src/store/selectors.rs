//! Read-only projections of [`RootState`].
//!
//! Views call these instead of reaching into slices so filtering and
//! ordering rules live in one place.

use six_cities_types::{
    AuthorizationStatus, CITIES, CityName, Location, MAX_NEARBY_SHOWN, MAX_REVIEWS_SHOWN, Offer,
    OfferId, Review, SortType,
};

use super::RootState;

// Auth

#[must_use]
pub fn select_auth_status(state: &RootState) -> AuthorizationStatus {
    state.auth.authorization_status
}

#[must_use]
pub fn select_user_email(state: &RootState) -> Option<&str> {
    state.auth.user_email.as_deref()
}

#[must_use]
pub fn select_is_authorized(state: &RootState) -> bool {
    state.auth.authorization_status.is_auth()
}

#[must_use]
pub fn select_login_error(state: &RootState) -> Option<&str> {
    state.auth.error.as_deref()
}

// Offers

#[must_use]
pub fn select_city(state: &RootState) -> CityName {
    state.offers.city
}

#[must_use]
pub fn select_sort(state: &RootState) -> SortType {
    state.offers.sort
}

#[must_use]
pub fn select_all_offers(state: &RootState) -> &[Offer] {
    &state.offers.offers
}

/// Offers in the active city, ordered by the active sort.
///
/// The sort is stable, so `Popular` keeps server order.
#[must_use]
pub fn select_city_offers(state: &RootState) -> Vec<&Offer> {
    let city = state.offers.city;
    let sort = state.offers.sort;
    let mut offers: Vec<&Offer> = state
        .offers
        .offers
        .iter()
        .filter(|offer| offer.city.name == city)
        .collect();
    offers.sort_by(|a, b| sort.compare(a, b));
    offers
}

#[must_use]
pub fn select_offers_loading(state: &RootState) -> bool {
    state.offers.is_loading
}

/// Whether the full list has been fetched at least once.
#[must_use]
pub fn select_offers_loaded(state: &RootState) -> bool {
    state.offers.is_loaded
}

#[must_use]
pub fn select_offers_error(state: &RootState) -> Option<&str> {
    state.offers.error.as_deref()
}

#[must_use]
pub fn select_favorite_count(state: &RootState) -> usize {
    state.offers.offers.iter().filter(|o| o.is_favorite).count()
}

/// Favorites grouped by city in [`CITIES`] order; cities with none are skipped.
#[must_use]
pub fn select_favorites_by_city(state: &RootState) -> Vec<(CityName, Vec<&Offer>)> {
    CITIES
        .iter()
        .filter_map(|&city| {
            let offers: Vec<&Offer> = state
                .offers
                .offers
                .iter()
                .filter(|o| o.is_favorite && o.city.name == city)
                .collect();
            (!offers.is_empty()).then_some((city, offers))
        })
        .collect()
}

// Offer page

#[must_use]
pub fn select_offer(state: &RootState) -> Option<&Offer> {
    state.offer.offer.as_ref()
}

#[must_use]
pub fn select_nearby_offers(state: &RootState) -> &[Offer] {
    let nearby = &state.offer.nearby;
    &nearby[..nearby.len().min(MAX_NEARBY_SHOWN)]
}

/// Newest first, at most [`MAX_REVIEWS_SHOWN`].
#[must_use]
pub fn select_reviews(state: &RootState) -> Vec<&Review> {
    let mut reviews: Vec<&Review> = state.offer.reviews.iter().collect();
    reviews.sort_by(|a, b| b.date.cmp(&a.date));
    reviews.truncate(MAX_REVIEWS_SHOWN);
    reviews
}

#[must_use]
pub fn select_offer_loading(state: &RootState) -> bool {
    state.offer.is_loading
}

#[must_use]
pub fn select_offer_error(state: &RootState) -> Option<&str> {
    state.offer.error.as_deref()
}

/// A location a map would plot for the offer page.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub id: OfferId,
    pub location: Location,
    pub is_current: bool,
}

/// The open offer followed by the shown nearby offers.
#[must_use]
pub fn select_map_points(state: &RootState) -> Vec<MapPoint> {
    let current = state.offer.offer.iter().map(|offer| MapPoint {
        id: offer.id.clone(),
        location: offer.location,
        is_current: true,
    });
    let nearby = select_nearby_offers(state).iter().map(|offer| MapPoint {
        id: offer.id.clone(),
        location: offer.location,
        is_current: false,
    });
    current.chain(nearby).collect()
}

// Reviews

/// Total reviews for the open offer, not capped like [`select_reviews`].
#[must_use]
pub fn select_review_count(state: &RootState) -> usize {
    state.offer.reviews.len()
}

#[must_use]
pub fn select_is_posting_review(state: &RootState) -> bool {
    state.reviews.is_posting
}

#[must_use]
pub fn select_post_review_error(state: &RootState) -> Option<&str> {
    state.reviews.post_error.as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::{offer, review};

    fn state_with_offers(offers: Vec<Offer>) -> RootState {
        let mut state = RootState::default();
        state.offers.offers = offers;
        state
    }

    fn ids(offers: &[&Offer]) -> Vec<String> {
        offers.iter().map(|o| o.id.to_string()).collect()
    }

    #[test]
    fn city_offers_filter_by_active_city() {
        let mut state = state_with_offers(vec![
            offer("1", CityName::Paris, 100, 4.0, false),
            offer("2", CityName::Amsterdam, 50, 4.0, false),
            offer("3", CityName::Paris, 80, 4.0, false),
        ]);
        assert_eq!(ids(&select_city_offers(&state)), ["1", "3"]);

        state.offers.city = CityName::Amsterdam;
        assert_eq!(ids(&select_city_offers(&state)), ["2"]);

        state.offers.city = CityName::Dusseldorf;
        assert!(select_city_offers(&state).is_empty());
    }

    #[test]
    fn city_offers_follow_sort() {
        let mut state = state_with_offers(vec![
            offer("a", CityName::Paris, 120, 3.1, false),
            offer("b", CityName::Paris, 80, 4.9, false),
            offer("c", CityName::Paris, 200, 4.2, false),
        ]);

        assert_eq!(ids(&select_city_offers(&state)), ["a", "b", "c"]);

        state.offers.sort = SortType::PriceLowToHigh;
        assert_eq!(ids(&select_city_offers(&state)), ["b", "a", "c"]);

        state.offers.sort = SortType::PriceHighToLow;
        assert_eq!(ids(&select_city_offers(&state)), ["c", "a", "b"]);

        state.offers.sort = SortType::TopRatedFirst;
        assert_eq!(ids(&select_city_offers(&state)), ["b", "c", "a"]);
    }

    #[test]
    fn equal_prices_keep_server_order() {
        let mut state = state_with_offers(vec![
            offer("x", CityName::Paris, 100, 3.0, false),
            offer("y", CityName::Paris, 100, 5.0, false),
        ]);
        state.offers.sort = SortType::PriceLowToHigh;
        assert_eq!(ids(&select_city_offers(&state)), ["x", "y"]);
    }

    #[test]
    fn favorites_grouped_in_city_order() {
        let state = state_with_offers(vec![
            offer("1", CityName::Hamburg, 100, 4.0, true),
            offer("2", CityName::Paris, 100, 4.0, true),
            offer("3", CityName::Paris, 100, 4.0, false),
            offer("4", CityName::Amsterdam, 100, 4.0, true),
        ]);

        let groups = select_favorites_by_city(&state);
        let cities: Vec<CityName> = groups.iter().map(|(city, _)| *city).collect();
        assert_eq!(
            cities,
            [CityName::Paris, CityName::Amsterdam, CityName::Hamburg]
        );
        assert_eq!(ids(&groups[0].1), ["2"]);
        assert_eq!(select_favorite_count(&state), 3);
    }

    #[test]
    fn no_favorites_means_no_groups() {
        let state = state_with_offers(vec![offer("1", CityName::Paris, 100, 4.0, false)]);
        assert!(select_favorites_by_city(&state).is_empty());
        assert_eq!(select_favorite_count(&state), 0);
    }

    #[test]
    fn reviews_newest_first_and_capped() {
        let mut state = RootState::default();
        state.offer.reviews = (1..=12)
            .map(|day| review(&day.to_string(), &format!("2024-03-{day:02}T12:00:00Z")))
            .collect();

        let shown = select_reviews(&state);
        assert_eq!(shown.len(), MAX_REVIEWS_SHOWN);
        assert_eq!(shown[0].id.as_str(), "12");
        assert_eq!(shown[9].id.as_str(), "3");
        assert_eq!(select_review_count(&state), 12);
    }

    #[test]
    fn nearby_capped_and_map_points_lead_with_current() {
        let mut state = RootState::default();
        state.offer.offer = Some(offer("0", CityName::Paris, 100, 4.0, false));
        state.offer.nearby = (1..=5)
            .map(|i| offer(&i.to_string(), CityName::Paris, 100, 4.0, false))
            .collect();

        assert_eq!(select_nearby_offers(&state).len(), MAX_NEARBY_SHOWN);

        let points = select_map_points(&state);
        assert_eq!(points.len(), 4);
        assert!(points[0].is_current);
        assert_eq!(points[0].id.as_str(), "0");
        assert!(points[1..].iter().all(|p| !p.is_current));
    }

    #[test]
    fn auth_projections() {
        let mut state = RootState::default();
        assert!(!select_is_authorized(&state));
        assert_eq!(select_user_email(&state), None);

        state.auth.authorization_status = AuthorizationStatus::Auth;
        state.auth.user_email = Some("guest@example.com".to_string());
        assert!(select_is_authorized(&state));
        assert_eq!(select_user_email(&state), Some("guest@example.com"));
    }
}
