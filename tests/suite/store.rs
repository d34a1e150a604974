//! The store driven through whole action sequences, read back with selectors.

use six_cities_engine::selectors::{
    select_city_offers, select_favorite_count, select_favorites_by_city, select_map_points,
    select_nearby_offers, select_offer, select_review_count, select_reviews,
};
use six_cities_engine::{
    Action, CityName, MAX_NEARBY_SHOWN, MAX_REVIEWS_SHOWN, Offer, OfferAction, OffersAction,
    Review, ReviewsAction, RootState, SortType, Store,
};

use crate::common::{offer_details_json, offer_json, review_json};

fn offer(id: &str, city: &str, price: u32, rating: f64, favorite: bool) -> Offer {
    serde_json::from_value(offer_json(id, city, price, rating, favorite)).unwrap()
}

fn review(id: &str, day: u32) -> Review {
    serde_json::from_value(review_json(id, &format!("2024-01-{day:02}T12:00:00.000Z"))).unwrap()
}

fn store_with(actions: Vec<Action>) -> Store {
    let mut store = Store::default();
    for action in actions {
        store.dispatch(action);
    }
    store
}

#[test]
fn reducers_ignore_unrelated_actions() {
    let mut store = Store::default();
    let before: RootState = store.state().clone();
    store.dispatch(ReviewsAction::LoadReviewsFailure("boom".to_string()));
    assert_eq!(store.state().offers, before.offers);
    assert_eq!(store.state().auth, before.auth);
}

#[test]
fn city_list_is_filtered_and_sorted() {
    let store = store_with(vec![
        OffersAction::LoadOffersSuccess(vec![
            offer("1", "Amsterdam", 300, 4.0, false),
            offer("2", "Paris", 50, 5.0, false),
            offer("3", "Amsterdam", 100, 4.9, false),
            offer("4", "Amsterdam", 200, 3.1, false),
        ])
        .into(),
        OffersAction::SetCity(CityName::Amsterdam).into(),
        OffersAction::SetSort(SortType::PriceLowToHigh).into(),
    ]);

    let ids: Vec<&str> = select_city_offers(store.state())
        .iter()
        .map(|o| o.id.as_str())
        .collect();
    assert_eq!(ids, ["3", "4", "1"]);
}

#[test]
fn failed_reload_empties_the_list() {
    let store = store_with(vec![
        OffersAction::LoadOffersSuccess(vec![offer("1", "Paris", 100, 4.0, false)]).into(),
        OffersAction::LoadOffersStart.into(),
        OffersAction::LoadOffersFailure("offline".to_string()).into(),
    ]);

    let offers = &store.state().offers;
    assert!(offers.offers.is_empty());
    assert!(!offers.is_loading);
    assert_eq!(offers.error.as_deref(), Some("offline"));
}

#[test]
fn favorite_toggle_updates_list_and_open_offer() {
    let details: Offer = serde_json::from_value(offer_details_json("1", "Paris")).unwrap();
    let store = store_with(vec![
        OffersAction::LoadOffersSuccess(vec![
            offer("1", "Paris", 120, 4.4, false),
            offer("2", "Cologne", 90, 4.0, true),
        ])
        .into(),
        OfferAction::LoadOfferStart("1".into()).into(),
        OfferAction::LoadOfferSuccess {
            offer: Box::new(details),
            nearby: Vec::new(),
            reviews: Vec::new(),
        }
        .into(),
        OffersAction::UpdateOffer(offer("1", "Paris", 120, 4.4, true)).into(),
    ]);

    let state = store.state();
    assert_eq!(select_favorite_count(state), 2);
    let open = select_offer(state).unwrap();
    assert!(open.is_favorite);
    // The preview payload does not wipe fetched details.
    assert!(open.has_details());

    let groups = select_favorites_by_city(state);
    let cities: Vec<CityName> = groups.iter().map(|(city, _)| *city).collect();
    assert_eq!(cities, [CityName::Paris, CityName::Cologne]);
}

#[test]
fn offer_page_caps_reviews_and_nearby() {
    let details: Offer = serde_json::from_value(offer_details_json("1", "Paris")).unwrap();
    let reviews: Vec<Review> = (1..=12).map(|day| review(&format!("r{day}"), day)).collect();
    let nearby: Vec<Offer> = (2..=6)
        .map(|n| offer(&n.to_string(), "Paris", 100, 4.0, false))
        .collect();

    let store = store_with(vec![
        OfferAction::LoadOfferStart("1".into()).into(),
        OfferAction::LoadOfferSuccess {
            offer: Box::new(details),
            nearby,
            reviews,
        }
        .into(),
    ]);
    let state = store.state();

    let shown = select_reviews(state);
    assert_eq!(shown.len(), MAX_REVIEWS_SHOWN);
    assert_eq!(shown[0].id.as_str(), "r12");
    assert_eq!(select_review_count(state), 12);

    assert_eq!(select_nearby_offers(state).len(), MAX_NEARBY_SHOWN);
    let points = select_map_points(state);
    assert_eq!(points.len(), 1 + MAX_NEARBY_SHOWN);
    assert!(points[0].is_current);
}

#[test]
fn posted_review_appends_to_open_offer() {
    let details: Offer = serde_json::from_value(offer_details_json("1", "Paris")).unwrap();
    let store = store_with(vec![
        OfferAction::LoadOfferStart("1".into()).into(),
        OfferAction::LoadOfferSuccess {
            offer: Box::new(details),
            nearby: Vec::new(),
            reviews: vec![review("old", 1)],
        }
        .into(),
        ReviewsAction::PostReviewStart.into(),
        ReviewsAction::PostReviewSuccess(review("new", 2)).into(),
    ]);

    let state = store.state();
    assert!(!state.reviews.is_posting);
    assert_eq!(select_review_count(state), 2);
    assert_eq!(select_reviews(state)[0].id.as_str(), "new");
}

#[test]
fn late_result_for_previous_offer_does_not_replace_current_page() {
    let first: Offer = serde_json::from_value(offer_details_json("1", "Paris")).unwrap();
    let second: Offer = serde_json::from_value(offer_details_json("2", "Paris")).unwrap();
    let store = store_with(vec![
        OfferAction::LoadOfferStart("1".into()).into(),
        OfferAction::ClearOffer.into(),
        OfferAction::LoadOfferStart("2".into()).into(),
        OfferAction::LoadOfferSuccess {
            offer: Box::new(second),
            nearby: Vec::new(),
            reviews: vec![review("b", 2)],
        }
        .into(),
        ReviewsAction::LoadReviewsSuccess {
            offer_id: "1".into(),
            reviews: vec![review("a", 1)],
        }
        .into(),
        OfferAction::LoadOfferSuccess {
            offer: Box::new(first),
            nearby: Vec::new(),
            reviews: vec![review("a", 1)],
        }
        .into(),
    ]);

    let state = store.state();
    assert_eq!(select_offer(state).map(|o| o.id.as_str()), Some("2"));
    assert_eq!(select_reviews(state)[0].id.as_str(), "b");
    assert_eq!(state.offer.error, None);
}

#[test]
fn clear_offer_resets_page_state() {
    let details: Offer = serde_json::from_value(offer_details_json("1", "Paris")).unwrap();
    let store = store_with(vec![
        OfferAction::LoadOfferStart("1".into()).into(),
        OfferAction::LoadOfferSuccess {
            offer: Box::new(details),
            nearby: vec![offer("2", "Paris", 100, 4.0, false)],
            reviews: vec![review("a", 1)],
        }
        .into(),
        OfferAction::ClearOffer.into(),
    ]);

    assert!(select_offer(store.state()).is_none());
    assert!(select_nearby_offers(store.state()).is_empty());
}
