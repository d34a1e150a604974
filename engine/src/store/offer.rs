use six_cities_types::{Offer, OfferId, Review};

use super::action::{Action, OfferAction, OffersAction, ReviewsAction};
use super::offers::{merge_offer, replace_by_id};

/// The offer page: one offer, its neighbourhood and its reviews.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferState {
    /// The offer the page last asked for; results for other ids are stale.
    pub requested: Option<OfferId>,
    pub offer: Option<Offer>,
    pub nearby: Vec<Offer>,
    pub reviews: Vec<Review>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl OfferState {
    fn is_requested(&self, id: &OfferId) -> bool {
        self.requested.as_ref() == Some(id)
    }

    fn shows(&self, id: &OfferId) -> bool {
        self.offer.as_ref().is_some_and(|offer| &offer.id == id)
    }
}

pub fn reduce(state: OfferState, action: &Action) -> OfferState {
    match action {
        // One offer per page visit; `ClearOffer` frees the page for another id.
        Action::Offer(OfferAction::LoadOfferStart(id))
            if state.requested.is_none() || state.is_requested(id) =>
        {
            OfferState {
                requested: Some(id.clone()),
                is_loading: true,
                ..state
            }
        }
        Action::Offer(OfferAction::LoadOfferSuccess {
            offer,
            nearby,
            reviews,
        }) if state.is_requested(&offer.id) => OfferState {
            offer: Some(offer.as_ref().clone()),
            nearby: nearby.clone(),
            reviews: reviews.clone(),
            is_loading: false,
            error: None,
            ..state
        },
        Action::Offer(OfferAction::LoadOfferFailure { id, message }) if state.is_requested(id) => {
            OfferState {
                requested: state.requested,
                error: Some(message.clone()),
                ..OfferState::default()
            }
        }
        Action::Offer(OfferAction::ClearOffer) => OfferState::default(),
        Action::Offers(OffersAction::UpdateOffer(updated)) => {
            let mut nearby = state.nearby;
            replace_by_id(&mut nearby, updated);
            let offer = state.offer.map(|current| {
                if current.id == updated.id {
                    merge_offer(&current, updated)
                } else {
                    current
                }
            });
            OfferState {
                offer,
                nearby,
                ..state
            }
        }
        // Reviews refreshed or posted while the page is open.
        Action::Reviews(ReviewsAction::LoadReviewsSuccess { offer_id, reviews })
            if state.shows(offer_id) =>
        {
            OfferState {
                reviews: reviews.clone(),
                ..state
            }
        }
        Action::Reviews(ReviewsAction::PostReviewSuccess(review)) if state.offer.is_some() => {
            let mut reviews = state.reviews;
            reviews.push(review.clone());
            OfferState { reviews, ..state }
        }
        _ => state,
    }
}
