//! Actions: tagged records describing a state change.
//!
//! Every asynchronous operation reports through a start/success/failure
//! triple; failures carry a display-ready message.

use six_cities_types::{AuthorizationStatus, CityName, Offer, OfferId, Review, SortType};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Offers(OffersAction),
    Offer(OfferAction),
    Reviews(ReviewsAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    SetAuthorizationStatus(AuthorizationStatus),
    SetUserEmail(Option<String>),
    LoginFailure(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OffersAction {
    SetCity(CityName),
    SetSort(SortType),
    LoadOffersStart,
    LoadOffersSuccess(Vec<Offer>),
    LoadOffersFailure(String),
    /// Replace the offer with the same id (favorite toggled).
    UpdateOffer(Offer),
    /// The complete favorites list for the signed-in user.
    SetFavorites(Vec<Offer>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OfferAction {
    /// Later results for any other id are dropped.
    LoadOfferStart(OfferId),
    LoadOfferSuccess {
        offer: Box<Offer>,
        nearby: Vec<Offer>,
        reviews: Vec<Review>,
    },
    LoadOfferFailure {
        id: OfferId,
        message: String,
    },
    /// The offer page was left.
    ClearOffer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewsAction {
    LoadReviewsStart,
    LoadReviewsSuccess {
        offer_id: OfferId,
        reviews: Vec<Review>,
    },
    LoadReviewsFailure(String),
    PostReviewStart,
    PostReviewSuccess(Review),
    PostReviewFailure(String),
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Self::Auth(action)
    }
}

impl From<OffersAction> for Action {
    fn from(action: OffersAction) -> Self {
        Self::Offers(action)
    }
}

impl From<OfferAction> for Action {
    fn from(action: OfferAction) -> Self {
        Self::Offer(action)
    }
}

impl From<ReviewsAction> for Action {
    fn from(action: ReviewsAction) -> Self {
        Self::Reviews(action)
    }
}

impl Action {
    /// Short tag for logs; payloads can be large.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Auth(a) => match a {
                AuthAction::SetAuthorizationStatus(_) => "SET_AUTHORIZATION_STATUS",
                AuthAction::SetUserEmail(_) => "SET_USER_EMAIL",
                AuthAction::LoginFailure(_) => "LOGIN_FAILURE",
            },
            Self::Offers(a) => match a {
                OffersAction::SetCity(_) => "SET_CITY",
                OffersAction::SetSort(_) => "SET_SORT",
                OffersAction::LoadOffersStart => "LOAD_OFFERS_START",
                OffersAction::LoadOffersSuccess(_) => "LOAD_OFFERS_SUCCESS",
                OffersAction::LoadOffersFailure(_) => "LOAD_OFFERS_FAILURE",
                OffersAction::UpdateOffer(_) => "UPDATE_OFFER",
                OffersAction::SetFavorites(_) => "SET_FAVORITES",
            },
            Self::Offer(a) => match a {
                OfferAction::LoadOfferStart(_) => "LOAD_OFFER_START",
                OfferAction::LoadOfferSuccess { .. } => "LOAD_OFFER_SUCCESS",
                OfferAction::LoadOfferFailure { .. } => "LOAD_OFFER_FAILURE",
                OfferAction::ClearOffer => "CLEAR_OFFER",
            },
            Self::Reviews(a) => match a {
                ReviewsAction::LoadReviewsStart => "LOAD_REVIEWS_START",
                ReviewsAction::LoadReviewsSuccess { .. } => "LOAD_REVIEWS_SUCCESS",
                ReviewsAction::LoadReviewsFailure(_) => "LOAD_REVIEWS_FAILURE",
                ReviewsAction::PostReviewStart => "POST_REVIEW_START",
                ReviewsAction::PostReviewSuccess(_) => "POST_REVIEW_SUCCESS",
                ReviewsAction::PostReviewFailure(_) => "POST_REVIEW_FAILURE",
            },
        }
    }
}
