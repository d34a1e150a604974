//! Async action creators.
//!
//! A thunk performs HTTP calls and reports through the store's action queue:
//! a start action first, then exactly one success or failure. Thunks never
//! touch state directly, so several may be in flight at once.

use std::sync::Arc;

use six_cities_api::{ApiClient, ApiError};
use six_cities_types::{AuthorizationStatus, CommentDraft, Credentials, OfferId, Token};
use tokio::task::JoinHandle;

use crate::storage::TokenStore;
use crate::store::{AuthAction, Dispatcher, OfferAction, OffersAction, ReviewsAction};

pub const SIGN_IN_TO_REVIEW: &str = "Sign in to leave a review";

/// Everything a thunk needs: the HTTP client, token storage and a way back
/// into the store.
#[derive(Debug, Clone)]
pub struct ThunkContext {
    pub api: ApiClient,
    pub tokens: Arc<dyn TokenStore>,
    pub dispatch: Dispatcher,
}

impl ThunkContext {
    #[must_use]
    pub fn new(api: ApiClient, tokens: Arc<dyn TokenStore>, dispatch: Dispatcher) -> Self {
        Self {
            api,
            tokens,
            dispatch,
        }
    }

    /// The saved token; storage failures read as signed out.
    fn token(&self) -> Option<Token> {
        match self.tokens.load() {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!("Failed to read session token: {err}");
                None
            }
        }
    }

    /// Run `thunk` on the current tokio runtime.
    pub fn spawn(&self, thunk: Thunk) -> JoinHandle<()> {
        let ctx = self.clone();
        tokio::spawn(async move { thunk.run(&ctx).await })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Thunk {
    CheckAuth,
    Login(Credentials),
    Logout,
    FetchOffers,
    FetchFavorites,
    LoadOfferPage(OfferId),
    LoadReviews(OfferId),
    PostReview { offer_id: OfferId, draft: CommentDraft },
    ToggleFavorite { offer_id: OfferId, is_favorite: bool },
}

impl Thunk {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CheckAuth => "check_auth",
            Self::Login(_) => "login",
            Self::Logout => "logout",
            Self::FetchOffers => "fetch_offers",
            Self::FetchFavorites => "fetch_favorites",
            Self::LoadOfferPage(_) => "load_offer_page",
            Self::LoadReviews(_) => "load_reviews",
            Self::PostReview { .. } => "post_review",
            Self::ToggleFavorite { .. } => "toggle_favorite",
        }
    }

    pub async fn run(self, ctx: &ThunkContext) {
        tracing::debug!(thunk = self.name(), "run");
        match self {
            Self::CheckAuth => check_auth(ctx).await,
            Self::Login(credentials) => login(ctx, &credentials).await,
            Self::Logout => logout(ctx).await,
            Self::FetchOffers => fetch_offers(ctx).await,
            Self::FetchFavorites => fetch_favorites(ctx).await,
            Self::LoadOfferPage(id) => load_offer_page(ctx, &id).await,
            Self::LoadReviews(id) => load_reviews(ctx, &id).await,
            Self::PostReview { offer_id, draft } => post_review(ctx, &offer_id, &draft).await,
            Self::ToggleFavorite {
                offer_id,
                is_favorite,
            } => toggle_favorite(ctx, &offer_id, is_favorite).await,
        }
    }
}

fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
        other => other.to_string(),
    }
}

pub async fn check_auth(ctx: &ThunkContext) {
    let Some(token) = ctx.token() else {
        ctx.dispatch
            .dispatch(AuthAction::SetAuthorizationStatus(AuthorizationStatus::NoAuth));
        return;
    };

    match ctx.api.check_login(&token).await {
        Ok(info) => {
            tracing::info!("Session restored");
            ctx.dispatch.dispatch(AuthAction::SetUserEmail(Some(info.email)));
            ctx.dispatch
                .dispatch(AuthAction::SetAuthorizationStatus(AuthorizationStatus::Auth));
        }
        Err(err) => {
            if err.is_unauthorized() {
                tracing::info!("Saved session expired");
                if let Err(err) = ctx.tokens.clear() {
                    tracing::warn!("Failed to clear session token: {err}");
                }
            } else {
                tracing::warn!("Auth check failed: {err}");
            }
            ctx.dispatch
                .dispatch(AuthAction::SetAuthorizationStatus(AuthorizationStatus::NoAuth));
        }
    }
}

pub async fn login(ctx: &ThunkContext, credentials: &Credentials) {
    match ctx.api.login(credentials).await {
        Ok(info) => {
            if let Err(err) = ctx.tokens.save(&info.token) {
                tracing::warn!("Failed to persist session token: {err}");
            }
            tracing::info!("Signed in");
            ctx.dispatch.dispatch(AuthAction::SetUserEmail(Some(info.email)));
            ctx.dispatch
                .dispatch(AuthAction::SetAuthorizationStatus(AuthorizationStatus::Auth));
            // Favorite flags are per user.
            fetch_offers(ctx).await;
        }
        Err(err) => {
            tracing::warn!("Login failed: {err}");
            ctx.dispatch
                .dispatch(AuthAction::SetAuthorizationStatus(AuthorizationStatus::NoAuth));
            ctx.dispatch
                .dispatch(AuthAction::LoginFailure(failure_message(&err)));
        }
    }
}

/// Local sign-out happens even when the server call fails.
pub async fn logout(ctx: &ThunkContext) {
    if let Some(token) = ctx.token()
        && let Err(err) = ctx.api.logout(&token).await
    {
        tracing::warn!("Logout request failed: {err}");
    }
    if let Err(err) = ctx.tokens.clear() {
        tracing::warn!("Failed to clear session token: {err}");
    }
    tracing::info!("Signed out");
    ctx.dispatch
        .dispatch(AuthAction::SetAuthorizationStatus(AuthorizationStatus::NoAuth));
    ctx.dispatch.dispatch(AuthAction::SetUserEmail(None));
    fetch_offers(ctx).await;
}

pub async fn fetch_offers(ctx: &ThunkContext) {
    ctx.dispatch.dispatch(OffersAction::LoadOffersStart);
    let token = ctx.token();
    match ctx.api.fetch_offers(token.as_ref()).await {
        Ok(offers) => {
            tracing::debug!(count = offers.len(), "Offers loaded");
            ctx.dispatch.dispatch(OffersAction::LoadOffersSuccess(offers));
        }
        Err(err) => {
            tracing::warn!("Failed to load offers: {err}");
            ctx.dispatch
                .dispatch(OffersAction::LoadOffersFailure(failure_message(&err)));
        }
    }
}

pub async fn fetch_favorites(ctx: &ThunkContext) {
    let Some(token) = ctx.token() else {
        return;
    };
    match ctx.api.fetch_favorites(&token).await {
        Ok(favorites) => ctx.dispatch.dispatch(OffersAction::SetFavorites(favorites)),
        Err(err) => tracing::warn!("Failed to load favorites: {err}"),
    }
}

/// Offer, nearby offers and comments are fetched concurrently. Only the
/// offer itself is required; the other two degrade to empty lists.
pub async fn load_offer_page(ctx: &ThunkContext, id: &OfferId) {
    ctx.dispatch.dispatch(OfferAction::LoadOfferStart(id.clone()));
    ctx.dispatch.dispatch(ReviewsAction::LoadReviewsStart);

    let token = ctx.token();
    let (offer, nearby, comments) = tokio::join!(
        ctx.api.fetch_offer(id, token.as_ref()),
        ctx.api.fetch_nearby(id, token.as_ref()),
        ctx.api.fetch_comments(id),
    );

    let offer = match offer {
        Ok(offer) => offer,
        Err(err) => {
            if err.is_not_found() {
                tracing::info!(offer = %id, "Offer not found");
            } else {
                tracing::warn!(offer = %id, "Failed to load offer: {err}");
            }
            ctx.dispatch.dispatch(OfferAction::LoadOfferFailure {
                id: id.clone(),
                message: failure_message(&err),
            });
            ctx.dispatch
                .dispatch(ReviewsAction::LoadReviewsFailure(failure_message(&err)));
            return;
        }
    };

    let nearby = nearby.unwrap_or_else(|err| {
        tracing::warn!(offer = %id, "Failed to load nearby offers: {err}");
        Vec::new()
    });

    let reviews = match comments {
        Ok(reviews) => {
            ctx.dispatch.dispatch(ReviewsAction::LoadReviewsSuccess {
                offer_id: id.clone(),
                reviews: reviews.clone(),
            });
            reviews
        }
        Err(err) => {
            tracing::warn!(offer = %id, "Failed to load comments: {err}");
            ctx.dispatch
                .dispatch(ReviewsAction::LoadReviewsFailure(failure_message(&err)));
            Vec::new()
        }
    };

    ctx.dispatch.dispatch(OfferAction::LoadOfferSuccess {
        offer: Box::new(offer),
        nearby,
        reviews,
    });
}

pub async fn load_reviews(ctx: &ThunkContext, id: &OfferId) {
    ctx.dispatch.dispatch(ReviewsAction::LoadReviewsStart);
    match ctx.api.fetch_comments(id).await {
        Ok(reviews) => ctx.dispatch.dispatch(ReviewsAction::LoadReviewsSuccess {
            offer_id: id.clone(),
            reviews,
        }),
        Err(err) => {
            tracing::warn!(offer = %id, "Failed to load comments: {err}");
            ctx.dispatch
                .dispatch(ReviewsAction::LoadReviewsFailure(failure_message(&err)));
        }
    }
}

pub async fn post_review(ctx: &ThunkContext, id: &OfferId, draft: &CommentDraft) {
    ctx.dispatch.dispatch(ReviewsAction::PostReviewStart);
    let Some(token) = ctx.token() else {
        ctx.dispatch
            .dispatch(ReviewsAction::PostReviewFailure(SIGN_IN_TO_REVIEW.to_string()));
        return;
    };

    match ctx.api.post_comment(id, draft, &token).await {
        Ok(review) => {
            tracing::info!(offer = %id, "Review posted");
            ctx.dispatch.dispatch(ReviewsAction::PostReviewSuccess(review));
        }
        Err(err) => {
            tracing::warn!(offer = %id, "Failed to post review: {err}");
            ctx.dispatch
                .dispatch(ReviewsAction::PostReviewFailure(failure_message(&err)));
        }
    }
}

/// `is_favorite` is the current flag; the request asks for the opposite.
pub async fn toggle_favorite(ctx: &ThunkContext, id: &OfferId, is_favorite: bool) {
    let Some(token) = ctx.token() else {
        tracing::warn!(offer = %id, "Favorite toggle without a session");
        return;
    };
    match ctx.api.set_favorite(id, !is_favorite, &token).await {
        Ok(offer) => ctx.dispatch.dispatch(OffersAction::UpdateOffer(offer)),
        Err(err) => tracing::warn!(offer = %id, "Failed to update favorite: {err}"),
    }
}
