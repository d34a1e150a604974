//! Thunks against a mock server: the action sequence each one dispatches.

use serde_json::json;
use wiremock::MockServer;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use six_cities_engine::thunks::{
    self, SIGN_IN_TO_REVIEW, check_auth, fetch_favorites, fetch_offers, load_offer_page,
    load_reviews, post_review, toggle_favorite,
};
use six_cities_engine::{
    Action, AuthAction, AuthorizationStatus, CommentDraft, Credentials, MemoryTokenStore,
    OfferAction, OfferId, OffersAction, ReviewsAction, Token, TokenStore,
};

use crate::common::{
    context, drain, login_json, mount_json, offer_details_json, offer_json, review_json,
};

fn status(status: AuthorizationStatus) -> Action {
    AuthAction::SetAuthorizationStatus(status).into()
}

#[tokio::test]
async fn fetch_offers_dispatches_start_then_success() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/offers",
        200,
        json!([offer_json("1", "Paris", 120, 4.0, false)]),
    )
    .await;

    let (ctx, _, mut rx) = context(&server, MemoryTokenStore::default());
    fetch_offers(&ctx).await;

    let actions = drain(&mut rx);
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0], OffersAction::LoadOffersStart.into());
    match &actions[1] {
        Action::Offers(OffersAction::LoadOffersSuccess(offers)) => {
            assert_eq!(offers.len(), 1);
            assert_eq!(offers[0].id.as_str(), "1");
        }
        other => panic!("unexpected action: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_offers_failure_carries_server_message() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/offers",
        400,
        json!({"errorType": "COMMON_ERROR", "message": "Bad request"}),
    )
    .await;

    let (ctx, _, mut rx) = context(&server, MemoryTokenStore::default());
    fetch_offers(&ctx).await;

    assert_eq!(
        drain(&mut rx),
        vec![
            OffersAction::LoadOffersStart.into(),
            OffersAction::LoadOffersFailure("Bad request".to_string()).into(),
        ]
    );
}

#[tokio::test]
async fn check_auth_without_token_is_no_auth() {
    let server = MockServer::start().await;
    let (ctx, _, mut rx) = context(&server, MemoryTokenStore::default());

    check_auth(&ctx).await;

    assert_eq!(drain(&mut rx), vec![status(AuthorizationStatus::NoAuth)]);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn check_auth_sends_saved_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .and(header("authorization", "Bearer saved"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(login_json("oliver@example.com", "saved")),
        )
        .mount(&server)
        .await;

    let (ctx, _, mut rx) = context(&server, MemoryTokenStore::with_token(Token::new("saved")));
    check_auth(&ctx).await;

    assert_eq!(
        drain(&mut rx),
        vec![
            AuthAction::SetUserEmail(Some("oliver@example.com".to_string())).into(),
            status(AuthorizationStatus::Auth),
        ]
    );
}

#[tokio::test]
async fn expired_session_clears_token() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/login", 401, json!({"message": "Unauthorized"})).await;

    let (ctx, tokens, mut rx) =
        context(&server, MemoryTokenStore::with_token(Token::new("stale")));
    check_auth(&ctx).await;

    assert_eq!(drain(&mut rx), vec![status(AuthorizationStatus::NoAuth)]);
    assert_eq!(tokens.load().unwrap(), None);
}

#[tokio::test]
async fn login_saves_token_and_refetches_offers() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "POST",
        "/login",
        201,
        login_json("oliver@example.com", "fresh"),
    )
    .await;
    mount_json(&server, "GET", "/offers", 200, json!([])).await;

    let (ctx, tokens, mut rx) = context(&server, MemoryTokenStore::default());
    let credentials = Credentials::new("oliver@example.com", "pass1").unwrap();
    thunks::login(&ctx, &credentials).await;

    assert_eq!(tokens.load().unwrap(), Some(Token::new("fresh")));
    assert_eq!(
        drain(&mut rx),
        vec![
            AuthAction::SetUserEmail(Some("oliver@example.com".to_string())).into(),
            status(AuthorizationStatus::Auth),
            OffersAction::LoadOffersStart.into(),
            OffersAction::LoadOffersSuccess(Vec::new()).into(),
        ]
    );
}

#[tokio::test]
async fn rejected_login_reports_error() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "POST",
        "/login",
        400,
        json!({"message": "Invalid credentials"}),
    )
    .await;

    let (ctx, tokens, mut rx) = context(&server, MemoryTokenStore::default());
    let credentials = Credentials::new("oliver@example.com", "pass1").unwrap();
    thunks::login(&ctx, &credentials).await;

    assert_eq!(tokens.load().unwrap(), None);
    assert_eq!(
        drain(&mut rx),
        vec![
            status(AuthorizationStatus::NoAuth),
            AuthAction::LoginFailure("Invalid credentials".to_string()).into(),
        ]
    );
}

#[tokio::test]
async fn logout_signs_out_even_if_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_json(&server, "GET", "/offers", 200, json!([])).await;

    let (ctx, tokens, mut rx) = context(&server, MemoryTokenStore::with_token(Token::new("T")));
    thunks::logout(&ctx).await;

    assert_eq!(tokens.load().unwrap(), None);
    let actions = drain(&mut rx);
    assert_eq!(actions[0], status(AuthorizationStatus::NoAuth));
    assert_eq!(actions[1], AuthAction::SetUserEmail(None).into());
    assert_eq!(actions[2], OffersAction::LoadOffersStart.into());
}

#[tokio::test]
async fn offer_page_loads_offer_nearby_and_reviews() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/offers/7", 200, offer_details_json("7", "Amsterdam")).await;
    mount_json(
        &server,
        "GET",
        "/offers/7/nearby",
        200,
        json!([offer_json("8", "Amsterdam", 90, 3.0, false)]),
    )
    .await;
    mount_json(
        &server,
        "GET",
        "/comments/7",
        200,
        json!([review_json("r1", "2024-03-01T10:00:00.000Z")]),
    )
    .await;

    let (ctx, _, mut rx) = context(&server, MemoryTokenStore::default());
    load_offer_page(&ctx, &OfferId::new("7")).await;

    let actions = drain(&mut rx);
    assert_eq!(actions[0], OfferAction::LoadOfferStart(OfferId::new("7")).into());
    assert_eq!(actions[1], ReviewsAction::LoadReviewsStart.into());
    assert!(matches!(
        &actions[2],
        Action::Reviews(ReviewsAction::LoadReviewsSuccess { offer_id, reviews })
            if offer_id.as_str() == "7" && reviews.len() == 1
    ));
    match &actions[3] {
        Action::Offer(OfferAction::LoadOfferSuccess {
            offer,
            nearby,
            reviews,
        }) => {
            assert_eq!(offer.id.as_str(), "7");
            assert!(offer.has_details());
            assert_eq!(nearby.len(), 1);
            assert_eq!(reviews.len(), 1);
        }
        other => panic!("unexpected action: {other:?}"),
    }
}

#[tokio::test]
async fn missing_offer_fails_the_page() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/offers/404", 404, json!({"message": "Not found"})).await;
    mount_json(&server, "GET", "/offers/404/nearby", 404, json!({"message": "Not found"})).await;
    mount_json(&server, "GET", "/comments/404", 404, json!({"message": "Not found"})).await;

    let (ctx, _, mut rx) = context(&server, MemoryTokenStore::default());
    load_offer_page(&ctx, &OfferId::new("404")).await;

    let actions = drain(&mut rx);
    assert_eq!(actions.len(), 4);
    assert_eq!(
        actions[2],
        OfferAction::LoadOfferFailure {
            id: OfferId::new("404"),
            message: "Not found".to_string(),
        }
        .into()
    );
}

#[tokio::test]
async fn offer_page_survives_failed_nearby_and_comments() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/offers/9", 200, offer_details_json("9", "Brussels")).await;
    mount_json(&server, "GET", "/offers/9/nearby", 500, json!({"message": "Server error"})).await;
    mount_json(&server, "GET", "/comments/9", 500, json!({"message": "Server error"})).await;

    let (ctx, _, mut rx) = context(&server, MemoryTokenStore::default());
    load_offer_page(&ctx, &OfferId::new("9")).await;

    let actions = drain(&mut rx);
    assert_eq!(actions.len(), 4);
    assert_eq!(actions[0], OfferAction::LoadOfferStart(OfferId::new("9")).into());
    assert_eq!(actions[1], ReviewsAction::LoadReviewsStart.into());
    assert_eq!(
        actions[2],
        ReviewsAction::LoadReviewsFailure("Server error".to_string()).into()
    );
    match &actions[3] {
        Action::Offer(OfferAction::LoadOfferSuccess {
            offer,
            nearby,
            reviews,
        }) => {
            assert_eq!(offer.id.as_str(), "9");
            assert!(nearby.is_empty());
            assert!(reviews.is_empty());
        }
        other => panic!("unexpected action: {other:?}"),
    }
}

#[tokio::test]
async fn load_reviews_dispatches_start_then_success() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/comments/4",
        200,
        json!([
            review_json("r1", "2024-02-01T10:00:00.000Z"),
            review_json("r2", "2024-03-01T10:00:00.000Z")
        ]),
    )
    .await;

    let (ctx, _, mut rx) = context(&server, MemoryTokenStore::default());
    load_reviews(&ctx, &OfferId::new("4")).await;

    let actions = drain(&mut rx);
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0], ReviewsAction::LoadReviewsStart.into());
    match &actions[1] {
        Action::Reviews(ReviewsAction::LoadReviewsSuccess { offer_id, reviews }) => {
            assert_eq!(offer_id.as_str(), "4");
            let ids: Vec<&str> = reviews.iter().map(|r| r.id.as_str()).collect();
            assert_eq!(ids, ["r1", "r2"]);
        }
        other => panic!("unexpected action: {other:?}"),
    }
}

#[tokio::test]
async fn load_reviews_failure_carries_server_message() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/comments/4", 404, json!({"message": "Offer not found"})).await;

    let (ctx, _, mut rx) = context(&server, MemoryTokenStore::default());
    load_reviews(&ctx, &OfferId::new("4")).await;

    assert_eq!(
        drain(&mut rx),
        vec![
            ReviewsAction::LoadReviewsStart.into(),
            ReviewsAction::LoadReviewsFailure("Offer not found".to_string()).into(),
        ]
    );
}

#[tokio::test]
async fn post_review_requires_session() {
    let server = MockServer::start().await;
    let (ctx, _, mut rx) = context(&server, MemoryTokenStore::default());
    let draft = CommentDraft::new("a".repeat(60), 4).unwrap();

    post_review(&ctx, &OfferId::new("1"), &draft).await;

    assert_eq!(
        drain(&mut rx),
        vec![
            ReviewsAction::PostReviewStart.into(),
            ReviewsAction::PostReviewFailure(SIGN_IN_TO_REVIEW.to_string()).into(),
        ]
    );
}

#[tokio::test]
async fn post_review_sends_comment_and_rating() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/comments/1"))
        .and(wiremock::matchers::body_json(json!({
            "comment": "a".repeat(60),
            "rating": 4
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(review_json("new", "2024-06-01T10:00:00.000Z")),
        )
        .mount(&server)
        .await;

    let (ctx, _, mut rx) = context(&server, MemoryTokenStore::with_token(Token::new("T")));
    let draft = CommentDraft::new("a".repeat(60), 4).unwrap();
    post_review(&ctx, &OfferId::new("1"), &draft).await;

    let actions = drain(&mut rx);
    assert_eq!(actions[0], ReviewsAction::PostReviewStart.into());
    assert!(matches!(
        &actions[1],
        Action::Reviews(ReviewsAction::PostReviewSuccess(review)) if review.id.as_str() == "new"
    ));
}

#[tokio::test]
async fn toggle_favorite_requests_opposite_status() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "POST",
        "/favorite/3/1",
        200,
        offer_json("3", "Hamburg", 80, 4.0, true),
    )
    .await;

    let (ctx, _, mut rx) = context(&server, MemoryTokenStore::with_token(Token::new("T")));
    toggle_favorite(&ctx, &OfferId::new("3"), false).await;

    match drain(&mut rx).as_slice() {
        [Action::Offers(OffersAction::UpdateOffer(offer))] => assert!(offer.is_favorite),
        other => panic!("unexpected actions: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_favorites_sets_favorites() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/favorite",
        200,
        json!([offer_json("3", "Hamburg", 80, 4.0, true)]),
    )
    .await;

    let (ctx, _, mut rx) = context(&server, MemoryTokenStore::with_token(Token::new("T")));
    fetch_favorites(&ctx).await;

    match drain(&mut rx).as_slice() {
        [Action::Offers(OffersAction::SetFavorites(offers))] => assert_eq!(offers.len(), 1),
        other => panic!("unexpected actions: {other:?}"),
    }
}
