//! End-to-end page flows through `App` against a mock server.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use six_cities_engine::{
    App, AppOptions, AuthorizationStatus, CityName, FileTokenStore, Route, Token, TokenStore,
};

use crate::common::{client, login_json, mount_json, offer_json};

async fn settle(app: &mut App, done: impl Fn(&App) -> bool) {
    for _ in 0..200 {
        app.tick();
        if done(app) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("app did not settle; route = {:?}", app.route());
}

#[test]
fn routes_round_trip_through_paths() {
    for route in [
        Route::Main,
        Route::Login,
        Route::Favorites,
        Route::NotFound,
        Route::Offer("42".into()),
    ] {
        assert_eq!(Route::parse(&route.path()), route);
    }
    assert_eq!(Route::parse("/nowhere"), Route::NotFound);
}

#[tokio::test]
async fn session_survives_restart_via_token_file() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/offers", 200, json!([])).await;
    mount_json(&server, "POST", "/login", 201, login_json("oliver@example.com", "tok")).await;
    mount_json(&server, "GET", "/login", 200, login_json("oliver@example.com", "tok")).await;

    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("six-cities").join("six-cities-token");

    let mut first = App::with_parts(
        client(&server),
        Arc::new(FileTokenStore::new(&token_path)),
        AppOptions::default(),
    );
    first.start(Route::Login);
    settle(&mut first, |app| {
        app.state().auth.authorization_status == AuthorizationStatus::NoAuth
    })
    .await;

    first.login_form_mut().email.enter_text("oliver@example.com");
    first.login_form_mut().password.enter_text("pass1");
    first.submit_login();
    settle(&mut first, |app| app.route() == &Route::Main).await;
    assert!(token_path.exists());
    drop(first);

    let store = FileTokenStore::new(&token_path);
    let mut second = App::with_parts(client(&server), Arc::new(store), AppOptions::default());
    second.start(Route::Favorites);
    settle(&mut second, |app| {
        app.state().auth.authorization_status == AuthorizationStatus::Auth
    })
    .await;
    assert_eq!(second.route(), &Route::Favorites);
}

#[tokio::test]
async fn sign_out_returns_favorites_visitor_to_login() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/offers",
        200,
        json!([offer_json("1", "Brussels", 150, 4.0, true)]),
    )
    .await;
    mount_json(&server, "GET", "/login", 200, login_json("oliver@example.com", "T")).await;
    mount_json(
        &server,
        "GET",
        "/favorite",
        200,
        json!([offer_json("1", "Brussels", 150, 4.0, true)]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let tokens = Arc::new(FileTokenStore::new(dir.path().join("token")));
    tokens.save(&Token::new("T")).unwrap();

    let mut app = App::with_parts(
        client(&server),
        tokens.clone(),
        AppOptions {
            default_city: CityName::Brussels,
            ..AppOptions::default()
        },
    );
    app.start(Route::Favorites);
    settle(&mut app, |app| app.visible_offers().len() == 1).await;

    app.sign_out();
    settle(&mut app, |app| app.route() == &Route::Login).await;
    assert_eq!(tokens.load().unwrap(), None);
}
