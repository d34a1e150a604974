//! Shared test utilities and fixtures
//!
//! JSON payloads shaped like the Six Cities server's, plus helpers for
//! wiring a client and thunk context to a wiremock server.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use six_cities_engine::{
    Action, ApiClient, ApiSettings, Dispatcher, MemoryTokenStore, RetryConfig, ThunkContext,
    TokenStore,
};

pub fn offer_json(id: &str, city: &str, price: u32, rating: f64, favorite: bool) -> Value {
    json!({
        "id": id,
        "title": format!("Offer {id}"),
        "type": "apartment",
        "price": price,
        "rating": rating,
        "city": {"name": city, "location": {"latitude": 52.37, "longitude": 4.89, "zoom": 10}},
        "location": {"latitude": 52.36, "longitude": 4.85, "zoom": 16},
        "isFavorite": favorite,
        "isPremium": false,
        "previewImage": "img/apartment-01.jpg"
    })
}

/// Full offer as returned by `GET /offers/{id}`.
pub fn offer_details_json(id: &str, city: &str) -> Value {
    let mut offer = offer_json(id, city, 120, 4.4, false);
    offer["description"] = json!("A quiet cozy and picturesque place near the canal.");
    offer["bedrooms"] = json!(3);
    offer["maxAdults"] = json!(4);
    offer["goods"] = json!(["Heating", "Kitchen", "Washing machine"]);
    offer["images"] = json!(["img/1.jpg", "img/2.jpg"]);
    offer["host"] = json!({"name": "Angelina", "avatarUrl": "img/avatar-angelina.jpg", "isPro": true});
    offer
}

pub fn review_json(id: &str, date: &str) -> Value {
    json!({
        "id": id,
        "date": date,
        "comment": "The house is very good, very happy, hygienic and simple living conditions.",
        "rating": 4,
        "user": {"name": "Isaac", "avatarUrl": "img/avatar-max.jpg", "isPro": false}
    })
}

pub fn login_json(email: &str, token: &str) -> Value {
    json!({
        "email": email,
        "name": "Oliver",
        "avatarUrl": "img/avatar.jpg",
        "isPro": false,
        "token": token
    })
}

pub async fn mount_json(server: &MockServer, verb: &str, route: &str, status: u16, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

pub fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiSettings {
        base_url: server.uri(),
        retry: RetryConfig::none(),
        ..ApiSettings::default()
    })
    .expect("client builds")
}

/// A thunk context whose actions land in the returned receiver.
pub fn context(
    server: &MockServer,
    tokens: MemoryTokenStore,
) -> (ThunkContext, Arc<MemoryTokenStore>, mpsc::UnboundedReceiver<Action>) {
    let tokens = Arc::new(tokens);
    let (dispatch, rx) = Dispatcher::channel();
    let store: Arc<dyn TokenStore> = tokens.clone();
    (ThunkContext::new(client(server), store, dispatch), tokens, rx)
}

/// Everything dispatched so far, in order.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<Action>) -> Vec<Action> {
    let mut actions = Vec::new();
    while let Ok(action) = rx.try_recv() {
        actions.push(action);
    }
    actions
}
