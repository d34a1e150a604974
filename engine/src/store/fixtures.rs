//! Test data builders shared by the store tests.

use chrono::{DateTime, Utc};
use six_cities_types::{
    City, CityName, Host, Location, Offer, OfferId, OfferType, Review, ReviewId,
};

pub(crate) fn offer(id: &str, city: CityName, price: u32, rating: f64, favorite: bool) -> Offer {
    let location = Location {
        latitude: 48.85,
        longitude: 2.35,
        zoom: 16,
    };
    Offer {
        id: OfferId::new(id),
        title: format!("Offer {id}"),
        kind: OfferType::Apartment,
        price,
        rating,
        city: City {
            name: city,
            location,
        },
        location,
        preview_image: String::new(),
        images: Vec::new(),
        host: None,
        goods: Vec::new(),
        description: None,
        bedrooms: None,
        max_adults: None,
        is_favorite: favorite,
        is_premium: false,
    }
}

pub(crate) fn review(id: &str, date: &str) -> Review {
    Review {
        id: ReviewId::new(id),
        date: DateTime::parse_from_rfc3339(date)
            .expect("valid fixture date")
            .with_timezone(&Utc),
        comment: "Nice place".to_string(),
        rating: 4,
        user: Host {
            name: "John".to_string(),
            avatar_url: "img/avatar.jpg".to_string(),
            is_pro: false,
        },
    }
}
