use std::collections::HashSet;

use six_cities_types::{CityName, Offer, SortType};

use super::action::{Action, OffersAction};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffersState {
    pub city: CityName,
    pub sort: SortType,
    pub offers: Vec<Offer>,
    /// Set once `GET /offers` has succeeded. Favorites alone do not count.
    pub is_loaded: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub fn reduce(state: OffersState, action: &Action) -> OffersState {
    let Action::Offers(action) = action else {
        return state;
    };

    match action {
        OffersAction::SetCity(city) => OffersState {
            city: *city,
            ..state
        },
        OffersAction::SetSort(sort) => OffersState {
            sort: *sort,
            ..state
        },
        OffersAction::LoadOffersStart => OffersState {
            is_loading: true,
            ..state
        },
        OffersAction::LoadOffersSuccess(offers) => OffersState {
            offers: offers.clone(),
            is_loaded: true,
            is_loading: false,
            error: None,
            ..state
        },
        OffersAction::LoadOffersFailure(message) => OffersState {
            offers: Vec::new(),
            is_loaded: false,
            is_loading: false,
            error: Some(message.clone()),
            ..state
        },
        OffersAction::UpdateOffer(updated) => {
            let mut offers = state.offers;
            replace_by_id(&mut offers, updated);
            OffersState { offers, ..state }
        }
        OffersAction::SetFavorites(favorites) => {
            let ids: HashSet<&str> = favorites.iter().map(|o| o.id.as_str()).collect();
            let mut offers = state.offers;
            for offer in &mut offers {
                offer.is_favorite = ids.contains(offer.id.as_str());
            }
            for favorite in favorites {
                if !offers.iter().any(|o| o.id == favorite.id) {
                    offers.push(favorite.clone());
                }
            }
            OffersState { offers, ..state }
        }
    }
}

/// Replace the offer sharing `updated`'s id, keeping list position.
///
/// Detail fields already loaded are kept when the replacement is a preview.
pub(crate) fn replace_by_id(offers: &mut [Offer], updated: &Offer) -> bool {
    match offers.iter_mut().find(|o| o.id == updated.id) {
        Some(slot) => {
            *slot = merge_offer(slot, updated);
            true
        }
        None => false,
    }
}

pub(crate) fn merge_offer(current: &Offer, updated: &Offer) -> Offer {
    if updated.has_details() || !current.has_details() {
        return updated.clone();
    }
    Offer {
        images: current.images.clone(),
        host: current.host.clone(),
        goods: current.goods.clone(),
        description: current.description.clone(),
        bedrooms: current.bedrooms,
        max_adults: current.max_adults,
        ..updated.clone()
    }
}
