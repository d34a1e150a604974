//! Application orchestration: routing, page effects and form handling.
//!
//! `App` owns the [`Store`] and is driven by the UI loop: input handlers
//! call the methods here, and [`App::tick`] applies actions produced by
//! background thunks before the next frame is drawn.

mod forms;

use std::sync::Arc;
use std::time::{Duration, Instant};

use six_cities_api::{ApiClient, ApiError};
use six_cities_types::{CITIES, CityName, Offer, OfferId, SortType};
use thiserror::Error;

pub use forms::{CommentForm, LoginField, LoginForm, TextField};

use crate::config::SixCitiesConfig;
use crate::routes::{Access, Route};
use crate::storage::{FileTokenStore, MemoryTokenStore, TokenStore};
use crate::store::selectors::{
    select_auth_status, select_city, select_city_offers, select_favorites_by_city,
    select_is_authorized, select_is_posting_review, select_nearby_offers, select_offer,
    select_offer_error, select_offer_loading, select_offers_loaded, select_offers_loading,
    select_sort,
};
use crate::store::{Action, OfferAction, OffersAction, ReviewsAction, RootState, Store};
use crate::thunks::{Thunk, ThunkContext};

const UI_TICK: Duration = Duration::from_millis(100);
const MAX_BACK_STACK: usize = 32;

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppOptions {
    pub default_city: CityName,
    pub ui: UiOptions,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug)]
pub struct App {
    store: Store,
    ctx: ThunkContext,
    route: Route,
    back: Vec<Route>,
    selected: usize,
    login: LoginForm,
    comment: CommentForm,
    /// City offered as a shortcut on the login page.
    login_city: CityName,
    ui_options: UiOptions,
    notice: Option<String>,
    tick: usize,
    last_ui_tick: Instant,
    should_quit: bool,
}

impl App {
    /// Build from the user's config; missing config means defaults.
    pub fn new(config: Option<&SixCitiesConfig>) -> Result<Self, AppError> {
        let default_config = SixCitiesConfig::default();
        let config = config.unwrap_or(&default_config);

        let api = ApiClient::new(config.api_settings())?;
        let tokens: Arc<dyn TokenStore> = match config.token_path() {
            Some(path) => Arc::new(FileTokenStore::new(path)),
            None => {
                tracing::warn!("No data directory; session will not persist");
                Arc::new(MemoryTokenStore::default())
            }
        };

        Ok(Self::with_parts(
            api,
            tokens,
            AppOptions {
                default_city: config.default_city(),
                ui: config.ui_options(),
            },
        ))
    }

    #[must_use]
    pub fn with_parts(api: ApiClient, tokens: Arc<dyn TokenStore>, options: AppOptions) -> Self {
        let mut state = RootState::default();
        state.offers.city = options.default_city;
        let store = Store::new(state);
        let ctx = ThunkContext::new(api, tokens, store.dispatcher());

        Self {
            store,
            ctx,
            route: Route::Main,
            back: Vec::new(),
            selected: 0,
            login: LoginForm::default(),
            comment: CommentForm::default(),
            login_city: options.default_city,
            ui_options: options.ui,
            notice: None,
            tick: 0,
            last_ui_tick: Instant::now(),
            should_quit: false,
        }
    }

    /// Check the saved session and open `route`. Needs a tokio runtime.
    pub fn start(&mut self, route: Route) {
        self.spawn(Thunk::CheckAuth);
        self.route = route;
        self.apply_guard();
        self.enter_route();
    }

    fn spawn(&self, thunk: Thunk) {
        tracing::debug!(thunk = thunk.name(), "spawn");
        drop(self.ctx.spawn(thunk));
    }

    // Accessors

    #[must_use]
    pub fn state(&self) -> &RootState {
        self.store.state()
    }

    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    pub fn login_form_mut(&mut self) -> &mut LoginForm {
        &mut self.login
    }

    #[must_use]
    pub fn comment_form(&self) -> &CommentForm {
        &self.comment
    }

    pub fn comment_form_mut(&mut self) -> &mut CommentForm {
        &mut self.comment
    }

    #[must_use]
    pub fn login_city(&self) -> CityName {
        self.login_city
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Whether keystrokes should go to a text field.
    #[must_use]
    pub fn is_editing_text(&self) -> bool {
        matches!(self.route, Route::Login) || self.comment.editing
    }

    /// The loaded offer, if it belongs to the open page.
    #[must_use]
    pub fn current_offer(&self) -> Option<&Offer> {
        let Route::Offer(id) = &self.route else {
            return None;
        };
        select_offer(self.state()).filter(|offer| &offer.id == id)
    }

    /// Whether the page should show a spinner instead of content.
    #[must_use]
    pub fn is_page_loading(&self) -> bool {
        let state = self.state();
        match &self.route {
            Route::Main => select_offers_loading(state) && !select_offers_loaded(state),
            Route::Offer(_) => self.current_offer().is_none() && select_offer_error(state).is_none(),
            Route::Favorites => self.route.guard(select_auth_status(state)) == Access::Wait,
            Route::Login | Route::NotFound => false,
        }
    }

    /// Offers the selection cursor moves over on the current page.
    #[must_use]
    pub fn visible_offers(&self) -> Vec<&Offer> {
        let state = self.state();
        match &self.route {
            Route::Main => select_city_offers(state),
            Route::Favorites => select_favorites_by_city(state)
                .into_iter()
                .flat_map(|(_, offers)| offers)
                .collect(),
            Route::Offer(_) if self.current_offer().is_some() => {
                select_nearby_offers(state).iter().collect()
            }
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn selected_offer(&self) -> Option<&Offer> {
        self.visible_offers().get(self.selected).copied()
    }

    // Loop

    /// Apply queued actions and react to the new state.
    pub fn tick(&mut self) {
        let mut posted = None;
        let applied = self.store.drain_with(|action| match action {
            Action::Reviews(ReviewsAction::PostReviewSuccess(_)) => posted = Some(Ok(())),
            Action::Reviews(ReviewsAction::PostReviewFailure(err)) => posted = Some(Err(err.clone())),
            _ => {}
        });
        if let Some(result) = posted {
            self.finish_comment(result);
        }
        if applied > 0 {
            self.after_state_change();
        }

        let now = Instant::now();
        if now.duration_since(self.last_ui_tick) >= UI_TICK {
            self.last_ui_tick = now;
            self.tick = self.tick.wrapping_add(1);
        }
    }

    /// The form is cleared only after the server accepted the review.
    fn finish_comment(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.comment.reset();
                self.notice = Some("Thanks for your review".to_string());
            }
            Err(err) => self.notice = Some(err),
        }
    }

    fn after_state_change(&mut self) {
        if let Route::Offer(id) = &self.route
            && self.state().offer.requested.as_ref() == Some(id)
            && !select_offer_loading(self.state())
            && select_offer_error(self.state()).is_some()
        {
            self.replace_route(Route::NotFound);
        }

        if let Access::Redirect(target) = self.route.guard(select_auth_status(self.state())) {
            self.replace_route(target);
        }

        let len = self.visible_offers().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    // Navigation

    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        let previous = self.switch_route(route);
        if self.back.len() == MAX_BACK_STACK {
            self.back.remove(0);
        }
        self.back.push(previous);
    }

    /// Return to the previous page, or Main.
    pub fn go_back(&mut self) {
        let target = self.back.pop().unwrap_or(Route::Main);
        if target != self.route {
            self.switch_route(target);
        }
    }

    fn replace_route(&mut self, route: Route) {
        if route != self.route {
            self.switch_route(route);
        }
    }

    fn switch_route(&mut self, route: Route) -> Route {
        tracing::debug!(from = %self.route.path(), to = %route.path(), "navigate");
        self.leave_route();
        let previous = std::mem::replace(&mut self.route, route);
        self.apply_guard();
        self.selected = 0;
        self.notice = None;
        self.enter_route();
        previous
    }

    fn apply_guard(&mut self) {
        if let Access::Redirect(target) = self.route.guard(select_auth_status(self.state())) {
            self.route = target;
        }
    }

    fn leave_route(&mut self) {
        if let Route::Offer(_) = self.route {
            self.store.dispatch(OfferAction::ClearOffer);
            self.comment.reset();
        }
    }

    fn enter_route(&mut self) {
        match self.route.clone() {
            Route::Main => {
                let state = self.state();
                if !select_offers_loaded(state) && !select_offers_loading(state) {
                    self.spawn(Thunk::FetchOffers);
                }
            }
            Route::Login => {
                self.login.reset();
                self.login_city = CITIES[rand::random_range(0..CITIES.len())];
            }
            Route::Offer(id) => {
                self.comment.reset();
                self.load_offer(id);
            }
            Route::Favorites => self.spawn(Thunk::FetchFavorites),
            Route::NotFound => {}
        }
    }

    /// Refetch whatever the current page shows.
    pub fn reload(&mut self) {
        match self.route.clone() {
            Route::Main => self.spawn(Thunk::FetchOffers),
            Route::Offer(id) => self.load_offer(id),
            Route::Favorites => self.spawn(Thunk::FetchFavorites),
            Route::Login | Route::NotFound => {}
        }
    }

    /// Claims the page for `id` before the request task runs.
    fn load_offer(&mut self, id: OfferId) {
        self.store.dispatch(OfferAction::LoadOfferStart(id.clone()));
        self.spawn(Thunk::LoadOfferPage(id));
    }

    // Offers list

    pub fn select_next(&mut self) {
        let len = self.visible_offers().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.visible_offers().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn open_selected(&mut self) {
        if let Some(id) = self.selected_offer().map(|offer| offer.id.clone()) {
            self.navigate(Route::Offer(id));
        }
    }

    pub fn set_city(&mut self, city: CityName) {
        if select_city(self.state()) != city {
            self.store.dispatch(OffersAction::SetCity(city));
            self.selected = 0;
        }
    }

    pub fn next_city(&mut self) {
        self.set_city(select_city(self.state()).next());
    }

    pub fn prev_city(&mut self) {
        self.set_city(select_city(self.state()).prev());
    }

    pub fn set_sort(&mut self, sort: SortType) {
        self.store.dispatch(OffersAction::SetSort(sort));
        self.selected = 0;
    }

    pub fn cycle_sort(&mut self) {
        self.set_sort(select_sort(self.state()).next());
    }

    /// Login page shortcut: browse the suggested city.
    pub fn open_login_city(&mut self) {
        self.set_city(self.login_city);
        self.navigate(Route::Main);
    }

    // Auth

    pub fn sign_out(&mut self) {
        if select_is_authorized(self.state()) {
            self.spawn(Thunk::Logout);
        }
    }

    pub fn submit_login(&mut self) {
        match self.login.credentials() {
            Ok(credentials) => {
                self.login.error = None;
                self.login.password.clear();
                self.spawn(Thunk::Login(credentials));
            }
            Err(err) => self.login.error = Some(err.to_string()),
        }
    }

    // Favorites

    /// Guests are sent to the login page instead.
    pub fn toggle_favorite(&mut self, id: OfferId, is_favorite: bool) {
        if !select_is_authorized(self.state()) {
            self.navigate(Route::Login);
            return;
        }
        self.spawn(Thunk::ToggleFavorite {
            offer_id: id,
            is_favorite,
        });
    }

    pub fn toggle_selected_favorite(&mut self) {
        if let Some((id, is_favorite)) = self
            .selected_offer()
            .map(|offer| (offer.id.clone(), offer.is_favorite))
        {
            self.toggle_favorite(id, is_favorite);
        }
    }

    pub fn toggle_current_favorite(&mut self) {
        if let Some((id, is_favorite)) = self
            .current_offer()
            .map(|offer| (offer.id.clone(), offer.is_favorite))
        {
            self.toggle_favorite(id, is_favorite);
        }
    }

    // Reviews

    /// Focus the review form; guests are sent to the login page.
    pub fn start_comment(&mut self) {
        if !select_is_authorized(self.state()) {
            self.navigate(Route::Login);
            return;
        }
        if self.current_offer().is_some() {
            self.comment.editing = true;
        }
    }

    pub fn stop_comment(&mut self) {
        self.comment.editing = false;
    }

    pub fn submit_comment(&mut self) {
        let Route::Offer(id) = self.route.clone() else {
            return;
        };
        if select_is_posting_review(self.state()) {
            return;
        }
        match self.comment.draft() {
            Ok(draft) => {
                self.spawn(Thunk::PostReview { offer_id: id, draft });
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }
}
