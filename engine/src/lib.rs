//! Core engine for Six Cities: state container and orchestration.
//!
//! This crate holds the store, thunks, routing and the `App` driver without
//! TUI dependencies. Rendering lives in `six-cities-tui`.

mod app;
mod config;
pub mod routes;
pub mod storage;
pub mod store;
pub mod thunks;

pub use app::{
    App, AppError, AppOptions, CommentForm, LoginField, LoginForm, TextField, UiOptions,
};
pub use config::{
    API_URL_ENV, ASCII_ENV, ApiConfig, AppConfig, ConfigError, SixCitiesConfig, StorageConfig,
    config_path, expand_env_vars,
};
pub use routes::{Access, Route};
pub use storage::{FileTokenStore, MemoryTokenStore, StorageError, TokenStore};
pub use store::selectors;
pub use store::{
    Action, AuthAction, Dispatcher, OfferAction, OffersAction, ReviewsAction, RootState, Store,
};
pub use thunks::{Thunk, ThunkContext};

pub use six_cities_api::{ApiClient, ApiError, ApiSettings, AuthHeader, RetryConfig};
pub use six_cities_types::{
    AuthInfo, AuthorizationStatus, CITIES, City, CityName, CityParseError, CommentDraft,
    Credentials, Host, Location, MAX_COMMENT_CHARS, MAX_GALLERY_IMAGES, MAX_NEARBY_SHOWN,
    MAX_RATING, MAX_REVIEWS_SHOWN, MIN_COMMENT_CHARS, MIN_RATING, Offer, OfferId, OfferType,
    RATING_TITLES, Review, ReviewId, SortType, Token, User, ValidationError,
};
