//! Pages and access rules.

use six_cities_types::{AuthorizationStatus, OfferId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Main,
    Login,
    Offer(OfferId),
    Favorites,
    NotFound,
}

impl Route {
    /// Unknown paths map to [`Route::NotFound`].
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Self::Main,
            "/login" => Self::Login,
            "/favorites" => Self::Favorites,
            "/404" => Self::NotFound,
            other => match other.strip_prefix("/offer/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::Offer(OfferId::new(id)),
                _ => Self::NotFound,
            },
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Main => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Offer(id) => format!("/offer/{id}"),
            Self::Favorites => "/favorites".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Main => "Cities",
            Self::Login => "Sign in",
            Self::Offer(_) => "Offer",
            Self::Favorites => "Saved listing",
            Self::NotFound => "Not found",
        }
    }

    /// Whether `status` may see this page.
    #[must_use]
    pub fn guard(&self, status: AuthorizationStatus) -> Access {
        match (self, status) {
            (Self::Favorites, AuthorizationStatus::Auth) => Access::Allow,
            (Self::Favorites, AuthorizationStatus::Unknown) => Access::Wait,
            (Self::Favorites, AuthorizationStatus::NoAuth) => Access::Redirect(Self::Login),
            (Self::Login, AuthorizationStatus::Auth) => Access::Redirect(Self::Main),
            _ => Access::Allow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    /// Authorization is still being checked.
    Wait,
    Redirect(Route),
}
