use six_cities_types::AuthorizationStatus;

use super::action::{Action, AuthAction};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub authorization_status: AuthorizationStatus,
    pub user_email: Option<String>,
    /// Last login failure, shown on the login page.
    pub error: Option<String>,
}

pub fn reduce(state: AuthState, action: &Action) -> AuthState {
    let Action::Auth(action) = action else {
        return state;
    };

    match action {
        AuthAction::SetAuthorizationStatus(status) => AuthState {
            authorization_status: *status,
            error: if status.is_auth() { None } else { state.error },
            ..state
        },
        AuthAction::SetUserEmail(email) => AuthState {
            user_email: email.clone(),
            ..state
        },
        AuthAction::LoginFailure(message) => AuthState {
            error: Some(message.clone()),
            ..state
        },
    }
}
