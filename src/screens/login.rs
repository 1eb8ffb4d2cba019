//! Login screen: credential form, error message and the login flow.

use tracing::info;

use crate::error::AuthError;
use crate::models::{Credentials, SessionToken};
use crate::navigation::Route;
use crate::session::SessionClient;

// ---

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    // ---
    pub credentials: Credentials,
    /// Last user-visible login error, if any.
    pub error_message: Option<String>,
}

#[derive(Debug)]
pub enum LoginEvent {
    UsernameChanged(String),
    PasswordChanged(String),
    LoginFinished(Result<SessionToken, AuthError>),
    /// The screen is being left for another route.
    NavigatedAway,
}

/// Pure state transition for the login form.
pub fn reduce(mut state: LoginState, event: LoginEvent) -> LoginState {
    // ---
    match event {
        LoginEvent::UsernameChanged(username) => state.credentials.username = username,
        LoginEvent::PasswordChanged(password) => state.credentials.password = password,
        LoginEvent::LoginFinished(Ok(_)) => {
            // Leaving the screen: the typed credentials go away with it.
            state.credentials = Credentials::default();
            state.error_message = None;
        }
        LoginEvent::LoginFinished(Err(err)) => state.error_message = Some(err.to_string()),
        LoginEvent::NavigatedAway => {
            state.credentials = Credentials::default();
            state.error_message = None;
        }
    }
    state
}

pub struct LoginScreen {
    // ---
    client: SessionClient,
    state: LoginState,
}

impl LoginScreen {
    // ---
    pub fn new(client: SessionClient) -> Self {
        Self {
            client,
            state: LoginState::default(),
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    pub fn dispatch(&mut self, event: LoginEvent) {
        self.state = reduce(std::mem::take(&mut self.state), event);
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.dispatch(LoginEvent::UsernameChanged(username.into()));
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.dispatch(LoginEvent::PasswordChanged(password.into()));
    }

    /// Submit the form.
    ///
    /// On success returns the graph route carrying the token. On failure the
    /// message lands in `state().error_message` and `None` is returned.
    pub async fn submit(&mut self) -> Option<Route> {
        // ---
        let Credentials { username, password } = &self.state.credentials;
        let result = self.client.authenticate(username, password).await;

        let route = match &result {
            Ok(token) => Some(Route::Graph {
                token: token.clone(),
            }),
            Err(_) => None,
        };

        self.dispatch(LoginEvent::LoginFinished(result));
        route
    }

    /// Leave for the registration screen. Typed credentials are discarded.
    pub fn go_to_registration(&mut self) -> Route {
        info!("Navigating to registration");
        self.dispatch(LoginEvent::NavigatedAway);
        Route::Registration
    }
}
