//! Access gating for protected pages

use crate::token::TokenStore;

/// Default login page
pub const LOGIN_PATH: &str = "/auth/login";

/// Where authenticated visitors of the login page are sent
pub const HOME_AFTER_LOGIN: &str = "/dashboard";

/// Route prefixes that need a token
pub const PROTECTED_ROUTES: &[&str] = &[
    "/dashboard",
    "/profile",
    "/settings",
    "/messages",
    "/notifications",
    "/sessions",
    "/booking",
    "/learning",
    "/stats",
    "/achievements",
    "/billing",
    "/payment",
];

/// Build `"{login_path}?redirect={return_to}"` with the return target
/// percent-encoded
pub fn login_redirect(login_path: &str, return_to: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(return_to.as_bytes()).collect();
    format!("{login_path}?redirect={encoded}")
}

/// Guard state. `Checking` is rendered first so protected content never
/// flashes before the token lookup completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authorized,
    Unauthorized { redirect: String },
}

impl GuardState {
    pub const fn renders_children(&self) -> bool {
        matches!(self, Self::Authorized)
    }
}

/// Decides whether wrapped content may render
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthGuard {
    require_auth: bool,
    login_path: String,
}

impl Default for AuthGuard {
    fn default() -> Self {
        Self {
            require_auth: true,
            login_path: LOGIN_PATH.to_string(),
        }
    }
}

impl AuthGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Without this the guard passes everything through
    #[must_use]
    pub const fn require_auth(mut self, require: bool) -> Self {
        self.require_auth = require;
        self
    }

    #[must_use]
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub const fn initial_state(&self) -> GuardState {
        GuardState::Checking
    }

    /// Resolve `Checking` into a final state for a visitor at `current_path`
    pub fn check(&self, tokens: &TokenStore, current_path: &str) -> GuardState {
        if !self.require_auth || tokens.is_authenticated() {
            return GuardState::Authorized;
        }
        let redirect = login_redirect(&self.login_path, current_path);
        tracing::info!(path = current_path, "unauthenticated access, redirecting to login");
        GuardState::Unauthorized { redirect }
    }
}

/// Outcome of a route policy check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

/// Site-wide navigation policy: protected sections bounce anonymous
/// visitors to the login page, and signed-in visitors skip the login page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePolicy {
    protected: Vec<String>,
    login_path: String,
    home: String,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            protected: PROTECTED_ROUTES.iter().map(|r| (*r).to_string()).collect(),
            login_path: LOGIN_PATH.to_string(),
            home: HOME_AFTER_LOGIN.to_string(),
        }
    }
}

impl RoutePolicy {
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn decide(&self, path: &str, authenticated: bool) -> RouteDecision {
        if !authenticated && self.is_protected(path) {
            return RouteDecision::Redirect(login_redirect(&self.login_path, path));
        }
        if authenticated && path.starts_with(self.login_path.as_str()) {
            return RouteDecision::Redirect(self.home.clone());
        }
        RouteDecision::Allow
    }

    /// `decide` for whoever holds `tokens`
    pub fn check(&self, tokens: &TokenStore, path: &str) -> RouteDecision {
        let decision = self.decide(path, tokens.is_authenticated());
        if let RouteDecision::Redirect(target) = &decision {
            tracing::debug!(path, target = target.as_str(), "route policy redirect");
        }
        decision
    }
}
