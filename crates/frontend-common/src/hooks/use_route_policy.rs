//! Site-wide redirects for protected sections and the login page

use crate::context::use_app;
use crate::navigation::{current_location, navigate};
use mentorhub_core::{RouteDecision, RoutePolicy, TokenStore};
use yew::prelude::*;

/// Where `location` should be sent, if anywhere
pub fn route_redirect(policy: &RoutePolicy, tokens: &TokenStore, location: &str) -> Option<String> {
    match policy.check(tokens, location) {
        RouteDecision::Allow => None,
        RouteDecision::Redirect(target) => Some(target),
    }
}

/// Apply [`RoutePolicy`] to the current page once on mount. Anonymous
/// visitors of protected sections go to the login page and signed-in
/// visitors of the login page go to the dashboard.
#[hook]
pub fn use_route_policy(policy: RoutePolicy) -> Option<String> {
    let tokens = use_app().tokens;
    let redirect = use_state(|| None::<String>);

    {
        let redirect = redirect.clone();
        use_effect_with((), move |_| {
            let target = route_redirect(&policy, &tokens, &current_location());
            if let Some(target) = &target {
                navigate(target);
            }
            redirect.set(target);
        });
    }

    (*redirect).clone()
}
