//! Gate for pages that need a signed-in user

use super::LoadingSpinner;
use crate::context::use_app;
use crate::navigation::{current_location, navigate};
use mentorhub_core::GuardState;
use mentorhub_core::guard::{AuthGuard as GuardPolicy, LOGIN_PATH};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AuthGuardProps {
    pub children: Children,
    #[prop_or(true)]
    pub require_auth: bool,
    #[prop_or_else(|| LOGIN_PATH.to_string())]
    pub login_path: String,
    /// Shown instead of the default prompt while the redirect happens
    #[prop_or_default]
    pub fallback: Option<Html>,
    /// Send blocked visitors to the login page; off leaves them on the
    /// fallback
    #[prop_or(true)]
    pub redirect: bool,
}

/// Renders a neutral checking view first, then either the children or a
/// sign-in prompt while redirecting to the login page
#[function_component(AuthGuard)]
pub fn auth_guard(props: &AuthGuardProps) -> Html {
    let app = use_app();
    let state = use_state(|| GuardState::Checking);

    {
        let state = state.clone();
        let tokens = app.tokens.clone();
        use_effect_with(
            (props.require_auth, props.login_path.clone(), props.redirect),
            move |(require_auth, login_path, follow)| {
                let next = GuardPolicy::new()
                    .require_auth(*require_auth)
                    .login_path(login_path.clone())
                    .check(&tokens, &current_location());
                if *follow && let GuardState::Unauthorized { redirect } = &next {
                    navigate(redirect);
                }
                state.set(next);
            },
        );
    }

    match &*state {
        GuardState::Checking => html! { <LoadingSpinner /> },
        GuardState::Authorized => html! { <>{props.children.clone()}</> },
        GuardState::Unauthorized { redirect } => props.fallback.clone().unwrap_or_else(|| {
            html! {
                <div class="flex flex-col items-center justify-center min-h-[200px] gap-3">
                    <p class="text-gray-700">{"Для просмотра этой страницы необходимо войти"}</p>
                    <a class="text-indigo-600 hover:underline" href={redirect.clone()}>{"Войти"}</a>
                </div>
            }
        }),
    }
}
