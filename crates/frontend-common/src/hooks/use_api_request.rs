//! One-shot API request bound to a component's lifetime

use crate::context::use_app;
use mentorhub_http::client::{ApiClient, ApiError};
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// A failed request as shown to the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestFailure {
    pub message: String,
    /// The caller should send the user to the login page
    pub unauthorized: bool,
}

impl From<&ApiError> for RequestFailure {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.user_message(),
            unauthorized: err.is_unauthorized(),
        }
    }
}

/// Loading, data or error
#[derive(Clone, Debug, PartialEq)]
pub enum RequestState<T> {
    Loading,
    Ready(T),
    Failed(RequestFailure),
}

impl<T> RequestState<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::Ready(data),
            Err(err) => Self::Failed(RequestFailure::from(&err)),
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub const fn error(&self) -> Option<&RequestFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Run `fetch` whenever `deps` change. A result that arrives after the
/// component unmounted, or after `deps` changed again, is dropped.
#[hook]
pub fn use_api_request<T, D, F, Fut>(deps: D, fetch: F) -> UseStateHandle<RequestState<T>>
where
    T: 'static,
    D: PartialEq + Clone + 'static,
    F: FnOnce(ApiClient, D) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let api = use_app().api;
    let state = use_state(|| RequestState::Loading);

    {
        let state = state.clone();
        use_effect_with(deps, move |deps| {
            let mounted = Rc::new(Cell::new(true));
            if !state.is_loading() {
                state.set(RequestState::Loading);
            }

            let request = fetch(api, deps.clone());
            let alive = mounted.clone();
            spawn_local(async move {
                let result = request.await;
                if alive.get() {
                    state.set(RequestState::from_result(result));
                } else {
                    tracing::debug!("discarding response for unmounted component");
                }
            });

            move || mounted.set(false)
        });
    }

    state
}
