//! Application context shared by every component

use crate::scheduler::GlooScheduler;
use crate::storage::BrowserStorage;
use crate::hooks::use_route_policy;
use mentorhub_core::{
    ConsentStore, NotificationCenter, RoutePolicy, SharedStore, ToastCenter, TokenStore,
};
use mentorhub_http::client::{ApiClient, ApiError};
use yew::prelude::*;

/// Engines and clients built once at startup and handed down through a
/// Yew context
#[derive(Clone)]
pub struct AppContext {
    pub tokens: TokenStore,
    pub api: ApiClient,
    pub notifications: NotificationCenter<GlooScheduler>,
    pub toasts: ToastCenter<GlooScheduler>,
    pub consent: ConsentStore,
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        self.notifications == other.notifications && self.toasts == other.toasts
    }
}

impl AppContext {
    /// Build every engine over `store`, with the API client pointed at the
    /// configured backend
    pub fn new(store: SharedStore) -> Result<Self, ApiError> {
        let tokens = TokenStore::new(store.clone());
        let api = ApiClient::from_env(tokens.clone())?;
        Ok(Self::with_client(store, api))
    }

    /// Build over `localStorage`
    pub fn browser() -> Result<Self, ApiError> {
        Self::new(BrowserStorage::shared())
    }

    /// Build around an existing client, sharing its token store
    pub fn with_client(store: SharedStore, api: ApiClient) -> Self {
        Self {
            tokens: api.tokens().clone(),
            notifications: NotificationCenter::new(store.clone(), GlooScheduler),
            toasts: ToastCenter::new(GlooScheduler),
            consent: ConsentStore::new(store),
            api,
        }
    }

    /// Surface a failed call as an error toast
    pub fn report(&self, err: &ApiError) {
        tracing::warn!(error = %err, "api request failed");
        self.toasts.error(err.user_message());
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProviderProps {
    pub children: Children,
    /// Prebuilt context; the browser context is built when absent
    #[prop_or_default]
    pub context: Option<AppContext>,
    /// Redirect policy applied to the page on load; `None` disables it
    #[prop_or_else(|| Some(RoutePolicy::default()))]
    pub route_policy: Option<RoutePolicy>,
}

#[derive(Properties, PartialEq)]
struct RoutePolicyGateProps {
    policy: RoutePolicy,
}

#[function_component(RoutePolicyGate)]
fn route_policy_gate(props: &RoutePolicyGateProps) -> Html {
    use_route_policy(props.policy.clone());
    Html::default()
}

#[function_component(AppProvider)]
pub fn app_provider(props: &AppProviderProps) -> Html {
    let context = {
        let injected = props.context.clone();
        use_memo((), move |_| match injected {
            Some(context) => Ok(context),
            None => AppContext::browser().map_err(|err| err.to_string()),
        })
    };

    match &*context {
        Ok(context) => html! {
            <ContextProvider<AppContext> context={context.clone()}>
                if let Some(policy) = props.route_policy.clone() {
                    <RoutePolicyGate {policy} />
                }
                {props.children.clone()}
            </ContextProvider<AppContext>>
        },
        Err(message) => {
            tracing::error!(%message, "failed to initialise application context");
            html! {
                <div class="p-6 text-red-700">{"Не удалось запустить приложение"}</div>
            }
        }
    }
}

/// Hook to use the application context
#[hook]
pub fn use_app() -> AppContext {
    use_context::<AppContext>()
        .expect("AppContext not found. Make sure to wrap your component with AppProvider")
}
