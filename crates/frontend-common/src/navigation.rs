//! Full-page navigation through `window.location`

/// Path plus query of the current page
pub fn current_location() -> String {
    web_sys::window()
        .map(|w| w.location())
        .and_then(|location| {
            let path = location.pathname().ok()?;
            let search = location.search().unwrap_or_default();
            Some(format!("{path}{search}"))
        })
        .unwrap_or_else(|| "/".to_string())
}

pub fn navigate(target: &str) {
    if let Some(window) = web_sys::window()
        && let Err(err) = window.location().set_href(target)
    {
        tracing::warn!(target, ?err, "redirect failed");
    }
}
