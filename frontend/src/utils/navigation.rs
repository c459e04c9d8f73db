//! Full-page navigation helpers. Outside the browser (SSR, host tests) they
//! are inert: there is no location to read and redirects cannot be issued.

/// Path plus query string of the current page.
pub fn current_path() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(location) = web_sys::window().map(|w| w.location()) {
            let path = location.pathname().unwrap_or_else(|_| "/".into());
            let search = location.search().unwrap_or_default();
            return format!("{}{}", path, search);
        }
    }
    "/".to_string()
}

pub fn current_query() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            return window.location().search().unwrap_or_default();
        }
    }
    String::new()
}

pub fn redirect(target: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if location.pathname().ok().as_deref() == Some(target) {
                return;
            }
            let _ = location.set_href(target);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    log::debug!("redirect to {} skipped outside the browser", target);
}
