use leptos::*;

use crate::auth::SessionSnapshot;

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(|| view().into_view().render_to_string().to_string());
    leptos_reactive::suppress_resource_load(false);
    html
}

/// Renders `view` with `snapshot` provided the way `AuthProvider` provides it.
pub fn render_with_snapshot<F, N>(snapshot: SessionSnapshot, view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    render_to_string(move || {
        let (auth, _set_auth) = create_signal(snapshot);
        provide_context(auth);
        view()
    })
}
