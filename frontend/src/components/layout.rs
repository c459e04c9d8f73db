use crate::{
    auth::{Identity, Role},
    state::auth::{self, use_auth},
    utils::navigation,
};
use leptos::*;

const NAV_LINK: &str = "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

/// Links shown in the header for a signed-in identity.
pub fn nav_links(identity: &Identity) -> Vec<(&'static str, &'static str)> {
    match identity.role {
        Role::Admin => vec![("/admin/dashboard", "Dashboard")],
        Role::Provider => vec![("/provider/appointments", "Appointments")],
        Role::Client => vec![("/client/booking", "Book a visit")],
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let logout_action = auth::use_logout_action();
    let logout_pending = logout_action.pending();

    create_effect(move |_| {
        if let Some(result) = logout_action.value().get() {
            if let Err(err) = result {
                log::warn!("sign-out finished with error: {err}");
            }
            navigation::redirect(crate::auth::guard::SIGN_IN_PATH);
        }
    });

    let on_logout = move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        logout_action.dispatch(());
    };

    let links = move || {
        auth.get()
            .identity
            .as_ref()
            .map(nav_links)
            .unwrap_or_default()
            .into_iter()
            .map(|(href, label)| view! { <a href=href class=NAV_LINK>{label}</a> })
            .collect_view()
    };
    let who = move || {
        auth.get()
            .identity
            .map(|identity| format!("{} ({})", identity.display_name(), identity.role))
    };

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">"sheduleApp"</h1>
                    <nav class="flex items-center space-x-4">
                        {links}
                        <Show when=move || auth.get().is_authenticated()>
                            <span class="text-sm text-fg-muted">{who}</span>
                            <button
                                on:click=on_logout
                                class=format!("{NAV_LINK} disabled:opacity-50")
                                disabled=move || logout_pending.get()
                            >
                                "Sign out"
                            </button>
                        </Show>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}
