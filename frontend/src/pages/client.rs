use leptos::*;

use crate::{components::layout::Layout, state::auth::use_auth};

#[component]
pub fn ClientBookingPage() -> impl IntoView {
    let auth = use_auth();
    let greeting = move || {
        auth.get()
            .identity
            .map(|identity| format!("Welcome, {}", identity.display_name()))
            .unwrap_or_default()
    };

    view! {
        <Layout>
            <div class="space-y-4">
                <h1 class="text-2xl font-bold text-fg">"Book a visit"</h1>
                <p class="text-sm text-fg-muted">{greeting}</p>
            </div>
        </Layout>
    }
}
