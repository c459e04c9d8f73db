use leptos::*;

use crate::components::{impersonation::use_view_scope, layout::Layout};

/// Appointment list header for whoever the current view scope points at.
/// Shared by the provider's own page and the admin's impersonated view.
#[component]
pub fn ProviderAppointmentsPanel() -> impl IntoView {
    let scope = use_view_scope();
    let owner = move || {
        scope
            .get()
            .map(|s| s.data_owner_id().to_string())
            .unwrap_or_default()
    };
    let acting_as = move || {
        scope.get().filter(|s| s.is_impersonating()).map(|s| {
            format!("Signed in as {}", s.authorized_identity().display_name())
        })
    };

    view! {
        <div class="space-y-4">
            <div>
                <h1 class="text-2xl font-bold text-fg">"Appointments"</h1>
                <p class="mt-1 text-sm text-fg-muted" data-owner=owner>
                    {move || format!("Provider {}", owner())}
                </p>
                <p class="text-xs text-fg-muted">{acting_as}</p>
            </div>
            <div class="bg-surface-elevated shadow rounded-lg p-6 text-sm text-fg-muted">
                "No upcoming appointments."
            </div>
        </div>
    }
}

#[component]
pub fn ProviderAppointmentsPage() -> impl IntoView {
    view! {
        <Layout>
            <ProviderAppointmentsPanel/>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::auth::{Role, SessionSnapshot};
    use crate::test_support::helpers::session_for;
    use crate::test_support::ssr::render_with_snapshot;

    #[test]
    fn provider_sees_own_data() {
        let snapshot = SessionSnapshot::resolved(Some(session_for("p1", Role::Provider)));
        let html = render_with_snapshot(snapshot, move || {
            view! { <ProviderAppointmentsPanel/> }
        });
        assert!(html.contains("Provider p1"));
        assert!(!html.contains("Signed in as"));
    }
}
