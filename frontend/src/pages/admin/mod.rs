use leptos::*;
use leptos_router::use_params_map;

use crate::{
    components::{impersonation::ImpersonationScope, layout::Layout},
    pages::provider::ProviderAppointmentsPanel,
};

mod dashboard;

pub use dashboard::AdminDashboardPage;

/// `/admin/providers/:provider_id/appointments`: the provider's appointments
/// page, read through the admin's impersonation scope.
#[component]
pub fn AdminProviderAppointmentsPage() -> impl IntoView {
    let params = use_params_map();
    let provider_id = move || params.with(|p| p.get("provider_id").cloned().unwrap_or_default());

    view! {
        <Layout>
            {move || {
                let target_id = provider_id();
                view! {
                    <ImpersonationScope target_id=target_id>
                        <ProviderAppointmentsPanel/>
                    </ImpersonationScope>
                }
            }}
        </Layout>
    }
}
