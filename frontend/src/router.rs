use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    auth::Role,
    components::{guard::RequireRole, idle::IdleWatcher},
    pages::{
        AdminDashboardPage, AdminProviderAppointmentsPage, ClientBookingPage, HomePage,
        LoginPage, ProviderAppointmentsPage,
    },
    state::auth::AuthProvider,
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/login",
    "/admin/dashboard",
    "/admin/providers/:provider_id/appointments",
    "/provider/appointments",
    "/client/booking",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    "/admin/dashboard",
    "/admin/providers/:provider_id/appointments",
    "/provider/appointments",
    "/client/booking",
];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/login"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    view! {
        <Title text="sheduleApp"/>
        <AuthProvider>
            <IdleWatcher/>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/admin/dashboard" view=ProtectedAdminDashboard/>
                    <Route path="/admin/providers/:provider_id/appointments" view=ProtectedProviderAsAdmin/>
                    <Route path="/provider/appointments" view=ProtectedProviderAppointments/>
                    <Route path="/client/booking" view=ProtectedClientBooking/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ProtectedAdminDashboard() -> impl IntoView {
    view! { <RequireRole role=Role::Admin><AdminDashboardPage/></RequireRole> }
}

#[component]
fn ProtectedProviderAsAdmin() -> impl IntoView {
    view! { <RequireRole role=Role::Admin><AdminProviderAppointmentsPage/></RequireRole> }
}

#[component]
fn ProtectedProviderAppointments() -> impl IntoView {
    view! { <RequireRole role=Role::Provider><ProviderAppointmentsPage/></RequireRole> }
}

#[component]
fn ProtectedClientBooking() -> impl IntoView {
    view! { <RequireRole role=Role::Client><ClientBookingPage/></RequireRole> }
}
