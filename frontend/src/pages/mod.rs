pub mod admin;
pub mod client;
pub mod home;
pub mod login;
pub mod provider;

pub use admin::{AdminDashboardPage, AdminProviderAppointmentsPage};
pub use client::ClientBookingPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use provider::ProviderAppointmentsPage;
