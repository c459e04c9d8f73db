pub mod api;
pub mod auth;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("logger init failed: {err}").into());
    }
    log::info!("starting sheduleApp frontend");

    // The Supabase client is built from the runtime config, so it must be
    // resolved before the app mounts.
    wasm_bindgen_futures::spawn_local(async move {
        let cfg = config::init().await;
        log::debug!("runtime config loaded for {}", cfg.supabase_url);
        router::mount_app();
    });
}
