use chrono::Utc;
use leptos::*;

use crate::{
    auth::{inactivity::IdleState, IdleAction, InactivityMonitor},
    config,
    state::auth::{end_session, use_auth, use_identity_provider},
    utils::navigation,
};

pub const IDLE_SIGN_IN_PATH: &str = "/login?reason=idle";
const POLL_INTERVAL_SECS: u64 = 5;

/// Seconds left before expiry, shown only while the monitor is warning.
fn warning_seconds(monitor: &InactivityMonitor) -> Option<i64> {
    (monitor.state() == IdleState::Warned).then(|| monitor.remaining(Utc::now()).num_seconds())
}

#[cfg(target_arch = "wasm32")]
struct ActivityHooks {
    listeners: Vec<leptos::leptos_dom::helpers::WindowListenerHandle>,
    interval: Option<leptos::leptos_dom::helpers::IntervalHandle>,
}

#[cfg(target_arch = "wasm32")]
impl ActivityHooks {
    fn install(on_activity: impl Fn() + Clone + 'static, on_tick: impl Fn() + 'static) -> Self {
        let listeners = vec![
            window_event_listener(ev::mousemove, {
                let f = on_activity.clone();
                move |_| f()
            }),
            window_event_listener(ev::keydown, {
                let f = on_activity.clone();
                move |_| f()
            }),
            window_event_listener(ev::touchstart, {
                let f = on_activity.clone();
                move |_| f()
            }),
            window_event_listener(ev::scroll, move |_| on_activity()),
        ];
        let interval =
            set_interval_with_handle(on_tick, std::time::Duration::from_secs(POLL_INTERVAL_SECS))
                .map_err(|err| log::error!("failed to start idle poll: {:?}", err))
                .ok();
        Self {
            listeners,
            interval,
        }
    }

    fn remove(self) {
        for handle in self.listeners {
            handle.remove();
        }
        if let Some(interval) = self.interval {
            interval.clear();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
struct ActivityHooks;

#[cfg(not(target_arch = "wasm32"))]
impl ActivityHooks {
    fn install(_on_activity: impl Fn() + Clone + 'static, _on_tick: impl Fn() + 'static) -> Self {
        log::debug!(
            "idle hooks not installed outside the browser (poll every {}s)",
            POLL_INTERVAL_SECS
        );
        Self
    }

    fn remove(self) {}
}

/// Signs the user out after a period without input. Mounted once, inside
/// `AuthProvider`; does nothing while nobody is signed in.
#[component]
pub fn IdleWatcher() -> impl IntoView {
    let auth = use_auth();
    let provider = use_identity_provider();
    let monitor = store_value(InactivityMonitor::new(
        config::runtime().inactivity(),
        Utc::now(),
    ));
    let (warning, set_warning) = create_signal(None::<i64>);

    create_effect(move |was_authenticated: Option<bool>| {
        let authenticated = auth.get().is_authenticated();
        if authenticated && was_authenticated != Some(true) {
            monitor.update_value(|m| m.session_established(Utc::now()));
            set_warning.set(None);
        }
        authenticated
    });

    let on_activity = move || {
        let moved = monitor
            .try_update_value(|m| m.record_activity(Utc::now()))
            .unwrap_or(false);
        if moved && warning.get_untracked().is_some() {
            set_warning.set(None);
        }
    };

    let on_tick = move || {
        let authenticated = auth.get_untracked().is_authenticated();
        let action = monitor
            .try_update_value(|m| m.poll(Utc::now(), authenticated))
            .unwrap_or(IdleAction::None);
        match action {
            IdleAction::None => {
                let seconds = monitor.with_value(warning_seconds);
                if warning.get_untracked() != seconds {
                    set_warning.set(seconds);
                }
            }
            IdleAction::Warn => set_warning.set(monitor.with_value(warning_seconds)),
            IdleAction::Expire => {
                log::info!("session expired after inactivity");
                set_warning.set(None);
                let provider = provider.clone();
                spawn_local(async move {
                    if let Some(provider) = provider {
                        if let Err(err) = end_session(&*provider).await {
                            log::warn!("idle sign-out failed: {err}");
                        }
                    }
                    navigation::redirect(IDLE_SIGN_IN_PATH);
                });
            }
        }
    };

    let hooks = ActivityHooks::install(on_activity, on_tick);
    on_cleanup(move || hooks.remove());

    view! { <IdleWarning seconds_left=warning on_stay=Callback::new(move |_| on_activity())/> }
}

#[component]
pub fn IdleWarning(
    #[prop(into)] seconds_left: Signal<Option<i64>>,
    on_stay: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || seconds_left.get().is_some()>
            <div role="alert" class="fixed bottom-4 right-4 bg-status-warning-bg border border-status-warning-border text-status-warning-text px-4 py-3 rounded shadow">
                <p class="text-sm">
                    {move || format!(
                        "You will be signed out in {} seconds due to inactivity.",
                        seconds_left.get().unwrap_or_default()
                    )}
                </p>
                <button class="mt-2 text-sm font-medium underline" on:click=move |_| on_stay.call(())>
                    "Stay signed in"
                </button>
            </div>
        </Show>
    }
}
