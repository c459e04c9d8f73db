use std::rc::Rc;

use leptos::*;

use crate::{
    api::{LocalSessionStorage, SupabaseAuth},
    auth::{
        AuthError, IdentityProvider, Session, SessionBridge, SessionSnapshot, SessionStore,
        Subscription,
    },
    config,
};

pub type AppAuth = SupabaseAuth<LocalSessionStorage>;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Keeps a signal in step with the store. The signal is only ever written
/// from here, so the bridge stays the single writer of session state.
pub fn mirror_store(store: &SessionStore, set_snapshot: WriteSignal<SessionSnapshot>) -> Subscription {
    set_snapshot.set(store.snapshot());
    store.subscribe(move |snapshot| set_snapshot.set(snapshot.clone()))
}

#[cfg(target_arch = "wasm32")]
type RefreshTicker = gloo_timers::callback::Interval;
#[cfg(not(target_arch = "wasm32"))]
type RefreshTicker = ();

#[cfg(target_arch = "wasm32")]
fn start_refresh_ticker(provider: Rc<AppAuth>) -> Option<RefreshTicker> {
    const REFRESH_TICK_MS: u32 = 30_000;
    Some(gloo_timers::callback::Interval::new(REFRESH_TICK_MS, move || {
        let provider = Rc::clone(&provider);
        spawn_local(async move {
            if let Err(err) = provider.refresh_if_expiring().await {
                log::warn!("background token refresh failed: {err}");
            }
        });
    }))
}

#[cfg(not(target_arch = "wasm32"))]
fn start_refresh_ticker(_provider: Rc<AppAuth>) -> Option<RefreshTicker> {
    None
}

fn create_auth_context(provider: Rc<AppAuth>) -> ReadSignal<SessionSnapshot> {
    let store = SessionStore::new();
    let (snapshot, set_snapshot) = create_signal(store.snapshot());
    let mirror = mirror_store(&store, set_snapshot);
    let bridge = SessionBridge::new(store);

    {
        let bridge = bridge.clone();
        let provider = Rc::clone(&provider);
        spawn_local(async move {
            bridge.activate(&*provider).await;
        });
    }
    let ticker = start_refresh_ticker(provider);

    on_cleanup(move || {
        bridge.deactivate();
        mirror.cancel();
        let _stopped = ticker;
    });

    snapshot
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let settings = config::runtime();
    let provider = Rc::new(SupabaseAuth::new(
        settings.supabase_url.clone(),
        settings.supabase_anon_key.clone(),
        LocalSessionStorage::for_project(&settings.supabase_url),
    ));
    let snapshot = create_auth_context(Rc::clone(&provider));
    provide_context(provider);
    provide_context(snapshot);
    view! { <>{children()}</> }
}

/// Read-only view of the session. Outside an `AuthProvider` this stays in
/// the loading state forever.
pub fn use_auth() -> ReadSignal<SessionSnapshot> {
    use_context::<ReadSignal<SessionSnapshot>>()
        .unwrap_or_else(|| create_signal(SessionSnapshot::default()).0)
}

pub fn use_identity_provider() -> Option<Rc<AppAuth>> {
    use_context::<Rc<AppAuth>>()
}

fn not_initialised() -> AuthError {
    AuthError::ProviderUnavailable("auth provider not mounted".into())
}

/// Explicit sign-out and idle expiry share this path; the snapshot is
/// cleared by the provider's `SignedOut` notification.
pub async fn end_session<P>(provider: &P) -> Result<(), AuthError>
where
    P: IdentityProvider + ?Sized,
{
    provider.sign_out().await
}

pub fn use_login_action() -> Action<Credentials, Result<Session, AuthError>> {
    let provider = use_identity_provider();
    create_action(move |credentials: &Credentials| {
        let provider = provider.clone();
        let credentials = credentials.clone();
        async move {
            match provider {
                Some(provider) => {
                    provider
                        .sign_in_with_password(credentials.email.trim(), &credentials.password)
                        .await
                }
                None => Err(not_initialised()),
            }
        }
    })
}

pub fn use_logout_action() -> Action<(), Result<(), AuthError>> {
    let provider = use_identity_provider();
    create_action(move |_: &()| {
        let provider = provider.clone();
        async move {
            match provider {
                Some(provider) => end_session(&*provider).await,
                None => Err(not_initialised()),
            }
        }
    })
}
