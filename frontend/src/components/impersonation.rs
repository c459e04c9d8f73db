use chrono::Utc;
use leptos::*;

use crate::{
    auth::{guard, ImpersonationContext, SessionSnapshot, ViewScope},
    components::layout::LoadingSpinner,
    state::auth::use_auth,
    utils::navigation,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScopeState {
    Pending,
    Ready(ViewScope),
    Denied(String),
}

/// A context already opened by the same admin for the same target is kept,
/// so session refreshes do not restart the impersonation.
fn resolve_scope(
    snapshot: &SessionSnapshot,
    target_id: &str,
    previous: Option<&ScopeState>,
) -> ScopeState {
    if snapshot.loading {
        return ScopeState::Pending;
    }
    let Some(caller) = snapshot.identity.as_ref() else {
        return ScopeState::Denied(guard::sign_in_redirect(&navigation::current_path()));
    };
    if let Some(ScopeState::Ready(ViewScope::Impersonating(ctx))) = previous {
        if ctx.actor() == caller && ctx.target_id() == target_id {
            return ScopeState::Ready(ViewScope::Impersonating(ctx.clone()));
        }
    }
    match ImpersonationContext::begin(caller, target_id, Utc::now()) {
        Ok(ctx) => ScopeState::Ready(ViewScope::Impersonating(ctx)),
        Err(_) => ScopeState::Denied(caller.role.landing_path().to_string()),
    }
}

#[derive(Clone, Copy)]
struct ImpersonationHandle(Memo<ScopeState>);

/// Scopes the data shown by `children` to `target_id` for admin callers.
/// Anyone else gets nothing rendered and is sent away.
#[component]
pub fn ImpersonationScope(#[prop(into)] target_id: String, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let scope = create_memo(move |previous| resolve_scope(&auth.get(), &target_id, previous));
    provide_context(ImpersonationHandle(scope));

    create_effect(move |_| {
        if let ScopeState::Denied(target) = scope.get() {
            navigation::redirect(&target);
        }
    });

    let banner = move || match scope.get() {
        ScopeState::Ready(ViewScope::Impersonating(ctx)) => Some(view! {
            <div class="bg-status-warning-bg text-status-warning-text px-4 py-2 rounded mb-4 text-sm">
                "Viewing as provider " <span class="font-mono">{ctx.target_id().to_string()}</span>
            </div>
        }),
        _ => None,
    };

    view! {
        <Show
            when=move || matches!(scope.get(), ScopeState::Ready(_))
            fallback=move || {
                if matches!(scope.get(), ScopeState::Pending) {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {banner}
            {children()}
        </Show>
    }
}

/// Whose data the current subtree displays. Inside an `ImpersonationScope`
/// this is the impersonated provider; elsewhere it is the signed-in identity.
pub fn use_view_scope() -> Signal<Option<ViewScope>> {
    if let Some(ImpersonationHandle(scope)) = use_context::<ImpersonationHandle>() {
        return Signal::derive(move || match scope.get() {
            ScopeState::Ready(view_scope) => Some(view_scope),
            _ => None,
        });
    }
    let auth = use_auth();
    Signal::derive(move || auth.get().identity.map(ViewScope::Own))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::test_support::helpers::session_for;

    #[test]
    fn admin_gets_impersonating_scope() {
        let snapshot = SessionSnapshot::resolved(Some(session_for("admin-1", Role::Admin)));
        match resolve_scope(&snapshot, "p7", None) {
            ScopeState::Ready(scope) => {
                assert_eq!(scope.data_owner_id(), "p7");
                assert_eq!(scope.authorized_identity().id, "admin-1");
            }
            other => panic!("expected ready scope, got {:?}", other),
        }
    }

    #[test]
    fn provider_is_denied_and_sent_home() {
        let snapshot = SessionSnapshot::resolved(Some(session_for("p1", Role::Provider)));
        assert_eq!(
            resolve_scope(&snapshot, "p7", None),
            ScopeState::Denied("/provider/appointments".into())
        );
    }

    #[test]
    fn unresolved_session_is_pending() {
        assert_eq!(
            resolve_scope(&SessionSnapshot::initial(), "p7", None),
            ScopeState::Pending
        );
    }

    #[test]
    fn token_refresh_keeps_the_open_context() {
        let session = session_for("admin-1", Role::Admin);
        let first = resolve_scope(&SessionSnapshot::resolved(Some(session.clone())), "p7", None);

        let mut refreshed = session;
        refreshed.access_token = "rotated".into();
        refreshed.expires_at = refreshed.expires_at + chrono::Duration::hours(1);
        let snapshot = SessionSnapshot::resolved(Some(refreshed));
        let second = resolve_scope(&snapshot, "p7", Some(&first));
        assert_eq!(second, first);

        let retargeted = resolve_scope(&snapshot, "p8", Some(&first));
        match retargeted {
            ScopeState::Ready(scope) => assert_eq!(scope.data_owner_id(), "p8"),
            other => panic!("expected ready scope, got {:?}", other),
        }
    }

    #[test]
    fn previous_context_is_dropped_when_caller_changes() {
        let admin = SessionSnapshot::resolved(Some(session_for("admin-1", Role::Admin)));
        let first = resolve_scope(&admin, "p7", None);
        let provider = SessionSnapshot::resolved(Some(session_for("p1", Role::Provider)));
        assert_eq!(
            resolve_scope(&provider, "p7", Some(&first)),
            ScopeState::Denied("/provider/appointments".into())
        );
    }
}
