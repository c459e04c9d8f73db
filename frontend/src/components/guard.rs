use crate::{
    auth::{guard, GuardDecision, Role},
    components::layout::LoadingSpinner,
    state::auth::use_auth,
    utils::navigation,
};
use leptos::*;

/// Renders `children` only for identities holding `role`. The decision is a
/// memo over the session snapshot, so a session ending mid-visit redirects
/// as well.
#[component]
pub fn RequireRole(role: Role, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let decision =
        create_memo(move |_| guard::evaluate(&auth.get(), role, &navigation::current_path()));
    create_effect(move |_| {
        if let GuardDecision::Redirect(target) = decision.get() {
            navigation::redirect(&target);
        }
    });
    view! {
        <Show
            when=move || decision.get().is_allow()
            fallback=move || {
                if decision.get().is_pending() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}
