use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

use crate::{components::layout::Layout, utils::navigation};

/// Target of the "view as provider" form, `None` for blank input.
pub fn provider_view_path(provider_id: &str) -> Option<String> {
    let id = provider_id.trim();
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(format!("/admin/providers/{}/appointments", id))
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let (provider_id, set_provider_id) = create_signal(String::new());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if let Some(path) = provider_view_path(&provider_id.get_untracked()) {
            navigation::redirect(&path);
        }
    };

    view! {
        <Layout>
            <div class="space-y-6">
                <h1 class="text-2xl font-bold text-fg">"Admin dashboard"</h1>
                <form class="bg-surface-elevated shadow rounded-lg p-6 space-y-3" on:submit=on_submit>
                    <label for="provider_id" class="block text-sm font-medium text-fg">
                        "View a provider's appointments"
                    </label>
                    <input
                        id="provider_id"
                        type="text"
                        class="block w-full px-3 py-2 border border-border rounded-md sm:text-sm"
                        placeholder="Provider id"
                        prop:value=provider_id
                        on:input=move |ev| {
                            let target = event_target::<HtmlInputElement>(&ev);
                            set_provider_id.set(target.value());
                        }
                    />
                    <button
                        type="submit"
                        class="px-4 py-2 text-sm font-medium rounded-md text-action-primary-text bg-action-primary-bg"
                    >
                        "Open"
                    </button>
                </form>
            </div>
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::provider_view_path;

    #[test]
    fn builds_impersonation_path() {
        assert_eq!(
            provider_view_path(" p7 ").as_deref(),
            Some("/admin/providers/p7/appointments")
        );
        assert_eq!(provider_view_path(""), None);
        assert_eq!(provider_view_path("p7/../x"), None);
    }
}
