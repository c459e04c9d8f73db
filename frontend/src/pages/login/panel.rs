use crate::{
    auth::guard,
    components::layout::ErrorMessage,
    pages::login::utils,
    state::auth::{self, Credentials},
    utils::navigation,
};
use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

const INPUT_CLASS: &str = "appearance-none relative block w-full px-3 py-2 border border-border placeholder-fg-muted text-fg rounded-md focus:outline-none focus:ring-action-primary-bg focus:border-action-primary-bg sm:text-sm";

#[component]
pub fn LoginPanel() -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let notice = utils::sign_out_notice(&navigation::current_query());

    let session = auth::use_auth();
    let login_action = auth::use_login_action();
    let pending = login_action.pending();

    // Visiting the sign-in page with a live session goes straight on.
    create_effect(move |_| {
        if let Some(identity) = session.get().identity {
            let redirect_to = guard::redirect_param(&navigation::current_query());
            navigation::redirect(&guard::post_login_destination(
                &identity,
                redirect_to.as_deref(),
            ));
        }
    });

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(session) => {
                    set_error.set(None);
                    set_password.set(String::new());
                    let redirect_to = guard::redirect_param(&navigation::current_query());
                    navigation::redirect(&guard::post_login_destination(
                        &session.identity,
                        redirect_to.as_deref(),
                    ));
                }
                Err(err) => {
                    log::info!("sign-in rejected: {err}");
                    set_error.set(Some(err.user_message().to_string()));
                }
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email = email.get_untracked();
        let password = password.get_untracked();
        if let Err(msg) = utils::validate_credentials(&email, &password) {
            set_error.set(Some(msg));
            return;
        }
        set_error.set(None);
        login_action.dispatch(Credentials { email, password });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">
                    "Sign in to sheduleApp"
                </h2>
                {notice.map(|text| view! {
                    <div class="bg-status-warning-bg border border-status-warning-border text-status-warning-text px-4 py-3 rounded text-sm">
                        {text}
                    </div>
                })}
                <form class="mt-8 space-y-4" on:submit=on_submit>
                    <div>
                        <label for="email" class="sr-only">"Email"</label>
                        <input
                            id="email"
                            name="email"
                            type="email"
                            autocomplete="email"
                            required
                            class=INPUT_CLASS
                            placeholder="Email"
                            prop:value=email
                            on:input=move |ev| {
                                let target = event_target::<HtmlInputElement>(&ev);
                                set_email.set(target.value());
                            }
                        />
                    </div>
                    <div>
                        <label for="password" class="sr-only">"Password"</label>
                        <input
                            id="password"
                            name="password"
                            type="password"
                            autocomplete="current-password"
                            required
                            class=INPUT_CLASS
                            placeholder="Password"
                            prop:value=password
                            on:input=move |ev| {
                                let target = event_target::<HtmlInputElement>(&ev);
                                set_password.set(target.value());
                            }
                        />
                    </div>

                    {move || error.get().map(|message| view! { <ErrorMessage message=message/> })}

                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full flex justify-center py-2 px-4 border border-transparent text-sm font-medium rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg_hover disabled:opacity-50"
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_email_and_password_fields() {
        let html = render_to_string(move || view! { <LoginPanel/> });
        assert!(html.contains("id=\"email\""));
        assert!(html.contains("id=\"password\""));
        assert!(html.contains("Sign in"));
        assert!(!html.contains("inactivity"));
    }
}
