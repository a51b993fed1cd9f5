use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::config::AppConfig;
use crate::system::auth::api::{sign_in, skip_sign_in_if_signed_in};
use crate::system::auth::client::AuthClient;
use crate::system::auth::session::HOME_PATH;

#[component]
pub fn LoginPage() -> impl IntoView {
    let client = AuthClient::browser(&AppConfig::current());
    // уже вошли: сразу в консоль
    let redirected = skip_sign_in_if_signed_in(&client);

    let login = RwSignal::new(String::new());
    let secret_key = RwSignal::new(String::new());
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);
    let client = StoredValue::new_local(client);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let login_val = login.get_untracked();
        let secret_val = secret_key.get_untracked();

        is_loading.set(true);
        error_message.set(None);

        let client = client.get_value();
        spawn_local(async move {
            match sign_in(&client, &login_val, &secret_val).await {
                Ok(_) => client.session().navigator().go_to(HOME_PATH),
                Err(message) => {
                    error_message.set(Some(message));
                    is_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-container">
            <Show when=move || !redirected>
                <div class="login-box">
                    <h1>"Админ-панель"</h1>
                    <h2>"Вход в систему"</h2>

                    <Show when=move || error_message.get().is_some()>
                        <div class="error-message">
                            {move || error_message.get().unwrap_or_default()}
                        </div>
                    </Show>

                    <form on:submit=on_submit>
                        <div class="form-group">
                            <label for="login">"Логин"</label>
                            <input
                                type="text"
                                id="login"
                                bind:value=login
                                required
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <div class="form-group">
                            <label for="secret-key">"Секретный ключ"</label>
                            <input
                                type="password"
                                id="secret-key"
                                bind:value=secret_key
                                required
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <button
                            type="submit"
                            class="btn-primary"
                            disabled=move || is_loading.get()
                        >
                            {move || if is_loading.get() { "Вход..." } else { "Войти" }}
                        </button>
                    </form>
                </div>
            </Show>
        </div>
    }
}
