use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::shared::config::AppConfig;
use crate::shared::icons::icon;
use crate::system::auth::api::sign_out;
use crate::system::auth::client::AuthClient;

/// Разделы консоли: (путь, подпись, иконка)
pub const SECTIONS: [(&str, &str, &str); 5] = [
    ("/orders", "Заказы", "orders"),
    ("/administrators", "Администраторы", "administrators"),
    ("/ingredients", "Ингредиенты", "ingredients"),
    ("/menu", "Меню", "menu"),
    ("/promocodes", "Промокоды", "promocodes"),
];

#[component]
pub fn Header() -> impl IntoView {
    let on_logout = move |_: leptos::ev::MouseEvent| {
        let client = AuthClient::browser(&AppConfig::current());
        spawn_local(async move {
            sign_out(&client).await;
        });
    };

    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                <span class="header__title">"Админ-панель"</span>
                <nav class="header__nav">
                    {SECTIONS
                        .iter()
                        // активный раздел подсвечивается через aria-current
                        .map(|&(path, label, icon_name)| {
                            view! {
                                <A href=path>
                                    {icon(icon_name)}
                                    <span>{label}</span>
                                </A>
                            }
                        })
                        .collect_view()}
                </nav>
            </div>
            <div class="header__actions">
                <button class="button button--ghost" aria-label="Выйти" on:click=on_logout>
                    {icon("logout")}
                    "Выйти"
                </button>
            </div>
        </header>
    }
}
