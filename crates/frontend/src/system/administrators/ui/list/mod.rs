use contracts::system::administrators::{Administrator, CreateAdministratorDto};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;

use crate::shared::config::AppConfig;
use crate::shared::dialogs::{alert, confirm};
use crate::shared::form_utils::validate_form;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::scheduler::BrowserScheduler;
use crate::shared::sync::ListSynchronizer;
use crate::system::administrators::api::{
    create_administrator, delete_administrator, AdministratorsSource, CREATE_FAILED,
};
use crate::system::auth::client::AuthClient;

#[component]
#[allow(non_snake_case)]
pub fn AdministratorsList() -> impl IntoView {
    let Some(client) = AuthClient::for_page() else {
        return view! { <></> }.into_any();
    };

    let version = RwSignal::new(0u64);
    let show_form = RwSignal::new(false);
    let name = RwSignal::new(String::new());
    let login = RwSignal::new(String::new());
    let secret_key = RwSignal::new(String::new());
    let form_ref = NodeRef::<html::Form>::new();

    let synchronizer = ListSynchronizer::new(
        AdministratorsSource::new(client),
        Rc::new(BrowserScheduler),
        AppConfig::current().save_ack(),
    );
    synchronizer.on_change(move || version.update(|v| *v += 1));
    let sync = StoredValue::new_local(synchronizer);

    let reload = move || {
        let sync = sync.get_value();
        spawn_local(async move {
            let _ = sync.refresh().await;
        });
    };
    reload();

    let open_new = move || {
        name.set(String::new());
        login.set(String::new());
        secret_key.set(String::new());
        show_form.set(true);
    };

    let on_save = move |_: leptos::ev::MouseEvent| {
        let Some(element) = form_ref.get() else {
            return;
        };
        if validate_form(&element).is_err() {
            return;
        }
        let dto = CreateAdministratorDto {
            name: name.get_untracked(),
            login: login.get_untracked(),
            secret_key: secret_key.get_untracked(),
        };
        let sync = sync.get_value();
        spawn_local(async move {
            match create_administrator(sync.source().client(), &dto).await {
                Ok(()) => {
                    show_form.set(false);
                    let _ = sync.refresh().await;
                }
                Err(e) if e.is_auth_expired() => {}
                Err(e) => {
                    log::error!("Administrator {} not created: {}", dto.login, e);
                    alert(CREATE_FAILED);
                }
            }
        });
    };

    let remove = move |login: String| {
        if !confirm(&format!(
            "Вы уверены, что хотите удалить администратора {}?",
            login
        )) {
            return;
        }
        let sync = sync.get_value();
        spawn_local(async move {
            match delete_administrator(sync.source().client(), &login).await {
                Ok(()) => log::info!("Administrator {} deleted", login),
                Err(e) if e.is_auth_expired() => return,
                Err(e) => log::error!("Administrator {} not deleted: {}", login, e),
            }
            let _ = sync.refresh().await;
        });
    };

    let session_line = move || {
        version.track();
        sync.with_value(|s| s.source().current_login())
            .map(|current| format!("Текущий сеанс: {}", current))
    };

    let cards = move || {
        version.track();
        sync.with_value(|s| {
            let source = s.source();
            s.with_view(|v| {
                v.rows()
                    .iter()
                    .map(|row| {
                        let admin = row.record().clone();
                        let is_current = source.is_current(&admin.login);
                        (row.generation(), admin, is_current)
                    })
                    .collect::<Vec<_>>()
            })
        })
    };

    view! {
        <PageFrame
            page_id="administrators--list"
            title="Администраторы"
            actions=move || view! {
                <button class="button button--primary" on:click=move |_| open_new()>
                    {icon("plus")}
                    "Добавить администратора"
                </button>
            }
        >
            <p class="page__subtitle">{session_line}</p>
            <div class="cards">
                <For
                    each=cards
                    key=|(generation, admin, is_current)| (admin.login.clone(), *generation, *is_current)
                    children=move |(_, admin, is_current): (u64, Administrator, bool)| {
                        let class = if is_current {
                            "admin-card admin-card--current"
                        } else {
                            "admin-card"
                        };
                        let login_line = format!("Логин: {}", admin.login);
                        let login = admin.login;
                        view! {
                            <div class=class>
                                <Card>
                                    {is_current.then(|| view! {
                                        <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Brand>
                                            "Вы"
                                        </Badge>
                                    })}
                                    <h5 class="admin-card__title">{admin.name}</h5>
                                    <p class="admin-card__text">{login_line}</p>
                                    // свою учётную запись удалить нельзя
                                    {(!is_current).then(|| view! {
                                        <button
                                            class="button button--danger button--small"
                                            on:click=move |_| remove(login.clone())
                                        >
                                            {icon("delete")}
                                            "Удалить"
                                        </button>
                                    })}
                                </Card>
                            </div>
                        }
                    }
                />
            </div>

            <Dialog open=show_form>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>"Новый администратор"</DialogTitle>
                        <DialogContent>
                            <form class="form" node_ref=form_ref on:submit=|ev| ev.prevent_default()>
                                <div class="form__group">
                                    <label class="form__label" for="name">"Имя"</label>
                                    <input class="input" id="name" type="text" required bind:value=name />
                                </div>
                                <div class="form__group">
                                    <label class="form__label" for="login">"Логин"</label>
                                    <input class="input" id="login" type="text" required bind:value=login />
                                </div>
                                <div class="form__group">
                                    <label class="form__label" for="secret-key">"Секретный ключ"</label>
                                    <input
                                        class="input"
                                        id="secret-key"
                                        type="password"
                                        required
                                        bind:value=secret_key
                                    />
                                </div>
                            </form>
                        </DialogContent>
                        <DialogActions>
                            <Button appearance=ButtonAppearance::Primary on_click=on_save>
                                "Сохранить"
                            </Button>
                            <Button appearance=ButtonAppearance::Subtle on_click=move |_| show_form.set(false)>
                                "Отмена"
                            </Button>
                        </DialogActions>
                    </DialogBody>
                </DialogSurface>
            </Dialog>
        </PageFrame>
    }
    .into_any()
}
