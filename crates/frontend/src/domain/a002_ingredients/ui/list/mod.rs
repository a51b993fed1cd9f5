use contracts::domain::a002_ingredients::aggregate::Ingredient;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

use crate::domain::a002_ingredients::api::{create_ingredient, delete_ingredient, IngredientsSource};
use crate::domain::a002_ingredients::editable::{FIELD_NAME, FIELD_PRICE};
use crate::shared::config::AppConfig;
use crate::shared::dialogs::confirm;
use crate::shared::form_utils::validate_form;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::row_editor::SaveState;
use crate::shared::scheduler::BrowserScheduler;
use crate::shared::sync::ListSynchronizer;
use crate::system::auth::client::AuthClient;

#[derive(Clone, Debug)]
struct IngredientRow {
    id: i64,
    generation: u64,
    name: String,
    price: String,
}

#[component]
#[allow(non_snake_case)]
pub fn IngredientsList() -> impl IntoView {
    let Some(client) = AuthClient::for_page() else {
        return view! { <></> }.into_any();
    };

    let version = RwSignal::new(0u64);
    let new_name = RwSignal::new(String::new());
    let new_price = RwSignal::new(String::new());
    let form_ref = NodeRef::<html::Form>::new();

    let synchronizer = ListSynchronizer::new(
        IngredientsSource::new(client),
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

    let edit = move |id: i64, field: &'static str, value: String| {
        if let Err(e) = sync.with_value(|s| s.edit(&id, field, value)) {
            log::warn!("Ingredient {}: {}", id, e);
        }
    };

    let save = move |id: i64| {
        let sync = sync.get_value();
        spawn_local(async move {
            let _ = sync.save_row(&id).await;
        });
    };

    let remove = move |id: i64| {
        if !confirm("Удалить ингредиент?") {
            return;
        }
        let sync = sync.get_value();
        spawn_local(async move {
            match delete_ingredient(sync.source().client(), id).await {
                Ok(()) => log::info!("Ingredient {} deleted", id),
                Err(e) if e.is_auth_expired() => return,
                Err(e) => log::error!("Ingredient {} not deleted: {}", id, e),
            }
            let _ = sync.refresh().await;
        });
    };

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(form) = form_ref.get() else {
            return;
        };
        if validate_form(&form).is_err() {
            return;
        }
        let (name, price) = (new_name.get_untracked(), new_price.get_untracked());
        let sync = sync.get_value();
        spawn_local(async move {
            match create_ingredient(sync.source().client(), &name, &price).await {
                Ok(()) => {
                    new_name.set(String::new());
                    new_price.set(String::new());
                }
                Err(e) if e.is_auth_expired() => return,
                Err(e) => log::error!("Ingredient not created: {}", e),
            }
            let _ = sync.refresh().await;
        });
    };

    let row_state = move |id: i64| {
        version.track();
        sync.with_value(|s| s.with_view(|v| v.row(&id).map(|r| r.state()).unwrap_or_default()))
    };

    let rows = move || {
        version.track();
        sync.with_value(|s| {
            s.with_view(|v| {
                v.rows()
                    .iter()
                    .map(|row| {
                        let draft: &Ingredient = row.draft();
                        IngredientRow {
                            id: draft.id,
                            generation: row.generation(),
                            name: draft.name.clone(),
                            price: draft.price.clone(),
                        }
                    })
                    .collect::<Vec<_>>()
            })
        })
    };

    view! {
        <PageFrame page_id="a002_ingredients--list" title="Ингредиенты">
            <form class="form form--inline" node_ref=form_ref on:submit=on_create>
                <input type="text" class="input" id="new-name" placeholder="Название" required bind:value=new_name />
                <input type="number" class="input" id="new-price" placeholder="Цена" min="0" step="any" required bind:value=new_price />
                <button type="submit" class="button button--primary">
                    {icon("plus")}
                    "Добавить"
                </button>
            </form>

            <ul class="list">
                <For
                    each=rows
                    key=|row| (row.id, row.generation)
                    children=move |row: IngredientRow| {
                        let id = row.id;
                        view! {
                            <li class="list__item">
                                <input
                                    type="text"
                                    class="input input--small"
                                    prop:value=row.name
                                    on:input=move |ev| edit(id, FIELD_NAME, event_target_value(&ev))
                                />
                                <input
                                    type="number"
                                    class="input input--small"
                                    prop:value=row.price
                                    on:input=move |ev| edit(id, FIELD_PRICE, event_target_value(&ev))
                                />
                                <button
                                    class="button button--success"
                                    disabled=move || row_state(id) == SaveState::Saving
                                    on:click=move |_| save(id)
                                >
                                    {move || match row_state(id) {
                                        SaveState::Saved => "✓ Сохранено",
                                        _ => "Сохранить",
                                    }}
                                </button>
                                <button class="button button--danger" on:click=move |_| remove(id)>
                                    {icon("delete")}
                                    "Удалить"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
        </PageFrame>
    }
    .into_any()
}
