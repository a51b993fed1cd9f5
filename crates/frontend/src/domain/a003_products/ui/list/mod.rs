use contracts::domain::a002_ingredients::aggregate::Ingredient;
use contracts::domain::a003_products::aggregate::{IngredientEdit, Product, ProductIngredient};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;

use crate::domain::a002_ingredients::api::fetch_ingredients;
use crate::domain::a003_products::api::{
    delete_product, edit_product_ingredient, save_product, ProductsSource,
};
use crate::domain::a003_products::form::{ProductForm, FIELDS};
use crate::shared::config::AppConfig;
use crate::shared::dialogs::confirm;
use crate::shared::form_utils::validate_form;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::scheduler::BrowserScheduler;
use crate::shared::sync::ListSynchronizer;
use crate::system::auth::api::check_token;
use crate::system::auth::client::AuthClient;

/// Меню: карточки продуктов, форма продукта и его ингредиенты
#[component]
#[allow(non_snake_case)]
pub fn ProductsList() -> impl IntoView {
    let Some(client) = AuthClient::for_page() else {
        return view! { <></> }.into_any();
    };

    let version = RwSignal::new(0u64);
    let form = RwSignal::new(ProductForm::default());
    let ingredients = RwSignal::new(Vec::<ProductIngredient>::new());
    let catalog = RwSignal::new(Vec::<Ingredient>::new());
    let picked = RwSignal::new(String::new());
    let show_form = RwSignal::new(false);
    let show_picker = RwSignal::new(false);
    let form_ref = NodeRef::<html::Form>::new();

    let synchronizer = ListSynchronizer::new(
        ProductsSource::new(client),
        Rc::new(BrowserScheduler),
        AppConfig::current().save_ack(),
    );
    synchronizer.on_change(move || version.update(|v| *v += 1));
    let sync = StoredValue::new_local(synchronizer);

    // токен проверяется до первой загрузки
    {
        let sync = sync.get_value();
        spawn_local(async move {
            if check_token(sync.source().client()).await.is_ok() {
                let _ = sync.refresh().await;
            }
        });
    }

    let reload = move || {
        let sync = sync.get_value();
        spawn_local(async move {
            let _ = sync.refresh().await;
        });
    };

    let open_new = move || {
        form.set(ProductForm::default());
        ingredients.set(Vec::new());
        show_form.set(true);
    };

    let open_edit = move |product: Product| {
        form.set(ProductForm::from(&product));
        ingredients.set(product.ingredients);
        show_form.set(true);
    };

    let on_save = move |_: leptos::ev::MouseEvent| {
        let Some(element) = form_ref.get() else {
            return;
        };
        if validate_form(&element).is_err() {
            return;
        }
        let dto = form.get_untracked().to_dto();
        let sync = sync.get_value();
        spawn_local(async move {
            match save_product(sync.source().client(), &dto).await {
                Ok(()) => show_form.set(false),
                Err(e) if e.is_auth_expired() => return,
                Err(e) => log::error!("Product not saved: {}", e),
            }
            let _ = sync.refresh().await;
        });
    };

    let remove = move |product_id: i64| {
        if !confirm("Удалить продукт?") {
            return;
        }
        let sync = sync.get_value();
        spawn_local(async move {
            match delete_product(sync.source().client(), product_id).await {
                Ok(()) => log::info!("Product {} deleted", product_id),
                Err(e) if e.is_auth_expired() => return,
                Err(e) => log::error!("Product {} not deleted: {}", product_id, e),
            }
            let _ = sync.refresh().await;
        });
    };

    let edit_ingredient = move |ingredient_id: i64, type_edit: IngredientEdit| {
        let Some(product_id) = form.with_untracked(|f| f.product_id) else {
            return;
        };
        let sync = sync.get_value();
        spawn_local(async move {
            let client = sync.source().client();
            match edit_product_ingredient(client, product_id, ingredient_id, type_edit).await {
                Ok(Some(product)) => ingredients.set(product.ingredients),
                Ok(None) => log::warn!("Product {} is gone", product_id),
                Err(e) => {
                    if !e.is_auth_expired() {
                        log::error!("Ingredients of product {} not changed: {}", product_id, e);
                    }
                    return;
                }
            }
            let _ = sync.refresh().await;
        });
    };

    let open_picker = move |_: leptos::ev::MouseEvent| {
        let sync = sync.get_value();
        spawn_local(async move {
            match fetch_ingredients(sync.source().client()).await {
                Ok(all) => {
                    picked.set(all.first().map(|i| i.id.to_string()).unwrap_or_default());
                    catalog.set(all);
                    show_picker.set(true);
                }
                Err(e) => log::error!("Ingredient catalog not loaded: {}", e),
            }
        });
    };

    let attach = move |_: leptos::ev::MouseEvent| match picked.get_untracked().parse::<i64>() {
        Ok(ingredient_id) => {
            edit_ingredient(ingredient_id, IngredientEdit::Create);
            show_picker.set(false);
        }
        Err(_) => log::warn!("No ingredient picked"),
    };

    let cards = move || {
        version.track();
        sync.with_value(|s| {
            s.with_view(|v| {
                v.rows()
                    .iter()
                    .map(|row| (row.generation(), row.record().clone()))
                    .collect::<Vec<_>>()
            })
        })
    };

    view! {
        <PageFrame
            page_id="a003_products--list"
            title="Меню"
            actions=move || view! {
                <button class="button button--secondary" on:click=move |_| reload()>
                    {icon("refresh")}
                    "Обновить"
                </button>
                <button class="button button--primary" on:click=move |_| open_new()>
                    {icon("plus")}
                    "Добавить продукт"
                </button>
            }
        >
            <div class="cards">
                <For
                    each=cards
                    key=|(generation, product)| (product.id, *generation)
                    children=move |(_, product): (u64, Product)| {
                        let id = product.id;
                        let class = if product.is_available {
                            "product-card"
                        } else {
                            "product-card product-card--unavailable"
                        };
                        let unavailable = !product.is_available;
                        let title = product.name.clone();
                        let price = format!("{} ₽", product.price);
                        view! {
                            <div class=class>
                                <Card>
                                    <h5 class="product-card__title">{title}</h5>
                                    <p class="product-card__price">{price}</p>
                                    {unavailable.then(|| view! {
                                        <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Danger>
                                            "Нет в наличии"
                                        </Badge>
                                    })}
                                    <div class="product-card__actions">
                                        <button
                                            class="button button--secondary button--small"
                                            on:click=move |_| open_edit(product.clone())
                                        >
                                            {icon("edit")}
                                            "Редактировать"
                                        </button>
                                        <button
                                            class="button button--danger button--small"
                                            on:click=move |_| remove(id)
                                        >
                                            "×"
                                        </button>
                                    </div>
                                </Card>
                            </div>
                        }
                    }
                />
            </div>

            <Dialog open=show_form>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>
                            {move || if form.with(|f| f.is_new()) { "Добавить продукт" } else { "Редактировать продукт" }}
                        </DialogTitle>
                        <DialogContent>
                            <form class="form" node_ref=form_ref on:submit=|ev| ev.prevent_default()>
                                {FIELDS.into_iter().map(|(name, label, kind, required)| view! {
                                    <div class="form__group">
                                        <label class="form__label" for=name>{label}</label>
                                        <input
                                            class="input"
                                            type=kind
                                            id=name
                                            name=name
                                            step="any"
                                            required=required
                                            prop:value=move || form.with(|f| f.get(name).to_string())
                                            on:input=move |ev| form.update(|f| f.set(name, event_target_value(&ev)))
                                        />
                                    </div>
                                }).collect_view()}
                                <label class="form__checkbox">
                                    <input
                                        type="checkbox"
                                        id="is_available"
                                        prop:checked=move || form.with(|f| f.is_available)
                                        on:change=move |ev| form.update(|f| f.is_available = event_target_checked(&ev))
                                    />
                                    "В наличии"
                                </label>
                            </form>

                            <Show when=move || !form.with(|f| f.is_new())>
                                <div class="product-ingredients">
                                    <h3 class="product-ingredients__title">"Ингредиенты"</h3>
                                    <ul class="list">
                                        <For
                                            each=move || ingredients.get()
                                            key=|ingredient| ingredient.id
                                            children=move |ingredient: ProductIngredient| {
                                                let ingredient_id = ingredient.id;
                                                view! {
                                                    <li class="list__item">
                                                        {ingredient.name}
                                                        <button
                                                            type="button"
                                                            class="button button--danger button--small"
                                                            on:click=move |_| edit_ingredient(ingredient_id, IngredientEdit::Delete)
                                                        >
                                                            "Удалить"
                                                        </button>
                                                    </li>
                                                }
                                            }
                                        />
                                    </ul>
                                    <button type="button" class="button button--secondary" on:click=open_picker>
                                        {icon("plus")}
                                        "Добавить ингредиент"
                                    </button>
                                </div>
                            </Show>
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

            <Dialog open=show_picker>
                <DialogSurface>
                    <DialogBody>
                        <DialogTitle>"Добавить ингредиент"</DialogTitle>
                        <DialogContent>
                            <select
                                class="input"
                                prop:value=move || picked.get()
                                on:change=move |ev| picked.set(event_target_value(&ev))
                            >
                                {move || catalog.get().into_iter().map(|i| view! {
                                    <option value=i.id.to_string()>{i.name}</option>
                                }).collect_view()}
                            </select>
                        </DialogContent>
                        <DialogActions>
                            <Button appearance=ButtonAppearance::Primary on_click=attach>
                                "Добавить"
                            </Button>
                            <Button appearance=ButtonAppearance::Subtle on_click=move |_| show_picker.set(false)>
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
