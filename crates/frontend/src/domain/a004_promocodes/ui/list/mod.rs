use contracts::domain::a004_promocodes::aggregate::{Promocode, PromocodeDto};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;

use crate::domain::a004_promocodes::api::{
    delete_promocode, new_promocode, save_promocode, PromocodesSource,
};
use crate::shared::config::AppConfig;
use crate::shared::dialogs::confirm;
use crate::shared::form_utils::validate_form;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::scheduler::BrowserScheduler;
use crate::shared::sync::ListSynchronizer;
use crate::system::auth::client::AuthClient;

#[component]
#[allow(non_snake_case)]
pub fn PromocodesList() -> impl IntoView {
    let Some(client) = AuthClient::for_page() else {
        return view! { <></> }.into_any();
    };

    let version = RwSignal::new(0u64);
    let form = RwSignal::new(new_promocode());
    let show_form = RwSignal::new(false);
    let form_ref = NodeRef::<html::Form>::new();

    let synchronizer = ListSynchronizer::new(
        PromocodesSource::new(client),
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
        form.set(new_promocode());
        show_form.set(true);
    };

    let open_edit = move |promo: &Promocode| {
        form.set(PromocodeDto::from(promo));
        show_form.set(true);
    };

    let on_save = move |_: leptos::ev::MouseEvent| {
        let Some(element) = form_ref.get() else {
            return;
        };
        if validate_form(&element).is_err() {
            return;
        }
        let dto = form.get_untracked();
        let sync = sync.get_value();
        spawn_local(async move {
            match save_promocode(sync.source().client(), &dto).await {
                Ok(()) => {
                    show_form.set(false);
                    let _ = sync.refresh().await;
                }
                Err(e) if e.is_auth_expired() => {}
                Err(e) => log::error!("Promocode not saved: {}", e),
            }
        });
    };

    let remove = move |promocode_id: i64| {
        if !confirm("Вы уверены, что хотите удалить этот промокод?") {
            return;
        }
        let sync = sync.get_value();
        spawn_local(async move {
            match delete_promocode(sync.source().client(), promocode_id).await {
                Ok(()) => {
                    let _ = sync.refresh().await;
                }
                Err(e) if e.is_auth_expired() => {}
                Err(e) => log::error!("Promocode {} not deleted: {}", promocode_id, e),
            }
        });
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
            page_id="a004_promocodes--list"
            title="Промокоды"
            actions=move || view! {
                <button class="button button--primary" on:click=move |_| open_new()>
                    {icon("plus")}
                    "Добавить промокод"
                </button>
            }
        >
            <div class="cards">
                <For
                    each=cards
                    key=|(generation, promo)| (promo.promocode_id, *generation)
                    children=move |(_, promo): (u64, Promocode)| {
                        let id = promo.promocode_id;
                        let class = if promo.is_active {
                            "promo-card"
                        } else {
                            "promo-card promo-card--inactive"
                        };
                        let title = promo.promocode.clone();
                        let description = promo.description.clone();
                        let discount = promo.discount_label();
                        let inactive = !promo.is_active;
                        view! {
                            <div class=class>
                                <Card>
                                    <h5 class="promo-card__title">{title}</h5>
                                    <p class="promo-card__text">{description}</p>
                                    <p class="promo-card__discount">{discount}</p>
                                    {inactive.then(|| view! {
                                        <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Danger>
                                            "Неактивен"
                                        </Badge>
                                    })}
                                    <div class="promo-card__actions">
                                        <button
                                            class="button button--secondary button--small"
                                            on:click=move |_| open_edit(&promo)
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
                            {move || if form.with(|f| f.promocode_id.is_none()) { "Добавить промокод" } else { "Редактировать промокод" }}
                        </DialogTitle>
                        <DialogContent>
                            <form class="form" node_ref=form_ref on:submit=|ev| ev.prevent_default()>
                                <div class="form__group">
                                    <label class="form__label" for="promocode">"Промокод"</label>
                                    <input
                                        class="input"
                                        id="promocode"
                                        type="text"
                                        required
                                        prop:value=move || form.with(|f| f.promocode.clone())
                                        on:input=move |ev| form.update(|f| f.promocode = event_target_value(&ev))
                                    />
                                </div>
                                <div class="form__group">
                                    <label class="form__label" for="description">"Описание"</label>
                                    <textarea
                                        class="input"
                                        id="description"
                                        prop:value=move || form.with(|f| f.description.clone())
                                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                                    ></textarea>
                                </div>
                                <div class="form__group">
                                    <label class="form__label" for="discount">"Скидка"</label>
                                    <input
                                        class="input"
                                        id="discount"
                                        type="number"
                                        step="any"
                                        min="0"
                                        required
                                        prop:value=move || form.with(|f| f.discount.clone())
                                        on:input=move |ev| form.update(|f| f.discount = event_target_value(&ev))
                                    />
                                </div>
                                <div class="form__group">
                                    <label class="form__label" for="min_total_sum">"Минимальная сумма заказа"</label>
                                    <input
                                        class="input"
                                        id="min_total_sum"
                                        type="number"
                                        step="any"
                                        min="0"
                                        prop:value=move || form.with(|f| f.min_total_sum.clone())
                                        on:input=move |ev| form.update(|f| f.min_total_sum = event_target_value(&ev))
                                    />
                                </div>
                                <label class="form__checkbox">
                                    <input
                                        type="checkbox"
                                        id="is_active"
                                        prop:checked=move || form.with(|f| f.is_active)
                                        on:change=move |ev| form.update(|f| f.is_active = event_target_checked(&ev))
                                    />
                                    "Активен"
                                </label>
                                <label class="form__checkbox">
                                    <input
                                        type="checkbox"
                                        id="is_percent"
                                        prop:checked=move || form.with(|f| f.is_percent)
                                        on:change=move |ev| form.update(|f| f.is_percent = event_target_checked(&ev))
                                    />
                                    "Скидка в процентах"
                                </label>
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
