mod state;

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

use self::state::{save_button, status_options, OrderRowView};
use crate::domain::a001_orders::api::OrdersSource;
use crate::domain::a001_orders::editable::{
    FIELD_DESCRIPTION, FIELD_READY_FOR, FIELD_STATUS, FIELD_TOTAL_SUM,
};
use crate::domain::a001_orders::filter::{visible_rows, OrderFilter};
use crate::shared::config::AppConfig;
use crate::shared::date_utils::today;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::row_editor::SaveState;
use crate::shared::scheduler::BrowserScheduler;
use crate::shared::sync::ListSynchronizer;
use crate::system::auth::client::AuthClient;

type OrdersSync = ListSynchronizer<OrdersSource>;

/// Управление заказами: фильтры, редактирование в строке, автообновление
#[component]
#[allow(non_snake_case)]
pub fn OrdersList() -> impl IntoView {
    let Some(client) = AuthClient::for_page() else {
        return view! { <></> }.into_any();
    };
    let config = AppConfig::current();

    let version = RwSignal::new(0u64);
    let today_only = RwSignal::new(false);
    let hide_completed = RwSignal::new(false);

    let synchronizer = ListSynchronizer::new(
        OrdersSource::new(client),
        Rc::new(BrowserScheduler),
        config.save_ack(),
    );
    synchronizer.on_change(move || version.update(|v| *v += 1));
    let auto_refresh = synchronizer.start_auto_refresh(config.orders_refresh_interval());
    on_cleanup(move || auto_refresh.stop());
    let sync: StoredValue<OrdersSync, LocalStorage> = StoredValue::new_local(synchronizer);

    let reload = move || {
        let sync = sync.get_value();
        spawn_local(async move {
            let _ = sync.refresh().await;
        });
    };
    reload();

    let edit = move |order_id: i64, field: &'static str, value: String| {
        if let Err(e) = sync.with_value(|s| s.edit(&order_id, field, value)) {
            log::warn!("Order {}: {}", order_id, e);
        }
    };

    let save = move |order_id: i64| {
        let sync = sync.get_value();
        spawn_local(async move {
            let _ = sync.save_row(&order_id).await;
        });
    };

    let row_state = move |order_id: i64| {
        version.track();
        sync.with_value(|s| {
            s.with_view(|v| v.row(&order_id).map(|r| r.state()).unwrap_or_default())
        })
    };

    let rows = move || {
        version.track();
        let filter = OrderFilter {
            today_only: today_only.get(),
            hide_completed: hide_completed.get(),
        };
        let today = today();
        sync.with_value(|s| {
            s.with_view(|v| {
                visible_rows(v.rows(), &filter, today)
                    .into_iter()
                    .map(OrderRowView::from)
                    .collect::<Vec<_>>()
            })
        })
    };

    let last_error = move || {
        version.track();
        sync.with_value(|s| s.with_view(|v| v.last_error().map(str::to_string)))
    };
    let is_loaded = move || {
        version.track();
        sync.with_value(|s| s.with_view(|v| v.is_loaded()))
    };

    view! {
        <PageFrame
            page_id="a001_orders--list"
            title="Заказы"
            actions=move || view! {
                <button class="button button--secondary" on:click=move |_| reload()>
                    {icon("refresh")}
                    "Обновить"
                </button>
            }
        >
            <div class="filters">
                <label class="filters__item">
                    <input
                        type="checkbox"
                        id="today-only"
                        prop:checked=move || today_only.get()
                        on:change=move |ev| {
                            today_only.set(event_target_checked(&ev));
                            reload();
                        }
                    />
                    "Только сегодняшние"
                </label>
                <label class="filters__item">
                    <input
                        type="checkbox"
                        id="hide-completed"
                        prop:checked=move || hide_completed.get()
                        on:change=move |ev| {
                            hide_completed.set(event_target_checked(&ev));
                            reload();
                        }
                    />
                    "Скрыть завершённые"
                </label>
            </div>

            {move || last_error().map(|e| view! {
                <div class="warning-box">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Show when=is_loaded fallback=|| view! { <div class="page__loading">"Загрузка..."</div> }>
                <div class="table">
                    <table class="table__data table--striped orders-table">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">"№"</th>
                                <th class="table__header-cell">"Создан"</th>
                                <th class="table__header-cell">"Клиент"</th>
                                <th class="table__header-cell">"Телефон"</th>
                                <th class="table__header-cell">"К какому времени"</th>
                                <th class="table__header-cell">"Описание"</th>
                                <th class="table__header-cell">"Сумма"</th>
                                <th class="table__header-cell">"Статус"</th>
                                <th class="table__header-cell"></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=rows
                                key=|row| (row.order_id, row.generation)
                                children=move |row: OrderRowView| {
                                    let id = row.order_id;
                                    let options = status_options(&row.status);
                                    let current = row.status.label().to_string();
                                    view! {
                                        <tr class=format!("table__row {}", row.row_class)>
                                            <td class="table__cell">{id}</td>
                                            <td class="table__cell">
                                                <input type="datetime-local" class="input input--small" value=row.created_at disabled />
                                            </td>
                                            <td class="table__cell">{row.user_name}</td>
                                            <td class="table__cell">{row.user_phone}</td>
                                            <td class="table__cell">
                                                <input
                                                    type="text"
                                                    class="input input--small ready-for"
                                                    prop:value=row.ready_for
                                                    on:input=move |ev| edit(id, FIELD_READY_FOR, event_target_value(&ev))
                                                />
                                            </td>
                                            <td class="table__cell">
                                                <textarea
                                                    class="input input--small description"
                                                    rows="1"
                                                    prop:value=row.description
                                                    on:input=move |ev| edit(id, FIELD_DESCRIPTION, event_target_value(&ev))
                                                ></textarea>
                                            </td>
                                            <td class="table__cell">
                                                <input
                                                    type="number"
                                                    class="input input--small total-sum"
                                                    prop:value=row.total_sum
                                                    on:input=move |ev| edit(id, FIELD_TOTAL_SUM, event_target_value(&ev))
                                                />
                                            </td>
                                            <td class="table__cell">
                                                <select
                                                    class="input input--small status"
                                                    on:change=move |ev| edit(id, FIELD_STATUS, event_target_value(&ev))
                                                >
                                                    {options.into_iter().map(|label| {
                                                        let selected = label == current;
                                                        let text = label.clone();
                                                        view! { <option value=label selected=selected>{text}</option> }
                                                    }).collect_view()}
                                                </select>
                                            </td>
                                            <td class="table__cell">
                                                <button
                                                    class=move || save_button(row_state(id)).1
                                                    disabled=move || row_state(id) == SaveState::Saving
                                                    on:click=move |_| save(id)
                                                >
                                                    {move || save_button(row_state(id)).0}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </Show>
        </PageFrame>
    }
    .into_any()
}
