use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::domain::a001_orders::ui::list::OrdersList;
use crate::domain::a002_ingredients::ui::list::IngredientsList;
use crate::domain::a003_products::ui::list::ProductsList;
use crate::domain::a004_promocodes::ui::list::PromocodesList;
use crate::system::administrators::ui::list::AdministratorsList;
use crate::system::pages::login::LoginPage;

#[component]
#[allow(non_snake_case)]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page">
            <h1 class="page__title">"Страница не найдена"</h1>
            <a href="/">"На главную"</a>
        </div>
    }
}

/// Каждая страница сама проверяет сессию при загрузке
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <main class="app">
                <Routes fallback=NotFound>
                    <Route path=path!("/") view=LoginPage />
                    <Route path=path!("/orders") view=OrdersList />
                    <Route path=path!("/administrators") view=AdministratorsList />
                    <Route path=path!("/ingredients") view=IngredientsList />
                    <Route path=path!("/menu") view=ProductsList />
                    <Route path=path!("/promocodes") view=PromocodesList />
                </Routes>
            </main>
        </Router>
    }
}
