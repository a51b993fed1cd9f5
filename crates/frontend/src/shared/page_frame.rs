//! PageFrame — standard root wrapper for every console page.
//!
//! Sets `id="{page_id}"` on the root element and renders the page title
//! with optional header actions.
//!
//! Usage:
//! ```ignore
//! view! {
//!     <PageFrame page_id="a002_ingredients--list" title="Ингредиенты">
//!         <div class="page__content">...</div>
//!     </PageFrame>
//! }
//! ```

use leptos::prelude::*;

use crate::layout::header::Header;

#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`, e.g. `"a001_orders--list"`
    page_id: &'static str,
    title: &'static str,
    /// Buttons shown on the right of the title
    #[prop(optional, into)]
    actions: Option<ViewFn>,
    children: Children,
) -> impl IntoView {
    view! {
        <Header />
        <div id=page_id class="page">
            <div class="page__header">
                <h1 class="page__title">{title}</h1>
                <div class="page__actions">{actions.map(|a| a.run())}</div>
            </div>
            {children()}
        </div>
    }
}
