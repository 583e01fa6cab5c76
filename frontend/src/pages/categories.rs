use newsflow_shared::Category;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    api,
    components::{error_banner::ErrorBanner, loading_spinner::LoadingSpinner},
    router::Route,
};

#[function_component(CategoriesPage)]
pub fn categories_page() -> Html {
    let categories = use_state(|| Option::<Vec<Category>>::None);
    let error = use_state(|| Option::<String>::None);

    {
        let categories = categories.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api::fetch_categories().await {
                    Ok(data) => categories.set(Some(data)),
                    Err(e) => error.set(Some(e)),
                }
            });
            || ()
        });
    }

    html! {
        <main class="main categories-page">
            <div class="container">
                <section class="page-section">
                    <h1 class="page-title">{ "Categories" }</h1>
                    <p class="page-description">
                        { "Browse the desk by topic." }
                    </p>
                </section>

                {
                    if let Some(message) = (*error).clone() {
                        html! { <ErrorBanner message={message} /> }
                    } else {
                        html! {}
                    }
                }

                {
                    match (*categories).clone() {
                        None => html! { <LoadingSpinner /> },
                        Some(categories) if categories.is_empty() => {
                            html! { <p class="empty-hint">{ "No categories yet." }</p> }
                        },
                        Some(categories) => html! {
                            <section class="category-grid" aria-label="Category list">
                                { for categories.iter().map(|category| {
                                    let accent = category
                                        .color
                                        .clone()
                                        .unwrap_or_else(|| "slate".to_string());
                                    html! {
                                        <Link<Route>
                                            to={Route::CategoryDetail { slug: category.slug.clone() }}
                                            classes={classes!("category-card", format!("accent-{accent}"))}
                                            key={category.id.clone()}
                                        >
                                            <div class="category-card-body">
                                                <p class="category-name">{ &category.name }</p>
                                                {
                                                    if let Some(description) = category.description.as_ref() {
                                                        html! {
                                                            <p class="category-description">{ description }</p>
                                                        }
                                                    } else {
                                                        html! {}
                                                    }
                                                }
                                            </div>
                                        </Link<Route>>
                                    }
                                }) }
                            </section>
                        },
                    }
                }
            </div>
        </main>
    }
}
