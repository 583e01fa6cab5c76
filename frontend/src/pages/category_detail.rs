use newsflow_shared::{ArticleListItem, Category};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    api::{self, ArticleListParams},
    components::{
        article_card::ArticleCard, error_banner::ErrorBanner, loading_spinner::LoadingSpinner,
    },
};

#[derive(Properties, PartialEq)]
pub struct CategoryDetailProps {
    pub slug: String,
}

#[function_component(CategoryDetailPage)]
pub fn category_detail_page(props: &CategoryDetailProps) -> Html {
    let category = use_state(|| Option::<Category>::None);
    let articles = use_state(|| Option::<Vec<ArticleListItem>>::None);
    let error = use_state(|| Option::<String>::None);

    {
        let category = category.clone();
        let articles = articles.clone();
        let error = error.clone();
        let slug = props.slug.clone();
        use_effect_with(props.slug.clone(), move |_| {
            spawn_local(async move {
                match api::fetch_category(&slug).await {
                    Ok(found) => {
                        // Articles reference categories by name, not slug.
                        let params = ArticleListParams {
                            category: Some(found.name.clone()),
                            published: Some(true),
                            ..Default::default()
                        };
                        category.set(Some(found));
                        match api::fetch_articles(&params).await {
                            Ok(data) => articles.set(Some(data)),
                            Err(e) => error.set(Some(e)),
                        }
                    },
                    Err(e) => error.set(Some(e)),
                }
            });
            || ()
        });
    }

    html! {
        <main class="main category-detail-page">
            <div class="container">
                {
                    if let Some(message) = (*error).clone() {
                        html! { <ErrorBanner message={message} /> }
                    } else {
                        html! {}
                    }
                }

                {
                    match (*category).clone() {
                        None => html! { <LoadingSpinner /> },
                        Some(found) => html! {
                            <>
                                <section class="page-section">
                                    <h1 class="page-title">{ &found.name }</h1>
                                    {
                                        if let Some(description) = found.description.as_ref() {
                                            html! { <p class="page-description">{ description }</p> }
                                        } else {
                                            html! {}
                                        }
                                    }
                                </section>
                                {
                                    match (*articles).clone() {
                                        None => html! { <LoadingSpinner /> },
                                        Some(articles) if articles.is_empty() => html! {
                                            <p class="empty-hint">{ "Nothing published here yet." }</p>
                                        },
                                        Some(articles) => html! {
                                            <div class="article-grid">
                                                { for articles.iter().map(|article| html! {
                                                    <ArticleCard
                                                        article={article.clone()}
                                                        key={article.id.clone()}
                                                    />
                                                }) }
                                            </div>
                                        },
                                    }
                                }
                            </>
                        },
                    }
                }
            </div>
        </main>
    }
}
