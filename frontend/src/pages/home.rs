use newsflow_shared::ArticleListItem;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    api::{self, ArticleListParams},
    components::{
        article_card::ArticleCard, error_banner::ErrorBanner, loading_spinner::LoadingSpinner,
        pagination::Pagination,
    },
    hooks::use_pagination,
    router::Route,
};

const TRENDING_COUNT: usize = 4;
const ARTICLES_PER_PAGE: usize = 6;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let articles = use_state(|| Option::<Vec<ArticleListItem>>::None);
    let error = use_state(|| Option::<String>::None);

    {
        let articles = articles.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let params = ArticleListParams {
                    published: Some(true),
                    ..Default::default()
                };
                match api::fetch_articles(&params).await {
                    Ok(data) => articles.set(Some(data)),
                    Err(e) => error.set(Some(e)),
                }
            });
            || ()
        });
    }

    let loaded = (*articles).clone().unwrap_or_default();

    // Derived view state: featured rail, trending by views, the rest paginated.
    let featured: Vec<ArticleListItem> =
        loaded.iter().filter(|a| a.featured).cloned().collect();
    let mut trending: Vec<ArticleListItem> = loaded.clone();
    trending.sort_by(|a, b| b.views.cmp(&a.views));
    trending.truncate(TRENDING_COUNT);
    let regular: Vec<ArticleListItem> =
        loaded.iter().filter(|a| !a.featured).cloned().collect();

    let (visible, current_page, total_pages, go_to_page) =
        use_pagination(regular, ARTICLES_PER_PAGE);

    html! {
        <main class="main home-page">
            <div class="container">
                {
                    if let Some(message) = (*error).clone() {
                        html! { <ErrorBanner message={message} /> }
                    } else {
                        html! {}
                    }
                }
                {
                    if articles.is_none() && error.is_none() {
                        html! { <LoadingSpinner /> }
                    } else {
                        html! {}
                    }
                }

                {
                    if !featured.is_empty() {
                        html! {
                            <section class="featured-section" aria-label="Featured stories">
                                <h2 class="section-title">{ "Featured" }</h2>
                                <div class="article-grid featured-grid">
                                    { for featured.iter().map(|article| html! {
                                        <ArticleCard article={article.clone()} key={article.id.clone()} />
                                    }) }
                                </div>
                            </section>
                        }
                    } else {
                        html! {}
                    }
                }

                {
                    if !trending.is_empty() {
                        html! {
                            <section class="trending-section" aria-label="Trending stories">
                                <h2 class="section-title">{ "Trending" }</h2>
                                <ol class="trending-list">
                                    { for trending.iter().map(|article| html! {
                                        <li key={article.id.clone()}>
                                            <Link<Route>
                                                to={Route::ArticleDetail { id: article.id.clone() }}
                                                classes={classes!("trending-link")}
                                            >
                                                { &article.title }
                                            </Link<Route>>
                                            <span class="trending-views">
                                                { format!("{} views", article.views) }
                                            </span>
                                        </li>
                                    }) }
                                </ol>
                            </section>
                        }
                    } else {
                        html! {}
                    }
                }

                <section class="latest-section" aria-label="Latest stories">
                    <h2 class="section-title">{ "Latest" }</h2>
                    {
                        if visible.is_empty() && articles.is_some() {
                            html! { <p class="empty-hint">{ "No articles published yet." }</p> }
                        } else {
                            html! {
                                <div class="article-grid">
                                    { for visible.iter().map(|article| html! {
                                        <ArticleCard article={article.clone()} key={article.id.clone()} />
                                    }) }
                                </div>
                            }
                        }
                    }
                    <Pagination
                        current_page={current_page}
                        total_pages={total_pages}
                        on_page_change={go_to_page}
                    />
                </section>
            </div>
        </main>
    }
}
