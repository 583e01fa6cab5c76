use newsflow_shared::{Article, ArticleListItem};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    api::{self, ArticleListParams},
    components::{
        comments::CommentSection, error_banner::ErrorBanner, loading_spinner::LoadingSpinner,
    },
    router::Route,
    utils::format_date,
};

const RELATED_COUNT: usize = 3;

#[derive(Properties, PartialEq)]
pub struct ArticleDetailProps {
    pub id: String,
}

#[function_component(ArticleDetailPage)]
pub fn article_detail_page(props: &ArticleDetailProps) -> Html {
    let article = use_state(|| Option::<Article>::None);
    let related = use_state(Vec::<ArticleListItem>::new);
    let error = use_state(|| Option::<String>::None);
    let views = use_state(|| Option::<i64>::None);
    let likes = use_state(|| Option::<i64>::None);

    {
        let article = article.clone();
        let related = related.clone();
        let error = error.clone();
        let views = views.clone();
        let id = props.id.clone();
        use_effect_with(props.id.clone(), move |_| {
            spawn_local(async move {
                // Count the visit first so the subsequent fetch sees fresh numbers.
                match api::track_view(&id).await {
                    Ok(count) => views.set(Some(count)),
                    Err(e) => log_warning(&e),
                }
                match api::fetch_article(&id).await {
                    Ok(data) => {
                        let current = data.clone();
                        article.set(Some(data));
                        match api::fetch_articles(&ArticleListParams {
                            published: Some(true),
                            ..Default::default()
                        })
                        .await
                        {
                            Ok(all) => related.set(rank_related(&current, all)),
                            Err(e) => log_warning(&e),
                        }
                    },
                    Err(e) => error.set(Some(e)),
                }
            });
            || ()
        });
    }

    let on_like = {
        let id = props.id.clone();
        let likes = likes.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            let id = id.clone();
            let likes = likes.clone();
            let error = error.clone();
            spawn_local(async move {
                match api::like_article(&id).await {
                    Ok(count) => likes.set(Some(count)),
                    Err(e) => error.set(Some(e)),
                }
            });
        })
    };

    let dismiss_error = {
        let error = error.clone();
        Callback::from(move |_| error.set(None))
    };

    let Some(current) = (*article).clone() else {
        return html! {
            <main class="main article-page">
                <div class="container">
                    {
                        if let Some(message) = (*error).clone() {
                            html! { <ErrorBanner message={message} /> }
                        } else {
                            html! { <LoadingSpinner /> }
                        }
                    }
                </div>
            </main>
        };
    };

    let shown_views = views.unwrap_or(current.views);
    let shown_likes = likes.unwrap_or(current.likes);

    html! {
        <main class="main article-page">
            <div class="container">
                {
                    if let Some(message) = (*error).clone() {
                        html! { <ErrorBanner message={message} on_dismiss={Some(dismiss_error)} /> }
                    } else {
                        html! {}
                    }
                }

                <article class="article-detail">
                    <header class="article-header">
                        <span class="article-category">{ &current.category }</span>
                        <h1 class="article-title">{ &current.title }</h1>
                        <div class="article-byline">
                            {
                                if let Some(image) = current.author_image.as_ref() {
                                    html! {
                                        <img
                                            class="author-avatar"
                                            src={image.clone()}
                                            alt={current.author.clone()}
                                        />
                                    }
                                } else {
                                    html! {}
                                }
                            }
                            <div class="author-meta">
                                <span class="author-name">{ &current.author }</span>
                                {
                                    if let Some(title) = current.author_title.as_ref() {
                                        html! { <span class="author-title">{ title }</span> }
                                    } else {
                                        html! {}
                                    }
                                }
                            </div>
                            <span class="article-date">{ format_date(current.created_at) }</span>
                        </div>
                    </header>

                    {
                        if let Some(image) = current.image_url.as_ref() {
                            html! {
                                <img
                                    class="article-hero"
                                    src={image.clone()}
                                    alt={current.title.clone()}
                                />
                            }
                        } else {
                            html! {}
                        }
                    }

                    <div class="article-body">
                        { for current.content.split("\n\n").map(|paragraph| html! {
                            <p>{ paragraph }</p>
                        }) }
                    </div>

                    <div class="article-actions">
                        <button type="button" class="like-button" onclick={on_like}>
                            { format!("♥ {}", shown_likes) }
                        </button>
                        <span class="view-count">{ format!("{} views", shown_views) }</span>
                    </div>

                    <ul class="post-tags">
                        { for current.tags.iter().map(|tag| html! {
                            <li class="tag-pill">{ format!("#{}", tag) }</li>
                        }) }
                    </ul>
                </article>

                {
                    if !related.is_empty() {
                        html! {
                            <section class="related-section" aria-label="Related stories">
                                <h2 class="section-title">{ "Related" }</h2>
                                <ul class="related-list">
                                    { for related.iter().map(|item| html! {
                                        <li key={item.id.clone()}>
                                            <Link<Route>
                                                to={Route::ArticleDetail { id: item.id.clone() }}
                                                classes={classes!("related-link")}
                                            >
                                                { &item.title }
                                            </Link<Route>>
                                            <span class="related-category">{ &item.category }</span>
                                        </li>
                                    }) }
                                </ul>
                            </section>
                        }
                    } else {
                        html! {}
                    }
                }

                <CommentSection article_id={props.id.clone()} />
            </div>
        </main>
    }
}

/// Rank candidates by shared category (2 points) then shared tags (1 each).
fn rank_related(current: &Article, candidates: Vec<ArticleListItem>) -> Vec<ArticleListItem> {
    let mut scored: Vec<(ArticleListItem, usize)> = candidates
        .into_iter()
        .filter(|item| item.id != current.id)
        .map(|item| {
            let mut score = 0;
            if item.category.eq_ignore_ascii_case(&current.category) {
                score += 2;
            }
            score += item
                .tags
                .iter()
                .filter(|tag| {
                    current.tags.iter().any(|own| own.eq_ignore_ascii_case(tag))
                })
                .count();
            (item, score)
        })
        .filter(|(_, score)| *score > 0)
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().take(RELATED_COUNT).map(|(item, _)| item).collect()
}

fn log_warning(message: &str) {
    web_sys::console::warn_1(&message.into());
}
