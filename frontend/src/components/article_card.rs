use newsflow_shared::ArticleListItem;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{router::Route, utils::format_date};

#[derive(Properties, PartialEq, Clone)]
pub struct ArticleCardProps {
    pub article: ArticleListItem,
}

#[function_component(ArticleCard)]
pub fn article_card(props: &ArticleCardProps) -> Html {
    let article = props.article.clone();
    let detail_route = Route::ArticleDetail {
        id: article.id.clone(),
    };

    html! {
        <article class="article-card">
            {
                if let Some(image) = article.image_url.as_ref() {
                    html! {
                        <Link<Route> to={detail_route.clone()} classes={classes!("card-image")}>
                            <img src={image.clone()} alt={article.title.clone()} loading="lazy" />
                        </Link<Route>>
                    }
                } else {
                    html! {}
                }
            }
            <h3 class="article-title">
                <Link<Route> to={detail_route.clone()} classes={classes!("article-title-link")}>
                    { &article.title }
                </Link<Route>>
            </h3>
            <div class="post-meta">
                <span class="post-meta-item">{ &article.author }</span>
                <span class="post-meta-item">{ format_date(article.created_at) }</span>
                <span class="post-meta-item post-category">{ &article.category }</span>
            </div>
            <p class="article-excerpt">{ &article.excerpt }</p>
            <div class="post-footer">
                <ul class="post-tags">
                    { for article.tags.iter().map(|tag| {
                        html! {
                            <li class="tag-pill">{ format!("#{}", tag) }</li>
                        }
                    }) }
                </ul>
                <span class="post-counters">
                    { format!("{} views · {} likes", article.views, article.likes) }
                </span>
            </div>
        </article>
    }
}
