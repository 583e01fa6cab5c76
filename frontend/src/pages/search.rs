use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    api::{self, SearchHit},
    components::{error_banner::ErrorBanner, loading_spinner::LoadingSpinner},
    router::Route,
    utils::format_date,
};

#[function_component(SearchPage)]
pub fn search_page() -> Html {
    let input = use_state(String::new);
    let submitted = use_state(String::new);
    let results = use_state(|| Option::<Vec<SearchHit>>::None);
    let error = use_state(|| Option::<String>::None);

    {
        let results = results.clone();
        let error = error.clone();
        let keyword = (*submitted).clone();
        use_effect_with((*submitted).clone(), move |_| {
            if !keyword.trim().is_empty() {
                spawn_local(async move {
                    match api::search_articles(&keyword).await {
                        Ok(data) => results.set(Some(data)),
                        Err(e) => error.set(Some(e)),
                    }
                });
            }
            || ()
        });
    }

    let on_input = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            input.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let input = input.clone();
        let submitted = submitted.clone();
        let results = results.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            // Resubmitting the same keyword keeps the current results.
            if *input != *submitted {
                results.set(None);
                submitted.set((*input).clone());
            }
        })
    };

    let has_query = !submitted.trim().is_empty();

    html! {
        <main class="main search-page">
            <div class="container">
                <section class="page-section">
                    <h1 class="page-title">{ "Search" }</h1>
                </section>

                <form class="search-form" onsubmit={on_submit} role="search">
                    <input
                        type="search"
                        placeholder="Search articles"
                        value={(*input).clone()}
                        oninput={on_input}
                    />
                    <button type="submit" class="button-primary">{ "Search" }</button>
                </form>

                {
                    if let Some(message) = (*error).clone() {
                        html! { <ErrorBanner message={message} /> }
                    } else {
                        html! {}
                    }
                }

                {
                    if !has_query {
                        html! {}
                    } else {
                        match (*results).clone() {
                            None => html! { <LoadingSpinner /> },
                            Some(results) if results.is_empty() => html! {
                                <p class="empty-hint">
                                    { format!("No results for \"{}\".", *submitted) }
                                </p>
                            },
                            Some(results) => html! {
                                <ul class="search-results">
                                    { for results.iter().map(|hit| {
                                        // Highlights carry <mark> spans from the server.
                                        let highlight = Html::from_html_unchecked(
                                            AttrValue::from(hit.highlight.clone()),
                                        );
                                        html! {
                                            <li class="search-result" key={hit.id.clone()}>
                                                <Link<Route>
                                                    to={Route::ArticleDetail { id: hit.id.clone() }}
                                                    classes={classes!("result-title")}
                                                >
                                                    { &hit.title }
                                                </Link<Route>>
                                                <div class="result-meta">
                                                    <span>{ &hit.category }</span>
                                                    <span>{ format_date(hit.created_at) }</span>
                                                </div>
                                                <p class="result-highlight">{ highlight }</p>
                                            </li>
                                        }
                                    }) }
                                </ul>
                            },
                        }
                    }
                }
            </div>
        </main>
    }
}
