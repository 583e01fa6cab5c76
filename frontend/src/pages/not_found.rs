use yew::prelude::*;
use yew_router::prelude::Link;

use crate::router::Route;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <main class="main not-found-page">
            <div class="container">
                <h1 class="page-title">{ "404" }</h1>
                <p class="page-description">{ "That page has moved or never existed." }</p>
                <Link<Route> to={Route::Home} classes={classes!("button-primary")}>
                    { "Back to the front page" }
                </Link<Route>>
            </div>
        </main>
    }
}
