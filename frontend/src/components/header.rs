use yew::prelude::*;
use yew_router::prelude::Link;

use crate::router::Route;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header class="site-header">
            <div class="container header-inner">
                <Link<Route> to={Route::Home} classes={classes!("site-brand")}>
                    { "NewsFlow" }
                </Link<Route>>
                <nav class="site-nav" aria-label="Main navigation">
                    <Link<Route> to={Route::Home} classes={classes!("nav-link")}>
                        { "Home" }
                    </Link<Route>>
                    <Link<Route> to={Route::Categories} classes={classes!("nav-link")}>
                        { "Categories" }
                    </Link<Route>>
                    <Link<Route> to={Route::Search} classes={classes!("nav-link")}>
                        { "Search" }
                    </Link<Route>>
                    <Link<Route> to={Route::Admin} classes={classes!("nav-link", "nav-link-admin")}>
                        { "Admin" }
                    </Link<Route>>
                </nav>
            </div>
        </header>
    }
}
