use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    components::{footer::Footer, header::Header},
    pages,
};

#[derive(Routable, Clone, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,

    #[at("/articles/:id")]
    ArticleDetail { id: String },

    #[at("/categories")]
    Categories,

    #[at("/categories/:slug")]
    CategoryDetail { slug: String },

    #[at("/search")]
    Search,

    #[at("/admin")]
    Admin,

    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <pages::home::HomePage /> },
        Route::ArticleDetail {
            id,
        } => {
            html! { <pages::article_detail::ArticleDetailPage id={id} /> }
        },
        Route::Categories => html! { <pages::categories::CategoriesPage /> },
        Route::CategoryDetail {
            slug,
        } => {
            html! { <pages::category_detail::CategoryDetailPage slug={slug} /> }
        },
        Route::Search => html! { <pages::search::SearchPage /> },
        Route::Admin => html! { <pages::admin::AdminPage /> },
        Route::NotFound => html! { <pages::not_found::NotFoundPage /> },
    }
}

#[function_component(AppRouter)]
pub fn app_router() -> Html {
    html! {
        <BrowserRouter>
            <div class="app-shell">
                <Header />
                <div class="app-content">
                    <Switch<Route> render={switch} />
                </div>
                <Footer />
            </div>
        </BrowserRouter>
    }
}
