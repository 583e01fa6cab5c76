use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub current_page: usize,
    pub total_pages: usize,
    pub on_page_change: Callback<usize>,
}

#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    if props.total_pages <= 1 {
        return Html::default();
    }

    let total_pages = props.total_pages;
    let current_page = props.current_page.clamp(1, total_pages);
    let on_page_change = props.on_page_change.clone();

    let prev_onclick = {
        let on_page_change = on_page_change.clone();
        Callback::from(move |_| {
            if current_page > 1 {
                on_page_change.emit(current_page - 1);
            }
        })
    };

    let next_onclick = {
        let on_page_change = on_page_change.clone();
        Callback::from(move |_| {
            if current_page < total_pages {
                on_page_change.emit(current_page + 1);
            }
        })
    };

    html! {
        <nav class="pagination" aria-label="Pagination">
            <button
                type="button"
                class="page-button"
                disabled={current_page <= 1}
                onclick={prev_onclick}
                aria-label="Previous page"
            >
                { "<" }
            </button>
            { for (1..=total_pages).map(|page| {
                let onclick = {
                    let on_page_change = on_page_change.clone();
                    Callback::from(move |_| on_page_change.emit(page))
                };
                html! {
                    <button
                        key={format!("page-{page}")}
                        type="button"
                        class={classes!("page-button", (page == current_page).then_some("page-current"))}
                        disabled={page == current_page}
                        {onclick}
                    >
                        { page }
                    </button>
                }
            }) }
            <button
                type="button"
                class="page-button"
                disabled={current_page >= total_pages}
                onclick={next_onclick}
                aria-label="Next page"
            >
                { ">" }
            </button>
        </nav>
    }
}
