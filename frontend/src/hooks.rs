use yew::prelude::*;

/// Paginate arbitrary vectors inside a component.
///
/// Returns the visible slice, the clamped current page, the total page count
/// and a callback to change pages.
#[hook]
pub fn use_pagination<T>(
    items: Vec<T>,
    items_per_page: usize,
) -> (Vec<T>, usize, usize, Callback<usize>)
where
    T: Clone + PartialEq + 'static,
{
    let per_page = items_per_page.max(1);
    let total_pages = calculate_total_pages(items.len(), per_page);
    let current_page = use_state(|| 1usize);

    {
        let current_page = current_page.clone();
        use_effect_with(total_pages, move |total| {
            let safe_page = clamp_page(*current_page, *total);
            if safe_page != *current_page {
                current_page.set(safe_page);
            }
            || ()
        });
    }

    let memoized_slice = {
        let current_snapshot = *current_page;
        use_memo((items, current_snapshot, per_page), move |(items, page, per_page)| {
            if items.is_empty() {
                return Vec::new();
            }

            let total_pages = calculate_total_pages(items.len(), *per_page);
            let safe_page = clamp_page(*page, total_pages);
            let start = (*per_page).saturating_mul(safe_page - 1);
            let end = usize::min(start + *per_page, items.len());
            items[start..end].to_vec()
        })
    };

    let visible_items = (*memoized_slice).clone();
    let visible_page = clamp_page(*current_page, total_pages);
    let go_to_page = {
        let current_page = current_page.clone();
        Callback::from(move |page: usize| {
            let next_page = clamp_page(page, total_pages);
            if next_page != *current_page {
                current_page.set(next_page);
            }
        })
    };

    (visible_items, visible_page, total_pages, go_to_page)
}

fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.max(1).min(total_pages)
}

fn calculate_total_pages(len: usize, per_page: usize) -> usize {
    if len == 0 {
        1
    } else {
        let numerator = len.saturating_add(per_page - 1);
        usize::max(numerator / per_page, 1)
    }
}
