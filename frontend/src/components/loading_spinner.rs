use yew::prelude::*;

#[function_component(LoadingSpinner)]
pub fn loading_spinner() -> Html {
    html! {
        <div class="loading-spinner" role="status" aria-label="Loading">
            <div class="spinner"></div>
        </div>
    }
}
