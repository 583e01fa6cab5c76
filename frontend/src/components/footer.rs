use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <div class="container">
                <p class="footer-text">
                    { "NewsFlow — independent reporting, updated daily." }
                </p>
            </div>
        </footer>
    }
}
