use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: String,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

/// Transient notification for failed requests; prior page state stays as-is.
#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    let dismiss = props.on_dismiss.clone().map(|callback| {
        Callback::from(move |_: MouseEvent| callback.emit(()))
    });

    html! {
        <div class="error-banner" role="alert">
            <span class="error-message">{ &props.message }</span>
            {
                if let Some(onclick) = dismiss {
                    html! {
                        <button type="button" class="error-dismiss" {onclick} aria-label="Dismiss">
                            { "×" }
                        </button>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
