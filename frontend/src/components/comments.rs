use newsflow_shared::{Comment, NewCommentInput};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::{
    api,
    components::{error_banner::ErrorBanner, loading_spinner::LoadingSpinner},
    utils::format_date,
};

#[derive(Properties, PartialEq)]
pub struct CommentSectionProps {
    pub article_id: String,
}

#[function_component(CommentSection)]
pub fn comment_section(props: &CommentSectionProps) -> Html {
    let comments = use_state(|| Option::<Vec<Comment>>::None);
    let error = use_state(|| Option::<String>::None);
    let reload = use_state(|| 0u32);

    let author = use_state(String::new);
    let email = use_state(String::new);
    let content = use_state(String::new);

    {
        let comments = comments.clone();
        let error = error.clone();
        let article_id = props.article_id.clone();
        use_effect_with((props.article_id.clone(), *reload), move |_| {
            spawn_local(async move {
                match api::fetch_comments(&article_id).await {
                    Ok(data) => comments.set(Some(data)),
                    Err(e) => error.set(Some(e)),
                }
            });
            || ()
        });
    }

    let on_author = {
        let author = author.clone();
        Callback::from(move |e: InputEvent| {
            author.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            email.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_content = {
        let content = content.clone();
        Callback::from(move |e: InputEvent| {
            content.set(e.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };

    let on_submit = {
        let article_id = props.article_id.clone();
        let author = author.clone();
        let email = email.clone();
        let content = content.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let input = NewCommentInput {
                author: (*author).clone(),
                email: (*email).clone(),
                content: (*content).clone(),
            };
            let article_id = article_id.clone();
            let author = author.clone();
            let email = email.clone();
            let content = content.clone();
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::post_comment(&article_id, &input).await {
                    Ok(_) => {
                        author.set(String::new());
                        email.set(String::new());
                        content.set(String::new());
                        error.set(None);
                        reload.set(*reload + 1);
                    },
                    Err(e) => error.set(Some(e)),
                }
            });
        })
    };

    let on_delete = {
        let article_id = props.article_id.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |comment_id: String| {
            let article_id = article_id.clone();
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::delete_comment(&comment_id, &article_id).await {
                    Ok(()) => reload.set(*reload + 1),
                    Err(e) => error.set(Some(e)),
                }
            });
        })
    };

    let dismiss_error = {
        let error = error.clone();
        Callback::from(move |_| error.set(None))
    };

    html! {
        <section class="comment-section">
            <h2 class="section-title">{ "Comments" }</h2>
            {
                if let Some(message) = (*error).clone() {
                    html! { <ErrorBanner message={message} on_dismiss={Some(dismiss_error)} /> }
                } else {
                    html! {}
                }
            }
            {
                match (*comments).clone() {
                    None => html! { <LoadingSpinner /> },
                    Some(comments) if comments.is_empty() => {
                        html! { <p class="empty-hint">{ "No comments yet. Be the first." }</p> }
                    },
                    Some(comments) => html! {
                        <ul class="comment-list">
                            { for comments.iter().map(|comment| {
                                let delete = {
                                    let on_delete = on_delete.clone();
                                    let id = comment.id.clone();
                                    Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
                                };
                                html! {
                                    <li class="comment" key={comment.id.clone()}>
                                        <div class="comment-meta">
                                            <span class="comment-author">{ &comment.author }</span>
                                            <span class="comment-date">{ format_date(comment.created_at) }</span>
                                            <button
                                                type="button"
                                                class="comment-delete"
                                                onclick={delete}
                                                aria-label="Delete comment"
                                            >
                                                { "Delete" }
                                            </button>
                                        </div>
                                        <p class="comment-body">{ &comment.content }</p>
                                    </li>
                                }
                            }) }
                        </ul>
                    },
                }
            }

            <form class="comment-form" onsubmit={on_submit}>
                <div class="form-row">
                    <input
                        type="text"
                        placeholder="Name"
                        value={(*author).clone()}
                        oninput={on_author}
                    />
                    <input
                        type="email"
                        placeholder="Email"
                        value={(*email).clone()}
                        oninput={on_email}
                    />
                </div>
                <textarea
                    placeholder="Share your thoughts"
                    value={(*content).clone()}
                    oninput={on_content}
                />
                <button type="submit" class="button-primary">{ "Post comment" }</button>
            </form>
        </section>
    }
}
