use newsflow_shared::{
    ArticleListItem, ArticlePatch, Category, NewArticleInput, NewCategoryInput,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::{
    api::{self, ArticleListParams},
    components::{error_banner::ErrorBanner, loading_spinner::LoadingSpinner},
    utils::{format_date, parse_tags},
};

/// Editable article form fields, kept as plain strings until submit.
#[derive(Clone, Default, PartialEq)]
struct ArticleForm {
    editing: Option<String>,
    title: String,
    excerpt: String,
    content: String,
    author: String,
    author_title: String,
    category: String,
    tags: String,
    image_url: String,
    published: bool,
    featured: bool,
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[function_component(AdminPage)]
pub fn admin_page() -> Html {
    let articles = use_state(|| Option::<Vec<ArticleListItem>>::None);
    let categories = use_state(|| Option::<Vec<Category>>::None);
    let reload = use_state(|| 0u32);
    let error = use_state(|| Option::<String>::None);
    let form = use_state(ArticleForm::default);

    let category_name = use_state(String::new);
    let category_color = use_state(String::new);

    {
        let articles = articles.clone();
        let categories = categories.clone();
        let error = error.clone();
        use_effect_with(*reload, move |_| {
            spawn_local(async move {
                match api::fetch_articles(&ArticleListParams::default()).await {
                    Ok(data) => articles.set(Some(data)),
                    Err(e) => error.set(Some(e)),
                }
                match api::fetch_categories().await {
                    Ok(data) => categories.set(Some(data)),
                    Err(e) => error.set(Some(e)),
                }
            });
            || ()
        });
    }

    // Text field helper: each closure owns the form handle and patches one field.
    macro_rules! text_field {
        ($field:ident) => {{
            let form = form.clone();
            Callback::from(move |e: InputEvent| {
                let mut next = (*form).clone();
                next.$field = e.target_unchecked_into::<HtmlInputElement>().value();
                form.set(next);
            })
        }};
    }
    macro_rules! flag_field {
        ($field:ident) => {{
            let form = form.clone();
            Callback::from(move |e: Event| {
                let mut next = (*form).clone();
                next.$field = e.target_unchecked_into::<HtmlInputElement>().checked();
                form.set(next);
            })
        }};
    }

    let on_title = text_field!(title);
    let on_excerpt = text_field!(excerpt);
    let on_author = text_field!(author);
    let on_author_title = text_field!(author_title);
    let on_category = text_field!(category);
    let on_tags = text_field!(tags);
    let on_image_url = text_field!(image_url);
    let on_published = flag_field!(published);
    let on_featured = flag_field!(featured);
    let on_content = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*form).clone();
            next.content = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let snapshot = (*form).clone();
            let form = form.clone();
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                let outcome = match snapshot.editing.as_deref() {
                    Some(id) => {
                        let patch = ArticlePatch {
                            title: Some(snapshot.title.clone()),
                            excerpt: Some(snapshot.excerpt.clone()),
                            content: Some(snapshot.content.clone()),
                            author: Some(snapshot.author.clone()),
                            author_title: optional(&snapshot.author_title),
                            category: Some(snapshot.category.clone()),
                            tags: Some(parse_tags(&snapshot.tags)),
                            image_url: optional(&snapshot.image_url),
                            published: Some(snapshot.published),
                            featured: Some(snapshot.featured),
                            ..Default::default()
                        };
                        api::update_article(id, &patch).await.map(|_| ())
                    },
                    None => {
                        let input = NewArticleInput {
                            title: snapshot.title.clone(),
                            excerpt: snapshot.excerpt.clone(),
                            content: snapshot.content.clone(),
                            author: snapshot.author.clone(),
                            author_title: optional(&snapshot.author_title),
                            category: snapshot.category.clone(),
                            tags: parse_tags(&snapshot.tags),
                            image_url: optional(&snapshot.image_url),
                            published: snapshot.published,
                            featured: snapshot.featured,
                            ..Default::default()
                        };
                        api::create_article(&input).await.map(|_| ())
                    },
                };
                match outcome {
                    Ok(()) => {
                        form.set(ArticleForm::default());
                        error.set(None);
                        reload.set(*reload + 1);
                    },
                    Err(e) => error.set(Some(e)),
                }
            });
        })
    };

    let on_edit = {
        let form = form.clone();
        let error = error.clone();
        Callback::from(move |id: String| {
            let form = form.clone();
            let error = error.clone();
            spawn_local(async move {
                match api::fetch_article(&id).await {
                    Ok(article) => form.set(ArticleForm {
                        editing: Some(article.id),
                        title: article.title,
                        excerpt: article.excerpt,
                        content: article.content,
                        author: article.author,
                        author_title: article.author_title.unwrap_or_default(),
                        category: article.category,
                        tags: article.tags.join(", "),
                        image_url: article.image_url.unwrap_or_default(),
                        published: article.published,
                        featured: article.featured,
                    }),
                    Err(e) => error.set(Some(e)),
                }
            });
        })
    };

    let on_cancel_edit = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| form.set(ArticleForm::default()))
    };

    let on_delete = {
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |id: String| {
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::delete_article(&id).await {
                    Ok(()) => reload.set(*reload + 1),
                    Err(e) => error.set(Some(e)),
                }
            });
        })
    };

    let on_category_name = {
        let category_name = category_name.clone();
        Callback::from(move |e: InputEvent| {
            category_name.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_category_color = {
        let category_color = category_color.clone();
        Callback::from(move |e: InputEvent| {
            category_color.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_category_submit = {
        let category_name = category_name.clone();
        let category_color = category_color.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let input = NewCategoryInput {
                name: (*category_name).clone(),
                color: optional(&category_color),
                ..Default::default()
            };
            let category_name = category_name.clone();
            let category_color = category_color.clone();
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::create_category(&input).await {
                    Ok(_) => {
                        category_name.set(String::new());
                        category_color.set(String::new());
                        error.set(None);
                        reload.set(*reload + 1);
                    },
                    Err(e) => error.set(Some(e)),
                }
            });
        })
    };

    let on_category_delete = {
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |id: String| {
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::delete_category(&id).await {
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

    let editing = form.editing.is_some();

    html! {
        <main class="main admin-page">
            <div class="container">
                <section class="page-section">
                    <h1 class="page-title">{ "Newsroom admin" }</h1>
                </section>

                {
                    if let Some(message) = (*error).clone() {
                        html! { <ErrorBanner message={message} on_dismiss={Some(dismiss_error)} /> }
                    } else {
                        html! {}
                    }
                }

                <section class="admin-section" aria-label="Article editor">
                    <h2 class="section-title">
                        { if editing { "Edit article" } else { "New article" } }
                    </h2>
                    <form class="admin-form" onsubmit={on_submit}>
                        <input type="text" placeholder="Title" value={form.title.clone()} oninput={on_title} />
                        <input type="text" placeholder="Excerpt" value={form.excerpt.clone()} oninput={on_excerpt} />
                        <textarea placeholder="Content" value={form.content.clone()} oninput={on_content} />
                        <div class="form-row">
                            <input type="text" placeholder="Author" value={form.author.clone()} oninput={on_author} />
                            <input type="text" placeholder="Author title" value={form.author_title.clone()} oninput={on_author_title} />
                        </div>
                        <div class="form-row">
                            <input type="text" placeholder="Category" value={form.category.clone()} oninput={on_category} />
                            <input type="text" placeholder="Tags (comma separated)" value={form.tags.clone()} oninput={on_tags} />
                        </div>
                        <input type="text" placeholder="Image URL" value={form.image_url.clone()} oninput={on_image_url} />
                        <div class="form-row form-flags">
                            <label>
                                <input type="checkbox" checked={form.published} onchange={on_published} />
                                { "Published" }
                            </label>
                            <label>
                                <input type="checkbox" checked={form.featured} onchange={on_featured} />
                                { "Featured" }
                            </label>
                        </div>
                        <div class="form-row">
                            <button type="submit" class="button-primary">
                                { if editing { "Save changes" } else { "Create article" } }
                            </button>
                            {
                                if editing {
                                    html! {
                                        <button type="button" class="button-secondary" onclick={on_cancel_edit}>
                                            { "Cancel" }
                                        </button>
                                    }
                                } else {
                                    html! {}
                                }
                            }
                        </div>
                    </form>
                </section>

                <section class="admin-section" aria-label="Article list">
                    <h2 class="section-title">{ "Articles" }</h2>
                    {
                        match (*articles).clone() {
                            None => html! { <LoadingSpinner /> },
                            Some(articles) if articles.is_empty() => {
                                html! { <p class="empty-hint">{ "No articles yet." }</p> }
                            },
                            Some(articles) => html! {
                                <ul class="admin-list">
                                    { for articles.iter().map(|article| {
                                        let edit = {
                                            let on_edit = on_edit.clone();
                                            let id = article.id.clone();
                                            Callback::from(move |_: MouseEvent| on_edit.emit(id.clone()))
                                        };
                                        let delete = {
                                            let on_delete = on_delete.clone();
                                            let id = article.id.clone();
                                            Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
                                        };
                                        html! {
                                            <li class="admin-row" key={article.id.clone()}>
                                                <div class="admin-row-main">
                                                    <span class="admin-row-title">{ &article.title }</span>
                                                    <span class="admin-row-meta">
                                                        { format!(
                                                            "{} · {} · {}",
                                                            article.category,
                                                            format_date(article.created_at),
                                                            if article.published { "published" } else { "draft" },
                                                        ) }
                                                    </span>
                                                </div>
                                                <div class="admin-row-actions">
                                                    <button type="button" onclick={edit}>{ "Edit" }</button>
                                                    <button type="button" class="danger" onclick={delete}>
                                                        { "Delete" }
                                                    </button>
                                                </div>
                                            </li>
                                        }
                                    }) }
                                </ul>
                            },
                        }
                    }
                </section>

                <section class="admin-section" aria-label="Category management">
                    <h2 class="section-title">{ "Categories" }</h2>
                    <form class="admin-form form-row" onsubmit={on_category_submit}>
                        <input
                            type="text"
                            placeholder="Name"
                            value={(*category_name).clone()}
                            oninput={on_category_name}
                        />
                        <input
                            type="text"
                            placeholder="Color token"
                            value={(*category_color).clone()}
                            oninput={on_category_color}
                        />
                        <button type="submit" class="button-primary">{ "Add" }</button>
                    </form>
                    {
                        match (*categories).clone() {
                            None => html! { <LoadingSpinner /> },
                            Some(categories) => html! {
                                <ul class="admin-list">
                                    { for categories.iter().map(|category| {
                                        let delete = {
                                            let on_category_delete = on_category_delete.clone();
                                            let id = category.id.clone();
                                            Callback::from(move |_: MouseEvent| {
                                                on_category_delete.emit(id.clone())
                                            })
                                        };
                                        html! {
                                            <li class="admin-row" key={category.id.clone()}>
                                                <div class="admin-row-main">
                                                    <span class="admin-row-title">{ &category.name }</span>
                                                    <span class="admin-row-meta">{ &category.slug }</span>
                                                </div>
                                                <div class="admin-row-actions">
                                                    <button type="button" class="danger" onclick={delete}>
                                                        { "Delete" }
                                                    </button>
                                                </div>
                                            </li>
                                        }
                                    }) }
                                </ul>
                            },
                        }
                    }
                </section>
            </div>
        </main>
    }
}
