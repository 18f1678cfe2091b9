//! File manager page: upload, search, bulk delete, the file table and the
//! preview modal.

use crate::app::api::ApiCtx;
use crate::app::preferences::LocalTokenStore;
use crate::components::file_table::FileTable;
use crate::components::pagination::PaginationBar;
use crate::components::preview_modal::PreviewModal;
use crate::features::files::actions::{delete_selected, load_page, search, upload};
use crate::routes::Route;
use crate::state::{AppStore, app_dispatch, sign_out};
use filedeck_core::Session;
use filedeck_core::session::end_session;
use gloo::console;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(FileManagerPage)]
pub(crate) fn file_manager_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let session = use_context::<Session>();
    let navigator = use_navigator();
    let files = use_selector(|store: &AppStore| store.files.clone());
    let chosen = use_state(|| None as Option<web_sys::File>);
    let file_input = use_node_ref();
    let dispatch = app_dispatch();

    {
        let api_ctx = api_ctx.clone();
        let session = session.clone();
        use_effect_with_deps(
            move |_| {
                if let (Some(api_ctx), Some(session)) = (api_ctx, session) {
                    load_page(api_ctx.client.clone(), session, 1);
                }
                || ()
            },
            session.as_ref().map(Session::token).map(str::to_string),
        );
    }

    let (Some(api_ctx), Some(session)) = (api_ctx, session) else {
        return html! {
            <main class="page">
                <p class="error-text">{"Missing session context."}</p>
            </main>
        };
    };
    let client = api_ctx.client.clone();

    let on_logout = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| {
            if let Err(err) = end_session(&LocalTokenStore) {
                console::error!("failed to clear session", err.to_string());
            }
            dispatch.reduce_mut(sign_out);
            if let Some(navigator) = navigator.as_ref() {
                navigator.push(&Route::Login);
            }
        })
    };

    let on_choose = {
        let chosen = chosen.clone();
        Callback::from(move |e: Event| {
            let file = e
                .target_dyn_into::<HtmlInputElement>()
                .and_then(|input| input.files())
                .and_then(|list| list.get(0));
            chosen.set(file);
        })
    };

    let on_upload = {
        let client = client.clone();
        let session = session.clone();
        let chosen = chosen.clone();
        let file_input = file_input.clone();
        Callback::from(move |_: MouseEvent| {
            let chosen_after = chosen.clone();
            let file_input = file_input.clone();
            upload(client.clone(), session.clone(), (*chosen).clone(), move || {
                chosen_after.set(None);
                if let Some(input) = file_input.cast::<HtmlInputElement>() {
                    input.set_value("");
                }
            });
        })
    };

    let on_query = {
        let dispatch = dispatch.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let value = input.value();
                dispatch.reduce_mut(|store| store.files.set_search_query(value));
            }
        })
    };

    let on_search = {
        let client = client.clone();
        let session = session.clone();
        Callback::from(move |_: MouseEvent| search(client.clone(), session.clone()))
    };

    let on_delete = {
        let client = client.clone();
        let session = session.clone();
        Callback::from(move |_: MouseEvent| delete_selected(client.clone(), session.clone()))
    };

    let on_page = {
        let client = client.clone();
        let session = session.clone();
        Callback::from(move |page: u32| load_page(client.clone(), session.clone(), page))
    };

    let on_toggle = {
        let dispatch = dispatch.clone();
        Callback::from(move |id: i64| dispatch.reduce_mut(|store| store.files.toggle_selected(id)))
    };
    let on_toggle_all = {
        let dispatch = dispatch.clone();
        Callback::from(move |checked: bool| {
            dispatch.reduce_mut(|store| store.files.set_all_selected(checked));
        })
    };
    let on_view = {
        let dispatch = dispatch.clone();
        Callback::from(move |id: i64| {
            dispatch.reduce_mut(|store| {
                store.files.open_preview(id);
            });
        })
    };
    let on_close_preview = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| dispatch.reduce_mut(|store| store.files.close_preview()))
    };

    let preview = files.preview_target(client.config());

    html! {
        <main class="page">
            <div class="title-row">
                <h1>{session.welcome_message()}</h1>
                <button class="danger" onclick={on_logout}>{"Log Out"}</button>
            </div>

            <section class="row">
                <input type="file" ref={file_input} onchange={on_choose} />
                <button class="solid" onclick={on_upload}>{"Upload File"}</button>
            </section>

            <section class="row">
                <input
                    type="text"
                    placeholder="Search files"
                    value={files.search_query().to_string()}
                    oninput={on_query}
                />
                <button class="solid" onclick={on_search}>{"Search"}</button>
            </section>

            <section class="row">
                <button class="danger" onclick={on_delete}>{"Delete Selected Files"}</button>
            </section>

            <section>
                <h2>{"List of Uploaded Files"}</h2>
                <FileTable
                    rows={files.rows()}
                    selected={files.selection().ids()}
                    header_checked={files.header_checked()}
                    {on_toggle}
                    {on_toggle_all}
                    {on_view}
                />
            </section>

            <PaginationBar view={files.pagination_view()} {on_page} />

            if let Some(target) = preview {
                <PreviewModal {target} on_close={on_close_preview} />
            }
        </main>
    }
}
