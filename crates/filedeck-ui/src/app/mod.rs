//! Application root: context providers, routing and the toast host.

use crate::components::guard::ProtectedRoute;
use crate::components::toast::ToastHost;
use crate::features::auth::login::LoginPage;
use crate::features::auth::register::RegisterPage;
use crate::features::files::view::FileManagerPage;
use crate::routes::Route;
use crate::state::{AppStore, app_dispatch};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

pub(crate) mod api;
pub(crate) mod preferences;

use api::ApiCtx;
use preferences::client_config;

#[function_component(FileDeckApp)]
pub(crate) fn filedeck_app() -> Html {
    let api_ctx = use_memo(|_| ApiCtx::new(client_config()), ());
    let notices = use_selector(|store: &AppStore| store.notices.notices().to_vec());
    let on_dismiss = {
        let dispatch = app_dispatch();
        Callback::from(move |id: u64| dispatch.reduce_mut(|store| store.notices.dismiss(id)))
    };

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
            <ToastHost notices={(*notices).clone()} {on_dismiss} />
        </ContextProvider<ApiCtx>>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Redirect<Route> to={Route::Dashboard} /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Dashboard => html! {
            <ProtectedRoute>
                <FileManagerPage />
            </ProtectedRoute>
        },
        Route::NotFound => html! {
            <main class="page">
                <h1>{"Page not found"}</h1>
                <Link<Route> to={Route::Dashboard}>{"Back to your files"}</Link<Route>>
            </main>
        },
    }
}

/// Mount the app on `#root`, or on the body when the element is missing.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<FileDeckApp>::with_root(root).render();
    } else {
        yew::Renderer::<FileDeckApp>::new().render();
    }
}
