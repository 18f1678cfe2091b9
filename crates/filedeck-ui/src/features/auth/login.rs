use crate::app::api::ApiCtx;
use crate::app::preferences::LocalTokenStore;
use crate::features::auth::bind_input;
use crate::routes::Route;
use crate::state::{admit, app_dispatch};
use filedeck_core::auth::{LoginForm, login_failure_text, login_success_text};
use filedeck_core::session::persist_login;
use gloo::console;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let busy = use_state(|| false);
    let error = use_state(|| None as Option<String>);

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = match (LoginForm {
                email: (*email).clone(),
                password: (*password).clone(),
            })
            .into_request()
            {
                Ok(request) => request,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };
            let (Some(api_ctx), Some(navigator)) = (api_ctx.clone(), navigator.clone()) else {
                return;
            };
            error.set(None);
            busy.set(true);
            let busy = busy.clone();
            yew::platform::spawn_local(async move {
                let dispatch = app_dispatch();
                match api_ctx.client.login(&request).await {
                    Ok(response) => {
                        let notice = login_success_text(&response);
                        let token = response.token.filter(|token| !token.trim().is_empty());
                        let Some(token) = token else {
                            console::warn!("login succeeded without a session token");
                            dispatch.reduce_mut(|store| {
                                store.notices.success(notice);
                            });
                            busy.set(false);
                            return;
                        };
                        match persist_login(&LocalTokenStore, &token) {
                            Ok(session) => {
                                dispatch.reduce_mut(|store| {
                                    admit(store, session);
                                    store.notices.success(notice);
                                });
                                navigator.push(&Route::Dashboard);
                            }
                            Err(err) => {
                                console::error!("failed to store session", err.to_string());
                                dispatch.reduce_mut(|store| {
                                    store.notices.error(login_failure_text(None));
                                });
                            }
                        }
                    }
                    Err(err) => {
                        let text = login_failure_text(err.body());
                        dispatch.reduce_mut(|store| {
                            store.notices.error(text);
                        });
                    }
                }
                busy.set(false);
            });
        })
    };

    html! {
        <main class="page auth-card">
            <h1>{"Log in"}</h1>
            <form onsubmit={on_submit}>
                <label class="stack">
                    {"Email"}
                    <input type="email" required=true value={(*email).clone()} oninput={bind_input(&email)} />
                </label>
                <label class="stack">
                    {"Password"}
                    <input
                        type="password"
                        required=true
                        value={(*password).clone()}
                        oninput={bind_input(&password)}
                    />
                </label>
                if let Some(message) = (*error).clone() {
                    <p class="error-text">{message}</p>
                }
                <button class="solid" type="submit" disabled={*busy}>{"Log in"}</button>
            </form>
            <p class="muted">
                {"No account yet? "}
                <Link<Route> to={Route::Register}>{"Register"}</Link<Route>>
            </p>
        </main>
    }
}
