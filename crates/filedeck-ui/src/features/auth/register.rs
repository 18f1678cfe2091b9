use crate::app::api::ApiCtx;
use crate::features::auth::bind_input;
use crate::routes::Route;
use crate::state::app_dispatch;
use filedeck_core::auth::{RegisterForm, register_failure_text, register_success_text};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(RegisterPage)]
pub(crate) fn register_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let busy = use_state(|| false);
    let error = use_state(|| None as Option<String>);

    let on_submit = {
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = match (RegisterForm {
                name: (*name).clone(),
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
                match api_ctx.client.register(&request).await {
                    Ok(response) => {
                        let text = register_success_text(&response);
                        dispatch.reduce_mut(|store| {
                            store.notices.success(text);
                        });
                        navigator.push(&Route::Login);
                    }
                    Err(err) => {
                        let text = register_failure_text(err.body());
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
            <h1>{"Register"}</h1>
            <form onsubmit={on_submit}>
                <label class="stack">
                    {"Name"}
                    <input type="text" required=true value={(*name).clone()} oninput={bind_input(&name)} />
                </label>
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
                <button class="solid" type="submit" disabled={*busy}>{"Register"}</button>
            </form>
            <p class="muted">
                {"Already registered? "}
                <Link<Route> to={Route::Login}>{"Log in"}</Link<Route>>
            </p>
        </main>
    }
}
