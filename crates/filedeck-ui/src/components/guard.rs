//! Session gate for protected routes.

use crate::app::preferences::LocalTokenStore;
use crate::routes::Route;
use crate::state::{admit, app_dispatch};
use filedeck_core::Session;
use filedeck_core::guard;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ProtectedRouteProps {
    #[prop_or_default]
    pub children: Children,
}

/// Renders `children` with the session in context, or redirects to login.
/// The token store is re-read on every render, so a token cleared elsewhere
/// sends the next render back to login.
#[function_component(ProtectedRoute)]
pub(crate) fn protected_route(props: &ProtectedRouteProps) -> Html {
    let session = guard::check(&LocalTokenStore).session();

    {
        let session = session.clone();
        use_effect_with_deps(
            move |session: &Option<Session>| {
                if let Some(session) = session.clone() {
                    app_dispatch().reduce_mut(|store| admit(store, session));
                }
                || ()
            },
            session,
        );
    }

    match session {
        Some(session) => html! {
            <ContextProvider<Session> context={session}>
                {for props.children.iter()}
            </ContextProvider<Session>>
        },
        None => html! { <Redirect<Route> to={Route::Login} /> },
    }
}
