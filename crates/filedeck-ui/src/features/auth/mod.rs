//! Login and registration pages.

pub(crate) mod login;
pub(crate) mod register;

use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Mirror a text input into a state handle.
pub(crate) fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            state.set(input.value());
        }
    })
}
