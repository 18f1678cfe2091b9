use filedeck_core::notify::Notice;
use gloo::timers::callback::Timeout;
use yew::prelude::*;

const AUTO_DISMISS_MS: u32 = 4000;

#[derive(Properties, PartialEq)]
pub(crate) struct ToastHostProps {
    pub notices: Vec<Notice>,
    pub on_dismiss: Callback<u64>,
}

#[function_component(ToastHost)]
pub(crate) fn toast_host(props: &ToastHostProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |list: &Vec<Notice>| {
                let handles: Vec<Timeout> = list
                    .iter()
                    .map(|notice| {
                        let on_dismiss = on_dismiss.clone();
                        let id = notice.id;
                        Timeout::new(AUTO_DISMISS_MS, move || on_dismiss.emit(id))
                    })
                    .collect();
                move || drop(handles)
            },
            props.notices.clone(),
        );
    }

    html! {
        <div class="toast-host" aria-live="polite" aria-atomic="true">
            {for props.notices.iter().map(|notice| render_toast(notice, props.on_dismiss.clone()))}
        </div>
    }
}

fn render_toast(notice: &Notice, on_dismiss: Callback<u64>) -> Html {
    let id = notice.id;
    let on_close = Callback::from(move |_| on_dismiss.emit(id));

    html! {
        <div class={classes!("toast", notice.kind.as_str())} role="status">
            <span>{notice.message.clone()}</span>
            <button class="ghost" aria-label="Dismiss" onclick={on_close}>{"✕"}</button>
        </div>
    }
}
