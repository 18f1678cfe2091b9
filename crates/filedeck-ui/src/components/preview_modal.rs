use filedeck_core::preview::{PreviewKind, PreviewTarget, UNSUPPORTED_PREVIEW_TEXT};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PreviewModalProps {
    pub target: PreviewTarget,
    pub on_close: Callback<()>,
}

#[function_component(PreviewModal)]
pub(crate) fn preview_modal(props: &PreviewModalProps) -> Html {
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop" role="dialog" aria-modal="true">
            <div class="modal">
                <header>
                    <h3>{"File Preview"}</h3>
                    <button class="ghost" aria-label="Close" onclick={on_close.clone()}>{"✕"}</button>
                </header>
                <div class="body">{preview_body(&props.target)}</div>
                <footer>
                    <span class="muted">{props.target.download_name.clone()}</span>
                    <button onclick={on_close}>{"Close"}</button>
                </footer>
            </div>
        </div>
    }
}

fn download_link(target: &PreviewTarget) -> Html {
    html! {
        <a class="button solid" href={target.url.clone()} download={target.download_name.clone()}>
            {"Download"}
        </a>
    }
}

fn preview_body(target: &PreviewTarget) -> Html {
    match target.kind {
        PreviewKind::Image => html! {
            <img src={target.url.clone()} alt="File Preview" />
        },
        PreviewKind::Pdf => html! {
            <iframe src={target.url.clone()} title="PDF Preview"></iframe>
        },
        PreviewKind::Video => html! {
            <video controls=true>
                <source src={target.url.clone()} type="video/mp4" />
                {"Your browser does not support the video tag."}
            </video>
        },
        PreviewKind::OfficeDocument => html! { <div>{download_link(target)}</div> },
        PreviewKind::Archive => html! {
            <div class="row">
                <span class="folder-icon" aria-hidden="true">{"📁"}</span>
                {download_link(target)}
            </div>
        },
        PreviewKind::Unsupported => html! { <p>{UNSUPPORTED_PREVIEW_TEXT}</p> },
    }
}
