use filedeck_core::pagination::PaginationView;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PaginationBarProps {
    pub view: PaginationView,
    pub on_page: Callback<u32>,
}

#[function_component(PaginationBar)]
pub(crate) fn pagination_bar(props: &PaginationBarProps) -> Html {
    let view = &props.view;
    if !view.visible {
        return html! {};
    }
    let go_to = |page: Option<u32>| {
        let on_page = props.on_page.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(page) = page {
                on_page.emit(page);
            }
        })
    };

    html! {
        <nav class="pagination" aria-label="Pagination">
            <button
                class="solid"
                disabled={view.previous_disabled}
                onclick={go_to(view.previous_page)}
            >
                {"Previous"}
            </button>
            <span>{view.label.clone()}</span>
            <button
                class="solid"
                disabled={view.next_disabled}
                onclick={go_to(view.next_page)}
            >
                {"Next"}
            </button>
        </nav>
    }
}
