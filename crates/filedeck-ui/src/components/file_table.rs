use filedeck_core::FileRow;
use yew::prelude::*;

const EMPTY_LIST_TEXT: &str = "No files available.";

#[derive(Properties, PartialEq)]
pub(crate) struct FileTableProps {
    pub rows: Vec<FileRow>,
    pub selected: Vec<i64>,
    pub header_checked: bool,
    pub on_toggle: Callback<i64>,
    pub on_toggle_all: Callback<bool>,
    pub on_view: Callback<i64>,
}

#[function_component(FileTable)]
pub(crate) fn file_table(props: &FileTableProps) -> Html {
    if props.rows.is_empty() {
        return html! { <p class="muted">{EMPTY_LIST_TEXT}</p> };
    }

    let on_header = {
        let on_toggle_all = props.on_toggle_all.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                on_toggle_all.emit(input.checked());
            }
        })
    };

    html! {
        <table>
            <thead>
                <tr>
                    <th>
                        <input
                            type="checkbox"
                            aria-label="Select all"
                            checked={props.header_checked}
                            onchange={on_header}
                        />
                    </th>
                    <th>{"SR No."}</th>
                    <th>{"File Name"}</th>
                    <th>{"File Path"}</th>
                    <th>{"Created At"}</th>
                </tr>
            </thead>
            <tbody>
                {for props.rows.iter().map(|row| render_row(row, props))}
            </tbody>
        </table>
    }
}

fn render_row(row: &FileRow, props: &FileTableProps) -> Html {
    let id = row.record.id;
    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: Event| on_toggle.emit(id))
    };
    let on_view = {
        let on_view = props.on_view.clone();
        Callback::from(move |_: MouseEvent| on_view.emit(id))
    };

    html! {
        <tr key={id}>
            <td>
                <input
                    type="checkbox"
                    checked={props.selected.contains(&id)}
                    onchange={on_toggle}
                />
            </td>
            <td>{row.serial}</td>
            <td>{row.record.file_name.clone()}</td>
            <td><button class="solid" onclick={on_view}>{"View File"}</button></td>
            <td>{row.record.created_at_label()}</td>
        </tr>
    }
}
