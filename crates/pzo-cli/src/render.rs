//! Plain-text rendering of a [`FormView`] for the terminal host.

use pzo_form::view::{FormView, FULL_NAME_LABEL, FULL_NAME_PLACEHOLDER, SIZE_LABEL};
use std::fmt::Write as _;

pub fn render_text(view: &FormView) -> String {
    let mut s = String::new();

    let _ = writeln!(s, "== {} ==", view.title);
    if let Some(b) = &view.banner {
        let _ = writeln!(s, "[{}] {}", b.class(), b.message);
    }

    let name = if view.full_name.is_empty() {
        format!("<{FULL_NAME_PLACEHOLDER}>")
    } else {
        view.full_name.clone()
    };
    let _ = writeln!(s, "{FULL_NAME_LABEL}: {name}");
    if let Some(e) = &view.full_name_error {
        let _ = writeln!(s, "  ! {e}");
    }

    let size = view
        .size_options
        .iter()
        .find(|o| o.selected)
        .map(|o| o.label.as_str())
        .unwrap_or("<invalid>");
    let choices: Vec<String> = view
        .size_options
        .iter()
        .filter(|o| !o.value.is_empty())
        .map(|o| format!("{}={}", o.value, o.label))
        .collect();
    let _ = writeln!(s, "{SIZE_LABEL}: {size}  ({})", choices.join(", "));
    if let Some(e) = &view.size_error {
        let _ = writeln!(s, "  ! {e}");
    }

    let _ = writeln!(s, "Toppings:");
    for c in &view.toppings {
        let mark = if c.checked { 'x' } else { ' ' };
        let _ = writeln!(s, "  [{mark}] {} {}", c.value, c.label);
    }

    let submit = if view.submit_disabled {
        "[ Submit ] (disabled)"
    } else {
        "[ Submit ]"
    };
    let _ = writeln!(s, "{submit}");
    s
}
