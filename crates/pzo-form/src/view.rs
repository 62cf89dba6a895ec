//! Rendering surface as plain data.
//!
//! [`FormView::build`] snapshots a controller into everything a host needs to
//! draw the form: bound values, select options, checkboxes, the submit
//! control's disabled flag, inline errors and the outcome banner. Hosts only
//! render; they never compute any of it themselves.

use pzo_schemas::{Size, Topping};
use serde::Serialize;

use crate::controller::OrderFormController;
use crate::gateway::{Outcome, OutcomeKind};
use crate::validate::FieldName;

pub const FORM_TITLE: &str = "Order Your Pizza";
pub const FULL_NAME_LABEL: &str = "Full Name";
pub const FULL_NAME_PLACEHOLDER: &str = "Type full name";
pub const SIZE_LABEL: &str = "Size";
pub const SIZE_PLACEHOLDER: &str = "----Choose Size----";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checkbox {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub kind: OutcomeKind,
    pub message: String,
}

impl Banner {
    /// CSS-style class of the banner element.
    pub fn class(&self) -> &'static str {
        self.kind.as_str()
    }
}

impl From<&Outcome> for Banner {
    fn from(o: &Outcome) -> Self {
        Self {
            kind: o.kind,
            message: o.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub title: &'static str,
    pub banner: Option<Banner>,
    pub full_name: String,
    pub full_name_error: Option<String>,
    pub size_options: Vec<SelectOption>,
    pub size_error: Option<String>,
    pub toppings: Vec<Checkbox>,
    pub submit_disabled: bool,
}

impl FormView {
    /// Snapshot `form`, rendering one checkbox per catalogue entry.
    pub fn build(form: &OrderFormController, catalogue: &[Topping]) -> Self {
        let draft = form.draft();

        let mut size_options = Vec::with_capacity(Size::ALL.len() + 1);
        size_options.push(SelectOption {
            value: String::new(),
            label: SIZE_PLACEHOLDER.to_string(),
            selected: draft.size.is_empty(),
        });
        for s in Size::ALL {
            size_options.push(SelectOption {
                value: s.as_str().to_string(),
                label: s.label().to_string(),
                selected: draft.size == s.as_str(),
            });
        }

        let toppings = catalogue
            .iter()
            .map(|t| Checkbox {
                value: t.topping_id.clone(),
                label: t.text.clone(),
                checked: draft.toppings.contains(&t.topping_id),
            })
            .collect();

        let errors = form.errors();

        Self {
            title: FORM_TITLE,
            banner: form.outcome().map(Banner::from),
            full_name: draft.full_name.clone(),
            full_name_error: errors.get(FieldName::FullName).map(str::to_string),
            size_options,
            size_error: errors.get(FieldName::Size).map(str::to_string),
            toppings,
            submit_disabled: !form.submit_enabled(),
        }
    }

    /// Value currently shown in the select, `""` for the placeholder.
    pub fn selected_size(&self) -> &str {
        self.size_options
            .iter()
            .find(|o| o.selected)
            .map(|o| o.value.as_str())
            .unwrap_or("")
    }
}
