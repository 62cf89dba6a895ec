//! Field state store: the mutable draft and nothing else.
//!
//! Pure state transitions. Validation and derived state are the controller's
//! job; every method here reports whether the draft actually changed so the
//! caller can decide what to re-derive.

use pzo_schemas::OrderDraft;

use crate::validate::FieldName;

#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    draft: OrderDraft,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Replace the value of a text/select field.
    pub fn set_field(&mut self, field: FieldName, value: &str) -> bool {
        let slot = match field {
            FieldName::FullName => &mut self.draft.full_name,
            FieldName::Size => &mut self.draft.size,
        };
        if slot.as_str() == value {
            return false;
        }
        slot.clear();
        slot.push_str(value);
        true
    }

    /// Add (`selected`) or remove a topping id. Idempotent in both directions.
    pub fn toggle_topping(&mut self, id: &str, selected: bool) -> bool {
        if selected {
            self.draft.toppings.insert(id.to_string())
        } else {
            self.draft.toppings.remove(id)
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.draft.toppings.contains(id)
    }

    /// Back to the empty draft.
    pub fn reset(&mut self) {
        self.draft = OrderDraft::empty();
    }
}
