//! pzo-schemas
//!
//! Data and wire types shared by the order form, the HTTP gateway and the
//! test endpoint. No validation or I/O lives here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// Pizza size as offered by the size select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Size {
    S,
    M,
    L,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::S, Size::M, Size::L];

    /// Exact wire value (`"S"`, `"M"`, `"L"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
        }
    }

    /// Option text shown in the size select.
    pub fn label(&self) -> &'static str {
        match self {
            Size::S => "Small",
            Size::M => "Medium",
            Size::L => "Large",
        }
    }

    /// Strict parse: only the exact wire values are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "S" => Some(Size::S),
            "M" => Some(Size::M),
            "L" => Some(Size::L),
            _ => None,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Topping
// ---------------------------------------------------------------------------

/// One entry of the topping catalogue (identifier + display text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topping {
    pub topping_id: String,
    pub text: String,
}

impl Topping {
    pub fn new(topping_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            topping_id: topping_id.into(),
            text: text.into(),
        }
    }
}

/// The catalogue offered when no configuration overrides it.
pub fn default_toppings() -> Vec<Topping> {
    vec![
        Topping::new("1", "Pepperoni"),
        Topping::new("2", "Green Peppers"),
        Topping::new("3", "Pineapple"),
        Topping::new("4", "Mushrooms"),
        Topping::new("5", "Ham"),
    ]
}

// ---------------------------------------------------------------------------
// OrderDraft
// ---------------------------------------------------------------------------

/// In-progress order exactly as the user has entered it.
///
/// `size` is kept as the raw selected value so that anything outside
/// `S | M | L` can still be represented and rejected by validation.
/// Toppings are a set; the ordered set keeps the JSON array deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub full_name: String,
    pub size: String,
    #[serde(default)]
    pub toppings: BTreeSet<String>,
}

impl OrderDraft {
    /// The empty draft every form starts from and returns to after a submission.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_empty() && self.size.is_empty() && self.toppings.is_empty()
    }

    /// Typed view of `size`, `None` when unset or out of range.
    pub fn parsed_size(&self) -> Option<Size> {
        Size::parse(&self.size)
    }
}

// ---------------------------------------------------------------------------
// Endpoint response bodies
// ---------------------------------------------------------------------------

/// Body of both the success and the failure response of `POST /api/order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
