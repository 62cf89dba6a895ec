//! Validation and derived-state properties of the order form, driven only
//! through the controller's input events.

use pzo_form::{
    FieldName, OrderFormController, FULL_NAME_REQUIRED, FULL_NAME_TOO_LONG, FULL_NAME_TOO_SHORT,
    SIZE_INCORRECT, SIZE_REQUIRED,
};

const TOPPING_SETS: &[&[&str]] = &[&[], &["1"], &["2", "4"], &["1", "2", "3", "4", "5"]];

fn form_with(full_name: &str, size: &str, toppings: &[&str]) -> OrderFormController {
    let mut f = OrderFormController::new();
    f.set_field(FieldName::FullName, full_name);
    f.set_field(FieldName::Size, size);
    for t in toppings {
        f.toggle_topping(t, true);
    }
    f
}

#[test]
fn valid_name_and_size_enable_submit_for_any_toppings() {
    for len in 3..=20 {
        let name = "n".repeat(len);
        for size in ["S", "M", "L"] {
            for toppings in TOPPING_SETS {
                let f = form_with(&name, size, toppings);
                assert!(
                    f.submit_enabled(),
                    "len={len} size={size} toppings={toppings:?} must enable submit"
                );
                assert!(f.errors().is_clear());
            }
        }
    }
}

#[test]
fn full_name_error_by_length() {
    for len in 0..=30 {
        let f = form_with(&"a".repeat(len), "M", &[]);
        let expected = match len {
            0 => Some(FULL_NAME_REQUIRED),
            1 | 2 => Some(FULL_NAME_TOO_SHORT),
            3..=20 => None,
            _ => Some(FULL_NAME_TOO_LONG),
        };
        assert_eq!(f.errors().get(FieldName::FullName), expected, "len={len}");
        assert_eq!(f.submit_enabled(), expected.is_none(), "len={len}");
    }
}

#[test]
fn size_error_by_value() {
    let cases = [
        ("", Some(SIZE_REQUIRED)),
        ("S", None),
        ("M", None),
        ("L", None),
        ("XL", Some(SIZE_INCORRECT)),
        ("small", Some(SIZE_INCORRECT)),
        ("l", Some(SIZE_INCORRECT)),
    ];
    for (size, expected) in cases {
        let f = form_with("Alice Smith", size, &[]);
        assert_eq!(f.errors().get(FieldName::Size), expected, "size={size:?}");
        assert_eq!(f.submit_enabled(), expected.is_none(), "size={size:?}");
    }
}

#[test]
fn toggle_round_trip_leaves_toppings_unchanged() {
    for base in TOPPING_SETS {
        let mut f = form_with("Alice Smith", "L", base);
        let before = f.draft().toppings.clone();
        for id in ["1", "3", "5", "99"] {
            if before.contains(id) {
                continue;
            }
            f.toggle_topping(id, true);
            f.toggle_topping(id, false);
        }
        assert_eq!(f.draft().toppings, before, "base={base:?}");
    }
}

#[test]
fn scenario_short_name() {
    let f = form_with("Al", "M", &[]);
    assert_eq!(
        f.errors().get(FieldName::FullName),
        Some("full name must be at least 3 characters")
    );
    assert!(!f.submit_enabled());
}

#[test]
fn scenario_missing_size() {
    let mut f = OrderFormController::new();
    f.set_field(FieldName::FullName, "Alice Smith");
    f.set_field(FieldName::Size, "");
    f.toggle_topping("1", true);
    f.toggle_topping("3", true);
    assert_eq!(f.errors().get(FieldName::Size), Some("Size is required"));
    assert!(!f.submit_enabled());
}

#[test]
fn scenario_valid_draft() {
    let f = form_with("Alice Smith", "L", &["2"]);
    assert!(f.errors().is_clear());
    assert!(f.submit_enabled());
}

#[test]
fn topping_toggle_never_writes_field_errors() {
    let mut f = OrderFormController::new();
    f.set_field(FieldName::FullName, "Al");
    let errors_before = f.errors().clone();
    f.toggle_topping("1", true);
    f.toggle_topping("1", false);
    assert_eq!(f.errors(), &errors_before);
}
