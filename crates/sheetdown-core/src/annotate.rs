//! Cell annotation
//!
//! Rewrites a [`Cell`] into renderer-ready Markdown. Rules run in a fixed
//! order and build on the running string:
//!
//! 1. formula cells are wrapped in an inline-code span together with their
//!    formula text;
//! 2. dropdown cells get a `<select>` segment listing the options in source
//!    order;
//! 3. checkbox-like values (`TRUE`/`FALSE` and the Portuguese
//!    `VERDADEIRO`/`FALSO`) replace everything with [`CHECKED`] or
//!    [`UNCHECKED`].
//!
//! The checkbox rule looks at the display value, not the running string, so
//! a boolean computed by a formula still renders as a plain checkbox.

use crate::cell::{AnnotatedCell, Cell};
use crate::table::Table;

/// Marker for a checked checkbox
pub const CHECKED: &str = "☒";

/// Marker for an unchecked checkbox
pub const UNCHECKED: &str = "☐";

/// Upper-case lexemes rendered as [`CHECKED`]
pub const TRUE_LEXEMES: &[&str] = &["TRUE", "VERDADEIRO"];

/// Upper-case lexemes rendered as [`UNCHECKED`]
pub const FALSE_LEXEMES: &[&str] = &["FALSE", "FALSO"];

/// Annotate a single cell
pub fn annotate(cell: &Cell) -> AnnotatedCell {
    let mut text = cell.display_value.clone();

    if let Some(formula) = &cell.formula {
        text = format!("`{} [formula: {}]`", text, formula);
    }

    if cell.has_dropdown() {
        text = format!("{} <select>{}</select>", text, cell.dropdown_options.join(", "));
    }

    match checkbox_state(&cell.display_value) {
        Some(true) => CHECKED.to_string(),
        Some(false) => UNCHECKED.to_string(),
        None => text,
    }
}

/// Annotate every cell of a table, keeping row and column order
pub fn annotate_table(table: &Table<Cell>) -> Table<AnnotatedCell> {
    table.map_cells(annotate)
}

/// Classify a value as a checkbox, case-insensitively
fn checkbox_state(value: &str) -> Option<bool> {
    let upper = value.trim().to_uppercase();
    if TRUE_LEXEMES.contains(&upper.as_str()) {
        Some(true)
    } else if FALSE_LEXEMES.contains(&upper.as_str()) {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(annotate(&Cell::new("Alice")), "Alice");
        assert_eq!(annotate(&Cell::new("")), "");
    }

    #[test]
    fn test_formula_wrapped() {
        let cell = Cell::new("42").with_formula("=SUM(A1:A3)");
        assert_eq!(annotate(&cell), "`42 [formula: =SUM(A1:A3)]`");
    }

    #[test]
    fn test_dropdown_options_in_source_order() {
        let cell = Cell::new("Open").with_options(["Open", "Closed", "Archived", "Open"]);
        assert_eq!(
            annotate(&cell),
            "Open <select>Open, Closed, Archived, Open</select>"
        );
    }

    #[test]
    fn test_formula_and_dropdown_compose() {
        let cell = Cell::new("3").with_formula("=1+2").with_options(["1", "3"]);
        assert_eq!(annotate(&cell), "`3 [formula: =1+2]` <select>1, 3</select>");
    }

    #[test]
    fn test_checkbox_lexemes() {
        assert_eq!(annotate(&Cell::new("TRUE")), CHECKED);
        assert_eq!(annotate(&Cell::new("true")), CHECKED);
        assert_eq!(annotate(&Cell::new("Verdadeiro")), CHECKED);
        assert_eq!(annotate(&Cell::new("FALSE")), UNCHECKED);
        assert_eq!(annotate(&Cell::new("falso")), UNCHECKED);
        assert_eq!(annotate(&Cell::new("TRUEISH")), "TRUEISH");
    }

    /// The checkbox rule runs last and replaces formula/dropdown markup.
    #[test]
    fn test_checkbox_overrides_formula_and_dropdown() {
        let cell = Cell::new("TRUE")
            .with_formula("=A1>0")
            .with_options(["TRUE", "FALSE"]);
        assert_eq!(annotate(&cell), CHECKED);

        let cell = Cell::new("FALSE").with_formula("=B2");
        assert_eq!(annotate(&cell), UNCHECKED);
    }

    #[test]
    fn test_annotation_is_not_idempotent() {
        let once = annotate(&Cell::new("1").with_formula("=1"));
        let twice = annotate(&Cell::new(once.clone()).with_formula("=1"));
        assert_ne!(once, twice);
    }

    #[test]
    fn test_annotate_table_keeps_shape() {
        let table = Table::from_rows(vec![
            vec![Cell::new("Name"), Cell::new("Paid")],
            vec![Cell::new("Alice"), Cell::new("TRUE")],
            vec![Cell::new("Bob")],
        ]);
        let annotated = annotate_table(&table);
        assert_eq!(
            annotated.rows(),
            &[
                vec!["Name".to_string(), "Paid".to_string()],
                vec!["Alice".to_string(), CHECKED.to_string()],
                vec!["Bob".to_string()],
            ]
        );
    }

    fn non_boolean() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 ]{0,12}".prop_filter("boolean lexeme", |s| checkbox_state(s).is_none())
    }

    proptest! {
        #[test]
        fn prop_formula_wrapped(value in non_boolean(), formula in "=[A-Z0-9()+:]{1,10}") {
            let out = annotate(&Cell::new(value.clone()).with_formula(formula));
            prop_assert!(out.starts_with('`'));
            prop_assert!(out.ends_with('`'));
            prop_assert!(out.contains(&value));
        }

        #[test]
        fn prop_dropdown_preserves_order(
            value in non_boolean(),
            options in prop::collection::vec("[a-z]{1,6}", 1..6),
        ) {
            let out = annotate(&Cell::new(value).with_options(options.clone()));
            let start = out.find("<select>").unwrap() + "<select>".len();
            let end = out.rfind("</select>").unwrap();
            let listed: Vec<&str> = out[start..end].split(", ").collect();
            prop_assert_eq!(listed, options.iter().map(String::as_str).collect::<Vec<_>>());
        }

        #[test]
        fn prop_boolean_always_checkbox(
            lexeme in prop::sample::select(vec!["TRUE", "FALSE", "VERDADEIRO", "FALSO"]),
            lower in any::<bool>(),
            formula in prop::option::of("=[A-Z0-9]{1,4}"),
            options in prop::collection::vec("[a-z]{1,4}", 0..3),
        ) {
            let value = if lower { lexeme.to_lowercase() } else { lexeme.to_string() };
            let mut cell = Cell::new(value).with_options(options);
            cell.formula = formula;
            let out = annotate(&cell);
            prop_assert!(out == CHECKED || out == UNCHECKED);
        }
    }
}
