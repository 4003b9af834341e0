//! Feature builder tests: column order, defaults, derived columns

#[cfg(test)]
mod integration_tests {
    use serde_json::{json, Map, Value};

    use crate::logic::features::{build_row, Cell, ExpectedColumn};
    use crate::logic::normalize::normalize;
    use crate::logic::schema::{expected_columns, FieldKind, SchemaVariant};

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    /// Expected columns straight from the schema, kinds from the field table
    fn schema_columns(variant: SchemaVariant) -> Vec<ExpectedColumn<'static>> {
        expected_columns(variant)
            .into_iter()
            .map(|name| ExpectedColumn {
                name,
                kind: variant
                    .fields()
                    .iter()
                    .find(|f| f.raw == name)
                    .map(|f| f.kind)
                    .unwrap_or(FieldKind::Numeric),
            })
            .collect()
    }

    #[test]
    fn test_row_follows_expected_order() {
        let resolved = normalize(SchemaVariant::Btech, &object(json!({ "CGPA": 8.5, "Gender": "Male" })));
        let expected = vec![
            ExpectedColumn { name: "CGPA", kind: FieldKind::Numeric },
            ExpectedColumn { name: "Gender", kind: FieldKind::Categorical },
        ];

        let row = build_row(&resolved, &expected);

        assert_eq!(row.columns(), &["CGPA".to_string(), "Gender".to_string()]);
        assert_eq!(row.number("CGPA"), Some(8.5));
        assert_eq!(row.category("Gender"), Some("Male"));
        assert!(row.injected().is_empty());
    }

    #[test]
    fn test_every_required_column_present_with_missing_fields() {
        let inputs = [
            json!({}),
            json!({ "CGPA": 9.1 }),
            json!({ "Gender": "Female", "Attandance": "91" }),
        ];
        let expected = schema_columns(SchemaVariant::Btech);

        for input in inputs {
            let resolved = normalize(SchemaVariant::Btech, &object(input));
            let row = build_row(&resolved, &expected);

            assert_eq!(row.len(), expected.len());
            for column in &expected {
                let cell = row.get(column.name).expect("column missing");
                match column.kind {
                    FieldKind::Numeric => assert!(cell.as_number().is_some(), "{}", column.name),
                    FieldKind::Categorical => assert!(cell.as_category().is_some(), "{}", column.name),
                }
            }
        }
    }

    #[test]
    fn test_unknown_transformer_column_is_injected() {
        let resolved = normalize(SchemaVariant::Btech, &Map::new());
        let expected = vec![
            ExpectedColumn { name: "Hostel", kind: FieldKind::Categorical },
            ExpectedColumn { name: "Internships", kind: FieldKind::Numeric },
        ];

        let row = build_row(&resolved, &expected);

        assert_eq!(row.category("Hostel"), Some("Unknown"));
        assert_eq!(row.number("Internships"), Some(0.0));
        assert_eq!(row.injected(), &["Hostel".to_string(), "Internships".to_string()]);
    }

    #[test]
    fn test_cells_coerced_to_expected_kind() {
        let resolved = normalize(
            SchemaVariant::Btech,
            &object(json!({ "Age": 21, "Gender": "42" })),
        );
        // Transformer fitted with Age as a category and Gender as a number
        let expected = vec![
            ExpectedColumn { name: "Age", kind: FieldKind::Categorical },
            ExpectedColumn { name: "Gender", kind: FieldKind::Numeric },
        ];

        let row = build_row(&resolved, &expected);

        assert_eq!(row.get("Age"), Some(&Cell::Category("21".into())));
        assert_eq!(row.get("Gender"), Some(&Cell::Number(42.0)));
    }

    #[test]
    fn test_math_derived_columns() {
        let resolved = normalize(
            SchemaVariant::Math,
            &object(json!({
                "G1": 10, "G2": 14, "G3": 12,
                "studytime": 2, "failures": 1
            })),
        );
        let row = build_row(&resolved, &schema_columns(SchemaVariant::Math));

        assert_eq!(row.len(), 23);
        assert_eq!(row.number("grade_trend"), Some(4.0));
        assert_eq!(row.number("grade_mean"), Some(12.0));
        assert_eq!(row.number("study_failure_load"), Some(2.0));
        let sd = row.number("grade_consistency").unwrap();
        assert!((sd - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_consistency_zero_with_single_grade() {
        let resolved = normalize(SchemaVariant::Math, &object(json!({ "G1": 15 })));
        let row = build_row(&resolved, &schema_columns(SchemaVariant::Math));

        // G2/G3 defaulted to 0 but do not count as samples
        assert_eq!(row.number("grade_consistency"), Some(0.0));
        assert_eq!(row.number("grade_trend"), Some(-15.0));
    }

    #[test]
    fn test_log_entry_lists_values() {
        let resolved = normalize(SchemaVariant::Btech, &object(json!({ "CGPA": 7.0 })));
        let row = build_row(&resolved, &schema_columns(SchemaVariant::Btech));

        let entry = row.to_log_entry();
        assert_eq!(entry["columns"], json!(18));
        assert_eq!(entry["values"]["CGPA"], json!(7.0));
    }
}
