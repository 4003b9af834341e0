//! Normalizer tests across both schema variants

use serde_json::{json, Map, Value};

use super::{normalize, AttributeValue};
use crate::logic::schema::SchemaVariant;

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("test input must be an object"),
    }
}

fn btech_clean() -> Map<String, Value> {
    object(json!({
        "Gender": "Female",
        "Age": 20,
        "CGPA": 7.9,
        "Matriculation_Percentage": 82,
        "Intermediate_Percentage": 80,
        "Data_Structures_And_Algorithm_Marks": 70,
        "DBMS_Marks": 65,
        "Number_of_backlogs": 1,
        "Number_of_Reappears": 0,
        "History_of_Reappear_Backlogs": "Yes",
        "Programming_proficiency": "Intermediate",
        "GitHub_total_repositories": 1,
        "GitHub_commits_per_month": 1,
        "Experience_with_frameworks": "Django",
        "English_proficiency": "Average",
        "Coding_practice_hours_per_week": 4,
        "Aptitude_score": 60,
        "Attandance": 85
    }))
}

#[test]
fn test_clean_keys_resolve_completely() {
    let resolved = normalize(SchemaVariant::Btech, &btech_clean());

    assert!(resolved.is_complete());
    assert_eq!(resolved.len(), 18);
    assert_eq!(resolved.number("CGPA"), 7.9);
    assert_eq!(resolved.text("Experience_with_frameworks"), "Django");
}

#[test]
fn test_raw_keys_resolve() {
    let input = object(json!({
        "Matriculation Percentage": 88,
        "GitHub commits/month": 6,
        "History of Reappear/Backlogs": "No"
    }));
    let resolved = normalize(SchemaVariant::Btech, &input);

    assert_eq!(resolved.number("Matriculation_Percentage"), 88.0);
    assert_eq!(resolved.number("GitHub_commits_per_month"), 6.0);
    assert_eq!(resolved.text("History_of_Reappear_Backlogs"), "No");
}

#[test]
fn test_case_and_whitespace_tolerated() {
    let input = object(json!({
        "  dbms marks ": 78,
        "cgpa": 8.1,
        "aptitude_SCORE": "72"
    }));
    let resolved = normalize(SchemaVariant::Btech, &input);

    assert_eq!(resolved.number("DBMS_Marks"), 78.0);
    assert_eq!(resolved.number("CGPA"), 8.1);
    assert_eq!(resolved.number("Aptitude_score"), 72.0);
    assert!(resolved.was_supplied("Aptitude_score"));
}

#[test]
fn test_canonical_wins_over_raw() {
    // canonical `study_time`, raw `studytime`
    let input = object(json!({ "study_time": 2, "studytime": 4 }));
    let resolved = normalize(SchemaVariant::Math, &input);
    assert_eq!(resolved.number("study_time"), 2.0);

    let input = object(json!({ "Age": 21, "age": 99 }));
    let resolved = normalize(SchemaVariant::Math, &input);
    assert_eq!(resolved.number("age"), 99.0);

    let input = object(json!({ "Number_of_backlogs": 1, "Number of backlogs": 5 }));
    let resolved = normalize(SchemaVariant::Btech, &input);
    assert_eq!(resolved.number("Number_of_backlogs"), 1.0);
}

#[test]
fn test_raw_case_insensitive_before_canonical_case_insensitive() {
    let input = object(json!({ "number of backlogs": 3, "number_of_backlogs": 7 }));
    let resolved = normalize(SchemaVariant::Btech, &input);
    assert_eq!(resolved.number("Number_of_backlogs"), 3.0);
}

#[test]
fn test_missing_backlogs_defaults_to_zero() {
    let mut input = btech_clean();
    input.remove("Number_of_backlogs");

    let resolved = normalize(SchemaVariant::Btech, &input);

    assert_eq!(resolved.get("Number_of_backlogs"), Some(&AttributeValue::Number(0.0)));
    assert_eq!(resolved.missing(), &["Number_of_backlogs"]);
    assert!(!resolved.was_supplied("Number_of_backlogs"));
}

#[test]
fn test_empty_input_gets_all_defaults() {
    let resolved = normalize(SchemaVariant::Btech, &Map::new());

    assert_eq!(resolved.len(), 18);
    assert_eq!(resolved.missing().len(), 18);
    for (spec, value) in resolved.iter() {
        assert_eq!(*value, AttributeValue::default_for(spec.kind), "{}", spec.canonical);
    }
}

#[test]
fn test_malformed_values_are_reported() {
    let input = object(json!({ "CGPA": "eight", "Gender": ["M"] }));
    let resolved = normalize(SchemaVariant::Btech, &input);

    assert_eq!(resolved.number("CGPA"), 0.0);
    assert_eq!(resolved.text("Gender"), "Unknown");
    assert!(resolved.malformed().contains(&"CGPA"));
    assert!(resolved.malformed().contains(&"Gender"));
    assert!(!resolved.missing().contains(&"CGPA"));
}

#[test]
fn test_plural_history_alias() {
    let input = object(json!({ "History_of_Reappears_Backlogs": "Yes" }));
    let resolved = normalize(SchemaVariant::Btech, &input);

    assert_eq!(resolved.text("History_of_Reappear_Backlogs"), "Yes");
    assert!(resolved.was_supplied("History_of_Reappear_Backlogs"));
}

#[test]
fn test_unknown_keys_ignored() {
    let mut input = btech_clean();
    input.insert("Name".into(), json!("Asha"));

    let resolved = normalize(SchemaVariant::Btech, &input);
    assert!(resolved.get("Name").is_none());
    assert!(resolved.is_complete());
}

#[test]
fn test_to_json_uses_canonical_keys() {
    let resolved = normalize(SchemaVariant::Btech, &btech_clean());
    let json = resolved.to_json();

    assert_eq!(json["Number_of_backlogs"], json!(1.0));
    assert_eq!(json["Gender"], json!("Female"));
    assert!(json.get("Number of backlogs").is_none());
}
