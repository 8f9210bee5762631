use serde_json::{json, Value};
use uuid::Uuid;

use hireflow::engine::conditions::{matches, matches_all};
use hireflow::engine::template::render;
use hireflow::engine::RunContext;
use hireflow::models::{Condition, ConditionOperator, Target, TargetType};
use hireflow::scoring::keyword_score;

fn cond(field: &str, operator: ConditionOperator, value: Value) -> Condition {
    Condition {
        field: field.to_string(),
        operator,
        value,
    }
}

// ── Condition matching ──────────────────────────────────────────

#[test]
fn empty_condition_list_always_matches() {
    assert!(matches_all(&[], &json!({})));
    assert!(matches_all(&[], &Value::Null));
}

#[test]
fn all_conditions_must_hold() {
    let context = json!({ "department": "engineering", "experienceYears": 6 });
    let conditions = vec![
        cond("department", ConditionOperator::Equals, json!("engineering")),
        cond("experienceYears", ConditionOperator::GreaterThan, json!(5)),
    ];
    assert!(matches_all(&conditions, &context));

    let context = json!({ "department": "engineering", "experienceYears": 3 });
    assert!(!matches_all(&conditions, &context));
}

#[test]
fn equals_compares_numbers_by_value() {
    let context = json!({ "rating": 5 });
    assert!(matches(
        &cond("rating", ConditionOperator::Equals, json!(5.0)),
        &context
    ));
    assert!(!matches(
        &cond("rating", ConditionOperator::Equals, json!("5")),
        &context
    ));
}

#[test]
fn missing_field_reads_as_null() {
    let context = json!({ "name": "Ada" });
    assert!(matches(
        &cond("source", ConditionOperator::Equals, Value::Null),
        &context
    ));
    assert!(matches(
        &cond("source", ConditionOperator::NotEquals, json!("referral")),
        &context
    ));
    assert!(!matches(
        &cond("source", ConditionOperator::Contains, json!("ref")),
        &context
    ));
}

#[test]
fn nested_fields_use_dot_paths() {
    let context = json!({
        "job": { "department": "engineering", "levels": ["junior", "senior"] },
        "job.title": "flat key wins"
    });
    assert!(matches(
        &cond("job.department", ConditionOperator::Equals, json!("engineering")),
        &context
    ));
    assert!(matches(
        &cond("job.levels.1", ConditionOperator::Equals, json!("senior")),
        &context
    ));
    assert!(matches(
        &cond("job.title", ConditionOperator::Equals, json!("flat key wins")),
        &context
    ));
}

#[test]
fn contains_handles_strings_and_arrays() {
    let context = json!({ "title": "Senior Rust Engineer", "skills": ["rust", "sql"] });
    assert!(matches(
        &cond("title", ConditionOperator::Contains, json!("Rust")),
        &context
    ));
    assert!(!matches(
        &cond("title", ConditionOperator::Contains, json!("rust")),
        &context
    ));
    assert!(matches(
        &cond("skills", ConditionOperator::Contains, json!("sql")),
        &context
    ));
    assert!(!matches(
        &cond("skills", ConditionOperator::Contains, json!("go")),
        &context
    ));
}

#[test]
fn ordering_operators_need_numbers() {
    let context = json!({ "years": "7", "name": "Ada", "score": 40 });
    assert!(matches(
        &cond("years", ConditionOperator::GreaterThan, json!(5)),
        &context
    ));
    assert!(matches(
        &cond("score", ConditionOperator::LessThan, json!("50")),
        &context
    ));
    assert!(!matches(
        &cond("name", ConditionOperator::GreaterThan, json!(1)),
        &context
    ));
    assert!(!matches(
        &cond("name", ConditionOperator::LessThan, json!(1)),
        &context
    ));
    assert!(!matches(
        &cond("missing", ConditionOperator::GreaterThan, json!(0)),
        &context
    ));
}

// ── Templates ───────────────────────────────────────────────────

#[test]
fn templates_resolve_payload_and_target() {
    let id = Uuid::now_v7();
    let ctx = RunContext {
        workflow_name: "Welcome".to_string(),
        target: Target::new(TargetType::Application, id),
        payload: json!({ "name": "Ada", "job": { "title": "Engineer" }, "years": 4 }),
    };

    assert_eq!(
        render("{{name}} applied for {{payload.job.title}}", &ctx),
        "Ada applied for Engineer"
    );
    assert_eq!(render("{{ years }} years", &ctx), "4 years");
    assert_eq!(
        render("{{workflow.name}}: {{target.type}}/{{target.id}}", &ctx),
        format!("Welcome: application/{id}")
    );
    assert_eq!(render("[{{unknown.path}}]", &ctx), "[]");
    assert_eq!(render("no placeholders", &ctx), "no placeholders");
}

// ── Keyword scoring ─────────────────────────────────────────────

#[test]
fn keyword_score_is_percentage_of_keywords_found() {
    let skills = vec!["Rust".to_string(), " SQL ".to_string(), "Go".to_string()];
    let keywords: Vec<String> = ["rust", "sql", "docker"]
        .iter()
        .map(|k| k.to_string())
        .collect();

    assert_eq!(keyword_score(&skills, &keywords), 66.7);
    assert_eq!(keyword_score(&skills, &[]), 0.0);
    assert_eq!(keyword_score(&[], &keywords), 0.0);
}

#[test]
fn large_integers_compare_exactly() {
    let context = json!({ "externalId": 9007199254740993_u64 });
    assert!(!matches(
        &cond(
            "externalId",
            ConditionOperator::Equals,
            json!(9007199254740992_u64)
        ),
        &context
    ));
    assert!(matches(
        &cond(
            "externalId",
            ConditionOperator::Equals,
            json!(9007199254740993_u64)
        ),
        &context
    ));
    assert!(matches(
        &cond("externalId", ConditionOperator::NotEquals, json!(-1)),
        &context
    ));
    assert!(matches(
        &cond("ids", ConditionOperator::Contains, json!(9007199254740993_u64)),
        &json!({ "ids": [9007199254740992_u64, 9007199254740993_u64] })
    ));
}
