//! Trigger condition matching. Every function here is pure and total:
//! malformed or mistyped input makes a condition false, never an error.

use serde_json::Value;

use crate::models::{Condition, ConditionOperator};

/// True when every condition holds against `context`. An empty list always
/// matches; there is no OR or grouping.
pub fn matches_all(conditions: &[Condition], context: &Value) -> bool {
    conditions.iter().all(|c| matches(c, context))
}

pub fn matches(condition: &Condition, context: &Value) -> bool {
    let actual = lookup(context, &condition.field);
    let expected = &condition.value;

    match condition.operator {
        ConditionOperator::Equals => values_equal(actual, expected),
        ConditionOperator::NotEquals => !values_equal(actual, expected),
        ConditionOperator::Contains => contains(actual, expected),
        ConditionOperator::GreaterThan => {
            compare(actual, expected).is_some_and(|(a, b)| a > b)
        }
        ConditionOperator::LessThan => compare(actual, expected).is_some_and(|(a, b)| a < b),
    }
}

/// Top-level key first, then a dot path into nested objects. Missing
/// fields read as null.
fn lookup<'a>(context: &'a Value, field: &str) -> &'a Value {
    if let Some(value) = context.get(field) {
        return value;
    }

    let mut current = context;
    for part in field.split('.') {
        match current {
            Value::Object(map) => match map.get(part) {
                Some(next) => current = next,
                None => return &Value::Null,
            },
            Value::Array(items) => match part.parse::<usize>().ok().and_then(|i| items.get(i)) {
                Some(next) => current = next,
                None => return &Value::Null,
            },
            _ => return &Value::Null,
        }
    }
    current
}

/// JSON equality, except numbers compare by value (`5 == 5.0`).
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        // Integer pairs compare exactly; f64 would merge values past 2^53.
        (Value::Number(x), Value::Number(y)) if x.is_f64() || y.is_f64() => {
            x.as_f64() == y.as_f64()
        }
        _ => a == b,
    }
}

fn contains(haystack: &Value, needle: &Value) -> bool {
    match (haystack, needle) {
        (Value::String(s), Value::String(sub)) => s.contains(sub.as_str()),
        (Value::Array(items), _) => items.iter().any(|item| values_equal(item, needle)),
        _ => false,
    }
}

fn compare(a: &Value, b: &Value) -> Option<(f64, f64)> {
    Some((numeric(a)?, numeric(b)?))
}

fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
