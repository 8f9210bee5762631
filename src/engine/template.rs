use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::RunContext;

static TEMPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(\w+(?:\.\w+)*)\s*\}\}").unwrap());

/// Replace {{variable}} placeholders with values from the run context.
/// Unknown placeholders render as an empty string.
pub fn render(template: &str, ctx: &RunContext) -> String {
    TEMPLATE_RE
        .replace_all(template, |caps: &regex::Captures| {
            resolve(&caps[1], ctx).unwrap_or_default()
        })
        .to_string()
}

fn resolve(path: &str, ctx: &RunContext) -> Option<String> {
    match path {
        "targetId" | "target.id" => return Some(ctx.target.target_id.to_string()),
        "targetType" | "target.type" => return Some(ctx.target.target_type.to_string()),
        "workflow.name" => return Some(ctx.workflow_name.clone()),
        _ => {}
    }

    let path = path.strip_prefix("payload.").unwrap_or(path);
    let mut current = &ctx.payload;
    for part in path.split('.') {
        current = current.get(part)?;
    }
    json_string(current)
}

fn json_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
