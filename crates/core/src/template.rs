//! Notification template rendering.
//!
//! Templates contain `{{var}}` placeholders that are substituted from a flat
//! JSON object at dispatch time. Unknown placeholders render as an empty
//! string so a stale template never blocks a delivery.

use std::sync::OnceLock;

use regex::Regex;

/// Matches `{{ var_name }}` with optional inner whitespace.
fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.]+)\s*\}\}").expect("valid placeholder regex"))
}

/// Render a template body against a JSON object of variables.
///
/// Values are stringified: strings verbatim, numbers/bools via `to_string`,
/// anything else (arrays, objects, null) as empty. Missing keys render empty.
pub fn render(template: &str, vars: &serde_json::Value) -> String {
    placeholder_re()
        .replace_all(template, |caps: &regex::Captures<'_>| {
            lookup(vars, &caps[1])
        })
        .into_owned()
}

/// List the distinct placeholder names appearing in a template, in order of
/// first appearance. Used by the admin template endpoints to echo back what
/// a template expects.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in placeholder_re().captures_iter(template) {
        let name = caps[1].to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

/// Resolve a dotted placeholder path against the variable object.
fn lookup(vars: &serde_json::Value, path: &str) -> String {
    let mut current = vars;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(value) => current = value,
            None => return String::new(),
        }
    }
    match current {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_simple_placeholders() {
        let out = render(
            "Hello {{name}}, your story \"{{story_title}}\" is ready.",
            &json!({"name": "Ada", "story_title": "The Lighthouse"}),
        );
        assert_eq!(out, "Hello Ada, your story \"The Lighthouse\" is ready.");
    }

    #[test]
    fn tolerates_inner_whitespace() {
        let out = render("{{ name }}!", &json!({"name": "Ada"}));
        assert_eq!(out, "Ada!");
    }

    #[test]
    fn unknown_placeholders_render_empty() {
        let out = render("Hi {{missing}}.", &json!({"name": "Ada"}));
        assert_eq!(out, "Hi .");
    }

    #[test]
    fn numbers_and_bools_are_stringified() {
        let out = render(
            "{{count}} videos, done={{done}}",
            &json!({"count": 3, "done": true}),
        );
        assert_eq!(out, "3 videos, done=true");
    }

    #[test]
    fn dotted_paths_descend_into_objects() {
        let out = render(
            "{{story.title}} by {{story.author}}",
            &json!({"story": {"title": "Tides", "author": "Ada"}}),
        );
        assert_eq!(out, "Tides by Ada");
    }

    #[test]
    fn arrays_and_objects_render_empty() {
        let out = render("x{{list}}y", &json!({"list": [1, 2, 3]}));
        assert_eq!(out, "xy");
    }

    #[test]
    fn template_without_placeholders_is_unchanged() {
        let out = render("plain text", &json!({}));
        assert_eq!(out, "plain text");
    }

    #[test]
    fn placeholders_are_listed_once_in_order() {
        let names = placeholders("{{b}} {{a}} {{b}} {{ c }}");
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
