//! `{{token}}` substitution for email subjects and bodies.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Replaces every `{{token}}` whose token is a key of `values`.
///
/// Matching is exact and case-sensitive. Placeholders without a value, and a
/// trailing `{{` with no closing braces, are copied unchanged so that missing
/// data shows up in the output. Inserted values are not scanned again.
pub fn render_template(template: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            out.push_str(&rest[start..]);
            return out;
        };
        let token = &after_open[..end];
        match values.get(token) {
            Some(value) => out.push_str(value),
            None => {
                out.push_str(OPEN);
                out.push_str(token);
                out.push_str(CLOSE);
            }
        }
        rest = &after_open[end + CLOSE.len()..];
    }
    out.push_str(rest);
    out
}

/// Tokens referenced by `template` that `values` does not cover, in order of
/// first appearance.
pub fn unresolved_tokens<'a>(template: &'a str, values: &HashMap<String, String>) -> Vec<&'a str> {
    let mut missing = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };
        let token = &after_open[..end];
        if !values.contains_key(token) && !missing.contains(&token) {
            missing.push(token);
        }
        rest = &after_open[end + CLOSE.len()..];
    }
    missing
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
    pub unresolved: Vec<String>,
}

impl EmailTemplate {
    pub fn render(&self, values: &HashMap<String, String>) -> RenderedEmail {
        let mut unresolved: Vec<String> = Vec::new();
        for token in unresolved_tokens(&self.subject, values)
            .into_iter()
            .chain(unresolved_tokens(&self.body, values))
        {
            if !unresolved.iter().any(|t| t == token) {
                unresolved.push(token.to_string());
            }
        }
        RenderedEmail {
            subject: render_template(&self.subject, values),
            body: render_template(&self.body, values),
            unresolved,
        }
    }
}
