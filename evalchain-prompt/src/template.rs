use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use evalchain_core::Value;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("valid placeholder pattern"))
}

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Unknown placeholders render as the empty string; string values render
    /// unquoted, everything else as its JSON form.
    pub fn render(&self, vars: &HashMap<String, Value>) -> String {
        let rendered =
            placeholder_pattern().replace_all(&self.template, |caps: &regex::Captures| {
                let key = &caps[1];
                match vars.get(key) {
                    Some(value) => value
                        .as_str()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| value.to_string()),
                    None => String::new(),
                }
            });
        rendered.to_string()
    }
}
