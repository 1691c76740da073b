use std::collections::HashMap;

use evalchain_core::Value;
use evalchain_prompt::PromptTemplate;

#[test]
fn renders_template_with_vars() {
    let tmpl = PromptTemplate::new("Question: {{question}}\nContext: {{context}}");
    let mut vars = HashMap::new();
    vars.insert("question".to_string(), Value::from("What is AI?"));
    vars.insert("context".to_string(), Value::from("AI is a field."));

    let rendered = tmpl.render(&vars);
    assert_eq!(rendered, "Question: What is AI?\nContext: AI is a field.");
}

#[test]
fn does_not_confuse_overlapping_keys() {
    let tmpl = PromptTemplate::new("{{name}} {{fullname}}");
    let mut vars = HashMap::new();
    vars.insert("name".to_string(), Value::from("X"));
    vars.insert("fullname".to_string(), Value::from("Y"));

    assert_eq!(tmpl.render(&vars), "X Y");
}

#[test]
fn missing_vars_render_empty() {
    let tmpl = PromptTemplate::new("Hello {{who}}!");

    assert_eq!(tmpl.render(&HashMap::new()), "Hello !");
}

#[test]
fn non_string_values_render_as_json() {
    let tmpl = PromptTemplate::new("top_k = {{k}}");
    let mut vars = HashMap::new();
    vars.insert("k".to_string(), Value::from(4));

    assert_eq!(tmpl.render(&vars), "top_k = 4");
}
