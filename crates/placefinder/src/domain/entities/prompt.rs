//! Prompt - Managed prompt definitions
//!
//! Pure domain entity without infrastructure dependencies. A definition is
//! the local source of truth for one remote managed prompt.

use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

/// Default model for managed prompt variants
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-sonnet-4-20250514";

/// Model parameters pushed with the prompt's default variant
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParameters {
    pub model_id: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: i32,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            temperature: 0.0,
            top_p: 1.0,
            max_tokens: 4096,
        }
    }
}

/// PromptDefinition - A local template mapped to a remote managed prompt
#[derive(Debug, Clone)]
pub struct PromptDefinition {
    name: String,
    remote_id_key: String,
    template: String,
    model: ModelParameters,
    title: String,
    description: String,
    tags: BTreeSet<String>,
    variables: Vec<String>,
}

impl PromptDefinition {
    /// Create a definition. `remote_id_key` names the configuration value
    /// that holds the remote prompt identifier.
    pub fn new(
        name: impl Into<String>,
        remote_id_key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        Self {
            name: name.into(),
            remote_id_key: remote_id_key.into(),
            template,
            model: ModelParameters::default(),
            title: String::new(),
            description: String::new(),
            tags: BTreeSet::new(),
            variables,
        }
    }

    pub fn with_model(mut self, model: ModelParameters) -> Self {
        self.model = model;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn remote_id_key(&self) -> &str {
        &self.remote_id_key
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn model(&self) -> &ModelParameters {
        &self.model
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Variable names declared by the template, in first-occurrence order
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern is valid"))
}

/// Extract `{{variable}}` names from template text, de-duplicated.
pub fn extract_variables(template: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    placeholder_pattern()
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Replace every `{{name}}` for each declared variable with its supplied
/// value, or an empty string when the caller did not supply one.
///
/// Placeholders for undeclared variables are left verbatim.
pub fn substitute_variables(
    text: &str,
    declared: &[String],
    values: &HashMap<String, String>,
) -> String {
    let mut rendered = text.to_string();
    for name in declared {
        let placeholder = format!("{{{{{name}}}}}");
        let value = values.get(name).map(String::as_str).unwrap_or("");
        rendered = rendered.replace(&placeholder, value);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_variables_in_order_without_duplicates() {
        let vars = extract_variables("Hi {{user_name}}, {{city}} awaits. Bye {{user_name}}.");
        assert_eq!(vars, vec!["user_name".to_string(), "city".to_string()]);
    }

    #[test]
    fn test_ignores_malformed_placeholders() {
        let vars = extract_variables("{{ spaced }} {single} {{ok_1}} {{bad-name}}");
        assert_eq!(vars, vec!["ok_1".to_string()]);
    }

    #[test]
    fn test_substitutes_declared_and_blanks_missing() {
        let declared = vec!["user_name".to_string(), "city".to_string()];
        let mut values = HashMap::new();
        values.insert("user_name".to_string(), "Ava".to_string());
        values.insert("unused".to_string(), "ignored".to_string());

        let text = substitute_variables("{{user_name}} in {{city}} {{unused}}", &declared, &values);
        assert_eq!(text, "Ava in  {{unused}}");
    }

    #[test]
    fn test_definition_defaults() {
        let def = PromptDefinition::new("greeting", "GREETING_PROMPT_ID", "Hello {{who}}")
            .with_title("Greeting")
            .with_tags(["a", "b"]);

        assert_eq!(def.variables(), ["who".to_string()]);
        assert_eq!(def.model().model_id, DEFAULT_MODEL_ID);
        assert_eq!(def.model().max_tokens, 4096);
        assert_eq!(def.tags().len(), 2);
        assert_eq!(def.title(), "Greeting");
    }
}
