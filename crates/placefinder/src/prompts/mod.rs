//! Prompt Registry
//!
//! Local prompt definitions are the source of truth for the remote prompt
//! store. Names are unique; a duplicate registration is a startup error.

pub mod holiday_planner;

use std::collections::HashMap;

use crate::domain::entities::PromptDefinition;
use crate::domain::errors::DomainError;

/// Ordered, name-indexed collection of prompt definitions
#[derive(Debug, Clone, Default)]
pub struct PromptRegistry {
    definitions: Vec<PromptDefinition>,
    index: HashMap<String, usize>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every prompt shipped with the server
    pub fn with_builtin() -> Result<Self, DomainError> {
        let mut registry = Self::new();
        registry.register(holiday_planner::definition())?;
        Ok(registry)
    }

    pub fn register(&mut self, definition: PromptDefinition) -> Result<(), DomainError> {
        if self.index.contains_key(definition.name()) {
            return Err(DomainError::DuplicatePrompt(definition.name().to_string()));
        }
        self.index
            .insert(definition.name().to_string(), self.definitions.len());
        self.definitions.push(definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PromptDefinition> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }

    /// Definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &PromptDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
