//! Bedrock Prompt Management store
//!
//! Implements `PromptStore` over the `bedrock-agent` API. Each managed
//! prompt has a single TEXT variant named `default`.

use async_trait::async_trait;
use aws_sdk_bedrockagent::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_bedrockagent::operation::get_prompt::GetPromptOutput;
use aws_sdk_bedrockagent::types::{
    PromptInferenceConfiguration, PromptInputVariable, PromptModelInferenceConfiguration,
    PromptTemplateConfiguration, PromptTemplateType, PromptVariant,
    TextPromptTemplateConfiguration,
};
use aws_sdk_bedrockagent::Client;

use placefinder::{
    DeleteOutcome, DomainError, PromptDefinition, PromptStore, RemotePrompt, VersionPage,
};

const VARIANT_NAME: &str = "default";
const DRAFT_VERSION: &str = "DRAFT";
const NOT_FOUND_CODE: &str = "ResourceNotFoundException";

fn sdk_error<E>(action: &str, prompt_id: &str, err: E) -> DomainError
where
    E: std::error::Error + 'static,
{
    DomainError::ExternalService(format!(
        "Bedrock {action} failed for prompt {prompt_id}: {}",
        DisplayErrorContext(err)
    ))
}

fn build_error(err: impl std::fmt::Display) -> DomainError {
    DomainError::ExternalService(format!("Invalid Bedrock prompt request: {err}"))
}

/// Template text and declared variables of the first TEXT variant
fn text_template(output: &GetPromptOutput) -> Option<(String, Vec<String>)> {
    let variant = output.variants().first()?;
    let text = variant.template_configuration()?.as_text().ok()?;

    let variables = text
        .input_variables()
        .iter()
        .filter_map(PromptInputVariable::name)
        .map(str::to_string)
        .collect();

    Some((text.text().to_string(), variables))
}

/// Map a `GetPrompt` response; a blank version label is the draft
fn remote_prompt(prompt_id: &str, output: &GetPromptOutput) -> Result<RemotePrompt, DomainError> {
    let (text, variables) = text_template(output).ok_or_else(|| {
        DomainError::ExternalService(format!("Prompt {prompt_id} has no text variant"))
    })?;

    let version = match output.version() {
        "" => DRAFT_VERSION,
        v => v,
    };

    Ok(RemotePrompt {
        name: output.name().to_string(),
        text,
        variables,
        version: version.to_string(),
    })
}

/// Fold a `DeletePrompt` result; a missing version counts as deleted
fn fold_delete<T, E>(
    result: Result<T, E>,
    prompt_id: &str,
    version: &str,
) -> Result<DeleteOutcome, DomainError>
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match result {
        Ok(_) => Ok(DeleteOutcome::Deleted),
        Err(e) if e.code() == Some(NOT_FOUND_CODE) => {
            tracing::debug!("Version {} of prompt {} was already gone", version, prompt_id);
            Ok(DeleteOutcome::AlreadyAbsent)
        }
        Err(e) => Err(sdk_error("DeletePrompt", prompt_id, e)),
    }
}

/// The single `default` variant for a definition
fn variant_for(definition: &PromptDefinition) -> Result<PromptVariant, DomainError> {
    let input_variables = definition
        .variables()
        .iter()
        .map(|name| PromptInputVariable::builder().name(name).build())
        .collect::<Vec<_>>();

    let template = TextPromptTemplateConfiguration::builder()
        .text(definition.template())
        .set_input_variables(Some(input_variables))
        .build()
        .map_err(build_error)?;

    let model = definition.model();
    let inference = PromptModelInferenceConfiguration::builder()
        .temperature(model.temperature)
        .top_p(model.top_p)
        .max_tokens(model.max_tokens)
        .build();

    PromptVariant::builder()
        .name(VARIANT_NAME)
        .template_type(PromptTemplateType::Text)
        .model_id(&model.model_id)
        .template_configuration(PromptTemplateConfiguration::Text(template))
        .inference_configuration(PromptInferenceConfiguration::Text(inference))
        .build()
        .map_err(build_error)
}

/// `PromptStore` backed by Bedrock Prompt Management
pub struct BedrockPromptStore {
    client: Client,
}

impl BedrockPromptStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl PromptStore for BedrockPromptStore {
    async fn get_prompt(
        &self,
        prompt_id: &str,
        version: Option<&str>,
    ) -> Result<RemotePrompt, DomainError> {
        let output = self
            .client
            .get_prompt()
            .prompt_identifier(prompt_id)
            .set_prompt_version(version.map(str::to_string))
            .send()
            .await
            .map_err(|e| sdk_error("GetPrompt", prompt_id, e))?;

        remote_prompt(prompt_id, &output)
    }

    async fn update_draft(
        &self,
        prompt_id: &str,
        name: &str,
        definition: &PromptDefinition,
    ) -> Result<(), DomainError> {
        let variant = variant_for(definition)?;

        self.client
            .update_prompt()
            .prompt_identifier(prompt_id)
            .name(name)
            .default_variant(VARIANT_NAME)
            .variants(variant)
            .send()
            .await
            .map_err(|e| sdk_error("UpdatePrompt", prompt_id, e))?;

        Ok(())
    }

    async fn create_version(
        &self,
        prompt_id: &str,
        description: &str,
    ) -> Result<String, DomainError> {
        let output = self
            .client
            .create_prompt_version()
            .prompt_identifier(prompt_id)
            .description(description)
            .send()
            .await
            .map_err(|e| sdk_error("CreatePromptVersion", prompt_id, e))?;

        Ok(output.version().to_string())
    }

    async fn list_versions(
        &self,
        prompt_id: &str,
        next_token: Option<&str>,
    ) -> Result<VersionPage, DomainError> {
        let output = self
            .client
            .list_prompts()
            .prompt_identifier(prompt_id)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| sdk_error("ListPrompts", prompt_id, e))?;

        let versions = output
            .prompt_summaries()
            .iter()
            .map(|summary| summary.version().to_string())
            .collect();

        Ok(VersionPage {
            versions,
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn delete_version(
        &self,
        prompt_id: &str,
        version: &str,
    ) -> Result<DeleteOutcome, DomainError> {
        let result = self
            .client
            .delete_prompt()
            .prompt_identifier(prompt_id)
            .prompt_version(version)
            .send()
            .await;

        fold_delete(result, prompt_id, version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_bedrockagent::error::ErrorMetadata;
    use aws_sdk_bedrockagent::operation::delete_prompt::DeletePromptError;
    use aws_sdk_bedrockagent::primitives::DateTime;

    fn definition() -> PromptDefinition {
        PromptDefinition::new("trip", "TRIP_ID", "Plan for {{user_name}} in {{city}}")
    }

    fn output(version: &str, variants: Vec<PromptVariant>) -> GetPromptOutput {
        GetPromptOutput::builder()
            .name("trip_remote")
            .id("PROMPT123")
            .arn("arn:aws:bedrock:us-east-2:123456789012:prompt/PROMPT123")
            .version(version)
            .created_at(DateTime::from_secs(0))
            .updated_at(DateTime::from_secs(0))
            .set_variants(Some(variants))
            .build()
            .unwrap()
    }

    fn delete_error(code: &str) -> DeletePromptError {
        DeletePromptError::generic(ErrorMetadata::builder().code(code).message("boom").build())
    }

    #[test]
    fn test_variant_carries_definition() {
        let variant = variant_for(&definition()).unwrap();

        assert_eq!(variant.name(), VARIANT_NAME);
        let text = variant.template_configuration().unwrap().as_text().unwrap();
        assert_eq!(text.text(), "Plan for {{user_name}} in {{city}}");
        assert_eq!(text.input_variables().len(), 2);
    }

    #[test]
    fn test_text_template_reads_first_variant() {
        let output = output("3", vec![variant_for(&definition()).unwrap()]);

        let (text, variables) = text_template(&output).unwrap();

        assert_eq!(text, "Plan for {{user_name}} in {{city}}");
        assert_eq!(variables, vec!["user_name", "city"]);
    }

    #[test]
    fn test_text_template_without_variants_is_none() {
        let output = output("DRAFT", Vec::new());

        assert!(text_template(&output).is_none());
        assert!(matches!(
            remote_prompt("PROMPT123", &output),
            Err(DomainError::ExternalService(_))
        ));
    }

    #[test]
    fn test_remote_prompt_labels_blank_version_as_draft() {
        let draft = remote_prompt("PROMPT123", &output("", vec![variant_for(&definition()).unwrap()]))
            .unwrap();
        assert_eq!(draft.version, DRAFT_VERSION);
        assert_eq!(draft.name, "trip_remote");

        let pinned = remote_prompt("PROMPT123", &output("7", vec![variant_for(&definition()).unwrap()]))
            .unwrap();
        assert_eq!(pinned.version, "7");
    }

    #[test]
    fn test_delete_of_missing_version_is_already_absent() {
        let outcome = fold_delete::<(), _>(Err(delete_error(NOT_FOUND_CODE)), "PROMPT123", "1");
        assert_eq!(outcome.unwrap(), DeleteOutcome::AlreadyAbsent);

        let outcome = fold_delete::<(), DeletePromptError>(Ok(()), "PROMPT123", "1");
        assert_eq!(outcome.unwrap(), DeleteOutcome::Deleted);
    }

    #[test]
    fn test_delete_other_errors_propagate() {
        let outcome = fold_delete::<(), _>(Err(delete_error("ThrottlingException")), "PROMPT123", "1");
        assert!(matches!(outcome, Err(DomainError::ExternalService(msg)) if msg.contains("DeletePrompt")));
    }
}
