use std::sync::Arc;
use tracing::instrument;

use crate::client::{Error as ClientError, GeminiClient};
use crate::generation::model::{
    Content, GenerateContentRequest, GenerationConfig, GenerationResponse, Role, ThinkingConfig,
};
use crate::tools::Tool;

/// Builder for content generation requests
#[derive(Clone)]
pub struct ContentBuilder {
    client: Arc<GeminiClient>,
    pub contents: Vec<Content>,
    generation_config: Option<GenerationConfig>,
    tools: Option<Vec<Tool>>,
    system_instruction: Option<Content>,
}

impl ContentBuilder {
    /// Creates a new `ContentBuilder`.
    pub(crate) fn new(client: Arc<GeminiClient>) -> Self {
        Self {
            client,
            contents: Vec::new(),
            generation_config: None,
            tools: None,
            system_instruction: None,
        }
    }

    /// Sets the system instruction for the request.
    ///
    /// System instructions provide high-level guidance to the model, such as
    /// setting a persona or defining the desired output format.
    pub fn with_system_instruction(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(Content::text(text));
        self
    }

    /// Adds a user message to the conversation history.
    pub fn with_user_message(mut self, text: impl Into<String>) -> Self {
        self.contents.push(Content::text(text).with_role(Role::User));
        self
    }

    /// Adds a model message to the conversation history.
    pub fn with_model_message(mut self, text: impl Into<String>) -> Self {
        self.contents
            .push(Content::text(text).with_role(Role::Model));
        self
    }

    /// Adds a prepared `Content` to the conversation history.
    pub fn with_content(mut self, content: Content) -> Self {
        self.contents.push(content);
        self
    }

    /// Sets the thinking configuration for the request.
    pub fn with_thinking_config(mut self, thinking_config: ThinkingConfig) -> Self {
        self.generation_config
            .get_or_insert_with(Default::default)
            .thinking_config = Some(thinking_config);
        self
    }

    /// Sets the thinking budget for the request.
    ///
    /// A budget of 0 disables thinking entirely.
    pub fn with_thinking_budget(self, budget: i32) -> Self {
        self.with_thinking_config(ThinkingConfig::with_budget(budget))
    }

    /// Adds a tool to the request.
    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tools.get_or_insert_with(Vec::new).push(tool);
        self
    }

    /// Builds the `GenerateContentRequest`.
    pub fn build(self) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: self.contents,
            generation_config: self.generation_config,
            tools: self.tools,
            system_instruction: self.system_instruction,
        }
    }

    /// Executes the content generation request.
    #[instrument(skip_all, fields(
        messages.parts.count = self.contents.len(),
        tools.present = self.tools.is_some(),
        system.instruction.present = self.system_instruction.is_some(),
    ))]
    pub async fn execute(self) -> Result<GenerationResponse, ClientError> {
        let client = self.client.clone();
        let request = self.build();
        client.generate_content_raw(request).await
    }
}
