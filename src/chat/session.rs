//! Chat session state.
//!
//! [`ChatSession`] owns the conversation: the store binding, the started
//! flag, and the transcript. The transcript is local and append-only; the
//! remote service is never asked for history, so exports work even when
//! the collaborator forgets.

use tracing::instrument;

use crate::chat::citations::{self, Citations};
use crate::client::{Gemini, Result as ClientResult};
use crate::config::Config;
use crate::generation::builder::ContentBuilder;
use crate::generation::model::{Content, GenerateContentRequest, Role};
use crate::tools::Tool;

/// One entry of the transcript.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
    /// Present on model turns that carried grounding metadata
    pub citations: Option<Citations>,
}

/// A conversational session bound to zero or more file search stores.
pub struct ChatSession {
    gemini: Gemini,
    config: Config,
    active_stores: Vec<String>,
    transcript: Vec<ChatTurn>,
    started: bool,
}

impl ChatSession {
    pub fn new(gemini: Gemini, config: Config) -> Self {
        Self {
            gemini,
            config,
            active_stores: Vec::new(),
            transcript: Vec::new(),
            started: false,
        }
    }

    /// Replaces the stores consulted by future messages.
    ///
    /// Takes effect on the next send; the transcript is untouched.
    pub fn set_active_stores(&mut self, names: Vec<String>) {
        self.active_stores = names;
    }

    pub fn active_stores(&self) -> &[String] {
        &self.active_stores
    }

    pub fn is_active(&self) -> bool {
        self.started
    }

    /// Discards any previous session and opens a new, empty one bound to
    /// the currently active stores.
    pub fn start_session(&mut self) {
        self.transcript.clear();
        self.started = true;
    }

    /// Equivalent to [`start_session`](Self::start_session) with the same
    /// store binding.
    pub fn reset(&mut self) {
        self.start_session();
    }

    /// The ordered turn sequence of the current session.
    pub fn history(&self) -> &[ChatTurn] {
        &self.transcript
    }

    fn request_builder(&self, message: &str) -> ContentBuilder {
        let mut builder = self
            .gemini
            .generate_content()
            .with_system_instruction(self.config.system_instruction.as_str());

        for turn in &self.transcript {
            builder = builder.with_content(Content::text(turn.text.as_str()).with_role(turn.role));
        }
        builder = builder.with_user_message(message);

        // An explicit zero budget is the only way to say "no thinking" on
        // the wire; enabled-with-default-budget sends nothing at all.
        if !self.config.enable_thinking {
            builder = builder.with_thinking_budget(0);
        } else if let Some(budget) = self.config.thinking_budget {
            builder = builder.with_thinking_budget(budget);
        }

        if !self.active_stores.is_empty() {
            builder = builder.with_tool(Tool::file_search(self.active_stores.clone()));
        }

        builder
    }

    /// The request `send` would issue for `message`.
    pub fn build_request(&self, message: &str) -> GenerateContentRequest {
        self.request_builder(message).build()
    }

    /// Sends a message and appends both turns to the transcript.
    ///
    /// On error nothing is appended and the session remains usable for
    /// subsequent sends.
    #[instrument(skip_all, fields(stores.count = self.active_stores.len()))]
    pub async fn send(&mut self, message: &str) -> ClientResult<ChatTurn> {
        let response = self.request_builder(message).execute().await?;

        let turn = ChatTurn {
            role: Role::Model,
            text: response.text(),
            citations: citations::extract(&response),
        };

        self.transcript.push(ChatTurn {
            role: Role::User,
            text: message.to_string(),
            citations: None,
        });
        self.transcript.push(turn.clone());

        Ok(turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::FileSearchConfig;
    use std::path::PathBuf;

    fn config() -> Config {
        Config {
            api_key: "test-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
            system_instruction: "Answer from the documents.".to_string(),
            enable_thinking: true,
            thinking_budget: None,
            files_dir: PathBuf::from("files"),
            export_dir: PathBuf::from("exports"),
            store_prefix: "test".to_string(),
        }
    }

    fn session(config: Config) -> ChatSession {
        let gemini = Gemini::with_model(config.api_key.clone(), config.model.clone()).unwrap();
        ChatSession::new(gemini, config)
    }

    #[test]
    fn zero_active_stores_omits_tools() {
        let session = session(config());
        let request = session.build_request("hello");

        assert!(request.tools.is_none());
        assert!(request.system_instruction.is_some());
        assert_eq!(request.contents.len(), 1);
    }

    #[test]
    fn active_stores_attach_exactly_those_names() {
        let mut session = session(config());
        session.set_active_stores(vec![
            "fileSearchStores/a".to_string(),
            "fileSearchStores/b".to_string(),
        ]);

        let request = session.build_request("hello");
        let tools = request.tools.unwrap();
        assert_eq!(tools.len(), 1);
        let Tool::FileSearch { file_search } = &tools[0];
        assert_eq!(
            file_search,
            &FileSearchConfig {
                file_search_store_names: vec![
                    "fileSearchStores/a".to_string(),
                    "fileSearchStores/b".to_string(),
                ],
            }
        );
    }

    #[test]
    fn replacing_active_stores_affects_next_request() {
        let mut session = session(config());
        session.set_active_stores(vec!["fileSearchStores/a".to_string()]);
        session.set_active_stores(vec!["fileSearchStores/b".to_string()]);

        let request = session.build_request("hello");
        let tools = request.tools.unwrap();
        let Tool::FileSearch { file_search } = &tools[0];
        assert_eq!(
            file_search.file_search_store_names,
            vec!["fileSearchStores/b".to_string()]
        );
    }

    #[test]
    fn default_thinking_sends_no_thinking_config() {
        let session = session(config());
        let request = session.build_request("hello");
        assert!(request.generation_config.is_none());
    }

    #[test]
    fn explicit_budget_is_sent_as_is() {
        let mut cfg = config();
        cfg.thinking_budget = Some(1024);
        let request = session(cfg).build_request("hello");

        let thinking = request
            .generation_config
            .unwrap()
            .thinking_config
            .unwrap();
        assert_eq!(thinking.thinking_budget, Some(1024));
    }

    #[test]
    fn disabled_thinking_sends_zero_budget() {
        let mut cfg = config();
        cfg.enable_thinking = false;
        cfg.thinking_budget = Some(1024);
        let request = session(cfg).build_request("hello");

        let thinking = request
            .generation_config
            .unwrap()
            .thinking_config
            .unwrap();
        assert_eq!(thinking.thinking_budget, Some(0));
    }

    #[test]
    fn start_session_clears_transcript_and_keeps_binding() {
        let mut session = session(config());
        session.set_active_stores(vec!["fileSearchStores/a".to_string()]);
        assert!(!session.is_active());

        session.start_session();
        assert!(session.is_active());
        assert!(session.history().is_empty());
        assert_eq!(session.active_stores(), ["fileSearchStores/a".to_string()]);

        session.reset();
        assert!(session.is_active());
        assert_eq!(session.active_stores(), ["fileSearchStores/a".to_string()]);
    }
}
