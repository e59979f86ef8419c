// ABOUTME: Scripted Gemini clients that record every call for pipeline tests
// ABOUTME: Implements LlmProvider and GeminiRestApi without network access

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chefgpt_server::errors::{AppError, AppResult};
use chefgpt_server::generation::{GenerationSettings, RecipeGenerator};
use chefgpt_server::llm::{GeminiRestApi, LlmProvider, RemoteModel};

/// A valid model answer
pub const GOOD_RECIPE_JSON: &str =
    r#"{"title":"Tortilla","ingredients":["4 huevos","2 patatas"],"steps":["Batir","Cuajar"]}"#;

/// What a stubbed call answers
#[derive(Debug, Clone)]
pub enum Reply {
    /// Successful call returning this text
    Text(String),
    /// Successful call without text (REST only)
    Empty,
    /// Upstream failure
    Fail(String),
}

impl Reply {
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_owned())
    }

    pub fn fail(message: &str) -> Self {
        Self::Fail(message.to_owned())
    }
}

/// Typed-client stub; unknown models fail
#[derive(Default)]
pub struct StubProvider {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, model: &str, reply: Reply) -> Self {
        self.replies.insert(model.to_owned(), reply);
        self
    }

    /// Models called, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Prompts received, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    async fn generate_text(&self, model: &str, prompt: &str) -> AppResult<String> {
        self.calls.lock().unwrap().push(model.to_owned());
        self.prompts.lock().unwrap().push(prompt.to_owned());

        match self.replies.get(model) {
            Some(Reply::Text(text)) => Ok(text.clone()),
            Some(Reply::Empty) => Err(AppError::external_service("stub", "empty")),
            Some(Reply::Fail(message)) => Err(AppError::external_service("stub", message.clone())),
            None => Err(AppError::external_service("stub", format!("unknown model {model}"))),
        }
    }
}

/// REST stub keyed by `"{version}/{model}"`; unknown pairs fail
#[derive(Default)]
pub struct StubRest {
    listing: Option<Vec<RemoteModel>>,
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
    list_calls: Mutex<usize>,
    prompts: Mutex<Vec<String>>,
}

impl StubRest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make listing succeed with these models (listing fails otherwise)
    pub fn listing(mut self, models: Vec<RemoteModel>) -> Self {
        self.listing = Some(models);
        self
    }

    pub fn reply(mut self, version: &str, model: &str, reply: Reply) -> Self {
        self.replies.insert(format!("{version}/{model}"), reply);
        self
    }

    /// `"{version}/{model}"` pairs called, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeminiRestApi for StubRest {
    async fn list_models(&self) -> AppResult<Vec<RemoteModel>> {
        *self.list_calls.lock().unwrap() += 1;
        self.listing
            .clone()
            .ok_or_else(|| AppError::external_service("stub", "listing unavailable"))
    }

    async fn generate_content(
        &self,
        api_version: &str,
        model: &str,
        prompt: &str,
    ) -> AppResult<Option<String>> {
        let key = format!("{api_version}/{model}");
        self.calls.lock().unwrap().push(key.clone());
        self.prompts.lock().unwrap().push(prompt.to_owned());

        match self.replies.get(&key) {
            Some(Reply::Text(text)) => Ok(Some(text.clone())),
            Some(Reply::Empty) => Ok(None),
            Some(Reply::Fail(message)) => Err(AppError::external_service("stub", message.clone())),
            None => Err(AppError::external_service("stub", format!("404 for {key}"))),
        }
    }
}

/// Settings mirroring the production defaults
pub fn default_settings() -> GenerationSettings {
    GenerationSettings {
        sdk_models: vec![
            "gemini-2.5-flash".to_owned(),
            "gemini-1.5-flash".to_owned(),
            "gemini-1.5-pro".to_owned(),
            "gemini-pro".to_owned(),
        ],
        rest_fallback_models: vec![
            "gemini-1.5-flash".to_owned(),
            "gemini-1.5-pro".to_owned(),
            "gemini-pro".to_owned(),
        ],
        api_versions: vec!["v1beta".to_owned(), "v1".to_owned()],
    }
}

/// Generator over the given stubs; `sdk: None` disables the typed client
pub fn generator_with(sdk: Option<Arc<StubProvider>>, rest: Arc<StubRest>) -> RecipeGenerator {
    RecipeGenerator::new(
        sdk.map(|provider| provider as Arc<dyn LlmProvider>),
        rest,
        default_settings(),
    )
}
