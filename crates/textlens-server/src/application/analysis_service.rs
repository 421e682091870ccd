//! Analysis Application Service (Use Case)
//!
//! Dispatches a validated request to the completion endpoint, the
//! embedding endpoint, or a batch pass over the configured collection.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use textlens::{
    build_prompt, parse_sentiment, strip_code_fences, Action, AnalysisRequest, BatchVectorizer,
    CompletionService, DomainError, EmbeddingService, EmbeddingVector, PromptTask,
    SentimentResult, VectorizeReport,
};

use crate::adapters::open_store;
use crate::config::StoreConfig;

/// Result payload of one action
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ActionOutput {
    Sentiment(SentimentResult),
    Summary { summary: String },
    Embedding {
        #[schema(value_type = Vec<f32>)]
        embedding: EmbeddingVector,
        dimensions: usize,
    },
    Vectorized(VectorizeReport),
}

/// Application service for text actions
pub struct AnalysisService {
    completion: Arc<dyn CompletionService>,
    embedding: Arc<dyn EmbeddingService>,
    vectorizer: BatchVectorizer<dyn EmbeddingService>,
    store: Option<StoreConfig>,
}

impl AnalysisService {
    pub fn new(
        completion: Arc<dyn CompletionService>,
        embedding: Arc<dyn EmbeddingService>,
        store: Option<StoreConfig>,
    ) -> Self {
        Self {
            completion,
            vectorizer: BatchVectorizer::new(embedding.clone()),
            embedding,
            store,
        }
    }

    /// Run the action the request selects
    pub async fn handle(&self, request: &AnalysisRequest) -> Result<ActionOutput, DomainError> {
        match request.action {
            Action::Analyze => self.analyze(&request.text).await.map(ActionOutput::Sentiment),
            Action::Summarize => self
                .summarize(&request.text)
                .await
                .map(|summary| ActionOutput::Summary { summary }),
            Action::Search => self.search(&request.text).await.map(|embedding| {
                ActionOutput::Embedding {
                    dimensions: embedding.dimensions(),
                    embedding,
                }
            }),
            Action::VectorizeCollection => self
                .vectorize_collection()
                .await
                .map(ActionOutput::Vectorized),
        }
    }

    /// Sentiment analysis
    pub async fn analyze(&self, text: &str) -> Result<SentimentResult, DomainError> {
        let task = PromptTask::Sentiment;
        let raw = self
            .completion
            .complete(&build_prompt(task, text), &task.options())
            .await?;

        parse_sentiment(&raw)
    }

    /// Summarization
    pub async fn summarize(&self, text: &str) -> Result<String, DomainError> {
        let task = PromptTask::Summary;
        let raw = self
            .completion
            .complete(&build_prompt(task, text), &task.options())
            .await?;

        Ok(strip_code_fences(&raw))
    }

    /// Embedding of the raw input text
    pub async fn search(&self, text: &str) -> Result<EmbeddingVector, DomainError> {
        self.embedding.embed(text).await
    }

    /// Batch pass over the configured collection
    pub async fn vectorize_collection(&self) -> Result<VectorizeReport, DomainError> {
        let config = self.store.as_ref().ok_or(DomainError::StoreUnavailable)?;

        let store = open_store(config).await?;
        let result = self.vectorizer.vectorize_all(store.as_store()).await;
        store.close().await;

        result
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted port implementations shared by service and route tests

    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use textlens::{ChatMessage, CompletionOptions};

    /// Completion fake answering with a fixed reply
    pub struct ScriptedCompletion {
        reply: Result<String, String>,
        pub calls: AtomicUsize,
        pub last_messages: Mutex<Vec<ChatMessage>>,
    }

    impl ScriptedCompletion {
        pub fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
                last_messages: Mutex::new(Vec::new()),
            })
        }

        pub fn failing(reason: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(reason.to_string()),
                calls: AtomicUsize::new(0),
                last_messages: Mutex::new(Vec::new()),
            })
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedCompletion {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            _options: &CompletionOptions,
        ) -> Result<String, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_messages.lock().unwrap() = messages.to_vec();
            self.reply.clone().map_err(DomainError::RequestFailed)
        }
    }

    /// Embedding fake; texts in `fail_on` fail
    pub struct ScriptedEmbedding {
        fail_on: Vec<String>,
        pub calls: AtomicUsize,
    }

    impl ScriptedEmbedding {
        pub fn new(fail_on: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                fail_on: fail_on.iter().map(|s| s.to_string()).collect(),
                calls: AtomicUsize::new(0),
            })
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EmbeddingService for ScriptedEmbedding {
        async fn embed(&self, text: &str) -> Result<EmbeddingVector, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on.iter().any(|f| f == text) {
                return Err(DomainError::RequestFailed("simulated transport error".into()));
            }
            EmbeddingVector::try_from(vec![0.1, 0.2, 0.3])
        }
    }
}
