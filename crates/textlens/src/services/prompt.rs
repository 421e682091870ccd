//! Prompt templates
//!
//! Each completion task maps to a fixed system message, a user message
//! that embeds the input text, and its completion options.

use crate::ports::{ChatMessage, CompletionOptions};

const SENTIMENT_SYSTEM: &str = "You are an assistant that performs sentiment analysis.";
const SENTIMENT_INSTRUCTION: &str = "Analyze the sentiment of the following text and provide the results in JSON format with fields \"sentiment\" (positive, neutral, negative), \"score\" (between -1 and 1), and \"confidence\" (between 0 and 1).";

const SUMMARY_SYSTEM: &str = "You are an assistant that summarizes text.";
const SUMMARY_INSTRUCTION: &str = "Summarize the following text concisely, in the same language as the text.";

/// Completion tasks with a prompt template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTask {
    Sentiment,
    Summary,
}

impl PromptTask {
    pub fn options(&self) -> CompletionOptions {
        match self {
            PromptTask::Sentiment => CompletionOptions {
                max_tokens: 100,
                temperature: 0.0,
            },
            PromptTask::Summary => CompletionOptions {
                max_tokens: 256,
                temperature: 0.3,
            },
        }
    }
}

/// Build the two-message prompt for a task.
///
/// The text is embedded as a JSON string literal, so quotes, newlines and
/// control characters in the input stay inside the quoted value.
pub fn build_prompt(task: PromptTask, text: &str) -> Vec<ChatMessage> {
    let (system, instruction) = match task {
        PromptTask::Sentiment => (SENTIMENT_SYSTEM, SENTIMENT_INSTRUCTION),
        PromptTask::Summary => (SUMMARY_SYSTEM, SUMMARY_INSTRUCTION),
    };

    vec![
        ChatMessage::system(system),
        ChatMessage::user(format!("{}\n\nText: {}", instruction, quote(text))),
    ]
}

fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MessageRole;

    #[test]
    fn test_sentiment_prompt_shape() {
        let messages = build_prompt(PromptTask::Sentiment, "I love it");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[0].content, SENTIMENT_SYSTEM);
        assert_eq!(messages[1].role, MessageRole::User);
        assert!(messages[1].content.ends_with("Text: \"I love it\""));
        assert!(messages[1].content.contains("\"confidence\""));
    }

    #[test]
    fn test_text_is_escaped() {
        let messages = build_prompt(PromptTask::Summary, "say \"hi\"\nthen leave");
        assert!(messages[1]
            .content
            .ends_with(r#"Text: "say \"hi\"\nthen leave""#));
    }

    #[test]
    fn test_task_options() {
        assert_eq!(PromptTask::Sentiment.options().max_tokens, 100);
        assert_eq!(PromptTask::Sentiment.options().temperature, 0.0);
        assert_eq!(PromptTask::Summary.options().max_tokens, 256);
    }
}
