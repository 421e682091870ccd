//! HTML views for the browser form
//!
//! A static input form and a result page. All interpolated values are
//! HTML-escaped.

use textlens::{Action, DomainError};

use crate::application::ActionOutput;
use crate::models::public_message;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>TextLens</title>
</head>
<body>
  <h1>TextLens</h1>
  <form method="post" action="/analyze">
    <textarea name="text" rows="8" cols="80" placeholder="Enter text"></textarea>
    <p>
      <select name="action">
        <option value="analyze">Sentiment analysis</option>
        <option value="summarize">Summarize</option>
        <option value="search">Embedding</option>
        <option value="vectorize_collection">Vectorize collection</option>
      </select>
      <button type="submit">Submit</button>
    </p>
  </form>
</body>
</html>
"#;

pub fn index_page() -> &'static str {
    INDEX_HTML
}

/// Render the outcome of a form submission
pub fn result_page(text: &str, action: Option<Action>, outcome: &Result<ActionOutput, DomainError>) -> String {
    let body = match outcome {
        Ok(output) => render_output(output),
        Err(err) => format!(r#"<p class="error">{}</p>"#, escape(&public_message(err))),
    };
    let heading = action.map(|a| a.to_string()).unwrap_or_else(|| "error".to_string());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>TextLens - {heading}</title>
</head>
<body>
  <h1>{heading}</h1>
  <blockquote>{text}</blockquote>
  {body}
  <p><a href="/">Back</a></p>
</body>
</html>
"#,
        heading = escape(&heading),
        text = escape(text),
        body = body,
    )
}

fn render_output(output: &ActionOutput) -> String {
    match output {
        ActionOutput::Sentiment(result) => format!(
            "<ul><li>Sentiment: {}</li><li>Score: {:.2}</li><li>Confidence: {:.2}</li></ul>",
            result.sentiment, result.score, result.confidence
        ),
        ActionOutput::Summary { summary } => format!("<p>{}</p>", escape(summary)),
        ActionOutput::Embedding { dimensions, .. } => {
            format!("<p>Embedding generated ({} dimensions).</p>", dimensions)
        }
        ActionOutput::Vectorized(report) => format!(
            "<p>Collection {}: {} processed, {} updated, {} skipped.</p>",
            escape(&report.collection),
            report.processed,
            report.updated,
            report.failed.len()
        ),
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use textlens::{Sentiment, SentimentResult};

    #[test]
    fn test_result_page_escapes_input() {
        let output = Ok(ActionOutput::Summary {
            summary: "<b>bold</b>".to_string(),
        });
        let html = result_page("<script>alert(1)</script>", Some(Action::Summarize), &output);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_result_page_sentiment() {
        let output = Ok(ActionOutput::Sentiment(SentimentResult {
            sentiment: Sentiment::Negative,
            score: -0.5,
            confidence: 0.9,
        }));
        let html = result_page("meh", Some(Action::Analyze), &output);

        assert!(html.contains("Sentiment: negative"));
        assert!(html.contains("Score: -0.50"));
    }

    #[test]
    fn test_result_page_error() {
        let outcome = Err(DomainError::Interpretation("trailing characters".into()));
        let html = result_page("x", Some(Action::Analyze), &outcome);

        assert!(html.contains("Unable to parse response from the language model."));
        assert!(!html.contains("trailing characters"));
    }
}
