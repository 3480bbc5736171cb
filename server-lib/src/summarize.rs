use crate::config::Config;
use crate::error as snerr;
use log::info;
use simple_error::bail;
use snprotocol::summary::{SummarizeRequest, Summary};
use std::time::Duration;

// One call per explicit user action; never retried here.  A failure leaves
// nothing behind, so the caller's unsaved draft is intact for a manual
// retry.
pub async fn summarize(config: &Config, rq: &SummarizeRequest) -> Result<Summary, snerr::Error> {
  if rq.content.trim().is_empty() {
    bail!("nothing to summarize; content is empty");
  }

  let client = reqwest::Client::builder()
    .timeout(Duration::from_millis(config.summarizer_timeout_ms))
    .build()?;

  let resp = client
    .post(config.summarizer_uri.as_str())
    .json(rq)
    .send()
    .await?;

  if !resp.status().is_success() {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    return Err(snerr::Error::Summarizer(format!(
      "summarizer returned {}: {}",
      status, body
    )));
  }

  let body = resp.text().await?;

  match serde_json::from_str::<Summary>(body.as_str()) {
    Ok(summary) => {
      info!("summarized {} chars -> '{}'", rq.content.len(), summary.title);
      Ok(summary)
    }
    Err(e) => Err(snerr::Error::Summarizer(format!(
      "malformed summarizer response: {}",
      e
    ))),
  }
}

#[cfg(test)]
mod tests {
  use snprotocol::content::{SummaryLength, SummaryTone};
  use snprotocol::summary::{SummarizeRequest, Summary};

  #[test]
  fn test_request_wire_shape() {
    let rq = SummarizeRequest {
      content: "The quick brown fox".to_string(),
      length: SummaryLength::Short,
      tone: SummaryTone::Casual,
      bullet_points: false,
    };
    let v = serde_json::to_value(&rq).unwrap();
    assert_eq!(v["content"], "The quick brown fox");
    assert_eq!(v["length"], "short");
    assert_eq!(v["tone"], "casual");
    assert_eq!(v["bulletPoints"], false);
  }

  #[test]
  fn test_response_parse() {
    let s: Summary = serde_json::from_str(
      r#"{"title": "Fox", "summary": "a fox jumped", "keywords": ["fox", "quick"]}"#,
    )
    .unwrap();
    assert_eq!(s.title, "Fox");
    assert_eq!(s.keywords, vec!["fox".to_string(), "quick".to_string()]);
  }

  #[test]
  fn test_response_missing_fields() {
    // a response without all three fields is malformed.
    assert!(serde_json::from_str::<Summary>(r#"{"title": "Fox"}"#).is_err());
    assert!(serde_json::from_str::<Summary>(r#"{"summary": "x", "keywords": []}"#).is_err());
  }
}
