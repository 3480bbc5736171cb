use crate::content::{SummaryLength, SummaryTone};
use serde_derive::{Deserialize, Serialize};

// Request shape for the external summarization function.  bulletPoints is
// camelCase on the wire; everything else matches the field name.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SummarizeRequest {
  pub content: String,
  pub length: SummaryLength,
  pub tone: SummaryTone,
  #[serde(rename = "bulletPoints")]
  pub bullet_points: bool,
}

// All three fields are required; a response missing any of them fails to
// parse, which callers surface as a malformed-response error.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Summary {
  pub title: String,
  pub summary: String,
  pub keywords: Vec<String>,
}
