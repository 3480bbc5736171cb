use serde_derive::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
  pub ip: String,
  pub port: u16,
  pub mainsite: String,
  pub altmainsite: Vec<String>,
  pub static_path: Option<PathBuf>,
  pub db: PathBuf,
  pub summarizer_uri: String,
  pub summarizer_timeout_ms: u64,
  // None means login tokens never expire.
  pub login_token_expiration_ms: Option<i64>,
}
