use crate::error as snerr;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::convert::TryInto;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

pub fn load_string(file_name: &str) -> Result<String, snerr::Error> {
  let path = &Path::new(&file_name);
  let mut inf = File::open(path)?;
  let mut result = String::new();
  inf.read_to_string(&mut result)?;
  Ok(result)
}

pub fn write_string(file_name: &str, text: &str) -> Result<usize, snerr::Error> {
  let path = &Path::new(&file_name);
  let mut outf = File::create(path)?;
  Ok(outf.write(text.as_bytes())?)
}

pub fn salt_string() -> String {
  rand::thread_rng()
    .sample_iter(&Alphanumeric)
    .take(10)
    .collect()
}

// epoch milliseconds.
pub fn now() -> Result<i64, snerr::Error> {
  let nowsecs = SystemTime::now()
    .duration_since(SystemTime::UNIX_EPOCH)
    .map(|n| n.as_millis())?;
  let s: i64 = nowsecs
    .try_into()
    .map_err(|_| snerr::Error::String("time conversion error".to_string()))?;
  Ok(s)
}

pub fn is_token_expired(token_expiration_ms: i64, tokendate: i64) -> bool {
  match now() {
    Ok(now) => now < tokendate || (now - tokendate) > token_expiration_ms,
    _ => true,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_expiration() {
    match now() {
      Ok(now) => {
        assert_eq!(is_token_expired(100, now), false);
        assert_eq!(is_token_expired(100, now - 200), true);
        assert_eq!(is_token_expired(100, now + 200), true);
      }
      Err(_) => assert_eq!(2, 4),
    }
  }
}
