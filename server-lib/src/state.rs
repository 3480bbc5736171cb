use crate::config::Config;

pub struct State {
  pub config: Config,
}
