use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Registration {
  pub email: String,
  pub pwd: String,
  pub full_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Login {
  pub email: String,
  pub pwd: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginData {
  pub userid: i64,
  pub email: String,
  pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub enum UserRequest {
  UrqRegister(Registration),
  UrqLogin(Login),
  UrqLogout,
}

#[derive(Serialize, Deserialize, Debug)]
pub enum UserResponse {
  UrpRegistered(LoginData),
  UrpUserExists,
  UrpLoggedIn(LoginData),
  // deliberately covers both unknown email and wrong password.
  UrpInvalidLogin,
  UrpLoggedOut,
  UrpNotLoggedIn,
  UrpServerError(String),
}
