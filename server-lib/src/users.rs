use crate::error as snerr;
use crate::util::{is_token_expired, now, salt_string};
use actix_session::Session;
use log::{error, info};
use rusqlite::{params, Connection};
use simple_error::bail;
use snprotocol::user::{Login, LoginData, Registration, UserRequest, UserResponse};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct User {
  pub id: i64,
  pub email: String,
  pub hashwd: String,
  pub salt: String,
  pub registration_key: Option<String>,
}

fn hash_password(pwd: &str, salt: &str) -> String {
  sha256::digest(format!("{}{}", pwd, salt))
}

// creates the user and its profile row together; the hosted original did
// the profile half with a database trigger.
pub fn new_user(conn: &Connection, rd: &Registration) -> Result<i64, snerr::Error> {
  if rd.email.trim().is_empty() {
    bail!("email may not be empty");
  }
  if rd.pwd.is_empty() {
    bail!("password may not be empty");
  }

  let now = now()?;
  let salt = salt_string();
  let hashwd = hash_password(rd.pwd.as_str(), salt.as_str());

  // one transaction; a user row without its profile row can never log in.
  let tx = conn.unchecked_transaction()?;

  tx.execute(
    "insert into user (email, hashwd, salt, registration_key, createdate)
      values (?1, ?2, ?3, ?4, ?5)",
    params![rd.email, hashwd, salt, Option::<String>::None, now],
  )?;

  let uid = tx.last_insert_rowid();

  tx.execute(
    "insert into profile (user, name, avatar, createdate, changeddate)
      values (?1, ?2, ?3, ?4, ?5)",
    params![uid, rd.full_name, Option::<String>::None, now, now],
  )?;

  tx.commit()?;

  Ok(uid)
}

pub fn read_user_by_email(conn: &Connection, email: &str) -> Result<User, snerr::Error> {
  let user = conn.query_row(
    "select id, hashwd, salt, registration_key
      from user where email = ?1",
    params![email],
    |row| {
      Ok(User {
        id: row.get(0)?,
        email: email.to_string(),
        hashwd: row.get(1)?,
        salt: row.get(2)?,
        registration_key: row.get(3)?,
      })
    },
  )?;

  Ok(user)
}

pub fn user_exists(conn: &Connection, email: &str) -> Result<bool, snerr::Error> {
  match conn.query_row(
    "select count(*) from user where email = ?1",
    params![email],
    |row| {
      let i: i64 = row.get(0)?;
      Ok(i)
    },
  ) {
    Ok(count) => Ok(count > 0),
    Err(e) => Err(e.into()),
  }
}

pub fn read_user_by_token(
  conn: &Connection,
  token: Uuid,
  token_expiration_ms: Option<i64>,
) -> Result<User, snerr::Error> {
  let (user, tokendate) = conn.query_row(
    "select id, email, hashwd, salt, registration_key, token.tokendate
      from user, token where user.id = token.user and token = ?1",
    params![token.to_string()],
    |row| {
      Ok((
        User {
          id: row.get(0)?,
          email: row.get(1)?,
          hashwd: row.get(2)?,
          salt: row.get(3)?,
          registration_key: row.get(4)?,
        },
        row.get(5)?,
      ))
    },
  )?;

  match token_expiration_ms {
    Some(texp) => {
      if is_token_expired(texp, tokendate) {
        bail!("login expired")
      } else {
        Ok(user)
      }
    }
    None => Ok(user),
  }
}

pub fn add_token(conn: &Connection, user: i64, token: Uuid) -> Result<(), snerr::Error> {
  let now = now()?;
  conn.execute(
    "insert into token (user, token, tokendate)
     values (?1, ?2, ?3)",
    params![user, token.to_string(), now],
  )?;

  Ok(())
}

pub fn purge_login_tokens(
  conn: &Connection,
  token_expiration_ms: i64,
) -> Result<(), snerr::Error> {
  let now = now()?;
  let expdt = now - token_expiration_ms;

  let count: i64 = conn.query_row(
    "select count(*) from
      token where tokendate < ?1",
    params![expdt],
    |row| Ok(row.get(0)?),
  )?;

  if count > 0 {
    info!("removing {} expired token records", count);

    conn.execute(
      "delete from token
        where tokendate < ?1",
      params![expdt],
    )?;
  }

  Ok(())
}

pub fn login_data(conn: &Connection, uid: i64) -> Result<LoginData, snerr::Error> {
  let ld = conn.query_row(
    "select U.email, P.name
      from user U, profile P
      where U.id = ?1 and P.user = U.id",
    params![uid],
    |row| {
      Ok(LoginData {
        userid: uid,
        email: row.get(0)?,
        name: row.get(1)?,
      })
    },
  )?;

  Ok(ld)
}

fn start_session(conn: &Connection, session: &Session, uid: i64) -> Result<(), snerr::Error> {
  let token = Uuid::new_v4();
  add_token(&conn, uid, token)?;
  session.insert("token", token)?;
  Ok(())
}

pub fn user_interface(
  conn: &Connection,
  session: &Session,
  msg: UserRequest,
) -> Result<UserResponse, snerr::Error> {
  match msg {
    UserRequest::UrqRegister(rd) => {
      if user_exists(&conn, rd.email.as_str())? {
        Ok(UserResponse::UrpUserExists)
      } else {
        let uid = new_user(&conn, &rd)?;
        start_session(&conn, &session, uid)?;
        info!("registered user: {}", rd.email);
        Ok(UserResponse::UrpRegistered(login_data(&conn, uid)?))
      }
    }
    UserRequest::UrqLogin(Login { email, pwd }) => {
      let userdata = match read_user_by_email(&conn, email.as_str()) {
        Ok(ud) => ud,
        Err(snerr::Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows)) => {
          // don't distinguish between bad email and bad pwd!
          return Ok(UserResponse::UrpInvalidLogin);
        }
        Err(e) => return Err(e),
      };

      if hash_password(pwd.as_str(), userdata.salt.as_str()) != userdata.hashwd {
        Ok(UserResponse::UrpInvalidLogin)
      } else {
        start_session(&conn, &session, userdata.id)?;
        info!("logged in, user: {}", userdata.email);
        Ok(UserResponse::UrpLoggedIn(login_data(&conn, userdata.id)?))
      }
    }
    UserRequest::UrqLogout => {
      session.remove("token");
      Ok(UserResponse::UrpLoggedOut)
    }
  }
}

// owns the timer thread and the schedule guard; dropping either one stops
// the purge.
pub struct TokenPurger {
  _timer: timer::Timer,
  _guard: timer::Guard,
}

pub fn start_token_purge(
  db: PathBuf,
  token_expiration_ms: i64,
  interval: chrono::Duration,
) -> TokenPurger {
  let timer = timer::Timer::new();
  let guard = timer.schedule_repeating(interval, move || {
    let r = (|| {
      let conn = crate::sqldata::connection_open(db.as_path())?;
      purge_login_tokens(&conn, token_expiration_ms)
    })();
    match r {
      Err(e) => error!("purge_login_tokens error: {}", e),
      Ok(_) => (),
    }
  });
  TokenPurger {
    _timer: timer,
    _guard: guard,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sqldata;
  use std::fs;
  use std::path::Path;

  fn registration(email: &str) -> Registration {
    Registration {
      email: email.to_string(),
      pwd: "pwd".to_string(),
      full_name: "Test User".to_string(),
    }
  }

  #[test]
  fn test_new_user_rolls_back() {
    let res = match rollback_test() {
      Ok(()) => true,
      Err(e) => {
        println!("error {:?}", e);
        false
      }
    };
    assert_eq!(res, true);
  }

  fn rollback_test() -> Result<(), Box<dyn std::error::Error>> {
    let dbp = Path::new("usertest.db");
    match fs::remove_file(dbp) {
      Ok(_) => (),
      Err(e) => println!("error removing usertest.db: {}", e),
    }
    sqldata::dbinit(dbp, None)?;
    let conn = sqldata::connection_open(dbp)?;

    // occupy the profile slot the next registration would use.
    conn.execute("PRAGMA foreign_keys = false;", params![])?;
    conn.execute(
      "insert into profile (user, name, avatar, createdate, changeddate)
        values (1, 'squatter', null, 0, 0)",
      params![],
    )?;
    conn.execute("PRAGMA foreign_keys = true;", params![])?;

    // the profile insert fails; the user row must not survive it.
    assert!(new_user(&conn, &registration("atomic@test.com")).is_err());
    assert_eq!(user_exists(&conn, "atomic@test.com")?, false);

    // with the obstruction gone, the same email registers fine.
    conn.execute("delete from profile", params![])?;
    let uid = new_user(&conn, &registration("atomic@test.com"))?;
    assert_eq!(login_data(&conn, uid)?.email, "atomic@test.com");

    Ok(())
  }

  #[test]
  fn test_token_purge_schedule() {
    let res = match purge_test() {
      Ok(()) => true,
      Err(e) => {
        println!("error {:?}", e);
        false
      }
    };
    assert_eq!(res, true);
  }

  fn purge_test() -> Result<(), Box<dyn std::error::Error>> {
    let dbp = Path::new("purgetest.db");
    match fs::remove_file(dbp) {
      Ok(_) => (),
      Err(e) => println!("error removing purgetest.db: {}", e),
    }
    sqldata::dbinit(dbp, None)?;
    let conn = sqldata::connection_open(dbp)?;

    let uid = new_user(&conn, &registration("purge@test.com"))?;
    conn.execute(
      "insert into token (user, token, tokendate) values (?1, ?2, ?3)",
      params![uid, Uuid::new_v4().to_string(), now()? - 1000],
    )?;

    // only the returned purger keeps the schedule alive.
    let purger = start_token_purge(
      PathBuf::from(dbp),
      100,
      chrono::Duration::milliseconds(20),
    );
    std::thread::sleep(std::time::Duration::from_millis(400));

    let count: i64 = conn.query_row("select count(*) from token", params![], |row| row.get(0))?;
    assert_eq!(count, 0);
    drop(purger);

    Ok(())
  }
}
