pub mod config;
pub mod error;
pub mod interfaces;
mod migrations;
pub mod sqldata;
mod sqltest;
pub mod state;
pub mod summarize;
pub mod users;
pub mod util;

use crate::{error as snerr, state::State};
use actix_cors::Cors;
use actix_files::NamedFile;
use actix_session::{
  config::PersistentSession, storage::CookieSessionStore, Session, SessionMiddleware,
};
use actix_web::{
  cookie::{self, Key},
  dev::Server,
  http::header::{ContentDisposition, DispositionParam, DispositionType},
  web, App, HttpRequest, HttpResponse, HttpServer,
};
use chrono;
use clap::Arg;
use config::Config;
use log::{error, info};
use rusqlite::Connection;
use serde_json;
use snprotocol::content::NoteId;
use snprotocol::export::{export_filename, export_note, ExportFormat};
use snprotocol::private::{PrivateError, PrivateReply, PrivateRequest};
use snprotocol::user::{UserRequest, UserResponse};
use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_actix_web::TracingLogger;
use uuid::Uuid;

async fn favicon(data: web::Data<State>, req: HttpRequest) -> HttpResponse {
  let staticpath = data
    .config
    .static_path
    .clone()
    .unwrap_or(PathBuf::from("static/"));
  let icopath = staticpath.join("favicon.ico");
  match NamedFile::open(&icopath) {
    Ok(f) => f.into_response(&req),
    Err(e) => HttpResponse::from_error(actix_web::error::ErrorInternalServerError(e)),
  }
}

// simple index handler
async fn mainpage(session: Session, data: web::Data<State>, req: HttpRequest) -> HttpResponse {
  info!("remote ip: {:?}, request:{:?}", req.connection_info(), req);

  // logged in?
  let logindata = match interfaces::login_data_for_token(session, &data.config) {
    Ok(optld) => match optld {
      Some(logindata) => serde_json::to_value(logindata).unwrap_or(serde_json::Value::Null),
      _ => serde_json::Value::Null,
    },
    _ => serde_json::Value::Null,
  };

  let mut staticpath = data
    .config
    .static_path
    .clone()
    .unwrap_or(PathBuf::from("static/"));
  staticpath.push("index.html");
  match staticpath.to_str() {
    Some(path) => match util::load_string(path) {
      Ok(s) => HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(s.replace("{{logindata}}", logindata.to_string().as_str())),
      Err(e) => HttpResponse::from_error(actix_web::error::ErrorImATeapot(e)),
    },
    None => HttpResponse::from_error(actix_web::error::ErrorImATeapot("bad static path")),
  }
}

pub fn to_private_error(e: snerr::Error) -> PrivateError {
  match e {
    snerr::Error::NoteNotFound(id) => PrivateError::PveNoteNotFound(id),
    snerr::Error::NotLoggedIn => PrivateError::PveNotLoggedIn,
    snerr::Error::Summarizer(msg) => PrivateError::PveSummarizeFailed(msg),
    snerr::Error::Reqwest(e) => PrivateError::PveSummarizeFailed(e.to_string()),
    _ => PrivateError::PveString(e.to_string()),
  }
}

async fn user(
  session: Session,
  data: web::Data<State>,
  item: web::Json<UserRequest>,
  req: HttpRequest,
) -> HttpResponse {
  info!(
    "user msg: {:?}  \n connection_info: {:?}",
    &item,
    req.connection_info()
  );
  match (|| {
    let conn = sqldata::connection_open(data.config.db.as_path())?;
    users::user_interface(&conn, &session, item.into_inner())
  })() {
    Ok(sr) => HttpResponse::Ok().json(sr),
    Err(e) => {
      error!("'user' err: {:?}", e);
      let se = UserResponse::UrpServerError(e.to_string());
      HttpResponse::Ok().json(se)
    }
  }
}

fn session_user(
  conn: &Connection,
  session: &Session,
  state: &web::Data<State>,
) -> Result<users::User, snerr::Error> {
  match session.get::<Uuid>("token")? {
    None => Err(snerr::Error::NotLoggedIn),
    Some(token) => {
      users::read_user_by_token(&conn, token, state.config.login_token_expiration_ms)
    }
  }
}

async fn private(
  session: Session,
  data: web::Data<State>,
  item: web::Json<PrivateRequest>,
  _req: HttpRequest,
) -> HttpResponse {
  match note_interface_check(&session, &data, item.into_inner()).await {
    Ok(sr) => HttpResponse::Ok().json(sr),
    Err(e) => {
      error!("'private' err: {:?}", e);
      HttpResponse::Ok().json(PrivateReply::PvyServerError(to_private_error(e)))
    }
  }
}

async fn note_interface_check(
  session: &Session,
  state: &State,
  msg: PrivateRequest,
) -> Result<PrivateReply, snerr::Error> {
  match session.get::<Uuid>("token")? {
    None => Ok(PrivateReply::PvyServerError(PrivateError::PveNotLoggedIn)),
    Some(token) => {
      let conn = sqldata::connection_open(state.config.db.as_path())?;
      match users::read_user_by_token(&conn, token, state.config.login_token_expiration_ms) {
        Err(e) => {
          info!("read_user_by_token error: {:?}, {:?}", token, e);

          Ok(PrivateReply::PvyServerError(PrivateError::PveLoginError(
            e.to_string(),
          )))
        }
        Ok(user) => {
          // finally!  processing messages as logged in user.
          interfaces::note_interface_loggedin(state, &conn, user.id, &msg).await
        }
      }
    }
  }
}

// GET /export/{id}/{format} - the note as a downloadable document, no
// server-side file involved.
async fn export(session: Session, state: web::Data<State>, req: HttpRequest) -> HttpResponse {
  let conn = match sqldata::connection_open(state.config.db.as_path()) {
    Ok(c) => c,
    Err(e) => return HttpResponse::InternalServerError().body(format!("{:?}", e)),
  };

  let user = match session_user(&conn, &session, &state) {
    Ok(u) => u,
    Err(snerr::Error::NotLoggedIn) => return HttpResponse::Unauthorized().body("not logged in"),
    Err(e) => return HttpResponse::InternalServerError().body(format!("{:?}", e)),
  };

  let noteid = match req.match_info().get("id") {
    Some(id) => match Uuid::parse_str(id) {
      Ok(uuid) => NoteId::Nid(uuid),
      Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    },
    None => return HttpResponse::BadRequest().body("note id required: /export/<id>/<format>"),
  };

  let format = match req.match_info().get("format").and_then(ExportFormat::from_str) {
    Some(f) => f,
    None => return HttpResponse::BadRequest().body("format must be 'txt' or 'md'"),
  };

  let note = match sqldata::read_note(&conn, user.id, &noteid) {
    Ok(n) => n,
    Err(snerr::Error::NoteNotFound(id)) => {
      return HttpResponse::NotFound().body(format!("note not found: {}", id))
    }
    Err(e) => return HttpResponse::InternalServerError().body(format!("{:?}", e)),
  };

  let filename = export_filename(note.title.as_str(), format);
  info!("user#export: {:?} -> {}", noteid, filename);

  HttpResponse::Ok()
    .content_type(format.content_type())
    .insert_header(ContentDisposition {
      disposition: DispositionType::Attachment,
      parameters: vec![DispositionParam::Filename(filename)],
    })
    .body(export_note(&note, format))
}

pub fn defcon() -> Config {
  Config {
    ip: "127.0.0.1".to_string(),
    port: 8010,
    mainsite: "http://localhost:8010".to_string(),
    altmainsite: [].to_vec(),
    static_path: None,
    db: PathBuf::from("./sumnotes.db"),
    summarizer_uri: "http://localhost:8011/summarize".to_string(),
    summarizer_timeout_ms: 30000,
    login_token_expiration_ms: Some(7 * 24 * 60 * 60 * 1000), // 7 days in milliseconds
  }
}

pub fn load_config(filename: &str) -> Result<Config, Box<dyn Error>> {
  info!("loading config: {}", filename);
  let c = toml::from_str(
    util::load_string(filename)
      .map_err(|e| {
        snerr::annotate_string(
          format!("failed to load config: '{}'", filename),
          snerr::Error::String(e.to_string()),
        )
      })?
      .as_str(),
  )?;
  Ok(c)
}

#[actix_web::main]
pub async fn err_main(
  oconfig: Option<Config>,
  logfile: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
  match logfile {
    Some(lf) => {
      let target = Box::new(std::fs::File::create(lf)?);
      env_logger::Builder::new()
        .target(env_logger::Target::Pipe(target))
        .filter(None, log::LevelFilter::Debug)
        .init();
    }
    None => env_logger::init(),
  };

  let matches = clap::App::new("sumnotes server")
    .version("1.0")
    .about("note summarizing web server")
    .arg(
      Arg::with_name("export")
        .short("e")
        .long("export")
        .value_name("FILE")
        .help("Export note database to json")
        .takes_value(true),
    )
    .arg(
      Arg::with_name("config")
        .short("c")
        .long("config")
        .value_name("FILE")
        .help("specify config file")
        .takes_value(true),
    )
    .arg(
      Arg::with_name("write_config")
        .short("w")
        .long("write_config")
        .value_name("FILE")
        .help("write default config file")
        .takes_value(true),
    )
    .get_matches();

  // writing a config file?
  if let Some(filename) = matches.value_of("write_config") {
    util::write_string(filename, toml::to_string_pretty(&defcon())?.as_str())?;
    info!("default config written to file: {}", filename);
    return Ok(());
  }

  // specifying a config file?  otherwise try to load the default.
  let config = match oconfig {
    // passed in config gets priority
    Some(c) => c,
    None => match matches.value_of("config") {
      Some(filename) => load_config(filename)?,
      None => load_config("config.toml")?,
    },
  };

  // are we exporting the DB?
  if let Some(exportfile) = matches.value_of("export") {
    sqldata::dbinit(config.db.as_path(), config.login_token_expiration_ms)?;

    util::write_string(
      exportfile,
      serde_json::to_string_pretty(&sqldata::export_db(config.db.as_path())?)?.as_str(),
    )?;

    return Ok(());
  }

  // Web server is the default.  The purger must outlive the server; its
  // guard cancels the schedule when dropped.
  let _token_purger = config.login_token_expiration_ms.map(|expms| {
    users::start_token_purge(config.db.clone(), expms, chrono::Duration::days(1))
  });

  let server = init_server(config).await?;
  server.await?;

  Ok(())
}

pub async fn init_server(mut config: Config) -> Result<Server, Box<dyn Error>> {
  info!("server init!");
  if config.static_path == None {
    for (key, value) in env::vars() {
      if key == "SUMNOTES_STATIC_PATH" {
        config.static_path = PathBuf::from_str(value.as_str()).ok();
      }
    }
  }

  info!("config parameters:\n\n{}", toml::to_string_pretty(&config)?);

  sqldata::dbinit(config.db.as_path(), config.login_token_expiration_ms)?;

  let state = web::Data::new(State {
    config: config.clone(),
  });

  let c = config.clone();
  let server = HttpServer::new(move || {
    let staticpath = c.static_path.clone().unwrap_or(PathBuf::from("static/"));
    let d = c.clone();
    let cors = Cors::default()
      .allowed_origin_fn(move |rv, rh| {
        if *rv == d.mainsite {
          true
        } else if d.altmainsite.iter().any(|am| *rv == am) {
          true
        } else {
          info!("cors denied: {:?}, {:?}", rv, rh);
          false
        }
      })
      .allow_any_header()
      .allow_any_method()
      .max_age(3600);

    App::new()
      .app_data(state.clone()) // <- create app with shared state
      .wrap(cors)
      .wrap(TracingLogger::default())
      .wrap(
        SessionMiddleware::builder(CookieSessionStore::default(), Key::from(&[0; 64]))
          .cookie_secure(false)
          // customize session and cookie expiration
          .session_lifecycle(
            PersistentSession::default().session_ttl(cookie::time::Duration::weeks(52)),
          )
          .build(),
      )
      .service(web::resource("/user").route(web::post().to(user)))
      .service(web::resource("/private").route(web::post().to(private)))
      .service(web::resource(r"/export/{id}/{format}").route(web::get().to(export)))
      .service(web::resource(r"/favicon.ico").route(web::get().to(favicon)))
      .service(actix_files::Files::new("/static/", staticpath))
      .service(web::resource("/{tail:.*}").route(web::get().to(mainpage)))
  })
  .bind(format!("{}:{}", config.ip, config.port))?
  .run();

  Ok(server)
}
