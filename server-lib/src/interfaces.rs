use crate::config::Config;
use crate::error as snerr;
use crate::sqldata;
use crate::state::State;
use crate::summarize;
use crate::users;
use actix_session::Session;
use log::info;
use rusqlite::Connection;
use snprotocol::filter::filter_notes;
use snprotocol::private::{PrivateReply, PrivateRequest};
use snprotocol::user::LoginData;

pub fn login_data_for_token(
  session: Session,
  config: &Config,
) -> Result<Option<LoginData>, snerr::Error> {
  let conn = sqldata::connection_open(config.db.as_path())?;

  let ldopt = match session.get("token")? {
    None => None,
    Some(token) => {
      match users::read_user_by_token(&conn, token, config.login_token_expiration_ms) {
        Ok(user) => Some(users::login_data(&conn, user.id)?),
        Err(snerr::Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows)) => None,
        Err(_) => None,
      }
    }
  };
  Ok(ldopt)
}

pub async fn note_interface_loggedin(
  state: &State,
  conn: &Connection,
  uid: i64,
  msg: &PrivateRequest,
) -> Result<PrivateReply, snerr::Error> {
  info!("note_interface_loggedin msg: {:?}", msg);
  match msg {
    PrivateRequest::PvqGetNoteList(gnl) => {
      let notes = sqldata::read_note_list(&conn, uid, gnl.limit)?;
      Ok(PrivateReply::PvyNoteList(notes))
    }
    PrivateRequest::PvqSearchNotes(search) => {
      // fetch the owner's list, then apply the same pure filter the list
      // page uses on already-loaded data.
      let notes = sqldata::read_note_list(&conn, uid, search.limit)?;
      Ok(PrivateReply::PvyNoteList(filter_notes(
        &notes,
        search.query.as_str(),
      )))
    }
    PrivateRequest::PvqGetNote(id) => {
      let note = sqldata::read_note(&conn, uid, &id)?;
      info!("user#getnote: {:?} - {}", id, note.title);
      Ok(PrivateReply::PvyNote(note))
    }
    PrivateRequest::PvqSaveNote(sn) => {
      let (_id, saved) = sqldata::save_note(&conn, uid, &sn)?;
      Ok(PrivateReply::PvySavedNote(saved))
    }
    PrivateRequest::PvqDeleteNote(id) => {
      sqldata::delete_note(&conn, uid, &id)?;
      Ok(PrivateReply::PvyDeletedNote(id.clone()))
    }
    PrivateRequest::PvqSummarizeNote(rq) => {
      let summary = summarize::summarize(&state.config, &rq).await?;
      Ok(PrivateReply::PvySummary(summary))
    }
    PrivateRequest::PvqGetFolders => {
      let folders = sqldata::read_folders(&conn, uid)?;
      Ok(PrivateReply::PvyFolders(folders))
    }
    PrivateRequest::PvqSaveFolder(sf) => {
      let folder = sqldata::save_folder(&conn, uid, &sf)?;
      Ok(PrivateReply::PvySavedFolder(folder))
    }
    PrivateRequest::PvqDeleteFolder(id) => {
      sqldata::delete_folder(&conn, uid, &id)?;
      Ok(PrivateReply::PvyDeletedFolder(id.clone()))
    }
    PrivateRequest::PvqGetTags => {
      let tags = sqldata::read_tags(&conn, uid)?;
      Ok(PrivateReply::PvyTags(tags))
    }
    PrivateRequest::PvqSaveTag(st) => {
      let tag = sqldata::save_tag(&conn, uid, &st)?;
      Ok(PrivateReply::PvySavedTag(tag))
    }
    PrivateRequest::PvqDeleteTag(id) => {
      sqldata::delete_tag(&conn, uid, &id)?;
      Ok(PrivateReply::PvyDeletedTag(id.clone()))
    }
    PrivateRequest::PvqGetNoteTags(id) => {
      let tags = sqldata::read_note_tags(&conn, uid, &id)?;
      Ok(PrivateReply::PvyNoteTags(tags))
    }
    PrivateRequest::PvqSetNoteTags(snt) => {
      sqldata::set_note_tags(&conn, uid, &snt)?;
      Ok(PrivateReply::PvyNoteTagsSet(snt.note))
    }
    PrivateRequest::PvqGetProfile => {
      let profile = sqldata::read_profile(&conn, uid)?;
      Ok(PrivateReply::PvyProfile(profile))
    }
    PrivateRequest::PvqSaveProfile(sp) => {
      let profile = sqldata::save_profile(&conn, uid, &sp)?;
      Ok(PrivateReply::PvySavedProfile(profile))
    }
  }
}
