use crate::error as snerr;
use crate::migrations as snm;
use crate::util::now;
use barrel::backend::Sqlite;
use log::info;
use rusqlite::{params, Connection};
use serde_derive::{Deserialize, Serialize};
use simple_error::bail;
use snprotocol::content::{
  Folder, ListNote, Note, NoteId, Profile, SaveFolder, SaveNote, SaveProfile, SaveTag, SavedNote,
  SetNoteTags, SummaryLength, SummaryTone, Tag,
};
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

pub fn connection_open(dbfile: &Path) -> Result<Connection, snerr::Error> {
  let conn = Connection::open(dbfile)?;

  conn.busy_handler(Some(|count| {
    info!("busy_handler: {}", count);
    let d = Duration::from_millis(500);
    std::thread::sleep(d);
    true
  }))?;

  conn.execute("PRAGMA foreign_keys = true;", params![])?;

  Ok(conn)
}

pub fn get_single_value(conn: &Connection, name: &str) -> Result<Option<String>, snerr::Error> {
  match conn.query_row(
    "select value from singlevalue where name = ?1",
    params![name],
    |row| Ok(row.get(0)?),
  ) {
    Ok(v) => Ok(Some(v)),
    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
    Err(x) => Err(x.into()),
  }
}

pub fn set_single_value(conn: &Connection, name: &str, value: &str) -> Result<(), snerr::Error> {
  conn.execute(
    "insert into singlevalue (name, value) values (?1, ?2)
        on conflict (name) do update set value = ?2 where name = ?1",
    params![name, value],
  )?;
  Ok(())
}

pub fn dbinit(dbfile: &Path, token_expiration_ms: Option<i64>) -> Result<(), snerr::Error> {
  let exists = dbfile.exists();

  let conn = connection_open(dbfile)?;

  if !exists {
    info!("initialdb");
    conn.execute_batch(snm::initialdb().make::<Sqlite>().as_str())?;
  }

  let nlevel = match get_single_value(&conn, "migration_level") {
    Err(_) => 0,
    Ok(None) => 0,
    Ok(Some(level)) => {
      let l = match level.parse::<i32>() {
        Ok(l) => l,
        Err(e) => return Err(format!("{}", e).into()),
      };
      l
    }
  };

  if nlevel < 1 {
    info!("update1");
    conn.execute_batch(snm::update1().make::<Sqlite>().as_str())?;
    set_single_value(&conn, "migration_level", "1")?;
  }

  info!("db up to date.");

  if let Some(expms) = token_expiration_ms {
    crate::users::purge_login_tokens(&conn, expms)?;
  }

  Ok(())
}

pub fn note_id_for_uuid(conn: &Connection, id: &NoteId) -> Result<i64, snerr::Error> {
  match conn.query_row(
    "select id from note where uuid = ?1",
    params![id.to_string()],
    |row| Ok(row.get(0)?),
  ) {
    Ok(nid) => Ok(nid),
    Err(rusqlite::Error::QueryReturnedNoRows) => Err(snerr::Error::NoteNotFound(*id)),
    Err(e) => Err(e.into()),
  }
}

pub fn is_note_mine(conn: &Connection, id: &NoteId, uid: i64) -> Result<bool, snerr::Error> {
  match conn.query_row(
    "select count(*) from note
      where uuid = ?1 and user = ?2",
    params![id.to_string(), uid],
    |row| {
      let i: i64 = row.get(0)?;
      Ok(i)
    },
  ) {
    Ok(count) => Ok(count > 0),
    Err(x) => Err(x.into()),
  }
}

fn keywords_from_json(s: &str) -> Result<Vec<String>, snerr::Error> {
  Ok(serde_json::from_str(s)?)
}

fn length_from_str(s: &str) -> Result<SummaryLength, snerr::Error> {
  SummaryLength::from_str(s).ok_or(snerr::Error::String(format!("bad summary length: {}", s)))
}

fn tone_from_str(s: &str) -> Result<SummaryTone, snerr::Error> {
  SummaryTone::from_str(s).ok_or(snerr::Error::String(format!("bad summary tone: {}", s)))
}

fn folder_id_for_uuid(conn: &Connection, uid: i64, folder: &Uuid) -> Result<i64, snerr::Error> {
  match conn.query_row(
    "select id from folder where uuid = ?1 and user = ?2",
    params![folder.to_string(), uid],
    |row| Ok(row.get(0)?),
  ) {
    Ok(fid) => Ok(fid),
    Err(rusqlite::Error::QueryReturnedNoRows) => bail!("folder not found: {}", folder),
    Err(e) => Err(e.into()),
  }
}

// owner-scoped read; another user's note looks exactly like a missing one.
pub fn read_note(conn: &Connection, uid: i64, id: &NoteId) -> Result<Note, snerr::Error> {
  match conn.query_row_and_then(
    "select N.uuid, N.user, N.title, N.content, N.summary, N.keywords, N.length, N.tone,
            N.bullet_points, F.uuid, N.createdate, N.changeddate
      from note N left join folder F on N.folder = F.id
      where N.uuid = ?1 and N.user = ?2",
    params![id.to_string(), uid],
    |row| {
      Ok::<_, snerr::Error>(Note {
        id: NoteId::Nid(Uuid::parse_str(row.get::<usize, String>(0)?.as_str())?),
        user: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        summary: row.get(4)?,
        keywords: keywords_from_json(row.get::<usize, String>(5)?.as_str())?,
        length: length_from_str(row.get::<usize, String>(6)?.as_str())?,
        tone: tone_from_str(row.get::<usize, String>(7)?.as_str())?,
        bullet_points: row.get(8)?,
        folder: match row.get::<usize, Option<String>>(9)? {
          Some(s) => Some(Uuid::parse_str(s.as_str())?),
          None => None,
        },
        createdate: row.get(10)?,
        changeddate: row.get(11)?,
      })
    },
  ) {
    Ok(note) => Ok(note),
    Err(snerr::Error::Rusqlite(rusqlite::Error::QueryReturnedNoRows)) => {
      Err(snerr::Error::NoteNotFound(*id))
    }
    Err(e) => Err(e),
  }
}

// newest first.  an empty vec is a normal result for a new user.
pub fn read_note_list(
  conn: &Connection,
  uid: i64,
  limit: Option<i64>,
) -> Result<Vec<ListNote>, snerr::Error> {
  let mut sql = "select N.uuid, N.title, N.summary, N.keywords, F.uuid, N.createdate, N.changeddate
      from note N left join folder F on N.folder = F.id
      where N.user = ?1
      order by N.changeddate desc"
    .to_string();
  if let Some(l) = limit {
    sql.push_str(format!(" limit {}", l).as_str());
  }

  let mut pstmt = conn.prepare(sql.as_str())?;
  let rows = pstmt.query_and_then(params![uid], |row| {
    Ok::<_, snerr::Error>(ListNote {
      id: NoteId::Nid(Uuid::parse_str(row.get::<usize, String>(0)?.as_str())?),
      title: row.get(1)?,
      summary: row.get(2)?,
      keywords: keywords_from_json(row.get::<usize, String>(3)?.as_str())?,
      folder: match row.get::<usize, Option<String>>(4)? {
        Some(s) => Some(Uuid::parse_str(s.as_str())?),
        None => None,
      },
      createdate: row.get(5)?,
      changeddate: row.get(6)?,
    })
  })?;

  let mut notes = Vec::new();
  for n in rows {
    notes.push(n?);
  }
  Ok(notes)
}

pub fn save_note(
  conn: &Connection,
  uid: i64,
  note: &SaveNote,
) -> Result<(i64, SavedNote), snerr::Error> {
  if note.title.trim().is_empty() {
    bail!("note title may not be empty");
  }
  if note.content.trim().is_empty() {
    bail!("note content may not be empty");
  }

  let now = now()?;
  let keywords = serde_json::to_string(&note.keywords)?;
  let folder = match &note.folder {
    Some(f) => Some(folder_id_for_uuid(&conn, uid, f)?),
    None => None,
  };

  match note.id {
    Some(nid) => {
      // existing note.  update IF mine; the owner column is never touched.
      match conn.execute(
        "update note set title = ?1, content = ?2, summary = ?3, keywords = ?4, length = ?5,
            tone = ?6, bullet_points = ?7, folder = ?8, changeddate = ?9
         where uuid = ?10 and user = ?11",
        params![
          note.title,
          note.content,
          note.summary,
          keywords,
          note.length.as_str(),
          note.tone.as_str(),
          note.bullet_points,
          folder,
          now,
          nid.to_string(),
          uid
        ],
      ) {
        Ok(1) => Ok((
          note_id_for_uuid(&conn, &nid)?,
          SavedNote {
            id: nid,
            changeddate: now,
          },
        )),
        Ok(0) => Err(snerr::Error::NoteNotFound(nid)),
        Ok(_) => bail!("unexpected update success!"),
        Err(e) => Err(e)?,
      }
    }
    None => {
      // new note!
      let uuid = Uuid::new_v4();
      conn.execute(
        "insert into note (uuid, user, folder, title, content, summary, keywords, length, tone,
            bullet_points, createdate, changeddate)
         values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
          uuid.to_string(),
          uid,
          folder,
          note.title,
          note.content,
          note.summary,
          keywords,
          note.length.as_str(),
          note.tone.as_str(),
          note.bullet_points,
          now,
          now
        ],
      )?;
      let id = conn.last_insert_rowid();
      Ok((
        id,
        SavedNote {
          id: NoteId::Nid(uuid),
          changeddate: now,
        },
      ))
    }
  }
}

// idempotent in effect; deleting an absent or non-owned id is not an error.
pub fn delete_note(conn: &Connection, uid: i64, id: &NoteId) -> Result<(), snerr::Error> {
  conn.execute(
    "delete from note_tag where note in
      (select id from note where uuid = ?1 and user = ?2)",
    params![id.to_string(), uid],
  )?;
  conn.execute(
    "delete from note where uuid = ?1 and user = ?2",
    params![id.to_string(), uid],
  )?;
  Ok(())
}

// folder CRUD

pub fn read_folders(conn: &Connection, uid: i64) -> Result<Vec<Folder>, snerr::Error> {
  let mut pstmt = conn.prepare(
    "select uuid, name, color, createdate, changeddate
      from folder where user = ?1
      order by name",
  )?;
  let rows = pstmt.query_and_then(params![uid], |row| {
    Ok::<_, snerr::Error>(Folder {
      id: Uuid::parse_str(row.get::<usize, String>(0)?.as_str())?,
      name: row.get(1)?,
      color: row.get(2)?,
      createdate: row.get(3)?,
      changeddate: row.get(4)?,
    })
  })?;

  let mut folders = Vec::new();
  for f in rows {
    folders.push(f?);
  }
  Ok(folders)
}

pub fn read_folder(conn: &Connection, uid: i64, id: &Uuid) -> Result<Folder, snerr::Error> {
  Ok(conn.query_row(
    "select uuid, name, color, createdate, changeddate
      from folder where uuid = ?1 and user = ?2",
    params![id.to_string(), uid],
    |row| {
      Ok(Folder {
        id: *id,
        name: row.get(1)?,
        color: row.get(2)?,
        createdate: row.get(3)?,
        changeddate: row.get(4)?,
      })
    },
  )?)
}

pub fn save_folder(
  conn: &Connection,
  uid: i64,
  folder: &SaveFolder,
) -> Result<Folder, snerr::Error> {
  if folder.name.trim().is_empty() {
    bail!("folder name may not be empty");
  }
  let now = now()?;

  match folder.id {
    Some(uuid) => {
      match conn.execute(
        "update folder set name = ?1, color = ?2, changeddate = ?3
          where uuid = ?4 and user = ?5",
        params![folder.name, folder.color, now, uuid.to_string(), uid],
      ) {
        Ok(1) => read_folder(&conn, uid, &uuid),
        Ok(0) => bail!("folder not found: {}", uuid),
        Ok(_) => bail!("unexpected update success!"),
        Err(e) => Err(e)?,
      }
    }
    None => {
      let uuid = Uuid::new_v4();
      conn.execute(
        "insert into folder (uuid, user, name, color, createdate, changeddate)
          values (?1, ?2, ?3, ?4, ?5, ?6)",
        params![uuid.to_string(), uid, folder.name, folder.color, now, now],
      )?;
      read_folder(&conn, uid, &uuid)
    }
  }
}

// detach the folder's notes, then remove the folder.  notes survive.
pub fn delete_folder(conn: &Connection, uid: i64, id: &Uuid) -> Result<(), snerr::Error> {
  conn.execute(
    "update note set folder = null where user = ?2 and folder in
      (select id from folder where uuid = ?1 and user = ?2)",
    params![id.to_string(), uid],
  )?;
  conn.execute(
    "delete from folder where uuid = ?1 and user = ?2",
    params![id.to_string(), uid],
  )?;
  Ok(())
}

// tag CRUD

pub fn read_tags(conn: &Connection, uid: i64) -> Result<Vec<Tag>, snerr::Error> {
  let mut pstmt = conn.prepare(
    "select uuid, name, color, createdate, changeddate
      from tag where user = ?1
      order by name",
  )?;
  let rows = pstmt.query_and_then(params![uid], |row| {
    Ok::<_, snerr::Error>(Tag {
      id: Uuid::parse_str(row.get::<usize, String>(0)?.as_str())?,
      name: row.get(1)?,
      color: row.get(2)?,
      createdate: row.get(3)?,
      changeddate: row.get(4)?,
    })
  })?;

  let mut tags = Vec::new();
  for t in rows {
    tags.push(t?);
  }
  Ok(tags)
}

pub fn read_tag(conn: &Connection, uid: i64, id: &Uuid) -> Result<Tag, snerr::Error> {
  Ok(conn.query_row(
    "select uuid, name, color, createdate, changeddate
      from tag where uuid = ?1 and user = ?2",
    params![id.to_string(), uid],
    |row| {
      Ok(Tag {
        id: *id,
        name: row.get(1)?,
        color: row.get(2)?,
        createdate: row.get(3)?,
        changeddate: row.get(4)?,
      })
    },
  )?)
}

pub fn save_tag(conn: &Connection, uid: i64, tag: &SaveTag) -> Result<Tag, snerr::Error> {
  if tag.name.trim().is_empty() {
    bail!("tag name may not be empty");
  }
  let now = now()?;

  match tag.id {
    Some(uuid) => {
      match conn.execute(
        "update tag set name = ?1, color = ?2, changeddate = ?3
          where uuid = ?4 and user = ?5",
        params![tag.name, tag.color, now, uuid.to_string(), uid],
      ) {
        Ok(1) => read_tag(&conn, uid, &uuid),
        Ok(0) => bail!("tag not found: {}", uuid),
        Ok(_) => bail!("unexpected update success!"),
        Err(e) => Err(e)?,
      }
    }
    None => {
      let uuid = Uuid::new_v4();
      conn.execute(
        "insert into tag (uuid, user, name, color, createdate, changeddate)
          values (?1, ?2, ?3, ?4, ?5, ?6)",
        params![uuid.to_string(), uid, tag.name, tag.color, now, now],
      )?;
      read_tag(&conn, uid, &uuid)
    }
  }
}

pub fn delete_tag(conn: &Connection, uid: i64, id: &Uuid) -> Result<(), snerr::Error> {
  conn.execute(
    "delete from note_tag where tag in
      (select id from tag where uuid = ?1 and user = ?2)",
    params![id.to_string(), uid],
  )?;
  conn.execute(
    "delete from tag where uuid = ?1 and user = ?2",
    params![id.to_string(), uid],
  )?;
  Ok(())
}

pub fn read_note_tags(conn: &Connection, uid: i64, id: &NoteId) -> Result<Vec<Tag>, snerr::Error> {
  if !is_note_mine(&conn, id, uid)? {
    return Err(snerr::Error::NoteNotFound(*id));
  }

  let mut pstmt = conn.prepare(
    "select T.uuid, T.name, T.color, T.createdate, T.changeddate
      from tag T, note_tag NT, note N
      where N.uuid = ?1 and NT.note = N.id and NT.tag = T.id
      order by T.name",
  )?;
  let rows = pstmt.query_and_then(params![id.to_string()], |row| {
    Ok::<_, snerr::Error>(Tag {
      id: Uuid::parse_str(row.get::<usize, String>(0)?.as_str())?,
      name: row.get(1)?,
      color: row.get(2)?,
      createdate: row.get(3)?,
      changeddate: row.get(4)?,
    })
  })?;

  let mut tags = Vec::new();
  for t in rows {
    tags.push(t?);
  }
  Ok(tags)
}

// replace the note's tag set.  both the note and every tag must be the
// caller's; a missing tag rolls back the whole replacement.
pub fn set_note_tags(conn: &Connection, uid: i64, snt: &SetNoteTags) -> Result<(), snerr::Error> {
  if !is_note_mine(&conn, &snt.note, uid)? {
    return Err(snerr::Error::NoteNotFound(snt.note));
  }

  let tx = conn.unchecked_transaction()?;

  tx.execute(
    "delete from note_tag where note in
      (select id from note where uuid = ?1 and user = ?2)",
    params![snt.note.to_string(), uid],
  )?;

  for tag in snt.tags.iter() {
    let count = tx.execute(
      "insert into note_tag (note, tag)
        select N.id, T.id from note N, tag T
        where N.uuid = ?1 and N.user = ?3 and T.uuid = ?2 and T.user = ?3",
      params![snt.note.to_string(), tag.to_string(), uid],
    )?;
    if count != 1 {
      bail!("tag not found: {}", tag);
    }
  }

  tx.commit()?;

  Ok(())
}

// profile

pub fn read_profile(conn: &Connection, uid: i64) -> Result<Profile, snerr::Error> {
  Ok(conn.query_row(
    "select U.email, P.name, P.avatar, P.createdate, P.changeddate
      from user U, profile P
      where U.id = ?1 and P.user = U.id",
    params![uid],
    |row| {
      Ok(Profile {
        userid: uid,
        email: row.get(0)?,
        name: row.get(1)?,
        avatar: row.get(2)?,
        createdate: row.get(3)?,
        changeddate: row.get(4)?,
      })
    },
  )?)
}

pub fn save_profile(
  conn: &Connection,
  uid: i64,
  profile: &SaveProfile,
) -> Result<Profile, snerr::Error> {
  if profile.name.trim().is_empty() {
    bail!("display name may not be empty");
  }
  let now = now()?;
  conn.execute(
    "update profile set name = ?1, avatar = ?2, changeddate = ?3
      where user = ?4",
    params![profile.name, profile.avatar, now, uid],
  )?;
  read_profile(&conn, uid)
}

// admin dump of the notes table, for the --export flag.
#[derive(Serialize, Deserialize, Debug)]
pub struct DbDump {
  pub notes: Vec<Note>,
}

pub fn export_db(dbfile: &Path) -> Result<DbDump, snerr::Error> {
  let conn = connection_open(dbfile)?;

  let mut pstmt = conn.prepare(
    "select N.uuid, N.user, N.title, N.content, N.summary, N.keywords, N.length, N.tone,
            N.bullet_points, F.uuid, N.createdate, N.changeddate
      from note N left join folder F on N.folder = F.id
      order by N.user, N.changeddate desc",
  )?;
  let rows = pstmt.query_and_then(params![], |row| {
    Ok::<_, snerr::Error>(Note {
      id: NoteId::Nid(Uuid::parse_str(row.get::<usize, String>(0)?.as_str())?),
      user: row.get(1)?,
      title: row.get(2)?,
      content: row.get(3)?,
      summary: row.get(4)?,
      keywords: keywords_from_json(row.get::<usize, String>(5)?.as_str())?,
      length: length_from_str(row.get::<usize, String>(6)?.as_str())?,
      tone: tone_from_str(row.get::<usize, String>(7)?.as_str())?,
      bullet_points: row.get(8)?,
      folder: match row.get::<usize, Option<String>>(9)? {
        Some(s) => Some(Uuid::parse_str(s.as_str())?),
        None => None,
      },
      createdate: row.get(10)?,
      changeddate: row.get(11)?,
    })
  })?;

  let mut notes = Vec::new();
  for n in rows {
    notes.push(n?);
  }

  Ok(DbDump { notes })
}
