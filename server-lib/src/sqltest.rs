#[cfg(test)]
mod tests {
  use crate::error as snerr;
  use crate::sqldata::*;
  use crate::users::new_user;
  use snprotocol::content::{
    SaveFolder, SaveNote, SaveProfile, SaveTag, SetNoteTags, SummaryLength, SummaryTone,
  };
  use snprotocol::user::Registration;
  use std::error::Error;
  use std::fs;
  use std::path::Path;
  use uuid::Uuid;

  #[test]
  fn test_sql() {
    let res = match err_test() {
      Ok(()) => true,
      Err(e) => {
        println!("error {:?}", e);
        false
      }
    };
    assert_eq!(res, true);
  }

  fn save_note_rq(title: &str, content: &str) -> SaveNote {
    SaveNote {
      id: None,
      title: title.to_string(),
      content: content.to_string(),
      summary: None,
      keywords: Vec::new(),
      length: SummaryLength::Medium,
      tone: SummaryTone::Professional,
      bullet_points: false,
      folder: None,
    }
  }

  fn err_test() -> Result<(), Box<dyn Error>> {
    let dbp = Path::new("test.db");
    match fs::remove_file(dbp) {
      Ok(_) => (),
      Err(e) => {
        println!("error removing test.db: {}", e);
      }
    }

    dbinit(dbp, None)?;

    let conn = connection_open(dbp)?;

    let uid1 = new_user(
      &conn,
      &Registration {
        email: "user1@test.com".to_string(),
        pwd: "pwd1".to_string(),
        full_name: "User One".to_string(),
      },
    )?;

    let uid2 = new_user(
      &conn,
      &Registration {
        email: "user2@test.com".to_string(),
        pwd: "pwd2".to_string(),
        full_name: "User Two".to_string(),
      },
    )?;

    // save and read back.
    let (_, saved1) = save_note(&conn, uid1, &save_note_rq("first note", "some text here"))?;
    let note1 = read_note(&conn, uid1, &saved1.id)?;
    assert_eq!(note1.title, "first note");
    assert_eq!(note1.content, "some text here");
    assert_eq!(note1.summary, None);
    assert_eq!(note1.user, uid1);

    // empty title or content is rejected.
    assert!(save_note(&conn, uid1, &save_note_rq("", "text")).is_err());
    assert!(save_note(&conn, uid1, &save_note_rq("title", "  ")).is_err());

    // other users can't see it.
    match read_note(&conn, uid2, &saved1.id) {
      Err(snerr::Error::NoteNotFound(id)) => assert_eq!(id, saved1.id),
      Err(e) => panic!("expected NoteNotFound, got {:?}", e),
      Ok(_) => panic!("read of another user's note should fail"),
    }
    assert_eq!(read_note_list(&conn, uid2, None)?.len(), 0);

    // nor update it; uid2's save lands as a new note of their own.
    let mut steal = save_note_rq("stolen", "mine now");
    steal.id = Some(saved1.id);
    assert!(save_note(&conn, uid2, &steal).is_err());
    assert_eq!(read_note(&conn, uid1, &saved1.id)?.title, "first note");

    // update in place; original content is preserved alongside the summary.
    let (_, resaved1) = save_note(
      &conn,
      uid1,
      &SaveNote {
        id: Some(saved1.id),
        title: "Generated Title".to_string(),
        content: "some text here".to_string(),
        summary: Some("a summary of the text".to_string()),
        keywords: vec!["some".to_string(), "text".to_string()],
        length: SummaryLength::Short,
        tone: SummaryTone::Casual,
        bullet_points: true,
        folder: None,
      },
    )?;
    assert_eq!(resaved1.id, saved1.id);
    let note1 = read_note(&conn, uid1, &saved1.id)?;
    assert_eq!(note1.title, "Generated Title");
    assert_eq!(note1.content, "some text here");
    assert_eq!(note1.summary, Some("a summary of the text".to_string()));
    assert_eq!(note1.keywords, vec!["some".to_string(), "text".to_string()]);
    assert_eq!(note1.length, SummaryLength::Short);
    assert_eq!(note1.tone, SummaryTone::Casual);
    assert_eq!(note1.bullet_points, true);

    // list is newest-changed first, per user.
    let (_, saved2) = save_note(&conn, uid1, &save_note_rq("second note", "more text"))?;
    let (_, _other) = save_note(&conn, uid2, &save_note_rq("u2 note", "u2 text"))?;
    let list = read_note_list(&conn, uid1, None)?;
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, saved2.id);
    assert_eq!(read_note_list(&conn, uid1, Some(1))?.len(), 1);

    // folders.
    let fldr = save_folder(
      &conn,
      uid1,
      &SaveFolder {
        id: None,
        name: "work".to_string(),
        color: "#ff0000".to_string(),
      },
    )?;
    let mut infolder = save_note_rq("filed note", "filed text");
    infolder.folder = Some(fldr.id);
    let (_, saved3) = save_note(&conn, uid1, &infolder)?;
    assert_eq!(read_note(&conn, uid1, &saved3.id)?.folder, Some(fldr.id));

    // deleting a folder detaches its notes instead of deleting them.
    delete_folder(&conn, uid1, &fldr.id)?;
    assert_eq!(read_folders(&conn, uid1)?.len(), 0);
    assert_eq!(read_note(&conn, uid1, &saved3.id)?.folder, None);

    // tags.
    let tag1 = save_tag(
      &conn,
      uid1,
      &SaveTag {
        id: None,
        name: "todo".to_string(),
        color: "#00ff00".to_string(),
      },
    )?;
    let tag2 = save_tag(
      &conn,
      uid1,
      &SaveTag {
        id: None,
        name: "later".to_string(),
        color: "#0000ff".to_string(),
      },
    )?;
    set_note_tags(
      &conn,
      uid1,
      &SetNoteTags {
        note: saved2.id,
        tags: vec![tag1.id, tag2.id],
      },
    )?;
    let ntags = read_note_tags(&conn, uid1, &saved2.id)?;
    assert_eq!(ntags.len(), 2);

    // replacing assignments is total, not additive.
    set_note_tags(
      &conn,
      uid1,
      &SetNoteTags {
        note: saved2.id,
        tags: vec![tag2.id],
      },
    )?;
    let ntags = read_note_tags(&conn, uid1, &saved2.id)?;
    assert_eq!(ntags.len(), 1);
    assert_eq!(ntags[0].id, tag2.id);

    // a replacement with an unknown tag fails whole; the old set survives.
    assert!(set_note_tags(
      &conn,
      uid1,
      &SetNoteTags {
        note: saved2.id,
        tags: vec![tag1.id, Uuid::new_v4()],
      }
    )
    .is_err());
    let ntags = read_note_tags(&conn, uid1, &saved2.id)?;
    assert_eq!(ntags.len(), 1);
    assert_eq!(ntags[0].id, tag2.id);

    // uid2 can't tag uid1's note.
    assert!(set_note_tags(
      &conn,
      uid2,
      &SetNoteTags {
        note: saved2.id,
        tags: vec![],
      }
    )
    .is_err());

    // deleting a tag removes its assignments.
    delete_tag(&conn, uid1, &tag2.id)?;
    assert_eq!(read_note_tags(&conn, uid1, &saved2.id)?.len(), 0);

    // delete; gone from list and get, and idempotent.
    delete_note(&conn, uid1, &saved2.id)?;
    assert!(read_note(&conn, uid1, &saved2.id).is_err());
    assert!(read_note_list(&conn, uid1, None)?
      .iter()
      .all(|n| n.id != saved2.id));
    delete_note(&conn, uid1, &saved2.id)?;

    // uid2's delete doesn't touch uid1's note.
    delete_note(&conn, uid2, &saved1.id)?;
    assert_eq!(read_note(&conn, uid1, &saved1.id)?.title, "Generated Title");

    // registration created the profile row.
    let prof = read_profile(&conn, uid1)?;
    assert_eq!(prof.email, "user1@test.com");
    assert_eq!(prof.name, "User One");
    assert_eq!(prof.avatar, None);

    let prof = save_profile(
      &conn,
      uid1,
      &SaveProfile {
        name: "U. One".to_string(),
        avatar: Some("avatar.png".to_string()),
      },
    )?;
    assert_eq!(prof.name, "U. One");
    assert_eq!(read_profile(&conn, uid1)?.name, "U. One");
    assert_eq!(read_profile(&conn, uid2)?.name, "User Two");

    Ok(())
  }
}
