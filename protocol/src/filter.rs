use crate::content::ListNote;

// case-insensitive substring match against title, summary, or any keyword.
// an empty query matches everything.  operates on already-fetched notes
// only; there's no sql involved.
pub fn note_matches(note: &ListNote, query: &str) -> bool {
  if query.is_empty() {
    return true;
  }
  let q = query.to_lowercase();
  if note.title.to_lowercase().contains(q.as_str()) {
    return true;
  }
  if let Some(summary) = &note.summary {
    if summary.to_lowercase().contains(q.as_str()) {
      return true;
    }
  }
  note
    .keywords
    .iter()
    .any(|k| k.to_lowercase().contains(q.as_str()))
}

pub fn filter_notes(notes: &[ListNote], query: &str) -> Vec<ListNote> {
  notes
    .iter()
    .filter(|n| note_matches(n, query))
    .cloned()
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::NoteId;
  use uuid::Uuid;

  fn listnote(title: &str, summary: Option<&str>, keywords: Vec<&str>) -> ListNote {
    ListNote {
      id: NoteId::Nid(Uuid::new_v4()),
      title: title.to_string(),
      summary: summary.map(|s| s.to_string()),
      keywords: keywords.iter().map(|k| k.to_string()).collect(),
      folder: None,
      createdate: 0,
      changeddate: 0,
    }
  }

  #[test]
  fn test_filter() {
    let notes = vec![
      listnote("Grocery List", None, vec![]),
      listnote("Standup", Some("Discussed the rust rewrite"), vec![]),
      listnote("Misc", None, vec!["groceries", "chores"]),
    ];

    // empty query matches everything.
    assert_eq!(filter_notes(&notes, ""), notes);

    // title match.
    let r = filter_notes(&notes, "grocery");
    assert_eq!(r.len(), 1);
    assert_eq!(r[0].title, "Grocery List");

    // summary match.
    let r = filter_notes(&notes, "rewrite");
    assert_eq!(r.len(), 1);
    assert_eq!(r[0].title, "Standup");

    // keyword match.
    let r = filter_notes(&notes, "chores");
    assert_eq!(r.len(), 1);
    assert_eq!(r[0].title, "Misc");

    // no match is an empty result, not an error.
    assert_eq!(filter_notes(&notes, "zzz").len(), 0);
  }

  #[test]
  fn test_filter_case_insensitive() {
    let notes = vec![
      listnote("Grocery List", None, vec![]),
      listnote("Standup", Some("Discussed the RUST rewrite"), vec![]),
    ];
    assert_eq!(
      filter_notes(&notes, "GROCERY"),
      filter_notes(&notes, "grocery")
    );
    assert_eq!(filter_notes(&notes, "rust").len(), 1);
  }

  #[test]
  fn test_filter_is_subset() {
    let notes = vec![
      listnote("a", None, vec![]),
      listnote("b", None, vec!["a"]),
      listnote("c", None, vec![]),
    ];
    for q in ["", "a", "b", "nope"].iter() {
      let r = filter_notes(&notes, q);
      assert!(r.iter().all(|n| notes.contains(n)));
    }
  }
}
