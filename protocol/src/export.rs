use crate::content::Note;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
  Text,
  Markdown,
}

impl ExportFormat {
  pub fn extension(&self) -> &'static str {
    match self {
      ExportFormat::Text => "txt",
      ExportFormat::Markdown => "md",
    }
  }

  pub fn content_type(&self) -> &'static str {
    match self {
      ExportFormat::Text => "text/plain; charset=utf-8",
      ExportFormat::Markdown => "text/markdown; charset=utf-8",
    }
  }

  pub fn from_str(s: &str) -> Option<ExportFormat> {
    match s {
      "txt" => Some(ExportFormat::Text),
      "md" => Some(ExportFormat::Markdown),
      _ => None,
    }
  }
}

pub fn export_note(note: &Note, format: ExportFormat) -> String {
  match format {
    ExportFormat::Text => note_to_text(note),
    ExportFormat::Markdown => note_to_markdown(note),
  }
}

// Plain text layout: underlined title, Summary: section, optional Keywords
// line, then the original content verbatim.  Tolerates a missing summary
// and an empty keyword list.
pub fn note_to_text(note: &Note) -> String {
  let mut s = String::new();
  s.push_str(note.title.as_str());
  s.push('\n');
  s.push_str("=".repeat(note.title.chars().count()).as_str());
  s.push_str("\n\n");
  s.push_str("Summary:\n");
  s.push_str(note.summary.as_deref().unwrap_or("No summary"));
  s.push_str("\n\n");
  if !note.keywords.is_empty() {
    s.push_str("Keywords: ");
    s.push_str(note.keywords.join(", ").as_str());
    s.push_str("\n\n");
  }
  s.push_str("Original Content:\n");
  s.push_str(note.content.as_str());
  s
}

pub fn note_to_markdown(note: &Note) -> String {
  let mut s = String::new();
  s.push_str("# ");
  s.push_str(note.title.as_str());
  s.push_str("\n\n## Summary\n\n");
  s.push_str(note.summary.as_deref().unwrap_or("No summary"));
  s.push('\n');
  if !note.keywords.is_empty() {
    s.push_str("\n## Keywords\n\n");
    for k in note.keywords.iter() {
      s.push_str("- ");
      s.push_str(k.as_str());
      s.push('\n');
    }
  }
  s.push_str("\n## Original Content\n\n");
  s.push_str(note.content.as_str());
  s
}

// lower-case the title, replace every char outside [a-z0-9] with '_'.
// reapplying to a derived name yields the same name.
pub fn export_filename(title: &str, format: ExportFormat) -> String {
  let stem: String = title
    .to_lowercase()
    .chars()
    .map(|c| {
      if c.is_ascii_lowercase() || c.is_ascii_digit() {
        c
      } else {
        '_'
      }
    })
    .collect();
  format!("{}.{}", stem, format.extension())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::{NoteId, SummaryLength, SummaryTone};
  use uuid::Uuid;

  fn test_note(summary: Option<&str>, keywords: Vec<&str>) -> Note {
    Note {
      id: NoteId::Nid(Uuid::new_v4()),
      user: 1,
      title: "Meeting Notes".to_string(),
      content: "we talked about stuff".to_string(),
      summary: summary.map(|s| s.to_string()),
      keywords: keywords.iter().map(|k| k.to_string()).collect(),
      length: SummaryLength::Short,
      tone: SummaryTone::Casual,
      bullet_points: false,
      folder: None,
      createdate: 0,
      changeddate: 0,
    }
  }

  #[test]
  fn test_text_export() {
    let note = test_note(Some("a short summary"), vec!["alpha", "beta"]);
    let out = note_to_text(&note);
    assert_eq!(
      out,
      "Meeting Notes\n\
       =============\n\
       \n\
       Summary:\n\
       a short summary\n\
       \n\
       Keywords: alpha, beta\n\
       \n\
       Original Content:\n\
       we talked about stuff"
    );
  }

  #[test]
  fn test_markdown_export() {
    let note = test_note(Some("a short summary"), vec!["alpha", "beta"]);
    let out = note_to_markdown(&note);
    assert_eq!(
      out,
      "# Meeting Notes\n\
       \n\
       ## Summary\n\
       \n\
       a short summary\n\
       \n\
       ## Keywords\n\
       \n\
       - alpha\n\
       - beta\n\
       \n\
       ## Original Content\n\
       \n\
       we talked about stuff"
    );
  }

  #[test]
  fn test_export_no_keywords() {
    let note = test_note(Some("a short summary"), vec![]);
    assert!(!note_to_text(&note).contains("Keywords"));
    assert!(!note_to_markdown(&note).contains("## Keywords"));
  }

  #[test]
  fn test_export_no_summary() {
    let note = test_note(None, vec!["alpha"]);
    assert!(note_to_text(&note).contains("Summary:\nNo summary\n"));
    assert!(note_to_markdown(&note).contains("## Summary\n\nNo summary\n"));
  }

  #[test]
  fn test_filename() {
    assert_eq!(
      export_filename("Q1 Report!!", ExportFormat::Text),
      "q1_report__.txt"
    );
    assert_eq!(
      export_filename("Meeting Notes", ExportFormat::Markdown),
      "meeting_notes.md"
    );
  }

  #[test]
  fn test_filename_idempotent() {
    let once = export_filename("Q1 Report!!", ExportFormat::Text);
    let stem = once.trim_end_matches(".txt");
    let twice = export_filename(stem, ExportFormat::Text);
    assert_eq!(once, twice);
  }
}
