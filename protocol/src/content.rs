use serde_derive::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum NoteId {
  Nid(Uuid),
}

impl Into<Uuid> for NoteId {
  fn into(self) -> Uuid {
    match self {
      NoteId::Nid(uuid) => uuid,
    }
  }
}

impl From<Uuid> for NoteId {
  fn from(a: Uuid) -> Self {
    NoteId::Nid(a)
  }
}

impl Display for NoteId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      NoteId::Nid(uuid) => write!(f, "{}", uuid),
    }
  }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
  Short,
  Medium,
  Long,
}

impl SummaryLength {
  pub fn as_str(&self) -> &'static str {
    match self {
      SummaryLength::Short => "short",
      SummaryLength::Medium => "medium",
      SummaryLength::Long => "long",
    }
  }

  pub fn from_str(s: &str) -> Option<SummaryLength> {
    match s {
      "short" => Some(SummaryLength::Short),
      "medium" => Some(SummaryLength::Medium),
      "long" => Some(SummaryLength::Long),
      _ => None,
    }
  }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SummaryTone {
  Academic,
  Casual,
  Professional,
}

impl SummaryTone {
  pub fn as_str(&self) -> &'static str {
    match self {
      SummaryTone::Academic => "academic",
      SummaryTone::Casual => "casual",
      SummaryTone::Professional => "professional",
    }
  }

  pub fn from_str(s: &str) -> Option<SummaryTone> {
    match s {
      "academic" => Some(SummaryTone::Academic),
      "casual" => Some(SummaryTone::Casual),
      "professional" => Some(SummaryTone::Professional),
      _ => None,
    }
  }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Note {
  pub id: NoteId,
  pub user: i64,
  pub title: String,
  pub content: String,
  pub summary: Option<String>,
  pub keywords: Vec<String>,
  pub length: SummaryLength,
  pub tone: SummaryTone,
  pub bullet_points: bool,
  pub folder: Option<Uuid>,
  pub createdate: i64,
  pub changeddate: i64,
}

// abbreviated note record for list pages; enough for the search filter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ListNote {
  pub id: NoteId,
  pub title: String,
  pub summary: Option<String>,
  pub keywords: Vec<String>,
  pub folder: Option<Uuid>,
  pub createdate: i64,
  pub changeddate: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SaveNote {
  pub id: Option<NoteId>,
  pub title: String,
  pub content: String,
  pub summary: Option<String>,
  pub keywords: Vec<String>,
  pub length: SummaryLength,
  pub tone: SummaryTone,
  pub bullet_points: bool,
  pub folder: Option<Uuid>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SavedNote {
  pub id: NoteId,
  pub changeddate: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GetNoteList {
  pub limit: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NoteSearch {
  pub query: String,
  pub limit: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Folder {
  pub id: Uuid,
  pub name: String,
  pub color: String,
  pub createdate: i64,
  pub changeddate: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SaveFolder {
  pub id: Option<Uuid>,
  pub name: String,
  pub color: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tag {
  pub id: Uuid,
  pub name: String,
  pub color: String,
  pub createdate: i64,
  pub changeddate: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SaveTag {
  pub id: Option<Uuid>,
  pub name: String,
  pub color: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SetNoteTags {
  pub note: NoteId,
  pub tags: Vec<Uuid>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Profile {
  pub userid: i64,
  pub email: String,
  pub name: String,
  pub avatar: Option<String>,
  pub createdate: i64,
  pub changeddate: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SaveProfile {
  pub name: String,
  pub avatar: Option<String>,
}
