use crate::{
  content::{
    Folder, GetNoteList, ListNote, Note, NoteId, NoteSearch, Profile, SaveFolder, SaveNote,
    SaveProfile, SaveTag, SavedNote, SetNoteTags, Tag,
  },
  summary::{SummarizeRequest, Summary},
};
use serde_derive::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub enum PrivateRequest {
  PvqGetNoteList(GetNoteList),
  PvqSearchNotes(NoteSearch),
  PvqGetNote(NoteId),
  PvqSaveNote(SaveNote),
  PvqDeleteNote(NoteId),
  PvqSummarizeNote(SummarizeRequest),
  PvqGetFolders,
  PvqSaveFolder(SaveFolder),
  PvqDeleteFolder(Uuid),
  PvqGetTags,
  PvqSaveTag(SaveTag),
  PvqDeleteTag(Uuid),
  PvqGetNoteTags(NoteId),
  PvqSetNoteTags(SetNoteTags),
  PvqGetProfile,
  PvqSaveProfile(SaveProfile),
}

#[derive(Serialize, Deserialize, Debug)]
pub enum PrivateReply {
  PvyServerError(PrivateError),
  PvyNoteList(Vec<ListNote>),
  PvyNote(Note),
  PvySavedNote(SavedNote),
  PvyDeletedNote(NoteId),
  PvySummary(Summary),
  PvyFolders(Vec<Folder>),
  PvySavedFolder(Folder),
  PvyDeletedFolder(Uuid),
  PvyTags(Vec<Tag>),
  PvySavedTag(Tag),
  PvyDeletedTag(Uuid),
  PvyNoteTags(Vec<Tag>),
  PvyNoteTagsSet(NoteId),
  PvyProfile(Profile),
  PvySavedProfile(Profile),
}

#[derive(Serialize, Deserialize, Debug)]
pub enum PrivateError {
  PveString(String),
  PveNoteNotFound(NoteId),
  PveNotLoggedIn,
  PveLoginError(String),
  PveSummarizeFailed(String),
}
