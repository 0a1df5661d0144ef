use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One question/answer pair with a point value. `answered_by_player_id` doubles
/// as the "is answered" marker; once set it is never re-judged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub point_value: u32,
    pub category_id: Uuid,
    pub answered_by_player_id: Option<Uuid>,
    /// True only when the clue was closed through the no-answer penalty path,
    /// not a genuine correct answer.
    pub no_one_could_answer: bool,
}

impl Clue {
    pub fn is_answered(&self) -> bool {
        self.answered_by_player_id.is_some()
    }
}

/// Five clues authored and owned by one player. Exists as an unsubmitted
/// draft until it satisfies the submission invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub is_submitted: bool,
    pub player_id: Uuid,
    pub clues: Vec<Clue>,
}

impl Category {
    /// Build a category from authoring input. Re-saving keeps the existing
    /// category id (update); clue ids are reissued since the draft replaces
    /// the clue list wholesale.
    pub fn from_draft(
        player_id: Uuid,
        existing_id: Option<Uuid>,
        draft: CategoryDraft,
        is_submitted: bool,
    ) -> Self {
        let id = existing_id.unwrap_or_else(Uuid::new_v4);
        let clues = draft
            .clues
            .into_iter()
            .map(|clue| Clue {
                id: Uuid::new_v4(),
                question: clue.question,
                answer: clue.answer,
                point_value: clue.point_value,
                category_id: id,
                answered_by_player_id: None,
                no_one_could_answer: false,
            })
            .collect();
        Self {
            id,
            title: draft.title,
            is_submitted,
            player_id,
            clues,
        }
    }
}

/// Unvalidated authoring input for a category; validated by `rules` before it
/// ever reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub title: String,
    pub clues: Vec<ClueDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueDraft {
    pub question: String,
    pub answer: String,
    pub point_value: u32,
}
