use planboard_types::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How `begin` behaves while a different row is already active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditPolicy {
    /// Silently discard the prior draft
    #[default]
    Replace,
    /// Refuse with `EditError::AlreadyEditing`
    Reject,
}

/// Error types for edit-session transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// `begin` under `EditPolicy::Reject` while a different row is active
    AlreadyEditing { active: String },
    /// A draft mutation addressed a row that is not the active one
    NotEditing { requested: String },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::AlreadyEditing { active } => {
                write!(f, "row {} is already being edited", active)
            }
            EditError::NotEditing { requested } => {
                write!(f, "row {} is not the active edit", requested)
            }
        }
    }
}

impl std::error::Error for EditError {}

#[derive(Debug, Clone)]
enum EditState<R: Record> {
    Idle,
    Editing { id: R::Id, draft: R::Fields },
}

/// The single in-progress row edit for one table.
///
/// At most one draft exists at a time, enforced structurally: the
/// session owns one state value, and every transition replaces it
/// whole. The draft is a deep copy of the record's mutable fields
/// taken at `begin`; the cache is never mutated through it.
#[derive(Debug, Clone)]
pub struct RowEditSession<R: Record> {
    policy: EditPolicy,
    state: EditState<R>,
}

impl<R: Record> Default for RowEditSession<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RowEditSession<R> {
    pub fn new() -> Self {
        Self::with_policy(EditPolicy::default())
    }

    pub fn with_policy(policy: EditPolicy) -> Self {
        Self {
            policy,
            state: EditState::Idle,
        }
    }

    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    /// Start editing `record`, seeding the draft from its current
    /// fields. Re-beginning the active row always reseeds the draft;
    /// beginning a different row while one is active follows the
    /// session policy.
    pub fn begin(&mut self, record: &R) -> Result<(), EditError> {
        if let EditState::Editing { id, .. } = &self.state {
            if self.policy == EditPolicy::Reject && *id != record.id() {
                return Err(EditError::AlreadyEditing {
                    active: id.to_string(),
                });
            }
        }
        self.state = EditState::Editing {
            id: record.id(),
            draft: record.fields(),
        };
        Ok(())
    }

    /// Apply one field mutation to the active draft. The id must match
    /// the active row.
    pub fn edit(&mut self, id: R::Id, mutate: impl FnOnce(&mut R::Fields)) -> Result<(), EditError> {
        match &mut self.state {
            EditState::Editing { id: active, draft } if *active == id => {
                mutate(draft);
                Ok(())
            }
            _ => Err(EditError::NotEditing {
                requested: id.to_string(),
            }),
        }
    }

    /// Discard the draft. Returns the id of the abandoned row, if any.
    pub fn cancel(&mut self) -> Option<R::Id> {
        match std::mem::replace(&mut self.state, EditState::Idle) {
            EditState::Editing { id, .. } => Some(id),
            EditState::Idle => None,
        }
    }

    /// Retire the draft after a confirmed save, returning it for
    /// inspection. A non-matching id is a stale completion and leaves
    /// the session untouched.
    pub fn complete(&mut self, id: R::Id) -> Option<R::Fields> {
        if !self.is_editing(id) {
            return None;
        }
        match std::mem::replace(&mut self.state, EditState::Idle) {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Idle => None,
        }
    }

    pub fn active(&self) -> Option<R::Id> {
        match &self.state {
            EditState::Editing { id, .. } => Some(*id),
            EditState::Idle => None,
        }
    }

    pub fn is_editing(&self, id: R::Id) -> bool {
        self.active() == Some(id)
    }

    pub fn draft(&self) -> Option<&R::Fields> {
        match &self.state {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Idle => None,
        }
    }

    /// The draft, if `id` is the active row.
    pub fn draft_for(&self, id: R::Id) -> Option<&R::Fields> {
        match &self.state {
            EditState::Editing { id: active, draft } if *active == id => Some(draft),
            _ => None,
        }
    }
}
