//! Wildberries Token entities
//!
//! `WbToken` is the current-state row of a token aggregate; it points at the
//! latest `WbTokenEvent`. Event rows form the token's history and are kept
//! when the root is removed.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DomainError;

/// Kind of modification recorded on an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifyAction {
    New,
    Update,
    Delete,
}

impl ModifyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModifyAction::New => "new",
            ModifyAction::Update => "update",
            ModifyAction::Delete => "delete",
        }
    }
}

impl std::str::FromStr for ModifyAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(ModifyAction::New),
            "update" => Ok(ModifyAction::Update),
            "delete" => Ok(ModifyAction::Delete),
            other => Err(DomainError::UnknownModifyAction(other.to_string())),
        }
    }
}

impl fmt::Display for ModifyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =========================================================================
// WbToken (aggregate root)
// =========================================================================

/// Aggregate root row of a Wildberries API token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WbToken {
    id: Uuid,
    event: Uuid,
}

impl WbToken {
    pub fn new(id: Uuid, event: Uuid) -> Self {
        Self { id, event }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Id of the latest event
    pub fn event(&self) -> Uuid {
        self.event
    }
}

// =========================================================================
// WbTokenEvent
// =========================================================================

/// Event row of a Wildberries API token
#[derive(Clone, PartialEq, Eq)]
pub struct WbTokenEvent {
    id: Uuid,
    main: Uuid,
    profile: Uuid,
    token: String,
    active: bool,
    modify: ModifyAction,
    modified_by: Option<Uuid>,
    modified_at: DateTime<Utc>,
}

impl WbTokenEvent {
    /// Create the first event of a token
    pub fn new(id: Uuid, main: Uuid, profile: Uuid, token: String) -> Self {
        Self {
            id,
            main,
            profile,
            token,
            active: true,
            modify: ModifyAction::New,
            modified_by: Some(profile),
            modified_at: Utc::now(),
        }
    }

    /// Rebuild an event from stored columns
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        main: Uuid,
        profile: Uuid,
        token: String,
        active: bool,
        modify: ModifyAction,
        modified_by: Option<Uuid>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            main,
            profile,
            token,
            active,
            modify,
            modified_by,
            modified_at,
        }
    }

    /// Record a delete issued by `profile`
    pub fn apply_delete(&mut self, profile: Uuid) {
        self.active = false;
        self.modify = ModifyAction::Delete;
        self.modified_by = Some(profile);
        self.modified_at = Utc::now();
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Id of the owning token
    pub fn main(&self) -> Uuid {
        self.main
    }

    pub fn profile(&self) -> Uuid {
        self.profile
    }

    /// The marketplace credential
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn modify(&self) -> ModifyAction {
        self.modify
    }

    pub fn modified_by(&self) -> Option<Uuid> {
        self.modified_by
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}

// Keeps the credential out of logs
impl fmt::Debug for WbTokenEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WbTokenEvent")
            .field("id", &self.id)
            .field("main", &self.main)
            .field("profile", &self.profile)
            .field("token", &"***")
            .field("active", &self.active)
            .field("modify", &self.modify)
            .field("modified_by", &self.modified_by)
            .field("modified_at", &self.modified_at)
            .finish()
    }
}
