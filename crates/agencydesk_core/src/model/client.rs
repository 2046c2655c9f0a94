//! Client pipeline records.
//!
//! # Invariants
//! - `status` is the only field that decides the pipeline column.
//! - New clients default to `ClientStatus::Prospect` when no status is given.

use crate::model::entity::{Entity, EntityId, EntityKind, Grouped, Transition};
use serde::{Deserialize, Serialize};

/// Pipeline stage of a client relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientStatus {
    /// First contact; not yet negotiating.
    #[default]
    Prospect,
    /// Proposal or contract under discussion.
    Negotiation,
    /// Signed and currently served.
    Active,
    /// Paused or churned.
    Inactive,
}

impl ClientStatus {
    /// Every status in board order.
    pub const ALL: [ClientStatus; 4] = [
        ClientStatus::Prospect,
        ClientStatus::Negotiation,
        ClientStatus::Active,
        ClientStatus::Inactive,
    ];

    /// Wire value (`PROSPECT`, `ACTIVE`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prospect => "PROSPECT",
            Self::Negotiation => "NEGOTIATION",
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }

    /// Column title.
    pub fn label(self) -> &'static str {
        match self {
            Self::Prospect => "Prospects",
            Self::Negotiation => "Negotiation",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    /// Parses a wire value, ignoring surrounding whitespace and case.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
    }
}

/// Client record shown in the pipeline board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: EntityId,
    /// Contact person.
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: Option<String>,
    pub description: String,
    pub status: ClientStatus,
}

/// Creation payload for [`Client`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientDraft {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: Option<String>,
    pub description: String,
    /// `None` falls back to `ClientStatus::default()`.
    pub status: Option<ClientStatus>,
}

impl ClientDraft {
    pub fn new(
        name: impl Into<String>,
        company: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: ClientStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Partial update for [`Client`].
///
/// `phone: Some(None)` clears the stored phone number.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub description: Option<String>,
    pub status: Option<ClientStatus>,
}

impl ClientPatch {
    /// Patch touching only `status`.
    pub fn status(status: ClientStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Entity for Client {
    type Draft = ClientDraft;
    type Patch = ClientPatch;

    const KIND: EntityKind = EntityKind::Client;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: ClientDraft) -> Self {
        Self {
            id,
            name: draft.name,
            company: draft.company,
            email: draft.email,
            phone: draft.phone,
            description: draft.description,
            status: draft.status.unwrap_or_default(),
        }
    }

    fn apply_patch(&mut self, patch: ClientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

impl Grouped for Client {
    type Key = ClientStatus;

    fn group_key(&self) -> ClientStatus {
        self.status
    }
}

impl Transition for Client {
    fn transition_patch(target: ClientStatus) -> ClientPatch {
        ClientPatch::status(target)
    }
}

#[cfg(test)]
mod tests {
    use super::ClientStatus;

    #[test]
    fn parse_accepts_wire_values_case_insensitively() {
        assert_eq!(ClientStatus::parse("ACTIVE"), Some(ClientStatus::Active));
        assert_eq!(ClientStatus::parse(" prospect "), Some(ClientStatus::Prospect));
        assert_eq!(ClientStatus::parse("archived"), None);
    }

    #[test]
    fn default_status_is_first_board_column() {
        assert_eq!(ClientStatus::default(), ClientStatus::ALL[0]);
    }
}
