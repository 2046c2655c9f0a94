//! Field sets for client, agent and group modals.

use super::{is_blank, optional, trimmed, EntityForm};
use crate::model::agent::{
    Agent, AgentDraft, AgentGroup, AgentGroupDraft, AgentGroupPatch, AgentPatch, AgentStatus,
};
use crate::model::client::{Client, ClientDraft, ClientPatch, ClientStatus};
use crate::model::entity::EntityId;
use uuid::Uuid;

/// New/edit client modal.
///
/// Required: `name`, `company`, `email`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientForm {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub description: String,
    pub status: ClientStatus,
}

impl EntityForm for ClientForm {
    type Target = Client;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push("name");
        }
        if is_blank(&self.company) {
            missing.push("company");
        }
        if is_blank(&self.email) {
            missing.push("email");
        }
        missing
    }

    fn to_draft(&self) -> ClientDraft {
        ClientDraft {
            name: trimmed(&self.name),
            company: trimmed(&self.company),
            email: trimmed(&self.email),
            phone: optional(&self.phone),
            description: trimmed(&self.description),
            status: Some(self.status),
        }
    }

    fn to_patch(&self) -> ClientPatch {
        ClientPatch {
            name: Some(trimmed(&self.name)),
            company: Some(trimmed(&self.company)),
            email: Some(trimmed(&self.email)),
            phone: Some(optional(&self.phone)),
            description: Some(trimmed(&self.description)),
            status: Some(self.status),
        }
    }

    fn fill_from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            company: client.company.clone(),
            email: client.email.clone(),
            phone: client.phone.clone().unwrap_or_default(),
            description: client.description.clone(),
            status: client.status,
        }
    }
}

/// New/edit agent modal.
///
/// Required: `name`, `role`, `group_id`. Group existence is checked by the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentForm {
    pub group_id: Option<EntityId>,
    pub name: String,
    pub role: String,
    pub description: String,
    pub status: AgentStatus,
}

impl EntityForm for AgentForm {
    type Target = Agent;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.group_id.is_none() {
            missing.push("group");
        }
        if is_blank(&self.name) {
            missing.push("name");
        }
        if is_blank(&self.role) {
            missing.push("role");
        }
        missing
    }

    /// An unset group maps to the nil id and is listed by `missing_fields`.
    fn to_draft(&self) -> AgentDraft {
        AgentDraft {
            group_id: self.group_id.unwrap_or(Uuid::nil()),
            name: trimmed(&self.name),
            role: trimmed(&self.role),
            description: trimmed(&self.description),
            status: Some(self.status),
        }
    }

    fn to_patch(&self) -> AgentPatch {
        AgentPatch {
            group_id: self.group_id,
            name: Some(trimmed(&self.name)),
            role: Some(trimmed(&self.role)),
            description: Some(trimmed(&self.description)),
            status: Some(self.status),
        }
    }

    fn fill_from(agent: &Agent) -> Self {
        Self {
            group_id: Some(agent.group_id),
            name: agent.name.clone(),
            role: agent.role.clone(),
            description: agent.description.clone(),
            status: agent.status,
        }
    }
}

/// New/edit agent group modal. Required: `name`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupForm {
    pub name: String,
    pub description: String,
}

impl EntityForm for GroupForm {
    type Target = AgentGroup;

    fn missing_fields(&self) -> Vec<&'static str> {
        if is_blank(&self.name) {
            vec!["name"]
        } else {
            Vec::new()
        }
    }

    fn to_draft(&self) -> AgentGroupDraft {
        AgentGroupDraft::new(trimmed(&self.name), trimmed(&self.description))
    }

    fn to_patch(&self) -> AgentGroupPatch {
        AgentGroupPatch {
            name: Some(trimmed(&self.name)),
            description: Some(trimmed(&self.description)),
        }
    }

    fn fill_from(group: &AgentGroup) -> Self {
        Self {
            name: group.name.clone(),
            description: group.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AgentForm, ClientForm};
    use crate::forms::EntityForm;

    #[test]
    fn whitespace_only_counts_as_missing() {
        let form = ClientForm {
            name: "   ".to_string(),
            company: "Acme".to_string(),
            email: "\t".to_string(),
            ..ClientForm::default()
        };
        assert_eq!(form.missing_fields(), vec!["name", "email"]);
    }

    #[test]
    fn agent_form_requires_group() {
        let form = AgentForm {
            name: "Scribe".to_string(),
            role: "Copywriter".to_string(),
            ..AgentForm::default()
        };
        assert_eq!(form.missing_fields(), vec!["group"]);
        assert!(form.to_draft().group_id.is_nil());
    }

    #[test]
    fn blank_phone_becomes_none() {
        let form = ClientForm {
            phone: "  ".to_string(),
            ..ClientForm::default()
        };
        assert_eq!(form.to_draft().phone, None);
    }
}
