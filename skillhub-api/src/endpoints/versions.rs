use crate::client::{Method, Request, RequestData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillVersion {
    pub id: String,
    pub skill_id: String,
    pub version: String,
    pub instructions: String,
    pub is_draft: bool,
    pub is_latest: bool,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

// Requests

#[derive(Debug, Clone)]
pub struct ListVersions {
    skill_id: String,
}

impl ListVersions {
    pub fn new(skill_id: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
        }
    }
}

impl Request for ListVersions {
    type Data = ();
    type Response = VersionListResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/skills/{}/versions", self.skill_id).into()
    }
}

#[derive(Debug, Clone)]
pub struct GetVersion {
    skill_id: String,
    version: String,
}

impl GetVersion {
    pub fn new(skill_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
            version: version.into(),
        }
    }
}

impl Request for GetVersion {
    type Data = ();
    type Response = VersionResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/skills/{}/versions/{}", self.skill_id, self.version).into()
    }
}

#[derive(Debug, Clone)]
pub struct GetDraft {
    skill_id: String,
}

impl GetDraft {
    pub fn new(skill_id: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
        }
    }
}

impl Request for GetDraft {
    type Data = ();
    type Response = VersionResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/skills/{}/draft", self.skill_id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DraftUpdate {
    pub instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone)]
pub struct UpdateDraft {
    skill_id: String,
    draft: DraftUpdate,
}

impl UpdateDraft {
    pub fn new(skill_id: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
            draft: DraftUpdate {
                instructions: instructions.into(),
                metadata: None,
            },
        }
    }

    pub fn metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.draft.metadata = Some(metadata);
        self
    }
}

impl Request for UpdateDraft {
    type Data = DraftUpdate;
    type Response = VersionResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/skills/{}/draft", self.skill_id).into()
    }

    fn method(&self) -> Method {
        Method::PUT
    }

    fn data(&self) -> RequestData<&DraftUpdate> {
        RequestData::Json(&self.draft)
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct PublishRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PublishVersion {
    skill_id: String,
    publish: PublishRequest,
}

impl PublishVersion {
    pub fn new(skill_id: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
            publish: PublishRequest::default(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.publish.version = Some(version.into());
        self
    }

    pub fn changelog(mut self, changelog: impl Into<String>) -> Self {
        self.publish.changelog = Some(changelog.into());
        self
    }
}

impl Request for PublishVersion {
    type Data = PublishRequest;
    type Response = VersionResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/skills/{}/publish", self.skill_id).into()
    }

    fn method(&self) -> Method {
        Method::POST
    }

    fn data(&self) -> RequestData<&PublishRequest> {
        RequestData::Json(&self.publish)
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    pub success: bool,
    pub data: SkillVersion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionListResponse {
    pub success: bool,
    pub data: Vec<SkillVersion>,
}
