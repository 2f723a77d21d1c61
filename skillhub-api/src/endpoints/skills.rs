use super::versions::SkillVersion;
use super::{FullSkillId, PaginationMeta, SkillStatus};
use crate::client::{Method, Request, RequestData};
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub owner_id: String,
    pub slug: String,
    pub full_id: FullSkillId,
    pub name: String,
    pub description: String,
    pub license: Option<String>,
    pub source_url: Option<String>,
    pub category_slug: Option<String>,
    pub category_name: Option<String>,
    pub status: SkillStatus,
    pub download_count: u64,
    pub star_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub author_name: Option<String>,
    pub author_slug: Option<String>,
    pub author_avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillWithVersion {
    #[serde(flatten)]
    pub skill: Skill,
    pub latest_version: Option<SkillVersion>,
}

/// Payload for creating a skill through the submission form.
#[derive(Debug, Clone, Serialize)]
pub struct NewSkill {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListSkills {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<SkillStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

impl ListSkills {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt page: u32);
    setter!(opt limit: u32);
    setter!(opt status: SkillStatus);
    setter!(opt category: String);
}

impl Request for ListSkills {
    type Data = Self;
    type Response = SkillListResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/skills".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

/// Skills owned by the signed-in user, filtered server-side.
#[derive(Default, Debug, Clone, Serialize)]
pub struct ListMySkills {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

impl ListMySkills {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt page: u32);
    setter!(opt limit: u32);
}

impl Request for ListMySkills {
    type Data = Self;
    type Response = SkillListResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/me/skills".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchSkills {
    q: String,
    page: u32,
    limit: u32,
}

impl SearchSkills {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            q: query.into(),
            page: 1,
            limit: 20,
        }
    }

    setter!(page: u32);
    setter!(limit: u32);
}

impl Request for SearchSkills {
    type Data = Self;
    type Response = SkillListResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/skills/search".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

#[derive(Default, Debug, Clone)]
pub struct FeaturedSkills;

impl FeaturedSkills {
    pub fn new() -> Self {
        Self
    }
}

impl Request for FeaturedSkills {
    type Data = ();
    type Response = SkillListResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/skills/featured".into()
    }
}

#[derive(Debug, Clone)]
pub struct GetSkill {
    full_id: FullSkillId,
}

impl GetSkill {
    pub fn new(full_id: FullSkillId) -> Self {
        Self { full_id }
    }
}

impl Request for GetSkill {
    type Data = ();
    type Response = SkillWithVersionResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/skills/{}", self.full_id).into()
    }
}

#[derive(Debug, Clone)]
pub struct CreateSkill {
    skill: NewSkill,
}

impl CreateSkill {
    pub fn new(skill: NewSkill) -> Self {
        Self { skill }
    }
}

impl Request for CreateSkill {
    type Data = NewSkill;
    type Response = CreateSkillResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/skills".into()
    }

    fn method(&self) -> Method {
        Method::POST
    }

    fn data(&self) -> RequestData<&NewSkill> {
        RequestData::Json(&self.skill)
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct SkillUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct UpdateSkill {
    skill_id: String,
    update: SkillUpdate,
}

impl UpdateSkill {
    pub fn new(skill_id: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
            update: SkillUpdate::default(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.update.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.update.description = Some(description.into());
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.update.tags = Some(tags);
        self
    }
}

impl Request for UpdateSkill {
    type Data = SkillUpdate;
    type Response = SkillResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/skills/{}", self.skill_id).into()
    }

    fn method(&self) -> Method {
        Method::PUT
    }

    fn data(&self) -> RequestData<&SkillUpdate> {
        RequestData::Json(&self.update)
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillListResponse {
    pub success: bool,
    pub data: Vec<Skill>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillResponse {
    pub success: bool,
    pub data: Skill,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillWithVersionResponse {
    pub success: bool,
    pub data: SkillWithVersion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSkillResponse {
    pub success: bool,
    pub data: SkillWithVersion,
}
