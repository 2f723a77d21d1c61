use super::PaginationMeta;
use crate::client::{Request, RequestData};
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListTags {
    page: u32,
    limit: u32,
}

impl ListTags {
    pub fn new() -> Self {
        Self {
            page: 1,
            limit: 100,
        }
    }

    setter!(page: u32);
    setter!(limit: u32);
}

impl Default for ListTags {
    fn default() -> Self {
        Self::new()
    }
}

impl Request for ListTags {
    type Data = Self;
    type Response = TagListResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/tags".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagListResponse {
    pub success: bool,
    pub data: Vec<Tag>,
    pub pagination: Option<PaginationMeta>,
}
