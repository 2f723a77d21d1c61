use super::PaginationMeta;
use crate::client::{Request, RequestData};
use crate::macros::setter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub slug: String,
    pub name: String,
    pub url: Option<String>,
    pub avatar_url: Option<String>,
    pub skill_count: u64,
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListAuthors {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

impl ListAuthors {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt page: u32);
    setter!(opt limit: u32);
}

impl Request for ListAuthors {
    type Data = Self;
    type Response = AuthorListResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/authors".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone)]
pub struct GetAuthor {
    slug: String,
}

impl GetAuthor {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}

impl Request for GetAuthor {
    type Data = ();
    type Response = AuthorResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/authors/{}", self.slug).into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub success: bool,
    pub data: Author,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorListResponse {
    pub success: bool,
    pub data: Vec<Author>,
    pub pagination: PaginationMeta,
}
