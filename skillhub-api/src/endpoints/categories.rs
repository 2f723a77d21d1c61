use crate::client::Request;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub skill_count: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Default, Debug, Clone)]
pub struct ListCategories;

impl ListCategories {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListCategories {
    type Data = ();
    type Response = CategoryListResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/categories".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub success: bool,
    pub data: Vec<Category>,
}
