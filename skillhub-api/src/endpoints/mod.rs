pub mod authors;
pub mod categories;
pub mod files;
pub mod import;
pub mod skills;
pub mod tags;
pub mod versions;

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Fully-qualified skill identifier in `owner/slug` form, e.g.
/// `anthropic/web-research`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FullSkillId {
    owner: String,
    slug: String,
}

impl FullSkillId {
    pub fn new(owner: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            slug: slug.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl Display for FullSkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.slug)
    }
}

impl FromStr for FullSkillId {
    type Err = FullSkillIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, slug)) if !owner.is_empty() && !slug.is_empty() && !slug.contains('/') => {
                Ok(Self::new(owner, slug))
            }
            _ => Err(FullSkillIdParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullSkillIdParseError(String);

impl Display for FullSkillIdParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid skill ID '{}': expected owner/slug", self.0)
    }
}

impl std::error::Error for FullSkillIdParseError {}

impl Serialize for FullSkillId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FullSkillId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Publication state of a skill in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillStatus {
    Draft,
    Pending,
    Approved,
    Featured,
    Archived,
}

impl Display for SkillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SkillStatus::Draft => "draft",
            SkillStatus::Pending => "pending",
            SkillStatus::Approved => "approved",
            SkillStatus::Featured => "featured",
            SkillStatus::Archived => "archived",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_skill_id_round_trips() {
        let id: FullSkillId = "anthropic/web-research".parse().unwrap();
        assert_eq!(id.owner(), "anthropic");
        assert_eq!(id.slug(), "web-research");
        assert_eq!(id.to_string(), "anthropic/web-research");
    }

    #[test]
    fn full_skill_id_rejects_malformed_input() {
        assert!("no-slash".parse::<FullSkillId>().is_err());
        assert!("/slug".parse::<FullSkillId>().is_err());
        assert!("owner/".parse::<FullSkillId>().is_err());
        assert!("a/b/c".parse::<FullSkillId>().is_err());
    }

    #[test]
    fn full_skill_id_serializes_as_string() {
        let id = FullSkillId::new("owner", "slug");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""owner/slug""#);
        let back: FullSkillId = serde_json::from_str(r#""owner/slug""#).unwrap();
        assert_eq!(back, id);
    }
}
