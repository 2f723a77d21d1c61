use super::FullSkillId;
use crate::client::{Request, RequestData};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Dir,
}

/// One node of a repository file tree as returned by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub size: Option<u64>,
    pub children: Option<Vec<FileNode>>,
}

/// Depth-first search for the first file with the given name (case-sensitive).
pub fn find_file<'a>(root: &'a FileNode, name: &str) -> Option<&'a FileNode> {
    find_by(root, &|node| {
        node.kind == FileKind::File && node.name == name
    })
}

/// Depth-first search ignoring ASCII case, for trees where `SKILL.md` may be
/// spelled `skill.md`.
pub fn find_file_ignore_case<'a>(root: &'a FileNode, name: &str) -> Option<&'a FileNode> {
    find_by(root, &|node| {
        node.kind == FileKind::File && node.name.eq_ignore_ascii_case(name)
    })
}

fn find_by<'a>(node: &'a FileNode, matches: &dyn Fn(&FileNode) -> bool) -> Option<&'a FileNode> {
    if matches(node) {
        return Some(node);
    }
    for child in node.children.as_deref().unwrap_or_default() {
        if let Some(found) = find_by(child, matches) {
            return Some(found);
        }
    }
    None
}

/// Path of `node` relative to `root`, usable as the lookup key for the
/// file-content endpoint. Falls back to the node's own path when it is not
/// under the root.
pub fn relative_path<'a>(node: &'a FileNode, root: &FileNode) -> &'a str {
    node.path
        .strip_prefix(&root.path)
        .map(|rest| rest.trim_start_matches('/'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(&node.path)
}

// Requests

#[derive(Debug, Clone)]
pub struct GetFileTree {
    full_id: FullSkillId,
}

impl GetFileTree {
    pub fn new(full_id: FullSkillId) -> Self {
        Self { full_id }
    }
}

impl Request for GetFileTree {
    type Data = ();
    type Response = FileTreeResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/skills/{}/files", self.full_id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileContentQuery {
    path: String,
}

#[derive(Debug, Clone)]
pub struct GetFileContent {
    full_id: FullSkillId,
    query: FileContentQuery,
}

impl GetFileContent {
    pub fn new(full_id: FullSkillId, path: impl Into<String>) -> Self {
        Self {
            full_id,
            query: FileContentQuery { path: path.into() },
        }
    }
}

impl Request for GetFileContent {
    type Data = FileContentQuery;
    type Response = FileContentResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/skills/{}/file", self.full_id).into()
    }

    fn data(&self) -> RequestData<&FileContentQuery> {
        RequestData::Query(&self.query)
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTreeResponse {
    pub success: bool,
    pub data: FileNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContentResponse {
    pub success: bool,
    pub path: String,
    pub content: String,
    pub is_binary: bool,
}
