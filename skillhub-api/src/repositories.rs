use crate::endpoints::{
    FullSkillId,
    authors::{GetAuthor, ListAuthors},
    categories::ListCategories,
    files::{GetFileContent, GetFileTree},
    import::{GetImportJob, SubmitImport},
    skills::{
        CreateSkill, FeaturedSkills, GetSkill, ListMySkills, ListSkills, NewSkill, SearchSkills,
        UpdateSkill,
    },
    tags::ListTags,
    versions::{GetDraft, GetVersion, ListVersions, PublishVersion, UpdateDraft},
};

pub struct SkillRepository;

impl SkillRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListSkills {
        ListSkills::new()
    }

    pub fn mine(&self) -> ListMySkills {
        ListMySkills::new()
    }

    pub fn search(&self, query: impl Into<String>) -> SearchSkills {
        SearchSkills::new(query)
    }

    pub fn featured(&self) -> FeaturedSkills {
        FeaturedSkills::new()
    }

    pub fn get(&self, full_id: FullSkillId) -> GetSkill {
        GetSkill::new(full_id)
    }

    pub fn create(&self, skill: NewSkill) -> CreateSkill {
        CreateSkill::new(skill)
    }

    pub fn update(&self, skill_id: impl Into<String>) -> UpdateSkill {
        UpdateSkill::new(skill_id)
    }

    pub fn versions(&self, skill_id: impl Into<String>) -> VersionRepository {
        VersionRepository::new(skill_id)
    }
}

pub struct VersionRepository {
    skill_id: String,
}

impl VersionRepository {
    pub fn new(skill_id: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
        }
    }

    pub fn list(&self) -> ListVersions {
        ListVersions::new(self.skill_id.clone())
    }

    pub fn get(&self, version: impl Into<String>) -> GetVersion {
        GetVersion::new(self.skill_id.clone(), version)
    }

    pub fn draft(&self) -> GetDraft {
        GetDraft::new(self.skill_id.clone())
    }

    pub fn update_draft(&self, instructions: impl Into<String>) -> UpdateDraft {
        UpdateDraft::new(self.skill_id.clone(), instructions)
    }

    pub fn publish(&self) -> PublishVersion {
        PublishVersion::new(self.skill_id.clone())
    }
}

pub struct CategoryRepository;

impl CategoryRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListCategories {
        ListCategories::new()
    }
}

pub struct TagRepository;

impl TagRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListTags {
        ListTags::new()
    }
}

pub struct AuthorRepository;

impl AuthorRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListAuthors {
        ListAuthors::new()
    }

    pub fn get(&self, slug: impl Into<String>) -> GetAuthor {
        GetAuthor::new(slug)
    }
}

pub struct ImportRepository;

impl ImportRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn submit(&self, path: impl Into<String>) -> SubmitImport {
        SubmitImport::new(path)
    }

    pub fn job(&self, job_id: impl Into<String>) -> GetImportJob {
        GetImportJob::new(job_id)
    }
}

pub struct FileRepository;

impl FileRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn tree(&self, full_id: FullSkillId) -> GetFileTree {
        GetFileTree::new(full_id)
    }

    pub fn content(&self, full_id: FullSkillId, path: impl Into<String>) -> GetFileContent {
        GetFileContent::new(full_id, path)
    }
}
