pub mod auth;
pub mod files;
pub mod import;
pub mod skills;
