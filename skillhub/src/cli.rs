use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "skillhub", about = "Browse and publish skills from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in through the browser
    Login {
        /// Create a new account instead of signing in
        #[arg(long)]
        signup: bool,
    },
    /// Sign out and revoke the current session
    Logout,
    /// Show the currently signed-in user
    Whoami,
    /// Browse the skill catalog
    #[command(subcommand)]
    Skills(SkillsCommand),
    /// Inspect a skill's file tree
    Files {
        /// Skill identifier as owner/slug
        skill: String,
        /// Print this file's content instead of the tree
        #[arg(long)]
        path: Option<String>,
    },
    /// Import skills from a git repository
    Import {
        /// Repository URL to import from
        url: String,
        /// Keep the imported skills private
        #[arg(long)]
        private: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum SkillsCommand {
    /// List published skills
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Search skills by name and description
    Search { query: String },
    /// List featured skills
    Featured,
    /// List your own skills, drafts included
    Mine,
    /// Show one skill with its latest version
    Show {
        /// Skill identifier as owner/slug
        skill: String,
    },
}
