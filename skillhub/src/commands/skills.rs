use crate::cli::SkillsCommand;
use anyhow::{Result, bail};
use skillhub_api::endpoints::FullSkillId;
use skillhub_api::endpoints::skills::{Skill, SkillListResponse};
use skillhub_api::{Client, Request};
use skillhub_auth::AuthSession;

pub async fn run(client: &Client, session: &AuthSession, command: SkillsCommand) -> Result<()> {
    match command {
        SkillsCommand::List { page, category } => {
            let mut request = Request::skills().list();
            if let Some(page) = page {
                request = request.page(page);
            }
            if let Some(category) = category {
                request = request.category(category);
            }
            print_listing(client.send(request).await?);
        }
        SkillsCommand::Search { query } => {
            print_listing(client.send(Request::skills().search(query)).await?);
        }
        SkillsCommand::Featured => {
            print_listing(client.send(Request::skills().featured()).await?);
        }
        SkillsCommand::Mine => {
            if !session.state().await.is_authenticated {
                bail!("Not signed in. Run `skillhub login` first.");
            }
            print_listing(client.send(Request::skills().mine()).await?);
        }
        SkillsCommand::Show { skill } => {
            let full_id: FullSkillId = skill.parse()?;
            let response = client.send(Request::skills().get(full_id)).await?;
            print_skill(&response.data.skill);
            if let Some(version) = response.data.latest_version {
                println!("latest version: {}", version.version);
            }
        }
    }
    Ok(())
}

fn print_listing(response: SkillListResponse) {
    if response.data.is_empty() {
        println!("No skills found");
        return;
    }
    for skill in &response.data {
        println!(
            "{:<40} {:>6}★ {:>8}↓  {}",
            skill.full_id.to_string(),
            skill.star_count,
            skill.download_count,
            skill.name
        );
    }
    let pagination = &response.pagination;
    if pagination.total_pages > 1 {
        println!(
            "\npage {} of {} ({} skills)",
            pagination.page, pagination.total_pages, pagination.total_items
        );
    }
}

fn print_skill(skill: &Skill) {
    println!("{} ({})", skill.name, skill.full_id);
    println!("{}", skill.description);
    if let Some(author) = &skill.author_name {
        println!("author: {}", author);
    }
    if let Some(category) = &skill.category_name {
        println!("category: {}", category);
    }
    if let Some(tags) = &skill.tags {
        if !tags.is_empty() {
            println!("tags: {}", tags.join(", "));
        }
    }
    if let Some(license) = &skill.license {
        println!("license: {}", license);
    }
    println!("stars: {}  downloads: {}", skill.star_count, skill.download_count);
}
