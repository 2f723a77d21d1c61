use anyhow::Result;
use skillhub_api::endpoints::FullSkillId;
use skillhub_api::endpoints::files::{FileKind, FileNode};
use skillhub_api::{Client, Request};

pub async fn run(client: &Client, skill: &str, path: Option<String>) -> Result<()> {
    let full_id: FullSkillId = skill.parse()?;

    match path {
        Some(path) => {
            let response = client
                .send(Request::files().content(full_id, path))
                .await?;
            if response.is_binary {
                println!("{} is a binary file", response.path);
            } else {
                print!("{}", response.content);
            }
        }
        None => {
            let tree = client.send(Request::files().tree(full_id)).await?;
            print_tree(&tree.data, 0);
        }
    }
    Ok(())
}

fn print_tree(node: &FileNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node.kind {
        FileKind::Dir => println!("{}{}/", indent, node.name),
        FileKind::File => match node.size {
            Some(size) => println!("{}{} ({} bytes)", indent, node.name, size),
            None => println!("{}{}", indent, node.name),
        },
    }
    for child in node.children.as_deref().unwrap_or_default() {
        print_tree(child, depth + 1);
    }
}
