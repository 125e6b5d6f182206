use crate::api::types::Comment;
use crate::api::JiraClient;
use crate::error::Result;
use crate::output::{short_time, truncate, View};

const BODY_WIDTH: usize = 80;

fn row(comment: &Comment) -> Vec<String> {
    vec![
        comment.id.clone(),
        comment.author_name().to_string(),
        short_time(&comment.created),
        truncate(&comment.body_text().replace('\n', " "), BODY_WIDTH),
    ]
}

pub async fn list(client: &JiraClient, view: &mut View, key: &str) -> Result<()> {
    let comments = client.list_comments(key).await?;
    if comments.is_empty() {
        view.info(&format!("No comments on {key}"))?;
        return Ok(());
    }
    let rows = comments.iter().map(row).collect();
    view.render(&["ID", "AUTHOR", "CREATED", "BODY"], rows, &comments)?;
    Ok(())
}

pub async fn add(client: &JiraClient, view: &mut View, key: &str, text: &str) -> Result<()> {
    let comment = client.add_comment(key, text).await?;
    view.success(&format!("Added comment {} to {key}", comment.id))?;
    Ok(())
}

pub async fn delete(client: &JiraClient, view: &mut View, key: &str, id: &str) -> Result<()> {
    client.delete_comment(key, id).await?;
    view.success(&format!("Deleted comment {id} from {key}"))?;
    Ok(())
}
