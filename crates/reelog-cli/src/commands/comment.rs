use color_eyre::Result;
use review_catalog_models::CommentDraft;

use super::prompts;
use crate::output::{Output, OutputFormat};

// Comments are single-user for now; the draft still records an author so
// the stored shape matches what a shared catalog would need.
const LOCAL_USER_ID: &str = "me";
const LOCAL_USER_NAME: &str = "Me";

pub async fn run_comment_add(id: String, text: Option<String>, output: &Output) -> Result<()> {
    let (_config, repository) = super::open_catalog(output)?;

    let content = match text {
        Some(text) => text,
        None => prompts::prompt_string("Comment", None)?,
    };

    let draft = CommentDraft {
        user_id: LOCAL_USER_ID.to_string(),
        user_name: LOCAL_USER_NAME.to_string(),
        user_avatar: None,
        content,
    };
    let review = repository.add_comment(&id, draft)?;

    match output.format() {
        OutputFormat::Human => {
            output.success(&format!(
                "Added comment to '{}' ({} total)",
                review.title,
                review.comments.len()
            ));
            if let Some(comment) = review.comments.last() {
                output.println(&format!("  id: {}", comment.id));
            }
        }
        _ => output.json(&serde_json::to_value(&review)?),
    }

    Ok(())
}

pub async fn run_comment_remove(id: String, comment_id: String, output: &Output) -> Result<()> {
    let (_config, repository) = super::open_catalog(output)?;

    let before = repository.get_by_id(&id)?.comments.len();
    let review = repository.delete_comment(&id, &comment_id)?;

    if review.comments.len() < before {
        match output.format() {
            OutputFormat::Human => {
                output.success(&format!("Removed comment from '{}'", review.title));
            }
            _ => output.json(&serde_json::to_value(&review)?),
        }
    } else {
        output.warn(&format!(
            "No comment with id '{}' on '{}'",
            comment_id, review.title
        ));
    }

    Ok(())
}
