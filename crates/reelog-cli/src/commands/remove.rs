use color_eyre::Result;

use super::prompts;
use crate::output::{Output, OutputFormat};

pub async fn run_remove(id: String, yes: bool, output: &Output) -> Result<()> {
    let (_config, repository) = super::open_catalog(output)?;

    let review = match repository.get_by_id(&id) {
        Ok(review) => review,
        Err(e) if e.is_not_found() => {
            output.warn(&format!("No review with id '{}'", id));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if !yes {
        let confirmed = prompts::prompt_yes_no(
            &format!("Remove the review for '{}'?", review.title),
            Some(false),
        )?;
        if !confirmed {
            output.info("Keeping it.");
            return Ok(());
        }
    }

    if repository.delete(&id)? {
        match output.format() {
            OutputFormat::Human => {
                output.success(&format!("Removed review for '{}'", review.title));
            }
            _ => output.json(&serde_json::json!({
                "removed": true,
                "id": id,
                "title": review.title,
            })),
        }
    } else {
        // The review vanished between the lookup and the delete.
        output.warn(&format!("No review with id '{}'", id));
    }

    Ok(())
}
