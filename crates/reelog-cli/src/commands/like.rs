use color_eyre::Result;

use crate::output::{Output, OutputFormat};

pub async fn run_like(id: String, output: &Output) -> Result<()> {
    let (_config, repository) = super::open_catalog(output)?;

    let review = repository.like(&id)?;

    match output.format() {
        OutputFormat::Human => {
            output.success(&format!(
                "'{}' now has {} like{}",
                review.title,
                review.likes,
                if review.likes == 1 { "" } else { "s" }
            ));
        }
        _ => output.json(&serde_json::to_value(&review)?),
    }

    Ok(())
}
