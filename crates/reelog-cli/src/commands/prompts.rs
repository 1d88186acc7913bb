use crate::output::Output;
use color_eyre::Result;
use dialoguer::{Confirm, Input, Password, Select};
use review_catalog_models::MediaKind;

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a password (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read password: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Prompt for a movie/series choice
pub fn prompt_media_kind() -> Result<MediaKind> {
    let kinds = [MediaKind::Movie, MediaKind::Series];
    let labels = ["movie", "series"];

    let index = Select::new()
        .with_prompt("Kind")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))?;

    Ok(kinds[index])
}

/// Prompt for a rating, retrying until it parses and falls in range
pub fn prompt_rating(output: &Output) -> Result<f32> {
    loop {
        let input_str = Input::<String>::new()
            .with_prompt("Rating (1-5)")
            .interact()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))?;

        match input_str.trim().parse::<f32>() {
            Ok(rating) if (1.0..=5.0).contains(&rating) => return Ok(rating),
            _ => {
                output.error("Invalid rating. Please enter a number from 1 to 5.");
                continue;
            }
        }
    }
}
