use arbtrans::codec::has_resource_extension;
use std::path::Path;
use unic_langid::LanguageIdentifier;

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate that a file is an existing `.arb` resource
pub fn validate_resource_file(path: &str) -> Result<(), String> {
    validate_file_path(path)?;
    if !has_resource_extension(path) {
        return Err(format!(
            "Can't upload files of this type: {}. Only .arb files are allowed",
            path
        ));
    }
    Ok(())
}

/// Validate every input of a translation job
pub fn validate_inputs(inputs: &[String]) -> Result<(), String> {
    if inputs.is_empty() {
        return Err("Please, provide at least one .arb file".to_string());
    }
    inputs.iter().try_for_each(|input| validate_resource_file(input))
}

/// Validate language code format using unic-langid (same as lib crate)
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    if lang.eq_ignore_ascii_case("auto") {
        return Err("`auto` can only be used as a source language".to_string());
    }

    match lang.parse::<LanguageIdentifier>() {
        Ok(_) => Ok(()),
        Err(_) => Err(format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )),
    }
}
