//! Lookups against a running API or a menu export.
//!
//! Results are printed to stdout as pretty JSON; logs go to stderr.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use cafeconnect_client::{ApiClient, JsonFileMenuSource, MenuSource};
use cafeconnect_core::MenuSections;

/// Write `value` to `out` as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json(
    out: &mut impl Write,
    value: &impl Serialize,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    write_json(&mut std::io::stdout().lock(), value)
}

/// Print cafes near `college`.
///
/// A blank college prints an empty list without contacting the API.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn search(api_url: &str, college: &str) -> Result<(), Box<dyn std::error::Error>> {
    if college.trim().is_empty() {
        tracing::warn!("Empty college name, nothing to search");
        print_json(&Vec::<()>::new())?;
        return Ok(());
    }

    let client = ApiClient::new(api_url)?;
    let cafes = client.search_cafes(college).await?;
    tracing::info!(matches = cafes.len(), college, "Search complete");

    print_json(&cafes)?;
    Ok(())
}

/// Print the API's menu grouped into sections.
///
/// # Errors
///
/// Returns an error if the API request fails.
pub async fn menu_from_api(api_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::new(api_url)?;
    print_sections(&client).await
}

/// Print a menu export grouped into sections.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn menu_from_file(path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    print_sections(&JsonFileMenuSource::new(path)).await
}

async fn print_sections(source: &impl MenuSource) -> Result<(), Box<dyn std::error::Error>> {
    let items = source.load_menu().await?;
    let sections = MenuSections::group(items);

    for category in sections.unrecognized_categories() {
        tracing::warn!(category, "Category matches no storefront section");
    }

    print_json(&sections)?;
    Ok(())
}
