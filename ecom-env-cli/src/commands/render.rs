use std::path::Path;

use colored::Colorize;
use ecom_env::Format;

/// Render the environment and write it to `output`, or stdout when `None`.
///
/// The target's parent directory must already exist.
pub fn run(
    dir: &Path,
    profile: &str,
    format: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format: Format = format.parse()?;
    let env = ecom_env::load_from_dir(dir, profile)?;
    let rendered = ecom_env::render::render(&env, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            tracing::info!(path = %path.display(), ?format, "environment rendered");
            eprintln!("{} Wrote {}", "✓".green(), path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
