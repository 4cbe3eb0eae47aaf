use std::path::Path;

use colored::Colorize;
use ecom_env::config::{validate_section, ConfigProperties, IssueKind};
use ecom_env::{EnvConfig, Environment, Profile};

/// Short error returned after the problems themselves were printed.
pub fn summary(count: usize) -> String {
    match count {
        1 => "1 configuration problem".to_string(),
        n => format!("{n} configuration problems"),
    }
}

/// Load every layer from `dir` and check the record.
///
/// Prints one line per problem and returns a one-line summary error if there
/// is any. Plain `http` URLs outside the `dev`/`test` profiles are printed as
/// warnings only.
pub fn run(dir: &Path, profile: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = EnvConfig::load_from_dir(dir, profile)?;
    config.bind_env::<Environment>();
    println!(
        "{} {}",
        "Checking environment for profile".bold(),
        config.profile().bold()
    );

    let errors = validate_section::<Environment>(&config);
    if !errors.is_empty() {
        for err in &errors {
            let marker = match err.kind {
                IssueKind::Missing => "✗".red(),
                IssueKind::TypeMismatch | IssueKind::Invalid => "!".red(),
            };
            println!("{marker} {err}");
        }
        return Err(summary(errors.len()).into());
    }

    let env = config.with_typed::<Environment>()?;
    let builtin = env.profile().parse::<Profile>()?.has_builtin_defaults();
    if !builtin {
        for (key, url) in env.insecure_urls() {
            println!("{} {key} uses plain http ({url})", "!".yellow());
        }
    }
    println!(
        "{} All {} keys present and valid",
        "✓".green(),
        Environment::properties_metadata().len()
    );
    Ok(())
}
