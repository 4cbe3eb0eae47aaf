use colored::Colorize;
use ecom_env::config::ConfigProperties;
use ecom_env::Environment;

/// One line per property: key, env var, description.
pub fn lines() -> Vec<String> {
    Environment::properties_metadata()
        .iter()
        .map(|prop| {
            format!(
                "{:<28} {:<32} {}",
                prop.full_key,
                prop.env_hint(),
                prop.description.unwrap_or_default()
            )
        })
        .collect()
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", format!("{:<28} {:<32} {}", "KEY", "ENV VAR", "DESCRIPTION").bold());
    for line in lines() {
        println!("{line}");
    }
    Ok(())
}
