use std::path::Path;

/// Load the environment for `profile` from `dir` and print it as pretty JSON.
pub fn run(dir: &Path, profile: &str) -> Result<(), Box<dyn std::error::Error>> {
    let env = ecom_env::load_from_dir(dir, profile)?;
    println!("{}", ecom_env::render::to_json(&env, true)?);
    Ok(())
}
