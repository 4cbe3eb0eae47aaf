use std::fmt::Write as _;
use std::str::FromStr;

use crate::config::ConfigError;
use crate::environment::Environment;

/// Output format for `ecom-env render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    /// An `environment.ts` module for the Angular frontend.
    Typescript,
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "ts" | "typescript" => Ok(Format::Typescript),
            other => Err(ConfigError::Load(format!(
                "unknown format '{other}' (expected json or ts)"
            ))),
        }
    }
}

/// Render `env` in the requested format.
pub fn render(env: &Environment, format: Format) -> Result<String, ConfigError> {
    match format {
        Format::Json => to_json(env, true),
        Format::Typescript => Ok(to_typescript(env)),
    }
}

/// Serialize with the exact external field names.
pub fn to_json(env: &Environment, pretty: bool) -> Result<String, ConfigError> {
    let out = if pretty {
        serde_json::to_string_pretty(env)
    } else {
        serde_json::to_string(env)
    };
    out.map_err(|e| ConfigError::Load(format!("failed to serialize environment: {e}")))
}

fn ts_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Emit `export const environment = { ... };` in the layout Angular projects use.
pub fn to_typescript(env: &Environment) -> String {
    let kinde = env.kinde();
    let mut out = String::from("export const environment = {\n  kinde: {\n");
    for (name, value) in [
        ("authority", kinde.authority()),
        ("redirectUrl", kinde.redirect_url()),
        ("postLogoutRedirectUri", kinde.post_logout_redirect_uri()),
        ("clientId", kinde.client_id()),
        ("audience", kinde.audience()),
    ] {
        let _ = writeln!(out, "    {name}: {},", ts_string(value));
    }
    let _ = writeln!(out, "  }},\n  apiUrl: {}\n}};", ts_string(env.api_url()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typescript_module_layout() {
        let ts = to_typescript(&Environment::development());
        let expected = "\
export const environment = {
  kinde: {
    authority: 'https://shopecom.kinde.com',
    redirectUrl: 'http://localhost:4200',
    postLogoutRedirectUri: 'http://localhost:4200',
    clientId: '79d811f5d44847c8a05abd1317ee54c7',
    audience: 'http://localhost:8080/api',
  },
  apiUrl: 'http://localhost:8080/api'
};
";
        assert_eq!(ts, expected);
    }

    #[test]
    fn ts_string_escapes_quotes() {
        assert_eq!(ts_string(r"it's\"), r"'it\'s\\'");
    }

    #[test]
    fn format_parsing() {
        assert_eq!("ts".parse::<Format>().unwrap(), Format::Typescript);
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert!("yaml".parse::<Format>().is_err());
    }
}
