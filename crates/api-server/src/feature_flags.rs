use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlagsSnapshot {
    pub glossary_import: bool,
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(raw) => parse_flag(&raw).unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn feature_glossary_import() -> bool {
    env_flag("FEATURE_GLOSSARY_IMPORT", false)
}

pub fn snapshot() -> FeatureFlagsSnapshot {
    FeatureFlagsSnapshot {
        glossary_import: feature_glossary_import(),
    }
}
