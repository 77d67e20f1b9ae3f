use serde::{Deserialize, Serialize};

/// Configuration for the users module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersConfig {
    /// Mount `POST /test/reset` (clears all users, restarts ids at 1).
    #[serde(default = "default_expose_reset")]
    pub expose_reset: bool,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            expose_reset: default_expose_reset(),
        }
    }
}

fn default_expose_reset() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_is_exposed_by_default() {
        assert!(UsersConfig::default().expose_reset);
        let parsed: UsersConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(parsed.expose_reset);
    }

    #[test]
    fn reset_can_be_disabled() {
        let parsed: UsersConfig =
            serde_json::from_value(serde_json::json!({ "expose_reset": false })).unwrap();
        assert!(!parsed.expose_reset);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed = serde_json::from_value::<UsersConfig>(serde_json::json!({ "page_size": 10 }));
        assert!(parsed.is_err());
    }
}
