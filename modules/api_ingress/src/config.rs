use serde::{Deserialize, Serialize};

/// HTTP host configuration (`modules.api_ingress` section).
///
/// `bind_addr` is not read from the module section; the binary derives it
/// from `server.host`/`server.port`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    #[serde(skip, default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub cors_enabled: bool,
    /// Handler timeout in seconds; 0 turns it off.
    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors_enabled: false,
            request_timeout_sec: default_request_timeout_sec(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8087".to_string()
}

fn default_request_timeout_sec() -> u64 {
    30
}

fn default_body_limit_bytes() -> usize {
    16 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ApiIngressConfig::default();
        assert_eq!(cfg.bind_addr, "127.0.0.1:8087");
        assert!(!cfg.cors_enabled);
        assert_eq!(cfg.request_timeout_sec, 30);
        assert_eq!(cfg.body_limit_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn partial_section_keeps_defaults() {
        let cfg: ApiIngressConfig =
            serde_json::from_value(serde_json::json!({ "cors_enabled": true })).unwrap();
        assert!(cfg.cors_enabled);
        assert_eq!(cfg.request_timeout_sec, 30);
        assert_eq!(cfg.bind_addr, "127.0.0.1:8087");
    }

    #[test]
    fn bind_addr_is_not_configurable_here() {
        let res = serde_json::from_value::<ApiIngressConfig>(
            serde_json::json!({ "bind_addr": "0.0.0.0:1" }),
        );
        assert!(res.is_err());
    }
}
