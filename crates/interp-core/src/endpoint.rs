//! Endpoint resolution.
//!
//! The client can be reached through a raw machine address, the production
//! domain, a local development server, or not through a browser at all.
//! [`resolve_base_url`] maps each of those to the API address the client
//! should talk to. Resolution is pure: no I/O, and every input yields an
//! address.

use reqwest::Url;
use tracing::warn;

/// Port the API listens on for IP, local and default addresses
pub const DEFAULT_API_PORT: u16 = 8000;

/// Address used when nothing else applies and no override is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Address of the hosted API
pub const PRODUCTION_API_URL: &str = "http://app.interpretation-service.com:8000";

/// Hostname fragment identifying the hosted deployment
pub const PRODUCTION_DOMAIN: &str = "interpretation-service.com";

/// Where the client code is running.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExecutionContext {
    /// No browser location is observable (CLI, server-side rendering, tests).
    #[default]
    Headless,
    /// Running behind a page loaded from `hostname`.
    Browser { hostname: String },
}

impl ExecutionContext {
    /// Context for a page served from `hostname`. An empty hostname has no
    /// observable location.
    pub fn from_hostname(hostname: impl Into<String>) -> Self {
        let hostname = hostname.into();
        if hostname.is_empty() {
            Self::Headless
        } else {
            Self::Browser { hostname }
        }
    }

    /// Context for a full origin such as `http://10.0.0.5:3000`.
    /// A missing scheme is read as `http`. Unparseable origins are treated
    /// as headless, with a warning.
    pub fn from_origin(origin: &str) -> Self {
        let origin = origin.trim();
        let parsed = if origin.contains("://") {
            Url::parse(origin)
        } else {
            Url::parse(&format!("http://{}", origin))
        };
        match parsed {
            Ok(url) => match url.host_str() {
                Some(host) => Self::from_hostname(host),
                None => {
                    warn!(origin, "Origin has no host, treating client as headless");
                    Self::Headless
                }
            },
            Err(e) => {
                warn!(origin, error = %e, "Unparseable origin, treating client as headless");
                Self::Headless
            }
        }
    }

    pub fn hostname(&self) -> Option<&str> {
        match self {
            Self::Headless => None,
            Self::Browser { hostname } => Some(hostname),
        }
    }
}

/// Resolve the API base address for `context`.
///
/// Rules are checked in order and the first match wins:
/// 1. headless: `configured`, else [`DEFAULT_API_URL`]
/// 2. dotted-quad hostname: same host on [`DEFAULT_API_PORT`]
/// 3. production domain: [`PRODUCTION_API_URL`]
/// 4. `localhost` / `127.0.0.1`: [`DEFAULT_API_URL`]
/// 5. anything else: as rule 1
pub fn resolve_base_url(context: &ExecutionContext, configured: Option<&str>) -> String {
    let Some(hostname) = context.hostname() else {
        return fallback(configured);
    };

    if is_dotted_quad(hostname) {
        return format!("http://{}:{}", hostname, DEFAULT_API_PORT);
    }

    if hostname.contains(PRODUCTION_DOMAIN) {
        return PRODUCTION_API_URL.to_string();
    }

    if hostname == "localhost" || hostname == "127.0.0.1" {
        return DEFAULT_API_URL.to_string();
    }

    fallback(configured)
}

fn fallback(configured: Option<&str>) -> String {
    match configured.map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => DEFAULT_API_URL.to_string(),
    }
}

/// Four non-empty runs of ASCII digits separated by dots. Octet range is not
/// checked.
fn is_dotted_quad(hostname: &str) -> bool {
    let parts: Vec<&str> = hostname.split('.').collect();
    parts.len() == 4
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browser(host: &str) -> ExecutionContext {
        ExecutionContext::from_hostname(host)
    }

    #[test]
    fn test_is_dotted_quad() {
        assert!(is_dotted_quad("192.168.1.20"));
        assert!(is_dotted_quad("10.0.0.1"));
        assert!(is_dotted_quad("999.999.999.999")); // range is not validated

        assert!(!is_dotted_quad(""));
        assert!(!is_dotted_quad("10.0.0"));
        assert!(!is_dotted_quad("10.0.0.1.5"));
        assert!(!is_dotted_quad("10..0.1"));
        assert!(!is_dotted_quad("10.0.0.a"));
        assert!(!is_dotted_quad("localhost"));
    }

    #[test]
    fn test_ip_hostnames_use_same_host_on_api_port() {
        for host in ["192.168.1.20", "10.0.0.5", "172.16.254.1", "8.8.8.8"] {
            assert_eq!(
                resolve_base_url(&browser(host), Some("http://override:9000")),
                format!("http://{}:8000", host)
            );
        }
    }

    #[test]
    fn test_production_domain() {
        for host in [
            "interpretation-service.com",
            "app.interpretation-service.com",
            "www.interpretation-service.com",
            "staging.interpretation-service.com.example",
        ] {
            assert_eq!(resolve_base_url(&browser(host), None), PRODUCTION_API_URL);
        }
    }

    #[test]
    fn test_ip_rule_takes_precedence_over_domain_rule() {
        // A dotted quad is digits only, so it can never contain the
        // production fragment; the two rules never overlap.
        let host = "203.0.113.7";
        assert!(is_dotted_quad(host));
        assert!(!host.contains(PRODUCTION_DOMAIN));
        assert_eq!(resolve_base_url(&browser(host), None), "http://203.0.113.7:8000");

        // Anything carrying the fragment is not a dotted quad.
        assert!(!is_dotted_quad("1.2.3.interpretation-service.com"));
        assert_eq!(
            resolve_base_url(&browser("1.2.3.interpretation-service.com"), None),
            PRODUCTION_API_URL
        );
    }

    #[test]
    fn test_loopback_hostnames() {
        assert_eq!(
            resolve_base_url(&browser("localhost"), Some("http://override:9000")),
            "http://localhost:8000"
        );
        // Captured by the IP rule first; same shape either way.
        assert_eq!(
            resolve_base_url(&browser("127.0.0.1"), Some("http://override:9000")),
            "http://127.0.0.1:8000"
        );
    }

    #[test]
    fn test_headless_uses_override_or_default() {
        let ctx = ExecutionContext::Headless;
        assert_eq!(
            resolve_base_url(&ctx, Some("https://api.example.org")),
            "https://api.example.org"
        );
        assert_eq!(resolve_base_url(&ctx, None), DEFAULT_API_URL);
        assert_eq!(resolve_base_url(&ctx, Some("   ")), DEFAULT_API_URL);
    }

    #[test]
    fn test_unknown_hostname_falls_through() {
        let ctx = browser("customer-portal.example.net");
        assert_eq!(
            resolve_base_url(&ctx, Some("https://api.example.org")),
            "https://api.example.org"
        );
        assert_eq!(resolve_base_url(&ctx, None), DEFAULT_API_URL);
    }

    #[test]
    fn test_context_from_origin() {
        assert_eq!(
            ExecutionContext::from_origin("http://10.0.0.5:3000"),
            browser("10.0.0.5")
        );
        assert_eq!(
            ExecutionContext::from_origin("https://app.interpretation-service.com/login"),
            browser("app.interpretation-service.com")
        );
        assert_eq!(ExecutionContext::from_origin("not a url"), ExecutionContext::Headless);
        assert_eq!(ExecutionContext::from_hostname(""), ExecutionContext::Headless);
    }

    #[test]
    fn test_origin_without_scheme() {
        assert_eq!(ExecutionContext::from_origin("10.0.0.5:3000"), browser("10.0.0.5"));
        assert_eq!(ExecutionContext::from_origin("localhost:3000"), browser("localhost"));
        assert_eq!(
            resolve_base_url(&ExecutionContext::from_origin("10.0.0.5:3000"), None),
            "http://10.0.0.5:8000"
        );
        assert_eq!(ExecutionContext::from_origin("file:///tmp/x"), ExecutionContext::Headless);
    }
}
