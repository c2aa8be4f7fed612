use crate::error::{PlanError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

static HOST_RE: OnceLock<Regex> = OnceLock::new();

fn host_re() -> &'static Regex {
    HOST_RE.get_or_init(|| {
        Regex::new(
            r"^(localhost|([a-z0-9]([a-z0-9-]*[a-z0-9])?\.)+[a-z0-9]([a-z0-9-]*[a-z0-9])?)(:[0-9]{1,5})?$",
        )
        .unwrap()
    })
}

/// A validated client website URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteUrl {
    url: String,
    host: String,
}

impl SiteUrl {
    /// Normalize and validate user input. A missing scheme defaults to https.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PlanError::InvalidUrl(input.to_string(), "url is empty".into()));
        }

        let url = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| PlanError::InvalidUrl(input.to_string(), "missing scheme".into()))?;
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(PlanError::InvalidUrl(
                input.to_string(),
                format!("unsupported scheme '{scheme}'"),
            ));
        }

        let authority = rest
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        if authority.contains('@') {
            return Err(PlanError::InvalidUrl(
                input.to_string(),
                "credentials in url are not allowed".into(),
            ));
        }
        if !host_re().is_match(&authority) {
            return Err(PlanError::InvalidUrl(
                input.to_string(),
                format!("'{authority}' is not a valid host name"),
            ));
        }

        let host = authority
            .split(':')
            .next()
            .unwrap_or_default()
            .to_string();
        Ok(Self { url, host })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Host without a leading `www.`; used for file names and CSV folders.
    pub fn domain(&self) -> &str {
        self.host.strip_prefix("www.").unwrap_or(&self.host)
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domain_gets_https() {
        let site = SiteUrl::parse("example.com").unwrap();
        assert_eq!(site.as_str(), "https://example.com");
        assert_eq!(site.domain(), "example.com");
    }

    #[test]
    fn www_is_stripped_from_domain_only() {
        let site = SiteUrl::parse("http://WWW.Example.co.uk/services?x=1").unwrap();
        assert_eq!(site.host(), "www.example.co.uk");
        assert_eq!(site.domain(), "example.co.uk");
        assert_eq!(site.as_str(), "http://WWW.Example.co.uk/services?x=1");
    }

    #[test]
    fn port_is_accepted_and_dropped_from_host() {
        let site = SiteUrl::parse("https://shop.example.com:8443").unwrap();
        assert_eq!(site.host(), "shop.example.com");
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        for bad in ["", "   ", "ftp://example.com", "not a url", "https://", "https://-bad-.com", "https://user:pw@example.com"] {
            assert!(SiteUrl::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn single_label_hosts_are_rejected_except_localhost() {
        assert!(SiteUrl::parse("intranet").is_err());
        assert!(SiteUrl::parse("http://localhost:8080").is_ok());
    }
}
