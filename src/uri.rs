//! URI escaping and structured parsing for endpoint values.
//!
//! Endpoint URIs in node attributes are often templates such as
//! `http://host:8774/v2/%(tenant_id)s`. They are escaped minimally so they
//! parse as URIs while keeping their text recognizable. Components come from
//! `url::Url`, but the string form is always the escaped input, never the
//! parser's normalized serialization.

use serde::Serialize;
use std::fmt;
use std::net::Ipv6Addr;
use thiserror::Error;
use url::Url;

/// Characters permitted verbatim: unreserved, gen-delims and sub-delims.
const URI_PUNCTUATION: &str = "-._~:/?#[]@!$&'()*+,;=";

/// Characters that would move a host's text into another URI component.
const HOST_DELIMITERS: &str = "/?#@[]";

/// Why a URI could not be parsed or assembled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriSyntaxError {
    #[error(transparent)]
    Parse(#[from] url::ParseError),
    #[error("no host")]
    MissingHost,
    #[error("'{0}' is not a host name or IP literal")]
    InvalidHost(String),
}

/// Percent-escape every character that may not appear in a URI.
///
/// Existing `%XX` escapes are preserved; any other `%` becomes `%25`.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    let mut buf = [0u8; 4];

    for (idx, ch) in raw.char_indices() {
        if ch == '%' {
            if starts_with_escape(&raw[idx..]) {
                escaped.push('%');
            } else {
                escaped.push_str("%25");
            }
        } else if ch.is_ascii_alphanumeric() || URI_PUNCTUATION.contains(ch) {
            escaped.push(ch);
        } else {
            escaped.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        }
    }

    escaped
}

fn starts_with_escape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 3 && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit()
}

/// Well-known port for a scheme, used when a URI carries no explicit port.
pub fn default_port(scheme: &str) -> Option<u16> {
    match scheme.to_ascii_lowercase().as_str() {
        "http" => Some(80),
        "https" => Some(443),
        "mysql" => Some(3306),
        "postgresql" | "postgres" => Some(5432),
        "amqp" => Some(5672),
        _ => None,
    }
}

/// A parsed endpoint URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedUri {
    #[serde(rename = "uri")]
    text: String,
    scheme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    userinfo: Option<String>,
    host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip)]
    explicit_port: Option<u16>,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fragment: Option<String>,
}

impl ResolvedUri {
    /// Escape `raw` and parse the result.
    pub fn parse(raw: &str) -> Result<Self, UriSyntaxError> {
        Self::parse_escaped(&escape(raw))
    }

    /// Parse text that is already a valid URI character sequence.
    fn parse_escaped(text: &str) -> Result<Self, UriSyntaxError> {
        let url = Url::parse(text)?;
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or(UriSyntaxError::MissingHost)?;

        let userinfo = match (url.username(), url.password()) {
            ("", None) => None,
            (user, None) => Some(user.to_string()),
            (user, Some(password)) => Some(format!("{}:{}", user, password)),
        };

        Ok(Self {
            text: text.to_string(),
            scheme: url.scheme().to_string(),
            userinfo,
            host: host.to_string(),
            port: url
                .port_or_known_default()
                .or_else(|| default_port(url.scheme())),
            explicit_port: url.port(),
            path: url.path().to_string(),
            query: url.query().map(str::to_string),
            fragment: url.fragment().map(str::to_string),
        })
    }

    /// Build a URI from separate components, escaping the assembled text.
    ///
    /// `host` must be a plain host name or an IP literal; anything that would
    /// parse back as a different host or port is rejected.
    pub fn from_parts(
        scheme: &str,
        host: &str,
        port: Option<u16>,
        path: Option<&str>,
    ) -> Result<Self, UriSyntaxError> {
        let authority_host = host_literal(host)?;
        let mut raw = format!("{}://{}", scheme, authority_host);
        if let Some(port) = port {
            raw.push_str(&format!(":{}", port));
        }
        if let Some(path) = path.filter(|p| !p.is_empty()) {
            if !path.starts_with('/') {
                raw.push('/');
            }
            raw.push_str(path);
        }

        let uri = Self::parse(&raw)?;
        let port_matches = port.is_none_or(|port| uri.port() == Some(port));
        if !same_host(uri.host(), &authority_host) || !port_matches {
            return Err(UriSyntaxError::InvalidHost(host.to_string()));
        }
        Ok(uri)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn userinfo(&self) -> Option<&str> {
        self.userinfo.as_deref()
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Explicit port, or the scheme's well-known port.
    pub fn port(&self) -> Option<u16> {
        self.port.or_else(|| default_port(&self.scheme))
    }

    /// Port written in the URI, unless it is the scheme's default.
    pub fn explicit_port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path with percent escapes decoded, e.g. for template substitution.
    pub fn decoded_path(&self) -> String {
        urlencoding::decode(&self.path)
            .map(|p| p.into_owned())
            .unwrap_or_else(|_| self.path.clone())
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ResolvedUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Host as it appears in an authority, with bare IPv6 literals bracketed.
fn host_literal(host: &str) -> Result<String, UriSyntaxError> {
    let invalid = || UriSyntaxError::InvalidHost(host.to_string());

    if host.starts_with('[') {
        ipv6_literal(host).ok_or_else(invalid)?;
        return Ok(host.to_string());
    }
    if host.contains(':') {
        host.parse::<Ipv6Addr>().map_err(|_| invalid())?;
        return Ok(format!("[{}]", host));
    }
    if host.is_empty() || !host.is_ascii() || host.contains(|c| HOST_DELIMITERS.contains(c)) {
        return Err(invalid());
    }
    Ok(host.to_string())
}

fn ipv6_literal(host: &str) -> Option<Ipv6Addr> {
    host.strip_prefix('[')?.strip_suffix(']')?.parse().ok()
}

fn same_host(parsed: &str, expected: &str) -> bool {
    match (ipv6_literal(parsed), ipv6_literal(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => parsed.eq_ignore_ascii_case(expected),
    }
}
