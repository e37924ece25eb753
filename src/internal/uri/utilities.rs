use std::fmt;

use percent_encoding::percent_decode_str;
use url::Url;

/// Scheme used to let the url parser validate a bare `host[:port]` value.
const AUTHORITY_PROBE_SCHEME: &str = "unknown";

const GIT_SUFFIX: &str = ".git";

const GIT_REVISION_LENGTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authority {
    host: String,
    port: Option<u16>,
}

impl Authority {
    pub fn new(host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            host: host.into().to_ascii_lowercase(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn is_host(&self, host: &str) -> bool {
        self.host.eq_ignore_ascii_case(host)
    }

    /// Whether `host` is a strict subdomain of this authority's host,
    /// e.g. `sub.github.com` for `github.com`.
    pub fn is_parent_domain_of(&self, host: &str) -> bool {
        let suffix_len = self.host.len() + 1;
        if host.len() <= suffix_len {
            return false;
        }

        let start = host.len() - suffix_len;
        host.is_char_boundary(start)
            && host.as_bytes()[start] == b'.'
            && host[start + 1..].eq_ignore_ascii_case(&self.host)
    }

    /// Whether `host` is this host or one of its subdomains.
    pub fn covers(&self, host: &str) -> bool {
        self.is_host(host) || self.is_parent_domain_of(host)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{}", self.host, port),
            None => write!(f, "{}", self.host),
        }
    }
}

/// Parses a `host[:port]` value. Anything carrying a user, a path other than
/// the root, a query or a fragment is rejected.
pub fn parse_authority(value: &str) -> Option<Authority> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return None;
    }

    let url = Url::parse(&format!("{}://{}", AUTHORITY_PROBE_SCHEME, value)).ok()?;
    if !url.username().is_empty()
        || url.password().is_some()
        || url.query().is_some()
        || url.fragment().is_some()
    {
        return None;
    }
    if !(url.path().is_empty() || url.path() == "/") {
        return None;
    }

    let host = url.host_str()?;
    if host.is_empty() {
        return None;
    }

    Some(Authority::new(host, url.port()))
}

/// The authority of an absolute url, with its explicit (non-default) port.
pub fn url_authority(url: &Url) -> Option<Authority> {
    let host = url.host_str()?;
    if host.is_empty() {
        return None;
    }
    Some(Authority::new(host, url.port()))
}

/// Joins two url fragments with exactly one `/` between them.
pub fn combine(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        return base.to_string();
    }

    match (base.ends_with('/'), relative.starts_with('/')) {
        (true, true) => format!("{}{}", base, &relative[1..]),
        (false, false) => format!("{}/{}", base, relative),
        _ => format!("{}{}", base, relative),
    }
}

/// Splits a `/`-delimited relative url into its segments. A single leading
/// and a single trailing `/` are allowed; any other empty segment fails.
pub fn split_path(relative: &str) -> Option<Vec<&str>> {
    if relative.is_empty() || relative == "/" {
        return Some(vec![]);
    }

    let trimmed = relative.strip_prefix('/').unwrap_or(relative);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

    let segments: Vec<&str> = trimmed.split('/').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return None;
    }

    Some(segments)
}

/// Decodes the escape sequences that stand for an unreserved ASCII character
/// or a complete non-ASCII UTF-8 character. Escaped reserved characters,
/// escaped `%` and invalid sequences stay exactly as written, as does any
/// escape whose decoded hex digit would complete a `%` sequence with the
/// text before it, so applying this function twice gives the same result as
/// applying it once.
pub fn safe_unescape(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut result = String::with_capacity(value.len());
    let mut index = 0;

    while index < bytes.len() {
        if !is_escape_at(bytes, index) {
            let Some(ch) = value[index..].chars().next() else {
                break;
            };
            result.push(ch);
            index += ch.len_utf8();
            continue;
        }

        let start = index;
        while is_escape_at(bytes, index) {
            index += 3;
        }
        unescape_run(&value[start..index], &mut result);
    }

    result
}

fn is_escape_at(bytes: &[u8], index: usize) -> bool {
    index + 2 < bytes.len()
        && bytes[index] == b'%'
        && bytes[index + 1].is_ascii_hexdigit()
        && bytes[index + 2].is_ascii_hexdigit()
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Whether a hex digit appended to `text` would form a `%XX` sequence.
fn ends_with_open_escape(text: &str) -> bool {
    match text.as_bytes() {
        [.., b'%'] => true,
        [.., b'%', digit] => digit.is_ascii_hexdigit(),
        _ => false,
    }
}

/// `run` is a sequence of `%XX` triplets; decoded byte `n` comes from
/// `run[3n..3n + 3]`.
fn unescape_run(run: &str, result: &mut String) {
    let decoded: Vec<u8> = percent_decode_str(run).collect();
    let original = |index: usize, count: usize| &run[3 * index..3 * (index + count)];

    let mut index = 0;
    while index < decoded.len() {
        let byte = decoded[index];

        if byte.is_ascii() {
            let opens_escape = byte.is_ascii_hexdigit() && ends_with_open_escape(result);
            if is_unreserved(byte) && !opens_escape {
                result.push(byte as char);
            } else {
                result.push_str(original(index, 1));
            }
            index += 1;
            continue;
        }

        let width = utf8_width(byte);
        if width > 1 && index + width <= decoded.len() {
            if let Ok(ch) = std::str::from_utf8(&decoded[index..index + width]) {
                result.push_str(ch);
                index += width;
                continue;
            }
        }

        result.push_str(original(index, 1));
        index += 1;
    }
}

/// The path and query of `url`, safe-unescaped.
pub fn path_and_query(url: &Url) -> String {
    let mut result = safe_unescape(url.path());
    if let Some(query) = url.query() {
        result.push('?');
        result.push_str(&safe_unescape(query));
    }
    result
}

/// Rewrites an SCP-style remote (`[user@]host:path`) into an `ssh://` url.
/// Urls with a scheme, local paths and Windows drive paths are returned as
/// they are.
pub fn normalize_remote_url(value: &str) -> String {
    let value = value.trim();
    if value.contains("://") {
        return value.to_string();
    }

    let Some((host_part, path)) = value.split_once(':') else {
        return value.to_string();
    };

    if host_part.is_empty() || host_part.contains(['/', '\\']) {
        return value.to_string();
    }

    // C:\path or C:/path
    if host_part.len() == 1 && host_part.chars().all(|c| c.is_ascii_alphabetic()) {
        return value.to_string();
    }

    let host = host_part.rsplit('@').next().unwrap_or(host_part);
    if host.is_empty() {
        return value.to_string();
    }

    if path.starts_with('/') {
        format!("ssh://{}{}", host_part, path)
    } else {
        format!("ssh://{}/{}", host_part, path)
    }
}

/// Strips a case-sensitive `.git` suffix, unless it is a bare `/.git`
/// segment.
pub fn strip_git_suffix(path: &str) -> &str {
    match path.strip_suffix(GIT_SUFFIX) {
        Some(stripped) if !stripped.ends_with('/') => stripped,
        _ => path,
    }
}

/// The repository path of a remote url as used to build content urls:
/// safe-unescaped, without trailing `/` and without `.git` suffix.
pub fn repository_relative_url(url: &Url) -> String {
    let path = safe_unescape(url.path());
    strip_git_suffix(path.trim_end_matches('/')).to_string()
}

pub fn is_git_revision(value: &str) -> bool {
    value.len() == GIT_REVISION_LENGTH && value.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
#[path = "utilities_test.rs"]
mod tests;
