//! Target validation and shell-input sanitizing
//!
//! Pure functions, no state.

use std::sync::LazyLock;

use regex::Regex;

static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .expect("valid IPv4 pattern")
});

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("valid domain pattern")
});

/// Characters stripped by [`sanitize_input`].
const SHELL_METACHARACTERS: &[char] = &[';', '&', '|', '`', '$', '(', ')', '{', '}', '[', ']', '\\'];

/// Dotted-quad IPv4 address. Octets may carry leading zeros (`010`).
pub fn is_valid_ip(ip: &str) -> bool {
    IPV4_RE.is_match(ip)
}

/// Dot-separated labels of 1–63 alphanumerics/hyphens, no label starting or
/// ending with a hyphen.
///
/// A name made only of numeric labels is never a domain: `256.1.1.1` is a
/// malformed address, not a host name.
pub fn is_valid_domain(domain: &str) -> bool {
    if !DOMAIN_RE.is_match(domain) {
        return false;
    }
    !domain
        .split('.')
        .all(|label| label.chars().all(|c| c.is_ascii_digit()))
}

/// True iff `target` is a valid IPv4 address or domain name.
pub fn validate_target(target: &str) -> bool {
    is_valid_ip(target) || is_valid_domain(target)
}

/// False for loopback and RFC 1918 IPv4 addresses, true for everything
/// else. Domains are not resolved.
pub fn is_public_target(target: &str) -> bool {
    if !is_valid_ip(target) {
        return true;
    }

    let octets: Vec<u16> = target
        .split('.')
        .filter_map(|part| part.parse().ok())
        .collect();

    match octets.as_slice() {
        [127, ..] => false,
        [10, ..] => false,
        [172, second, ..] if (16..=31).contains(second) => false,
        [192, 168, ..] => false,
        _ => true,
    }
}

/// Trim, drop shell metacharacters and every whitespace character, then
/// lower-case. Not an HTML or SQL sanitizer.
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !SHELL_METACHARACTERS.contains(c) && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
