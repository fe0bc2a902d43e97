use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

use crate::models::{HostSource, SshHost, DEFAULT_SSH_PORT};

// Simplified RFC 1035: dotted labels of 1-63 alphanumerics/hyphens, alphabetic TLD.
static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)*\.[a-z]{2,}$",
    )
    .expect("domain pattern compiles")
});

const SHELL_METACHARACTERS: &[char] = &[
    ';', '|', '&', '`', '$', '(', ')', '<', '>', '[', ']', '{', '}', '"', '\'', '\\',
];

/// Returns true for an IP literal or a dotted domain name, optionally
/// prefixed by `user@`.
pub fn is_valid_host(input: &str) -> bool {
    let input = input.trim();
    if input.is_empty() {
        return false;
    }

    let host_part = match input.rfind('@') {
        Some(at) => &input[at + 1..],
        None => input,
    };
    if host_part.is_empty() {
        return false;
    }

    host_part.parse::<IpAddr>().is_ok() || DOMAIN_RE.is_match(host_part)
}

/// Splits `user@host` at the last `@`. `user` is empty when there is no `@`.
pub fn parse_user_host(input: &str) -> (String, String) {
    let input = input.trim();
    match input.rfind('@') {
        Some(at) => (input[..at].to_string(), input[at + 1..].to_string()),
        None => (String::new(), input.to_string()),
    }
}

/// Free-form options are concatenated into the command unescaped, so any
/// shell metacharacter rejects them.
pub fn is_valid_ssh_option(option: &str) -> bool {
    !option.contains(SHELL_METACHARACTERS)
}

/// Synthesizes a record for a destination typed straight into the search box.
pub fn custom_host(raw: &str) -> SshHost {
    let raw = raw.trim();
    let (user, host_name) = parse_user_host(raw);

    SshHost {
        name: raw.to_string(),
        host_name,
        user,
        port: DEFAULT_SSH_PORT.to_string(),
        source: HostSource::Custom,
        aliases: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_host() {
        // Valid hosts
        assert!(is_valid_host("192.168.1.1"));
        assert!(is_valid_host("user@192.168.1.1"));
        assert!(is_valid_host("2001:db8::1"));
        assert!(is_valid_host("user@2001:db8::1"));
        assert!(is_valid_host("example.com"));
        assert!(is_valid_host("User@Example.COM"));
        assert!(is_valid_host("sub.example.com"));
        assert!(is_valid_host("host-name.com"));
        assert!(is_valid_host("a.b.c.example.org"));
        assert!(is_valid_host("  example.com  "));

        // Invalid hosts
        assert!(!is_valid_host(""));
        assert!(!is_valid_host("   "));
        assert!(!is_valid_host("user@"));
        assert!(!is_valid_host("invalid_domain"));
        assert!(!is_valid_host("localhost"));
        assert!(!is_valid_host("-invalid.com"));
        assert!(!is_valid_host("invalid-.com"));
        assert!(!is_valid_host("example.c0m"));
        assert!(!is_valid_host("example.com; ls"));
    }

    #[test]
    fn test_label_length_limit() {
        let ok = format!("{}.com", "a".repeat(63));
        let too_long = format!("{}.com", "a".repeat(64));
        assert!(is_valid_host(&ok));
        assert!(!is_valid_host(&too_long));
    }

    #[test]
    fn test_parse_user_host() {
        let cases = [
            ("user@host", "user", "host"),
            ("host", "", "host"),
            (" user@host ", "user", "host"),
            ("user@", "user", ""),
            ("@host", "", "host"),
            ("user@host:port", "user", "host:port"),
            ("a@b@host.com", "a@b", "host.com"),
            ("", "", ""),
        ];

        for (input, user, host) in cases {
            assert_eq!(
                parse_user_host(input),
                (user.to_string(), host.to_string()),
                "parse_user_host({input:?})"
            );
        }
    }

    #[test]
    fn test_is_valid_ssh_option() {
        assert!(is_valid_ssh_option(""));
        assert!(is_valid_ssh_option("-p 2222"));
        assert!(is_valid_ssh_option("-i ~/.ssh/id_rsa"));
        assert!(is_valid_ssh_option("-L 8080:localhost:80"));
        assert!(is_valid_ssh_option("-o StrictHostKeyChecking=no"));
        assert!(is_valid_ssh_option("-v -X"));

        assert!(!is_valid_ssh_option("-p 2222; rm -rf /"));
        assert!(!is_valid_ssh_option("-i key | cat /etc/passwd"));
        assert!(!is_valid_ssh_option("-L 8080:localhost:80 &"));
        assert!(!is_valid_ssh_option("-p 2222 `whoami`"));
        assert!(!is_valid_ssh_option("-i $HOME/.ssh/key"));
        assert!(!is_valid_ssh_option("-p (2222)"));
        assert!(!is_valid_ssh_option("-L <file"));
        assert!(!is_valid_ssh_option("-p >2222"));
        assert!(!is_valid_ssh_option("-i [key]"));
        assert!(!is_valid_ssh_option("-p {2222}"));
        assert!(!is_valid_ssh_option("-i 'key'"));
        assert!(!is_valid_ssh_option("-p \"2222\""));
        assert!(!is_valid_ssh_option("-i key\\n"));
    }

    #[test]
    fn test_custom_host_from_typed_input() {
        let host = custom_host("deploy@build.example.com");
        assert_eq!(host.name, "deploy@build.example.com");
        assert_eq!(host.user, "deploy");
        assert_eq!(host.host_name, "build.example.com");
        assert_eq!(host.port, DEFAULT_SSH_PORT);
        assert_eq!(host.source, HostSource::Custom);
        assert!(host.aliases.is_empty());

        let bare = custom_host("10.0.0.5");
        assert_eq!(bare.user, "");
        assert_eq!(bare.host_name, "10.0.0.5");
    }
}
