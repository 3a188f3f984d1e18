// ── Built-in catalogs ──
//
// Fallback locations and the preset lists offered in advanced mode.
// The location keys are placeholders; real deployments restore their own.

use crate::model::{DEFAULT_PORT, ServerLocation};

/// Configuration name used until the user picks one.
pub const DEFAULT_CONFIG_NAME: &str = "My-WireGuard-Config";

/// Prefix of names produced by the random-name action.
pub const RANDOM_NAME_PREFIX: &str = "Empress_";

const BUILTIN: &[(&str, &str, u8, &str)] = &[
    ("Russia", "ru", 10, "aB1cD2eF3gH4iJ5kL6mN7oP8qR9sT0uV1wX2yZ3aB4c="),
    ("USA", "us", 11, "bC2dE3fG4hI5jK6lM7nO8pQ9rS0tU1vW2xY3zZ4aB5c="),
    ("Armenia", "am", 12, "cD3eF4gH5iJ6kL7mN8oP9qR0sT1uV2wX3yZ4aB5c6dE="),
    ("Oman", "om", 13, "dE4fG5hI6jK7lM8nO9pQ0rS1tU2vW3xY4zZ5aB6c7dF="),
    ("Germany", "de", 14, "eF5gH6iJ7kL8mN9oP0qR1sT2uV3wX4yZ5aB6c7dG8hI="),
    ("China", "cn", 15, "fG6hI7jK8lM9nO0pQ1rS2tU3vW4xY5zZ6aB7c8dE9hJ="),
    ("UAE", "ae", 16, "gH7iJ8kL9mN0oP1qR2sT3uV4wX5yZ6aB7c8dF9hK0lM="),
    ("France", "fr", 17, "hI8jK9lM0nO1pQ2rS3tU4vW5xY6zZ7aB8c9dE0hL1mN="),
    ("Albania", "al", 18, "iJ9kL0mN1oP2qR3sT4uV5wX6yZ7aB8c9dF0hM1nO2pQ="),
    ("Belgium", "be", 19, "jK0lM1nO2pQ3rS4tU5vW6xY7zZ8aB9c0dE1hN2oP3qR="),
    ("Czech Republic", "cz", 20, "kL1mN2oP3qR4sT5uV6wX7yZ8aB9c0dF1hO2pQ3rS4tU="),
    ("Saudi Arabia", "sa", 21, "lM2nO3pQ4rS5tU6vW7xY8zZ9aB0c1dE2hP3qR4sT5uV="),
];

/// The catalog used when nothing usable is persisted.
///
/// Each location gets one address from each of the three RFC 5737
/// documentation ranges, sharing the final octet.
pub fn default_locations() -> Vec<ServerLocation> {
    BUILTIN
        .iter()
        .map(|&(name, code, octet, key)| {
            ServerLocation::new(
                name,
                code,
                vec![
                    format!("192.0.2.{octet}"),
                    format!("198.51.100.{octet}"),
                    format!("203.0.113.{octet}"),
                ],
                DEFAULT_PORT,
                key,
            )
        })
        .collect()
}

/// Named DNS server pairs, in display order.
pub const DNS_PRESETS: &[(&str, &str)] = &[
    ("Cloudflare", "1.1.1.1, 1.0.0.1"),
    ("Google", "8.8.8.8, 8.8.4.4"),
    ("Radar", "10.202.10.10, 10.202.10.11"),
    ("Electro", "78.157.42.100, 78.157.42.101"),
    ("OpenDNS", "208.67.222.222, 208.67.220.220"),
    ("Shekan", "178.22.122.100, 185.51.200.2"),
    ("Shekan Pro", "178.22.122.101, 185.51.200.1"),
];

/// Look up a DNS preset by name, ignoring ASCII case.
pub fn dns_preset(name: &str) -> Option<&'static str> {
    DNS_PRESETS
        .iter()
        .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
        .map(|&(_, servers)| servers)
}

/// Suggested interface IPv4 addresses.
pub const IPV4_ADDRESS_PRESETS: &[&str] = &[
    "10.10.10.2/24",
    "10.20.30.15/24",
    "192.168.1.100/24",
    "192.168.50.25/24",
    "172.16.5.10/24",
    "10.0.0.2/24",
    "192.168.100.10/24",
];

/// Suggested interface IPv6 addresses.
pub const IPV6_ADDRESS_PRESETS: &[&str] = &[
    "fd12:3456:789a:1::2/64",
    "fd00:abcd:1234:5678::2/64",
    "fd10:20ff:abcd::5/64",
    "fdff:0000:0000:0001::10/64",
    "fd99:8888:7777::3/64",
    "fd86:ea04:ffff::2/64",
];
