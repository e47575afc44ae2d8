//! Built-in probe signatures, grouped by category.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a malicious-path pattern.
///
/// Declaration order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    /// Server-side script extensions this deployment never serves.
    LegacyScript,
    /// Dotfiles, VCS metadata, lockfiles and config files.
    SensitiveFile,
    /// Well-known admin panel locations.
    AdminPanel,
    /// Absolute system paths and traversal sequences.
    SystemPath,
    /// Database, backup, log and dump files.
    DumpFile,
    /// Paths requested by common vulnerability scanners.
    ScannerProbe,
}

impl PatternCategory {
    /// All categories in evaluation order.
    pub const ALL: [PatternCategory; 6] = [
        PatternCategory::LegacyScript,
        PatternCategory::SensitiveFile,
        PatternCategory::AdminPanel,
        PatternCategory::SystemPath,
        PatternCategory::DumpFile,
        PatternCategory::ScannerProbe,
    ];

    /// Stable label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternCategory::LegacyScript => "legacy_script",
            PatternCategory::SensitiveFile => "sensitive_file",
            PatternCategory::AdminPanel => "admin_panel",
            PatternCategory::SystemPath => "system_path",
            PatternCategory::DumpFile => "dump_file",
            PatternCategory::ScannerProbe => "scanner_probe",
        }
    }

    /// Built-in patterns for this category.
    ///
    /// Compiled case-insensitively by the ruleset, so they are written in lower case.
    pub fn builtin_patterns(&self) -> &'static [&'static str] {
        match self {
            PatternCategory::LegacyScript => &[
                r"\.(?:php[0-9]?|phtml|phar|asp|aspx|ashx|asmx|jsp|jspx|cgi|pl|cfm|rb|py)(?:/|$)",
            ],
            PatternCategory::SensitiveFile => &[
                r"/\.(?:env|git|svn|hg|bzr|ssh|aws|docker|dockerenv|vscode|idea|htaccess|htpasswd|ds_store|npmrc|yarnrc|bash_history)(?:[/.]|$)",
                r"/(?:composer\.(?:json|lock)|package-lock\.json|yarn\.lock|pnpm-lock\.yaml|gemfile\.lock|cargo\.lock)$",
                r"/(?:web\.config|wp-config(?:\.[a-z]+)*|config\.(?:json|ya?ml|ini|xml|inc)|settings\.py|appsettings\.json|docker-compose\.ya?ml|dockerfile)$",
                r"/(?:id_rsa|id_dsa|id_ecdsa|id_ed25519)(?:\.pub)?$",
            ],
            PatternCategory::AdminPanel => &[
                r"/(?:wp-admin|wp-login|phpmyadmin|myadmin|admin|cpanel|webadmin|manager/html|server-status|server-info)",
            ],
            PatternCategory::SystemPath => &[
                r"(?:^|/)\.\.(?:/|\\|$)",
                r"%2e%2e",
                r"/etc/(?:passwd|shadow|group|hosts|issue)",
                r"/proc/self/",
                r"/(?:usr/)?bin/(?:ba|z)?sh$",
                r"c:[/\\]windows",
                r"/(?:windows/win\.ini|boot\.ini)$",
            ],
            PatternCategory::DumpFile => &[
                r"\.(?:sql|sqlite3?|db|mdb|bak|backup|old|orig|save|swp|log|dump)$",
            ],
            PatternCategory::ScannerProbe => &[
                r"/cgi-bin/",
                r"/vendor/phpunit",
                r"/(?:xmlrpc|wp-content|wp-includes)",
                r"/(?:actuator|jolokia)(?:/|$)",
                r"/(?:hnap1|boaform|_ignition|telescope)",
                r"/(?:owa/auth|autodiscover/autodiscover\.xml|remote/fgt_lang)",
            ],
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
