//! Classification of the target host's Linux distribution.

/// Distribution family, as far as the Nginx path convention is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Ubuntu,
    Other,
}

/// Result of one inspection of the target host. Never cached by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostProfile {
    pub family: OsFamily,
    /// Concatenated content of the host's `/etc/*-release` files. Empty if they were unreadable.
    pub release_text: String,
}

/// Classify release-info text.
///
/// This is a plain substring heuristic: any text containing the lowercase token `ubuntu`
/// anywhere classifies as [`OsFamily::Ubuntu`]. The match is case-sensitive, so text carrying
/// only `Ubuntu` (e.g. a bare `DISTRIB_DESCRIPTION`) is [`OsFamily::Other`]. Real Ubuntu hosts
/// always ship `ID=ubuntu` in their os-release file.
pub fn classify_release(release_text: &str) -> OsFamily {
    if release_text.contains("ubuntu") {
        OsFamily::Ubuntu
    } else {
        OsFamily::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UBUNTU_2204: &str = r#"DISTRIB_ID=Ubuntu
DISTRIB_RELEASE=22.04
DISTRIB_CODENAME=jammy
DISTRIB_DESCRIPTION="Ubuntu 22.04.3 LTS"
PRETTY_NAME="Ubuntu 22.04.3 LTS"
NAME="Ubuntu"
VERSION_ID="22.04"
ID=ubuntu
ID_LIKE=debian
HOME_URL="https://www.ubuntu.com/"
"#;

    const CENTOS_8: &str = r#"CentOS Linux release 8.5.2111
NAME="CentOS Linux"
VERSION="8"
ID="centos"
ID_LIKE="rhel fedora"
PRETTY_NAME="CentOS Linux 8"
"#;

    #[test]
    fn test_classify_real_release_files() {
        assert_eq!(classify_release(UBUNTU_2204), OsFamily::Ubuntu);
        assert_eq!(classify_release(CENTOS_8), OsFamily::Other);
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(
            classify_release("DISTRIB_DESCRIPTION=\"Ubuntu 22.04\""),
            OsFamily::Other
        );
        assert_eq!(classify_release("ID=ubuntu"), OsFamily::Ubuntu);
        assert_eq!(classify_release("CentOS Linux 8"), OsFamily::Other);
    }

    #[test]
    fn test_classify_matches_anywhere() {
        // Derivatives mentioning ubuntu in ID_LIKE count as Ubuntu
        assert_eq!(
            classify_release("ID=linuxmint\nID_LIKE=\"ubuntu debian\""),
            OsFamily::Ubuntu
        );
        assert_eq!(classify_release("notubuntu"), OsFamily::Ubuntu);
        assert_eq!(classify_release(""), OsFamily::Other);
    }
}
