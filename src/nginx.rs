//! Nginx site config locations per distribution family.
//!
//! Debian/Ubuntu packages load sites from `sites-enabled/`, which holds symlinks into
//! `sites-available/`. Everything else includes `conf.d/*.conf` directly.

use crate::host::OsFamily;
use std::path::PathBuf;

const NGINX_ROOT: &str = "/etc/nginx";

/// Where the site config named `config_name` lives on a host of the given family.
pub fn nginx_config_path(family: OsFamily, config_name: &str) -> PathBuf {
    let dir = match family {
        OsFamily::Ubuntu => "sites-available",
        OsFamily::Other => "conf.d",
    };
    PathBuf::from(NGINX_ROOT)
        .join(dir)
        .join(format!("{}.conf", config_name))
}

/// The symlink that activates the site, if the family needs one.
pub fn nginx_enabled_link(family: OsFamily, config_name: &str) -> Option<PathBuf> {
    match family {
        OsFamily::Ubuntu => Some(
            PathBuf::from(NGINX_ROOT)
                .join("sites-enabled")
                .join(format!("{}.conf", config_name)),
        ),
        OsFamily::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_per_family() {
        assert_eq!(
            nginx_config_path(OsFamily::Ubuntu, "shop_production"),
            PathBuf::from("/etc/nginx/sites-available/shop_production.conf")
        );
        assert_eq!(
            nginx_config_path(OsFamily::Other, "shop_production"),
            PathBuf::from("/etc/nginx/conf.d/shop_production.conf")
        );
    }

    #[test]
    fn test_enabled_link_only_on_ubuntu() {
        assert_eq!(
            nginx_enabled_link(OsFamily::Ubuntu, "shop"),
            Some(PathBuf::from("/etc/nginx/sites-enabled/shop.conf"))
        );
        assert_eq!(nginx_enabled_link(OsFamily::Other, "shop"), None);
    }
}
