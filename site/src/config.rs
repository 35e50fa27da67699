use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Where the server listens and what it serves.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub addr: IpAddr,
    pub port: u16,
    /// Trunk output with `index.html` and the wasm bundle.
    pub dist: PathBuf,
    /// Model, panorama and `viewer.json`, served under `/assets`.
    pub assets: PathBuf,
}

impl SiteConfig {
    /// Read `SITE_*` variables, loading `.env` first when there is one.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => log::info!("loaded {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e).context("reading .env"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")); // = site/

        let addr = match lookup("SITE_ADDR") {
            Some(v) => v.parse().with_context(|| format!("SITE_ADDR={v}"))?,
            None => IpAddr::from([127, 0, 0, 1]),
        };
        let port = match lookup("SITE_PORT") {
            Some(v) => v.parse().with_context(|| format!("SITE_PORT={v}"))?,
            None => 3000,
        };

        Ok(Self {
            addr,
            port,
            dist: lookup("SITE_DIST").map_or_else(|| root.join("../dist"), PathBuf::from),
            assets: lookup("SITE_ASSETS").map_or_else(|| root.join("../assets"), PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_local_port_3000() {
        let cfg = SiteConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.addr, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(cfg.port, 3000);
        assert!(cfg.dist.ends_with("../dist"));
        assert!(cfg.assets.ends_with("../assets"));
    }

    #[test]
    fn env_overrides_everything() {
        let cfg = SiteConfig::from_lookup(lookup(&[
            ("SITE_ADDR", "0.0.0.0"),
            ("SITE_PORT", "8080"),
            ("SITE_DIST", "/srv/dist"),
            ("SITE_ASSETS", "/srv/assets"),
        ]))
        .unwrap();

        assert_eq!(cfg.addr, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.dist, PathBuf::from("/srv/dist"));
        assert_eq!(cfg.assets, PathBuf::from("/srv/assets"));
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = SiteConfig::from_lookup(lookup(&[("SITE_PORT", "eighty")])).unwrap_err();
        assert!(format!("{err:#}").contains("SITE_PORT=eighty"));
    }
}
