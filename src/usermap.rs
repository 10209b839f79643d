//! Alias resolution from commit e-mail addresses to contributors.
//!
//! People commit from several machines with different `user.email` settings;
//! a user map folds those aliases into one canonical contributor so their
//! commits are counted together.

use crate::error::{GitplyError, Result};
use crate::util::expand_path;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Contributor used for addresses missing from a loaded map.
pub const UNKNOWN_CONTRIBUTOR: &str = "unknown";

#[derive(Debug, Clone, Default)]
pub enum UserMap {
    /// No map given: the e-mail address is the contributor.
    #[default]
    Identity,
    Aliases(HashMap<String, String>),
}

impl UserMap {
    /// Load a map file of `<email> <name>` lines.
    pub fn load(path: &Path) -> Result<Self> {
        let path = expand_path(path);
        let text = std::fs::read_to_string(&path)?;
        let map = Self::parse(&text, &path)?;
        if let UserMap::Aliases(aliases) = &map {
            debug!(path = %path.display(), aliases = aliases.len(), "loaded user map");
        }
        Ok(map)
    }

    /// Parse map text. `origin` only labels errors.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let mut aliases = HashMap::new();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (email, name) = line
                .split_once(char::is_whitespace)
                .map(|(email, name)| (email.trim(), name.trim()))
                .filter(|(_, name)| !name.is_empty())
                .ok_or_else(|| GitplyError::UserMap {
                    path: origin.to_path_buf(),
                    line: idx + 1,
                    reason: format!("expected '<email> <name>', found '{line}'"),
                })?;

            aliases.insert(email.to_string(), name.to_string());
        }

        Ok(UserMap::Aliases(aliases))
    }

    pub fn resolve<'a>(&'a self, email: &'a str) -> &'a str {
        match self {
            UserMap::Identity => email,
            UserMap::Aliases(aliases) => aliases
                .get(email)
                .map(String::as_str)
                .unwrap_or(UNKNOWN_CONTRIBUTOR),
        }
    }
}
