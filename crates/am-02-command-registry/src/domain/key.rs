//! Command resolution keys
//!
//! A key is the command path `root[.group][.sub]`. The same builder is used at
//! registration and at dispatch, so a key derived from an event is
//! byte-identical to the key its definition was stored under.

use shared_types::CommandPath;
use std::fmt;

use crate::error::KeyError;

/// Separator between key segments.
pub const KEY_SEPARATOR: char = '.';

/// Hierarchical command key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandKey(String);

impl CommandKey {
    /// Build a key from validated segments, omitting absent ones.
    pub fn new(root: &str, group: Option<&str>, sub: Option<&str>) -> Result<Self, KeyError> {
        let mut key = String::with_capacity(
            root.len() + group.map_or(0, str::len) + sub.map_or(0, str::len) + 2,
        );

        validate_segment(root)?;
        key.push_str(root);

        for segment in [group, sub].into_iter().flatten() {
            validate_segment(segment)?;
            key.push(KEY_SEPARATOR);
            key.push_str(segment);
        }

        Ok(Self(key))
    }

    /// Key for a plain root command or context menu.
    pub fn root(name: &str) -> Result<Self, KeyError> {
        Self::new(name, None, None)
    }

    /// Key for a flat subcommand: `root.sub`.
    pub fn subcommand(root: &str, sub: &str) -> Result<Self, KeyError> {
        Self::new(root, None, Some(sub))
    }

    /// Key for a grouped subcommand: `root.group.sub`.
    pub fn grouped(root: &str, group: &str, sub: &str) -> Result<Self, KeyError> {
        Self::new(root, Some(group), Some(sub))
    }

    /// Derive the key an event resolves against.
    ///
    /// Empty optional segments count as absent, matching how the platform
    /// omits unused path parts.
    pub fn from_path<P: CommandPath + ?Sized>(event: &P) -> Result<Self, KeyError> {
        let group = event.subcommand_group().filter(|g| !g.is_empty());
        let sub = event.subcommand().filter(|s| !s.is_empty());
        Self::new(event.command_name(), group, sub)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The root command name.
    pub fn root_name(&self) -> &str {
        self.0
            .split(KEY_SEPARATOR)
            .next()
            .unwrap_or(self.0.as_str())
    }

    /// Number of path segments (1 to 3).
    pub fn depth(&self) -> usize {
        self.0.split(KEY_SEPARATOR).count()
    }
}

/// Reject segments that would corrupt the joined key.
pub(crate) fn validate_segment(segment: &str) -> Result<(), KeyError> {
    if segment.is_empty() {
        return Err(KeyError::EmptySegment);
    }
    if segment.contains(KEY_SEPARATOR) {
        return Err(KeyError::ContainsSeparator {
            segment: segment.to_string(),
            separator: KEY_SEPARATOR,
        });
    }
    Ok(())
}

impl fmt::Display for CommandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CommandKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
