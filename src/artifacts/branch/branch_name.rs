use crate::artifacts::branch::INVALID_REF_NAME_REGEX;
use anyhow::Context;
use colored::Colorize;
use derive_new::new;

const HEADS_PREFIX: &str = "refs/heads/";
const TAGS_PREFIX: &str = "refs/tags/";
const REMOTES_PREFIX: &str = "refs/remotes/";

/// Full path of a ref relative to the git directory, e.g. `refs/heads/main` or `HEAD`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn is_detached_head(&self) -> bool {
        self.0.starts_with("HEAD")
    }

    pub fn is_tag(&self) -> bool {
        self.0.starts_with(TAGS_PREFIX)
    }

    pub fn as_ref_path(&self) -> &str {
        &self.0
    }

    /// The name git shows with `--decorate=short`
    pub fn to_short_name(&self) -> String {
        if let Some(tag) = self.0.strip_prefix(TAGS_PREFIX) {
            return format!("tag: {tag}");
        }

        self.0
            .strip_prefix(HEADS_PREFIX)
            .or_else(|| self.0.strip_prefix(REMOTES_PREFIX))
            .unwrap_or(&self.0)
            .to_string()
    }

    /// The name git shows with `--decorate=full`
    pub fn to_full_name(&self) -> String {
        if self.is_tag() {
            format!("tag: {}", self.0)
        } else {
            self.0.clone()
        }
    }

    /// Paint `label` in the color git uses for this kind of ref
    pub fn to_colored_name(&self, label: String) -> String {
        let colored_label = if self.is_detached_head() {
            label.cyan().bold()
        } else if self.0.starts_with(HEADS_PREFIX) {
            label.green().bold()
        } else if self.0.starts_with(REMOTES_PREFIX) {
            label.red().bold()
        } else if self.is_tag() {
            label.yellow().bold()
        } else {
            label.normal()
        };

        colored_label.to_string()
    }
}

/// A user-supplied ref name, validated against git's ref-name rules
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct RefName(String);

impl RefName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            anyhow::bail!("ref name cannot be empty");
        }

        let re = regex::Regex::new(INVALID_REF_NAME_REGEX)
            .with_context(|| format!("invalid ref name regex: {INVALID_REF_NAME_REGEX}"))?;

        if re.is_match(&name) {
            anyhow::bail!("invalid ref name: {}", name);
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
