use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::log::{HistoryError, HistoryStore};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use tracing::debug;

/// A revision expression naming one commit
///
/// Supported forms:
/// - Ref names: `main`, `origin/main`, `v1.0`, `refs/heads/main`, `HEAD`
/// - Aliases: `@` (resolves to `HEAD`)
/// - Full or abbreviated (4+ hex characters) object ids
/// - Parent notation: `<revision>^`
/// - Ancestor notation: `<revision>~<n>`, following first parents
///
/// Hex-looking names are parsed as `Ref` and only treated as ids when no ref of that
/// name exists, which is how git prefers refs over ids.
#[derive(Debug, Clone)]
pub enum Revision {
    Ref(RefName),
    /// The Nth first-parent ancestor of a revision (e.g., HEAD~3)
    Ancestor(Box<Revision>, usize),
    /// The first parent of a revision (e.g., HEAD^)
    Parent(Box<Revision>),
}

impl Revision {
    /// Resolve to a commit id, peeling annotated tags
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        match self {
            Revision::Ref(ref_name) => {
                let name = ref_name.as_ref();

                let oid = match repository.refs().read_ref(name)? {
                    Some(oid) => oid,
                    None if ObjectId::looks_like_prefix(name) => {
                        Self::resolve_oid(name, repository)?
                    }
                    None => return Err(HistoryError::ReferenceNotFound(name.to_string()).into()),
                };

                let commit_oid = repository.database().peel(&oid)?;
                Self::validate_oid_is_commit(&commit_oid, repository)?;

                debug!(revision = name, commit = %commit_oid, "resolved revision");
                Ok(commit_oid)
            }
            Revision::Parent(base_revision) => {
                let base = base_revision.resolve(repository)?;
                Self::resolve_commit_parent(&base, repository)?
                    .ok_or_else(|| HistoryError::ReferenceNotFound(self.to_string()).into())
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = Self::resolve_commit_parent(&oid, repository)?
                        .ok_or_else(|| HistoryError::ReferenceNotFound(self.to_string()))?;
                }

                Ok(oid)
            }
        }
    }

    fn resolve_commit_parent(
        oid: &ObjectId,
        repository: &Repository,
    ) -> anyhow::Result<Option<ObjectId>> {
        let commit = repository.read_commit(oid)?;
        Ok(commit.parents().first().cloned())
    }

    fn resolve_oid(oid_str: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
        let matches = repository.database().find_objects_by_prefix(oid_str)?;

        match matches.len() {
            0 => Err(HistoryError::ReferenceNotFound(oid_str.to_string()).into()),
            1 => Ok(matches[0].clone()),
            _ => {
                // Multiple matches - only commits (or tags) are valid candidates
                let commit_matches: Vec<_> = matches
                    .iter()
                    .filter(|oid| {
                        repository
                            .database()
                            .get_object_type(oid)
                            .map(|t| matches!(t, ObjectType::Commit | ObjectType::Tag))
                            .unwrap_or(false)
                    })
                    .collect();

                match commit_matches.as_slice() {
                    [] => Err(HistoryError::ReferenceNotFound(oid_str.to_string()).into()),
                    [single] => Ok((*single).clone()),
                    candidates => {
                        let mut error_msg = format!(
                            "short SHA1 {} is ambiguous\nhint: The candidates are:",
                            oid_str
                        );
                        for oid in candidates {
                            error_msg.push_str(&format!("\nhint:   {} commit", oid.to_short_oid()));
                        }
                        anyhow::bail!(error_msg)
                    }
                }
            }
        }
    }

    fn validate_oid_is_commit(oid: &ObjectId, repository: &Repository) -> anyhow::Result<()> {
        let obj_type = repository
            .database()
            .get_object_type(oid)
            .with_context(|| format!("object {} not found", oid))?;

        if obj_type != ObjectType::Commit {
            return Err(HistoryError::UnexpectedObjectType {
                oid: oid.clone(),
                expected: ObjectType::Commit,
                actual: obj_type,
            }
            .into());
        }

        Ok(())
    }

    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let parent_regex = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        let ancestor_regex = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;

        if let Some(caps) = parent_regex.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ancestor_regex.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .with_context(|| format!("failed to parse generations in revision: {revision}"))?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            let ref_name = RefName::try_parse(resolved_name.to_string())?;
            Ok(Revision::Ref(ref_name))
        }
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Revision::Ref(name) => write!(f, "{name}"),
            Revision::Parent(base) => write!(f, "{base}^"),
            Revision::Ancestor(base, generations) => write!(f, "{base}~{generations}"),
        }
    }
}
