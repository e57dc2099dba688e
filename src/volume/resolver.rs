//! Volume name to dataset path resolution.
//!
//! A name of the form `<group>_<member>` is placed under a per-group parent
//! dataset below the first configured root, so every member of a group (for
//! example all volumes of one compose project) shares a parent that can be
//! snapshotted as a unit. Any other name is used as the dataset path as-is.

/// Separator between the group and member parts of a volume name.
pub const GROUP_SEPARATOR: char = '_';

/// The `(group, member)` decomposition of a volume name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupKey<'a> {
    pub group: &'a str,
    pub member: &'a str,
}

/// Where a requested volume name lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement<'a> {
    pub dataset: String,
    /// Set only when hierarchical placement was applied.
    pub group: Option<GroupKey<'a>>,
}

/// Split `name` on the first separator. Both halves must be non-empty.
pub fn group_key(name: &str) -> Option<GroupKey<'_>> {
    let (group, member) = name.split_once(GROUP_SEPARATOR)?;
    if group.is_empty() || member.is_empty() {
        return None;
    }
    Some(GroupKey { group, member })
}

/// Compute the dataset path a new volume named `requested` should occupy.
pub fn resolve<'a>(requested: &'a str, roots: &[String]) -> Placement<'a> {
    match (group_key(requested), roots.first()) {
        (Some(key), Some(root)) => Placement {
            dataset: format!("{}/{}/{}", root, key.group, key.member),
            group: Some(key),
        },
        _ => Placement {
            dataset: requested.to_string(),
            group: None,
        },
    }
}
