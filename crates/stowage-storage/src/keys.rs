//! Shared key addressing for storage backends.
//!
//! Pure functions mapping logical identifiers (owner id, workspace id, backup
//! object name) to bucket names, object keys, and delete prefixes. All
//! backends must use these for consistency; none of them perform I/O.

/// Name of the canonical live backup object of a workspace.
pub const DEFAULT_BACKUP: &str = "full-backup.tar";

/// Name prefix of trail objects (incremental history) next to a backup.
pub const TRAIL_PREFIX: &str = "trail-";

/// Compute the object key for a workspace's backup object.
///
/// With an empty `name` this returns the bare workspace-scoped root, without
/// a trailing separator. Callers that intend to use it as a delete prefix
/// must pass it through [`as_prefix`] first.
pub fn backup_object_key(workspace_id: &str, name: &str) -> String {
    if name.is_empty() {
        format!("workspaces/{}", workspace_id)
    } else {
        format!("workspaces/{}/{}", workspace_id, name)
    }
}

/// Normalize a key into a prefix-delete target by ensuring it ends with a
/// `/` separator.
///
/// Without this, the root key of workspace `w1` would also match every
/// object of workspace `w10`. Treat this as a correctness invariant, not a
/// formatting nicety.
pub fn as_prefix(key: &str) -> String {
    if key.ends_with('/') {
        key.to_string()
    } else {
        format!("{}/", key)
    }
}

/// Compute the bucket name for an owner. Deterministic and injective for
/// distinct owners under a fixed configured prefix.
pub fn bucket_for(bucket_prefix: &str, owner_id: &str) -> String {
    format!("{}-{}", bucket_prefix, owner_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_backup_key_shape() {
        assert_eq!(
            backup_object_key("w1", DEFAULT_BACKUP),
            "workspaces/w1/full-backup.tar"
        );
    }

    #[test]
    fn empty_name_yields_bare_workspace_root() {
        assert_eq!(backup_object_key("w1", ""), "workspaces/w1");
    }

    #[test]
    fn trail_key_is_a_bare_prefix() {
        assert_eq!(backup_object_key("w1", TRAIL_PREFIX), "workspaces/w1/trail-");
    }

    #[test]
    fn key_is_deterministic() {
        assert_eq!(
            backup_object_key("ws-abc", DEFAULT_BACKUP),
            backup_object_key("ws-abc", DEFAULT_BACKUP)
        );
    }

    #[test]
    fn as_prefix_appends_separator_once() {
        assert_eq!(as_prefix("workspaces/w1"), "workspaces/w1/");
        assert_eq!(as_prefix("workspaces/w1/"), "workspaces/w1/");
    }

    #[test]
    fn normalized_prefixes_do_not_collide_across_workspaces() {
        // "w1" is a string prefix of "w10"; normalization must keep their
        // delete prefixes disjoint.
        let p1 = as_prefix(&backup_object_key("w1", ""));
        let key_in_w10 = backup_object_key("w10", DEFAULT_BACKUP);
        assert!(!key_in_w10.starts_with(&p1));
        assert!(backup_object_key("w1", DEFAULT_BACKUP).starts_with(&p1));
    }

    #[test]
    fn bucket_for_distinct_owners_differ() {
        assert_eq!(bucket_for("stowage-ws", "u1"), "stowage-ws-u1");
        assert_ne!(bucket_for("stowage-ws", "u1"), bucket_for("stowage-ws", "u2"));
    }
}
