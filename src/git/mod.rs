//! Remote reference listing abstraction
//!
//! This module provides a trait-based abstraction over the remote ref
//! advertisement query, allowing for a real git2-backed implementation and a
//! mock implementation for testing.
//!
//! The primary abstraction is the [RemoteLister] trait, which exposes the
//! remote's advertised references as text lines in the `<oid>\t<refname>`
//! shape `git ls-remote` prints. Tag resolution scans those lines, so the
//! listing backend can be swapped without touching the resolver.

pub mod mock;
pub mod remote;

pub use mock::MockRemoteLister;
pub use remote::GitRemoteLister;

use crate::error::Result;

/// Marker identifying tag references in an advertised ref line
const TAG_REF_MARKER: &str = "refs/tags/";

/// Suffix advertised for the peeled target of an annotated tag
const PEELED_SUFFIX: &str = "^{}";

/// Narrow capability: list the references a remote advertises.
///
/// Implementors return one line per advertised ref, formatted
/// `<oid>\t<refname>`, in whatever order the remote reports them.
///
/// ## Implementations
///
/// - [GitRemoteLister](remote::GitRemoteLister): real implementation using the `git2` crate
/// - [MockRemoteLister](mock::MockRemoteLister): test implementation with canned lines
pub trait RemoteLister: Send + Sync {
    /// List the refs advertised by the remote at `url`
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - One `<oid>\t<refname>` line per ref, remote order
    /// * `Err` - If the remote cannot be reached or queried
    fn list_remote_refs(&self, url: &str) -> Result<Vec<String>>;
}

/// Find the tag, if any, pointing at the given commit.
///
/// Scans the remote's advertised ref lines for the first one that contains
/// both the commit hash and the tag marker, in the order the remote returned
/// them. The tag name is everything after the marker, with the annotated-tag
/// dereference suffix (`^{}`) stripped.
///
/// The hash is matched by containment, so a hash that is a prefix of another
/// commit's hash can match that commit's line as well. Callers pass full
/// hashes in practice; the behavior is pinned by tests.
///
/// # Arguments
/// * `lister` - Remote listing capability
/// * `url` - The remote URL to query
/// * `commit_hash` - The commit the tag should point at
///
/// # Returns
/// * `Ok(Some(tag))` - The first matching tag name
/// * `Ok(None)` - No advertised tag points at the commit
/// * `Err` - If the remote listing fails
pub fn find_tag_for_commit(
    lister: &dyn RemoteLister,
    url: &str,
    commit_hash: &str,
) -> Result<Option<String>> {
    let lines = lister.list_remote_refs(url)?;

    for line in &lines {
        if line.contains(commit_hash) && line.contains(TAG_REF_MARKER) {
            if let Some((_, name)) = line.split_once(TAG_REF_MARKER) {
                let tag = name.replace(PEELED_SUFFIX, "");
                tracing::info!("Found tag '{}' for commit {}", tag, commit_hash);
                return Ok(Some(tag));
            }
        }
    }

    tracing::info!("No tag found for commit {}", commit_hash);
    Ok(None)
}
