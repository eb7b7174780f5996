use git2::Direction;

use crate::error::Result;
use crate::git::RemoteLister;

/// Real remote listing backed by the `git2` crate.
///
/// Connects to the remote anonymously (no local repository required) and
/// formats its ref advertisement into the same `<oid>\t<refname>` lines
/// `git ls-remote` would print, peeled `^{}` entries included.
pub struct GitRemoteLister;

impl RemoteLister for GitRemoteLister {
    fn list_remote_refs(&self, url: &str) -> Result<Vec<String>> {
        tracing::debug!("Listing remote refs for {}", url);

        let mut remote = git2::Remote::create_detached(url)?;
        remote.connect(Direction::Fetch)?;

        let lines = remote
            .list()?
            .iter()
            .map(|head| format!("{}\t{}", head.oid(), head.name()))
            .collect();

        Ok(lines)
    }
}
