//! Release notification workflow
//!
//! Orchestrates the pipeline: resolve the tag for the released commit, fetch
//! release metadata (falling back to commit metadata), render the message and
//! deliver it. The optional info dump re-derives the same metadata and
//! persists it as JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::domain::RepoLocation;
use crate::error::Result;
use crate::git::{self, RemoteLister};
use crate::github::{Commit, Release, ReleaseHost};
use crate::message;
use crate::slack::{self, WebhookSink};

/// Which record supplied the changelog content for a run.
///
/// The release record wins when it exists and has a non-empty changelog;
/// otherwise the commit record is fetched and used.
#[derive(Debug, Clone)]
pub enum MetadataSource {
    Release(Release),
    Commit(Commit),
}

/// Metadata gathered for one release, immutable once built
#[derive(Debug, Clone)]
pub struct ReleaseData {
    pub tag: Option<String>,
    pub source: MetadataSource,
    pub changelog: Vec<String>,
    pub author: String,
}

/// Fallback dump record written when no release record supplied the metadata
#[derive(Serialize)]
struct FallbackRecord<'a> {
    commit: &'a Commit,
    message: &'a str,
    author: &'a str,
}

/// Gather release metadata for a commit through the fallback chain.
///
/// Resolves the tag pointing at `commit_hash`, fetches the release record
/// for it, and falls back to the commit record when the tag is absent or the
/// release changelog is empty. Exactly one source supplies the changelog.
pub fn gather_release_data(
    lister: &dyn RemoteLister,
    host: &dyn ReleaseHost,
    repo_url: &str,
    location: &RepoLocation,
    commit_hash: &str,
) -> Result<ReleaseData> {
    let tag = git::find_tag_for_commit(lister, repo_url, commit_hash)?;

    if let Some(tag_name) = &tag {
        let release = host.release_by_tag(location, tag_name)?;
        let changelog = release.changelog_lines();
        if !changelog.is_empty() {
            let author = release.author.login.clone();
            return Ok(ReleaseData {
                tag,
                source: MetadataSource::Release(release),
                changelog,
                author,
            });
        }
        tracing::warn!("Release for tag '{}' has an empty changelog", tag_name);
    }

    let commit = host.commit_by_hash(location, commit_hash)?;
    let changelog = vec![commit.commit.message.clone()];
    let author = commit.commit.author.name.clone();

    Ok(ReleaseData {
        tag,
        source: MetadataSource::Commit(commit),
        changelog,
        author,
    })
}

/// Notify every configured webhook about the release.
///
/// Derives the repository location once, gathers metadata through the
/// fallback chain, renders the message and delivers it to each webhook in
/// list order, failing fast on the first delivery error.
pub fn notify_release(
    lister: &dyn RemoteLister,
    host: &dyn ReleaseHost,
    sink: &dyn WebhookSink,
    config: &Config,
) -> Result<()> {
    let location = RepoLocation::parse(&config.git_repo_url)?;

    let data = gather_release_data(lister, host, &config.git_repo_url, &location, &config.git_hash)?;

    let message = message::build_message(
        &config.project_name,
        &config.released_by,
        &config.git_hash,
        &data.author,
        &data.changelog,
    );

    slack::send_to_all(sink, &config.slack_urls, &message)
}

/// Persist the gathered release metadata to `path` as JSON.
///
/// Re-derives the metadata through the same chain as the notify path,
/// independent of whether a notification already ran. When the release
/// record won, the file holds that record; on fallback it holds a record
/// with `commit`, `message` and `author` fields. The destination is
/// overwritten unconditionally.
pub fn dump_release_info(
    lister: &dyn RemoteLister,
    host: &dyn ReleaseHost,
    config: &Config,
    path: &Path,
) -> Result<()> {
    let location = RepoLocation::parse(&config.git_repo_url)?;

    let data = gather_release_data(lister, host, &config.git_repo_url, &location, &config.git_hash)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_pretty_json(&mut writer, &data)?;
    writer.flush()?;

    tracing::info!("Release info written to {}", path.display());
    Ok(())
}

fn write_pretty_json<W: Write>(writer: W, data: &ReleaseData) -> Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);

    match &data.source {
        MetadataSource::Release(release) => release.serialize(&mut serializer)?,
        MetadataSource::Commit(commit) => FallbackRecord {
            commit,
            message: &commit.commit.message,
            author: &commit.commit.author.name,
        }
        .serialize(&mut serializer)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseNotifyError;
    use crate::git::MockRemoteLister;
    use crate::github::{CommitAuthor, CommitDetail, ReleaseAuthor};
    use std::sync::Mutex;

    /// Canned host; records which endpoints were hit
    struct MockHost {
        release: Option<Release>,
        commit: Option<Commit>,
        commit_calls: Mutex<usize>,
    }

    impl MockHost {
        fn new(release: Option<Release>, commit: Option<Commit>) -> Self {
            MockHost {
                release,
                commit,
                commit_calls: Mutex::new(0),
            }
        }

        fn commit_calls(&self) -> usize {
            *self.commit_calls.lock().unwrap()
        }
    }

    impl ReleaseHost for MockHost {
        fn release_by_tag(&self, _location: &RepoLocation, tag: &str) -> Result<Release> {
            self.release.clone().ok_or_else(|| {
                ReleaseNotifyError::config(format!("no release for tag {}", tag))
            })
        }

        fn commit_by_hash(&self, _location: &RepoLocation, hash: &str) -> Result<Commit> {
            *self.commit_calls.lock().unwrap() += 1;
            self.commit.clone().ok_or_else(|| {
                ReleaseNotifyError::config(format!("no commit for hash {}", hash))
            })
        }
    }

    fn release_with_body(body: &str) -> Release {
        Release {
            tag_name: "v1.0.0".to_string(),
            name: Some("v1.0.0".to_string()),
            body: Some(body.to_string()),
            author: ReleaseAuthor {
                login: "octocat".to_string(),
            },
            html_url: None,
        }
    }

    fn commit_record() -> Commit {
        Commit {
            sha: "abcdef".to_string(),
            commit: CommitDetail {
                message: "hotfix: patch".to_string(),
                author: CommitAuthor {
                    name: "Jane Doe".to_string(),
                    email: None,
                    date: None,
                },
            },
        }
    }

    fn tagged_lister() -> MockRemoteLister {
        let mut lister = MockRemoteLister::new();
        lister.add_ref("abcdef", "refs/tags/v1.0.0");
        lister
    }

    fn location() -> RepoLocation {
        RepoLocation {
            organization: "example".to_string(),
            repository: "repo".to_string(),
        }
    }

    const REPO_URL: &str = "https://github.com/example/repo.git";

    #[test]
    fn test_release_wins_when_changelog_non_empty() {
        let lister = tagged_lister();
        let host = MockHost::new(Some(release_with_body("fix bug\nadd feature")), None);

        let data = gather_release_data(&lister, &host, REPO_URL, &location(), "abcdef").unwrap();

        assert_eq!(data.tag, Some("v1.0.0".to_string()));
        assert_eq!(data.changelog, vec!["fix bug", "add feature"]);
        assert_eq!(data.author, "octocat");
        assert!(matches!(data.source, MetadataSource::Release(_)));
        // The commit endpoint is never consulted on the release path
        assert_eq!(host.commit_calls(), 0);
    }

    #[test]
    fn test_falls_back_to_commit_when_untagged() {
        let lister = MockRemoteLister::new();
        let host = MockHost::new(None, Some(commit_record()));

        let data = gather_release_data(&lister, &host, REPO_URL, &location(), "abcdef").unwrap();

        assert_eq!(data.tag, None);
        assert_eq!(data.changelog, vec!["hotfix: patch"]);
        assert_eq!(data.author, "Jane Doe");
        assert!(matches!(data.source, MetadataSource::Commit(_)));
        assert_eq!(host.commit_calls(), 1);
    }

    #[test]
    fn test_falls_back_to_commit_when_changelog_empty() {
        let lister = tagged_lister();
        let host = MockHost::new(Some(release_with_body("")), Some(commit_record()));

        let data = gather_release_data(&lister, &host, REPO_URL, &location(), "abcdef").unwrap();

        // Tag resolved, but the empty release body forces the commit fallback
        assert_eq!(data.tag, Some("v1.0.0".to_string()));
        assert_eq!(data.changelog, vec!["hotfix: patch"]);
        assert_eq!(data.author, "Jane Doe");
        assert!(matches!(data.source, MetadataSource::Commit(_)));
    }

    #[test]
    fn test_release_fetch_failure_propagates() {
        let lister = tagged_lister();
        let host = MockHost::new(None, Some(commit_record()));

        // Tag resolves but the release endpoint fails: no silent fallback
        let result = gather_release_data(&lister, &host, REPO_URL, &location(), "abcdef");
        assert!(result.is_err());
        assert_eq!(host.commit_calls(), 0);
    }

    #[test]
    fn test_dump_writes_release_record_for_tagged_commit() {
        let lister = tagged_lister();
        let host = MockHost::new(Some(release_with_body("fix bug")), None);
        let config = test_config(None);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("release_info.json");

        dump_release_info(&lister, &host, &config, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["tag_name"], "v1.0.0");
        assert_eq!(value["author"]["login"], "octocat");
        // 4-space indentation
        assert!(contents.contains("\n    \"tag_name\""));
    }

    #[test]
    fn test_dump_writes_fallback_record_for_untagged_commit() {
        let lister = MockRemoteLister::new();
        let host = MockHost::new(None, Some(commit_record()));
        let config = test_config(None);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("release_info.json");

        dump_release_info(&lister, &host, &config, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["message"], "hotfix: patch");
        assert_eq!(value["author"], "Jane Doe");
        assert_eq!(value["commit"]["sha"], "abcdef");

        // Stable top-level field order: commit, message, author. The nested
        // commit payload repeats the key names, so compare last occurrences.
        let commit_pos = contents.find("\"commit\"").unwrap();
        let message_pos = contents.rfind("\"message\"").unwrap();
        let author_pos = contents.rfind("\"author\"").unwrap();
        assert!(commit_pos < message_pos && message_pos < author_pos);
    }

    #[test]
    fn test_dump_overwrites_existing_file() {
        let lister = MockRemoteLister::new();
        let host = MockHost::new(None, Some(commit_record()));
        let config = test_config(None);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("release_info.json");

        std::fs::write(&path, "stale contents").unwrap();
        dump_release_info(&lister, &host, &config, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale contents"));
    }

    #[test]
    fn test_dump_fails_when_path_not_writable() {
        let lister = MockRemoteLister::new();
        let host = MockHost::new(None, Some(commit_record()));
        let config = test_config(None);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("release_info.json");

        let result = dump_release_info(&lister, &host, &config, &path);
        assert!(result.is_err());
    }

    fn test_config(dump: Option<std::path::PathBuf>) -> Config {
        Config {
            git_repo_url: REPO_URL.to_string(),
            git_hash: "abcdef".to_string(),
            project_name: "ProjectX".to_string(),
            released_by: "username".to_string(),
            release_bot_token: "token123".to_string(),
            slack_urls: vec!["https://hooks.slack.com/services/XXX".to_string()],
            dump_release_info: dump,
        }
    }
}
