use crate::error::Result;
use crate::git::RemoteLister;

/// Mock remote lister for testing without network access
pub struct MockRemoteLister {
    lines: Vec<String>,
    failure: Option<String>,
}

impl MockRemoteLister {
    /// Create a mock advertising no refs
    pub fn new() -> Self {
        MockRemoteLister {
            lines: Vec::new(),
            failure: None,
        }
    }

    /// Create a mock advertising the given pre-formatted lines
    pub fn with_lines(lines: Vec<String>) -> Self {
        MockRemoteLister {
            lines,
            failure: None,
        }
    }

    /// Create a mock whose listing always fails
    pub fn failing(message: impl Into<String>) -> Self {
        MockRemoteLister {
            lines: Vec::new(),
            failure: Some(message.into()),
        }
    }

    /// Add an advertised ref line
    pub fn add_ref(&mut self, oid: impl Into<String>, refname: impl Into<String>) {
        self.lines
            .push(format!("{}\t{}", oid.into(), refname.into()));
    }
}

impl Default for MockRemoteLister {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteLister for MockRemoteLister {
    fn list_remote_refs(&self, _url: &str) -> Result<Vec<String>> {
        match &self.failure {
            Some(message) => Err(git2::Error::from_str(message).into()),
            None => Ok(self.lines.clone()),
        }
    }
}
