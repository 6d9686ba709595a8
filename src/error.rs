use thiserror::Error;

/// Unified error type for git-timestamp operations
#[derive(Error, Debug)]
pub enum GitTimestampError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported repository: {0}")]
    UnsupportedRepository(String),

    #[error("Could not parse revision count from 'rev-list --count' output: {output}")]
    CommitCountParse { output: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Repository access failed: {0}")]
    RepositoryAccess(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-timestamp
pub type Result<T> = std::result::Result<T, GitTimestampError>;

impl GitTimestampError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitTimestampError::Config(msg.into())
    }

    /// Create an unsupported repository error with context
    pub fn unsupported(msg: impl Into<String>) -> Self {
        GitTimestampError::UnsupportedRepository(msg.into())
    }

    /// Create a template error with context
    pub fn template(msg: impl Into<String>) -> Self {
        GitTimestampError::Template(msg.into())
    }

    /// Create a repository access error with context
    pub fn access(msg: impl Into<String>) -> Self {
        GitTimestampError::RepositoryAccess(msg.into())
    }

    /// Create a commit count parse error carrying the raw command output
    pub fn commit_count(output: impl Into<String>) -> Self {
        GitTimestampError::CommitCountParse {
            output: output.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitTimestampError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GitTimestampError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_commit_count_error_keeps_raw_output() {
        let err = GitTimestampError::commit_count("fatal: bad revision 'HEAD'\n");
        let msg = err.to_string();
        assert!(msg.contains("rev-list --count"));
        assert!(msg.contains("fatal: bad revision 'HEAD'"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (GitTimestampError::config("x"), "Configuration error"),
            (GitTimestampError::unsupported("x"), "Unsupported repository"),
            (GitTimestampError::template("x"), "Template error"),
            (GitTimestampError::access("x"), "Repository access failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_empty_messages() {
        let errors = vec![
            GitTimestampError::config(""),
            GitTimestampError::template(""),
            GitTimestampError::access(""),
        ];

        for err in errors {
            // Even with empty message, the error type prefix should be present
            assert!(!err.to_string().is_empty());
        }
    }
}
