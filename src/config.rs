use std::path::PathBuf;

use clap::Parser;

use crate::error::{ReleaseNotifyError, Result};

/// Command-line arguments.
///
/// Every required value can also be supplied through its environment
/// variable; an explicit flag wins over the environment. Missing values are
/// rejected by clap before any network call is made.
#[derive(Parser, Debug)]
#[command(
    name = "release-notify",
    about = "Notify Slack when a release has been deployed",
    long_about = None,
    version
)]
pub struct Args {
    #[arg(long, env = "GIT_REPO_URL", help = "The git repository URL")]
    pub git_repo_url: String,

    #[arg(long, env = "GIT_HASH", help = "The commit hash of the build")]
    pub git_hash: String,

    #[arg(long, env = "PROJECT_NAME", help = "The project name")]
    pub project_name: String,

    #[arg(long, env = "RELEASED_BY", help = "The user who released")]
    pub released_by: String,

    #[arg(
        long,
        env = "RELEASE_BOT_TOKEN",
        hide_env_values = true,
        help = "Token for accessing the GitHub API"
    )]
    pub release_bot_token: String,

    #[arg(
        long,
        env = "SLACK_URL_RELEASE",
        help = "One or more Slack webhook URLs, separated by commas"
    )]
    pub slack_url_release: String,

    #[arg(long, help = "File path to dump the release information")]
    pub dump_release_info: Option<PathBuf>,
}

/// Validated runtime configuration handed to the pipeline
#[derive(Debug, Clone)]
pub struct Config {
    pub git_repo_url: String,
    pub git_hash: String,
    pub project_name: String,
    pub released_by: String,
    pub release_bot_token: String,
    pub slack_urls: Vec<String>,
    pub dump_release_info: Option<PathBuf>,
}

impl Config {
    /// Validate parsed arguments into a runtime configuration.
    ///
    /// Splits the webhook URL list on commas and rejects values that are
    /// present but empty (e.g. an environment variable set to ""), so the
    /// pipeline never starts with unusable inputs.
    pub fn from_args(args: Args) -> Result<Self> {
        let required = [
            ("--git-repo-url", &args.git_repo_url),
            ("--git-hash", &args.git_hash),
            ("--project-name", &args.project_name),
            ("--released-by", &args.released_by),
            ("--release-bot-token", &args.release_bot_token),
            ("--slack-url-release", &args.slack_url_release),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ReleaseNotifyError::config(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }

        let slack_urls: Vec<String> = args
            .slack_url_release
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect();

        if slack_urls.is_empty() {
            return Err(ReleaseNotifyError::config(
                "--slack-url-release contains no webhook URLs",
            ));
        }

        Ok(Config {
            git_repo_url: args.git_repo_url,
            git_hash: args.git_hash,
            project_name: args.project_name,
            released_by: args.released_by,
            release_bot_token: args.release_bot_token,
            slack_urls,
            dump_release_info: args.dump_release_info,
        })
    }
}
