use clap::Parser;
use tracing_subscriber::EnvFilter;

use release_notify::config::{Args, Config};
use release_notify::error::ErrorCategory;
use release_notify::git::GitRemoteLister;
use release_notify::github::GithubClient;
use release_notify::slack::SlackWebhook;
use release_notify::{notify, ui};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        let message = match e.category() {
            ErrorCategory::Network => format!("Network Error: {}", e),
            ErrorCategory::Value => format!("Value Error: {}", e),
            ErrorCategory::Unexpected => format!("Unexpected Error: {}", e),
        };
        ui::display_error(&message);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> release_notify::Result<()> {
    let lister = GitRemoteLister;
    let host = GithubClient::new(config.release_bot_token.as_str())?;
    let sink = SlackWebhook::new()?;

    ui::display_status(&format!(
        "Notifying release of {} at commit {}",
        config.project_name, config.git_hash
    ));
    notify::notify_release(&lister, &host, &sink, config)?;
    ui::display_success(&format!(
        "Release notification sent to {} webhook(s)",
        config.slack_urls.len()
    ));

    if let Some(path) = &config.dump_release_info {
        notify::dump_release_info(&lister, &host, config, path)?;
        ui::display_success(&format!("Release info written to {}", path.display()));
    }

    Ok(())
}
