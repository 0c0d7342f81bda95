//! ghex - find(1) for a GitHub owner's repositories and gists.

mod output;

use anyhow::Context;
use clap::Parser;
use gh_api_client::GitHubClient;
use ghex_core::{explore, Config, ExploreError, ExploreOptions, ExplorePlan, FilterOptions};
use std::path::PathBuf;
use tracing::debug;

/// Walk a GitHub owner's gists and repositories, print the ones that match.
#[derive(Parser, Debug)]
#[command(name = "ghex")]
#[command(about = "find(1) for a GitHub owner's repositories and gists")]
#[command(version)]
struct Cli {
    /// `owner`, `owner/` or `owner/repo`
    target: String,

    /// Only explore one kind of item (ignored for `owner/repo`)
    #[arg(long = "type", value_name = "TYPE", value_parser = ["r", "repo", "g", "gist"])]
    kind: Option<String>,

    /// Language must match this regex (anchored at the start)
    #[arg(long, value_name = "REGEX")]
    language: Option<String>,

    /// Name must match this regex (anchored at the start)
    #[arg(long, value_name = "REGEX")]
    name: Option<String>,

    /// Run COMMAND for each match, `{}` is replaced by the item
    #[arg(long, value_name = "COMMAND")]
    exec: Option<String>,

    /// GitHub access token
    #[arg(long, env = "GITHUB_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Separate records with NUL instead of newline
    #[arg(short = '0', long)]
    null_terminated: bool,

    /// Only repositories with open issues
    #[arg(long)]
    has_issues: bool,

    /// Print the owner's repository and gist totals
    #[arg(long)]
    count: bool,

    /// Print how many items of each kind matched
    #[arg(long)]
    sum: bool,

    /// Print a short representation instead of JSON
    #[arg(long)]
    repr: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log line format
    #[arg(long, value_enum, default_value_t = output::LogFormatArg::Compact)]
    log_format: output::LogFormatArg,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Configuration file (default: <config dir>/ghex/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn explore_options(&self) -> ExploreOptions {
        ExploreOptions {
            target: self.target.clone(),
            kind: self.kind.clone(),
            filters: FilterOptions {
                name: self.name.clone(),
                language: self.language.clone(),
                has_issues: self.has_issues,
            },
            exec: self.exec.clone(),
            null_terminated: self.null_terminated,
            count: self.count,
            sum: self.sum,
            repr: self.repr,
        }
    }

    fn token(&self) -> Option<String> {
        self.access_token
            .as_ref()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    observability::init_with_config(observability::LogConfig {
        service_name: "ghex".into(),
        default_level: cli.log_level.clone().unwrap_or(config.log_level.clone()),
        format: cli.log_format.into(),
        log_path: cli.log_file.clone(),
    })
    .context("failed to initialize logging")?;

    let plan = ExplorePlan::build(&cli.explore_options())?;
    debug!(target_owner = %plan.target, mode = ?plan.mode, "plan ready");

    let client = GitHubClient::new(config.client_config(cli.token())).map_err(ExploreError::from)?;
    debug!(api_url = %config.api_url, authenticated = client.is_authenticated(), "client ready");

    explore(&client, &plan, output::records()).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        std::process::exit(output::print_error(&e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("ghex").chain(args.iter().copied()))
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn target_is_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn full_flag_surface() {
        let cli = parse(&[
            "octocat/",
            "--type",
            "repo",
            "--language",
            "Rust",
            "--name",
            "^he",
            "--exec",
            "echo {}",
            "-0",
            "--has-issues",
            "--repr",
        ])
        .unwrap();

        let options = cli.explore_options();
        assert_eq!(options.target, "octocat/");
        assert_eq!(options.kind.as_deref(), Some("repo"));
        assert_eq!(options.filters.language.as_deref(), Some("Rust"));
        assert_eq!(options.filters.name.as_deref(), Some("^he"));
        assert!(options.filters.has_issues);
        assert_eq!(options.exec.as_deref(), Some("echo {}"));
        assert!(options.null_terminated);
        assert!(options.repr);
        assert!(!options.count && !options.sum);
    }

    #[test]
    fn long_null_terminated_flag() {
        assert!(parse(&["octocat", "--null-terminated"]).unwrap().null_terminated);
    }

    #[test]
    fn unknown_type_is_rejected_by_parser() {
        assert!(parse(&["octocat", "--type", "user"]).is_err());
    }

    #[test]
    fn count_and_sum_is_a_validation_error() {
        let cli = parse(&["octocat", "--count", "--sum"]).unwrap();
        let err = ExplorePlan::build(&cli.explore_options()).unwrap_err();
        assert!(matches!(err, ExploreError::ConflictingModes));
        assert_eq!(output::exit_code(&anyhow::Error::from(err)), 1);
    }

    #[test]
    fn explicit_token_flag() {
        let cli = parse(&["octocat", "--access-token", " abc \n"]).unwrap();
        assert_eq!(cli.token().as_deref(), Some("abc"));

        let cli = parse(&["octocat", "--access-token", "  "]).unwrap();
        assert_eq!(cli.token(), None);
    }

    #[test]
    fn ambient_flags() {
        let cli = parse(&[
            "octocat",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--log-file",
            "/tmp/ghex.log",
            "--config",
            "/tmp/ghex.json",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.log_format, output::LogFormatArg::Json));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/ghex.log")));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/ghex.json")));
    }

    #[test]
    fn help_names_token_env_var() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("GITHUB_ACCESS_TOKEN"));
        assert!(help.contains("--null-terminated"));
    }
}
