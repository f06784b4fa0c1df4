use std::path::PathBuf;

use clap::Parser;
use ghdecoy_core::{Config, Policy};

use crate::render::ColorMode;

/// ghdecoy: populate your GitHub contribution calendar
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Where to put commits: `fill` fills every run of empty days, `append`
    /// only the empty days after the last contribution, `timeframe` the dates
    /// given in TIMEFRAME, `force` every day but today.
    #[arg(value_parser = parse_policy)]
    pub command: Policy,
    /// Dates for `timeframe`, e.g. `20160301,20160305-20160307`.
    #[arg(required_if_eq("command", "timeframe"))]
    pub timeframe: Option<String>,

    /// Just create the decoy repository, don't push it to GitHub.
    #[arg(long, short = 'n')]
    pub dry_run: bool,
    /// Keep the local decoy repository after the run.
    #[arg(long, short)]
    pub keep: bool,
    /// Add commits to every day but today, even days with contributions.
    #[arg(long, short)]
    pub force: bool,
    /// Highest shade (1-4) a filled day may reach.
    #[arg(long, short = 's')]
    pub max_shade: Option<u32>,
    /// Only fill runs of at least this many empty days.
    #[arg(long, short)]
    pub min_days: Option<usize>,
    /// Directory to craft the decoy repository in.
    #[arg(long, short = 'd')]
    pub work_dir: Option<PathBuf>,
    /// GitHub user whose calendar is read (defaults to `$USER`).
    #[arg(long, short, env = "GHDECOY_USER")]
    pub user: Option<String>,
    /// Repository the commits are pushed to (default `decoy`).
    #[arg(long, short)]
    pub repo: Option<String>,
    /// Read the calendar markup from a file instead of fetching it.
    #[arg(long, short)]
    pub calendar: Option<PathBuf>,
    /// Seed for the random generator, for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Command line flags win over the config file.
    pub fn apply(&self, config: Config) -> Config {
        Config {
            user: self.user.clone().or(config.user),
            repo: self.repo.clone().unwrap_or(config.repo),
            work_dir: self.work_dir.clone().unwrap_or(config.work_dir),
            min_days: self.min_days.unwrap_or(config.min_days),
            max_shade: self.max_shade.unwrap_or(config.max_shade),
        }
    }
}

fn parse_policy(s: &str) -> Result<Policy, String> {
    s.parse::<Policy>()
        .map_err(|_| format!("invalid command `{s}` (expected one of {})", Policy::names()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            user: Some("tickelton".to_string()),
            repo: "decoy".to_string(),
            work_dir: PathBuf::from("/tmp"),
            min_days: 1,
            max_shade: 4,
        }
    }

    #[test]
    fn all_args() {
        let cli = Cli::try_parse_from([
            "ghdecoy", "-k", "-n", "-d", "/fake/dir", "-m", "99", "-r", "testrepo", "-s", "2",
            "-u", "testuser", "append",
        ])
        .unwrap();
        assert!(cli.dry_run);
        assert!(cli.keep);
        assert_eq!(cli.command, Policy::Append);

        let c = cli.apply(base_config());
        assert_eq!(c.work_dir, PathBuf::from("/fake/dir"));
        assert_eq!(c.min_days, 99);
        assert_eq!(c.repo, "testrepo");
        assert_eq!(c.max_shade, 2);
        assert_eq!(c.user.as_deref(), Some("testuser"));
    }

    #[test]
    fn no_flags_keep_config() {
        let cli = Cli::try_parse_from(["ghdecoy", "fill"]).unwrap();
        let c = cli.apply(base_config());
        assert_eq!(c.repo, "decoy");
        assert_eq!(c.max_shade, 4);
        assert!(!cli.force);
    }

    #[test]
    fn invalid_shade_is_accepted_then_clamped() {
        let cli = Cli::try_parse_from(["ghdecoy", "-s", "99", "fill"]).unwrap();
        let c = cli.apply(base_config());
        assert_eq!(c.synthesis_options().max_shade, 4);
    }

    #[test]
    fn missing_command_fails() {
        assert!(Cli::try_parse_from(["ghdecoy", "-u", "tickelton"]).is_err());
    }

    #[test]
    fn invalid_command_fails() {
        let err = Cli::try_parse_from(["ghdecoy", "sprinkle"]).unwrap_err();
        assert!(err.to_string().contains("fill, append, timeframe, force"));
    }

    #[test]
    fn force_is_a_command() {
        let cli = Cli::try_parse_from(["ghdecoy", "force"]).unwrap();
        assert_eq!(cli.command, Policy::Force);
        assert!(!cli.force);
    }

    #[test]
    fn unknown_flag_fails() {
        assert!(Cli::try_parse_from(["ghdecoy", "-x", "fill"]).is_err());
    }

    #[test]
    fn timeframe_requires_dates() {
        assert!(Cli::try_parse_from(["ghdecoy", "timeframe"]).is_err());
        let cli = Cli::try_parse_from(["ghdecoy", "timeframe", "20160305-20160307"]).unwrap();
        assert_eq!(cli.command, Policy::Timeframe);
        assert_eq!(cli.timeframe.as_deref(), Some("20160305-20160307"));
    }
}
