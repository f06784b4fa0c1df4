mod cli;
mod fetch;
mod logging;
mod render;
mod script;

use anyhow::{Context, Result, bail};
use clap::Parser;
use ghdecoy_core::{
    Config, Placement, Policy, Timeframe, is_valid_calendar, parse_calendar, parse_timeframe,
    synthesize,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::process::ExitCode;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::render::{RenderOptions, Renderer, use_color};
use crate::script::{ScriptOptions, commit_count, render_script, run_script, write_script};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ghdecoy: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.apply(Config::load()?);
    let user = config
        .user
        .clone()
        .context("Could not determine username; please use -u")?;
    script::check_name("user", &user)?;
    script::check_name("repository", &config.repo)?;

    let renderer = Renderer::new(RenderOptions {
        use_color: use_color(cli.color),
        list_days: cli.dry_run || cli.verbose > 0,
    });

    let timeframe = resolve_timeframe(&cli)?;
    let placement = if cli.force {
        Placement::Force
    } else {
        match (cli.command, &timeframe) {
            (Policy::Fill, _) => Placement::Fill,
            (Policy::Append, _) => Placement::Append,
            (Policy::Force, _) => Placement::Force,
            (Policy::Timeframe, Some(tf)) => Placement::Timeframe(tf),
            (Policy::Timeframe, None) => bail!("the timeframe command needs a TIMEFRAME argument"),
        }
    };
    info!(%user, repo = %config.repo, policy = placement.policy().as_ref(), "starting");

    let lines = match &cli.calendar {
        Some(path) => fetch::read_calendar(path)?,
        None => fetch::fetch_calendar(&user)?,
    };
    if !is_valid_calendar(&lines) {
        bail!("the calendar retrieved for {user} does not look like a contribution calendar");
    }
    let series = parse_calendar(&lines);

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let synthetic = synthesize(&series, placement, &config.synthesis_options(), &mut rng);

    renderer.print_summary(&user, &synthetic);
    if commit_count(&synthetic) == 0 {
        renderer.print_info("Nothing to do, no commits were generated.");
        return Ok(());
    }

    let script = render_script(
        &synthetic,
        &ScriptOptions {
            user: &user,
            repo: &config.repo,
            push: !cli.dry_run,
            keep: cli.keep,
        },
    )?;
    let path = write_script(&config.work_dir, &script)?;
    info!(path = %path.display(), "wrote script");
    run_script(&config.work_dir)?;

    if cli.dry_run {
        renderer.print_info(&format!(
            "Created {} in {} without pushing it.",
            config.repo,
            config.work_dir.display()
        ));
    } else {
        renderer.print_info(&format!("Pushed {} to github.com/{user}.", config.repo));
    }
    Ok(())
}

/// Parses the TIMEFRAME argument when the timeframe command is used.
fn resolve_timeframe(cli: &Cli) -> Result<Option<Timeframe>> {
    match (&cli.timeframe, cli.command) {
        (Some(text), Policy::Timeframe) => parse_timeframe(text)
            .map(Some)
            .with_context(|| format!("parsing timeframe `{text}`")),
        (Some(text), _) => {
            warn!(timeframe = %text, "ignoring timeframe outside the timeframe command");
            Ok(None)
        }
        (None, _) => Ok(None),
    }
}
