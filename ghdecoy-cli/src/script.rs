//! Turns synthetic calendar entries into a shell script of backdated commits.
use anyhow::{Context, Result, bail};
use ghdecoy_core::CalendarEntry;
use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
    process::Command,
};
use tracing::info;

pub const SCRIPT_NAME: &str = "ghdecoy.sh";

/// File every decoy commit appends a line to.
const DECOY_FILE: &str = "decoy";

pub struct ScriptOptions<'a> {
    pub user: &'a str,
    pub repo: &'a str,
    /// Force-push the result to GitHub.
    pub push: bool,
    /// Leave the local repository in place afterwards.
    pub keep: bool,
}

/// Total number of commits the entries stand for.
pub fn commit_count(entries: &[CalendarEntry]) -> i64 {
    entries.iter().map(|e| e.count.max(0)).sum()
}

/// Checks that `name` is safe to use as a GitHub user or repository name
/// inside the generated script.
pub fn check_name(kind: &str, name: &str) -> Result<()> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    if matches!(name, "" | "." | "..") || name.starts_with('-') || !name.chars().all(allowed) {
        bail!("invalid {kind} name `{name}`: only letters, digits, `.`, `_` and `-` are allowed");
    }
    Ok(())
}

/// Renders the script that builds the decoy repository: one commit per unit
/// of each entry's count, authored and committed at the entry's date.
pub fn render_script(entries: &[CalendarEntry], opts: &ScriptOptions) -> Result<String> {
    check_name("user", opts.user)?;
    check_name("repository", opts.repo)?;

    let mut script = String::new();
    writeln!(script, "#!/bin/sh")?;
    writeln!(script, "set -e")?;
    writeln!(script, "REPO='{}'", opts.repo)?;
    writeln!(script, "git init \"$REPO\"")?;
    writeln!(script, "cd \"$REPO\"")?;
    writeln!(script, "touch {DECOY_FILE}")?;
    writeln!(script, "git add {DECOY_FILE}")?;

    for entry in entries {
        let date = entry.date.format("%Y-%m-%dT%H:%M:%S");
        for i in 0..entry.count.max(0) {
            writeln!(script, "echo {i} >> {DECOY_FILE}")?;
            writeln!(
                script,
                "GIT_AUTHOR_DATE={date} GIT_COMMITTER_DATE={date} git commit -a -m \"ghdecoy\" > /dev/null"
            )?;
        }
    }

    writeln!(
        script,
        "git remote add origin \"git@github.com:{}/$REPO.git\"",
        opts.user
    )?;
    // A fresh remote has nothing to pull.
    writeln!(script, "git pull || true")?;
    if opts.push {
        writeln!(script, "git push -f -u origin master")?;
    }
    if !opts.keep {
        writeln!(script, "cd ..")?;
        writeln!(script, "rm -rf \"$REPO\"")?;
    }
    Ok(script)
}

/// Writes `content` to `{dir}/ghdecoy.sh`.
pub fn write_script(dir: &Path, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(SCRIPT_NAME);
    fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Runs `sh ./ghdecoy.sh` inside `dir`.
pub fn run_script(dir: &Path) -> Result<()> {
    info!(dir = %dir.display(), "running {SCRIPT_NAME}");
    let status = Command::new("sh")
        .arg(format!("./{SCRIPT_NAME}"))
        .current_dir(dir)
        .status()
        .with_context(|| format!("running {SCRIPT_NAME} in {}", dir.display()))?;
    if !status.success() {
        bail!("{SCRIPT_NAME} exited with status {status}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn entries() -> Vec<CalendarEntry> {
        vec![
            CalendarEntry::new(NaiveDate::from_ymd_opt(2015, 1, 2).unwrap(), 2),
            CalendarEntry::new(NaiveDate::from_ymd_opt(2015, 1, 3).unwrap(), 0),
            CalendarEntry::new(NaiveDate::from_ymd_opt(2015, 1, 4).unwrap(), 1),
        ]
    }

    fn opts(push: bool, keep: bool) -> ScriptOptions<'static> {
        ScriptOptions {
            user: "tickelton",
            repo: "decoy",
            push,
            keep,
        }
    }

    #[test]
    fn one_commit_per_count() {
        let s = render_script(&entries(), &opts(true, true)).unwrap();
        assert_eq!(s.matches("git commit -a").count(), 3);
        assert_eq!(
            s.matches("GIT_AUTHOR_DATE=2015-01-02T12:00:00 GIT_COMMITTER_DATE=2015-01-02T12:00:00")
                .count(),
            2
        );
        assert!(!s.contains("2015-01-03T12:00:00"));
        assert!(s.starts_with("#!/bin/sh\nset -e\nREPO='decoy'\ngit init \"$REPO\"\n"));
        assert!(s.contains("git remote add origin \"git@github.com:tickelton/$REPO.git\"\n"));
    }

    #[test]
    fn dry_run_does_not_push() {
        let s = render_script(&entries(), &opts(false, true)).unwrap();
        assert!(!s.contains("git push"));
        let s = render_script(&entries(), &opts(true, true)).unwrap();
        assert!(s.ends_with("git push -f -u origin master\n"));
    }

    #[test]
    fn repository_removed_unless_kept() {
        let s = render_script(&entries(), &opts(true, false)).unwrap();
        assert!(s.ends_with("cd ..\nrm -rf \"$REPO\"\n"));
        let s = render_script(&entries(), &opts(true, true)).unwrap();
        assert!(!s.contains("rm -rf"));
    }

    #[test]
    fn names_with_shell_characters_are_rejected() {
        for repo in ["my decoy", "x;rm -rf ~", "$(id)", "a'b", "", "-rf", "..", "../up"] {
            let o = ScriptOptions {
                repo,
                ..opts(true, false)
            };
            assert!(render_script(&entries(), &o).is_err(), "accepted repo {repo:?}");
        }
        let o = ScriptOptions {
            user: "bad user",
            ..opts(true, false)
        };
        assert!(render_script(&entries(), &o).is_err());
    }

    #[test]
    fn usual_names_are_accepted() {
        for name in ["decoy", "my-decoy", "my_decoy.v2", "Tickelton"] {
            assert!(check_name("repository", name).is_ok(), "rejected {name:?}");
        }
    }

    #[test]
    fn script_stops_at_first_failure() {
        let tmp = tempdir().unwrap();
        write_script(tmp.path(), "#!/bin/sh\nset -e\ncd missing\ntouch reached\n").unwrap();
        assert!(run_script(tmp.path()).is_err());
        assert!(!tmp.path().join("reached").exists());
    }

    #[test]
    fn commit_count_ignores_negative() {
        let mut e = entries();
        e.push(CalendarEntry::new(NaiveDate::from_ymd_opt(2015, 1, 5).unwrap(), -4));
        assert_eq!(commit_count(&e), 3);
        assert_eq!(commit_count(&[]), 0);
    }

    #[test]
    fn script_is_written_and_run() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("work");
        let path = write_script(&dir, "#!/bin/sh\necho ok > done.txt\n").unwrap();
        assert_eq!(path, dir.join(SCRIPT_NAME));

        run_script(&dir).unwrap();
        assert_eq!(fs::read_to_string(dir.join("done.txt")).unwrap(), "ok\n");
    }

    #[test]
    fn failing_script_is_an_error() {
        let tmp = tempdir().unwrap();
        write_script(tmp.path(), "exit 3\n").unwrap();
        assert!(run_script(tmp.path()).is_err());
    }
}
