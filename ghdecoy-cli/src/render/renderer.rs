use ghdecoy_core::CalendarEntry;
use termimad::{
    MadSkin,
    crossterm::style::{Attribute, Color, Stylize},
};

use crate::script::commit_count;

#[derive(Clone)]
pub struct RenderOptions {
    pub use_color: bool,
    /// Also list every synthetic day.
    pub list_days: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self {
            skin: calendar_skin(),
            opts,
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            println!("{md}");
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_entry_line(&self, entry: &CalendarEntry) {
        let mut date = entry.date.format("%a, %d %b %Y").to_string();
        let mut commits = format!("{} commits", entry.count);
        if self.opts.use_color {
            date = date.with(Color::Cyan).to_string();
            commits = commits.with(shade_color(entry.count)).to_string();
        }
        println!("{date} - {commits}");
    }

    /// `12 days, 30 commits` plus, when listing, one line per day.
    pub fn print_summary(&self, user: &str, entries: &[CalendarEntry]) {
        let days = entries.iter().filter(|e| e.count > 0).count();
        self.print_md(&format!("# Decoy for {user}"));
        self.print_info(&format!(
            "{days} days, {} commits",
            commit_count(entries)
        ));
        if self.opts.list_days {
            for entry in entries.iter().filter(|e| e.count > 0) {
                self.print_entry_line(entry);
            }
        }
    }
}

fn calendar_skin() -> MadSkin {
    let mut skin = MadSkin::default();
    skin.headers[0].set_fg(Color::Green);
    skin.headers[0].add_attr(Attribute::Bold);
    skin.table.set_fg(Color::DarkGreen);
    skin
}

/// The calendar's greens, darker for busier days.
fn shade_color(count: i64) -> Color {
    match count {
        ..=0 => Color::Grey,
        1..=3 => Color::Green,
        _ => Color::DarkGreen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shades_get_darker() {
        assert_eq!(shade_color(0), Color::Grey);
        assert_eq!(shade_color(2), Color::Green);
        assert_eq!(shade_color(12), Color::DarkGreen);
    }
}
