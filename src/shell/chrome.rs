//! Header and footer shown around every page.

use chrono::{Datelike, Local};
use crossterm::style::Stylize;

use crate::content::{OWNER_NAME, SITE_NAME, SOCIAL_LINKS};
use crate::cursor::hyperlink;
use crate::nav::{NAV_LINKS, NavLink, NavigationState};
use crate::width::{display_width, truncate_display};

fn link_label(index: usize, link: &NavLink, nav: &NavigationState) -> String {
    let label = format!("[{}] {}", index + 1, link.label);
    if nav.is_active(link.path) {
        label.bold().cyan().reverse().to_string()
    } else {
        label
    }
}

fn rule(width: u16) -> String {
    "─".repeat(width as usize).dark_grey().to_string()
}

/// Header lines for a terminal `width` columns wide.
///
/// Wide terminals show every link on the logo line. In `compact` mode the
/// links are listed under the logo only while the menu is open. An active
/// address prompt replaces the links.
pub fn header_lines(nav: &NavigationState, width: u16, compact: bool, prompt: Option<&str>) -> Vec<String> {
    let logo = SITE_NAME.bold().magenta().to_string();
    let mut lines = Vec::new();

    if let Some(buffer) = prompt {
        lines.push(format!("{logo}   Go to: {buffer}█"));
        lines.push("Enter to follow · Esc to cancel".dark_grey().to_string());
    } else if compact {
        let toggle = if nav.menu_open() {
            "[m] ✕ Close"
        } else {
            "[m] ☰ Menu"
        };
        let gap = (width as usize).saturating_sub(display_width(&logo) + display_width(toggle));
        lines.push(format!("{logo}{}{}", " ".repeat(gap.max(1)), toggle.yellow()));
        if nav.menu_open() {
            for (index, link) in NAV_LINKS.iter().enumerate() {
                lines.push(format!("  {}", link_label(index, link, nav)));
            }
        }
    } else {
        let links: Vec<String> = NAV_LINKS
            .iter()
            .enumerate()
            .map(|(index, link)| link_label(index, link, nav))
            .collect();
        lines.push(format!("{logo}   {}", links.join("  ")));
    }

    lines.push(rule(width));
    lines
        .into_iter()
        .map(|line| truncate_display(&line, width as usize))
        .collect()
}

pub fn current_year() -> i32 {
    Local::now().year()
}

/// Footer lines: copyright, social links and key hints.
pub fn footer_lines(width: u16, year: i32) -> Vec<String> {
    let socials: Vec<String> = SOCIAL_LINKS
        .iter()
        .map(|link| hyperlink(link.url, link.name))
        .collect();
    let lines = vec![
        rule(width),
        format!("© {year} {OWNER_NAME} All rights reserved."),
        socials.join(" · "),
        format!(
            "{}  {}",
            "Built with Rust".dark_grey(),
            "[g] go to · [↑↓] scroll · [q] quit".dark_grey()
        ),
    ];
    lines
        .into_iter()
        .map(|line| {
            if display_width(&line) > width as usize {
                truncate_display(&line, width as usize)
            } else {
                line
            }
        })
        .collect()
}
