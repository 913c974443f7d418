// Box-drawn results table
use chrono::{DateTime, Utc};
use crossterm::style::{style, StyledContent, Stylize};
use goodfirst_core::EnrichedIssue;

use crate::format::{format_age, format_stars, AgeBand};
use crate::width::{pad_end, pad_start, slice_width, truncate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

struct Column {
    header: &'static str,
    width: usize,
    align: Align,
}

const COLUMNS: [Column; 7] = [
    Column { header: "Repo", width: 30, align: Align::Left },
    Column { header: "Language", width: 12, align: Align::Left },
    Column { header: "Stars", width: 6, align: Align::Right },
    Column { header: "#", width: 6, align: Align::Right },
    Column { header: "Title", width: 40, align: Align::Left },
    Column { header: "Age", width: 7, align: Align::Right },
    Column { header: "Comments", width: 8, align: Align::Right },
];

const REPO: usize = 0;
const LANGUAGE: usize = 1;
const STARS: usize = 2;
const INDEX: usize = 3;
const TITLE: usize = 4;
const AGE: usize = 5;
const COMMENTS: usize = 6;

/// Renders enriched issues as a fixed-width table.
///
/// Cells are padded before styling so ANSI escapes never count toward a
/// column's width; with color off the layout is identical.
#[derive(Debug, Clone, Copy)]
pub struct TableRenderer {
    color: bool,
}

impl TableRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Color on unless `NO_COLOR` is set to anything non-empty
    pub fn from_env() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::new(!no_color)
    }

    pub fn render(&self, issues: &[EnrichedIssue], now: DateTime<Utc>) -> String {
        let mut lines = Vec::with_capacity(issues.len() + 7);

        lines.push(border('┌', '┬', '┐'));
        lines.push(self.header_row());
        lines.push(border('├', '┼', '┤'));
        lines.extend(
            issues
                .iter()
                .enumerate()
                .map(|(i, issue)| self.issue_row(issue, i + 1, now)),
        );
        lines.push(border('└', '┴', '┘'));
        lines.push(String::new());
        lines.push(self.paint(
            format!(
                "Showing {} issues. Run good-first-issue open <n> to open in browser.",
                issues.len()
            ),
            |s| s.dim(),
        ));

        lines.join("\n")
    }

    fn header_row(&self) -> String {
        let cells = COLUMNS
            .iter()
            .map(|column| self.paint(fit(column, column.header.to_string()), |s| s.bold()));
        row(cells)
    }

    fn issue_row(&self, issue: &EnrichedIssue, index: usize, now: DateTime<Utc>) -> String {
        let created_at = issue.issue.created_at;

        let repo = truncate(&issue.repo, COLUMNS[REPO].width);
        let language = slice_width(&issue.language, COLUMNS[LANGUAGE].width).to_string();
        let title = truncate(&issue.issue.title, COLUMNS[TITLE].width);

        let cells = [
            self.paint(fit(&COLUMNS[REPO], repo), |s| s.cyan()),
            self.paint(fit(&COLUMNS[LANGUAGE], language), |s| s.dim()),
            fit(&COLUMNS[STARS], format_stars(issue.stargazers_count)),
            self.paint(fit(&COLUMNS[INDEX], format!("#{}", index)), |s| s.dim()),
            fit(&COLUMNS[TITLE], title),
            self.paint(fit(&COLUMNS[AGE], format_age(created_at, now)), |s| {
                match AgeBand::of(created_at, now) {
                    AgeBand::Fresh => s.green(),
                    AgeBand::Recent => s.yellow(),
                    AgeBand::Stale => s.red(),
                }
            }),
            fit(&COLUMNS[COMMENTS], issue.issue.comments.to_string()),
        ];

        row(cells)
    }

    fn paint<F>(&self, text: String, styler: F) -> String
    where
        F: FnOnce(StyledContent<String>) -> StyledContent<String>,
    {
        if self.color {
            styler(style(text)).to_string()
        } else {
            text
        }
    }
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

fn fit(column: &Column, text: String) -> String {
    match column.align {
        Align::Left => pad_end(&text, column.width),
        Align::Right => pad_start(&text, column.width),
    }
}

fn row<I>(cells: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let cells: Vec<String> = cells.into_iter().collect();
    format!("│ {} │", cells.join(" │ "))
}

fn border(left: char, join: char, right: char) -> String {
    let segments: Vec<String> = COLUMNS
        .iter()
        .map(|column| "─".repeat(column.width + 2))
        .collect();
    format!("{}{}{}", left, segments.join(&join.to_string()), right)
}
