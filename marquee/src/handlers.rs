use anyhow::{Context, bail};
use colored::Colorize;
use marquee_content::HeaderSnapshot;
use marquee_content::sports::Standings;
use marquee_core::header::{HeaderDisplayState, HeaderInputs, HeaderTheme};
use marquee_core::menu::flatten_menu;
use marquee_core::model::{MenuItem, MenuLinkType};
use marquee_core::{PageRecord, RedirectTarget};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

// Helpers for file input

/// Expand a leading `~` in a user supplied path
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Load page records from a JSON file.
///
/// Accepts either a bare array of pages or an object with a `pages` array, which is
/// the shape of a saved `pages` query response.
pub fn load_pages_from_file(path: &Path) -> anyhow::Result<Vec<PageRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pages file {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let pages = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => match map.remove("pages") {
            Some(pages @ Value::Array(_)) => pages,
            _ => bail!("Expected a `pages` array in {}", path.display()),
        },
        _ => bail!("Expected a JSON array of pages in {}", path.display()),
    };

    let pages: Vec<PageRecord> = serde_json::from_value(pages)
        .with_context(|| format!("Malformed page record in {}", path.display()))?;
    if pages.is_empty() {
        bail!("No pages found in {}", path.display());
    }
    Ok(pages)
}

pub fn load_html_snapshot(path: &Path) -> anyhow::Result<HeaderSnapshot> {
    let html = fs::read_to_string(path)
        .with_context(|| format!("Failed to read HTML file {}", path.display()))?;
    Ok(HeaderSnapshot::from_html(&html))
}

/// Parse `--data` for a form submission. It must be a JSON object.
pub fn parse_form_data(raw: &str) -> anyhow::Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw).context("Form data is not valid JSON")? {
        Value::Object(map) => Ok(map),
        other => bail!("Form data must be a JSON object, got {}", json_kind(&other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Turn a raw request path or URL into the form stored in `full_path`.
///
/// Query strings and fragments are dropped, a leading slash is added and a trailing
/// slash removed. The root stays `/`.
pub fn normalize_request_path(raw: &str) -> String {
    let raw = raw.trim();
    let path = match url::Url::parse(raw) {
        Ok(url) if url.has_host() => url.path().to_string(),
        _ => raw.split(['?', '#']).next().unwrap_or_default().to_string(),
    };

    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed)
    }
}

// Report formatting

fn on_off(value: bool) -> colored::ColoredString {
    if value { "on".green().bold() } else { "off".dimmed() }
}

pub fn format_page_paths(pages: &[PageRecord]) -> String {
    let mut sorted: Vec<&PageRecord> = pages.iter().collect();
    sorted.sort_by(|a, b| a.full_path.cmp(&b.full_path));

    let mut report = String::new();
    for page in sorted {
        let path = page.full_path.as_deref().unwrap_or("?");
        let status = if page.is_published() {
            page.status.as_str().green()
        } else {
            page.status.as_str().yellow()
        };
        report.push_str(&format!("  {} {} {}\n", path.bright_white(), page.id.dimmed(), status));
    }
    report.push_str(&format!("\n{} page(s)\n", pages.len()));
    report
}

pub fn format_page(page: &PageRecord) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "{} {}\n",
        "✓".green().bold(),
        page.full_path.as_deref().unwrap_or("?").bright_white()
    ));
    report.push_str(&format!("  id: {}\n", page.id));
    report.push_str(&format!("  slug: {}\n", page.slug));
    report.push_str(&format!("  status: {}\n", page.status.as_str()));
    if let Some(reverse) = page.reverse_header_colors {
        report.push_str(&format!("  reverse header colors: {}\n", reverse));
    }
    report.push_str(&format!("  blocks: {}\n", page.content.blocks.len()));
    report
}

pub fn format_redirect(path: &str, target: Option<&RedirectTarget>) -> String {
    match target {
        Some(target) => format!(
            "{} {} {} {}\n",
            target.status_code().to_string().cyan().bold(),
            path,
            "→".blue(),
            target.destination.bright_white()
        ),
        None => format!("{} no redirect for {}\n", "·".dimmed(), path),
    }
}

pub fn format_menu(items: &[MenuItem]) -> String {
    let mut report = String::new();
    for (depth, item) in flatten_menu(items) {
        let indent = "  ".repeat(depth + 1);
        let target = match (&item.link_type, item.url.as_deref()) {
            (MenuLinkType::Unlinked, _) | (_, None) => "-".dimmed().to_string(),
            (MenuLinkType::External, Some(url)) => format!("{} {}", url, "↗".dimmed()),
            (MenuLinkType::Internal, Some(url)) => url.to_string(),
        };
        report.push_str(&format!("{}{} {}\n", indent, item.label.bright_white(), target));
    }
    report
}

pub fn format_header_state(inputs: HeaderInputs, state: HeaderDisplayState) -> String {
    let mut report = String::new();
    report.push_str(&format!("{}\n", "Inputs".bright_blue().bold()));
    report.push_str(&format!("  transparent header: {}\n", on_off(inputs.is_transparent)));
    report.push_str(&format!("  reverse header colors: {}\n", on_off(inputs.reverse_header_colors)));
    report.push_str(&format!("  scrolled: {}\n", on_off(inputs.scrolled)));
    report.push_str(&format!("{}\n", "Display".bright_blue().bold()));
    report.push_str(&format!("  reverse text: {}\n", on_off(state.apply_reverse_text)));
    report.push_str(&format!("  background: {}\n", on_off(state.apply_background)));
    report.push_str(&format!("  alternate logo: {}\n", on_off(state.swap_logo)));
    report
}

pub fn format_header_theme(theme: &HeaderTheme) -> String {
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let mut report = String::new();
    report.push_str(&format!("{}\n", "On scroll".bright_blue().bold()));
    report.push_str(&format!("  background: {}\n", show(&theme.background_on_scroll)));
    report.push_str(&format!("  text: {}\n", show(&theme.text_on_scroll)));
    report
}

pub fn format_standings(standings: &Standings) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "{} {}\n",
        standings.league.bright_white().bold(),
        standings.season.dimmed()
    ));

    let mut teams: Vec<_> = standings.teams.iter().collect();
    teams.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.name.cmp(&b.name)));
    for (rank, team) in teams.iter().enumerate() {
        report.push_str(&format!(
            "  {:>2}. {:<24} P{:<3} W{:<3} D{:<3} L{:<3} {} pts\n",
            rank + 1,
            team.name,
            team.played,
            team.wins,
            team.draws,
            team.losses,
            team.points
        ));
    }
    report
}
