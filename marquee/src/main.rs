use anyhow::{Context, anyhow, bail};
use clap::ArgMatches;
use colored::Colorize;
use commands::command_argument_builder;
use indicatif::{ProgressBar, ProgressStyle};
use marquee::handlers::*;
use marquee_content::{
    ClientConfig, ContentClient, FormRelay, FormSubmission, GraphQlClient, RedirectLookup,
    SportsClient,
};
use marquee_core::header::{HeaderContext, PageScope};
use marquee_core::model::HeaderSettings;
use marquee_core::{PageRecord, build_page_paths, find_page_by_path};
use std::time::Duration;
use tracing::{Level, debug};
use url::Url;

mod commands;

#[tokio::main]
async fn main() {
    let matches = command_argument_builder().get_matches();
    init_tracing(matches.get_count("verbose"));

    let result = match matches.subcommand() {
        Some(("paths", sub_matches)) => handle_paths(sub_matches).await,
        Some(("resolve", sub_matches)) => handle_resolve(sub_matches).await,
        Some(("redirect", sub_matches)) => handle_redirect(sub_matches).await,
        Some(("menu", sub_matches)) => handle_menu(sub_matches).await,
        Some(("header-state", sub_matches)) => handle_header_state(sub_matches),
        Some(("standings", sub_matches)) => handle_standings(sub_matches).await,
        Some(("submit-form", sub_matches)) => handle_submit_form(sub_matches).await,
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message.to_string());
    spinner
}

// Global options, propagated to every subcommand

fn store_id(args: &ArgMatches) -> &str {
    args.get_one::<String>("store")
        .map(String::as_str)
        .unwrap_or("default")
}

fn timeout(args: &ArgMatches) -> Duration {
    Duration::from_secs(*args.get_one::<u64>("timeout").unwrap_or(&10))
}

fn content_config(args: &ArgMatches) -> anyhow::Result<ClientConfig> {
    let endpoint = args
        .get_one::<Url>("api-url")
        .cloned()
        .ok_or_else(|| anyhow!("No content API configured, pass --api-url or set MARQUEE_API_URL"))?;
    Ok(ClientConfig::new(endpoint).with_timeout(timeout(args)))
}

async fn load_pages(args: &ArgMatches) -> anyhow::Result<Vec<PageRecord>> {
    if let Some(file) = args.get_one::<String>("file") {
        let path = expand_path(file);
        debug!("Loading pages from {}", path.display());
        return Ok(build_page_paths(&load_pages_from_file(&path)?));
    }

    let client = ContentClient::new(&content_config(args)?)?;
    let spinner = spinner("Fetching pages...");
    let pages = client.try_pages_with_paths(store_id(args)).await;
    spinner.finish_and_clear();
    Ok(pages?)
}

async fn handle_paths(args: &ArgMatches) -> anyhow::Result<()> {
    let pages = load_pages(args).await?;
    print!("{}", format_page_paths(&pages));
    Ok(())
}

async fn handle_resolve(args: &ArgMatches) -> anyhow::Result<()> {
    let raw = args
        .get_one::<String>("PATH")
        .context("a request path is required")?;
    let path = normalize_request_path(raw);
    let pages = load_pages(args).await?;

    match find_page_by_path(&pages, &path) {
        Some(page) => {
            print!("{}", format_page(page));
            Ok(())
        }
        None => bail!("No page found at {}", path),
    }
}

async fn handle_redirect(args: &ArgMatches) -> anyhow::Result<()> {
    let raw = args
        .get_one::<String>("PATH")
        .context("a request path is required")?;
    let path = normalize_request_path(raw);
    let lookup = RedirectLookup::new(GraphQlClient::new(&content_config(args)?)?);

    let spinner = spinner("Looking up redirect...");
    let target = lookup.try_lookup(store_id(args), &path).await;
    spinner.finish_and_clear();

    print!("{}", format_redirect(&path, target?.as_ref()));
    Ok(())
}

async fn handle_menu(args: &ArgMatches) -> anyhow::Result<()> {
    let menu_id = args
        .get_one::<String>("menu")
        .context("a menu id is required")?;
    let client = ContentClient::new(&content_config(args)?)?;

    let spinner = spinner("Fetching menu and pages...");
    let menu = client.try_menu_with_paths(store_id(args), menu_id).await;
    spinner.finish_and_clear();

    let menu = menu?.ok_or_else(|| anyhow!("Menu {} not found", menu_id))?;
    println!("{}", menu.name.bright_white().bold());
    print!("{}", format_menu(&menu.items));
    Ok(())
}

fn handle_header_state(args: &ArgMatches) -> anyhow::Result<()> {
    let scroll_y = *args.get_one::<f64>("scroll-y").unwrap_or(&0.0);

    if let Some(file) = args.get_one::<String>("html") {
        let snapshot = load_html_snapshot(&expand_path(file))?;
        let context = snapshot
            .context()
            .ok_or_else(|| anyhow!("No element with data-header-transparent in {}", file))?;
        context.on_scroll(scroll_y);

        let inputs = context.inputs();
        print!("{}", format_header_state(inputs, inputs.derive()));
        print!("{}", format_header_theme(&snapshot.theme(&HeaderSettings::default())));
        return Ok(());
    }

    let context = HeaderContext::new(args.get_flag("transparent"));
    let page = PageScope::mount(&context, Some(args.get_flag("reverse")));
    context.on_scroll(scroll_y);
    debug!(
        "Page mounted with reverse_header_colors={}",
        page.reverse_header_colors()
    );

    let inputs = context.inputs();
    print!("{}", format_header_state(inputs, inputs.derive()));
    page.unmount();
    Ok(())
}

async fn handle_standings(args: &ArgMatches) -> anyhow::Result<()> {
    let base_url = args
        .get_one::<Url>("sports-url")
        .cloned()
        .context("a sports API URL is required")?;
    let league = args.get_one::<String>("league").context("a league is required")?;
    let season = args.get_one::<String>("season").context("a season is required")?;
    let client = SportsClient::new(&ClientConfig::new(base_url).with_timeout(timeout(args)))?;

    let spinner = spinner("Fetching standings...");
    let standings = client.standings(league, season).await;
    spinner.finish_and_clear();

    print!("{}", format_standings(&*standings?));
    Ok(())
}

async fn handle_submit_form(args: &ArgMatches) -> anyhow::Result<()> {
    let form_id = args.get_one::<String>("form").context("a form id is required")?;
    let data = args.get_one::<String>("data").context("form data is required")?;
    let submission = FormSubmission {
        store_id: store_id(args).to_string(),
        form_id: form_id.clone(),
        form_data: parse_form_data(data)?,
    };

    let graphql = GraphQlClient::new(&content_config(args)?)?;
    let relay = FormRelay::new(graphql.clone());

    let spinner = spinner("Submitting form...");
    let outcome = if args.get_flag("check") {
        let form = ContentClient::from_graphql(graphql)
            .try_form(&submission.store_id, form_id)
            .await;
        match form {
            Ok(Some(form)) => relay.submit_checked(&form, &submission).await,
            Ok(None) => {
                spinner.finish_and_clear();
                bail!("Form {} not found", form_id);
            }
            Err(e) => {
                spinner.finish_and_clear();
                return Err(e.into());
            }
        }
    } else {
        relay.submit(&submission).await
    };
    spinner.finish_and_clear();

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    if !outcome.is_success() {
        bail!("Form submission rejected with status {}", outcome.status_code());
    }
    println!("{} {}", "✓".green().bold(), outcome.status_code());
    Ok(())
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
