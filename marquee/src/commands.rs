use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("marquee")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("marquee")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-v --"verbose" ...)
                .help("Increase log verbosity (-v info, -vv debug)")
                .global(true),
        )
        .arg(
            arg!(--"api-url" <URL>)
                .required(false)
                .help("GraphQL content API endpoint")
                .env("MARQUEE_API_URL")
                .value_parser(clap::value_parser!(Url))
                .global(true),
        )
        .arg(
            arg!(--"store" <STORE_ID>)
                .required(false)
                .help("Store whose content is queried")
                .env("MARQUEE_STORE_ID")
                .default_value("default")
                .global(true),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("10")
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(
            command!("paths")
                .about("Resolve and list the full path of every published page")
                .arg(
                    arg!(-f --"file" <PATH>)
                        .required(false)
                        .help("Read pages from a JSON file instead of the content API"),
                ),
        )
        .subcommand(
            command!("resolve")
                .about("Find the page served at a request path")
                .arg(arg!(<PATH>).help("Request path or URL, e.g. /about/team"))
                .arg(
                    arg!(-f --"file" <PATH>)
                        .required(false)
                        .help("Read pages from a JSON file instead of the content API"),
                ),
        )
        .subcommand(
            command!("redirect")
                .about("Look up the redirect configured for a request path")
                .arg(arg!(<PATH>).help("Request path or URL")),
        )
        .subcommand(
            command!("menu")
                .about("Print a menu with internal links resolved to page paths")
                .arg(
                    arg!(-m --"menu" <MENU_ID>)
                        .required(true)
                        .help("The menu to fetch"),
                ),
        )
        .subcommand(
            command!("header-state")
                .about("Derive header display state from page and scroll inputs")
                .arg(
                    arg!(--"transparent")
                        .required(false)
                        .help("The header has no background of its own")
                        .action(clap::ArgAction::SetTrue)
                        .conflicts_with("html"),
                )
                .arg(
                    arg!(--"reverse")
                        .required(false)
                        .help("The page asks for reversed header colors")
                        .action(clap::ArgAction::SetTrue)
                        .conflicts_with("html"),
                )
                .arg(
                    arg!(--"scroll-y" <PIXELS>)
                        .required(false)
                        .help("Vertical scroll offset")
                        .value_parser(clap::value_parser!(f64))
                        .allow_negative_numbers(true)
                        .default_value("0"),
                )
                .arg(
                    arg!(--"html" <PATH>)
                        .required(false)
                        .help("Read header attributes and scroll colors from rendered markup"),
                ),
        )
        .subcommand(
            command!("standings")
                .about("Fetch league standings from the sports data API")
                .arg(
                    arg!(--"sports-url" <URL>)
                        .required(true)
                        .help("Sports data API base URL")
                        .env("MARQUEE_SPORTS_URL")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-l --"league" <LEAGUE>)
                        .required(true)
                        .help("League identifier"),
                )
                .arg(
                    arg!(-s --"season" <SEASON>)
                        .required(true)
                        .help("Season, e.g. 2025"),
                ),
        )
        .subcommand(
            command!("submit-form")
                .about("Relay a form submission and print the outcome")
                .arg(
                    arg!(--"form" <FORM_ID>)
                        .required(true)
                        .help("The form being submitted"),
                )
                .arg(
                    arg!(-d --"data" <JSON>)
                        .required(true)
                        .help("Submitted fields as a JSON object"),
                )
                .arg(
                    arg!(--"check")
                        .required(false)
                        .help("Validate required fields against the form definition first")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
