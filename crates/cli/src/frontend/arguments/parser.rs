use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use displacement::DescriptionStyle;
use logging::{Topic, parse_topic_list};

use super::parsed_args::{CommandRequest, ParsedArgs};

/// Program name used when the argument list is empty.
pub(crate) const PROGRAM_NAME: &str = "pageshift";

const DEFAULT_TOP: &str = "10";

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Explains why two memory pages look alike")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase diagnostic output (repeatable).")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("TOPICS")
                .help("Enable debug output for search, bulk, policy, store, batch or all.")
                .action(ArgAction::Append)
                .value_parser(parse_topics)
                .global(true),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .short('d')
                .value_name("DIR")
                .help("Directory holding the {id}_* page files.")
                .default_value(".")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Read classifier settings from a JSON file.")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .value_name("BYTES")
                .help("Expected page size.")
                .value_parser(value_parser!(usize))
                .global(true),
        )
        .arg(
            Arg::new("budget")
                .long("budget")
                .value_name("BYTES")
                .help("Mismatches tolerated by the tolerant shift search.")
                .value_parser(value_parser!(usize))
                .global(true),
        )
        .arg(
            Arg::new("bulk-threshold")
                .long("bulk-threshold")
                .value_name("RATIO")
                .help("Fraction of equal bytes above which pages are bulk-equal.")
                .value_parser(value_parser!(f64))
                .global(true),
        )
        .arg(
            Arg::new("low-confidence-ratio")
                .long("low-confidence-ratio")
                .value_name("RATIO")
                .help("Fraction of the page size beyond which a shift is low confidence.")
                .value_parser(value_parser!(f64))
                .global(true),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .value_name("STYLE")
                .help("Description style.")
                .default_value("plain")
                .value_parser(PossibleValuesParser::new(["plain", "latex"]))
                .global(true),
        )
        .subcommand(
            Command::new("compare")
                .about("Classify one page pair")
                .arg(page_id_arg("first", "First page id."))
                .arg(page_id_arg("second", "Second page id."))
                .arg(
                    Arg::new("show-diff")
                        .long("show-diff")
                        .help("Append a side-by-side hex dump of both pages.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print one JSON object instead of the narration.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("batch")
                .about("Classify every pair listed in a collision log")
                .arg(
                    Arg::new("log")
                        .value_name("LOG")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("keep-all")
                        .long("keep-all")
                        .help("Keep size errors, zero shifts and repeated first pages.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("slide")
                .about("Write a copy of a page displaced by SHIFT bytes")
                .arg(page_id_arg("id", "Source page id."))
                .arg(
                    Arg::new("shift")
                        .value_name("SHIFT")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("fill")
                        .long("fill")
                        .value_name("HEX")
                        .help("Fill byte, e.g. 00, ff or 0xAA.")
                        .default_value("00")
                        .value_parser(parse_fill),
                )
                .arg(
                    Arg::new("payload")
                        .long("payload")
                        .value_name("FILE")
                        .help("Bytes placed before the fill.")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_name("OUT")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("histogram")
                .about("List the most frequent byte values of a page")
                .arg(page_id_arg("id", "Page id."))
                .arg(
                    Arg::new("top")
                        .long("top")
                        .value_name("N")
                        .default_value(DEFAULT_TOP)
                        .value_parser(value_parser!(usize)),
                ),
        )
}

fn page_id_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .value_name("ID")
        .help(help)
        .required(true)
        .value_parser(value_parser!(u64))
}

fn parse_topics(text: &str) -> Result<Vec<Topic>, String> {
    parse_topic_list(text).map_err(|error| error.to_string())
}

fn parse_fill(text: &str) -> Result<u8, String> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u8::from_str_radix(digits, 16).map_err(|_| format!("'{text}' is not a hexadecimal byte"))
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;
    let missing = || {
        clap_command().error(
            clap::error::ErrorKind::MissingSubcommand,
            "a subcommand is required",
        )
    };
    // Global options are propagated into the subcommand matches.
    let (name, mut sub) = matches.remove_subcommand().ok_or_else(missing)?;

    let verbose = sub.get_count("verbose");
    let mut debug_topics = Vec::new();
    for topic in sub
        .remove_many::<Vec<Topic>>("debug")
        .into_iter()
        .flatten()
        .flatten()
    {
        if !debug_topics.contains(&topic) {
            debug_topics.push(topic);
        }
    }
    let style = match sub.get_one::<String>("style").map(String::as_str) {
        Some("latex") => DescriptionStyle::Latex,
        _ => DescriptionStyle::Plain,
    };

    Ok(ParsedArgs {
        verbose,
        debug_topics,
        dir: sub
            .remove_one::<PathBuf>("dir")
            .unwrap_or_else(|| PathBuf::from(".")),
        config_file: sub.remove_one::<PathBuf>("config"),
        page_size: sub.remove_one::<usize>("page-size"),
        budget: sub.remove_one::<usize>("budget"),
        bulk_threshold: sub.remove_one::<f64>("bulk-threshold"),
        low_confidence_ratio: sub.remove_one::<f64>("low-confidence-ratio"),
        style,
        command: command_request(&name, &mut sub).ok_or_else(missing)?,
    })
}

fn command_request(name: &str, matches: &mut ArgMatches) -> Option<CommandRequest> {
    let request = match name {
        "compare" => CommandRequest::Compare {
            first: matches.remove_one::<u64>("first")?,
            second: matches.remove_one::<u64>("second")?,
            show_diff: matches.get_flag("show-diff"),
            json: matches.get_flag("json"),
        },
        "batch" => CommandRequest::Batch {
            log: matches.remove_one::<PathBuf>("log")?,
            keep_all: matches.get_flag("keep-all"),
        },
        "slide" => CommandRequest::Slide {
            id: matches.remove_one::<u64>("id")?,
            shift: matches.remove_one::<usize>("shift")?,
            fill: matches.remove_one::<u8>("fill")?,
            payload: matches.remove_one::<PathBuf>("payload"),
            output: matches.remove_one::<PathBuf>("output")?,
        },
        "histogram" => CommandRequest::Histogram {
            id: matches.remove_one::<u64>("id")?,
            top: matches.remove_one::<usize>("top")?,
        },
        _ => return None,
    };
    Some(request)
}
