//! `comptree` binary

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use comptree_cli::{collect_stats, describe, load_tree, parse_depth, render_tree, CliConfig};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn report_arg() -> Arg {
    Arg::new("report")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON analysis report")
}

fn depth_arg() -> Arg {
    Arg::new("depth")
        .long("depth")
        .default_value("FILE")
        .help("Deepest component type crawled: PROJECT, MODULE, DIRECTORY or FILE")
}

fn cli() -> Command {
    Command::new("comptree")
        .version(comptree_cli::VERSION)
        .about("Build and crawl the component tree of an analysis report")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Raise log level (-v info, -vv debug)"),
        )
        .subcommand(
            Command::new("tree")
                .about("Print the component tree, parents first")
                .arg(report_arg())
                .arg(depth_arg()),
        )
        .subcommand(
            Command::new("stats")
                .about("Print file and line totals of every component")
                .arg(report_arg())
                .arg(depth_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Describe the component with the given ref")
                .arg(report_arg())
                .arg(
                    Arg::new("ref")
                        .required(true)
                        .value_parser(value_parser!(u32))
                        .help("Report ref of the component"),
                ),
        )
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn required<'a, T>(args: &'a ArgMatches, id: &str) -> anyhow::Result<&'a T>
where
    T: Clone + Send + Sync + 'static,
{
    args.get_one::<T>(id)
        .with_context(|| format!("missing argument '{id}'"))
}

fn run(command: &str, args: &ArgMatches) -> anyhow::Result<()> {
    let config = match args.get_one::<PathBuf>("config") {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    match command {
        "tree" => {
            let tree = load_tree(required::<PathBuf>(args, "report")?, &config)?;
            let depth = parse_depth(required::<String>(args, "depth")?)?;
            print!("{}", render_tree(tree.root()?, depth)?);
        }
        "stats" => {
            let tree = load_tree(required::<PathBuf>(args, "report")?, &config)?;
            let depth = parse_depth(required::<String>(args, "depth")?)?;
            let stats = collect_stats(tree.root()?, depth)?;
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", stats.to_text());
            }
        }
        "show" => {
            let tree = load_tree(required::<PathBuf>(args, "report")?, &config)?;
            print!("{}", describe(&tree, *required::<u32>(args, "ref")?)?);
        }
        other => anyhow::bail!("unknown command '{other}'"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    // Globals are propagated down to the subcommand
    let (command, args) = matches.subcommand().context("no command given")?;
    init_tracing(args.get_count("verbose"));
    run(command, args)
}
