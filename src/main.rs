// ABOUTME: Entry point for the `cost` command line tool
// Parses arguments, loads configuration and prints messaging costs

use anyhow::{anyhow, bail, Result};
use clap::{Arg, ArgMatches, Command};
use integration_costs::{
    app::config::{AppConfig, ExportFormat},
    pricing::{
        load_queries, parse_count, render_rates, ApiCategory, ConversationType, CostQuery,
        CostReport, PricingCatalog,
    },
    utils::format_cost,
};

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    // Initialize logging if debug mode
    if matches.get_flag("debug") {
        tracing_subscriber::fmt()
            .with_env_filter("integration_costs=debug,cost=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let config = load_config(&matches)?;
    let catalog = config.catalog()?;
    tracing::debug!(?config, "Configuration resolved");

    match matches.subcommand() {
        Some(("flat", sub)) => {
            let category: ApiCategory = required(sub, "category")?.parse()?;
            let calls = parse_count(required(sub, "calls")?, "calls")?;
            print_single(&catalog, CostQuery::Flat { category, calls }, config.export_format)?;
        }
        Some(("convo", sub)) => {
            let conversation_type: ConversationType = required(sub, "type")?.parse()?;
            let conversations = parse_count(required(sub, "conversations")?, "conversations")?;
            let messages = parse_count(required(sub, "messages")?, "messages")?;
            let query = CostQuery::Conversation {
                conversation_type,
                conversations,
                messages,
            };
            print_single(&catalog, query, config.export_format)?;
        }
        Some(("rates", _)) => {
            print!("{}", render_rates(&catalog, config.export_format)?);
        }
        Some(("batch", sub)) => {
            let path = required(sub, "file")?;
            let queries = load_queries(path)?;
            tracing::debug!("Loaded {} queries from {}", queries.len(), path);
            let report = CostReport::build(&catalog, &queries);
            print!("{}", report.render(config.export_format)?);
        }
        Some((other, _)) => bail!("unknown command '{}'", other),
        None => bail!("no command given, see --help"),
    }

    Ok(())
}

fn build_cli() -> Command {
    Command::new("cost")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Integration Costs Team")
        .about("Cost calculator for WhatsApp Cloud API and Twilio + WhatsApp usage")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .global(true)
                .help("Path to configuration file"),
        )
        .arg(
            Arg::new("pricing")
                .short('p')
                .long("pricing")
                .value_name("FILE")
                .global(true)
                .help("Alternate pricing file (.toml or .json)"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .global(true)
                .help("Output format: text, json, csv or markdown"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .global(true)
                .help("Enable debug logging")
                .action(clap::ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("flat")
                .about("Cost of WhatsApp API calls in Malaysia")
                .arg(
                    Arg::new("category")
                        .required(true)
                        .help("marketing, utility, authentication or service"),
                )
                .arg(
                    Arg::new("calls")
                        .required(true)
                        .allow_negative_numbers(true)
                        .help("Number of API calls"),
                ),
        )
        .subcommand(
            Command::new("convo")
                .about("Cost of Twilio + WhatsApp conversations and messages")
                .arg(
                    Arg::new("type")
                        .required(true)
                        .help("utility or service_conversation"),
                )
                .arg(
                    Arg::new("conversations")
                        .required(true)
                        .allow_negative_numbers(true)
                        .help("Number of conversations"),
                )
                .arg(
                    Arg::new("messages")
                        .required(true)
                        .allow_negative_numbers(true)
                        .help("Number of messages"),
                ),
        )
        .subcommand(Command::new("rates").about("Show the rate tables in use"))
        .subcommand(
            Command::new("batch")
                .about("Price every query in a JSON usage file")
                .arg(Arg::new("file").required(true).value_name("FILE")),
        )
}

fn load_config(matches: &ArgMatches) -> Result<AppConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    if let Some(path) = matches.get_one::<String>("pricing") {
        config.pricing_file = Some(path.into());
    }

    if let Some(format) = matches.get_one::<String>("format") {
        config.export_format = format.parse()?;
    }

    Ok(config)
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument <{}>", name))
}

fn print_single(catalog: &PricingCatalog, query: CostQuery, format: ExportFormat) -> Result<()> {
    let report = CostReport::build(catalog, &[query]);
    match format {
        ExportFormat::Text => println!("{}", format_cost(report.total())),
        _ => print!("{}", report.render(format)?),
    }
    Ok(())
}
