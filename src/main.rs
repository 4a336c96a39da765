//! logrev - Newest-first log search over large files
//!
//! `logrev serve` runs the HTTP service; `logrev scan` runs a single query
//! against a file and prints the matching lines.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use logrev::config::{Config, ConfigOverrides};
use logrev::server::LogServer;
use logrev::{KeywordFilter, ReverseLineScanner};
use std::io::Write;
use std::net::IpAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG controls verbosity
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("serve", args)) => serve(args).await,
        Some(("scan", args)) => scan(args).await,
        _ => unreachable!("subcommand is required"),
    }
}

fn cli() -> Command {
    Command::new("logrev")
        .version(logrev::VERSION)
        .about("Serve the newest matching lines of large log files")
        .long_about(
            "logrev reads log files backward in bounded chunks and returns the most \
             recent lines containing a keyword, without loading the file into memory.",
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP service")
                .arg(
                    Arg::new("log-dir")
                        .long("log-dir")
                        .env("LOG_PATH")
                        .help("Directory that fileName is resolved against [default: /var/log]")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("host")
                        .long("host")
                        .env("LOGREV_HOST")
                        .help("Address to listen on [default: 0.0.0.0]")
                        .value_parser(value_parser!(IpAddr)),
                )
                .arg(
                    Arg::new("port")
                        .long("port")
                        .short('p')
                        .env("PORT")
                        .help("Port to listen on [default: 3000]")
                        .value_parser(value_parser!(u16)),
                )
                .arg(
                    Arg::new("cors-origin")
                        .long("cors-origin")
                        .env("CORS_ORIGIN")
                        .help("Allowed CORS origin [default: http://localhost:3001]"),
                )
                .arg(chunk_size_arg())
                .arg(
                    Arg::new("config")
                        .long("config")
                        .env("LOGREV_CONFIG")
                        .help("TOML config file")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("scan")
                .about("Print the newest matching lines of one file")
                .arg(
                    Arg::new("file")
                        .help("Path to the log file")
                        .required(true)
                        .index(1)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("keyword")
                        .long("keyword")
                        .short('k')
                        .help("Only print lines containing this text (case-sensitive)"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .short('n')
                        .help("Maximum number of lines")
                        .default_value("10")
                        .value_parser(value_parser!(NonZeroUsize)),
                )
                .arg(chunk_size_arg()),
        )
}

fn chunk_size_arg() -> Arg {
    Arg::new("chunk-size")
        .long("chunk-size")
        .env("LOGREV_CHUNK_SIZE")
        .help("Maximum bytes read per backward step [default: 2097152]")
        .value_parser(value_parser!(NonZeroUsize))
}

async fn serve(args: &ArgMatches) -> Result<()> {
    let overrides = ConfigOverrides {
        log_dir: args.get_one::<PathBuf>("log-dir").cloned(),
        host: args.get_one::<IpAddr>("host").copied(),
        port: args.get_one::<u16>("port").copied(),
        cors_origin: args.get_one::<String>("cors-origin").cloned(),
        chunk_size: args.get_one::<NonZeroUsize>("chunk-size").copied(),
        config_file: args.get_one::<PathBuf>("config").cloned(),
    };

    let config = Config::load(overrides).context("Failed to load configuration")?;
    log::debug!("Resolved configuration: {:?}", config);

    LogServer::new(config).run().await
}

async fn scan(args: &ArgMatches) -> Result<()> {
    let path = args
        .get_one::<PathBuf>("file")
        .context("file argument is required")?;
    let limit = args
        .get_one::<NonZeroUsize>("limit")
        .copied()
        .unwrap_or(logrev::scan::DEFAULT_LIMIT);

    let mut scanner = ReverseLineScanner::new(".");
    if let Some(chunk_size) = args.get_one::<NonZeroUsize>("chunk-size") {
        scanner = scanner.with_chunk_size(*chunk_size);
    }

    let filter = KeywordFilter::parse(args.get_one::<String>("keyword").map(String::as_str))?;
    let lines = scanner.scan_path(path, &filter, limit).await?;

    let mut stdout = std::io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{}", line)?;
    }
    Ok(())
}
