use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use clap::{arg, command, value_parser, Arg, ArgAction};
use httpclient::execute::{execute_http_files, ExecutionContext, Selection};
use httpclient::http_request_executor::ReqwestTransport;
use httpclient::logger::init_logging;
use httpclient::output_formatter::Verbosity;

fn main() -> Result<()> {
    let cmd = command!()
        .author(clap::crate_authors!())
        .arg_required_else_help(true)
        .arg(
            arg!(<FILES> "files")
                .help("http files whose requests shall be executed")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("index")
                .short('n')
                .value_name("INDEX")
                .help("Request to execute, counting from 0; \"a\" executes them all")
                .default_value("0")
                .value_parser(Selection::from_str),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECS")
                .help("Request timeout in seconds, 0 waits forever")
                .default_value("120")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .help("Sets the level of verbosity")
                .long_help(
                    "(none) only the unformatted response body, for piping into other tools
-v     response status, elapsed time, headers and body
-vv    the request as sent, followed by everything -v prints",
                )
                .action(ArgAction::Count),
        );

    let matches = cmd.get_matches();
    init_logging();

    let timeout = match matches.get_one::<u64>("timeout").copied().unwrap_or(120) {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    let transport = ReqwestTransport::new(timeout)?;
    let context = ExecutionContext {
        transport: &transport,
        selection: matches
            .get_one::<Selection>("index")
            .copied()
            .unwrap_or(Selection::Index(0)),
        verbosity: Verbosity::from_occurrences(matches.get_count("verbose")),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_http_files(
        matches.get_many::<PathBuf>("FILES").unwrap_or_default().collect(),
        &context,
        &mut out,
    )
}
