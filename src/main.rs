use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use log::LevelFilter;

use lineseek::Config;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("LINESEEK_BUILD_COMMIT"),
    ")"
);

/// lineseek — jump to any line of a file without reading the whole thing.
/// Seeks by line number, range, or from the end, scanning in small windows.
#[derive(Parser)]
#[command(name = "lineseek", version = VERSION, about)]
struct Cli {
    /// File to read.
    path: Option<PathBuf>,

    /// Lines to show: N, A-B, A-, tail:N or all. 1-indexed.
    #[arg(default_value = "all")]
    query: String,

    /// Machine-readable JSON output.
    #[arg(long)]
    json: bool,

    /// Print lines without line numbers.
    #[arg(long)]
    plain: bool,

    /// TOML config file. Defaults to $LINESEEK_CONFIG when set.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More logging on stderr (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print shell completions for the given shell.
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Shell completions
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "lineseek", &mut io::stdout());
        return;
    }

    let Some(path) = cli.path else {
        eprintln!("usage: lineseek <path> [N | A-B | A- | tail:N | all] [--json] [--plain]");
        process::exit(3);
    };

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            process::exit(e.exit_code());
        }
    };
    config.json |= cli.json;
    if cli.plain {
        config.number_lines = false;
    }

    match lineseek::run(&path, &cli.query, &config) {
        Ok(output) => {
            let is_tty = io::stdout().is_terminal();
            emit_output(&output, is_tty && !config.json, &config);
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(e.exit_code());
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Write output to stdout. When paging and output is long, pipe through the pager.
fn emit_output(output: &str, page: bool, config: &Config) {
    if page && output.lines().count() > config.terminal_height() {
        let pager = config.pager_command();
        log::debug!("paging through {} {:?}", pager.program, pager.args);
        if let Ok(mut child) = process::Command::new(&pager.program)
            .args(&pager.args)
            .stdin(process::Stdio::piped())
            .spawn()
        {
            if let Some(ref mut stdin) = child.stdin.take() {
                let _ = stdin.write_all(output.as_bytes());
            }
            let _ = child.wait();
            return;
        }
    }

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
}
