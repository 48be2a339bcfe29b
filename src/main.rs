use clap::{ArgAction, Args, Parser, Subcommand};
use unused_images::commands::{config_cmd::ConfigOptions, scan::ScanOptions};
use unused_images::commands::{execute_config, execute_scan};
use unused_images::error::AppError;
use unused_images::logging::init_logging;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.scan.verbose);

    match cli.command {
        None => {
            let options = ScanOptions {
                runtime: cli.scan.runtime,
                timeout_secs: cli.scan.timeout,
            };
            execute_scan(options)?;
        }
        Some(Commands::Config(args)) => {
            let options =
                ConfigOptions { show_path: args.path, edit: args.edit, add_exclude: args.add_exclude };
            execute_config(options)?;
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(
    name = "unused-images",
    version,
    about = "List Docker images that no container uses, directly or as a build ancestor."
)]
struct Cli {
    #[command(flatten)]
    scan: ScanArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration (runtime, timeout, exclusions).
    Config(ConfigArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Log debug details and a scan summary to stderr.
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Kill any runtime command still running after SECS seconds (0 disables).
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Container CLI to query instead of the configured one (default: docker).
    #[arg(long, value_name = "BIN")]
    runtime: Option<String>,
}

#[derive(Args)]
struct ConfigArgs {
    /// Show the configuration file path.
    #[arg(long = "path", action = ArgAction::SetTrue)]
    path: bool,

    /// Open the configuration file in $EDITOR.
    #[arg(long = "edit", action = ArgAction::SetTrue)]
    edit: bool,

    /// Never report images whose name matches this glob.
    #[arg(long = "add-exclude", value_name = "PATTERN")]
    add_exclude: Option<String>,
}
