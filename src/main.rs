use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use geochart_plugins::charts::{chart_runtime, is_chart_script};
use geochart_plugins::config::file::config_file_path;
use geochart_plugins::{Chart, ChartPlugin, Config, Plugin};

/// Geochart - discover chart plugins declared by scripts
#[derive(Parser)]
#[command(name = "geochart", version, about)]
struct Cli {
    /// Plugin root directory (one subdirectory per plugin)
    #[arg(long, env = "GEOCHART_PLUGIN_DIR", global = true)]
    plugin_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List plugins and their charts (default)
    List {
        /// Print the loaded plugins as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate one chart script and show its metadata
    Inspect {
        /// Path to the script
        script: PathBuf,
    },
    /// Show the resolved configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info,geochart_plugins=info",
        1 => "info,geochart_plugins=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.plugin_dir);
    tracing::debug!(?config, "loaded configuration");

    match cli.command.unwrap_or(Command::List { json: false }) {
        Command::List { json } => cmd_list(&config, json),
        Command::Inspect { script } => cmd_inspect(&config, &script),
        Command::Config => cmd_config(&config),
    }
}

/// Load plugins and print them in display order
fn cmd_list(config: &Config, json: bool) -> anyhow::Result<()> {
    let mut manager = config.chart_plugin_manager()?;
    let plugins = manager.load_plugins();

    if json {
        println!("{}", serde_json::to_string_pretty(&*plugins)?);
        return Ok(());
    }

    if plugins.is_empty() {
        println!("No plugins found in {}", config.plugin_dir.display());
        return Ok(());
    }

    let mut sorted: Vec<&ChartPlugin> = plugins.iter().collect();
    sorted.sort_by(|a, b| a.name().cmp(b.name()));

    for plugin in sorted {
        println!("{} ({})", plugin.name(), plugin.path().display());

        if plugin.charts().is_empty() {
            println!("  (no charts)");
        }

        for chart in plugin.sorted_charts() {
            println!(
                "  {:<32} {}",
                chart.name().unwrap_or("<unnamed>"),
                chart.category().unwrap_or("-")
            );
        }
    }

    Ok(())
}

/// Evaluate a single script the way the plugin loader would
fn cmd_inspect(config: &Config, script: &Path) -> anyhow::Result<()> {
    if !is_chart_script(script) {
        tracing::warn!(
            path = %script.display(),
            "file name does not end in .js; plugin loading would ignore it"
        );
    }

    let runtime = chart_runtime(config.script_limits);
    let chart = Chart::from_script(script, &runtime)?;

    println!("script:   {}", chart.source().display());
    println!("name:     {}", chart.name().unwrap_or("<absent>"));
    println!("category: {}", chart.category().unwrap_or("<absent>"));

    Ok(())
}

/// Print the resolved configuration
fn cmd_config(config: &Config) -> anyhow::Result<()> {
    match config_file_path() {
        Some(path) if path.exists() => println!("config file: {}", path.display()),
        Some(path) => println!("config file: {} (not present)", path.display()),
        None => println!("config file: <none>"),
    }

    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
