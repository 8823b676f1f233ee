use std::path::PathBuf;

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sporlviz::{
    cli::{self, RunOptions},
    config, error,
    utils::RecordFilter,
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(flatten)]
    global: GlobalOptions,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct GlobalOptions {
    /// Spotify API client id (otherwise read from ./client_id)
    #[clap(short = 'i', long, global = true)]
    client_id: Option<String>,

    /// Spotify API client secret (otherwise read from ./client_secret)
    #[clap(short = 's', long, global = true)]
    client_secret: Option<String>,

    /// Cache Spotify API calls
    #[clap(short = 'c', long, global = true)]
    cache: bool,

    /// History file
    #[clap(short = 'f', long, global = true)]
    hist_file: Option<PathBuf>,

    /// Data file
    #[clap(short = 'd', long, global = true)]
    data_file: Option<PathBuf>,

    /// Plot file
    #[clap(short = 'p', long, global = true, default_value = "plot.png")]
    plot_file: PathBuf,

    /// Offset song data
    #[clap(short = 'o', long, global = true)]
    offset: Option<usize>,

    /// Limit number of songs to be processed
    #[clap(short = 'n', long, global = true)]
    nsongs: Option<usize>,

    /// Filter any songs that have been played shorter than n seconds
    #[clap(short = 'm', long, global = true)]
    min_duration: Option<u64>,
}

impl From<GlobalOptions> for RunOptions {
    fn from(opts: GlobalOptions) -> Self {
        RunOptions {
            client_id: opts.client_id,
            client_secret: opts.client_secret,
            cache: opts.cache,
            hist_file: opts.hist_file,
            data_file: opts.data_file,
            plot_file: opts.plot_file,
            filter: RecordFilter {
                min_duration_secs: opts.min_duration,
                offset: opts.offset,
                limit: opts.nsongs,
            },
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate data by fetching metadata from Spotify
    #[clap(visible_alias = "generate-dataset")]
    GenData,

    /// Visualize metadata as provided by Spotify
    Visualize(VisualizeOptions),

    /// Visualize total number of songs and minutes played per day
    VisualizeTime,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct VisualizeOptions {
    /// Data parameter to visualize
    parameter: String,

    /// Group data by days
    #[clap(long)]
    by_day: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

async fn run(command: Command, opts: RunOptions) {
    match command {
        Command::GenData => cli::generate_dataset(&opts).await,
        Command::Visualize(v) => cli::visualize(&opts, &v.parameter, v.by_day).await,
        Command::VisualizeTime => cli::visualize_time(&opts).await,
        Command::Completions(c) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(c.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = config::load_env() {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    let opts = RunOptions::from(cli.global);

    tokio::select! {
        _ = run(cli.command, opts) => {}
        _ = tokio::signal::ctrl_c() => error!("Interrupted"),
    }
}
