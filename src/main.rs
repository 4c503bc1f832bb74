use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use m3u2spotify::{cli, config, logging, warning};

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
  args_conflicts_with_subcommands = true // server flags only apply without a subcommand
)]
struct Cli {
    /// Port of the local web app
    #[clap(short, long, default_value_t = 8000)]
    port: u16,

    /// Do not open the browser on start
    #[clap(long)]
    no_browser: bool,

    /// Directory with the front-end files, relative to the working directory
    #[clap(long, default_value = "public")]
    public_dir: PathBuf,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the search queries derived from a .m3u file
    Preview(PreviewOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewOptions {
    file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    logging::init_logging();

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        None => {
            cli::serve(cli::ServeOptions {
                port: cli.port,
                open_browser: !cli.no_browser,
                public_dir: cli.public_dir,
            })
            .await
        }
        Some(Command::Preview(opt)) => cli::preview(&opt.file).await,
        Some(Command::Completions(opt)) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
