use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tabled::{Table, settings::Style};

use moodboard::{config, error, info, server, success, warning};

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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the mood board server
    Serve(ServeOptions),

    /// Show the resolved configuration
    Config,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    addr: Option<String>,

    /// Open APP_URL in the default browser once listening
    #[clap(long)]
    open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    let mut config = config::Config::from_env();

    match cli.command {
        Command::Serve(opt) => {
            init_tracing();

            if let Some(addr) = opt.addr {
                config.server_address = addr;
            }
            warn_missing_credentials(&config);

            info!("Serving {} on {}", config.app_url, config.server_address);
            if opt.open {
                let url = config.app_url.clone();
                tokio::spawn(async move {
                    if webbrowser::open(&url).is_err() {
                        warning!("Failed to open browser. Please navigate to {} manually", url);
                    }
                });
            }

            if let Err(e) = server::start_api_server(config).await {
                error!("Server stopped: {}", e);
            }
        }
        Command::Config => {
            let mut table = Table::new(config.summary_rows());
            table.with(Style::rounded());
            println!("{}", table);

            if config.pinterest_client_id.is_some()
                && config.pinterest_client_secret.is_some()
                && config.unsplash_access_key.is_some()
                && config.gemini_api_key.is_some()
            {
                success!("All provider credentials are configured");
            } else {
                warn_missing_credentials(&config);
            }
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodboard=debug,tower_http=debug".into()),
        )
        .init();
}

fn warn_missing_credentials(config: &config::Config) {
    if config.pinterest_client_id.is_none() {
        warning!("PINTEREST_CLIENT_ID is not set, Pinterest connect will fail");
    }
    if config.pinterest_client_secret.is_none() {
        warning!("PINTEREST_CLIENT_SECRET is not set, token exchange will fail");
    }
    if config.unsplash_access_key.is_none() {
        warning!("UNSPLASH_ACCESS_KEY is not set, search will fail");
    }
    if config.gemini_api_key.is_none() {
        warning!("GEMINI_API_KEY is not set, image analysis will fail");
    }
}
