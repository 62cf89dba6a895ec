use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "pzo")]
#[command(about = "Pizza order form (terminal host)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the form from flags, print it, and submit when valid
    Order {
        #[arg(long)]
        full_name: String,

        /// S | M | L
        #[arg(long)]
        size: String,

        /// Topping id to select (repeatable)
        #[arg(long = "topping")]
        toppings: Vec<String>,

        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Overrides endpoint.base_url from config
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Line-driven session on stdin (type `help` for commands)
    Interactive {
        #[arg(long = "config")]
        config_paths: Vec<String>,

        #[arg(long)]
        base_url: Option<String>,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> env -> local...)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

/// Logs go to stderr; stdout carries the rendered form only.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Order {
            full_name,
            size,
            toppings,
            config_paths,
            base_url,
        } => {
            let cfg = commands::load_form_config(&config_paths, base_url)?;
            let args = commands::order::OrderArgs {
                full_name,
                size,
                toppings,
            };
            commands::order::run_order(&cfg, args).await?;
        }

        Commands::Interactive {
            config_paths,
            base_url,
        } => {
            let cfg = commands::load_form_config(&config_paths, base_url)?;
            let gateway = pzo_http::HttpOrderGateway::from_endpoint(&cfg.endpoint);
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut out = std::io::stdout();
            commands::interactive::run_session(&cfg, &gateway, input, &mut out).await?;
        }

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = pzo_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }
    }

    Ok(())
}
