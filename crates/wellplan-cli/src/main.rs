use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "wellplan",
    about = "Wellplan: assign liquid-handling instructions to plates and wells",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a JSON request onto plates and wells.
    ///
    /// The request holds the ordered instruction list, the default output
    /// plate types, and optionally the well order. Values in --config
    /// override the request's output plate types and well order.
    Layout {
        /// Path to the JSON layout request
        #[arg(short, long)]
        request: String,
        /// Path to a wellplan.toml with extra plate types and layout defaults
        #[arg(short, long)]
        config: Option<String>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
        /// Use plate-1, plate-2, ... instead of random UUIDs
        #[arg(long)]
        sequential_ids: bool,
    },
    /// List known plate types
    Plates {
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Generate a wellplan.toml scaffold
    Init {
        #[arg(short, long, default_value = ".")]
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wellplan=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Layout {
            request,
            config,
            format,
            sequential_ids,
        } => commands::layout::run(&request, config.as_deref(), &format, sequential_ids),
        Commands::Plates { config } => commands::plates::list(config.as_deref()),
        Commands::Init { path } => commands::plates::init(&path),
    }
}
