use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mars_habitat::{
    export,
    mission::HabitatType,
    script::ScriptLoader,
    summary::{share_text, MissionSummary},
    web::{self, WebServerConfig},
    zones::ZONE_TEMPLATES,
    DesignerConfig,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Mars habitat mission designer")]
struct Cli {
    /// Path to a designer config YAML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a design script through the wizard and print its summary
    Run {
        /// Path to the design script YAML file
        #[arg(long, default_value = "designs/olympus_outpost.yaml")]
        design: PathBuf,

        /// Write the resulting design to the configured export directory
        #[arg(long)]
        export: bool,
    },
    /// Print the summary of an exported design file
    Summary {
        #[arg(long)]
        file: PathBuf,
    },
    /// List zone templates and habitat types
    Templates,
    /// Serve one design session over HTTP
    Serve {
        /// Override the configured host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = DesignerConfig::load_or_default(cli.config.as_deref())?;
    init_logging(&config.logging.level);

    match cli.command {
        Command::Run { design, export } => {
            let script = ScriptLoader::new(".").load(&design)?;
            let mut wizard = config.wizard();
            let outcome = script.run(&mut wizard);
            for notice in &outcome.notices {
                println!("! {notice}");
            }
            println!("Design '{}'", outcome.name);
            println!("{}", outcome.summary);
            println!();
            println!("{}", share_text(&outcome.state));
            if export {
                let path = config.exporter().write(&outcome.state)?;
                println!("Design exported to {}", path.display());
            }
        }
        Command::Summary { file } => {
            let state = export::load_from_path(&file)?;
            println!("{}", MissionSummary::from_state(&state));
            for zone in state.zones() {
                println!("  - {} [{}] {:.1} m²", zone.name, zone.id, zone.area);
            }
        }
        Command::Templates => {
            println!("Zone templates:");
            for template in ZONE_TEMPLATES.iter() {
                println!("  {:<18} min {:>4.1} m²", template.name, template.min_area);
            }
            println!("Habitat types:");
            for kind in HabitatType::ALL {
                let info = kind.info();
                println!(
                    "  {:<11} {} ({} mass, {} deployment)",
                    kind.id(),
                    info.name,
                    info.mass,
                    info.deployment
                );
            }
        }
        Command::Serve { host, port } => {
            let server = WebServerConfig {
                host: host.unwrap_or_else(|| config.server.host.clone()),
                port: port.unwrap_or(config.server.port),
            };
            web::run(server, config.wizard()).await?;
        }
    }
    Ok(())
}
