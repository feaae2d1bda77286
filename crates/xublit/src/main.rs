mod cli;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use xublit_core::kernel::Result;
use xublit_core::{AppShell, DirectoryInjector, LifecycleEvent};

use crate::cli::{CliArgs, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let options = args.options()?;
    let mut app = AppShell::<DirectoryInjector>::new(&options)?;

    match args.command {
        Commands::Dirs => {
            for dir in app.include_dirs() {
                println!("{}", dir.display());
            }
            Ok(())
        }
        Commands::Run { once } => {
            for event in [
                LifecycleEvent::BeforeStart,
                LifecycleEvent::Bootstrapped,
                LifecycleEvent::Started,
                LifecycleEvent::Stop,
            ] {
                app.on(event, |event| {
                    info!("Lifecycle event: {}", event);
                    Ok(())
                });
            }

            app.start().await?;

            let modules = app.injector().modules();
            if modules.is_empty() {
                println!("No modules found.");
            } else {
                println!("Modules:");
                for module in modules {
                    println!(
                        "  - {} v{} ({})",
                        module.name(),
                        module.manifest.version,
                        module.dir.display()
                    );
                }
            }

            if !once {
                info!("Running; press Ctrl-C to stop");
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!("Failed to listen for Ctrl-C: {}", e);
                }
            }

            // Halts the process on success.
            app.stop()?;
            Ok(())
        }
    }
}
