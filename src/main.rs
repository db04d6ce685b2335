mod cli;
mod commands;
mod extract;
mod page_range;
mod pdf;
mod prompt;
mod report;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, InteractiveArgs};
use extract::OverwritePolicy;
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // RUST_LOG, when set, takes precedence over -v
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let pdfium_path = cli.pdfium_path.as_deref();

    match cli.command {
        None => {
            let args = InteractiveArgs {
                output_dir: ".".into(),
                ..Default::default()
            };
            run_interactive(&args, pdfium_path)?;
        }
        Some(Commands::Interactive(args)) => {
            run_interactive(&args, pdfium_path)?;
        }
        Some(Commands::Convert {
            path,
            pages,
            dpi,
            format,
            output_dir,
            overwrite,
            skip_existing,
            json,
        }) => {
            let overwrite = if overwrite {
                Some(OverwritePolicy::Overwrite)
            } else if skip_existing {
                Some(OverwritePolicy::Skip)
            } else {
                None
            };
            let options = commands::convert::ConvertOptions {
                pages,
                dpi,
                format,
                output_dir,
                overwrite,
                json,
            };
            commands::convert::run(&path, &options, pdfium_path)?;
        }
        Some(Commands::Info { path }) => {
            commands::info::run(&path, pdfium_path)?;
        }
    }

    Ok(())
}

fn run_interactive(args: &InteractiveArgs, pdfium_path: Option<&std::path::Path>) -> Result<()> {
    let options = commands::interactive::InteractiveOptions {
        output_dir: args.output_dir.clone(),
        pause: !args.no_pause,
    };
    commands::interactive::run(&options, pdfium_path)
}
