use eyre::WrapErr;
use icon_variants::{Config, Generator};
use xshell::Shell;

mod cli;

fn setup_logger(verbose: bool) -> eyre::Result<()> {
    use tracing::Level;
    use tracing_subscriber::{
        filter::LevelFilter, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Registry,
    };

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    Registry::default()
        .with(LevelFilter::from(level))
        .with(
            layer()
                .with_ansi(true)
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    Ok(())
}

fn load_config(args: &cli::Args) -> eyre::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::parse_file(path)?,
        None => Config::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    let config = config.select(args.themes.as_slice())?;
    config.validate()?;
    Ok(config)
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args: cli::Args = argh::from_env();
    setup_logger(args.verbose)?;

    let config = load_config(&args)?;
    if args.print_config {
        if let Some(path) = &config.config_file {
            println!("# loaded from {}", path.display());
        }
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let sh = Shell::new()?;
    if let Some(dir) = &args.dir {
        sh.change_dir(dir);
    }
    let mut generator = Generator::new(sh, config);
    if args.skip_export {
        generator = generator.without_export();
    }

    if args.keep_going {
        let report = generator.run_keep_going();
        tracing::info!(
            succeeded = report.succeeded().count(),
            failed = report.failed().count(),
            "finished"
        );
        if !report.is_success() {
            eyre::bail!(
                "{} of {} themes failed",
                report.failed().count(),
                report.results.len()
            );
        }
    } else {
        let generated = generator.run().wrap_err("icon generation aborted")?;
        tracing::info!(
            generated = generated.len(),
            exported = generated.iter().filter(|g| g.exported).count(),
            "finished"
        );
    }
    Ok(())
}
