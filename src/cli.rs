use icon_variants::Mode;
use std::path::PathBuf;

/// Generate themed variants of the application icon.
#[derive(argh::FromArgs)]
pub struct Args {
    /// theme configuration file to use instead of the built-in table
    #[argh(option, short = 'c')]
    pub config: Option<PathBuf>,

    /// directory containing the template; outputs are written there too
    #[argh(option, short = 'C')]
    pub dir: Option<PathBuf>,

    /// substitution mode, either `hashed` or `bare`
    #[argh(option)]
    pub mode: Option<Mode>,

    /// only generate the given theme (can be repeated)
    #[argh(option, short = 't', long = "theme")]
    pub themes: Vec<String>,

    /// write the recolored SVGs without running the exporter
    #[argh(switch)]
    pub skip_export: bool,

    /// continue after a failed theme and report all failures at the end
    #[argh(switch, short = 'k')]
    pub keep_going: bool,

    /// print the resolved configuration and exit
    #[argh(switch)]
    pub print_config: bool,

    /// enable debug logging
    #[argh(switch, short = 'v')]
    pub verbose: bool,
}
