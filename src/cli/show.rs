use clap::Parser;

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show installed feature packs and packages:\n    fpack show\n\n\
                  Include resolved package parameters:\n    fpack show --parameters")]
pub struct ShowArgs {
    /// Show resolved package parameters
    #[arg(long, short = 'p')]
    pub parameters: bool,
}
