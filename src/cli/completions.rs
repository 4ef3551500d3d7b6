use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    fpack completions bash > ~/.bash_completion.d/fpack\n\n\
                  Generate zsh completions:\n    fpack completions zsh > ~/.zfunc/_fpack\n\n\
                  Generate fish completions:\n    fpack completions fish > ~/.config/fish/completions/fpack.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
