use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    clerk completions bash > ~/.bash_completion.d/clerk\n\n\
                  Generate zsh completions:\n    clerk completions zsh > ~/.zfunc/_clerk\n\n\
                  Generate fish completions:\n    clerk completions fish > ~/.config/fish/completions/clerk.fish\n\n\
                  Generate PowerShell completions:\n    clerk completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
