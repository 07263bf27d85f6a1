use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lingo")]
#[command(about = "Translate text and ask questions through free and OpenAI-compatible backends")]
#[command(version)]
pub struct Args {
    /// Text to translate (reads from stdin if not provided)
    pub text: Vec<String>,

    /// Source language code, or "auto" to detect
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Target language code (e.g. en, zh, ja)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Provider selection shared by every command that calls a backend.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct BackendArgs {
    /// Provider: google, deepseek, qwen or openai
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Model name (defaults to the provider's default model)
    #[arg(short = 'm', long)]
    pub model: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, Copy, Default)]
pub struct GlobalArgs {
    /// Do not show the progress spinner
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Print debug logs to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Do not record this call in the history
    #[arg(long, global = true)]
    pub no_history: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask a chat provider a question
    Ask {
        /// The question (reads from stdin if not provided)
        question: Vec<String>,

        #[command(flatten)]
        backend: BackendArgs,

        /// Wait for the complete answer instead of streaming it
        #[arg(long)]
        no_stream: bool,
    },
    /// Interactive chat session
    Chat {
        #[command(flatten)]
        backend: BackendArgs,
    },
    /// List providers and their credential status
    Providers,
    /// List supported language codes
    Languages,
    /// Edit default settings and API keys
    Configure {
        /// Show the current configuration
        #[arg(long)]
        show: bool,

        /// Set the default provider
        #[arg(long)]
        provider: Option<String>,

        /// Set the default source language
        #[arg(long)]
        from: Option<String>,

        /// Set the default target language
        #[arg(long)]
        to: Option<String>,

        /// Prompt for the API key of this provider and store it
        #[arg(long, value_name = "PROVIDER")]
        key: Option<String>,
    },
    /// Show or clear recent translations and answers
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,

        /// Delete all history entries
        #[arg(long)]
        clear: bool,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_words_and_flags() {
        let args = Args::try_parse_from(["lingo", "-t", "ja", "-p", "qwen", "good", "night"]).unwrap();
        assert_eq!(args.text, vec!["good", "night"]);
        assert_eq!(args.to.as_deref(), Some("ja"));
        assert_eq!(args.backend.provider.as_deref(), Some("qwen"));
        assert!(args.command.is_none());
    }

    #[test]
    fn test_ask_subcommand() {
        let args =
            Args::try_parse_from(["lingo", "ask", "-p", "deepseek", "--no-stream", "why?"]).unwrap();
        let Some(Command::Ask {
            question,
            backend,
            no_stream,
        }) = args.command
        else {
            panic!("expected ask");
        };
        assert_eq!(question, vec!["why?"]);
        assert_eq!(backend.provider.as_deref(), Some("deepseek"));
        assert!(no_stream);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["lingo", "ask", "hi", "--quiet", "--no-history"]).unwrap();
        assert!(args.global.quiet);
        assert!(args.global.no_history);
    }

    #[test]
    fn test_history_default_limit() {
        let args = Args::try_parse_from(["lingo", "history"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Command::History {
                limit: 20,
                clear: false
            })
        ));
    }
}
