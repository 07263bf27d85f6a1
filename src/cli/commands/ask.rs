use anyhow::Result;

use crate::cli::{BackendArgs, GlobalArgs};
use crate::client::{AskOptions, ChatClient};
use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::input::InputReader;
use crate::provider::ProviderRegistry;
use crate::ui::Spinner;

use super::{history_sink, print_stream};

pub struct AskArgs {
    pub question: Vec<String>,
    pub backend: BackendArgs,
    pub no_stream: bool,
    pub global: GlobalArgs,
}

pub async fn run_ask(args: AskArgs) -> Result<()> {
    let config_file = ConfigManager::new()?.load_or_default()?;
    let resolved = resolve_config(
        &ResolveOptions {
            provider: args.backend.provider,
            model: args.backend.model,
            ..ResolveOptions::default()
        },
        &config_file,
    )?;

    let question = InputReader::read(&args.question)?;

    let mut client = ChatClient::new(ProviderRegistry::builtin());
    if let Some(sink) = history_sink(args.global.no_history) {
        client = client.with_history(sink);
    }

    let options = AskOptions {
        provider: resolved.provider.as_str().to_string(),
        model: resolved.model,
        credentials: resolved.credentials,
    };

    let spinner = Spinner::new("Thinking...", !args.global.quiet);

    if args.no_stream {
        let answer = client.ask(&question, &options).await?;
        spinner.stop();
        println!("{answer}");
    } else {
        let fragments = client.ask_fragments(&question, &options).await?;
        print_stream(fragments, &spinner).await?;
    }

    Ok(())
}
