use anyhow::Result;
use clap::Parser;

use lingo::cli::commands::{ask, chat, configure, history, providers, translate};
use lingo::cli::{Args, BackendArgs, Command, exit_code_for};
use lingo::translation::print_languages;
use lingo::{logging, ui};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.global.verbose);

    if let Err(err) = run(args).await {
        tracing::debug!("command failed: {err:?}");
        ui::print_error(&err);
        std::process::exit(exit_code_for(&err));
    }
}

async fn run(args: Args) -> Result<()> {
    let global = args.global;

    match args.command {
        Some(Command::Languages) => print_languages(),
        Some(Command::Providers) => providers::print_providers()?,
        Some(Command::History { limit, clear }) => history::run_history(limit, clear)?,
        Some(Command::Configure {
            show,
            provider,
            from,
            to,
            key,
        }) => configure::run_configure(configure::ConfigureArgs {
            show,
            provider,
            from,
            to,
            key,
        })?,
        Some(Command::Ask {
            question,
            backend,
            no_stream,
        }) => {
            ask::run_ask(ask::AskArgs {
                question,
                backend: merge_backend(backend, args.backend),
                no_stream,
                global,
            })
            .await?;
        }
        Some(Command::Chat { backend }) => {
            chat::run_chat(merge_backend(backend, args.backend), global).await?;
        }
        None => {
            translate::run_translate(translate::TranslateArgs {
                text: args.text,
                from: args.from,
                to: args.to,
                backend: args.backend,
                global,
            })
            .await?;
        }
    }

    Ok(())
}

/// Subcommand flags win over the ones given before the subcommand.
fn merge_backend(subcommand: BackendArgs, top_level: BackendArgs) -> BackendArgs {
    BackendArgs {
        provider: subcommand.provider.or(top_level.provider),
        model: subcommand.model.or(top_level.model),
    }
}
