//! Chat mode UI components.

use crate::error::ProviderError;
use crate::provider::{ProviderDescriptor, ProviderId};
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(provider: ProviderId) {
    println!(
        "{} {} - Interactive Chat ({})",
        Style::header("lingo"),
        Style::secondary(format!("v{VERSION}")),
        Style::value(provider)
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_config(descriptor: &ProviderDescriptor, model: Option<&str>) {
    let model = model
        .or(descriptor.default_model.as_deref())
        .unwrap_or_default();

    println!("{}", Style::header("Configuration"));
    println!(
        "  {}  {}",
        Style::label("provider"),
        Style::value(&descriptor.display_name)
    );
    println!("  {}     {}", Style::label("model"), Style::value(model));
    println!(
        "  {}  {}",
        Style::label("endpoint"),
        Style::secondary(descriptor.chat_completions_url())
    );
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    let commands = [
        ("/config", "Show the current provider and model"),
        ("/help", "Show this help"),
        ("/model [name]", "Use another model, or the default one"),
        ("/provider <id>", "Switch to deepseek, qwen or openai"),
        ("/quit", "Exit chat mode"),
    ];
    for (command, description) in commands {
        println!(
            "  {}  {}",
            Style::command(format!("{command:<14}")),
            Style::secondary(description)
        );
    }
    println!();
}

pub fn print_message_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}

pub fn print_provider_error(err: &ProviderError) {
    eprintln!("{} {}", Style::error("Error:"), err.kind);
    eprintln!("  {}", Style::hint(&err.hint));
    eprintln!();
}
