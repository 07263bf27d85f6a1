use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::collections::HashMap;

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::cli::commands::print_stream;
use crate::client::{AskOptions, ChatClient};
use crate::error::ProviderError;
use crate::provider::{CredentialConfig, ProviderId, ProviderRegistry};
use crate::ui::{Spinner, Style};

/// Configuration for a chat session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub provider: ProviderId,
    /// Model override; `None` uses the provider's default model.
    pub model: Option<String>,
    pub credentials: CredentialConfig,
    /// Per-provider models from the config file, applied on `/provider`.
    pub configured_models: HashMap<String, String>,
    /// Show a spinner while waiting for the first fragment.
    pub spinner: bool,
}

impl SessionConfig {
    fn ask_options(&self) -> AskOptions {
        AskOptions {
            provider: self.provider.as_str().to_string(),
            model: self.model.clone(),
            credentials: self.credentials.clone(),
        }
    }

    /// Switches to another chat provider, picking up its configured model.
    fn switch_provider(&mut self, registry: &ProviderRegistry, id: &str) -> Result<(), ProviderError> {
        let descriptor = registry.lookup(id)?;
        if !descriptor.supports_chat() {
            return Err(ProviderError::unsupported_operation(descriptor));
        }

        self.provider = descriptor.id;
        self.model = self.configured_models.get(descriptor.id.as_str()).cloned();
        Ok(())
    }
}

/// An interactive question-and-answer session.
pub struct ChatSession {
    config: SessionConfig,
    client: ChatClient,
}

impl ChatSession {
    pub const fn new(config: SessionConfig, client: ChatClient) -> Self {
        Self { config, client }
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header(self.config.provider);

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Ask anything, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    Input::Question(question) => {
                        self.ask_and_print(&question).await?;
                    }
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!();
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Config => {
                let descriptor = self.client.registry().get(self.config.provider);
                ui::print_config(descriptor, self.config.model.as_deref());
            }
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Quit => return false,
            SlashCommand::Provider(None) => ui::print_message_error("Usage: /provider <id>"),
            SlashCommand::Provider(Some(id)) => {
                match self.config.switch_provider(self.client.registry(), &id) {
                    Ok(()) => println!(
                        "{} Provider set to {}\n",
                        Style::success("✓"),
                        Style::value(self.config.provider)
                    ),
                    Err(e) => ui::print_provider_error(&e),
                }
            }
            SlashCommand::Model(model) => {
                match &model {
                    Some(name) => println!(
                        "{} Model set to {}\n",
                        Style::success("✓"),
                        Style::value(name)
                    ),
                    None => println!("{} Using the provider's default model\n", Style::success("✓")),
                }
                self.config.model = model;
            }
            SlashCommand::Unknown(cmd) => {
                ui::print_message_error(&format!("Unknown command: /{cmd}"));
            }
        }
        true
    }

    /// Streams one answer to stdout. Provider failures are reported and the
    /// session continues.
    async fn ask_and_print(&self, question: &str) -> Result<()> {
        let spinner = Spinner::new("Thinking...", self.config.spinner);

        match self
            .client
            .ask_fragments(question, &self.config.ask_options())
            .await
        {
            Ok(fragments) => {
                print_stream(fragments, &spinner).await?;
                println!();
            }
            Err(e) => {
                spinner.stop();
                ui::print_provider_error(&e);
            }
        }

        Ok(())
    }
}
