//! Guild configuration slash command: /config

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

/// Creates the config command with get/set/reset subcommands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    let mut cmd = CreateApplicationCommand::default();

    cmd.name("config")
        .description("Inspect or change this server's bot configuration (owner only)");

    cmd.create_option(|subcommand| {
        subcommand
            .name("get")
            .description("Show the current configuration")
            .kind(CommandOptionType::SubCommand)
    });

    cmd.create_option(|subcommand| {
        subcommand
            .name("set")
            .description("Change one or more configuration values")
            .kind(CommandOptionType::SubCommand)
            .create_sub_option(|o| {
                o.name("channel")
                    .description("Channel where reminders are posted")
                    .kind(CommandOptionType::Channel)
                    .required(false)
            })
            .create_sub_option(|o| {
                o.name("user")
                    .description("User whose reminder times drive this server")
                    .kind(CommandOptionType::User)
                    .required(false)
            })
            .create_sub_option(|o| {
                o.name("language")
                    .description("Language used for bot messages")
                    .kind(CommandOptionType::String)
                    .required(false)
                    .add_string_choice("English", "en")
                    .add_string_choice("Español", "es")
            })
    });

    cmd.create_option(|subcommand| {
        subcommand
            .name("reset")
            .description("Reset the configuration to defaults")
            .kind(CommandOptionType::SubCommand)
    });

    vec![cmd]
}
