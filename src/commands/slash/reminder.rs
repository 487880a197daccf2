//! Reminder slash command: /reminder

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

/// Creates the reminder command with list/add/delete subcommands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    let mut cmd = CreateApplicationCommand::default();

    cmd.name("reminder")
        .description("Manage your daily reminder times");

    cmd.create_option(|subcommand| {
        subcommand
            .name("list")
            .description("List your reminder times")
            .kind(CommandOptionType::SubCommand)
    });

    cmd.create_option(|subcommand| {
        subcommand
            .name("add")
            .description("Add a daily reminder time")
            .kind(CommandOptionType::SubCommand)
            .create_sub_option(|o| {
                o.name("time")
                    .description("Local time in HH:MM format (24h)")
                    .kind(CommandOptionType::String)
                    .required(true)
            })
    });

    cmd.create_option(|subcommand| {
        subcommand
            .name("delete")
            .description("Remove a reminder by its id")
            .kind(CommandOptionType::SubCommand)
            .create_sub_option(|o| {
                o.name("id")
                    .description("The reminder id to remove")
                    .kind(CommandOptionType::Integer)
                    .required(true)
            })
    });

    vec![cmd]
}
