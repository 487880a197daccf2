//! Task slash commands: /add, /list, /delete, /setdone, /setpending

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

/// Creates task commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_add_command(),
        create_list_command(),
        create_delete_command(),
        create_setdone_command(),
        create_setpending_command(),
    ]
}

/// Creates the add command
fn create_add_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("add")
        .description("Add a new task with a due date")
        .create_option(|option| {
            option
                .name("date")
                .description("Due date in YYYY-MM-DD format")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("task")
                .description("What needs doing")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .to_owned()
}

/// Creates the list command
fn create_list_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("list")
        .description("List this server's tasks")
        .create_option(|option| {
            option
                .name("status")
                .description("Filter by completion status")
                .kind(CommandOptionType::String)
                .required(false)
                .add_string_choice("done", "done")
                .add_string_choice("pending", "pending")
        })
        .to_owned()
}

/// Creates the delete command
fn create_delete_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("delete")
        .description("Delete a task by its id")
        .create_option(|option| {
            option
                .name("id")
                .description("The task id to delete")
                .kind(CommandOptionType::Integer)
                .required(true)
        })
        .to_owned()
}

/// Creates the setdone command
fn create_setdone_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("setdone")
        .description("Mark a task as done")
        .create_option(|option| {
            option
                .name("id")
                .description("The task id to mark done")
                .kind(CommandOptionType::Integer)
                .required(true)
        })
        .to_owned()
}

/// Creates the setpending command
fn create_setpending_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("setpending")
        .description("Mark a task as pending again")
        .create_option(|option| {
            option
                .name("id")
                .description("The task id to mark pending")
                .kind(CommandOptionType::Integer)
                .required(true)
        })
        .to_owned()
}
