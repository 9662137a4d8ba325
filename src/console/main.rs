use chatbridge::console::commands::{self, user::Plan, CallableTrait};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Debug, Subcommand)]
enum UserCommands {
    /// Make a user an administrator
    Promote {
        #[arg(long)]
        username: String,
        #[arg(long)]
        revoke: bool,
    },
    /// Change the plan of a user
    Plan {
        #[arg(long)]
        username: String,
        #[arg(long, value_enum)]
        plan: Plan,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    get_command(cli).call()
}

fn get_command(cli: Cli) -> Box<dyn CallableTrait> {
    match cli.command {
        Commands::Migrate => Box::new(commands::MigrateCommand::new()),
        Commands::User { command } => match command {
            UserCommands::Promote { username, revoke } => {
                Box::new(commands::PromoteCommand::new(username, revoke))
            }
            UserCommands::Plan { username, plan } => {
                Box::new(commands::PlanCommand::new(username, plan))
            }
        },
    }
}
