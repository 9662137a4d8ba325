use crate::models::{User, UserFlags};
use crate::repository::{ChatRepository, PgRepository};
use actix_web::rt;

fn report(username: &str, user: Option<User>) -> Result<(), Box<dyn std::error::Error>> {
    match user {
        Some(user) => {
            println!(
                "{}: is_pro={} is_admin={}",
                user.username, user.is_pro, user.is_admin
            );
            Ok(())
        }
        None => Err(format!("user {username} not found").into()),
    }
}

async fn apply(username: &str, flags: UserFlags) -> Result<(), Box<dyn std::error::Error>> {
    let repository = PgRepository::new(super::connect().await?);
    let user = repository.update_user_flags(username, flags).await?;
    report(username, user)
}

/// Grants or revokes access to the admin statistics.
pub struct PromoteCommand {
    username: String,
    revoke: bool,
}

impl PromoteCommand {
    pub fn new(username: String, revoke: bool) -> Self {
        Self { username, revoke }
    }
}

impl crate::console::commands::CallableTrait for PromoteCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let flags = UserFlags {
            is_admin: Some(!self.revoke),
            ..UserFlags::default()
        };
        rt::System::new().block_on(apply(&self.username, flags))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Plan {
    Free,
    Pro,
}

/// Switches a user between the free and pro plans.
pub struct PlanCommand {
    username: String,
    plan: Plan,
}

impl PlanCommand {
    pub fn new(username: String, plan: Plan) -> Self {
        Self { username, plan }
    }
}

impl crate::console::commands::CallableTrait for PlanCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let flags = UserFlags {
            is_pro: Some(self.plan == Plan::Pro),
            ..UserFlags::default()
        };
        rt::System::new().block_on(apply(&self.username, flags))
    }
}
