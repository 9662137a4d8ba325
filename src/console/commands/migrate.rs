use actix_web::rt;

pub struct MigrateCommand;

impl MigrateCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MigrateCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl crate::console::commands::CallableTrait for MigrateCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        rt::System::new().block_on(async {
            let pool = super::connect().await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            println!("Migrations applied");
            Ok(())
        })
    }
}
