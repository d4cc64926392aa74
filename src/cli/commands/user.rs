use anyhow::Context;
use clap::Subcommand;

use crate::auth::hash_secret;
use crate::config::AppConfig;
use crate::database::{DatabaseError, DatabaseManager, NewUser, PgUserRepository, UserRepository};

pub const DEFAULT_ROLE: &str = "ROLE_USER";

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user; the password is stored as an Argon2 hash")]
    Add {
        #[arg(help = "Login")]
        login: String,
        #[arg(help = "Password")]
        senha: String,
        #[arg(long = "role", help = "Granted role, repeatable (default ROLE_USER)")]
        roles: Vec<String>,
    },
}

pub async fn handle(cmd: UserCommands, config: &AppConfig) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Add { login, senha, roles } => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            let users = PgUserRepository::new(pool);

            let user = users
                .insert(NewUser {
                    login: login.clone(),
                    senha: hash_secret(&senha)?,
                    roles: roles_or_default(roles),
                })
                .await
                .map_err(|e| match e {
                    DatabaseError::UniqueViolation(_) => anyhow::anyhow!("login '{}' already exists", login),
                    other => anyhow::Error::new(other).context("failed to create user"),
                })?;

            println!("Created user '{}' (id {}) with roles {:?}", user.login, user.id, user.roles);
            Ok(())
        }
    }
}

fn roles_or_default(roles: Vec<String>) -> Vec<String> {
    if roles.is_empty() {
        vec![DEFAULT_ROLE.to_string()]
    } else {
        roles
    }
}
