//! CLI commands

use anyhow::{Context, Result};
use clap::Subcommand;
use gallery_frontend_common::{FileStorage, Session};
use gallery_http::client::{ClientConfig, GalleryClient};
use gallery_http::types::CredentialModel;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config;

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the returned token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "GALLERY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create a new account
    Register {
        #[arg(long)]
        email: String,

        #[arg(long, env = "GALLERY_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log out and forget the stored token
    Logout,

    /// Show the stored token's state
    Status,
}

/// Everything a command needs, resolved once at startup
pub struct CommandContext {
    pub data_dir: PathBuf,
    pub client_config: ClientConfig,
}

impl CommandContext {
    pub fn load(data_dir: PathBuf, backend: Option<String>) -> Result<Self> {
        let client_config = config::load_client_config(&data_dir, backend)?;
        Ok(Self {
            data_dir,
            client_config,
        })
    }

    fn session(&self) -> Result<Session> {
        let client = GalleryClient::from_config(&self.client_config)?;
        let storage = Arc::new(FileStorage::in_dir(&self.data_dir));
        Session::new(client, storage)
            .with_context(|| format!("Failed to open token store in {}", self.data_dir.display()))
    }
}

impl Commands {
    pub async fn execute(self, context: &CommandContext) -> Result<()> {
        let session = context.session()?;

        match self {
            Commands::Login { email, password } => {
                let credentials = CredentialModel::new(email, password);
                let token = session.login(&credentials).await.context("Login failed")?;
                println!(
                    "Logged in as {}{} (token expires {})",
                    credentials.email,
                    if token.admin { " [admin]" } else { "" },
                    token.expiration.to_rfc3339()
                );
                Ok(())
            }
            Commands::Register { email, password } => {
                let credentials = CredentialModel::new(email, password);
                session
                    .register(&credentials)
                    .await
                    .context("Registration failed")?;
                println!("Registered {}", credentials.email);
                Ok(())
            }
            Commands::Logout => {
                session.logout().await.context("Logout failed")?;
                println!("Logged out");
                Ok(())
            }
            Commands::Status => {
                if session.validate()? {
                    info!("Stored token had expired and was removed");
                }
                println!("{}", describe(&session));
                Ok(())
            }
        }
    }
}

fn describe(session: &Session) -> String {
    match session.token() {
        Some(token) => format!(
            "Logged in{} against {} (token expires {})",
            if token.admin { " as admin" } else { "" },
            session.client().base_url(),
            token.expiration.to_rfc3339()
        ),
        None => format!("Not logged in against {}", session.client().base_url()),
    }
}
