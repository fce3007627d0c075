//! Database connection setup.
//!
//! Connection parameters live in an explicit [`ConnectOptions`] value owned
//! by the orchestration routine; there is no shared global client. The
//! password is read from the `DB_PASSWORD` environment variable only, never
//! from the command line.

use std::env;

use log::error;
use tokio_postgres::{Client, Config, NoTls};

use crate::error::Error;

/// Environment variable supplying the database password.
pub const PASSWORD_ENV: &str = "DB_PASSWORD";

#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
}

impl ConnectOptions {
    /// Human-readable connection target for log and error messages.
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.dbname)
    }

    /// Establishes the connection and spawns its driver task.
    ///
    /// The returned client is the run's single connection; dropping it shuts
    /// the driver task down, which is the only cleanup the run needs on any
    /// exit path.
    pub async fn connect(&self) -> Result<Client, Error> {
        let password =
            env::var(PASSWORD_ENV).map_err(|_| Error::MissingPassword(PASSWORD_ENV))?;
        let mut config = Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.dbname)
            .user(&self.user)
            .password(password)
            .application_name(env!("CARGO_PKG_NAME"));
        let (client, connection) =
            config
                .connect(NoTls)
                .await
                .map_err(|source| Error::Connection {
                    target: self.target(),
                    source,
                })?;
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                error!("Database connection error: {err}");
            }
        });
        Ok(client)
    }
}
