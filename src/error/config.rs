use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined.
    /// Check the `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// `COMMAND_SCOPE` is neither `global` nor `guild`.
    #[error("Invalid COMMAND_SCOPE value: {0} (expected 'global' or 'guild')")]
    InvalidCommandScope(String),

    /// `DISCORD_GUILD_ID` is not a numeric snowflake.
    #[error("Invalid DISCORD_GUILD_ID value: {0}")]
    InvalidGuildId(String),
}
