use crate::error::{config::ConfigError, AppError};

/// Scope for slash-command registration, selected by `COMMAND_SCOPE`.
///
/// The full command set is bulk-replaced at startup either globally or for
/// the single configured guild.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandScope {
    Global,
    Guild(u64),
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub discord_token: String,
    pub command_scope: CommandScope,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;
        let discord_token = std::env::var("DISCORD_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()))?;
        let scope = std::env::var("COMMAND_SCOPE")
            .map_err(|_| ConfigError::MissingEnvVar("COMMAND_SCOPE".to_string()))?;
        let guild_id = std::env::var("DISCORD_GUILD_ID").ok();

        Ok(Self {
            database_url,
            discord_token,
            command_scope: parse_command_scope(&scope, guild_id.as_deref())?,
        })
    }
}

/// Parses `COMMAND_SCOPE` plus the optional `DISCORD_GUILD_ID` into a scope.
///
/// `guild` scope requires a numeric guild id; any other scope value is
/// rejected rather than silently falling back to global registration.
fn parse_command_scope(
    scope: &str,
    guild_id: Option<&str>,
) -> Result<CommandScope, ConfigError> {
    match scope {
        "global" => Ok(CommandScope::Global),
        "guild" => {
            let raw = guild_id
                .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_GUILD_ID".to_string()))?;
            let id = raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidGuildId(raw.to_string()))?;
            Ok(CommandScope::Guild(id))
        }
        other => Err(ConfigError::InvalidCommandScope(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_scope() {
        assert_eq!(
            parse_command_scope("global", None).unwrap(),
            CommandScope::Global
        );
    }

    #[test]
    fn parses_guild_scope_with_id() {
        assert_eq!(
            parse_command_scope("guild", Some("42")).unwrap(),
            CommandScope::Guild(42)
        );
    }

    #[test]
    fn guild_scope_without_id_is_rejected() {
        assert!(matches!(
            parse_command_scope("guild", None),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn non_numeric_guild_id_is_rejected() {
        assert!(matches!(
            parse_command_scope("guild", Some("not-a-snowflake")),
            Err(ConfigError::InvalidGuildId(_))
        ));
    }

    #[test]
    fn unknown_scope_is_rejected() {
        assert!(matches!(
            parse_command_scope("regional", None),
            Err(ConfigError::InvalidCommandScope(_))
        ));
    }
}
