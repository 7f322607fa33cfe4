use thiserror::Error;

/// Guard failures raised before a slash command mutates anything.
///
/// The `Display` text is user-facing: the dispatcher renders it verbatim as
/// an ephemeral reply.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invoker lacks the Administrator permission.
    #[error("This command requires the Administrator permission.")]
    AdministratorRequired,

    /// Command was used outside the configured admin channel.
    #[error("This command can only be used in the configured admin channel.")]
    AdminChannelOnly,

    /// Command was invoked outside a guild (e.g. in a DM).
    #[error("This command can only be used inside a server.")]
    GuildOnly,
}
