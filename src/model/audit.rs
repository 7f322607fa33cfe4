use serde_json::Value;

/// Every event kind the audit pipeline records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditKind {
    VoiceJoin,
    VoiceLeave,
    MessageDelete,
    MessageEdit,
    MemberJoin,
    MemberLeave,
    RoleGranted,
    RoleRevoked,
    ConfigUpdated,
}

impl AuditKind {
    /// Stable tag stored in the `event_type` column and used as embed title.
    pub fn tag(&self) -> &'static str {
        match self {
            AuditKind::VoiceJoin => "VOICE_JOIN",
            AuditKind::VoiceLeave => "VOICE_LEAVE",
            AuditKind::MessageDelete => "MESSAGE_DELETE",
            AuditKind::MessageEdit => "MESSAGE_EDIT",
            AuditKind::MemberJoin => "MEMBER_JOIN",
            AuditKind::MemberLeave => "MEMBER_LEAVE",
            AuditKind::RoleGranted => "ROLE_GRANTED",
            AuditKind::RoleRevoked => "ROLE_REVOKED",
            AuditKind::ConfigUpdated => "CONFIG_UPDATED",
        }
    }

    /// Embed color for the notification: green for arrivals, red for
    /// departures and deletions, yellow for edits, blurple for role deltas.
    pub fn color(&self) -> u32 {
        match self {
            AuditKind::VoiceJoin | AuditKind::MemberJoin => 0x57F287,
            AuditKind::VoiceLeave | AuditKind::MemberLeave | AuditKind::MessageDelete => 0xED4245,
            AuditKind::MessageEdit | AuditKind::ConfigUpdated => 0xFEE75C,
            AuditKind::RoleGranted | AuditKind::RoleRevoked => 0x5865F2,
        }
    }
}

/// One event handed to `AuditService::record`.
#[derive(Clone, Debug)]
pub struct AuditEntry {
    pub guild_id: String,
    pub kind: AuditKind,
    pub actor_id: String,
    pub channel_id: Option<String>,
    pub target_id: Option<String>,
    pub details: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_unique() {
        let kinds = [
            AuditKind::VoiceJoin,
            AuditKind::VoiceLeave,
            AuditKind::MessageDelete,
            AuditKind::MessageEdit,
            AuditKind::MemberJoin,
            AuditKind::MemberLeave,
            AuditKind::RoleGranted,
            AuditKind::RoleRevoked,
            AuditKind::ConfigUpdated,
        ];
        let tags: std::collections::HashSet<_> = kinds.iter().map(|k| k.tag()).collect();
        assert_eq!(tags.len(), kinds.len());
    }

    #[test]
    fn join_and_leave_use_distinct_colors() {
        assert_ne!(AuditKind::VoiceJoin.color(), AuditKind::VoiceLeave.color());
    }
}
