//! Shared context for command handlers

use crate::api::ApiClient;

/// Services every command handler needs: the remote store client and a few
/// deployment constants.
#[derive(Clone)]
pub struct CommandContext {
    pub api: ApiClient,
    /// Channel receiving operational diagnostics from command handlers.
    pub operator_channel_id: u64,
    /// Fixed local offset, used to render due-date timestamps.
    pub local_utc_offset_hours: i32,
    pub start_time: std::time::Instant,
}

impl CommandContext {
    pub fn new(api: ApiClient, operator_channel_id: u64, local_utc_offset_hours: i32) -> Self {
        CommandContext {
            api,
            operator_channel_id,
            local_utc_offset_hours,
            start_time: std::time::Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        // shared across handlers as Arc, but Clone keeps construction simple
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }
}
