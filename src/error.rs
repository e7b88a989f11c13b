/// Errors that can occur in the glove tracking core.
///
/// Nothing here is fatal to the host process: property and snapshot misses
/// degrade to "no match"/"invalid pose", registration failures degrade to
/// running without skeletal input, and per-sample processing faults are
/// logged and dropped at the callback boundary.
#[derive(Debug, thiserror::Error)]
pub enum GloveError {
    #[error("device property read failed: {0}")]
    Property(String),

    #[error("pose snapshot read failed: {0}")]
    Snapshot(String),

    #[error("skeletal component registration failed: {0}")]
    SkeletonRegistration(String),

    #[error("skeleton update failed: {0}")]
    SkeletonUpdate(String),

    #[error("input forwarding failed: {0}")]
    Input(String),

    #[error("input sample processing failed: {0}")]
    InputProcessing(String),

    #[error("communication channel error: {0}")]
    Comm(String),

    #[error("communication channel disconnected")]
    ChannelDisconnected,
}
