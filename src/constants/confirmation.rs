pub const DEFAULT_CONFIRMATION_MAX_ATTEMPTS: u32 = 25;

pub const DEFAULT_CONFIRMATION_INITIAL_BACKOFF_MS: u64 = 1000;

pub const DEFAULT_CONFIRMATION_MAX_BACKOFF_MS: u64 = 15_000;
