use std::env;

use anyhow::Context;
use business::application::cart::recovery::RecoveryPolicy;

/// Load the recovery policy from environment variables
///
/// Environment variables:
/// - CART_REFRESH_AFTER_FAILURES: Consecutive failures before a full refresh
///   (default: 3, 0 disables)
pub fn from_env() -> anyhow::Result<RecoveryPolicy> {
    from_value(env::var("CART_REFRESH_AFTER_FAILURES").ok())
}

fn from_value(raw: Option<String>) -> anyhow::Result<RecoveryPolicy> {
    match raw {
        Some(raw) => {
            let refresh_after_failures = raw.trim().parse::<u32>().with_context(|| {
                format!("CART_REFRESH_AFTER_FAILURES must be a number: {}", raw)
            })?;
            Ok(RecoveryPolicy {
                refresh_after_failures,
            })
        }
        None => Ok(RecoveryPolicy::default()),
    }
}
