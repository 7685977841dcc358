// Shared lock for tests that mutate process-wide environment variables
// (HOME and the BRASA_* overrides). Config resolution reads the real env,
// so those tests must not interleave.

use std::sync::{Mutex, MutexGuard, OnceLock};

pub fn lock_test_env() -> MutexGuard<'static, ()> {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner())
}
