//! Shared embedded PostgreSQL cluster for the integration suites.
//!
//! `pg-embed-setup-unpriv` keeps one cluster alive for the whole test
//! process. Bootstrapping occasionally races with a previous binary's
//! shutdown, so the handle is fetched with a short retry loop.

use std::time::Duration;

use pg_embedded_setup_unpriv::{BootstrapResult, ClusterHandle};

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Returns the process-wide cluster handle, retrying transient bootstrap
/// failures.
pub fn shared_cluster_handle() -> BootstrapResult<&'static ClusterHandle> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) => {
                if attempt >= SHARED_CLUSTER_RETRIES {
                    return Err(error);
                }
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Pin `PG_PASSWORD` so template databases stay reachable across runs.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: called before the library spawns any threads. The shared
        // cluster singleton serialises bootstrap, so this runs once per process.
        unsafe {
            std::env::set_var("PG_PASSWORD", "social_schema_embedded_test");
        }
    }
}
