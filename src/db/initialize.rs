use crate::db::log::ttlog_quiet;
use crate::db::store::LogStore;
use crate::errors::AppResult;

/// Make sure the time log exists, recording its creation in the audit log.
pub fn init_log(store: &LogStore) -> AppResult<bool> {
    let created = store.ensure()?;

    if created {
        ttlog_quiet(
            store.path(),
            "init",
            "time log",
            &format!("Time log created at {}", store.path().display()),
        );
    }

    Ok(created)
}
