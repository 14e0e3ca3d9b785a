use anyhow::{bail, Context, Result};
use rusqlite::Connection;

/// Schema scripts in order. Entry `n` takes `user_version` from `n` to `n + 1`.
const MIGRATIONS: &[&str] = &[include_str!("schemas/schema_v1.sql")];

fn latest_version() -> i32 {
    MIGRATIONS.len() as i32
}

/// Bring the `kv` schema up to date inside one transaction.
pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let current: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")?;
    let latest = latest_version();

    if current > latest {
        bail!("database schema v{current} is newer than this build understands (v{latest})");
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;
    for (index, script) in MIGRATIONS.iter().enumerate().skip(current as usize) {
        let version = index + 1;
        tx.execute_batch(script)
            .with_context(|| format!("failed to apply schema v{version}"))?;
    }
    tx.pragma_update(None, "user_version", latest)
        .context("failed to update user_version pragma")?;
    tx.commit().context("failed to commit migrations")?;

    Ok(())
}
