use rusqlite::Connection;

use crate::error::AgencyError;

// Timestamps are written as RFC 3339 UTC so they parse without a timezone guess.
pub fn run_migrations(conn: &Connection) -> Result<(), AgencyError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            client_name TEXT,
            status TEXT NOT NULL DEFAULT 'pending',
            priority TEXT NOT NULL DEFAULT 'medium'
                CHECK (priority IN ('low', 'medium', 'high')),
            due_date TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS policies (
            id TEXT PRIMARY KEY,
            policy_number TEXT NOT NULL UNIQUE,
            client_name TEXT NOT NULL,
            carrier TEXT NOT NULL,
            policy_type TEXT,
            premium REAL NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'active'
                CHECK (status IN ('active', 'pending', 'cancelled', 'expired')),
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
        CREATE INDEX IF NOT EXISTS idx_tasks_due ON tasks(due_date)
            WHERE due_date IS NOT NULL;
        CREATE INDEX IF NOT EXISTS idx_policies_status ON policies(status);
        ",
    )?;
    Ok(())
}
