use std::fs;

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use oreh::db::{DbPool, establish_connection_pool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// An on-disk SQLite database that lives for one test and cleans up after
/// itself, WAL side files included.
pub struct TestDb {
    name: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let _ = fs::remove_file(name);
        let pool = establish_connection_pool(name).expect("failed to create test pool");
        {
            let mut conn = pool.get().expect("failed to get test connection");
            conn.run_pending_migrations(MIGRATIONS)
                .expect("failed to run migrations");
        }
        Self {
            name: name.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.name);
        let _ = fs::remove_file(format!("{}-wal", self.name));
        let _ = fs::remove_file(format!("{}-shm", self.name));
    }
}
