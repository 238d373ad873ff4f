use sqlx::SqliteConnection;

/// Owns the clients used to reach systems outside the process. Business logic accepts
/// an implementation of this trait rather than a concrete database handle so driven
/// adapters can be swapped for in-memory fakes in tests.
pub trait ExternalConnectivity: Sync {
    type DbHandle<'cxn_borrow>: ConnectionHandle
    where
        Self: 'cxn_borrow;

    /// Acquires a database connection scoped to the current request. The connection is
    /// released when the returned handle drops, on every exit path.
    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error>;
}

/// A handle owning an active database connection which can lend it out for queries
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut SqliteConnection;
}
