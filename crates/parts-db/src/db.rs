//! Database connection and query execution.

use std::str::FromStr;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Executor, Row as _, Sqlite, SqlitePool, TypeInfo, ValueRef};

use crate::{DbError, QueryResult, Row, Value};

/// SQLite database handle.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Open (creating if missing) the database at `url`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let db = Db::open("sqlite://parts.db", 5).await?;
    /// ```
    pub async fn open(url: &str, max_connections: u32) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| DbError::OpenError(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(|e| DbError::OpenError(e.to_string()))?;

        tracing::debug!(url, max_connections, "opened sqlite pool");
        Ok(Self { pool })
    }

    /// Open a private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` is its own database, so the pool
    /// is pinned to a single connection that never expires.
    pub async fn open_in_memory() -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::OpenError(e.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::OpenError(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Run a batch of `;`-separated statements without parameters.
    ///
    /// Use this for schema creation.
    pub async fn execute_batch(&self, sql: &str) -> Result<(), DbError> {
        (&self.pool).execute(sql).await?;
        Ok(())
    }

    /// Execute a statement that doesn't return rows.
    ///
    /// Returns the number of affected rows.
    pub async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64, DbError> {
        let result = bind_all(sqlx::query(sql), params)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Execute a query and return raw results.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let result = db.query("SELECT * FROM products WHERE price < ?", params![100_000])?;
    /// for row in result.iter() {
    ///     println!("{:?}", row.get("name"));
    /// }
    /// ```
    pub async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult, DbError> {
        let rows = bind_all(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await?;

        let Some(first) = rows.first() else {
            return Ok(QueryResult::empty());
        };

        let columns: Arc<[String]> = first
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let rows = rows
            .iter()
            .map(|row| Ok(Row::new(columns.clone(), decode_row(row)?)))
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(QueryResult::new(columns, rows))
    }

    /// Execute a query and deserialize every row.
    pub async fn query_as<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<T>, DbError> {
        self.query(sql, params).await?.deserialize_all()
    }

    /// Execute a query and deserialize exactly one row.
    ///
    /// Returns [`DbError::NotFound`] if no rows are returned.
    pub async fn query_one<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<T, DbError> {
        let result = self.query(sql, params).await?;
        result.first().ok_or(DbError::NotFound)?.deserialize()
    }

    /// Execute a query and deserialize the first row, if any.
    pub async fn query_optional<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<T>, DbError> {
        let result = self.query(sql, params).await?;
        result.first().map(Row::deserialize).transpose()
    }

    /// Execute a query whose first column of the first row is an integer,
    /// such as `SELECT COUNT(*) ...`.
    pub async fn query_scalar(&self, sql: &str, params: &[Value]) -> Result<i64, DbError> {
        let result = self.query(sql, params).await?;
        let row = result.first().ok_or(DbError::NotFound)?;
        row.values()
            .first()
            .and_then(Value::as_integer)
            .ok_or_else(|| DbError::TypeError("expected integer scalar".to_string()))
    }

    /// Start a transaction on one pooled connection.
    ///
    /// Dropping the returned [`Transaction`] without calling
    /// [`Transaction::commit`] rolls it back.
    pub async fn begin(&self) -> Result<Transaction, DbError> {
        Ok(Transaction {
            tx: self.pool.begin().await?,
        })
    }
}

/// An open transaction. Statements run on the same connection until
/// [`commit`](Transaction::commit).
pub struct Transaction {
    tx: sqlx::Transaction<'static, Sqlite>,
}

impl Transaction {
    /// Execute a statement that doesn't return rows.
    pub async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<u64, DbError> {
        let result = bind_all(sqlx::query(sql), params)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn commit(self) -> Result<(), DbError> {
        self.tx.commit().await?;
        Ok(())
    }
}

fn bind_all<'q>(
    mut query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[Value],
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            Value::Null => query.bind(None::<i64>),
            Value::Integer(i) => query.bind(*i),
            Value::Real(f) => query.bind(*f),
            Value::Text(s) => query.bind(s.clone()),
            Value::Blob(b) => query.bind(b.clone()),
        };
    }
    query
}

/// Decode a row by the storage class of each value, not the declared column type.
fn decode_row(row: &SqliteRow) -> Result<Vec<Value>, DbError> {
    (0..row.columns().len())
        .map(|i| -> Result<Value, DbError> {
            let raw = row.try_get_raw(i)?;
            if raw.is_null() {
                return Ok(Value::Null);
            }
            let storage = raw.type_info().name().to_string();
            let value = match storage.as_str() {
                "INTEGER" | "BOOLEAN" => Value::Integer(row.try_get_unchecked::<i64, _>(i)?),
                "REAL" | "NUMERIC" => Value::Real(row.try_get_unchecked::<f64, _>(i)?),
                "BLOB" => Value::Blob(row.try_get_unchecked::<Vec<u8>, _>(i)?),
                _ => Value::Text(row.try_get_unchecked::<String, _>(i)?),
            };
            Ok(value)
        })
        .collect()
}
