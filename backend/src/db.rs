use anyhow::Result;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{QueryBuilder, Row, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

use shared::{Acronym, AcronymData, User, UserData};

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:acronyms.db";

/// A field of the acronyms table that queries may filter or sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcronymField {
    Short,
    Long,
}

impl AcronymField {
    fn column(self) -> &'static str {
        match self {
            AcronymField::Short => "short",
            AcronymField::Long => "long",
        }
    }
}

/// One equality predicate for [`DbConnection::filter_acronyms_or`].
#[derive(Debug, Clone)]
pub struct FieldPredicate {
    pub field: AcronymField,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Foreign keys are off by default in SQLite; the acronyms table
        // relies on them to reject dangling owner references.
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database. `DATABASE_URL` overrides the
    /// default on-disk location.
    pub async fn init() -> Result<Self> {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DATABASE_URL.to_string());
        Self::new(&url).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().simple().to_string();
        let db_url = format!("sqlite:file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                username TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS acronyms (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                short TEXT NOT NULL,
                long TEXT NOT NULL,
                user_id INTEGER NOT NULL REFERENCES users(id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// List every acronym in storage order.
    pub async fn list_acronyms(&self) -> Result<Vec<Acronym>> {
        let rows = sqlx::query("SELECT id, short, long, user_id FROM acronyms")
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.iter().map(acronym_from_row).collect())
    }

    /// Retrieve a single acronym by id.
    pub async fn get_acronym(&self, id: i64) -> Result<Option<Acronym>> {
        let row = sqlx::query("SELECT id, short, long, user_id FROM acronyms WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.as_ref().map(acronym_from_row))
    }

    /// Insert a new acronym and return it with its store-assigned id.
    pub async fn insert_acronym(&self, data: &AcronymData) -> Result<Acronym> {
        let result = sqlx::query("INSERT INTO acronyms (short, long, user_id) VALUES (?, ?, ?)")
            .bind(&data.short)
            .bind(&data.long)
            .bind(data.user_id)
            .execute(&*self.pool)
            .await?;

        let id = result.last_insert_rowid();
        if id == 0 {
            // A save that cannot produce an id must never pass silently.
            anyhow::bail!("insert reported no row id");
        }

        Ok(Acronym {
            id,
            short: data.short.clone(),
            long: data.long.clone(),
            user_id: data.user_id,
        })
    }

    /// Overwrite the acronym with the given id.
    /// Returns false if no row has that id.
    pub async fn update_acronym(&self, id: i64, data: &AcronymData) -> Result<bool> {
        let result = sqlx::query("UPDATE acronyms SET short = ?, long = ?, user_id = ? WHERE id = ?")
            .bind(&data.short)
            .bind(&data.long)
            .bind(data.user_id)
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an acronym by id.
    /// Returns true if the acronym was found and deleted, false otherwise.
    pub async fn delete_acronym(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM acronyms WHERE id = ?")
            .bind(id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List acronyms matching ANY of the given equality predicates.
    ///
    /// The predicates compose with OR, not AND; a row matching a single
    /// predicate is included.
    pub async fn filter_acronyms_or(&self, predicates: &[FieldPredicate]) -> Result<Vec<Acronym>> {
        if predicates.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new("SELECT id, short, long, user_id FROM acronyms WHERE ");
        let mut clause = builder.separated(" OR ");
        for predicate in predicates {
            clause.push(predicate.field.column());
            clause.push_unseparated(" = ");
            clause.push_bind_unseparated(predicate.value.clone());
        }

        let rows = builder.build().fetch_all(&*self.pool).await?;
        Ok(rows.iter().map(acronym_from_row).collect())
    }

    /// List every acronym ordered by the given field.
    /// Ties keep storage order (the id sequence).
    pub async fn list_acronyms_sorted(
        &self,
        field: AcronymField,
        direction: SortDirection,
    ) -> Result<Vec<Acronym>> {
        let sql = format!(
            "SELECT id, short, long, user_id FROM acronyms ORDER BY {} {}, id ASC",
            field.column(),
            direction.sql()
        );
        let rows = sqlx::query(&sql).fetch_all(&*self.pool).await?;
        Ok(rows.iter().map(acronym_from_row).collect())
    }

    /// The first acronym in storage order, or None when the table is empty.
    pub async fn first_acronym(&self) -> Result<Option<Acronym>> {
        let row = sqlx::query("SELECT id, short, long, user_id FROM acronyms ORDER BY id ASC LIMIT 1")
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.as_ref().map(acronym_from_row))
    }

    /// Retrieve a single user by id.
    pub async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, name, username FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.as_ref().map(user_from_row))
    }

    /// Insert a new user and return it with its store-assigned id.
    pub async fn insert_user(&self, data: &UserData) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (name, username) VALUES (?, ?)")
            .bind(&data.name)
            .bind(&data.username)
            .execute(&*self.pool)
            .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            name: data.name.clone(),
            username: data.username.clone(),
        })
    }

    /// List all users in storage order.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query("SELECT id, name, username FROM users")
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.iter().map(user_from_row).collect())
    }
}

fn acronym_from_row(row: &sqlx::sqlite::SqliteRow) -> Acronym {
    Acronym {
        id: row.get("id"),
        short: row.get("short"),
        long: row.get("long"),
        user_id: row.get("user_id"),
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        username: row.get("username"),
    }
}
