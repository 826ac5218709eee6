use crate::db::{AcronymField, DbConnection, FieldPredicate, SortDirection};
use crate::errors::AppError;
use shared::{Acronym, AcronymData, User, UserData};
use tracing::info;

/// Parse a route parameter into a store id.
///
/// An id that does not parse is indistinguishable from one that parses but
/// matches no row: both report `NotFound`. Clients use 404 as an existence
/// check, so parse failures must not surface as 400.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

/// Acronym operations on top of the query facade.
#[derive(Clone)]
pub struct AcronymService {
    db: DbConnection,
}

impl AcronymService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Acronym>, AppError> {
        Ok(self.db.list_acronyms().await?)
    }

    pub async fn create(&self, data: AcronymData) -> Result<Acronym, AppError> {
        info!("Creating acronym {}", data.short);
        Ok(self.db.insert_acronym(&data).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Acronym, AppError> {
        self.db.get_acronym(id).await?.ok_or(AppError::NotFound)
    }

    /// Full overwrite of short/long/owner; the id never changes.
    pub async fn update(&self, id: i64, data: AcronymData) -> Result<Acronym, AppError> {
        info!("Updating acronym {}", id);
        if !self.db.update_acronym(id, &data).await? {
            return Err(AppError::NotFound);
        }
        self.db.get_acronym(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        info!("Deleting acronym {}", id);
        if self.db.delete_acronym(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    /// Acronyms whose short OR long equals the term. The union of both
    /// match sets, not the intersection.
    pub async fn search(&self, term: String) -> Result<Vec<Acronym>, AppError> {
        info!("Searching acronyms for {:?}", term);
        let predicates = [
            FieldPredicate {
                field: AcronymField::Short,
                value: term.clone(),
            },
            FieldPredicate {
                field: AcronymField::Long,
                value: term,
            },
        ];
        Ok(self.db.filter_acronyms_or(&predicates).await?)
    }

    /// The first acronym in storage order; an empty store is a miss, not
    /// an internal failure.
    pub async fn first(&self) -> Result<Acronym, AppError> {
        self.db.first_acronym().await?.ok_or(AppError::NotFound)
    }

    pub async fn sorted(&self) -> Result<Vec<Acronym>, AppError> {
        Ok(self
            .db
            .list_acronyms_sorted(AcronymField::Short, SortDirection::Ascending)
            .await?)
    }

    /// Resolve the acronym's owning user. A dangling reference behaves
    /// like a missing acronym.
    pub async fn owner(&self, id: i64) -> Result<User, AppError> {
        let acronym = self.get(id).await?;
        self.db
            .get_user(acronym.user_id)
            .await?
            .ok_or(AppError::NotFound)
    }
}

/// User operations on top of the query facade.
#[derive(Clone)]
pub struct UserService {
    db: DbConnection,
}

impl UserService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.db.list_users().await?)
    }

    pub async fn create(&self, data: UserData) -> Result<User, AppError> {
        info!("Creating user {}", data.username);
        Ok(self.db.insert_user(&data).await?)
    }

    pub async fn get(&self, id: i64) -> Result<User, AppError> {
        self.db.get_user(id).await?.ok_or(AppError::NotFound)
    }
}
