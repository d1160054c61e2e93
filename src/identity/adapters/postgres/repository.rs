//! `PostgreSQL` implementations of the identity ports.

use super::{
    models::UserRow,
    schema::{sessions, users},
};
use crate::identity::{
    domain::{EmailAddress, PersistedUserData, Session, User, UserId},
    ports::{
        SessionResolver, SessionResolverError, UserRepository, UserRepositoryError,
        UserRepositoryResult,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by identity adapters.
pub type UserPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: UserPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: UserPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id().clone();
        let email = user.email().clone();
        let new_row = UserRow {
            id: user.id().as_str().to_owned(),
            name: user.name().map(str::to_owned),
            email: user.email().as_str().to_owned(),
            image: user.image().map(str::to_owned),
            created_at: user.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_email_unique_violation(info.as_ref()) =>
                    {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id.clone())
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: &UserId) -> UserRepositoryResult<Option<User>> {
        let lookup = id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(&lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(&lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        self.run_blocking(move |connection| {
            let rows = users::table
                .order((users::created_at.asc(), users::id.asc()))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        name,
        email,
        image,
        created_at,
    } = row;

    let data = PersistedUserData {
        id: UserId::new(id).map_err(UserRepositoryError::persistence)?,
        name,
        email: EmailAddress::new(email).map_err(UserRepositoryError::persistence)?,
        image,
        created_at,
    };
    Ok(User::from_persisted(data))
}

fn is_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_users_email_unique")
}

/// Resolves sessions from the authentication provider's `sessions` table.
#[derive(Debug, Clone)]
pub struct PostgresSessionResolver {
    pool: UserPgPool,
}

impl PostgresSessionResolver {
    /// Creates a resolver from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: UserPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionResolver for PostgresSessionResolver {
    async fn resolve(&self, token: &str) -> Result<Option<Session>, SessionResolverError> {
        let pool = self.pool.clone();
        let lookup = token.to_owned();
        let row = tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SessionResolverError::backend)?;
            sessions::table
                .inner_join(users::table)
                .filter(sessions::session_token.eq(&lookup))
                .filter(sessions::expires.gt(Utc::now()))
                .select(UserRow::as_select())
                .first::<UserRow>(&mut connection)
                .optional()
                .map_err(SessionResolverError::backend)
        })
        .await
        .map_err(SessionResolverError::backend)??;

        let Some(user_row) = row else {
            return Ok(None);
        };
        let user = row_to_user(user_row).map_err(SessionResolverError::backend)?;
        Ok(Some(Session::from(&user)))
    }
}
