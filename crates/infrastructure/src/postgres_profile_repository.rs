use async_trait::async_trait;
use bouwdesk_application::ProfileRepository;
use bouwdesk_core::{AppError, AppResult};
use bouwdesk_domain::{Profile, ProfileId, Role};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// PostgreSQL-backed profile repository.
#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: Uuid,
    email: String,
    display_name: String,
    role: String,
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_profile(&self, profile_id: ProfileId) -> AppResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, email, display_name, role
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(profile_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Dependency(format!("failed to load profile: {error}")))?;

        row.map(|row| {
            let role = Role::from_transport(row.role.as_str()).map_err(|error| {
                AppError::Internal(format!("profile '{}' has corrupt role: {error}", row.id))
            })?;
            Profile::new(ProfileId::from_uuid(row.id), row.email, row.display_name, role)
        })
        .transpose()
    }

    async fn insert_profile(&self, profile: Profile) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO profiles (id, email, display_name, role)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(profile.id().as_uuid())
        .bind(profile.email())
        .bind(profile.display_name())
        .bind(profile.role().as_str())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::Conflict(format!(
                        "profile '{}' already exists",
                        profile.email()
                    )));
                }

                Err(AppError::Dependency(format!(
                    "failed to insert profile: {error}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bouwdesk_application::ProfileRepository;
    use bouwdesk_core::AppError;
    use bouwdesk_domain::{Profile, ProfileId, Role};
    use sqlx::migrate::Migrator;
    use sqlx::postgres::PgPoolOptions;

    use super::PostgresProfileRepository;

    static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

    #[tokio::test]
    async fn insert_find_and_reject_duplicates() {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            return;
        };
        let pool = match PgPoolOptions::new()
            .max_connections(2)
            .connect(database_url.as_str())
            .await
        {
            Ok(pool) => pool,
            Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
        };
        if let Err(error) = MIGRATOR.run(&pool).await {
            panic!("failed to run migrations for postgres profile tests: {error}");
        }

        let repository = PostgresProfileRepository::new(pool);
        let profile_id = ProfileId::new();
        let profile = Profile::new(
            profile_id,
            format!("directie-{profile_id}@bouw.nl"),
            "Karel Smit",
            Role::Directie,
        )
        .unwrap_or_else(|_| unreachable!());

        assert!(repository.insert_profile(profile.clone()).await.is_ok());
        let found = repository.find_profile(profile_id).await;
        assert!(matches!(found, Ok(Some(ref stored)) if stored == &profile));

        let duplicate = repository.insert_profile(profile).await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));

        let missing = repository.find_profile(ProfileId::new()).await;
        assert!(matches!(missing, Ok(None)));
    }
}
