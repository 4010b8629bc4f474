use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::user::User;
pub use repositories::weather::{NewWeatherRecord, WeatherRecord};

/// Sample dataset shipped for the `seed` command: (city, date, temperature).
const SAMPLE_RECORDS: &[(&str, (i32, u32, u32), f64)] = &[
    ("New York", (2024, 1, 14), 5.0),
    ("London", (2024, 1, 14), 8.0),
    ("Tokyo", (2024, 1, 14), 12.0),
    ("Paris", (2024, 1, 14), 6.0),
    ("New York", (2024, 1, 15), 7.0),
    ("London", (2024, 1, 15), 9.0),
    ("Tokyo", (2024, 1, 15), 13.0),
    ("Paris", (2024, 1, 15), 7.0),
    ("New York", (2024, 1, 16), 6.0),
    ("London", (2024, 1, 16), 10.0),
    ("Tokyo", (2024, 1, 16), 14.0),
    ("Paris", (2024, 1, 16), 8.0),
];

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn weather_repo(&self) -> repositories::weather::WeatherRepository {
        repositories::weather::WeatherRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub async fn list_weather_records(&self) -> Result<Vec<WeatherRecord>> {
        self.weather_repo().list_all().await
    }

    pub async fn create_weather_record(&self, record: &NewWeatherRecord) -> Result<WeatherRecord> {
        self.weather_repo().create(record).await
    }

    pub async fn update_weather_record(
        &self,
        record: &WeatherRecord,
    ) -> Result<Option<WeatherRecord>> {
        self.weather_repo().update(record).await
    }

    pub async fn delete_weather_record(&self, id: i32) -> Result<bool> {
        self.weather_repo().delete(id).await
    }

    pub async fn weather_record_count(&self) -> Result<u64> {
        self.weather_repo().count().await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    /// Inserts the bundled sample dataset. No-op when records already exist;
    /// returns the number of rows inserted.
    pub async fn seed_sample_records(&self) -> Result<usize> {
        if self.weather_record_count().await? > 0 {
            return Ok(0);
        }

        let repo = self.weather_repo();
        for (city_name, (year, month, day), temperature) in SAMPLE_RECORDS {
            let date = NaiveDate::from_ymd_opt(*year, *month, *day)
                .ok_or_else(|| anyhow::anyhow!("Invalid sample date"))?;
            repo.create(&NewWeatherRecord {
                city_name: (*city_name).to_string(),
                date,
                temperature: *temperature,
            })
            .await?;
        }

        Ok(SAMPLE_RECORDS.len())
    }
}
