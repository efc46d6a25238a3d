//! Store factory
//!
//! Builds the three store trait objects from one backend instance selected by
//! `database_target`, so every store shares the same data.

use crate::adapters::database::traits::{AssignmentStore, MedicationStore, PatientStore};
use crate::adapters::memory::MemoryStore;
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::{DatabaseTarget, MedtrackConfig};
use crate::domain::{MedtrackError, Result};
use std::sync::Arc;

/// The store handles used by the services
#[derive(Clone)]
pub struct Stores {
    pub patients: Arc<dyn PatientStore + Send + Sync>,
    pub medications: Arc<dyn MedicationStore + Send + Sync>,
    pub assignments: Arc<dyn AssignmentStore + Send + Sync>,
}

impl Stores {
    /// Share one backend across all three store traits
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: PatientStore + MedicationStore + AssignmentStore + Send + Sync + 'static,
    {
        Self {
            patients: backend.clone(),
            medications: backend.clone(),
            assignments: backend,
        }
    }

    /// Fresh, empty in-memory stores
    pub fn in_memory() -> Self {
        Self::from_backend(Arc::new(MemoryStore::new()))
    }

    /// Name of the backing store, for logging
    pub fn backend_name(&self) -> &str {
        self.assignments.backend_name()
    }
}

/// Create the stores selected by the configuration
///
/// For PostgreSQL the connection is tested and the schema applied before the
/// stores are returned.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached or initialised
pub async fn create_stores(config: &MedtrackConfig) -> Result<Stores> {
    match config.database_target {
        DatabaseTarget::Memory => {
            tracing::info!("Creating in-memory stores");
            Ok(Stores::in_memory())
        }
        DatabaseTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                MedtrackError::Configuration(
                    "postgresql configuration is required when database_target = 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating PostgreSQL stores");
            let client = PostgreSQLClient::new(pg_config).await?;
            client.test_connection().await?;
            client.ensure_schema().await?;

            let status = client.pool_status();
            tracing::info!(
                target_db = client.connection_string_safe(),
                pool_max_size = status.max_size,
                "PostgreSQL stores ready"
            );

            Ok(Stores::from_backend(Arc::new(PostgreSQLAdapter::new(client))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_target_creates_shared_stores() {
        let config = MedtrackConfig::default();
        let stores = create_stores(&config).await.unwrap();
        assert_eq!(stores.backend_name(), "memory");

        let patient = stores
            .patients
            .insert_patient(&crate::domain::NewPatient {
                name: "Ines Duarte".to_string(),
                date_of_birth: chrono::NaiveDate::from_ymd_opt(1999, 4, 2).unwrap(),
            })
            .await
            .unwrap();

        // Same backend behind every handle
        assert!(stores
            .medications
            .list_medications()
            .await
            .unwrap()
            .is_empty());
        assert_eq!(stores.patients.list_patients().await.unwrap(), vec![patient]);
    }

    #[tokio::test]
    async fn test_postgresql_target_requires_section() {
        let config = MedtrackConfig {
            database_target: DatabaseTarget::PostgreSQL,
            ..MedtrackConfig::default()
        };
        assert!(matches!(
            create_stores(&config).await,
            Err(MedtrackError::Configuration(_))
        ));
    }
}
