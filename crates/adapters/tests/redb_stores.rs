//! Integration tests for the redb store adapters on real database files.

use redb::{Database, TableDefinition};

use stratus_adapters::{RedbAppConfigStore, RedbDisabledAppRegistry, RedbJobConfigStore};
use stratus_core::{AppConfiguration, AppName, JobConfiguration, JobName};
use stratus_ports::{
    AppConfigStore, DisabledAppRegistry, DisabledAppRegistryError, JobConfigStore,
};

fn billing_config() -> AppConfiguration {
    AppConfiguration::new(
        AppName::from("billing"),
        "http://packages.internal/billing.tar.gz",
        "bin/start.sh",
    )
}

#[tokio::test]
async fn test_app_store_round_trip_and_survives_reopen() {
    let _ = tracing_subscriber::fmt().try_init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apps.redb");

    {
        let store = RedbAppConfigStore::open(&path).unwrap();
        store.init_schema().await.unwrap();

        let mut config = billing_config();
        store.add(&config).await.unwrap();
        assert_eq!(store.load(&config.app_name).await.unwrap(), Some(config.clone()));

        config.memory_mb = 512.0;
        store.update(&config).await.unwrap();
        assert_eq!(
            store.load(&config.app_name).await.unwrap().unwrap().memory_mb,
            512.0
        );
        assert_eq!(store.load_all().await.unwrap().len(), 1);
    }

    // Reopening the same file sees the committed state.
    let store = RedbAppConfigStore::open(&path).unwrap();
    let loaded = store.load(&AppName::from("billing")).await.unwrap().unwrap();
    assert_eq!(loaded.memory_mb, 512.0);

    store.remove(&loaded.app_name).await.unwrap();
    assert!(store.load(&loaded.app_name).await.unwrap().is_none());
}

#[tokio::test]
async fn test_job_store_put_load_delete() {
    let dir = tempfile::tempdir().unwrap();
    let store = RedbJobConfigStore::open(dir.path().join("jobs.redb")).unwrap();
    store.init_schema().await.unwrap();

    store
        .put(&JobConfiguration::new(
            JobName::from("billing.invoice"),
            AppName::from("billing"),
            "0 2 * * *",
        ))
        .await
        .unwrap();
    store
        .put(&JobConfiguration::new(
            JobName::from("search.reindex"),
            AppName::from("search"),
            "30 4 * * *",
        ))
        .await
        .unwrap();

    let jobs = store.load_all().await.unwrap();
    assert_eq!(jobs.len(), 2);

    store.delete(&JobName::from("billing.invoice")).await.unwrap();
    let jobs = store.load_all().await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].job_name, JobName::from("search.reindex"));
}

#[tokio::test]
async fn test_registry_idempotent_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let registry = RedbDisabledAppRegistry::open(dir.path().join("disabled.redb")).unwrap();
    registry.init_schema().await.unwrap();

    let name = AppName::from("billing");
    assert!(!registry.contains(&name).await.unwrap());

    registry.add(&name).await.unwrap();
    registry.add(&name).await.unwrap();
    assert!(registry.contains(&name).await.unwrap());

    registry.remove(&name).await.unwrap();
    registry.remove(&name).await.unwrap();
    assert!(!registry.contains(&name).await.unwrap());
}

#[tokio::test]
async fn test_corrupted_registry_entry_surfaces_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("disabled.redb");

    // Plant a payload that is not valid JSON under the registry's table.
    {
        const TABLE: TableDefinition<'static, &'static str, Vec<u8>> =
            TableDefinition::new("disabled_apps");
        let db = Database::create(&path).unwrap();
        let tx = db.begin_write().unwrap();
        {
            let mut table = tx.open_table(TABLE).unwrap();
            table.insert("billing", vec![0xff, 0xfe, 0x00]).unwrap();
        }
        tx.commit().unwrap();
    }

    let registry = RedbDisabledAppRegistry::open(&path).unwrap();
    let result = registry.contains(&AppName::from("billing")).await;

    assert!(matches!(
        result,
        Err(DisabledAppRegistryError::Decode(_))
    ));
}
