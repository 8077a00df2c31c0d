//! Acceptance tests against a live NetBox.
//!
//! Skipped unless `NETBOX_ACC=1`. Uses the provider's `NETBOX_*`
//! environment for the server and token.
//!
//! ## Running
//!
//! ```bash
//! NETBOX_ACC=1 NETBOX_SERVER_URL=http://localhost:8001 NETBOX_API_TOKEN=... \
//!     cargo test -p netbox-acceptance --test vlan_group
//! ```
//!
//! Leftovers from failed runs are removed with `netbox-sweep`.

use netbox_plugin::ResourceData;
use netbox_provider::{Provider, ProviderConfig};
use netbox_testing::test_name;
use serde_json::json;

const VLAN_GROUP: &str = "netbox_vlan_group";

fn acceptance_provider() -> Option<Provider> {
    if std::env::var("NETBOX_ACC").map(|v| v != "1").unwrap_or(true) {
        eprintln!("skipping acceptance test: NETBOX_ACC is not set to 1");
        return None;
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,netbox_provider=debug".into()),
        )
        .with_test_writer()
        .try_init();

    let config = ProviderConfig::from_env().expect("NETBOX_* environment is incomplete");
    Some(Provider::configure(&config).expect("failed to configure provider"))
}

/// Create, verify, import, then destroy.
async fn create_import_destroy(provider: &Provider, config: serde_json::Value, slug: &str) {
    let mut data = ResourceData::from_json(config.clone()).unwrap();
    provider.create(VLAN_GROUP, &mut data).await.unwrap();
    assert!(data.has_id());

    assert_eq!(data.get("name"), config.get("name"));
    assert_eq!(data.get_str("slug").unwrap(), Some(slug));
    assert_eq!(data.get("description"), config.get("description"));

    let imported = provider.import(VLAN_GROUP, data.id()).await.unwrap();
    assert_eq!(imported, data);

    let id = data.id().to_string();
    provider.delete(VLAN_GROUP, &mut data).await.unwrap();

    let mut stale = ResourceData::with_id(id);
    provider.read(VLAN_GROUP, &mut stale).await.unwrap();
    assert!(!stale.has_id(), "VLAN group still exists after delete");
}

#[tokio::test]
async fn test_acc_vlan_group_basic() {
    let Some(provider) = acceptance_provider() else {
        return;
    };
    let name = test_name("vlan_basic");

    create_import_destroy(
        &provider,
        json!({"name": name.as_str(), "slug": "vlan_basic", "description": "Test Description"}),
        "vlan_basic",
    )
    .await;
}

#[tokio::test]
async fn test_acc_vlan_group_with_dependencies() {
    let Some(provider) = acceptance_provider() else {
        return;
    };
    let name = test_name("vlan_group_with_dependencies");

    create_import_destroy(
        &provider,
        json!({
            "name": name.as_str(),
            "slug": "vlan_group_with_dependencies",
            "description": "Test Description"
        }),
        "vlan_group_with_dependencies",
    )
    .await;
}

#[tokio::test]
async fn test_acc_vlan_group_default_slug() {
    let Some(provider) = acceptance_provider() else {
        return;
    };
    let name = test_name("slug");

    create_import_destroy(
        &provider,
        json!({"name": name.as_str(), "description": "Test Description"}),
        &name,
    )
    .await;
}
