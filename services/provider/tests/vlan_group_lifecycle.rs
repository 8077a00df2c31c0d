//! Lifecycle tests for the `netbox_vlan_group` resource.
//!
//! Runs create/read/update/delete/import against `FakeIpam`, which keeps
//! VLAN groups in memory and answers like NetBox.

use netbox_client::{IpamApi, WritableVlanGroup};
use netbox_plugin::{Resource, ResourceData, ResourceError};
use netbox_provider::resources::VlanGroupResource;
use netbox_testing::{test_name, Call, FakeIpam};
use rstest::rstest;
use serde_json::{json, Value};

fn config(value: Value) -> ResourceData {
    ResourceData::from_json(value).unwrap()
}

async fn create(fake: &FakeIpam, value: Value) -> ResourceData {
    let mut data = config(value);
    VlanGroupResource::new()
        .create(&mut data, fake)
        .await
        .unwrap();
    data
}

fn id_of(data: &ResourceData) -> i64 {
    data.id().parse().unwrap()
}

#[tokio::test]
async fn test_basic_defaults_slug_to_name() {
    let fake = FakeIpam::new();
    let data = create(
        &fake,
        json!({"name": "vlan_basic", "description": "Test Description"}),
    )
    .await;

    assert!(data.has_id());
    assert_eq!(data.get_str("slug").unwrap(), Some("vlan_basic"));
    assert_eq!(data.get_str("description").unwrap(), Some("Test Description"));

    let remote = fake.get(id_of(&data)).unwrap();
    assert_eq!(remote.slug.as_deref(), Some("vlan_basic"));
    assert_eq!(remote.description.as_deref(), Some("Test Description"));
}

#[tokio::test]
async fn test_explicit_slug_is_kept() {
    let fake = FakeIpam::new();
    let name = test_name("vlan_group_with_dependencies");
    let data = create(
        &fake,
        json!({
            "name": name.as_str(),
            "slug": "vlan_group_with_dependencies",
            "description": "Test Description"
        }),
    )
    .await;

    assert_eq!(data.get_str("name").unwrap(), Some(name.as_str()));
    assert_eq!(
        data.get_str("slug").unwrap(),
        Some("vlan_group_with_dependencies")
    );
}

#[tokio::test]
async fn test_create_then_read_mirrors_submitted_fields() {
    let fake = FakeIpam::new();
    let mut data = create(
        &fake,
        json!({
            "name": "Core",
            "slug": "core",
            "scope_type": "dcim.site",
            "scope_id": 4,
            "description": "core switches"
        }),
    )
    .await;

    VlanGroupResource::new().read(&mut data, &fake).await.unwrap();

    assert_eq!(data.get_str("name").unwrap(), Some("Core"));
    assert_eq!(data.get_str("slug").unwrap(), Some("core"));
    assert_eq!(data.get_str("scope_type").unwrap(), Some("dcim.site"));
    assert_eq!(data.get_i64("scope_id").unwrap(), Some(4));
    assert_eq!(data.get_str("description").unwrap(), Some("core switches"));
}

#[tokio::test]
async fn test_create_writes_once() {
    let fake = FakeIpam::new();
    create(&fake, json!({"name": "single"})).await;

    assert_eq!(fake.calls(), vec![Call::Create]);
}

#[tokio::test]
async fn test_create_failure_leaves_no_identity() {
    let fake = FakeIpam::new();
    create(&fake, json!({"name": "taken"})).await;

    let mut data = config(json!({"name": "taken", "description": "second"}));
    let err = VlanGroupResource::new()
        .create(&mut data, &fake)
        .await
        .unwrap_err();

    assert!(matches!(err, ResourceError::Remote(_)));
    assert!(!data.has_id());
    let source = err
        .remote_source()
        .and_then(|e| e.downcast_ref::<netbox_client::ClientError>())
        .unwrap();
    assert_eq!(source.status(), Some(400));
    assert_eq!(fake.len(), 1);
}

#[tokio::test]
async fn test_create_surfaces_injected_failure() {
    let fake = FakeIpam::new();
    fake.fail_with(503);
    let mut data = config(json!({"name": "unlucky"}));

    let err = VlanGroupResource::new()
        .create(&mut data, &fake)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "NetBox API error (503): injected failure");
    assert!(!data.has_id());
    assert!(fake.is_empty());
}

#[tokio::test]
async fn test_update_then_read_reflects_new_values() {
    let fake = FakeIpam::new();
    let resource = VlanGroupResource::new();
    let mut data = create(&fake, json!({"name": "edge", "description": "before"})).await;
    let id = id_of(&data);

    data.set("description", "after");
    data.set("scope_type", "dcim.region");
    data.set("scope_id", 12);
    resource.update(&mut data, &fake).await.unwrap();

    assert_eq!(data.id(), id.to_string());
    assert_eq!(data.get_str("description").unwrap(), Some("after"));
    assert_eq!(data.get_i64("scope_id").unwrap(), Some(12));

    let remote = fake.get(id).unwrap();
    assert_eq!(remote.description.as_deref(), Some("after"));
    assert_eq!(remote.scope_type.as_deref(), Some("dcim.region"));
    assert_eq!(fake.calls(), vec![Call::Create, Call::Update(id), Call::Read(id)]);
}

#[tokio::test]
async fn test_update_without_slug_defaults_to_name() {
    let fake = FakeIpam::new();
    let resource = VlanGroupResource::new();
    let mut data = create(&fake, json!({"name": "first"})).await;

    data.set("name", "second");
    data.remove("slug");
    resource.update(&mut data, &fake).await.unwrap();

    assert_eq!(data.get_str("slug").unwrap(), Some("second"));
    assert_eq!(fake.get(id_of(&data)).unwrap().slug.as_deref(), Some("second"));
}

#[tokio::test]
async fn test_update_failure_is_surfaced_without_read() {
    let fake = FakeIpam::new();
    let mut data = create(&fake, json!({"name": "stuck", "description": "before"})).await;
    let id = id_of(&data);
    fake.fail_with(503);

    data.set("description", "after");
    let err = VlanGroupResource::new()
        .update(&mut data, &fake)
        .await
        .unwrap_err();

    let source = err
        .remote_source()
        .and_then(|e| e.downcast_ref::<netbox_client::ClientError>())
        .unwrap();
    assert_eq!(source.status(), Some(503));
    assert_eq!(data.id(), id.to_string());
    assert_eq!(fake.get(id).unwrap().description.as_deref(), Some("before"));
    assert_eq!(fake.calls(), vec![Call::Create, Call::Update(id)]);
}

#[rstest]
#[case::slug_too_long("slug", json!("s".repeat(31)))]
#[case::wrong_type("scope_id", json!("4"))]
#[tokio::test]
async fn test_invalid_update_makes_no_api_call(#[case] key: &str, #[case] value: Value) {
    let fake = FakeIpam::new();
    let mut data = create(&fake, json!({"name": "valid"})).await;
    let id = id_of(&data);

    data.set(key, value);
    let err = VlanGroupResource::new()
        .update(&mut data, &fake)
        .await
        .unwrap_err();

    assert!(matches!(err, ResourceError::Validation(_)));
    assert_eq!(fake.calls(), vec![Call::Create]);
    assert_eq!(fake.get(id).unwrap().slug.as_deref(), Some("valid"));
}

#[tokio::test]
async fn test_read_of_vanished_group_clears_identity() {
    let fake = FakeIpam::new();
    let mut data = create(&fake, json!({"name": "gone"})).await;
    fake.remove(id_of(&data));

    VlanGroupResource::new().read(&mut data, &fake).await.unwrap();

    assert!(!data.has_id());
}

#[tokio::test]
async fn test_read_surfaces_other_errors() {
    let fake = FakeIpam::new();
    let mut data = create(&fake, json!({"name": "flaky"})).await;
    fake.fail_with(500);

    let err = VlanGroupResource::new()
        .read(&mut data, &fake)
        .await
        .unwrap_err();

    assert!(data.has_id());
    assert_eq!(err.to_string(), "NetBox API error (500): injected failure");
    let source = err
        .remote_source()
        .and_then(|e| e.downcast_ref::<netbox_client::ClientError>())
        .unwrap();
    assert_eq!(source.status(), Some(500));
}

#[tokio::test]
async fn test_read_leaves_local_value_when_server_field_empty() {
    let fake = FakeIpam::new();
    let mut data = create(&fake, json!({"name": "sparse"})).await;
    data.set("description", "local only");

    VlanGroupResource::new().read(&mut data, &fake).await.unwrap();

    assert_eq!(data.get_str("description").unwrap(), Some("local only"));
}

#[tokio::test]
async fn test_delete_removes_group_then_read_finds_nothing() {
    let fake = FakeIpam::new();
    let resource = VlanGroupResource::new();
    let mut data = create(&fake, json!({"name": "doomed"})).await;
    let id = id_of(&data);

    resource.delete(&mut data, &fake).await.unwrap();
    assert!(!data.has_id());
    assert!(fake.get(id).is_none());

    let err = fake.vlan_groups_read(id).await.unwrap_err();
    assert!(err.is_not_found());

    let mut stale = ResourceData::with_id(id.to_string());
    resource.read(&mut stale, &fake).await.unwrap();
    assert!(!stale.has_id());
}

#[tokio::test]
async fn test_delete_surfaces_not_found() {
    let fake = FakeIpam::new();
    let mut data = ResourceData::with_id("77");

    let err = VlanGroupResource::new()
        .delete(&mut data, &fake)
        .await
        .unwrap_err();

    assert!(matches!(err, ResourceError::Remote(_)));
    assert_eq!(data.id(), "77");
}

#[tokio::test]
async fn test_import_populates_same_state_as_read_after_create() {
    let fake = FakeIpam::new();
    let resource = VlanGroupResource::new();
    let mut created = create(
        &fake,
        json!({
            "name": "imported",
            "slug": "imported-slug",
            "scope_type": "dcim.site",
            "scope_id": 2,
            "description": "Test Description"
        }),
    )
    .await;
    resource.read(&mut created, &fake).await.unwrap();

    let imported = resource.import(created.id(), &fake).await.unwrap();

    assert_eq!(imported, created);
}

#[tokio::test]
async fn test_import_of_out_of_band_group() {
    let fake = FakeIpam::new();
    let seeded = fake.seed(&WritableVlanGroup {
        name: "legacy".to_string(),
        slug: "legacy".to_string(),
        description: "made in the UI".to_string(),
        ..Default::default()
    });

    let data = VlanGroupResource::new()
        .import(&seeded.id.to_string(), &fake)
        .await
        .unwrap();

    assert_eq!(data.get_str("name").unwrap(), Some("legacy"));
    assert_eq!(data.get_str("description").unwrap(), Some("made in the UI"));
    assert_eq!(data.get_i64("scope_id").unwrap(), None);
}

#[tokio::test]
async fn test_import_of_missing_group_fails() {
    let fake = FakeIpam::new();
    let err = VlanGroupResource::new()
        .import("404", &fake)
        .await
        .unwrap_err();

    assert!(matches!(err, ResourceError::ImportNotFound(_)));
}

#[rstest]
#[case::slug_too_long(json!({"name": "x", "slug": "s".repeat(31)}))]
#[case::missing_name(json!({"description": "no name"}))]
#[case::wrong_type(json!({"name": "x", "scope_id": "4"}))]
#[tokio::test]
async fn test_invalid_config_makes_no_api_call(#[case] value: Value) {
    let fake = FakeIpam::new();
    let mut data = config(value);

    let err = VlanGroupResource::new()
        .create(&mut data, &fake)
        .await
        .unwrap_err();

    assert!(matches!(err, ResourceError::Validation(_)));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn test_non_numeric_identity_is_rejected() {
    let fake = FakeIpam::new();
    let mut data = ResourceData::with_id("vg-1");

    let err = VlanGroupResource::new()
        .read(&mut data, &fake)
        .await
        .unwrap_err();

    assert!(matches!(err, ResourceError::InvalidId(_)));
    assert!(fake.calls().is_empty());
}
