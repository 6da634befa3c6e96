// Integration tests for the resource-module lifecycle against a mock server.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voltra_api::{ApiClient, TransportConfig};
use voltra_core::{
    CoreError, Device, DeviceDraft, DeleteOutcome, NoticeLevel, ResourceModule, SaveOutcome, Unit,
    UnitDraft, Workspace, render_rows,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri().parse().unwrap(), &TransportConfig::default())
        .unwrap()
        .with_token(SecretString::from("tok".to_string()))
}

fn unit_json(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "nome": name,
        "codigoAcesso": "123",
        "endereco": { "cep": "12345678", "numero": "10" }
    })
}

fn unit_draft() -> UnitDraft {
    UnitDraft {
        name: "Bloco B".into(),
        access_code: "456".into(),
        postal_code: "87654321".into(),
        number: "22".into(),
    }
}

fn device_json(id: u64, name: &str, active: bool) -> serde_json::Value {
    json!({
        "id": id,
        "nome": name,
        "tipo": "climatizacao",
        "potencia": 1400.0,
        "status": active,
        "ambiente": { "id": 3, "nome": "Sala 101" }
    })
}

// ── Create / update ─────────────────────────────────────────────────

#[tokio::test]
async fn create_then_reload_gains_one_record() {
    let server = MockServer::start().await;
    let module: ResourceModule<Unit> = ResourceModule::new(Arc::new(client_for(&server)));

    // First list: one record. Once exhausted, the post-create list applies.
    Mock::given(method("GET"))
        .and(path("/api/unidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([unit_json(1, "Bloco A")])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/unidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            unit_json(1, "Bloco A"),
            unit_json(2, "Bloco B"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/unidades"))
        .respond_with(ResponseTemplate::new(201).set_body_json(unit_json(2, "Bloco B")))
        .expect(1)
        .mount(&server)
        .await;

    module.load().await.unwrap();
    let before = module.items().len();

    module.open_create();
    let outcome = module.save(unit_draft()).await.unwrap();

    assert_eq!(outcome, SaveOutcome::Created);
    assert!(!module.editor_open());
    assert_eq!(module.items().len(), before + 1);
}

#[tokio::test]
async fn save_while_editing_puts_with_that_id() {
    let server = MockServer::start().await;
    let module: ResourceModule<Unit> = ResourceModule::new(Arc::new(client_for(&server)));

    Mock::given(method("GET"))
        .and(path("/api/unidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([unit_json(5, "Bloco A")])))
        .mount(&server)
        .await;
    // The update payload must carry id = 5, never omit it.
    Mock::given(method("PUT"))
        .and(path("/api/unidades"))
        .and(body_partial_json(json!({ "id": 5 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(unit_json(5, "Bloco B")))
        .expect(1)
        .mount(&server)
        .await;

    module.load().await.unwrap();
    assert!(module.open_edit(5).is_some());

    let outcome = module.save(unit_draft()).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Updated);
    assert_eq!(module.editing_id(), None);
}

#[tokio::test]
async fn save_failure_keeps_the_editor_open() {
    let server = MockServer::start().await;
    let module: ResourceModule<Unit> = ResourceModule::new(Arc::new(client_for(&server)));

    Mock::given(method("POST"))
        .and(path("/api/unidades"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "codigo ja em uso" })),
        )
        .mount(&server)
        .await;

    module.open_create();
    let err = module.save(unit_draft()).await.unwrap_err();

    assert!(matches!(err, CoreError::RequestFailed { status: 400, .. }));
    assert!(module.editor_open(), "editor must stay open on failure");

    let notices = module.notices().drain();
    assert!(
        notices
            .iter()
            .any(|n| n.level == NoticeLevel::Error && n.message.contains("codigo ja em uso"))
    );
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_network() {
    let server = MockServer::start().await;
    let module: ResourceModule<Unit> = ResourceModule::new(Arc::new(client_for(&server)));

    Mock::given(method("POST"))
        .and(path("/api/unidades"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    module.open_create();
    let draft = UnitDraft {
        name: String::new(),
        ..unit_draft()
    };
    let err = module.save(draft).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation { .. }));
}

#[tokio::test]
async fn second_save_while_one_is_pending_is_rejected() {
    let server = MockServer::start().await;
    let module: ResourceModule<Unit> = ResourceModule::new(Arc::new(client_for(&server)));

    Mock::given(method("GET"))
        .and(path("/api/unidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/unidades"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(unit_json(9, "Bloco B"))
                .set_delay(Duration::from_millis(250)),
        )
        .expect(1)
        .mount(&server)
        .await;

    module.open_create();
    let (first, second) = tokio::join!(module.save(unit_draft()), module.save(unit_draft()));

    let outcomes = [first.unwrap(), second.unwrap()];
    assert!(outcomes.contains(&SaveOutcome::Created));
    assert!(outcomes.contains(&SaveOutcome::Busy));
}

// ── Load ────────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_reload_keeps_the_stale_list_visible() {
    let server = MockServer::start().await;
    let module: ResourceModule<Unit> = ResourceModule::new(Arc::new(client_for(&server)));

    Mock::given(method("GET"))
        .and(path("/api/unidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([unit_json(1, "Bloco A")])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/unidades"))
        .respond_with(ResponseTemplate::new(500).set_body_string("erro interno"))
        .mount(&server)
        .await;

    module.load().await.unwrap();
    assert_eq!(module.items().len(), 1);

    let err = module.load().await.unwrap_err();
    assert!(matches!(err, CoreError::RequestFailed { status: 500, .. }));
    // Stale beats blank.
    assert_eq!(module.items().len(), 1);
    assert_eq!(module.items()[0].name, "Bloco A");
}

#[tokio::test]
async fn expired_session_surfaces_as_auth_expired() {
    let server = MockServer::start().await;
    let module: ResourceModule<Unit> = ResourceModule::new(Arc::new(client_for(&server)));

    Mock::given(method("GET"))
        .and(path("/api/unidades"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = module.load().await.unwrap_err();
    assert!(err.is_auth_expired());
    // The module remembers it, so the UI can force the login flow.
    assert!(module.auth_expired());
}

#[tokio::test]
async fn loaded_units_render_the_expected_row() {
    let server = MockServer::start().await;
    let module: ResourceModule<Unit> = ResourceModule::new(Arc::new(client_for(&server)));

    Mock::given(method("GET"))
        .and(path("/api/unidades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "nome": "Bloco A", "codigoAcesso": "123", "endereco": { "cep": "12345678" } }
        ])))
        .mount(&server)
        .await;

    module.load().await.unwrap();
    let rows = render_rows(&module.items());
    assert_eq!(rows, vec![vec![
        "Bloco A".to_string(),
        "123".to_string(),
        "12345678".to_string(),
    ]]);
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_confirmation_flow_removes_and_reloads() {
    let server = MockServer::start().await;
    let module: ResourceModule<Device> = ResourceModule::new(Arc::new(client_for(&server)));

    Mock::given(method("GET"))
        .and(path("/api/dispositivos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([device_json(7, "Ar", true), device_json(8, "Luz", false)])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dispositivos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([device_json(8, "Luz", false)])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/dispositivos/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    module.load().await.unwrap();
    module.request_delete(7);
    assert!(module.confirm_open());

    let outcome = module.confirm_delete().await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(!module.confirm_open());
    assert_eq!(module.items().len(), 1);
}

#[tokio::test]
async fn server_error_on_delete_leaves_everything_retryable() {
    let server = MockServer::start().await;
    let module: ResourceModule<Device> = ResourceModule::new(Arc::new(client_for(&server)));

    Mock::given(method("GET"))
        .and(path("/api/dispositivos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([device_json(7, "Ar", true)])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/dispositivos/7"))
        .respond_with(ResponseTemplate::new(500).set_body_string("falha ao excluir"))
        .mount(&server)
        .await;

    module.load().await.unwrap();
    module.request_delete(7);
    let err = module.confirm_delete().await.unwrap_err();

    assert!(matches!(err, CoreError::RequestFailed { status: 500, .. }));
    // Confirmation state intact: the user may retry or cancel.
    assert!(module.confirm_open());
    assert_eq!(module.deleting_id(), Some(7));
    // Device 7 is still in the local list.
    assert!(module.items().iter().any(|d| d.id == 7));

    let notices = module.notices().drain();
    assert!(notices.iter().any(|n| n.message.contains("falha ao excluir")));
}

// ── Workspace orchestration ─────────────────────────────────────────

#[tokio::test]
async fn opening_the_device_editor_refreshes_the_room_selector() {
    let server = MockServer::start().await;
    let ws = Workspace::new(client_for(&server));

    Mock::given(method("GET"))
        .and(path("/api/ambientes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "nome": "Sala 101", "unidade": { "id": 1, "nome": "Bloco A" } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    ws.open_device_editor().await;

    assert!(ws.devices.editor_open());
    assert_eq!(ws.rooms.items().len(), 1);
    assert_eq!(ws.rooms.items()[0].unit_name.as_deref(), Some("Bloco A"));
}

#[tokio::test]
async fn device_draft_save_posts_the_parent_reference() {
    let server = MockServer::start().await;
    let ws = Workspace::new(client_for(&server));

    Mock::given(method("GET"))
        .and(path("/api/dispositivos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/dispositivos"))
        .and(body_partial_json(json!({
            "nome": "Ar-condicionado",
            "ambiente": { "id": 3 }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(device_json(7, "Ar-condicionado", true)))
        .expect(1)
        .mount(&server)
        .await;

    ws.devices.open_create();
    let draft = DeviceDraft {
        name: "Ar-condicionado".into(),
        kind: "climatizacao".into(),
        power_watts: 1400.0,
        active: true,
        room_id: Some(3),
    };
    let outcome = ws.devices.save(draft).await.unwrap();
    assert_eq!(outcome, SaveOutcome::Created);
}
