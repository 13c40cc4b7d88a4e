use std::{collections::BTreeMap, result::Result, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tokio::{net::TcpListener, sync::Mutex};

use super::*;

type DirectoryState = Arc<Mutex<BTreeMap<String, Company>>>;

fn acme() -> Company {
    Company {
        company_name: "Acme".to_string(),
        cif: Cif::from("A123"),
        ebitda_2023: 42.5,
        ebitda_source: Some("audit".to_string()),
        cif_source: Some("registry".to_string()),
    }
}

fn globex() -> Company {
    Company {
        company_name: "Globex".to_string(),
        cif: Cif::from("G777"),
        ebitda_2023: -3.25,
        ebitda_source: None,
        cif_source: None,
    }
}

fn not_found() -> (StatusCode, Json<ErrorDetail>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorDetail::new("Company not found")),
    )
}

async fn handle_list(State(state): State<DirectoryState>) -> Json<Vec<Company>> {
    Json(state.lock().await.values().cloned().collect())
}

async fn handle_create(
    State(state): State<DirectoryState>,
    Json(company): Json<Company>,
) -> Result<Json<Company>, (StatusCode, Json<ErrorDetail>)> {
    let mut records = state.lock().await;
    if records.contains_key(company.cif.as_str()) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorDetail::new("Company could not be created")),
        ));
    }
    records.insert(company.cif.as_str().to_string(), company.clone());
    Ok(Json(company))
}

async fn handle_get(
    State(state): State<DirectoryState>,
    Path(cif): Path<String>,
) -> Result<Json<Company>, (StatusCode, Json<ErrorDetail>)> {
    state
        .lock()
        .await
        .get(&cif)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn handle_update(
    State(state): State<DirectoryState>,
    Path(cif): Path<String>,
    Json(company): Json<Company>,
) -> Result<Json<Company>, (StatusCode, Json<ErrorDetail>)> {
    let mut records = state.lock().await;
    if !records.contains_key(&cif) {
        return Err(not_found());
    }
    records.insert(cif, company.clone());
    Ok(Json(company))
}

async fn handle_delete(
    State(state): State<DirectoryState>,
    Path(cif): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorDetail>)> {
    match state.lock().await.remove(&cif) {
        Some(_) => Ok(StatusCode::OK),
        None => Err(not_found()),
    }
}

async fn spawn_directory(initial: Vec<Company>) -> (String, DirectoryState) {
    let state: DirectoryState = Arc::new(Mutex::new(
        initial
            .into_iter()
            .map(|company| (company.cif.as_str().to_string(), company))
            .collect(),
    ));
    let app = Router::new()
        .route("/companies/", get(handle_list).post(handle_create))
        .route(
            "/companies/:cif",
            get(handle_get).put(handle_update).delete(handle_delete),
        )
        .with_state(Arc::clone(&state));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

#[test]
fn rejects_malformed_base_url() {
    assert!(matches!(
        HttpCompanyDirectory::new("not a url"),
        Err(DirectoryError::InvalidBaseUrl(_))
    ));
    assert!(matches!(
        HttpCompanyDirectory::new("ftp://127.0.0.1:8000"),
        Err(DirectoryError::InvalidBaseUrl(_))
    ));
}

#[tokio::test]
async fn lists_every_company_the_service_returns() {
    let (base_url, _state) = spawn_directory(vec![acme(), globex()]).await;
    let client = HttpCompanyDirectory::new(&base_url).expect("client");

    let companies = client.list_companies().await.expect("list");

    assert_eq!(companies.len(), 2);
    let summaries: Vec<String> = companies.iter().map(Company::summary).collect();
    assert!(summaries.contains(&"Acme (CIF: A123) - EBITDA 2023: 42.5".to_string()));
    assert!(summaries.contains(&"Globex (CIF: G777) - EBITDA 2023: -3.25".to_string()));
}

#[tokio::test]
async fn create_stores_all_five_fields() {
    let (base_url, state) = spawn_directory(Vec::new()).await;
    let client = HttpCompanyDirectory::new(&base_url).expect("client");

    client.create_company(&acme()).await.expect("create");

    let records = state.lock().await;
    let stored = records.get("A123").expect("stored record");
    assert_eq!(stored.company_name, "Acme");
    assert_eq!(stored.ebitda_2023, 42.5);
    assert_eq!(stored.ebitda_source.as_deref(), Some("audit"));
    assert_eq!(stored.cif_source.as_deref(), Some("registry"));
}

#[tokio::test]
async fn create_rejection_surfaces_status_and_detail() {
    let (base_url, _state) = spawn_directory(vec![acme()]).await;
    let client = HttpCompanyDirectory::new(&base_url).expect("client");

    let err = client.create_company(&acme()).await.expect_err("duplicate");
    match err {
        DirectoryError::Api { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Company could not be created");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn get_maps_missing_record_to_not_found() {
    let (base_url, _state) = spawn_directory(vec![acme()]).await;
    let client = HttpCompanyDirectory::new(&base_url).expect("client");

    let found = client.get_company(&Cif::from("A123")).await.expect("hit");
    assert_eq!(found.company_name, "Acme");

    let err = client
        .get_company(&Cif::from("Z999"))
        .await
        .expect_err("miss");
    assert!(err.is_not_found(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn update_replaces_the_stored_record() {
    let (base_url, state) = spawn_directory(vec![acme()]).await;
    let client = HttpCompanyDirectory::new(&base_url).expect("client");

    let mut revised = acme();
    revised.ebitda_2023 = 50.0;
    client
        .update_company(&Cif::from("A123"), &revised)
        .await
        .expect("update");

    assert_eq!(
        state.lock().await.get("A123").expect("record").ebitda_2023,
        50.0
    );

    let err = client
        .update_company(&Cif::from("Z999"), &revised)
        .await
        .expect_err("missing target");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_missing_record_is_not_found() {
    let (base_url, _state) = spawn_directory(Vec::new()).await;
    let client = HttpCompanyDirectory::new(&base_url).expect("client");

    let err = client
        .delete_company(&Cif::from("Z999"))
        .await
        .expect_err("nothing to delete");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn unreachable_service_is_a_transport_failure() {
    // Bind then drop to get a loopback port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = HttpCompanyDirectory::new(&format!("http://{addr}")).expect("client");
    let err = client.list_companies().await.expect_err("no listener");
    assert!(matches!(err, DirectoryError::Transport(_)));
}

#[tokio::test]
async fn create_then_list_then_delete_round_trip() {
    let (base_url, _state) = spawn_directory(Vec::new()).await;
    let client = HttpCompanyDirectory::new(&base_url).expect("client");

    client.create_company(&acme()).await.expect("create");
    let listed = client.list_companies().await.expect("list");
    assert!(listed
        .iter()
        .any(|company| company.summary() == "Acme (CIF: A123) - EBITDA 2023: 42.5"));

    client
        .delete_company(&Cif::from("A123"))
        .await
        .expect("delete");
    let listed = client.list_companies().await.expect("list after delete");
    assert!(!listed.iter().any(|company| company.cif.as_str() == "A123"));
}
