//! Seeding runs against a mock CRM server.

use mcp_bench_seeder::{Dataset, HttpCrmClient, SeedMapping, Seeder, SeederConfig};
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn record(id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"data": {"id": {"record_id": id}}}))
}

fn client(server: &MockServer) -> HttpCrmClient {
    let config = SeederConfig::new("sandbox-key")
        .with_base_url(server.uri())
        .with_rate_limit_delay(Duration::ZERO);
    HttpCrmClient::new(&config).unwrap()
}

async fn mount_workspace(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/self"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"workspace": {"name": "Sandbox"}}})),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_run_against_mock_server() {
    let server = MockServer::start().await;
    mount_workspace(&server).await;

    // Attributes already exist from a previous run.
    Mock::given(method("POST"))
        .and(path_regex(r"^/objects/(companies|deals)/attributes$"))
        .respond_with(ResponseTemplate::new(409).set_body_string("already exists"))
        .expect(26)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/objects/companies/records"))
        .and(query_param("matching_attribute", "domains"))
        .respond_with(record("rec_company"))
        .expect(50)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/objects/people/records"))
        .and(query_param("matching_attribute", "email_addresses"))
        .respond_with(record("rec_person"))
        .expect(100)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/objects/deals/records"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"id": {"record_id": "rec_deal"}}})))
        .expect(50)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/objects/deals/records/rec_deal"))
        .respond_with(record("rec_deal"))
        .expect(50)
        .mount(&server)
        .await;

    let dataset = Dataset::bundled().unwrap();
    let temp = TempDir::new().unwrap();
    let mapping_path = temp.path().join("seed-record-mapping.json");

    let api = client(&server);
    let summary = Seeder::new(&api, &dataset, &mapping_path).run().await.unwrap();

    assert_eq!(summary.workspace, "Sandbox");
    assert_eq!(summary.attributes.existing, 26);
    assert_eq!(summary.companies.created, 50);
    assert_eq!(summary.people.created, 100);
    assert_eq!(summary.deals.created, 50);

    let mapping = SeedMapping::read_from(&mapping_path).unwrap();
    assert_eq!(mapping.companies.len(), 50);
    assert_eq!(mapping.deals.len(), 50);
    assert_eq!(mapping.metadata.script_version, "2.0");
}

#[tokio::test]
async fn test_rejected_calls_do_not_stop_the_run() {
    let server = MockServer::start().await;
    mount_workspace(&server).await;

    Mock::given(method("POST"))
        .and(path_regex(r"/attributes$"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/objects/companies/records"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .expect(50)
        .mount(&server)
        .await;
    // No company was created, so no person may be upserted.
    Mock::given(method("PUT"))
        .and(path("/objects/people/records"))
        .respond_with(record("rec_person"))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/objects/deals/records"))
        .respond_with(record("rec_deal"))
        .expect(50)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path_regex(r"^/objects/deals/records/"))
        .respond_with(record("rec_deal"))
        .expect(50)
        .mount(&server)
        .await;

    let dataset = Dataset::bundled().unwrap();
    let temp = TempDir::new().unwrap();
    let api = client(&server);
    let summary = Seeder::new(&api, &dataset, temp.path().join("m.json"))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.attributes.failed, 26);
    assert_eq!(summary.companies.failed, 50);
    assert_eq!(summary.people.attempted(), 0);
    assert_eq!(summary.mapping.companies.len(), 0);
    assert_eq!(summary.mapping.deals.len(), 50);

    let requests = server.received_requests().await.unwrap();
    let deal_bodies: Vec<serde_json::Value> = requests
        .iter()
        .filter(|r| r.method.as_str() == "POST" && r.url.path() == "/objects/deals/records")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    assert!(deal_bodies
        .iter()
        .all(|b| b["data"]["values"].get("associated_company").is_none()));
}

#[tokio::test]
async fn test_unauthorized_preflight_stops_before_writes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/self"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .mount(&server)
        .await;

    let dataset = Dataset::bundled().unwrap();
    let temp = TempDir::new().unwrap();
    let mapping_path = temp.path().join("m.json");
    let api = client(&server);
    let err = Seeder::new(&api, &dataset, &mapping_path).run().await.unwrap_err();

    assert!(err.is_connection_error());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    assert!(!mapping_path.exists());
}

#[tokio::test]
async fn test_shrunk_dataset_sends_no_requests() {
    let server = MockServer::start().await;

    let mut dataset = Dataset::bundled().unwrap();
    dataset.deals.retain(|d| d.stage != "Nurture");

    let temp = TempDir::new().unwrap();
    let api = client(&server);
    let err = Seeder::new(&api, &dataset, temp.path().join("m.json"))
        .run()
        .await
        .unwrap_err();

    assert!(err.is_validation_error());
    assert!(server.received_requests().await.unwrap().is_empty());
}
