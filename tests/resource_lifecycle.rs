//! Handler state-machine tests using wiremock
//!
//! These exercise the resource lifecycle end to end: create followed by a
//! populating read, refresh-time state pruning, update diffing against the
//! fetched remote copy, idempotent delete, and the data-source sentinels.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tmc_provider::resource::data::{OperationContext, ResourceData};
use tmc_provider::resource::{inspections, managementcluster, provisioner};
use tmc_provider::tmc::{CspCredentials, TmcClient};

const AUTHORIZE_PATH: &str = "/csp/gateway/am/api/auth/api-tokens/authorize";

async fn test_client(server: &MockServer) -> TmcClient {
    Mock::given(method("POST"))
        .and(path(AUTHORIZE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "expires_in": 1799
        })))
        .mount(server)
        .await;

    let credentials = CspCredentials::new(&server.uri(), "api-token").unwrap();
    TmcClient::new(&server.uri(), credentials).unwrap()
}

fn provisioner_data() -> ResourceData {
    ResourceData::from_fields([
        (provisioner::NAME_KEY, json!("prov-1")),
        (provisioner::MANAGEMENT_CLUSTER_NAME_KEY, json!("mc-1")),
    ])
}

fn provisioner_body(uid: &str, description: &str) -> serde_json::Value {
    json!({
        "provisioner": {
            "fullName": {"managementClusterName": "mc-1", "name": "prov-1"},
            "meta": {
                "uid": uid,
                "resourceVersion": "3",
                "description": description,
                "labels": {"env": "dev"}
            }
        }
    })
}

mod provisioner_lifecycle {
    use super::*;

    /// Create sets the ID from the returned metadata UID and re-reads to
    /// populate computed fields; identifying fields stay unchanged
    #[tokio::test]
    async fn test_create_sets_id_and_populates_state() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(provisioner_body("uid-42", "")),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners/prov-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(provisioner_body("uid-42", "created")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut data = provisioner_data();
        provisioner::create(&client, &mut data).await.unwrap();

        assert_eq!(data.id(), Some("uid-42"));
        assert_eq!(data.get(provisioner::NAME_KEY), Some(&json!("prov-1")));
        assert_eq!(
            data.get(provisioner::MANAGEMENT_CLUSTER_NAME_KEY),
            Some(&json!("mc-1"))
        );

        let meta = data.get("meta").unwrap();
        assert_eq!(meta["uid"], "uid-42");
        assert_eq!(meta["description"], "created");
    }

    /// A failed create leaves no ID behind
    #[tokio::test]
    async fn test_failed_create_persists_no_state() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners"))
            .respond_with(ResponseTemplate::new(409).set_body_string("already exists"))
            .mount(&server)
            .await;

        let mut data = provisioner_data();
        let err = provisioner::create(&client, &mut data).await.unwrap_err();

        assert!(!err.is_not_found());
        assert!(data.id().is_none());
    }

    /// Refresh-time not-found prunes the instance from state
    #[tokio::test]
    async fn test_refresh_read_removes_state_on_not_found() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners/prov-1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut data = provisioner_data();
        data.set_id("uid-42");

        provisioner::read(&client, &mut data, OperationContext::Refresh)
            .await
            .unwrap();

        assert!(data.is_removed());
        assert!(data.id().is_none());
    }

    /// An explicit data-source lookup reports not-found as an error
    #[tokio::test]
    async fn test_data_read_not_found_is_hard_error() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners/prov-1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut data = provisioner_data();
        let err = provisioner::read(&client, &mut data, OperationContext::DataRead)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(!data.is_removed());
    }

    /// Update with unchanged mutable fields issues only a GET
    #[tokio::test]
    async fn test_noop_update_issues_no_put() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners/prov-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(provisioner_body("uid-42", "same")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut data = provisioner_data();
        data.set(
            "meta",
            json!({"description": "same", "labels": {"env": "dev"}}),
        );

        provisioner::update(&client, &mut data).await.unwrap();

        let puts = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.method.as_str() == "PUT")
            .count();
        assert_eq!(puts, 0);
    }

    /// Update with changed description merges it into the fetched model,
    /// puts it, and concludes with a read
    #[tokio::test]
    async fn test_update_merges_into_fetched_model() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners/prov-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(provisioner_body("uid-42", "old")),
            )
            .expect(2)
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners/prov-1"))
            .and(body_partial_json(json!({
                "provisioner": {"meta": {"uid": "uid-42", "description": "new"}}
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(provisioner_body("uid-42", "new")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut data = provisioner_data();
        data.set(
            "meta",
            json!({"description": "new", "labels": {"env": "dev"}}),
        );

        provisioner::update(&client, &mut data).await.unwrap();
    }

    /// Delete of a missing remote resource succeeds and clears state
    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners/prov-1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut data = provisioner_data();
        data.set_id("uid-42");

        provisioner::delete(&client, &mut data).await.unwrap();

        assert!(data.is_removed());
    }

    /// The list data source flattens every item and keeps the last UID
    #[tokio::test]
    async fn test_list_data_source_flattens_items() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "provisioners": [
                    {"fullName": {"managementClusterName": "mc-1", "name": "a"}, "meta": {"uid": "uid-a"}},
                    {"fullName": {"managementClusterName": "mc-1", "name": "b"}, "meta": {"uid": "uid-b"}}
                ]
            })))
            .mount(&server)
            .await;

        let mut data = ResourceData::from_fields([(
            provisioner::MANAGEMENT_CLUSTER_NAME_KEY,
            json!("mc-1"),
        )]);

        provisioner::data_source_read(&client, &mut data).await.unwrap();

        assert_eq!(data.id(), Some("uid-b"));
        let items = data.get("provisioners").unwrap().as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "a");
    }
}

mod inspections_data_sources {
    use super::*;

    fn scan_scope_data() -> ResourceData {
        ResourceData::from_fields([
            (inspections::MANAGEMENT_CLUSTER_NAME_KEY, json!("mc-1")),
            (inspections::PROVISIONER_NAME_KEY, json!("prov-1")),
            (inspections::CLUSTER_NAME_KEY, json!("cl-1")),
        ])
    }

    /// An empty scan list sets the sentinel ID instead of failing
    #[tokio::test]
    async fn test_empty_list_sets_no_data_sentinel() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/clusters/cl-1/inspection/scans"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"scans": []})))
            .mount(&server)
            .await;

        let mut data = scan_scope_data();
        inspections::data_source_results_read(&client, &mut data)
            .await
            .unwrap();

        assert_eq!(data.id(), Some(inspections::NO_DATA_ID));
    }

    /// Results flatten the first scan and join the composite ID with `/`
    #[tokio::test]
    async fn test_results_set_composite_id() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/clusters/cl-1/inspection/scans"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "scans": [{
                    "fullName": {
                        "managementClusterName": "mc-1",
                        "provisionerName": "prov-1",
                        "clusterName": "cl-1",
                        "name": "scan-1"
                    },
                    "meta": {"uid": "uid-scan"},
                    "status": {"phase": "COMPLETE", "report": {"passed": 12}}
                }]
            })))
            .mount(&server)
            .await;

        let mut data = scan_scope_data();
        inspections::data_source_results_read(&client, &mut data)
            .await
            .unwrap();

        assert_eq!(data.id(), Some("mc-1/prov-1/cl-1/scan-1"));
        let status = data.get(inspections::STATUS_KEY).unwrap();
        assert_eq!(status["phase"], "COMPLETE");
        assert_eq!(status["report"]["passed"], 12);
    }

    /// A missing scope field fails before any request is made
    #[tokio::test]
    async fn test_scope_validation_precedes_network() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        let mut data = ResourceData::from_fields([
            (inspections::MANAGEMENT_CLUSTER_NAME_KEY, json!("mc-1")),
        ]);

        let err = inspections::data_source_scans_read(&client, &mut data)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            tmc_provider::resource::ProviderError::Field { .. }
        ));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

mod management_cluster_lifecycle {
    use super::*;

    fn registration_body(phase: &str) -> serde_json::Value {
        json!({
            "managementCluster": {
                "fullName": {"name": "tkgm-1"},
                "meta": {"uid": "uid-mc", "description": "registered"},
                "spec": {
                    "defaultClusterGroup": "default",
                    "kubernetesProviderType": "VMWARE_TANZU_KUBERNETES_GRID"
                },
                "status": {
                    "phase": phase,
                    "registrationUrl": "https://example.tmc.test/installer?token=one-time"
                }
            }
        })
    }

    /// Create registers the cluster and read populates the computed
    /// registration URL
    #[tokio::test]
    async fn test_register_and_read_back() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/v1alpha1/managementclusters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(registration_body("PENDING")))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/managementclusters/tkgm-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(registration_body("READY")))
            .expect(1)
            .mount(&server)
            .await;

        let mut data = ResourceData::from_fields([
            (managementcluster::NAME_KEY, json!("tkgm-1")),
            (managementcluster::CLUSTER_GROUP_KEY, json!("default")),
            (
                managementcluster::KUBERNETES_PROVIDER_TYPE_KEY,
                json!("VMWARE_TANZU_KUBERNETES_GRID"),
            ),
        ]);

        managementcluster::create(&client, &mut data).await.unwrap();

        assert_eq!(data.id(), Some("uid-mc"));
        assert_eq!(
            data.get(managementcluster::REGISTRATION_URL_KEY),
            Some(&json!("https://example.tmc.test/installer?token=one-time"))
        );
    }
}
