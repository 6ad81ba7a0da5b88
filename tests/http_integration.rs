//! Integration tests for the TMC client layer using wiremock
//!
//! These tests verify transport behavior (default headers, bearer auth,
//! error taxonomy) and per-service URL construction against mocked
//! endpoints.

use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{
    bearer_token, body_partial_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tmc_provider::model::cluster::ClusterFullName;
use tmc_provider::model::inspections::InspectionScanFullName;
use tmc_provider::model::provisioner::{
    Provisioner, ProvisionerFullName, ProvisionerRequest,
};
use tmc_provider::tmc::{ClientError, CspCredentials, TmcClient};

const AUTHORIZE_PATH: &str = "/csp/gateway/am/api/auth/api-tokens/authorize";

/// Build a client whose org endpoint and CSP endpoint both point at the
/// mock server, with a successful token exchange mounted.
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

fn prov_full_name(management_cluster: &str, name: &str) -> ProvisionerFullName {
    ProvisionerFullName {
        management_cluster_name: management_cluster.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

mod transport_tests {
    use super::*;

    /// Requests carry the standard default headers and the exchanged token
    #[tokio::test]
    async fn test_get_sends_default_headers_and_bearer_token() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners/prov-1"))
            .and(header("Content-Type", "application/json"))
            .and(header("Connection", "keep-alive"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "provisioner": {
                    "fullName": {"managementClusterName": "mc-1", "name": "prov-1"},
                    "meta": {"uid": "uid-1", "resourceVersion": "1"}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client
            .provisioners()
            .get(&prov_full_name("mc-1", "prov-1"))
            .await
            .expect("get should succeed");

        assert_eq!(response.provisioner.full_name.name, "prov-1");
        assert_eq!(response.provisioner.meta.uid, "uid-1");
    }

    /// A 404 response surfaces as the distinguished not-found error
    #[tokio::test]
    async fn test_404_maps_to_not_found() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners/ghost"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": "provisioner not found"
            })))
            .mount(&server)
            .await;

        let err = client
            .provisioners()
            .get(&prov_full_name("mc-1", "ghost"))
            .await
            .expect_err("get should fail");

        assert!(err.is_not_found());
    }

    /// Other non-2xx responses carry their status, distinguishable from not-found
    #[tokio::test]
    async fn test_500_maps_to_api_error() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners/prov-1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let err = client
            .provisioners()
            .get(&prov_full_name("mc-1", "prov-1"))
            .await
            .expect_err("get should fail");

        assert!(!err.is_not_found());
        match err {
            ClientError::Api { status, .. } => assert_eq!(status, 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// The access token is cached after the first exchange
    #[tokio::test]
    async fn test_token_exchange_happens_once() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"provisioners": []})))
            .mount(&server)
            .await;

        let full_name = prov_full_name("mc-1", "");
        client.provisioners().list(&full_name).await.unwrap();
        client.provisioners().list(&full_name).await.unwrap();

        let exchanges = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.url.path() == AUTHORIZE_PATH)
            .count();
        assert_eq!(exchanges, 1);
    }
}

mod provisioner_tests {
    use super::*;

    /// Create posts the request envelope to the collection URL
    #[tokio::test]
    async fn test_create_posts_request_envelope() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners"))
            .and(body_partial_json(json!({
                "provisioner": {
                    "fullName": {"managementClusterName": "mc-1", "name": "prov-1"}
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "provisioner": {
                    "fullName": {"managementClusterName": "mc-1", "name": "prov-1"},
                    "meta": {"uid": "uid-42"}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = ProvisionerRequest {
            provisioner: Provisioner {
                full_name: prov_full_name("mc-1", "prov-1"),
                ..Default::default()
            },
        };

        let response = client.provisioners().create(&request).await.unwrap();
        assert_eq!(response.provisioner.meta.uid, "uid-42");
    }

    /// An empty name filter omits the search-scope key entirely
    #[tokio::test]
    async fn test_list_omits_name_param_when_empty() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners"))
            .and(query_param_is_missing("searchScope.name"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"provisioners": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = client.provisioners().list(&prov_full_name("mc-1", "")).await;
        assert_ok!(result);
    }

    /// A non-empty name filter appends the search-scope key
    #[tokio::test]
    async fn test_list_includes_name_param_when_set() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners"))
            .and(query_param("searchScope.name", "prov-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "provisioners": [{
                    "fullName": {"managementClusterName": "mc-1", "name": "prov-1"},
                    "meta": {"uid": "uid-1"}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client
            .provisioners()
            .list(&prov_full_name("mc-1", "prov-1"))
            .await
            .unwrap();
        assert_eq!(response.provisioners.len(), 1);
    }

    /// Missing management cluster fails before any request is built
    #[tokio::test]
    async fn test_list_without_management_cluster_is_local_error() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        let err = client
            .provisioners()
            .list(&ProvisionerFullName::default())
            .await
            .expect_err("list should fail");

        assert!(matches!(err, ClientError::InvalidRequest(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_succeeds_on_empty_body() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/v1alpha1/managementclusters/mc-1/provisioners/prov-1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let result = client.provisioners().delete(&prov_full_name("mc-1", "prov-1")).await;
        assert_ok!(result);
    }
}

mod cluster_tests {
    use super::*;

    /// Get addresses one cluster through its full-name query parameters
    #[tokio::test]
    async fn test_get_sends_full_name_params() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/clusters/cl-1"))
            .and(query_param("fullName.managementClusterName", "mc-1"))
            .and(query_param("fullName.provisionerName", "prov-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cluster": {
                    "fullName": {
                        "managementClusterName": "mc-1",
                        "provisionerName": "prov-1",
                        "name": "cl-1"
                    },
                    "meta": {"uid": "uid-cl"},
                    "spec": {"clusterGroup": "default"}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let full_name = ClusterFullName {
            management_cluster_name: "mc-1".into(),
            provisioner_name: "prov-1".into(),
            name: "cl-1".into(),
        };

        let response = client.clusters().get(&full_name).await.unwrap();
        assert_eq!(response.cluster.spec.cluster_group, "default");
    }

    /// Get with an incomplete full name fails before any network call
    #[tokio::test]
    async fn test_get_requires_complete_full_name() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        let full_name = ClusterFullName {
            name: "cl-1".into(),
            ..Default::default()
        };

        let err = client.clusters().get(&full_name).await.expect_err("get should fail");
        assert!(matches!(err, ClientError::InvalidRequest(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

mod inspections_tests {
    use super::*;

    fn scan_scope(name: &str) -> InspectionScanFullName {
        InspectionScanFullName {
            management_cluster_name: "mc-1".into(),
            provisioner_name: "prov-1".into(),
            cluster_name: "cl-1".into(),
            name: name.into(),
        }
    }

    /// Any missing scope field is a validation error with no request made
    #[tokio::test]
    async fn test_list_requires_all_scope_fields() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        for missing in ["management_cluster", "provisioner", "cluster"] {
            let mut scope = scan_scope("");
            match missing {
                "management_cluster" => scope.management_cluster_name.clear(),
                "provisioner" => scope.provisioner_name.clear(),
                _ => scope.cluster_name.clear(),
            }

            let err = client.inspections().list(&scope).await.expect_err("list should fail");
            assert!(matches!(err, ClientError::InvalidRequest(_)), "{missing}");
        }

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    /// Scope parameters are always sent; the name key is omitted when empty
    #[tokio::test]
    async fn test_list_sends_scope_params() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/clusters/cl-1/inspection/scans"))
            .and(query_param("searchScope.managementClusterName", "mc-1"))
            .and(query_param("searchScope.provisionerName", "prov-1"))
            .and(query_param_is_missing("searchScope.name"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"scans": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = client.inspections().list(&scan_scope("")).await;
        assert_ok!(result);
    }

    /// With a name filter present the name key carries the provisioner name
    #[tokio::test]
    async fn test_list_name_filter_carries_provisioner_name() {
        let server = MockServer::start().await;
        let client = test_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/v1alpha1/clusters/cl-1/inspection/scans"))
            .and(query_param("searchScope.name", "prov-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"scans": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = client.inspections().list(&scan_scope("scan-7")).await;
        assert_ok!(result);
    }
}
