use serde_json::json;
use tempfile::TempDir;

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prospect::api::types::{GrantPermissionsRequest, SuiviRequest};
use prospect::api::ApiClient;
use prospect::cli::CommercialCommand;
use prospect::commands::{auth, commercials};
use prospect::config::{ApiConfig, Config, SessionConfig};
use prospect::error::ProspectError;
use prospect::session::{Session, SessionStore};

fn test_config(base_url: &str, session_dir: &TempDir) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        },
        session: SessionConfig {
            directory: Some(session_dir.path().to_path_buf()),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn logged_in_session() -> Session {
    let payload = json!({
        "token": "tok_abc",
        "utilisateur": {
            "id": 1,
            "nom": "Dubois",
            "prenom": "Jean",
            "email": "jean.dubois@example.com"
        }
    });
    Session::from_login_payload(payload, 24).unwrap()
}

/// Successful login persists the token and profile into the session store
#[tokio::test]
async fn test_login_stores_session_in_configured_directory() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server.uri(), &dir);
    let store = SessionStore::new(dir.path().to_path_buf());

    Mock::given(method("POST"))
        .and(path("/responsableLogin"))
        .and(body_json(json!({
            "email": "jean.dubois@example.com",
            "mot_de_passe": "Secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok_fresh",
            "utilisateur": {
                "id": 7,
                "nom": "Dubois",
                "prenom": "Jean",
                "email": "jean.dubois@example.com"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = auth::login(&config, &store, "jean.dubois@example.com", "Secret123")
        .await
        .unwrap();
    assert_eq!(session.token, "tok_fresh");
    assert_eq!(session.display_name(), "Jean Dubois");

    // The store must now hold the same, still-active session
    let stored = store.load_active().unwrap().unwrap();
    assert_eq!(stored.token, "tok_fresh");
    assert_eq!(stored.display_name(), "Jean Dubois");
}

/// A rejected login surfaces the backend message and leaves the store empty
#[tokio::test]
async fn test_login_failure_keeps_store_empty() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server.uri(), &dir);
    let store = SessionStore::new(dir.path().to_path_buf());

    Mock::given(method("POST"))
        .and(path("/responsableLogin"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Identifiants invalides"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = auth::login(&config, &store, "jean.dubois@example.com", "MauvaisMdp1").await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Identifiants invalides"));
    assert!(store.load().unwrap().is_none());
}

/// Protected routes are called with the session's bearer token
#[tokio::test]
async fn test_protected_routes_carry_bearer_token() {
    let server = MockServer::start().await;

    let body = json!([{
        "id": 1,
        "utilisateur": {
            "id": 10,
            "nom": "Martin",
            "prenom": "Claire",
            "email": "claire.martin@example.com"
        },
        "quotas": []
    }]);

    Mock::given(method("GET"))
        .and(path("/responsable/commercials"))
        .and(header("authorization", "Bearer tok_abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    let client = ApiClient::new(&api).unwrap().with_token("tok_abc");

    let commercials = client.list_commercials().await.unwrap();
    assert_eq!(commercials.len(), 1);
    assert_eq!(commercials[0].utilisateur.email, "claire.martin@example.com");
}

/// The CSRF token from the configuration rides along as X-CSRF-TOKEN
#[tokio::test]
async fn test_csrf_header_attached_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/responsable/permissions"))
        .and(header("x-csrf-token", "csrf_42"))
        .and(header("authorization", "Bearer tok_abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiConfig {
        base_url: server.uri(),
        csrf_token: Some("csrf_42".to_string()),
        ..Default::default()
    };
    let client = ApiClient::new(&api).unwrap().with_token("tok_abc");

    let permissions = client.list_permissions().await.unwrap();
    assert!(permissions.is_empty());
}

/// Non-2xx responses become ApiError values carrying status and message
#[tokio::test]
async fn test_backend_error_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/responsable/commercials/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Commercial introuvable"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    let client = ApiClient::new(&api).unwrap().with_token("tok_abc");

    let err = client.delete_commercial(99).await.unwrap_err();
    match err.downcast_ref::<ProspectError>() {
        Some(ProspectError::Api { status, message }) => {
            assert_eq!(*status, 404);
            assert_eq!(message, "Commercial introuvable");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

/// Deleting a commercial re-fetches the full list afterwards
#[tokio::test]
async fn test_delete_commercial_triggers_full_refetch() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server.uri(), &dir);
    let session = logged_in_session();

    Mock::given(method("DELETE"))
        .and(path("/responsable/commercials/7"))
        .and(header("authorization", "Bearer tok_abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    // The refreshed list must be requested exactly once after the delete
    Mock::given(method("GET"))
        .and(path("/responsable/commercials"))
        .and(header("authorization", "Bearer tok_abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    commercials::run(CommercialCommand::Delete { id: 7 }, &config, &session)
        .await
        .unwrap();
}

/// Follow-up creation posts date and comment to the prospection's route
#[tokio::test]
async fn test_add_suivi_posts_date_and_comment() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/responsable/suivis/3"))
        .and(body_json(json!({
            "date_suivi": "2024-05-01",
            "commentaire": "Rappel prévu lundi"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    let client = ApiClient::new(&api).unwrap().with_token("tok_abc");

    let request = SuiviRequest {
        date_suivi: "2024-05-01".to_string(),
        commentaire: "Rappel prévu lundi".to_string(),
    };
    client.add_suivi(3, &request).await.unwrap();
}

/// Granting permissions posts the replacement id list for the commercial
#[tokio::test]
async fn test_grant_permissions_posts_id_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/responsable/addPermission/5"))
        .and(body_json(json!({"permissions": [1, 2]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    let client = ApiClient::new(&api).unwrap().with_token("tok_abc");

    let request = GrantPermissionsRequest {
        permissions: vec![1, 2],
    };
    client.grant_permissions(5, &request).await.unwrap();
}
