//! Registration API client used by the sign-up pages.

mod client;
mod error;
mod types;

pub use client::RegistrationClient;
pub use error::ClientError;
pub use registration_store::{NewRegistration, Registration, RegistrationId, RegistrationPatch, Slot};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ID: &str = "01890a5d-ac96-774b-bcce-b302099a8057";

    fn registration_json(name: &str, phone: &str, guests: i64, slot: &str) -> serde_json::Value {
        json!({
            "_id": ID,
            "name": name,
            "phone": phone,
            "guests": guests,
            "slot": slot,
            "cancelled": false,
            "createdAt": "2024-01-01T19:00:00Z"
        })
    }

    fn registration(name: &str, guests: i64, slot: &str) -> Registration {
        serde_json::from_value(registration_json(name, "555-1", guests, slot)).unwrap()
    }

    async fn create_test_client(mock_server: &MockServer) -> RegistrationClient {
        RegistrationClient::new(mock_server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "OK", "timestamp": "2024-01-01T00:00:00Z" })),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        assert!(client.health_check().await);

        let health = client.health().await.unwrap();
        assert_eq!(health.status, "OK");
        assert_eq!(health.timestamp, "2024-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn test_health_check_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        assert!(!client.health_check().await);
        assert!(matches!(
            client.health().await,
            Err(ClientError::Api { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_create_registration() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/registrations"))
            .and(body_json(json!({
                "name": "Alex", "phone": "555-1", "guests": 2, "slot": "regular"
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(registration_json("Alex", "555-1", 2, "regular")),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let created = client
            .create_registration(&NewRegistration::new("Alex", "555-1", 2, Slot::REGULAR))
            .await
            .unwrap();

        assert_eq!(created.id.to_string(), ID);
        assert_eq!(created.guests, 2);
        assert!(!created.cancelled);
    }

    #[tokio::test]
    async fn test_create_registration_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/registrations"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "Missing required fields", "code": "VALIDATION_ERROR"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let result = client
            .create_registration(&NewRegistration::new("", "555-1", 2, Slot::REGULAR))
            .await;

        match result {
            Err(ClientError::Validation(message)) => assert_eq!(message, "Missing required fields"),
            other => panic!("unexpected result: {:?}", other.map(|r| r.id)),
        }
    }

    #[tokio::test]
    async fn test_get_registration_by_phone() {
        let mock_server = MockServer::start().await;

        // Note: + and spaces are percent-encoded
        Mock::given(method("GET"))
            .and(path("/registrations/phone/%2B1%20555%200100"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(registration_json("Kim", "+1 555 0100", 1, "early-bird")),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let found = client.get_registration_by_phone("+1 555 0100").await.unwrap();

        assert_eq!(found.name, "Kim");
        assert_eq!(found.phone, "+1 555 0100");
    }

    #[tokio::test]
    async fn test_get_registration_by_phone_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/registrations/phone/555-9"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "Registration not found" })),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let result = client.get_registration_by_phone("555-9").await;

        assert!(matches!(result, Err(ClientError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_registration() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(format!("/registrations/{}", ID)))
            .and(body_json(json!({ "guests": 3, "slot": "early-bird" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Registration updated successfully"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let patch = RegistrationPatch {
            guests: Some(3),
            slot: Some(Slot::EARLY_BIRD.into()),
            ..Default::default()
        };
        let response = client
            .update_registration(&ID.parse().unwrap(), &patch)
            .await
            .unwrap();

        assert_eq!(response.message, "Registration updated successfully");
    }

    #[tokio::test]
    async fn test_cancel_registration() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(format!("/registrations/{}", ID)))
            .and(body_json(json!({ "cancelled": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Registration updated successfully"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let result = client.cancel_registration(&ID.parse().unwrap()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_list_registrations_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/registrations"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "error": "Internal server error" })),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let result = client.list_registrations().await;

        match result {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal server error");
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
        }
    }

    #[tokio::test]
    async fn test_signup_sheet() {
        let mock_server = MockServer::start().await;

        let list = json!([
            registration_json("Alex", "555-1", 2, "regular"),
            registration_json("Sam", "555-2", 0, "early-bird"),
            registration_json("Kim", "555-3", 1, "regular"),
        ]);

        Mock::given(method("GET"))
            .and(path("/registrations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&list))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server).await;
        let sheet = client.signup_sheet().await.unwrap();

        assert_eq!(sheet.early_bird.len(), 1);
        assert_eq!(sheet.regular.len(), 2);
        assert_eq!(sheet.regular[0].name, "Alex");
        assert_eq!(sheet.regular[1].name, "Kim");
        assert_eq!(sheet.total(), 3);
        assert_eq!(SignupSheet::headcount(&sheet.regular), 5);
        assert_eq!(sheet.total_headcount(), 6);
    }

    #[test]
    fn test_signup_sheet_other_slots_and_cancelled() {
        let mut cancelled = registration("Gone", 4, "regular");
        cancelled.cancelled = true;

        let sheet = SignupSheet::from_registrations(vec![
            registration("Lee", 1, "late-night"),
            cancelled,
            registration("Pat", -2, "early-bird"),
        ]);

        assert_eq!(sheet.other.len(), 1);
        assert!(sheet.regular.is_empty());
        assert_eq!(sheet.total(), 2);
        // Negative guest counts never reduce the headcount
        assert_eq!(sheet.total_headcount(), 3);
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = RegistrationClient::new("http://localhost:3001/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001/api");
    }
}
