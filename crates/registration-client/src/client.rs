//! Registration HTTP client.

use crate::error::ClientError;
use crate::types::*;
use registration_store::{NewRegistration, Registration, RegistrationId, RegistrationPatch};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

/// Client for the registration API.
#[derive(Clone)]
pub struct RegistrationClient {
    client: Client,
    base_url: String,
}

impl RegistrationClient {
    /// Create a new client. `base_url` includes any mount prefix, e.g. `http://host/api`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the API is up.
    pub async fn health_check(&self) -> bool {
        self.health().await.is_ok()
    }

    /// Fetch the API health status.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Submit a new registration.
    #[instrument(skip(self, registration), fields(phone = %registration.phone))]
    pub async fn create_registration(
        &self,
        registration: &NewRegistration,
    ) -> Result<Registration, ClientError> {
        let response = self
            .client
            .post(format!("{}/registrations", self.base_url))
            .json(registration)
            .send()
            .await?;

        let created: Registration = Self::parse(response).await?;
        debug!(id = %created.id, "Registration created");
        Ok(created)
    }

    /// Look up an active registration by phone number.
    #[instrument(skip(self))]
    pub async fn get_registration_by_phone(&self, phone: &str) -> Result<Registration, ClientError> {
        let response = self
            .client
            .get(format!(
                "{}/registrations/phone/{}",
                self.base_url,
                encode(phone)
            ))
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Update the supplied fields of a registration.
    #[instrument(skip(self, patch))]
    pub async fn update_registration(
        &self,
        id: &RegistrationId,
        patch: &RegistrationPatch,
    ) -> Result<UpdateResponse, ClientError> {
        let response = self
            .client
            .put(format!("{}/registrations/{}", self.base_url, id))
            .json(patch)
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Cancel a registration.
    pub async fn cancel_registration(&self, id: &RegistrationId) -> Result<UpdateResponse, ClientError> {
        self.update_registration(id, &RegistrationPatch::cancel()).await
    }

    /// All active registrations, oldest first.
    #[instrument(skip(self))]
    pub async fn list_registrations(&self) -> Result<Vec<Registration>, ClientError> {
        let response = self
            .client
            .get(format!("{}/registrations", self.base_url))
            .send()
            .await?;

        let registrations: Vec<Registration> = Self::parse(response).await?;
        debug!("Fetched {} registrations", registrations.len());
        Ok(registrations)
    }

    /// Active registrations grouped by slot.
    pub async fn signup_sheet(&self) -> Result<SignupSheet, ClientError> {
        Ok(SignupSheet::from_registrations(self.list_registrations().await?))
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);

        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            StatusCode::BAD_REQUEST => Err(ClientError::Validation(message)),
            _ => {
                warn!(%status, "Registration API request failed: {}", message);
                Err(ClientError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
