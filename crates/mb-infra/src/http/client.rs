//! Reqwest-based adapter for the admin REST backend.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use mb_core::config::ApiConfig;
use mb_core::content::{CollectionEntity, HeroSlide, LocalImage, PublishStatus};
use mb_core::error::ApiError;
use mb_core::ids::EntityId;
use mb_core::ports::{CollectionApiPort, HeroSlideApiPort, Page};

use super::wire::{form_fields, DataEnvelope, DeleteEnvelope, ListEnvelope};

/// Build the shared HTTP client from configuration.
pub fn build_http_client(config: &ApiConfig) -> Result<Client, ApiError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))
}

/// REST client for one collection resource.
///
/// Mutations carrying an image go out as multipart form data; plain field
/// updates go out as JSON. One instance per resource, all sharing the same
/// underlying `reqwest::Client`.
pub struct RestCollectionClient<E: CollectionEntity> {
    http: Client,
    base_url: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E: CollectionEntity> RestCollectionClient<E> {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            _entity: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, E::RESOURCE)
    }

    fn entity_url(&self, id: EntityId) -> String {
        format!("{}/{}/{}", self.base_url, E::RESOURCE, id)
    }

    fn multipart<T: Serialize>(payload: &T, image: &LocalImage) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (name, value) in form_fields(payload)? {
            form = form.text(name, value);
        }
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| ApiError::Decode(format!("invalid content type: {e}")))?;
        Ok(form.part(E::IMAGE_FIELD.to_string(), part))
    }
}

fn request_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err.to_string())
    }
}

/// Cap error bodies so a server stack trace does not flood the UI.
fn clip(message: String) -> String {
    const LIMIT: usize = 200;
    if message.len() <= LIMIT {
        message
    } else {
        let mut end = LIMIT;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        message[..end].to_string()
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            code: status.as_u16(),
            message: clip(message),
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl<E: CollectionEntity> CollectionApiPort<E> for RestCollectionClient<E> {
    async fn list(&self, page: u32) -> Result<Page<E>, ApiError> {
        debug!(resource = E::RESOURCE, page, "listing collection");
        let response = self
            .http
            .get(self.collection_url())
            .query(&[("page", page)])
            .send()
            .await
            .map_err(request_error)?;
        let envelope: ListEnvelope<E> = read_json(response).await?;
        Ok(Page {
            data: envelope.data,
            pagination: envelope.pagination,
        })
    }

    async fn get(&self, id: EntityId) -> Result<E, ApiError> {
        let response = self
            .http
            .get(self.entity_url(id))
            .send()
            .await
            .map_err(request_error)?;
        let envelope: DataEnvelope<E> = read_json(response).await?;
        Ok(envelope.data)
    }

    async fn create(&self, draft: &E::Draft, image: Option<&LocalImage>) -> Result<E, ApiError> {
        debug!(resource = E::RESOURCE, multipart = image.is_some(), "creating record");
        let request = self.http.post(self.collection_url());
        let request = match image {
            Some(image) => request.multipart(Self::multipart(draft, image)?),
            None => request.json(draft),
        };
        let response = request.send().await.map_err(request_error)?;
        let envelope: DataEnvelope<E> = read_json(response).await?;
        Ok(envelope.data)
    }

    async fn update(
        &self,
        id: EntityId,
        patch: &E::Patch,
        image: Option<&LocalImage>,
    ) -> Result<E, ApiError> {
        debug!(resource = E::RESOURCE, id = %id, multipart = image.is_some(), "updating record");
        let request = self.http.patch(self.entity_url(id));
        let request = match image {
            Some(image) => request.multipart(Self::multipart(patch, image)?),
            None => request.json(patch),
        };
        let response = request.send().await.map_err(request_error)?;
        let envelope: DataEnvelope<E> = read_json(response).await?;
        Ok(envelope.data)
    }

    async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.entity_url(id))
            .send()
            .await
            .map_err(request_error)?;
        let status = response.status();
        let envelope: DeleteEnvelope = read_json(response).await?;
        if envelope.success {
            Ok(())
        } else {
            Err(ApiError::Status {
                code: status.as_u16(),
                message: "delete was not acknowledged".to_string(),
            })
        }
    }
}

#[async_trait]
impl HeroSlideApiPort for RestCollectionClient<HeroSlide> {
    async fn set_active(&self, id: EntityId, status: PublishStatus) -> Result<HeroSlide, ApiError> {
        debug!(id = %id, status = status.as_str(), "changing slide status");
        let response = self
            .http
            .patch(format!("{}/status", self.entity_url(id)))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await
            .map_err(request_error)?;
        let envelope: DataEnvelope<HeroSlide> = read_json(response).await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mb_core::content::{Facility, FacilityPatch, HeroSlideDraft};

    fn client_for<E: CollectionEntity>(server: &mockito::ServerGuard) -> RestCollectionClient<E> {
        let http = build_http_client(&ApiConfig::default()).unwrap();
        RestCollectionClient::new(http, server.url())
    }

    fn slide_json(id: i64, serial: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": "Welcome",
            "subtitle": "",
            "description": "Your health first",
            "image": "https://cdn.example/1.png",
            "serial": serial,
            "status": "active"
        })
    }

    #[tokio::test]
    async fn list_decodes_the_page_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/hero-slides?page=2")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "data": [slide_json(1, "1"), slide_json(2, "2")],
                    "pagination": {
                        "current_page": 2,
                        "per_page": 2,
                        "total_count": 6,
                        "total_page": 3
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client: RestCollectionClient<HeroSlide> = client_for(&server);
        let page = client.list(2).await.unwrap();
        mock.assert_async().await;
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.pagination.total_page, 3);
    }

    #[tokio::test]
    async fn create_with_an_image_goes_out_as_multipart() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hero-slides")
            .match_header(
                "content-type",
                mockito::Matcher::Regex("^multipart/form-data".to_string()),
            )
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "data": slide_json(9, "3") }).to_string())
            .create_async()
            .await;

        let client: RestCollectionClient<HeroSlide> = client_for(&server);
        let draft = HeroSlideDraft {
            title: "Summer Offer".into(),
            description: "20% off".into(),
            ..HeroSlideDraft::default()
        };
        let image = LocalImage::new("s.png", "image/png", vec![1u8, 2]);
        let created = client.create(&draft, Some(&image)).await.unwrap();
        mock.assert_async().await;
        assert_eq!(created.id, EntityId::new(9));
    }

    #[tokio::test]
    async fn update_without_an_image_sends_a_json_patch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/facilities/4")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({ "name": "New ICU" }),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "data": {
                        "id": 4,
                        "name": "New ICU",
                        "description": "d",
                        "image": null,
                        "status": "active"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client: RestCollectionClient<Facility> = client_for(&server);
        let patch = FacilityPatch {
            name: Some("New ICU".into()),
            ..FacilityPatch::default()
        };
        let updated = client.update(EntityId::new(4), &patch, None).await.unwrap();
        mock.assert_async().await;
        assert_eq!(updated.name, "New ICU");
    }

    #[tokio::test]
    async fn server_rejection_maps_to_a_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/facilities/4")
            .with_status(422)
            .with_body("name must not be blank")
            .create_async()
            .await;

        let client: RestCollectionClient<Facility> = client_for(&server);
        let patch = FacilityPatch {
            name: Some(String::new()),
            ..FacilityPatch::default()
        };
        let err = client
            .update(EntityId::new(4), &patch, None)
            .await
            .unwrap_err();
        match err {
            ApiError::Status { code, message } => {
                assert_eq!(code, 422);
                assert!(message.contains("blank"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_record_maps_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/facilities/99")
            .with_status(404)
            .create_async()
            .await;

        let client: RestCollectionClient<Facility> = client_for(&server);
        let err = client.get(EntityId::new(99)).await.unwrap_err();
        assert_eq!(err, ApiError::NotFound);
    }

    #[tokio::test]
    async fn unacknowledged_delete_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/facilities/7")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "success": false }"#)
            .create_async()
            .await;

        let client: RestCollectionClient<Facility> = client_for(&server);
        let err = client.delete(EntityId::new(7)).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { .. }));
    }

    #[tokio::test]
    async fn set_active_hits_the_dedicated_status_route() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/hero-slides/1/status")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({ "status": "inactive" }),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "data": slide_json(1, "1") }).to_string())
            .create_async()
            .await;

        let client: RestCollectionClient<HeroSlide> = client_for(&server);
        client
            .set_active(EntityId::new(1), PublishStatus::Inactive)
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
