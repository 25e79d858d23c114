// ABOUTME: Test helper utilities for mocking Imgur API responses and transports
// ABOUTME: Provides mockito-based servers, canned JSON payloads and a recording transport

use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use mockito::{Server, ServerGuard};
use parking_lot::Mutex;
use secrecy::SecretString;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::transport::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::ImgurClient;

pub async fn mock_server() -> ServerGuard {
    Server::new_async().await
}

pub fn secret(value: &str) -> SecretString {
    SecretString::new(value.to_string().into_boxed_str())
}

/// Client pointed at a mockito server's `/3/` prefix.
pub fn client_for(server: &ServerGuard) -> ImgurClient {
    ImgurClient::builder()
        .client_id(secret("test-client-id"))
        .base_url(format!("{}/3/", server.url()))
        .build()
        .expect("client should build")
}

pub fn mock_envelope(data: serde_json::Value) -> serde_json::Value {
    json!({
        "data": data,
        "success": true,
        "status": 200
    })
}

pub fn mock_failure_envelope(status: i64) -> serde_json::Value {
    json!({
        "data": {
            "error": "Unable to find the requested resource",
            "request": "/3/whatever",
            "method": "GET"
        },
        "success": false,
        "status": status
    })
}

pub fn mock_image_data(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": null,
        "description": null,
        "datetime": 1700000000,
        "type": "image/png",
        "animated": false,
        "width": 640,
        "height": 480,
        "size": 12345,
        "views": 10,
        "bandwidth": 123450,
        "vote": null,
        "favorite": false,
        "nsfw": null,
        "section": null,
        "account_url": null,
        "account_id": null,
        "is_ad": false,
        "in_most_viral": false,
        "has_sound": false,
        "tags": [],
        "ad_type": 0,
        "ad_url": "",
        "edited": "0",
        "in_gallery": false,
        "link": format!("https://i.imgur.com/{id}.png")
    })
}

pub fn mock_gallery_image_data(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "A gallery image",
        "description": null,
        "datetime": 1700000100,
        "type": "image/jpeg",
        "animated": false,
        "width": 1024,
        "height": 768,
        "size": 54321,
        "views": 9001,
        "bandwidth": 489000000,
        "vote": null,
        "favorite": false,
        "nsfw": false,
        "section": "",
        "account_url": "someone",
        "account_id": 42,
        "comment_count": 12,
        "topic": null,
        "topic_id": null,
        "ups": 120,
        "downs": 3,
        "points": 117,
        "score": 140,
        "is_album": false,
        "in_most_viral": true,
        "link": format!("https://i.imgur.com/{id}.jpg")
    })
}

pub fn mock_album_data(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Holiday",
        "description": null,
        "datetime": 1700000200,
        "cover": "img1",
        "cover_width": 800,
        "cover_height": 600,
        "account_url": null,
        "account_id": null,
        "privacy": "hidden",
        "layout": "blog",
        "views": 77,
        "link": format!("https://imgur.com/a/{id}"),
        "favorite": false,
        "nsfw": null,
        "section": null,
        "images_count": 2,
        "in_gallery": false,
        "is_ad": false,
        "include_album_ads": false,
        "is_album": true,
        "images": [mock_image_data("img1"), mock_image_data("img2")]
    })
}

pub fn mock_gallery_album_data(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Gallery album",
        "description": "Published album",
        "datetime": 1700000300,
        "cover": "img1",
        "cover_width": 800,
        "cover_height": 600,
        "account_url": "someone",
        "account_id": 42,
        "privacy": "public",
        "layout": "blog",
        "views": 5000,
        "link": format!("https://imgur.com/a/{id}"),
        "ups": 300,
        "downs": 10,
        "points": 290,
        "score": 310,
        "is_album": true,
        "vote": null,
        "favorite": false,
        "nsfw": false,
        "comment_count": 40,
        "topic": "No Topic",
        "topic_id": 29,
        "images_count": 1,
        "images": [mock_image_data("img1")],
        "in_most_viral": false
    })
}

/// Canned quota headers as Imgur sends them.
pub fn rate_limit_headers() -> [(&'static str, &'static str); 5] {
    [
        ("x-ratelimit-userlimit", "2000"),
        ("x-ratelimit-userremaining", "1999"),
        ("x-ratelimit-userreset", "1700003600"),
        ("x-ratelimit-clientlimit", "12500"),
        ("x-ratelimit-clientremaining", "12499"),
    ]
}

/// Transport double that records every request and replays queued answers.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
}

impl RecordingTransport {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_json(&self, body: serde_json::Value, headers: &[(&str, &str)]) {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            header_map.insert(
                HeaderName::from_bytes(name.as_bytes()).expect("valid header name"),
                HeaderValue::from_str(value).expect("valid header value"),
            );
        }
        self.responses.lock().push_back(Ok(ApiResponse {
            status: StatusCode::OK,
            headers: header_map,
            body: body.to_string().into_bytes(),
        }));
    }

    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = request.url.clone();
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Connect {
                    url,
                    message: "no queued response".to_string(),
                    source: None,
                })
            })
    }
}

/// Client wired to a [`RecordingTransport`].
pub fn recording_client() -> (ImgurClient, Arc<RecordingTransport>) {
    let transport = RecordingTransport::shared();
    let client = ImgurClient::builder()
        .client_id(secret("test-client-id"))
        .transport(transport.clone())
        .build()
        .expect("client should build");
    (client, transport)
}
