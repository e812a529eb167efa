//! Authenticated HTTP client for the Drive, Sheets and Slides APIs

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::DriveConfig;
use crate::domain::drive::{
    DriveApi, FileList, FileMetadata, Presentation, SheetTab, Slide, Spreadsheet,
};
use crate::domain::DomainError;

const LIST_FIELDS: &str = "nextPageToken, files(id, name, mimeType, parents, trashed)";
const METADATA_FIELDS: &str = "name,mimeType,modifiedTime";

/// Resolved endpoint surface for one client
#[derive(Debug, Clone)]
pub struct DriveEndpoints {
    pub files_base_url: String,
    pub sheets_base_url: String,
    pub slides_base_url: String,
    pub page_size: u32,
}

impl Default for DriveEndpoints {
    fn default() -> Self {
        Self::from(&DriveConfig::default())
    }
}

impl From<&DriveConfig> for DriveEndpoints {
    fn from(config: &DriveConfig) -> Self {
        Self {
            files_base_url: config.files_base_url.clone(),
            sheets_base_url: config.sheets_base_url.clone(),
            slides_base_url: config.slides_base_url.clone(),
            page_size: config.page_size,
        }
    }
}

/// One authenticated session against the remote file-store APIs. Built per
/// extractor call by the session factory and dropped afterwards.
#[derive(Debug)]
pub struct DriveClient {
    http: reqwest::Client,
    endpoints: DriveEndpoints,
    access_token: String,
}

impl DriveClient {
    pub fn new(endpoints: DriveEndpoints, access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
            access_token: access_token.into(),
        }
    }

    fn url(&self, base: &str, segments: &[&str]) -> Result<reqwest::Url, DomainError> {
        let mut url = reqwest::Url::parse(base)
            .map_err(|e| DomainError::provider("drive", format!("invalid base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| DomainError::provider("drive", "base URL cannot hold a path"))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn send(
        &self,
        url: reqwest::Url,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response, DomainError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| DomainError::provider("drive", format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DomainError::not_found(response.url().path().to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                "drive",
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: reqwest::Url,
        query: &[(&str, &str)],
    ) -> Result<T, DomainError> {
        self.send(url, query)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::provider("drive", format!("Failed to parse response: {}", e)))
    }

    /// Accumulate a byte stream chunk by chunk until complete
    async fn get_bytes(
        &self,
        url: reqwest::Url,
        query: &[(&str, &str)],
    ) -> Result<Bytes, DomainError> {
        let response = self.send(url, query).await?;

        let mut stream = response.bytes_stream();
        let mut buffer = BytesMut::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| DomainError::provider("drive", format!("Stream error: {}", e)))?;
            buffer.extend_from_slice(&chunk);
        }

        Ok(buffer.freeze())
    }
}

#[async_trait]
impl DriveApi for DriveClient {
    async fn list_children(
        &self,
        parent_id: &str,
        page_token: Option<&str>,
    ) -> Result<FileList, DomainError> {
        let url = self.url(&self.endpoints.files_base_url, &["files"])?;
        let q = format!("'{}' in parents", parent_id);
        let page_size = self.endpoints.page_size.to_string();

        let mut query = vec![
            ("q", q.as_str()),
            ("pageSize", page_size.as_str()),
            ("fields", LIST_FIELDS),
            ("supportsAllDrives", "true"),
            ("includeItemsFromAllDrives", "true"),
        ];

        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        self.get_json(url, &query).await
    }

    async fn get_metadata(&self, file_id: &str) -> Result<FileMetadata, DomainError> {
        let url = self.url(&self.endpoints.files_base_url, &["files", file_id])?;
        self.get_json(
            url,
            &[("fields", METADATA_FIELDS), ("supportsAllDrives", "true")],
        )
        .await
    }

    async fn export(&self, file_id: &str, target_mime: &str) -> Result<Bytes, DomainError> {
        let url = self.url(&self.endpoints.files_base_url, &["files", file_id, "export"])?;
        self.get_bytes(url, &[("mimeType", target_mime)]).await
    }

    async fn download(&self, file_id: &str) -> Result<Bytes, DomainError> {
        let url = self.url(&self.endpoints.files_base_url, &["files", file_id])?;
        self.get_bytes(url, &[("alt", "media"), ("supportsAllDrives", "true")])
            .await
    }

    async fn get_spreadsheet(&self, spreadsheet_id: &str) -> Result<Spreadsheet, DomainError> {
        let url = self.url(
            &self.endpoints.sheets_base_url,
            &["spreadsheets", spreadsheet_id],
        )?;
        let payload: SpreadsheetPayload = self
            .get_json(url, &[("fields", "properties.title,sheets.properties")])
            .await?;

        Ok(Spreadsheet {
            title: payload.properties.title,
            tabs: payload
                .sheets
                .into_iter()
                .map(|sheet| SheetTab {
                    title: sheet.properties.title,
                    sheet_id: sheet.properties.sheet_id,
                })
                .collect(),
        })
    }

    async fn get_sheet_values(
        &self,
        spreadsheet_id: &str,
        tab_title: &str,
    ) -> Result<Vec<Vec<String>>, DomainError> {
        let url = self.url(
            &self.endpoints.sheets_base_url,
            &["spreadsheets", spreadsheet_id, "values", tab_title],
        )?;
        let payload: ValuesPayload = self.get_json(url, &[]).await?;
        Ok(payload.values)
    }

    async fn get_presentation(&self, presentation_id: &str) -> Result<Presentation, DomainError> {
        let url = self.url(
            &self.endpoints.slides_base_url,
            &["presentations", presentation_id],
        )?;
        let payload: PresentationPayload = self.get_json(url, &[]).await?;

        let slides = payload
            .slides
            .into_iter()
            .map(|slide| Slide {
                text_runs: slide
                    .page_elements
                    .into_iter()
                    .filter_map(|element| element.shape)
                    .filter_map(|shape| shape.text)
                    .flat_map(|text| text.text_elements)
                    .filter_map(|element| element.text_run)
                    .map(|run| run.content)
                    .collect(),
            })
            .collect();

        Ok(Presentation {
            title: payload.title,
            slides,
        })
    }
}

// Wire payload shapes, mapped into the flat domain types above.

#[derive(Debug, Deserialize)]
struct SpreadsheetPayload {
    properties: SpreadsheetProperties,
    #[serde(default)]
    sheets: Vec<SheetPayload>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SheetPayload {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    title: String,
    #[serde(default)]
    sheet_id: i64,
}

#[derive(Debug, Deserialize)]
struct ValuesPayload {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct PresentationPayload {
    #[serde(default)]
    title: String,
    #[serde(default)]
    slides: Vec<SlidePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlidePayload {
    #[serde(default)]
    page_elements: Vec<PageElementPayload>,
}

#[derive(Debug, Deserialize)]
struct PageElementPayload {
    shape: Option<ShapePayload>,
}

#[derive(Debug, Deserialize)]
struct ShapePayload {
    text: Option<TextPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextPayload {
    #[serde(default)]
    text_elements: Vec<TextElementPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextElementPayload {
    text_run: Option<TextRunPayload>,
}

#[derive(Debug, Deserialize)]
struct TextRunPayload {
    #[serde(default)]
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> DriveClient {
        let endpoints = DriveEndpoints {
            files_base_url: server.uri(),
            sheets_base_url: server.uri(),
            slides_base_url: server.uri(),
            page_size: 1000,
        };
        DriveClient::new(endpoints, "ya29.test")
    }

    #[tokio::test]
    async fn test_list_children_follows_page_tokens() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/files"))
            .and(query_param("pageToken", "tok-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "files": [{"id": "f2", "name": "B", "mimeType": "application/pdf"}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/files"))
            .and(query_param("q", "'root' in parents"))
            .and(header("authorization", "Bearer ya29.test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "files": [{"id": "f1", "name": "A", "mimeType": "application/pdf"}],
                "nextPageToken": "tok-2"
            })))
            .mount(&server)
            .await;

        let client = client(&server);

        let first = client.list_children("root", None).await.unwrap();
        assert_eq!(first.files.len(), 1);
        assert_eq!(first.next_page_token.as_deref(), Some("tok-2"));

        let second = client.list_children("root", Some("tok-2")).await.unwrap();
        assert_eq!(second.files[0].id, "f2");
        assert!(second.next_page_token.is_none());
    }

    #[tokio::test]
    async fn test_get_metadata() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/files/doc-1"))
            .and(query_param("fields", METADATA_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Notes",
                "mimeType": "application/vnd.google-apps.document",
                "modifiedTime": "2024-03-01T10:00:00Z"
            })))
            .mount(&server)
            .await;

        let metadata = client(&server).get_metadata("doc-1").await.unwrap();
        assert_eq!(metadata.name, "Notes");
        assert_eq!(metadata.modified_time.as_deref(), Some("2024-03-01T10:00:00Z"));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = client(&server).get_metadata("gone").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_export_accumulates_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/files/doc-1/export"))
            .and(query_param("mimeType", "text/plain"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"exported text".to_vec()))
            .mount(&server)
            .await;

        let bytes = client(&server).export("doc-1", "text/plain").await.unwrap();
        assert_eq!(&bytes[..], b"exported text");
    }

    #[tokio::test]
    async fn test_get_spreadsheet_maps_tabs() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spreadsheets/s1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "properties": {"title": "Budget"},
                "sheets": [
                    {"properties": {"title": "Q1", "sheetId": 0}},
                    {"properties": {"title": "Q2", "sheetId": 913}}
                ]
            })))
            .mount(&server)
            .await;

        let spreadsheet = client(&server).get_spreadsheet("s1").await.unwrap();
        assert_eq!(spreadsheet.title, "Budget");
        assert_eq!(spreadsheet.tabs.len(), 2);
        assert_eq!(spreadsheet.tabs[1].sheet_id, 913);
    }

    #[tokio::test]
    async fn test_get_sheet_values() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/spreadsheets/s1/values/Q1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "range": "Q1!A1:B2",
                "values": [["Name", "Age"], ["Ana", "30"]]
            })))
            .mount(&server)
            .await;

        let values = client(&server).get_sheet_values("s1", "Q1").await.unwrap();
        assert_eq!(values[0], vec!["Name", "Age"]);
        assert_eq!(values[1], vec!["Ana", "30"]);
    }

    #[tokio::test]
    async fn test_get_presentation_collects_text_runs_in_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/presentations/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "title": "Deck",
                "slides": [
                    {"pageElements": [
                        {"shape": {"text": {"textElements": [
                            {"textRun": {"content": "Hello "}},
                            {"endOfParagraph": {}},
                            {"textRun": {"content": "World"}}
                        ]}}},
                        {"line": {}}
                    ]},
                    {"pageElements": []}
                ]
            })))
            .mount(&server)
            .await;

        let presentation = client(&server).get_presentation("p1").await.unwrap();
        assert_eq!(presentation.title, "Deck");
        assert_eq!(presentation.slides[0].text_runs, vec!["Hello ", "World"]);
        assert!(presentation.slides[1].text_runs.is_empty());
    }
}
