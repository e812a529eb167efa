//! Spreadsheet extractor: one document per data row, per tab

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::document::NormalizedDocument;
use crate::domain::drive::SessionFactory;
use crate::domain::extractor::ContentExtractor;
use crate::domain::remote_file::spreadsheet_edit_url;
use crate::domain::DomainError;

/// Walks every tab of a spreadsheet, treating row 0 as the header and
/// emitting one document per data row with `"label: value"` lines. A
/// failing tab is skipped and logged; the remaining tabs still produce
/// documents.
#[derive(Debug)]
pub struct SheetExtractor {
    sessions: Arc<dyn SessionFactory>,
}

impl SheetExtractor {
    pub fn new(sessions: Arc<dyn SessionFactory>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl ContentExtractor for SheetExtractor {
    async fn extract(
        &self,
        file_id: &str,
        acting_user: &str,
    ) -> Result<Vec<NormalizedDocument>, DomainError> {
        let api = self.sessions.session(acting_user).await?;
        let spreadsheet = api.get_spreadsheet(file_id).await?;

        let mut documents = Vec::new();

        for tab in &spreadsheet.tabs {
            let values = match api.get_sheet_values(file_id, &tab.title).await {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!(file_id, tab = %tab.title, error = %e, "skipping tab");
                    continue;
                }
            };

            let Some((header, rows)) = values.split_first() else {
                continue; // empty tab
            };

            for (index, row) in rows.iter().enumerate() {
                let content = row
                    .iter()
                    .enumerate()
                    .map(|(column, value)| {
                        let label = header.get(column).map(|h| h.trim()).unwrap_or("");
                        format!("{}: {}", label, value.trim())
                    })
                    .collect::<Vec<_>>()
                    .join("\n");

                documents.push(
                    NormalizedDocument::new(content, spreadsheet_edit_url(file_id, tab.sheet_id))
                        .with_title(format!("{} - {}", spreadsheet.title, tab.title))
                        .with_row(index + 1),
                );
            }
        }

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::drive::mock::{MockDriveApi, MockSessionFactory};
    use crate::domain::drive::{SheetTab, Spreadsheet};

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    fn spreadsheet(tabs: &[(&str, i64)]) -> Spreadsheet {
        Spreadsheet {
            title: "People".to_string(),
            tabs: tabs
                .iter()
                .map(|(title, sheet_id)| SheetTab {
                    title: title.to_string(),
                    sheet_id: *sheet_id,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_header_zipped_with_row_values() {
        let api = Arc::new(
            MockDriveApi::new()
                .with_spreadsheet("s1", spreadsheet(&[("Staff", 7)]))
                .with_values("s1", "Staff", grid(&[&["Name", "Age"], &["Ana", "30"]])),
        );
        let extractor = SheetExtractor::new(Arc::new(MockSessionFactory::new(api)));

        let documents = extractor.extract("s1", "ana@example.com").await.unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].content, "Name: Ana\nAge: 30");
        assert_eq!(documents[0].row(), Some(1));
        assert_eq!(documents[0].title(), Some("People - Staff"));
        assert_eq!(
            documents[0].source(),
            "https://docs.google.com/spreadsheets/d/s1/edit?gid=7"
        );
    }

    #[tokio::test]
    async fn test_missing_header_cell_renders_empty_label() {
        let api = Arc::new(
            MockDriveApi::new()
                .with_spreadsheet("s1", spreadsheet(&[("Staff", 0)]))
                .with_values("s1", "Staff", grid(&[&["Name"], &["Ana", "30"]])),
        );
        let extractor = SheetExtractor::new(Arc::new(MockSessionFactory::new(api)));

        let documents = extractor.extract("s1", "ana@example.com").await.unwrap();
        assert_eq!(documents[0].content, "Name: Ana\n: 30");
    }

    #[tokio::test]
    async fn test_one_document_per_data_row() {
        let api = Arc::new(
            MockDriveApi::new()
                .with_spreadsheet("s1", spreadsheet(&[("Staff", 0)]))
                .with_values(
                    "s1",
                    "Staff",
                    grid(&[&["Name"], &["Ana"], &["Bruno"], &["Carla"]]),
                ),
        );
        let extractor = SheetExtractor::new(Arc::new(MockSessionFactory::new(api)));

        let documents = extractor.extract("s1", "ana@example.com").await.unwrap();
        assert_eq!(documents.len(), 3);
        assert_eq!(documents[2].row(), Some(3));
    }

    #[tokio::test]
    async fn test_failing_tab_is_skipped_others_processed() {
        let api = Arc::new(
            MockDriveApi::new()
                .with_spreadsheet("s1", spreadsheet(&[("Broken", 0), ("Staff", 1)]))
                .with_values("s1", "Staff", grid(&[&["Name"], &["Ana"]])),
        );
        let extractor = SheetExtractor::new(Arc::new(MockSessionFactory::new(api)));

        let documents = extractor.extract("s1", "ana@example.com").await.unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].title(), Some("People - Staff"));
    }

    #[tokio::test]
    async fn test_empty_tab_produces_nothing() {
        let api = Arc::new(
            MockDriveApi::new()
                .with_spreadsheet("s1", spreadsheet(&[("Empty", 0)]))
                .with_values("s1", "Empty", vec![]),
        );
        let extractor = SheetExtractor::new(Arc::new(MockSessionFactory::new(api)));

        let documents = extractor.extract("s1", "ana@example.com").await.unwrap();
        assert!(documents.is_empty());
    }

    #[tokio::test]
    async fn test_spreadsheet_fetch_failure_propagates() {
        let api = Arc::new(MockDriveApi::new().with_failure("s1"));
        let extractor = SheetExtractor::new(Arc::new(MockSessionFactory::new(api)));

        let result = extractor.extract("s1", "ana@example.com").await;
        assert!(result.is_err());
    }
}
