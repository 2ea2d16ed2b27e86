//! Project intake: validate a creation request, persist the Project, and
//! import an uploaded newline-delimited label file as child Part records.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::types_project::{ProjectDraft, ProjectRecord};

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Decode(#[from] std::str::Utf8Error),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Labels-upload precondition. Runs before any write: an upload is only
/// accepted for a prediction-module project with a prediction_uri.
pub fn validate(draft: &ProjectDraft, has_labels: bool) -> Result<(), IntakeError> {
    if has_labels {
        if !draft.is_prediction_module.unwrap_or(false) {
            return Err(IntakeError::Validation(
                "Upload labels should check is_prediction_module".to_string(),
            ));
        }
        if draft.prediction_uri.as_deref().unwrap_or("").is_empty() {
            return Err(IntakeError::Validation(
                "Upload labels should set prediction_uri".to_string(),
            ));
        }
    }
    Ok(())
}

/// Splits uploaded label content into Part names the same way the legacy
/// importer did: one label per line, `\r` stripped, import halting at the
/// first line that is empty after stripping. Labels after a blank line are
/// silently dropped (legacy behavior kept as-is; flagged for product-owner
/// confirmation, see DESIGN.md). A line of only spaces or tabs is not blank
/// and imports verbatim.
pub fn parse_labels(content: &str) -> Vec<String> {
    let mut labels = Vec::new();
    for line in content.split('\n') {
        let label = line.replace('\r', "");
        if label.is_empty() {
            break;
        }
        labels.push(label);
    }
    labels
}

fn amend_for_labels(draft: &mut ProjectDraft) {
    // Label uploads are always prediction modules and never demos, no matter
    // what the caller sent.
    draft.is_prediction_module = Some(true);
    draft.is_demo = Some(false);
}

/// Validates the draft, inserts the Project, then imports label content (if
/// any) as Part rows in file order.
///
/// The Project insert and the Part inserts are not wrapped in a transaction:
/// a failure partway through the import leaves the Project and the Parts
/// created so far in place, matching the system this replaces.
pub async fn create_project(
    pool: &PgPool,
    mut draft: ProjectDraft,
    labels: Option<bytes::Bytes>,
) -> Result<ProjectRecord, IntakeError> {
    validate(&draft, labels.is_some())?;

    if labels.is_some() {
        amend_for_labels(&mut draft);
    }

    let project: ProjectRecord = sqlx::query_as(
        r#"
        INSERT INTO projects
            (id, name, customvision_id, download_uri, is_demo, is_prediction_module,
             prediction_uri, prediction_header, need_retraining,
             accuracy_range_min, accuracy_range_max, max_images)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(draft.name.unwrap_or_default())
    .bind(&draft.customvision_id)
    .bind(&draft.download_uri)
    .bind(draft.is_demo.unwrap_or(false))
    .bind(draft.is_prediction_module.unwrap_or(false))
    .bind(&draft.prediction_uri)
    .bind(&draft.prediction_header)
    .bind(draft.need_retraining.unwrap_or(true))
    .bind(draft.accuracy_range_min.unwrap_or(30))
    .bind(draft.accuracy_range_max.unwrap_or(80))
    .bind(draft.max_images.unwrap_or(20))
    .fetch_one(pool)
    .await?;

    if let Some(bytes) = labels {
        let text = std::str::from_utf8(&bytes)?;
        for name in parse_labels(text) {
            sqlx::query("INSERT INTO parts (id, project_id, name) VALUES ($1, $2, $3)")
                .bind(Uuid::new_v4())
                .bind(project.id)
                .bind(&name)
                .execute(pool)
                .await?;
        }
    }

    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload_draft() -> ProjectDraft {
        ProjectDraft {
            name: Some("box-detector".to_string()),
            is_prediction_module: Some(true),
            prediction_uri: Some("http://10.0.0.2:5000/score".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_without_labels_has_no_extra_constraint() {
        let draft = ProjectDraft::default();
        assert!(validate(&draft, false).is_ok());
    }

    #[test]
    fn test_validate_rejects_labels_without_prediction_module() {
        let mut draft = upload_draft();
        draft.is_prediction_module = None;
        let err = validate(&draft, true).unwrap_err();
        assert!(matches!(err, IntakeError::Validation(_)));
        assert!(err.to_string().contains("is_prediction_module"));

        draft.is_prediction_module = Some(false);
        assert!(validate(&draft, true).is_err());
    }

    #[test]
    fn test_validate_rejects_labels_without_prediction_uri() {
        let mut draft = upload_draft();
        draft.prediction_uri = None;
        let err = validate(&draft, true).unwrap_err();
        assert!(err.to_string().contains("prediction_uri"));

        draft.prediction_uri = Some(String::new());
        assert!(validate(&draft, true).is_err());
    }

    #[test]
    fn test_validate_accepts_labels_with_preconditions_met() {
        assert!(validate(&upload_draft(), true).is_ok());
    }

    #[test]
    fn test_labels_force_prediction_module_and_clear_demo() {
        let mut draft = upload_draft();
        draft.is_prediction_module = Some(false);
        draft.is_demo = Some(true);
        amend_for_labels(&mut draft);
        assert_eq!(draft.is_prediction_module, Some(true));
        assert_eq!(draft.is_demo, Some(false));
    }

    #[test]
    fn test_parse_labels_stops_at_first_blank_line() {
        // "fish" is lost: the blank line halts the import.
        assert_eq!(parse_labels("cat\ndog\n\nfish\n"), vec!["cat", "dog"]);
    }

    #[test]
    fn test_parse_labels_without_trailing_newline() {
        assert_eq!(parse_labels("cat\ndog"), vec!["cat", "dog"]);
    }

    #[test]
    fn test_parse_labels_with_trailing_newline() {
        assert_eq!(parse_labels("cat\ndog\n"), vec!["cat", "dog"]);
    }

    #[test]
    fn test_parse_labels_strips_crlf() {
        assert_eq!(parse_labels("cat\r\ndog\r\n"), vec!["cat", "dog"]);
    }

    #[test]
    fn test_parse_labels_whitespace_line_is_not_blank() {
        assert_eq!(parse_labels("cat\n \ndog"), vec!["cat", " ", "dog"]);
    }

    #[test]
    fn test_parse_labels_empty_content() {
        assert!(parse_labels("").is_empty());
        assert!(parse_labels("\n").is_empty());
        assert!(parse_labels("\r\n").is_empty());
    }
}
