//! REST response and request bodies, and their conversion into board records.
//!
//! Only the fields the reconciliation reads are declared; everything else in
//! the GitHub payloads is ignored by serde.

use board::{
    Card, CardId, CardPosition, Column, ColumnId, ColumnName, ColumnUrl, ContentId, ContentKind,
    ContentUrl, GatewayError, IssueRecord, Project, ProjectId, ProjectName, ProjectNumber,
    PullRequestRecord,
};
use serde::{Deserialize, Serialize};

fn required<T>(value: Option<T>, field: &str) -> Result<T, GatewayError> {
    value.ok_or_else(|| GatewayError::Decode {
        message: format!("field '{field}' is empty"),
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectBody {
    pub id: u64,
    pub number: Option<u64>,
    pub name: Option<String>,
}

impl From<ProjectBody> for Project {
    fn from(body: ProjectBody) -> Self {
        Self {
            id: ProjectId::new(body.id),
            number: body.number.map(ProjectNumber::new),
            name: body.name.and_then(ProjectName::new),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ColumnBody {
    pub id: u64,
    pub name: String,
    pub url: String,
}

impl ColumnBody {
    pub fn into_column(self, project: ProjectId) -> Result<Column, GatewayError> {
        Ok(Column {
            id: ColumnId::new(self.id),
            name: required(ColumnName::new(self.name), "name")?,
            url: required(ColumnUrl::new(self.url), "url")?,
            project_id: project,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CardBody {
    pub id: u64,
    pub column_url: String,
    /// Absent for note cards.
    #[serde(default)]
    pub content_url: Option<String>,
}

impl TryFrom<CardBody> for Card {
    type Error = GatewayError;

    fn try_from(body: CardBody) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CardId::new(body.id),
            column_url: required(ColumnUrl::new(body.column_url), "column_url")?,
            content_url: body.content_url.and_then(ContentUrl::new),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueBody {
    pub id: u64,
    pub url: String,
    /// Present (non-null) when the number refers to a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl TryFrom<IssueBody> for IssueRecord {
    type Error = GatewayError;

    fn try_from(body: IssueBody) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContentId::new(body.id),
            url: required(ContentUrl::new(body.url), "url")?,
            is_pull_request: body.pull_request.is_some_and(|linkage| !linkage.is_null()),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullRequestBody {
    pub id: u64,
}

impl From<PullRequestBody> for PullRequestRecord {
    fn from(body: PullRequestBody) -> Self {
        Self {
            id: ContentId::new(body.id),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateCardBody {
    pub content_id: u64,
    pub content_type: &'static str,
}

impl CreateCardBody {
    pub fn new(content: ContentId, kind: ContentKind) -> Self {
        Self {
            content_id: content.as_u64(),
            content_type: kind.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MoveCardBody {
    pub position: &'static str,
    pub column_id: u64,
}

impl MoveCardBody {
    pub fn new(column: ColumnId, position: CardPosition) -> Self {
        Self {
            position: position.as_str(),
            column_id: column.as_u64(),
        }
    }
}

/// Error body returned by the REST API on failures.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_with_pull_request_linkage_is_flagged() {
        let body: IssueBody = serde_json::from_str(
            r#"{"id": 1, "url": "https://api.github.com/repos/a/b/issues/5",
                "pull_request": {"url": "https://api.github.com/repos/a/b/pulls/5"}}"#,
        )
        .unwrap();
        assert!(IssueRecord::try_from(body).unwrap().is_pull_request);
    }

    #[test]
    fn issue_with_null_linkage_is_plain() {
        let body: IssueBody = serde_json::from_str(
            r#"{"id": 1, "url": "https://api.github.com/repos/a/b/issues/5", "pull_request": null}"#,
        )
        .unwrap();
        assert!(!IssueRecord::try_from(body).unwrap().is_pull_request);
    }

    #[test]
    fn note_card_has_no_content_url() {
        let body: CardBody = serde_json::from_str(
            r#"{"id": 3, "note": "remember", "column_url": "https://api.github.com/projects/columns/9"}"#,
        )
        .unwrap();
        assert_eq!(Card::try_from(body).unwrap().content_url, None);
    }

    #[test]
    fn empty_column_name_is_a_decode_error() {
        let body = ColumnBody {
            id: 1,
            name: String::new(),
            url: "https://api.github.com/projects/columns/1".into(),
        };
        assert!(matches!(
            body.into_column(ProjectId::new(1)),
            Err(GatewayError::Decode { .. })
        ));
    }
}
