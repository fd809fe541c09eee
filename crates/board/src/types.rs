//! Record types returned by the gateway and produced by the reconciler.
//!
//! Each gateway operation has its own named record with only the fields the
//! reconciliation reads. Records are fetched fresh every run, never mutated
//! locally, and dropped when the run ends.

use serde::{Deserialize, Serialize};

use crate::{
    CardId, ColumnId, ColumnName, ColumnUrl, ContentId, ContentUrl, ProjectId, ProjectName,
    ProjectNumber,
};

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Number of records requested per page from every paginated listing.
///
/// A page holding fewer records than this is the last page.
pub const PAGE_SIZE: u32 = 100;

/// One page of a paginated listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page index.
    pub page: u32,
    /// Maximum number of records on the page.
    pub per_page: u32,
}

impl PageRequest {
    /// Returns the request for the first page at the given page size.
    pub fn first(per_page: u32) -> Self {
        Self { page: 1, per_page }
    }

    /// Returns the request for the page following this one.
    pub fn next(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            per_page: self.per_page,
        }
    }

    /// Returns `true` if a page of `len` records is the final page.
    pub fn is_last(self, len: usize) -> bool {
        len < self.per_page as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(PAGE_SIZE)
    }
}

// ---------------------------------------------------------------------------
// Board records
// ---------------------------------------------------------------------------

/// A project board as returned by a project listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Database identifier used by the column and card endpoints.
    pub id: ProjectId,
    /// Display number within the owner, when the listing reports one.
    pub number: Option<ProjectNumber>,
    /// Display name, when the listing reports one.
    pub name: Option<ProjectName>,
}

/// A column within a project board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: ColumnName,
    /// API URL of this column; cards refer back to their column by this value.
    pub url: ColumnUrl,
    pub project_id: ProjectId,
}

/// A card sitting in a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// URL of the column that currently holds the card.
    pub column_url: ColumnUrl,
    /// URL of the linked issue. `None` for note cards, which never match.
    pub content_url: Option<ContentUrl>,
}

impl Card {
    /// Returns `true` if this card links to exactly `url`.
    pub fn links_to(&self, url: &ContentUrl) -> bool {
        self.content_url.as_ref() == Some(url)
    }
}

/// Where a moved card is placed within its target column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPosition {
    Top,
    Bottom,
}

impl CardPosition {
    /// Returns the wire value (`"top"` or `"bottom"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

// ---------------------------------------------------------------------------
// Content records
// ---------------------------------------------------------------------------

/// Whether tracked content is a plain issue or a pull request.
///
/// Serialises to the values the card creation endpoint expects as
/// `content_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    Issue,
    PullRequest,
}

impl ContentKind {
    /// Returns the wire value (`"Issue"` or `"PullRequest"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "Issue",
            Self::PullRequest => "PullRequest",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issue record as fetched by number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub id: ContentId,
    pub url: ContentUrl,
    /// `true` when the issue carries pull-request linkage data, meaning the
    /// number actually refers to a pull request.
    pub is_pull_request: bool,
}

/// A pull-request record as fetched by number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    pub id: ContentId,
}

/// Normalised content to be placed on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Record identifier of the issue or of the pull request, matching `kind`.
    pub id: ContentId,
    /// Canonical URL, always taken from the issue record.
    pub url: ContentUrl,
    pub kind: ContentKind,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Terminal state reached by one reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// No card existed; a new one was created in the target column.
    Created,
    /// A card existed in another column and was moved to the top of the target.
    Moved,
    /// A card already sat in the target column; nothing was changed.
    Unchanged,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Moved => "moved",
            Self::Unchanged => "unchanged",
        })
    }
}

/// The observable result of a successful reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    /// The card now representing the content on the board.
    pub card_id: CardId,
    pub transition: Transition,
    pub content_kind: ContentKind,
}
