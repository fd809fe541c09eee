//! Newtype domain identifiers.
//!
//! Every remote concept that has an identity is represented as a distinct
//! newtype wrapping a primitive. This prevents accidentally interchanging, for
//! example, a [`ColumnId`] with a [`CardId`] even though both are `u64` under
//! the hood.
//!
//! URLs get the same treatment: a card's linked-content URL and a column URL
//! are both strings, but only [`ContentUrl`] values may be compared against
//! each other when looking for an existing card.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new value, returning `None` if it is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (GitHub-assigned integers).
// Generates: struct (Copy), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — GitHub-integer-backed
// ---------------------------------------------------------------------------

u64_id! {
    /// Database identifier of a project board.
    ///
    /// Unique across GitHub. The query strategy asks for `databaseId` so both
    /// resolution strategies produce the same kind of value.
    ProjectId
}

u64_id! {
    /// Identifies a column (lane) within a project board.
    ColumnId
}

u64_id! {
    /// Identifies a card linking a column to a piece of content.
    CardId
}

u64_id! {
    /// The record identifier of an issue or a pull request.
    ///
    /// Not to be confused with [`IssueNumber`]: an issue and its pull request
    /// share a number but have different record identifiers.
    ContentId
}

u64_id! {
    /// The per-repository number of an issue or pull request (`#42`).
    ///
    /// Issues and pull requests draw from one numbering sequence per repository.
    IssueNumber
}

u64_id! {
    /// The display number of a project board within its owner.
    ProjectNumber
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single reconciliation run (one invocation of the binary).
///
/// Generated fresh for every run and recorded on the root tracing span so all
/// activity from a single run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed (logins, names, URLs)
// ---------------------------------------------------------------------------

string_id! {
    /// A GitHub login: either an organization or an individual account.
    OwnerLogin
}

string_id! {
    /// A repository name without its owner (`"widgets"` in `"acme/widgets"`).
    RepositoryName
}

string_id! {
    /// The display name of a project board.
    ProjectName
}

string_id! {
    /// The display name of a project column (e.g. `"In Progress"`).
    ColumnName
}

string_id! {
    /// The canonical API URL of an issue.
    ///
    /// This is the key used to detect that content already has a card. It is
    /// compared by exact string equality; numeric identifiers are never used
    /// for that purpose because issues and pull requests live in different
    /// identifier namespaces.
    ContentUrl
}

string_id! {
    /// The API URL of a project column.
    ///
    /// A card reports the column it sits in only as this URL, so deciding
    /// whether a card must move compares [`ColumnUrl`] values.
    ColumnUrl
}
