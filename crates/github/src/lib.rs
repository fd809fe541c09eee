//! GitHub infrastructure adapter.
//!
//! Implements [`board::ProjectBoardGateway`] against GitHub:
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | classify owner | `GET /orgs/{owner}` |
//! | list projects | `GET /repos/{owner}/{repo}/projects`, `/orgs/{org}/projects`, `/users/{user}/projects` |
//! | list columns | `GET /projects/{project_id}/columns` |
//! | list cards | `GET /projects/columns/{column_id}/cards` |
//! | get issue | `GET /repos/{owner}/{repo}/issues/{number}` |
//! | get pull request | `GET /repos/{owner}/{repo}/pulls/{number}` |
//! | create card | `POST /projects/columns/{column_id}/cards` |
//! | move card | `POST /projects/columns/cards/{card_id}/moves` |
//! | resolve project id | GraphQL `project(number:)` / `projects(search:)` |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. HTTP
//! transport, authentication headers, status mapping, and wire formats live
//! here; the [`board`] crate never sees them. Page walking is *not* done here:
//! each listing call fetches exactly the page it is asked for.

mod client;
mod config;
mod graphql;
mod wire;

pub use client::{GithubClientError, GithubGateway};
pub use config::{GithubConfig, DEFAULT_API_URL, DEFAULT_GRAPHQL_URL, DEFAULT_TIMEOUT};
