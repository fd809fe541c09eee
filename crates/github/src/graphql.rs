//! GraphQL project lookup used by the query resolution strategy.
//!
//! The owner node is always aliased to `owner` so one response shape covers
//! organizations, users, and repositories. A title lookup goes through the
//! `projects(search:)` connection, which matches on substrings; only its
//! first node is requested.

use board::{GatewayError, Project, ProjectId, ProjectName, ProjectNumber, ProjectScope, ProjectSelector};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

const PROJECT_FIELDS: &str = "databaseId number name";

/// A GraphQL request body.
#[derive(Debug, Serialize)]
pub(crate) struct ProjectQuery {
    pub query: String,
    pub variables: Value,
}

impl ProjectQuery {
    pub fn new(scope: &ProjectScope, selector: &ProjectSelector) -> Self {
        let mut declarations = vec!["$owner: String!"];
        let mut variables = Map::new();
        let root = match scope {
            ProjectScope::Organization(login) => {
                variables.insert("owner".into(), json!(login.as_str()));
                "organization(login: $owner)"
            }
            ProjectScope::User(login) => {
                variables.insert("owner".into(), json!(login.as_str()));
                "user(login: $owner)"
            }
            ProjectScope::Repository(repo) => {
                declarations.push("$repo: String!");
                variables.insert("owner".into(), json!(repo.owner.as_str()));
                variables.insert("repo".into(), json!(repo.name.as_str()));
                "repository(owner: $owner, name: $repo)"
            }
        };
        let selection = match selector {
            ProjectSelector::Number(number) => {
                declarations.push("$number: Int!");
                variables.insert("number".into(), json!(number.as_u64()));
                format!("project(number: $number) {{ {PROJECT_FIELDS} }}")
            }
            ProjectSelector::Name(name) => {
                declarations.push("$search: String!");
                variables.insert("search".into(), json!(name.as_str()));
                format!("projects(search: $search, first: 1) {{ nodes {{ {PROJECT_FIELDS} }} }}")
            }
        };
        Self {
            query: format!(
                "query({}) {{ owner: {root} {{ {selection} }} }}",
                declarations.join(", ")
            ),
            variables: Value::Object(variables),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    pub data: Option<OwnerData>,
    #[serde(default)]
    pub errors: Vec<QueryError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerData {
    pub owner: Option<OwnerNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerNode {
    #[serde(default)]
    pub project: Option<ProjectNode>,
    #[serde(default)]
    pub projects: Option<ProjectConnection>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectConnection {
    #[serde(default)]
    pub nodes: Vec<Option<ProjectNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectNode {
    pub database_id: Option<u64>,
    pub number: Option<u64>,
    pub name: Option<String>,
}

impl QueryResponse {
    /// Extracts the matched project.
    ///
    /// `NOT_FOUND` errors (unknown owner or project number) mean "no match".
    /// Any other error is reported as [`GatewayError::Query`].
    pub fn into_project(self) -> Result<Option<Project>, GatewayError> {
        let (not_found, other): (Vec<_>, Vec<_>) = self
            .errors
            .into_iter()
            .partition(|err| err.kind.as_deref() == Some("NOT_FOUND"));
        if !other.is_empty() {
            let message = other
                .into_iter()
                .map(|err| err.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(GatewayError::Query { message });
        }
        if !not_found.is_empty() {
            return Ok(None);
        }

        let Some(owner) = self.data.and_then(|data| data.owner) else {
            return Ok(None);
        };
        let node = owner.project.or_else(|| {
            owner
                .projects
                .and_then(|connection| connection.nodes.into_iter().flatten().next())
        });
        node.map(ProjectNode::into_project).transpose()
    }
}

impl ProjectNode {
    fn into_project(self) -> Result<Project, GatewayError> {
        let id = self.database_id.ok_or_else(|| GatewayError::Decode {
            message: "project node has no databaseId".into(),
        })?;
        Ok(Project {
            id: ProjectId::new(id),
            number: self.number.map(ProjectNumber::new),
            name: self.name.and_then(ProjectName::new),
        })
    }
}

#[cfg(test)]
mod tests {
    use board::{OwnerLogin, RepositoryRef};

    use super::*;

    #[test]
    fn organization_number_query() {
        let query = ProjectQuery::new(
            &ProjectScope::Organization(OwnerLogin::new("acme").unwrap()),
            &ProjectSelector::Number(ProjectNumber::new(3)),
        );
        assert_eq!(
            query.query,
            "query($owner: String!, $number: Int!) { owner: organization(login: $owner) \
             { project(number: $number) { databaseId number name } } }"
        );
        assert_eq!(query.variables, json!({"owner": "acme", "number": 3}));
    }

    #[test]
    fn repository_title_query() {
        let repo: RepositoryRef = "acme/widgets".parse().unwrap();
        let query = ProjectQuery::new(
            &ProjectScope::Repository(repo),
            &ProjectSelector::Name(ProjectName::new("Roadmap").unwrap()),
        );
        assert!(query.query.contains("owner: repository(owner: $owner, name: $repo)"));
        assert!(query.query.contains("projects(search: $search, first: 1)"));
        assert_eq!(
            query.variables,
            json!({"owner": "acme", "repo": "widgets", "search": "Roadmap"})
        );
    }

    #[test]
    fn not_found_errors_mean_no_match() {
        let response: QueryResponse = serde_json::from_value(json!({
            "data": {"owner": null},
            "errors": [{"type": "NOT_FOUND", "message": "Could not resolve to an Organization"}]
        }))
        .unwrap();
        assert_eq!(response.into_project().unwrap(), None);
    }

    #[test]
    fn other_errors_fail_the_query() {
        let response: QueryResponse = serde_json::from_value(json!({
            "errors": [{"message": "Field 'projects' doesn't exist"}]
        }))
        .unwrap();
        assert!(matches!(response.into_project(), Err(GatewayError::Query { .. })));
    }

    #[test]
    fn first_search_node_is_used() {
        let response: QueryResponse = serde_json::from_value(json!({
            "data": {"owner": {"projects": {"nodes": [
                {"databaseId": 12, "number": 4, "name": "Roadmap 2025"},
                {"databaseId": 13, "number": 5, "name": "Roadmap"}
            ]}}}
        }))
        .unwrap();
        let project = response.into_project().unwrap().unwrap();
        assert_eq!(project.id, ProjectId::new(12));
    }
}
