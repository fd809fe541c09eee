//! [`GithubGateway`]: the REST + GraphQL implementation of [`ProjectBoardGateway`].

use async_trait::async_trait;
use board::{
    Card, CardId, CardPosition, Column, ColumnId, ContentId, ContentKind, GatewayError,
    IssueNumber, IssueRecord, OwnerLogin, PageRequest, Project, ProjectBoardGateway, ProjectId,
    ProjectScope, ProjectSelector, PullRequestRecord, RepositoryRef,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, RequestBuilder, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    graphql::{ProjectQuery, QueryResponse},
    wire::{
        CardBody, ColumnBody, CreateCardBody, ErrorBody, IssueBody, MoveCardBody, ProjectBody,
        PullRequestBody,
    },
    GithubConfig,
};

/// Media type enabling the classic projects API.
const PROJECTS_PREVIEW: &str = "application/vnd.github.inertia-preview+json";
const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";

/// Errors raised while constructing a [`GithubGateway`].
#[derive(Debug, Error)]
pub enum GithubClientError {
    /// The token contains characters that cannot appear in an HTTP header.
    #[error("The API token is not a valid header value")]
    InvalidToken,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Authenticated GitHub gateway.
///
/// One instance lives for the whole run. Requests are sent one at a time;
/// no retries and no caching are applied.
#[derive(Debug, Clone)]
pub struct GithubGateway {
    client: Client,
    api_url: String,
    graphql_url: String,
}

impl GithubGateway {
    /// Creates a gateway from `config`.
    ///
    /// # Errors
    ///
    /// [`GithubClientError`] if the token is not header-safe or the TLS
    /// backend cannot be initialised.
    pub fn new(config: &GithubConfig) -> Result<Self, GithubClientError> {
        let mut auth = HeaderValue::from_str(&format!("token {}", config.token))
            .map_err(|_| GithubClientError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            graphql_url: config.graphql_url.clone(),
        })
    }

    fn rest(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.api_url))
            .header(ACCEPT, PROJECTS_PREVIEW)
    }

    /// Sends `request` and maps every non-success status to a [`GatewayError`].
    async fn send(&self, request: RequestBuilder, resource: &str) -> Result<Response, GatewayError> {
        debug!(resource, "sending request");
        let response = request.send().await.map_err(|err| GatewayError::Transport {
            message: err.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(GatewayError::NotFound {
                resource: resource.to_owned(),
            });
        }
        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        Err(GatewayError::Status {
            status: status.as_u16(),
            message: body.message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        response.json::<T>().await.map_err(|err| GatewayError::Decode {
            message: err.to_string(),
        })
    }

    async fn get_page<T: DeserializeOwned>(&self, path: &str, page: PageRequest) -> Result<Vec<T>, GatewayError> {
        let request = self
            .rest(reqwest::Method::GET, path)
            .query(&[("per_page", page.per_page), ("page", page.page)]);
        Self::decode(self.send(request, path).await?).await
    }

    fn projects_path(scope: &ProjectScope) -> String {
        match scope {
            ProjectScope::Repository(repo) => format!("/repos/{}/{}/projects", repo.owner, repo.name),
            ProjectScope::Organization(org) => format!("/orgs/{org}/projects"),
            ProjectScope::User(user) => format!("/users/{user}/projects"),
        }
    }
}

#[async_trait]
impl ProjectBoardGateway for GithubGateway {
    async fn get_organization(&self, owner: &OwnerLogin) -> Result<(), GatewayError> {
        let path = format!("/orgs/{owner}");
        let request = self.rest(reqwest::Method::GET, &path);
        self.send(request, &path).await.map(drop)
    }

    #[instrument(skip(self), level = "debug")]
    async fn list_projects(&self, scope: &ProjectScope, page: PageRequest) -> Result<Vec<Project>, GatewayError> {
        let bodies: Vec<ProjectBody> = self.get_page(&Self::projects_path(scope), page).await?;
        Ok(bodies.into_iter().map(Project::from).collect())
    }

    #[instrument(skip(self), level = "debug")]
    async fn query_project(
        &self,
        scope: &ProjectScope,
        selector: &ProjectSelector,
    ) -> Result<Option<Project>, GatewayError> {
        let request = self
            .client
            .post(&self.graphql_url)
            .json(&ProjectQuery::new(scope, selector));
        let response: QueryResponse = Self::decode(self.send(request, "graphql").await?).await?;
        response.into_project()
    }

    #[instrument(skip(self), level = "debug")]
    async fn list_columns(&self, project: ProjectId, page: PageRequest) -> Result<Vec<Column>, GatewayError> {
        let path = format!("/projects/{project}/columns");
        let bodies: Vec<ColumnBody> = self.get_page(&path, page).await?;
        bodies.into_iter().map(|body| body.into_column(project)).collect()
    }

    #[instrument(skip(self), level = "debug")]
    async fn list_cards(&self, column: ColumnId, page: PageRequest) -> Result<Vec<Card>, GatewayError> {
        let path = format!("/projects/columns/{column}/cards");
        let bodies: Vec<CardBody> = self.get_page(&path, page).await?;
        bodies.into_iter().map(Card::try_from).collect()
    }

    async fn get_issue(
        &self,
        repository: &RepositoryRef,
        number: IssueNumber,
    ) -> Result<Option<IssueRecord>, GatewayError> {
        let path = format!("/repos/{}/{}/issues/{number}", repository.owner, repository.name);
        let request = self.rest(reqwest::Method::GET, &path);
        match self.send(request, &path).await {
            Ok(response) => IssueRecord::try_from(Self::decode::<IssueBody>(response).await?).map(Some),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn get_pull_request(
        &self,
        repository: &RepositoryRef,
        number: IssueNumber,
    ) -> Result<PullRequestRecord, GatewayError> {
        let path = format!("/repos/{}/{}/pulls/{number}", repository.owner, repository.name);
        let request = self.rest(reqwest::Method::GET, &path);
        let body: PullRequestBody = Self::decode(self.send(request, &path).await?).await?;
        Ok(body.into())
    }

    #[instrument(skip(self))]
    async fn create_card(&self, column: ColumnId, content: ContentId, kind: ContentKind) -> Result<Card, GatewayError> {
        let path = format!("/projects/columns/{column}/cards");
        let request = self
            .rest(reqwest::Method::POST, &path)
            .json(&CreateCardBody::new(content, kind));
        let body: CardBody = Self::decode(self.send(request, &path).await?).await?;
        Card::try_from(body)
    }

    #[instrument(skip(self))]
    async fn move_card(&self, card: CardId, column: ColumnId, position: CardPosition) -> Result<(), GatewayError> {
        let path = format!("/projects/columns/cards/{card}/moves");
        let request = self
            .rest(reqwest::Method::POST, &path)
            .json(&MoveCardBody::new(column, position));
        self.send(request, &path).await.map(drop)
    }
}
