//! In-memory recording fake of [`ProjectBoardGateway`].
//!
//! Listings are served in pages exactly like the remote API: page `n` holds
//! records `(n-1)*per_page .. n*per_page`. Created cards go to the top of
//! their column and moved cards are re-homed, so consecutive runs observe the
//! effects of earlier ones.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use board::{
    Card, CardId, CardPosition, Column, ColumnId, ColumnName, ColumnUrl, ContentId, ContentKind,
    ContentUrl, GatewayError, IssueNumber, IssueRecord, OwnerLogin, PageRequest, Project,
    ProjectBoardGateway, ProjectId, ProjectName, ProjectNumber, ProjectScope, ProjectSelector,
    PullRequestRecord, RepositoryRef,
};

/// One gateway call, as observed by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetOrganization(String),
    ListProjects(ProjectScope, u32),
    QueryProject(ProjectScope, ProjectSelector),
    ListColumns(ProjectId, u32),
    ListCards(ColumnId, u32),
    GetIssue(u64),
    GetPullRequest(u64),
    CreateCard {
        column: ColumnId,
        content: ContentId,
        kind: ContentKind,
    },
    MoveCard {
        card: CardId,
        column: ColumnId,
        position: CardPosition,
    },
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::CreateCard { .. } | Self::MoveCard { .. })
    }
}

#[derive(Default)]
struct State {
    organizations: HashSet<String>,
    organization_error: Option<GatewayError>,
    projects: HashMap<ProjectScope, Vec<Project>>,
    query_results: HashMap<(ProjectScope, ProjectSelector), Project>,
    columns: HashMap<ProjectId, Vec<Column>>,
    cards: HashMap<ColumnId, Vec<Card>>,
    issues: HashMap<u64, IssueRecord>,
    pulls: HashMap<u64, PullRequestRecord>,
    content_urls: HashMap<ContentId, ContentUrl>,
    mutation_error: Option<GatewayError>,
    next_card_id: u64,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct FakeBoard {
    state: Mutex<State>,
}

pub fn column_url(id: u64) -> ColumnUrl {
    ColumnUrl::new(format!("https://api.example/projects/columns/{id}")).unwrap()
}

pub fn issue_url(number: u64) -> ContentUrl {
    ContentUrl::new(format!("https://api.example/issues/{number}")).unwrap()
}

pub fn project(id: u64, number: u64, name: &str) -> Project {
    Project {
        id: ProjectId::new(id),
        number: Some(ProjectNumber::new(number)),
        name: ProjectName::new(name),
    }
}

pub fn card(id: u64, column: u64, content: Option<ContentUrl>) -> Card {
    Card {
        id: CardId::new(id),
        column_url: column_url(column),
        content_url: content,
    }
}

fn page_of<T: Clone>(items: &[T], page: PageRequest) -> Vec<T> {
    let per_page = page.per_page as usize;
    let start = (page.page as usize - 1) * per_page;
    items.iter().skip(start).take(per_page).cloned().collect()
}

impl FakeBoard {
    pub fn new() -> Self {
        let board = Self::default();
        board.state.lock().unwrap().next_card_id = 9000;
        board
    }

    pub fn with_organization(self, login: &str) -> Self {
        self.state.lock().unwrap().organizations.insert(login.to_owned());
        self
    }

    pub fn with_organization_error(self, error: GatewayError) -> Self {
        self.state.lock().unwrap().organization_error = Some(error);
        self
    }

    pub fn with_projects(self, scope: ProjectScope, projects: Vec<Project>) -> Self {
        self.state.lock().unwrap().projects.insert(scope, projects);
        self
    }

    pub fn with_query_result(self, scope: ProjectScope, selector: ProjectSelector, project: Project) -> Self {
        self.state
            .lock()
            .unwrap()
            .query_results
            .insert((scope, selector), project);
        self
    }

    /// Adds columns `(id, name)` to `project`, in board order.
    pub fn with_columns(self, project: u64, columns: &[(u64, &str)]) -> Self {
        let columns = columns
            .iter()
            .map(|(id, name)| Column {
                id: ColumnId::new(*id),
                name: ColumnName::new(*name).unwrap(),
                url: column_url(*id),
                project_id: ProjectId::new(project),
            })
            .collect();
        self.state
            .lock()
            .unwrap()
            .columns
            .insert(ProjectId::new(project), columns);
        self
    }

    pub fn with_cards(self, column: u64, cards: Vec<Card>) -> Self {
        self.state.lock().unwrap().cards.insert(ColumnId::new(column), cards);
        self
    }

    pub fn with_issue(self, number: u64, id: u64) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.issues.insert(
                number,
                IssueRecord {
                    id: ContentId::new(id),
                    url: issue_url(number),
                    is_pull_request: false,
                },
            );
            state.content_urls.insert(ContentId::new(id), issue_url(number));
        }
        self
    }

    pub fn with_pull_request(self, number: u64, issue_id: u64, pull_id: u64) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.issues.insert(
                number,
                IssueRecord {
                    id: ContentId::new(issue_id),
                    url: issue_url(number),
                    is_pull_request: true,
                },
            );
            state.pulls.insert(
                number,
                PullRequestRecord {
                    id: ContentId::new(pull_id),
                },
            );
            state.content_urls.insert(ContentId::new(pull_id), issue_url(number));
        }
        self
    }

    pub fn with_mutation_error(self, error: GatewayError) -> Self {
        self.state.lock().unwrap().mutation_error = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut self.state.lock().unwrap().calls)
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn cards_in(&self, column: u64) -> Vec<Card> {
        self.state
            .lock()
            .unwrap()
            .cards
            .get(&ColumnId::new(column))
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl ProjectBoardGateway for FakeBoard {
    async fn get_organization(&self, owner: &OwnerLogin) -> Result<(), GatewayError> {
        self.record(Call::GetOrganization(owner.to_string()));
        let state = self.state.lock().unwrap();
        if let Some(err) = &state.organization_error {
            return Err(err.clone());
        }
        if state.organizations.contains(owner.as_str()) {
            Ok(())
        } else {
            Err(GatewayError::NotFound {
                resource: format!("/orgs/{owner}"),
            })
        }
    }

    async fn list_projects(
        &self,
        scope: &ProjectScope,
        page: PageRequest,
    ) -> Result<Vec<Project>, GatewayError> {
        self.record(Call::ListProjects(scope.clone(), page.page));
        let state = self.state.lock().unwrap();
        Ok(state
            .projects
            .get(scope)
            .map(|projects| page_of(projects, page))
            .unwrap_or_default())
    }

    async fn query_project(
        &self,
        scope: &ProjectScope,
        selector: &ProjectSelector,
    ) -> Result<Option<Project>, GatewayError> {
        self.record(Call::QueryProject(scope.clone(), selector.clone()));
        let state = self.state.lock().unwrap();
        Ok(state
            .query_results
            .get(&(scope.clone(), selector.clone()))
            .cloned())
    }

    async fn list_columns(
        &self,
        project: ProjectId,
        page: PageRequest,
    ) -> Result<Vec<Column>, GatewayError> {
        self.record(Call::ListColumns(project, page.page));
        let state = self.state.lock().unwrap();
        Ok(state
            .columns
            .get(&project)
            .map(|columns| page_of(columns, page))
            .unwrap_or_default())
    }

    async fn list_cards(&self, column: ColumnId, page: PageRequest) -> Result<Vec<Card>, GatewayError> {
        self.record(Call::ListCards(column, page.page));
        let state = self.state.lock().unwrap();
        Ok(state
            .cards
            .get(&column)
            .map(|cards| page_of(cards, page))
            .unwrap_or_default())
    }

    async fn get_issue(
        &self,
        _repository: &RepositoryRef,
        number: IssueNumber,
    ) -> Result<Option<IssueRecord>, GatewayError> {
        self.record(Call::GetIssue(number.as_u64()));
        Ok(self.state.lock().unwrap().issues.get(&number.as_u64()).cloned())
    }

    async fn get_pull_request(
        &self,
        _repository: &RepositoryRef,
        number: IssueNumber,
    ) -> Result<PullRequestRecord, GatewayError> {
        self.record(Call::GetPullRequest(number.as_u64()));
        self.state
            .lock()
            .unwrap()
            .pulls
            .get(&number.as_u64())
            .cloned()
            .ok_or_else(|| GatewayError::NotFound {
                resource: format!("pull {number}"),
            })
    }

    async fn create_card(
        &self,
        column: ColumnId,
        content: ContentId,
        kind: ContentKind,
    ) -> Result<Card, GatewayError> {
        self.record(Call::CreateCard { column, content, kind });
        let mut state = self.state.lock().unwrap();
        if let Some(err) = &state.mutation_error {
            return Err(err.clone());
        }
        state.next_card_id += 1;
        let created = Card {
            id: CardId::new(state.next_card_id),
            column_url: column_url(column.as_u64()),
            content_url: state.content_urls.get(&content).cloned(),
        };
        state.cards.entry(column).or_default().insert(0, created.clone());
        Ok(created)
    }

    async fn move_card(
        &self,
        card: CardId,
        column: ColumnId,
        position: CardPosition,
    ) -> Result<(), GatewayError> {
        self.record(Call::MoveCard { card, column, position });
        let mut state = self.state.lock().unwrap();
        if let Some(err) = &state.mutation_error {
            return Err(err.clone());
        }
        let mut moved = None;
        for cards in state.cards.values_mut() {
            if let Some(index) = cards.iter().position(|c| c.id == card) {
                moved = Some(cards.remove(index));
            }
        }
        let mut moved = moved.ok_or_else(|| GatewayError::NotFound {
            resource: format!("card {card}"),
        })?;
        moved.column_url = column_url(column.as_u64());
        let target = state.cards.entry(column).or_default();
        match position {
            CardPosition::Top => target.insert(0, moved),
            CardPosition::Bottom => target.push(moved),
        }
        Ok(())
    }
}
