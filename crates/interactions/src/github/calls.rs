//! REST calls against the GitHub projects API.
//!
//! Every call needs [`CallAnApi`] and rejects non-2xx answers with
//! [`Error::UnexpectedStatus`]; the raw [`ApiResponse`] is returned otherwise.

use async_trait::async_trait;
use screenplay::{Actor, ApiResponse, CallAnApi, Error, Question, Result};
use serde_json::json;
use tracing::debug;

use super::models::{Column, Project};

/// Adds a note card to a project column.
#[derive(Debug, Clone)]
pub struct CreateCard {
	pub column_id: String,
	pub note: String,
}

#[async_trait]
impl Question for CreateCard {
	type Answer = ApiResponse;

	async fn request_as(&self, actor: &Actor) -> Result<ApiResponse> {
		let api = actor.ability::<CallAnApi>()?;
		let path = format!("/projects/columns/{}/cards", self.column_id);
		let response = api.post(&path, json!({ "note": self.note })).await?.ensure_ok()?;
		let card = &response.json()["id"];
		debug!(target: "screenplay", column = %self.column_id, %card, "card created");
		Ok(response)
	}
}

#[derive(Debug, Clone)]
pub struct RetrieveCard {
	pub card_id: String,
}

#[async_trait]
impl Question for RetrieveCard {
	type Answer = ApiResponse;

	async fn request_as(&self, actor: &Actor) -> Result<ApiResponse> {
		let api = actor.ability::<CallAnApi>()?;
		api.get(&format!("/projects/columns/cards/{}", self.card_id)).await?.ensure_ok()
	}
}

/// Projects owned by a user.
#[derive(Debug, Clone)]
pub struct ListProjects {
	pub username: String,
}

#[async_trait]
impl Question for ListProjects {
	type Answer = ApiResponse;

	async fn request_as(&self, actor: &Actor) -> Result<ApiResponse> {
		let api = actor.ability::<CallAnApi>()?;
		api.get(&format!("/users/{}/projects", self.username)).await?.ensure_ok()
	}
}

/// Columns of a project, addressed by the project's `columns_url`.
#[derive(Debug, Clone)]
pub struct ListColumns {
	pub columns_url: String,
}

#[async_trait]
impl Question for ListColumns {
	type Answer = ApiResponse;

	async fn request_as(&self, actor: &Actor) -> Result<ApiResponse> {
		actor.ability::<CallAnApi>()?.get(&self.columns_url).await?.ensure_ok()
	}
}

/// The user's project named `name`.
#[derive(Debug, Clone)]
pub struct FindProject {
	pub username: String,
	pub name: String,
}

#[async_trait]
impl Question for FindProject {
	type Answer = Project;

	async fn request_as(&self, actor: &Actor) -> Result<Project> {
		let response = actor
			.calls(ListProjects {
				username: self.username.clone(),
			})
			.await?;
		let projects: Vec<Project> = response.json_as()?;

		projects
			.into_iter()
			.find(|project| project.name == self.name)
			.ok_or_else(|| Error::assertion(format!("user {} has no project named {:?}", self.username, self.name)))
	}
}

/// Ids of the project's columns, in board order. A board needs two columns
/// to move cards between, so fewer is an assertion failure.
#[derive(Debug, Clone)]
pub struct ProjectColumnIds {
	pub project: Project,
}

#[async_trait]
impl Question for ProjectColumnIds {
	type Answer = Vec<String>;

	async fn request_as(&self, actor: &Actor) -> Result<Vec<String>> {
		let response = actor
			.calls(ListColumns {
				columns_url: self.project.columns_url.clone(),
			})
			.await?;
		let columns: Vec<Column> = response.json_as()?;

		if columns.len() < 2 {
			return Err(Error::assertion(format!(
				"project {:?} has {} column(s), expected at least 2",
				self.project.name,
				columns.len()
			)));
		}
		Ok(columns.into_iter().map(|column| column.id).collect())
	}
}

/// Reads the `id` of a card response, whether the API sent it as a string or a number.
pub fn card_id(response: &ApiResponse) -> Result<String> {
	match &response.json()["id"] {
		serde_json::Value::String(id) => Ok(id.clone()),
		serde_json::Value::Number(id) => Ok(id.to_string()),
		other => Err(Error::assertion(format!("{} answered without a card id (id = {other})", response.url()))),
	}
}

pub fn create_card(column_id: impl Into<String>, note: impl Into<String>) -> CreateCard {
	CreateCard {
		column_id: column_id.into(),
		note: note.into(),
	}
}

pub fn retrieve_card(card_id: impl Into<String>) -> RetrieveCard {
	RetrieveCard { card_id: card_id.into() }
}

pub fn list_projects(username: impl Into<String>) -> ListProjects {
	ListProjects { username: username.into() }
}

pub fn find_project(username: impl Into<String>, name: impl Into<String>) -> FindProject {
	FindProject {
		username: username.into(),
		name: name.into(),
	}
}

pub fn project_column_ids(project: Project) -> ProjectColumnIds {
	ProjectColumnIds { project }
}
