//! [`Actor`]: the single facade tests interact with.


use std::sync::Arc;

use tracing::debug;

use crate::ability::{Abilities, Capability};
use crate::api::ApiResponse;
use crate::error::Result;
use crate::interaction::{Question, Task};

/// Performs tasks and asks questions using the abilities it was given.
///
/// Abilities are registered through `&mut self` during setup; the
/// execution entry points only need `&self`, so the registry cannot change
/// while an interaction is running.
#[derive(Debug, Default)]
pub struct Actor {
	name: Option<String>,
	abilities: Abilities,
}

impl Actor {
	/// Creates an anonymous actor with no abilities.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a named actor with no abilities.
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			abilities: Abilities::new(),
		}
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Name used in errors and log events.
	pub fn display_name(&self) -> &str {
		self.name.as_deref().unwrap_or("the actor")
	}

	/// Gives the actor a capability.
	///
	/// Fails if the capability name is already bound; use
	/// [`replace_ability`](Self::replace_ability) to overwrite.
	pub fn can_use<C: Capability>(&mut self, handle: Arc<C::Handle>) -> Result<()> {
		self.abilities.register::<C>(handle)
	}

	/// Builder form of [`can_use`](Self::can_use).
	pub fn with_ability<C: Capability>(mut self, handle: Arc<C::Handle>) -> Result<Self> {
		self.can_use::<C>(handle)?;
		Ok(self)
	}

	/// Binds a capability, overwriting any previous handle. Returns `true` if one was replaced.
	pub fn replace_ability<C: Capability>(&mut self, handle: Arc<C::Handle>) -> bool {
		self.abilities.replace::<C>(handle)
	}

	/// Resolves the handle for capability `C`.
	pub fn ability<C: Capability>(&self) -> Result<Arc<C::Handle>> {
		self.abilities.resolve::<C>(self.display_name())
	}

	pub fn has_ability(&self, name: &str) -> bool {
		self.abilities.contains(name)
	}

	pub fn abilities(&self) -> &Abilities {
		&self.abilities
	}

	/// Performs `task`. A tuple or `Vec<Box<dyn Task>>` runs its steps in
	/// order and stops at the first failure, which is returned unchanged.
	pub async fn attempts_to<T: Task>(&self, task: T) -> Result<()> {
		debug!(target: "screenplay", actor = self.display_name(), task = %task.description(), "attempts to");
		task.perform_as(self).await
	}

	/// Performs each task in order, stopping at the first failure.
	pub async fn attempts_to_all<I>(&self, tasks: I) -> Result<()>
	where
		I: IntoIterator,
		I::Item: Task,
	{
		for task in tasks {
			self.attempts_to(task).await?;
		}
		Ok(())
	}

	/// Asks `question` and returns its answer untouched.
	pub async fn asks_for<Q: Question>(&self, question: Q) -> Result<Q::Answer> {
		debug!(target: "screenplay", actor = self.display_name(), question = %question.description(), "asks for");
		question.request_as(self).await
	}

	/// Same as [`asks_for`](Self::asks_for), for API calls answering with a raw response.
	pub async fn calls<Q>(&self, call: Q) -> Result<ApiResponse>
	where
		Q: Question<Answer = ApiResponse>,
	{
		debug!(target: "screenplay", actor = self.display_name(), call = %call.description(), "calls");
		call.request_as(self).await
	}
}
