//! Task and Question contracts.
//!
//! A concrete interaction is a plain value (its fields are its parameters)
//! implementing one of these traits directly. It never stores an ability
//! handle; it resolves what it needs from the [`Actor`] when it runs.

use async_trait::async_trait;

use crate::actor::Actor;
use crate::error::Result;

/// Unqualified type name, used as the default description.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
	let full = std::any::type_name::<T>();
	let head = full.split('<').next().unwrap_or(full);
	head.rsplit("::").next().unwrap_or(head).to_string()
}

/// A state-changing or verifying step.
#[async_trait]
pub trait Task: Send + Sync {
	/// Performs the step on behalf of `actor`.
	async fn perform_as(&self, actor: &Actor) -> Result<()>;

	/// Label used in log events.
	fn description(&self) -> String {
		short_type_name::<Self>()
	}
}

/// A read that answers with a typed value.
#[async_trait]
pub trait Question: Send + Sync {
	type Answer: Send;

	/// Computes the answer on behalf of `actor`.
	async fn request_as(&self, actor: &Actor) -> Result<Self::Answer>;

	/// Label used in log events.
	fn description(&self) -> String {
		short_type_name::<Self>()
	}
}

#[async_trait]
impl<T: Task + ?Sized> Task for Box<T> {
	async fn perform_as(&self, actor: &Actor) -> Result<()> {
		(**self).perform_as(actor).await
	}

	fn description(&self) -> String {
		(**self).description()
	}
}

#[async_trait]
impl<'a, T: Task + ?Sized> Task for &'a T {
	async fn perform_as(&self, actor: &Actor) -> Result<()> {
		(**self).perform_as(actor).await
	}

	fn description(&self) -> String {
		(**self).description()
	}
}

#[async_trait]
impl Task for Vec<Box<dyn Task>> {
	async fn perform_as(&self, actor: &Actor) -> Result<()> {
		for task in self {
			actor.attempts_to(task).await?;
		}
		Ok(())
	}

	fn description(&self) -> String {
		let steps: Vec<String> = self.iter().map(|task| task.description()).collect();
		format!("[{}]", steps.join(", "))
	}
}

#[async_trait]
impl<Q: Question + ?Sized> Question for Box<Q> {
	type Answer = Q::Answer;

	async fn request_as(&self, actor: &Actor) -> Result<Self::Answer> {
		(**self).request_as(actor).await
	}

	fn description(&self) -> String {
		(**self).description()
	}
}

#[async_trait]
impl<'a, Q: Question + ?Sized> Question for &'a Q {
	type Answer = Q::Answer;

	async fn request_as(&self, actor: &Actor) -> Result<Self::Answer> {
		(**self).request_as(actor).await
	}

	fn description(&self) -> String {
		(**self).description()
	}
}

/// Tuples run their members in order and stop at the first failure.
macro_rules! task_sequence {
	($($name:ident),+) => {
		#[async_trait]
		impl<$($name: Task),+> Task for ($($name,)+) {
			#[allow(non_snake_case)]
			async fn perform_as(&self, actor: &Actor) -> Result<()> {
				let ($($name,)+) = self;
				$(actor.attempts_to($name).await?;)+
				Ok(())
			}

			#[allow(non_snake_case)]
			fn description(&self) -> String {
				let ($($name,)+) = self;
				let steps = [$($name.description()),+];
				format!("({})", steps.join(", "))
			}
		}
	};
}

task_sequence!(A);
task_sequence!(A, B);
task_sequence!(A, B, C);
task_sequence!(A, B, C, D);
task_sequence!(A, B, C, D, E);
task_sequence!(A, B, C, D, E, F);
task_sequence!(A, B, C, D, E, F, G);
task_sequence!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
	use super::*;

	struct Wave;

	#[async_trait]
	impl Task for Wave {
		async fn perform_as(&self, _actor: &Actor) -> Result<()> {
			Ok(())
		}
	}

	struct Generic<T>(T);

	#[async_trait]
	impl<T: Send + Sync> Question for Generic<T> {
		type Answer = ();

		async fn request_as(&self, _actor: &Actor) -> Result<()> {
			Ok(())
		}
	}

	#[test]
	fn default_description_is_the_bare_type_name() {
		assert_eq!(Wave.description(), "Wave");
		assert_eq!(Generic(1u8).description(), "Generic");
		assert_eq!(Box::new(Wave).description(), "Wave");
	}

	#[test]
	fn sequence_description_lists_steps() {
		assert_eq!((Wave, Wave).description(), "(Wave, Wave)");
		let steps: Vec<Box<dyn Task>> = vec![Box::new(Wave), Box::new(Wave)];
		assert_eq!(steps.description(), "[Wave, Wave]");
	}
}
