//! Typed capability registry.
//!
//! A [`Capability`] is a zero-sized marker that pairs a name with the handle
//! type stored under it. Lookups go through the marker, so the caller always
//! knows the shape of what comes back:
//!
//! ```ignore
//! let page: Arc<dyn PageAbility> = abilities.resolve::<BrowseTheWeb>("Tester")?;
//! ```

use std::any::{Any, type_name};
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::api::ApiContext;
use crate::error::{Error, Result};
use crate::page::PageAbility;

/// Names a capability and fixes the handle type registered under that name.
pub trait Capability: 'static {
	/// Registry key; also the name reported by [`Error::MissingAbility`].
	const NAME: &'static str;

	/// Handle type, usually a trait object such as `dyn PageAbility`.
	type Handle: ?Sized + Send + Sync + 'static;
}

/// Drive a browser page.
#[derive(Debug, Clone, Copy)]
pub struct BrowseTheWeb;

impl Capability for BrowseTheWeb {
	const NAME: &'static str = "page";
	type Handle = dyn PageAbility;
}

/// Call an HTTP API through a preconfigured context.
#[derive(Debug, Clone, Copy)]
pub struct CallAnApi;

impl Capability for CallAnApi {
	const NAME: &'static str = "http context";
	type Handle = dyn ApiContext;
}

type StoredHandle = Box<dyn Any + Send + Sync>;

/// Per-actor map from capability name to resource handle.
///
/// At most one handle is bound per name; registration order is preserved.
#[derive(Default)]
pub struct Abilities {
	handles: IndexMap<&'static str, StoredHandle>,
}

impl Abilities {
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds `handle` under `C::NAME`.
	///
	/// Fails with [`Error::AbilityAlreadyRegistered`] if the name is taken,
	/// even when the existing handle is the same one.
	pub fn register<C: Capability>(&mut self, handle: Arc<C::Handle>) -> Result<()> {
		if self.handles.contains_key(C::NAME) {
			return Err(Error::AbilityAlreadyRegistered(C::NAME));
		}
		debug!(target: "screenplay", ability = C::NAME, "register ability");
		self.handles.insert(C::NAME, Box::new(handle));
		Ok(())
	}

	/// Binds `handle` under `C::NAME`, overwriting any previous handle.
	///
	/// Returns `true` if a handle was replaced.
	pub fn replace<C: Capability>(&mut self, handle: Arc<C::Handle>) -> bool {
		debug!(target: "screenplay", ability = C::NAME, "replace ability");
		self.handles.insert(C::NAME, Box::new(handle)).is_some()
	}

	/// Returns the handle bound under `C::NAME`.
	///
	/// `actor` only feeds the error message.
	pub fn resolve<C: Capability>(&self, actor: &str) -> Result<Arc<C::Handle>> {
		let stored = self.handles.get(C::NAME).ok_or_else(|| Error::MissingAbility {
			actor: actor.to_string(),
			ability: C::NAME,
		})?;

		stored
			.downcast_ref::<Arc<C::Handle>>()
			.cloned()
			.ok_or(Error::AbilityTypeMismatch {
				ability: C::NAME,
				expected: type_name::<C::Handle>(),
			})
	}

	/// Removes the handle bound under `C::NAME`, returning whether one existed.
	pub fn forget<C: Capability>(&mut self) -> bool {
		self.handles.shift_remove(C::NAME).is_some()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.handles.contains_key(name)
	}

	/// Capability names in registration order.
	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.handles.keys().copied()
	}

	pub fn len(&self) -> usize {
		self.handles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.handles.is_empty()
	}
}

impl std::fmt::Debug for Abilities {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_set().entries(self.names()).finish()
	}
}
