//! The node tree of one scene, built from the object store by following
//! `_children` references from the scene root.

mod builder;
mod context;
mod error;

use std::fmt::{self, Display};

use indextree::{Arena, NodeId};

use crate::node::SceneNode;

pub use context::SceneContext;
pub use error::{SceneParseError, SceneParseResult};

pub struct SceneTree {
	pub root: NodeId,
	pub arena: Arena<SceneNode>,
}

impl SceneTree {
	pub fn root_node(&self) -> Option<&SceneNode> {
		self.arena.get(self.root).map(|node| node.get())
	}

	pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
		id.children(&self.arena)
	}

	pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
		self.arena.get(id).map(|node| node.get())
	}

	pub fn len(&self) -> usize {
		self.arena.len()
	}

	pub fn is_empty(&self) -> bool {
		self.arena.is_empty()
	}
}

fn rec_fmt(depth: usize, f: &mut fmt::Formatter<'_>, id: NodeId, arena: &Arena<SceneNode>) -> fmt::Result {
	let Some(node) = arena.get(id) else {
		return Ok(());
	};

	let description = node.get().describe(depth * 2);
	#[cfg(feature = "owo")]
	let description = {
		use owo_colors::OwoColorize;
		description.magenta()
	};

	writeln!(f, "{description}")?;
	for child in id.children(arena) {
		rec_fmt(depth + 1, f, child, arena)?;
	}

	Ok(())
}

impl Display for SceneTree {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.arena.get(self.root).is_none() {
			return write!(f, "(empty)");
		}
		rec_fmt(0, f, self.root, &self.arena)
	}
}
