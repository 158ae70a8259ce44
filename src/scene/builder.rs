use indextree::{Arena, NodeId};
use tracing::{debug, warn};

use crate::node::{cc, NodeKind, SceneNode};

use super::{SceneContext, SceneParseResult, SceneTree};

impl SceneTree {
	/// Builds the tree below the scene root. Assets and the design resolution
	/// met on the way are recorded into `cx`.
	pub fn build(cx: &mut SceneContext) -> SceneParseResult<Self> {
		let root_record = cx.store.scene_root()?;
		let mut builder = TreeBuilder {
			cx,
			arena: Arena::new(),
		};
		let root = builder.node(root_record, NodeKind::Scene, None)?;
		Ok(Self {
			root,
			arena: builder.arena,
		})
	}
}

struct TreeBuilder<'c, 'a> {
	cx: &'c mut SceneContext<'a>,
	arena: Arena<SceneNode>,
}

impl TreeBuilder<'_, '_> {
	fn node(&mut self, record: usize, kind: NodeKind, parent: Option<NodeId>) -> SceneParseResult<NodeId> {
		let mut node =
			SceneNode::parse(self.cx, record, kind).map_err(|e| e.nested(&format!("{kind} record {record}")))?;
		if let Some(parent) = parent {
			self.arena[parent].get().data.adjust_child(&mut node)?;
		}

		let children = node.data.child_records(self.cx.store, record)?;
		let id = self.arena.new_node(node);
		if let Some(parent) = parent {
			parent.append(id, &mut self.arena);
		}

		for child in children {
			self.child(child, id)?;
		}
		Ok(id)
	}

	fn child(&mut self, record: usize, parent: NodeId) -> SceneParseResult<()> {
		let store = self.cx.store;
		let ty = store.type_of(record)?;
		if ty != cc::NODE {
			debug!("Skipping child record {record} of type {ty:?}");
			return Ok(());
		}

		let components = store.components(record)?;
		let types = components
			.iter()
			.filter_map(|component| component.type_name().ok())
			.collect::<Vec<_>>();

		match NodeKind::resolve(&types) {
			Some(kind) => {
				debug!("Record {record} is a {kind}, components {types:?}");
				self.node(record, kind, Some(parent))?;
			}
			None => warn!("Skipping record {record}: no known component in {types:?}"),
		}
		Ok(())
	}
}
