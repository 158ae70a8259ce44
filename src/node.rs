pub mod components;
pub mod props;

use std::fmt;

use crate::scene::{SceneContext, SceneParseResult};

use components::NodeData;
use props::PropertyMap;

/// Record and component `__type__` tags.
pub mod cc {
	pub const NODE: &str = "cc.Node";

	pub const BUTTON: &str = "cc.Button";
	pub const PROGRESS_BAR: &str = "cc.ProgressBar";
	pub const SCROLL_VIEW: &str = "cc.ScrollView";
	pub const EDIT_BOX: &str = "cc.EditBox";
	pub const LABEL: &str = "cc.Label";
	pub const SPRITE: &str = "cc.Sprite";
	pub const PARTICLE_SYSTEM: &str = "cc.ParticleSystem";
	pub const TILED_MAP: &str = "cc.TiledMap";
	pub const CANVAS: &str = "cc.Canvas";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Scene,
	Canvas,
	Sprite,
	Label,
	ParticleSystem,
	TiledMap,
	Button,
	EditBox,
	ProgressBar,
	ScrollView,
}

impl NodeKind {
	/// Component tags that decide a node's kind, highest priority first.
	///
	/// Button, ProgressBar and ScrollView nodes also carry a `cc.Sprite` for their
	/// background, so they must be matched before the plain renderers.
	pub const PRIORITY: [(&'static str, NodeKind); 9] = [
		(cc::BUTTON, NodeKind::Button),
		(cc::PROGRESS_BAR, NodeKind::ProgressBar),
		(cc::SCROLL_VIEW, NodeKind::ScrollView),
		(cc::EDIT_BOX, NodeKind::EditBox),
		(cc::LABEL, NodeKind::Label),
		(cc::SPRITE, NodeKind::Sprite),
		(cc::PARTICLE_SYSTEM, NodeKind::ParticleSystem),
		(cc::TILED_MAP, NodeKind::TiledMap),
		(cc::CANVAS, NodeKind::Canvas),
	];

	/// Picks the kind of a node from the `__type__` tags of its components.
	pub fn resolve(component_types: &[&str]) -> Option<NodeKind> {
		Self::PRIORITY
			.iter()
			.find(|(ty, _)| component_types.contains(ty))
			.map(|(_, kind)| *kind)
	}

	/// Class the generated code instantiates.
	pub fn class_name(self) -> &'static str {
		match self {
			NodeKind::Scene => "Scene",
			NodeKind::Canvas => "Node",
			NodeKind::Sprite => "Sprite",
			NodeKind::Label => "Label",
			NodeKind::ParticleSystem => "ParticleSystemQuad",
			NodeKind::TiledMap => "TMXTiledMap",
			NodeKind::Button => "ui::Button",
			NodeKind::EditBox => "ui::EditBox",
			NodeKind::ProgressBar => "ui::LoadingBar",
			NodeKind::ScrollView => "ui::ScrollView",
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			NodeKind::Scene => "Scene",
			NodeKind::Canvas => "Canvas",
			NodeKind::Sprite => "Sprite",
			NodeKind::Label => "Label",
			NodeKind::ParticleSystem => "ParticleSystem",
			NodeKind::TiledMap => "TiledMap",
			NodeKind::Button => "Button",
			NodeKind::EditBox => "EditBox",
			NodeKind::ProgressBar => "ProgressBar",
			NodeKind::ScrollView => "ScrollView",
		}
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// One translated node: where it came from, the setters it emits, and its variant data.
#[derive(Debug, Clone)]
pub struct SceneNode {
	pub record: usize,
	pub props: PropertyMap,
	pub data: NodeData,
}

impl SceneNode {
	pub(crate) fn parse(cx: &mut SceneContext, record: usize, kind: NodeKind) -> SceneParseResult<Self> {
		let node = cx.store.get(record)?;
		let mut props = PropertyMap::from_node_record(&node)?;
		let data = NodeData::parse(kind, cx, record, &mut props)?;
		Ok(Self { record, props, data })
	}

	pub fn kind(&self) -> NodeKind {
		self.data.kind()
	}

	/// One-line label for tree dumps, indented by `depth`.
	pub fn describe(&self, depth: usize) -> String {
		let indent = "-".repeat(depth);
		match self.data.summary() {
			Some(summary) => format!("{indent}{}('{summary}')", self.kind()),
			None => format!("{indent}{}", self.kind()),
		}
	}
}
