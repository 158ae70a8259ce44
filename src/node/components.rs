//! Per-kind node data, and the hooks each kind plugs into parsing and emission.

mod button;
mod canvas;
mod edit_box;
mod label;
mod particle_system;
mod progress_bar;
mod scroll_view;
mod sprite;
mod tiled_map;

use std::fmt;

use crate::formats::ObjectStore;
use crate::scene::{SceneContext, SceneParseError, SceneParseResult};
use crate::TranslateOptions;

use super::props::PropertyMap;
use super::{NodeKind, SceneNode};

pub use button::Button;
pub use canvas::{Canvas, DesignResolution, ResolutionPolicy};
pub use edit_box::EditBox;
pub use label::{Font, Label};
pub use particle_system::ParticleSystem;
pub use progress_bar::ProgressBar;
pub use scroll_view::{Direction, ScrollView};
pub use sprite::{Sprite, SpriteType};
pub use tiled_map::TiledMap;

#[derive(Debug, Clone)]
pub enum NodeData {
	Scene,
	Canvas(Canvas),
	Sprite(Sprite),
	Label(Label),
	ParticleSystem(ParticleSystem),
	TiledMap(TiledMap),
	Button(Button),
	EditBox(EditBox),
	ProgressBar(ProgressBar),
	ScrollView(ScrollView),
}

impl NodeData {
	/// Reads the kind's components. Adds kind-specific entries to `props`.
	pub(crate) fn parse(
		kind: NodeKind,
		cx: &mut SceneContext,
		record: usize,
		props: &mut PropertyMap,
	) -> SceneParseResult<Self> {
		Ok(match kind {
			NodeKind::Scene => NodeData::Scene,
			NodeKind::Canvas => NodeData::Canvas(Canvas::parse(cx, record)?),
			NodeKind::Sprite => NodeData::Sprite(Sprite::parse(cx, record, props)?),
			NodeKind::Label => NodeData::Label(Label::parse(cx, record, props)?),
			NodeKind::ParticleSystem => NodeData::ParticleSystem(ParticleSystem::parse(cx, record)?),
			NodeKind::TiledMap => NodeData::TiledMap(TiledMap::parse(cx, record, props)?),
			NodeKind::Button => NodeData::Button(Button::parse(cx, record, props)?),
			NodeKind::EditBox => NodeData::EditBox(EditBox::parse(cx, record, props)?),
			NodeKind::ProgressBar => NodeData::ProgressBar(ProgressBar::parse(cx, record, props)?),
			NodeKind::ScrollView => NodeData::ScrollView(ScrollView::parse(cx, record, props)?),
		})
	}

	pub fn kind(&self) -> NodeKind {
		match self {
			NodeData::Scene => NodeKind::Scene,
			NodeData::Canvas(_) => NodeKind::Canvas,
			NodeData::Sprite(_) => NodeKind::Sprite,
			NodeData::Label(_) => NodeKind::Label,
			NodeData::ParticleSystem(_) => NodeKind::ParticleSystem,
			NodeData::TiledMap(_) => NodeKind::TiledMap,
			NodeData::Button(_) => NodeKind::Button,
			NodeData::EditBox(_) => NodeKind::EditBox,
			NodeData::ProgressBar(_) => NodeKind::ProgressBar,
			NodeData::ScrollView(_) => NodeKind::ScrollView,
		}
	}

	/// Records the node's children are built from.
	pub(crate) fn child_records(&self, store: &ObjectStore, record: usize) -> SceneParseResult<Vec<usize>> {
		match self {
			NodeData::ScrollView(scroll_view) => Ok(scroll_view.content_children.clone()),
			_ => Ok(store.children(record)?),
		}
	}

	/// Lets a parent rewrite a freshly parsed child before it joins the tree.
	pub(crate) fn adjust_child(&self, child: &mut SceneNode) -> SceneParseResult<()> {
		match self {
			NodeData::ScrollView(scroll_view) => scroll_view.adjust_child(child),
			_ => Ok(()),
		}
	}

	/// Arguments of the static `create` call, including the factory name.
	pub fn create_params(&self, options: &TranslateOptions) -> String {
		match self {
			NodeData::Scene
			| NodeData::Canvas(_)
			| NodeData::Sprite(_)
			| NodeData::ProgressBar(_)
			| NodeData::ScrollView(_) => "create()".to_owned(),
			NodeData::Label(label) => label.create_params(options),
			NodeData::ParticleSystem(particles) => particles.create_params(options),
			NodeData::TiledMap(map) => map.create_params(options),
			NodeData::Button(button) => button.create_params(),
			NodeData::EditBox(edit_box) => edit_box.create_params(),
		}
	}

	/// Statements emitted after the node's properties.
	pub fn post_construct(&self, name: &str, out: &mut impl fmt::Write) -> fmt::Result {
		match self {
			NodeData::Sprite(sprite) => sprite.post_construct(name, out),
			NodeData::ScrollView(scroll_view) => scroll_view.post_construct(name, out),
			_ => Ok(()),
		}
	}

	/// Member function this node calls to take `child` in.
	pub fn attach_call(&self, child: &SceneNode) -> &'static str {
		match self {
			NodeData::Button(_) if child.kind() == NodeKind::Label => "setTitleLabel",
			_ => "addChild",
		}
	}

	/// Short detail for tree dumps.
	pub fn summary(&self) -> Option<&str> {
		match self {
			NodeData::Sprite(sprite) => Some(&sprite.frame),
			NodeData::Label(label) => Some(&label.text),
			NodeData::ParticleSystem(particles) => Some(&particles.file),
			NodeData::TiledMap(map) => Some(&map.file),
			NodeData::Button(button) => Some(&button.frame),
			NodeData::EditBox(edit_box) => Some(&edit_box.background),
			_ => None,
		}
	}
}

/// Maps an enumerated source code to its target-API constant.
fn lookup(table: &[&'static str], name: &'static str, code: i64) -> SceneParseResult<&'static str> {
	usize::try_from(code)
		.ok()
		.and_then(|index| table.get(index))
		.copied()
		.ok_or(SceneParseError::UnknownCode { table: name, code })
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookup_codes() {
		const TABLE: [&str; 2] = ["A", "B"];
		assert_eq!(lookup(&TABLE, "test", 1).unwrap(), "B");
		assert!(matches!(
			lookup(&TABLE, "test", 2),
			Err(SceneParseError::UnknownCode { table: "test", code: 2 })
		));
		assert!(lookup(&TABLE, "test", -1).is_err());
	}
}
