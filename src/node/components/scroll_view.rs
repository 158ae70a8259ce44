use std::fmt;

use glam::DVec2;

use crate::formats::ObjectStore;
use crate::node::cc;
use crate::node::props::{escape, fmt_g, PropKind, PropValue, PropertyMap, Rule};
use crate::node::SceneNode;
use crate::scene::{SceneContext, SceneParseError, SceneParseResult};

use super::SpriteType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	None,
	Horizontal,
	Vertical,
	Both,
}

impl Direction {
	pub fn from_flags(horizontal: bool, vertical: bool) -> Self {
		match (horizontal, vertical) {
			(true, true) => Direction::Both,
			(true, false) => Direction::Horizontal,
			(false, true) => Direction::Vertical,
			(false, false) => Direction::None,
		}
	}

	pub fn code(self) -> &'static str {
		match self {
			Direction::None => "ui::ScrollView::Direction::NONE",
			Direction::Horizontal => "ui::ScrollView::Direction::HORIZONTAL",
			Direction::Vertical => "ui::ScrollView::Direction::VERTICAL",
			Direction::Both => "ui::ScrollView::Direction::BOTH",
		}
	}
}

/// A scroll view is authored as `scrollview -> view -> content -> items`.
/// The view and content nodes are not emitted: the items become direct
/// children of the scroll view, shifted into its inner container's space.
#[derive(Debug, Clone)]
pub struct ScrollView {
	pub direction: Direction,
	pub content_size: DVec2,
	pub content_anchor: DVec2,
	/// Records of the content node's children.
	pub content_children: Vec<usize>,
}

impl ScrollView {
	pub(super) fn parse(cx: &mut SceneContext, record: usize, props: &mut PropertyMap) -> SceneParseResult<Self> {
		let store = cx.store;
		let node = store.get(record)?;
		props.read(PropKind::BackGroundImageColor, Rule::Rgb, &node, "_color")?;

		let sprite = cx.component(record, cc::SPRITE)?;
		let frame = cx.frame(sprite.get_uuid("_spriteFrame")?)?;
		props.insert(
			PropKind::BackGroundImage,
			PropValue::code(format!(
				"\"{}\", ui::Widget::TextureResType::PLIST",
				escape(&frame.name)
			)),
		);
		let sliced = SpriteType::from_code(sprite.get_i64("_type")?)? == SpriteType::Sliced;
		props.insert(PropKind::BackGroundImageScale9Enabled, PropValue::Bool(sliced));

		let scroll = cx.component(record, cc::SCROLL_VIEW)?;
		let direction = Direction::from_flags(scroll.get_bool("horizontal")?, scroll.get_bool("vertical")?);
		props.insert(PropKind::Direction, PropValue::code(direction.code()));
		props.read(PropKind::BounceEnabled, Rule::Bool, &scroll, "elastic")?;

		let view = find_named_child(store, record, "view")?
			.ok_or(SceneParseError::MissingScrollViewPart { record, part: "view" })?;
		let content = find_named_child(store, view, "content")?
			.ok_or(SceneParseError::MissingScrollViewPart { record, part: "content" })?;

		let content_node = store.get(content)?;
		let content_size = content_node.get_size("_contentSize")?;
		let content_anchor = content_node.get_vec2("_anchorPoint")?;
		props.insert(PropKind::InnerContainerSize, PropValue::Size(content_size));

		Ok(Self {
			direction,
			content_size,
			content_anchor,
			content_children: store.children(content)?,
		})
	}

	/// Moves a content item from the content node's space into the inner container's.
	pub(super) fn adjust_child(&self, child: &mut SceneNode) -> SceneParseResult<()> {
		let offset = self.content_size * self.content_anchor;
		match child.props.get_mut(PropKind::Position) {
			Some(PropValue::Vec2(position)) => {
				*position += offset;
				Ok(())
			}
			_ => Err(SceneParseError::ScrollChildWithoutPosition { record: child.record }),
		}
	}

	pub(super) fn post_construct(&self, name: &str, out: &mut impl fmt::Write) -> fmt::Result {
		writeln!(
			out,
			"    {name}->jumpToPercentVertical({});",
			fmt_g((1.0 - self.content_anchor.y) * 100.0)
		)?;
		writeln!(
			out,
			"    {name}->jumpToPercentHorizontal({});",
			fmt_g(self.content_anchor.x * 100.0)
		)
	}
}

/// First child of `parent` whose `_name` is `name`.
fn find_named_child(store: &ObjectStore, parent: usize, name: &str) -> SceneParseResult<Option<usize>> {
	for child in store.children(parent)? {
		let obj = store.get(child)?;
		if obj.has("_name") && obj.get_str("_name")? == name {
			return Ok(Some(child));
		}
	}
	Ok(None)
}
