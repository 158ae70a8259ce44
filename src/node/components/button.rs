use crate::node::cc;
use crate::node::props::{escape, PropKind, PropValue, PropertyMap};
use crate::scene::{SceneContext, SceneParseResult};

#[derive(Debug, Clone)]
pub struct Button {
	/// Background frame name.
	pub frame: String,
}

impl Button {
	pub(super) fn parse(cx: &mut SceneContext, record: usize, props: &mut PropertyMap) -> SceneParseResult<Self> {
		let button = cx.component(record, cc::BUTTON)?;

		let uuid = match cx.store.component_of_type(record, cc::SPRITE)? {
			Some(sprite) if sprite.has("_spriteFrame") => sprite.get_uuid("_spriteFrame")?,
			_ => button.get_uuid("_N$normalSprite")?,
		};
		let frame = cx.display_name(uuid)?.to_owned();

		props.insert(PropKind::IgnoreContentAdaptWithSize, PropValue::Bool(false));

		Ok(Self { frame })
	}

	pub(super) fn create_params(&self) -> String {
		format!(
			"create(\"{}\", \"\", \"\", ui::Widget::TextureResType::PLIST)",
			escape(&self.frame)
		)
	}
}
