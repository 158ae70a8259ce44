use std::fmt;

use crate::node::cc;
use crate::node::props::{PropKind, PropValue, PropertyMap};
use crate::scene::{SceneContext, SceneParseError, SceneParseResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteType {
	Simple,
	Sliced,
	Tiled,
	Filled,
}

impl SpriteType {
	pub fn from_code(code: i64) -> SceneParseResult<Self> {
		match code {
			0 => Ok(SpriteType::Simple),
			1 => Ok(SpriteType::Sliced),
			2 => Ok(SpriteType::Tiled),
			3 => Ok(SpriteType::Filled),
			_ => Err(SceneParseError::UnknownCode {
				table: "sprite type",
				code,
			}),
		}
	}
}

#[derive(Debug, Clone)]
pub struct Sprite {
	/// Name the frame is registered under in the frame cache.
	pub frame: String,
	pub sprite_type: SpriteType,
}

impl Sprite {
	pub(super) fn parse(cx: &mut SceneContext, record: usize, props: &mut PropertyMap) -> SceneParseResult<Self> {
		let component = cx.component(record, cc::SPRITE)?;
		let frame = cx.frame(component.get_uuid("_spriteFrame")?)?.name.clone();
		let sprite_type = SpriteType::from_code(component.get_i64("_type")?)?;

		props.insert(PropKind::SpriteFrame, PropValue::Str(frame.clone()));
		if sprite_type == SpriteType::Simple {
			props.insert(PropKind::CenterRectNormalized, PropValue::code("Rect(0,0,1,1)"));
		}

		Ok(Self { frame, sprite_type })
	}

	pub(super) fn post_construct(&self, name: &str, out: &mut impl fmt::Write) -> fmt::Result {
		if self.sprite_type == SpriteType::Tiled {
			writeln!(out, "    creator_tile_sprite({name});")?;
		}
		Ok(())
	}
}
