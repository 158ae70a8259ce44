use glam::DVec2;

use crate::formats::{JsonObject, JsonResult};

/// Nine-slice insets, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Border {
	pub top: f64,
	pub bottom: f64,
	pub left: f64,
	pub right: f64,
}

impl Border {
	pub fn is_zero(&self) -> bool {
		self.top == 0.0 && self.bottom == 0.0 && self.left == 0.0 && self.right == 0.0
	}
}

/// A named sub-region of a texture, as described by a `subMetas` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFrame {
	pub uuid: String,
	pub name: String,
	/// Uuid of the atlas meta this frame was packed into.
	pub atlas: Option<String>,
	pub raw_texture_uuid: Option<String>,
	pub trim: DVec2,
	pub size: DVec2,
	pub rotated: bool,
	pub offset: DVec2,
	pub raw_size: DVec2,
	pub border: Border,
}

impl SpriteFrame {
	pub(super) fn deserialize(name: &str, obj: JsonObject, atlas: Option<&str>) -> JsonResult<Self> {
		let optional_f64 = |key: &str| -> JsonResult<f64> {
			if obj.has(key) {
				obj.get_f64(key)
			} else {
				Ok(0.0)
			}
		};

		Ok(Self {
			uuid: obj.get_str("uuid")?.to_owned(),
			name: name.to_owned(),
			atlas: atlas.map(str::to_owned),
			raw_texture_uuid: if obj.has("rawTextureUuid") {
				Some(obj.get_str("rawTextureUuid")?.to_owned())
			} else {
				None
			},
			trim: DVec2::new(obj.get_f64("trimX")?, obj.get_f64("trimY")?),
			size: DVec2::new(obj.get_f64("width")?, obj.get_f64("height")?),
			rotated: obj.get_bool("rotated")?,
			offset: DVec2::new(obj.get_f64("offsetX")?, obj.get_f64("offsetY")?),
			raw_size: DVec2::new(obj.get_f64("rawWidth")?, obj.get_f64("rawHeight")?),
			border: Border {
				top: optional_f64("borderTop")?,
				bottom: optional_f64("borderBottom")?,
				left: optional_f64("borderLeft")?,
				right: optional_f64("borderRight")?,
			},
		})
	}

	pub fn is_standalone(&self) -> bool {
		self.atlas.is_none()
	}
}
