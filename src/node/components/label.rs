use crate::node::cc;
use crate::node::props::{escape, PropKind, PropValue, PropertyMap, Rule};
use crate::scene::{SceneContext, SceneParseError, SceneParseResult};
use crate::TranslateOptions;

use super::lookup;

const H_ALIGNMENTS: [&str; 3] = ["TextHAlignment::LEFT", "TextHAlignment::CENTER", "TextHAlignment::RIGHT"];
const V_ALIGNMENTS: [&str; 3] = ["TextVAlignment::TOP", "TextVAlignment::CENTER", "TextVAlignment::BOTTOM"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Font {
	System,
	/// Path of a `.ttf` file.
	TrueType(String),
	/// Path of a `.fnt` file.
	Bitmap(String),
}

#[derive(Debug, Clone)]
pub struct Label {
	pub text: String,
	pub font_size: json::number::Number,
	pub font: Font,
}

impl Label {
	pub(super) fn parse(cx: &mut SceneContext, record: usize, props: &mut PropertyMap) -> SceneParseResult<Self> {
		let component = cx.component(record, cc::LABEL)?;

		// older scenes keep the text in `_string`
		let text_key = if component.has("_N$string") { "_N$string" } else { "_string" };
		let text = component.get_str(text_key)?.to_owned();
		let font_size = component.get_number("_fontSize")?;

		let h_align = lookup(&H_ALIGNMENTS, "horizontal alignment", component.get_i64("_N$horizontalAlign")?)?;
		let v_align = lookup(&V_ALIGNMENTS, "vertical alignment", component.get_i64("_N$verticalAlign")?)?;
		props.insert(PropKind::HorizontalAlignment, PropValue::code(h_align));
		props.insert(PropKind::VerticalAlignment, PropValue::code(v_align));

		let font = if component.get_bool("_isSystemFontUsed")? {
			Font::System
		} else {
			let path = cx.file_path(component.get_uuid("_N$file")?)?;
			let font = if path.ends_with(".ttf") {
				Font::TrueType(path.to_owned())
			} else if path.ends_with(".fnt") {
				props.read(PropKind::BmFontSize, Rule::Number, &component, "_fontSize")?;
				Font::Bitmap(path.to_owned())
			} else {
				return Err(SceneParseError::InvalidFontFile(path.to_owned()));
			};
			props.read(PropKind::LineHeight, Rule::Number, &component, "_lineHeight")?;
			font
		};

		Ok(Self { text, font_size, font })
	}

	pub(super) fn create_params(&self, options: &TranslateOptions) -> String {
		let text = escape(&self.text);
		let asset_path = &options.asset_path;
		match &self.font {
			Font::System => format!("createWithSystemFont(\"{text}\", \"arial\", {})", self.font_size),
			Font::Bitmap(path) => format!("createWithBMFont(\"{}\", \"{text}\")", escape(&format!("{asset_path}{path}"))),
			Font::TrueType(path) => format!(
				"createWithTTF(\"{text}\", \"{}\", {})",
				escape(&format!("{asset_path}{path}")),
				self.font_size
			),
		}
	}
}
