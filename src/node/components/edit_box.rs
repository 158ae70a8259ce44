use glam::DVec2;

use crate::node::cc;
use crate::node::props::{escape, PropKind, PropValue, PropertyMap, Rule};
use crate::scene::{SceneContext, SceneParseResult};

use super::lookup;

const RETURN_TYPES: [&str; 5] = [
	"ui::EditBox::KeyboardReturnType::DEFAULT",
	"ui::EditBox::KeyboardReturnType::DONE",
	"ui::EditBox::KeyboardReturnType::SEND",
	"ui::EditBox::KeyboardReturnType::SEARCH",
	"ui::EditBox::KeyboardReturnType::GO",
];

const INPUT_FLAGS: [&str; 6] = [
	"ui::EditBox::InputFlag::PASSWORD",
	"ui::EditBox::InputFlag::SENSITIVE",
	"ui::EditBox::InputFlag::INITIAL_CAPS_WORD",
	"ui::EditBox::InputFlag::INITIAL_CAPS_SENTENCE",
	"ui::EditBox::InputFlag::INITIAL_CAPS_ALL_CHARACTERS",
	"ui::EditBox::InputFlag::LOWERCASE_ALL_CHARACTERS",
];

const INPUT_MODES: [&str; 7] = [
	"ui::EditBox::InputMode::ANY",
	"ui::EditBox::InputMode::EMAIL_ADDRESS",
	"ui::EditBox::InputMode::NUMERIC",
	"ui::EditBox::InputMode::PHONE_NUMBER",
	"ui::EditBox::InputMode::URL",
	"ui::EditBox::InputMode::DECIMAL",
	"ui::EditBox::InputMode::SINGLE_LINE",
];

/// Component fields copied onto the edit box after its input settings.
const EDIT_BOX_RULES: [(PropKind, &str, Rule); 7] = [
	(PropKind::FontSize, "_N$fontSize", Rule::Number),
	(PropKind::FontColor, "_N$fontColor", Rule::Rgb),
	(PropKind::PlaceHolder, "_N$placeholder", Rule::Str),
	(PropKind::PlaceholderFontSize, "_N$placeholderFontSize", Rule::Number),
	(PropKind::PlaceholderFontColor, "_N$placeholderFontColor", Rule::Rgb),
	(PropKind::MaxLength, "_N$maxLength", Rule::Number),
	(PropKind::Text, "_string", Rule::Str),
];

#[derive(Debug, Clone)]
pub struct EditBox {
	pub size: DVec2,
	/// Background frame name.
	pub background: String,
}

impl EditBox {
	pub(super) fn parse(cx: &mut SceneContext, record: usize, props: &mut PropertyMap) -> SceneParseResult<Self> {
		let node = cx.store.get(record)?;
		let component = cx.component(record, cc::EDIT_BOX)?;

		let size = node.get_size("_contentSize")?;
		let background = cx.display_name(component.get_uuid("_N$backgroundImage")?)?.to_owned();

		let return_type = lookup(&RETURN_TYPES, "keyboard return type", component.get_i64("_N$returnType")?)?;
		let input_flag = lookup(&INPUT_FLAGS, "input flag", component.get_i64("_N$inputFlag")?)?;
		let input_mode = lookup(&INPUT_MODES, "input mode", component.get_i64("_N$inputMode")?)?;
		props.insert(PropKind::ReturnType, PropValue::code(return_type));
		props.insert(PropKind::InputFlag, PropValue::code(input_flag));
		props.insert(PropKind::InputMode, PropValue::code(input_mode));

		for (kind, key, rule) in EDIT_BOX_RULES {
			props.read(kind, rule, &component, key)?;
		}

		Ok(Self { size, background })
	}

	pub(super) fn create_params(&self) -> String {
		format!(
			"create(Size({},{}), \"{}\", ui::Widget::TextureResType::PLIST)",
			self.size.x as i64,
			self.size.y as i64,
			escape(&self.background)
		)
	}
}
