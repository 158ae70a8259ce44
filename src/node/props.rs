//! Node properties: the closed set of setters a node can emit, their values,
//! and the fixed rules that read them from a scene record.

use std::fmt;

use glam::DVec2;
use indexmap::IndexMap;

use crate::formats::{JsonObject, JsonResult};

macro_rules! prop_kinds {
	($($kind:ident => $setter:literal,)*) => {
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub enum PropKind {
			$($kind,)*
		}

		impl PropKind {
			/// Name of the target-API member function that applies this property.
			pub fn setter(self) -> &'static str {
				match self {
					$(PropKind::$kind => $setter,)*
				}
			}
		}
	};
}

prop_kinds! {
	ContentSize => "setContentSize",
	Enabled => "setEnabled",
	Name => "setName",
	AnchorPoint => "setAnchorPoint",
	CascadeOpacityEnabled => "setCascadeOpacityEnabled",
	Color => "setColor",
	GlobalZOrder => "setGlobalZOrder",
	LocalZOrder => "setLocalZOrder",
	Opacity => "setOpacity",
	OpacityModifyRgb => "setOpacityModifyRGB",
	Position => "setPosition",
	RotationSkewX => "setRotationSkewX",
	RotationSkewY => "setRotationSkewY",
	ScaleX => "setScaleX",
	ScaleY => "setScaleY",
	SkewX => "setSkewX",
	SkewY => "setSkewY",
	Tag => "setTag",

	SpriteFrame => "setSpriteFrame",
	CenterRectNormalized => "setCenterRectNormalized",

	HorizontalAlignment => "setHorizontalAlignment",
	VerticalAlignment => "setVerticalAlignment",
	BmFontSize => "setBMFontSize",
	LineHeight => "setLineHeight",

	IgnoreContentAdaptWithSize => "ignoreContentAdaptWithSize",

	ReturnType => "setReturnType",
	InputFlag => "setInputFlag",
	InputMode => "setInputMode",
	FontSize => "setFontSize",
	FontColor => "setFontColor",
	PlaceHolder => "setPlaceHolder",
	PlaceholderFontSize => "setPlaceholderFontSize",
	PlaceholderFontColor => "setPlaceholderFontColor",
	MaxLength => "setMaxLength",
	Text => "setText",

	Percent => "setPercent",

	BackGroundImageColor => "setBackGroundImageColor",
	BackGroundImage => "setBackGroundImage",
	BackGroundImageScale9Enabled => "setBackGroundImageScale9Enabled",
	Direction => "setDirection",
	BounceEnabled => "setBounceEnabled",
	InnerContainerSize => "setInnerContainerSize",
}

/// How a source field is read into a [`PropValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
	Size,
	Bool,
	Str,
	Vec2,
	Rgb,
	Number,
}

/// Node record fields every variant reads, in emission order.
pub const NODE_RULES: [(PropKind, &str, Rule); 18] = [
	(PropKind::ContentSize, "_contentSize", Rule::Size),
	(PropKind::Enabled, "_enabled", Rule::Bool),
	(PropKind::Name, "_name", Rule::Str),
	(PropKind::AnchorPoint, "_anchorPoint", Rule::Vec2),
	(PropKind::CascadeOpacityEnabled, "_cascadeOpacityEnabled", Rule::Bool),
	(PropKind::Color, "_color", Rule::Rgb),
	(PropKind::GlobalZOrder, "_globalZOrder", Rule::Number),
	(PropKind::LocalZOrder, "_localZOrder", Rule::Number),
	(PropKind::Opacity, "_opacity", Rule::Number),
	(PropKind::OpacityModifyRgb, "_opacityModifyRGB", Rule::Bool),
	(PropKind::Position, "_position", Rule::Vec2),
	(PropKind::RotationSkewX, "_rotationX", Rule::Number),
	(PropKind::RotationSkewY, "_rotationY", Rule::Number),
	(PropKind::ScaleX, "_scaleX", Rule::Number),
	(PropKind::ScaleY, "_scaleY", Rule::Number),
	(PropKind::SkewX, "_skewX", Rule::Number),
	(PropKind::SkewY, "_skewY", Rule::Number),
	(PropKind::Tag, "_tag", Rule::Number),
];

#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
	Size(DVec2),
	Bool(bool),
	/// Free text, quoted and escaped on output.
	Str(String),
	Vec2(DVec2),
	Rgb([u8; 3]),
	/// A number passed through exactly as the source wrote it.
	Number(json::number::Number),
	Float(f64),
	/// Target-API source text emitted as is, e.g. an enum constant.
	Code(String),
}

impl PropValue {
	pub fn read(rule: Rule, obj: &JsonObject, key: &str) -> JsonResult<Self> {
		Ok(match rule {
			Rule::Size => PropValue::Size(obj.get_size(key)?),
			Rule::Bool => PropValue::Bool(obj.get_bool(key)?),
			Rule::Str => PropValue::Str(obj.get_str(key)?.to_owned()),
			Rule::Vec2 => PropValue::Vec2(obj.get_vec2(key)?),
			Rule::Rgb => PropValue::Rgb(obj.get_rgb(key)?),
			Rule::Number => PropValue::Number(obj.get_number(key)?),
		})
	}

	pub fn code(code: impl Into<String>) -> Self {
		PropValue::Code(code.into())
	}
}

impl fmt::Display for PropValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PropValue::Size(size) => write!(f, "Size({}, {})", fmt_g(size.x), fmt_g(size.y)),
			PropValue::Bool(b) => write!(f, "{b}"),
			PropValue::Str(s) => write!(f, "\"{}\"", escape(s)),
			PropValue::Vec2(v) => write!(f, "Vec2({}, {})", fmt_g(v.x), fmt_g(v.y)),
			PropValue::Rgb([r, g, b]) => write!(f, "Color3B({r}, {g}, {b})"),
			PropValue::Number(n) => write!(f, "{n}"),
			PropValue::Float(x) => write!(f, "{}", fmt_g(*x)),
			PropValue::Code(code) => f.write_str(code),
		}
	}
}

/// Properties of one node. Keys are unique and keep their first insertion
/// position, so emission order is the order the rules ran in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMap {
	entries: IndexMap<PropKind, PropValue>,
}

impl PropertyMap {
	/// Applies [`NODE_RULES`] to a node record. Absent fields produce no property.
	pub fn from_node_record(record: &JsonObject) -> JsonResult<Self> {
		let mut props = Self::default();
		for (kind, key, rule) in NODE_RULES {
			props.read(kind, rule, record, key)?;
		}
		Ok(props)
	}

	/// Reads `key` from `obj` with `rule` into `kind`, if the field is present.
	pub fn read(&mut self, kind: PropKind, rule: Rule, obj: &JsonObject, key: &str) -> JsonResult<()> {
		if obj.has(key) {
			self.insert(kind, PropValue::read(rule, obj, key)?);
		}
		Ok(())
	}

	pub fn insert(&mut self, kind: PropKind, value: PropValue) {
		self.entries.insert(kind, value);
	}

	pub fn get(&self, kind: PropKind) -> Option<&PropValue> {
		self.entries.get(&kind)
	}

	pub fn get_mut(&mut self, kind: PropKind) -> Option<&mut PropValue> {
		self.entries.get_mut(&kind)
	}

	pub fn contains(&self, kind: PropKind) -> bool {
		self.entries.contains_key(&kind)
	}

	/// Removes `kind`, keeping the order of the remaining properties.
	pub fn remove(&mut self, kind: PropKind) -> Option<PropValue> {
		self.entries.shift_remove(&kind)
	}

	pub fn iter(&self) -> impl Iterator<Item = (PropKind, &PropValue)> {
		self.entries.iter().map(|(k, v)| (*k, v))
	}

	pub fn kinds(&self) -> impl Iterator<Item = PropKind> + '_ {
		self.entries.keys().copied()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Formats like C's `%g`: six significant digits, trailing zeros removed,
/// scientific notation below 1e-4 and from 1e6 up.
pub fn fmt_g(value: f64) -> String {
	if !value.is_finite() {
		return format!("{value}");
	}

	let sci = format!("{value:.5e}");
	let Some((mantissa, exp)) = sci.split_once('e') else {
		return format!("{value}");
	};
	let exp = exp.parse::<i32>().unwrap_or(0);

	if !(-4..6).contains(&exp) {
		let sign = if exp < 0 { '-' } else { '+' };
		format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
	} else {
		let decimals = (5 - exp) as usize;
		trim_fraction(&format!("{value:.decimals$}")).to_owned()
	}
}

fn trim_fraction(s: &str) -> &str {
	if s.contains('.') {
		s.trim_end_matches('0').trim_end_matches('.')
	} else {
		s
	}
}

/// Escapes text for a double-quoted C++ string literal.
pub fn escape(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'\\' => escaped.push_str("\\\\"),
			'"' => escaped.push_str("\\\""),
			'\n' => escaped.push_str("\\n"),
			c => escaped.push(c),
		}
	}
	escaped
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(src: &str) -> json::JsonValue {
		json::parse(src).unwrap()
	}

	#[test]
	fn g_formatting() {
		assert_eq!(fmt_g(0.0), "0");
		assert_eq!(fmt_g(0.5), "0.5");
		assert_eq!(fmt_g(480.0), "480");
		assert_eq!(fmt_g(-12.25), "-12.25");
		assert_eq!(fmt_g(100.0 / 3.0), "33.3333");
		assert_eq!(fmt_g(0.0001), "0.0001");
		assert_eq!(fmt_g(0.00001), "1e-05");
		assert_eq!(fmt_g(999999.0), "999999");
		assert_eq!(fmt_g(1234567.0), "1.23457e+06");
		assert_eq!(fmt_g(1e7), "1e+07");
	}

	#[test]
	fn only_present_fields_become_properties() {
		let value = record(
			r#"{
				"__type__": "cc.Node",
				"_name": "title",
				"_position": { "__type__": "cc.Vec2", "x": 10, "y": 20.5 },
				"_opacity": 255,
				"_scaleX": 1.5
			}"#,
		);
		let obj = JsonObject::from_value("node", &value).unwrap();
		let props = PropertyMap::from_node_record(&obj).unwrap();

		let kinds = props.kinds().collect::<Vec<_>>();
		assert_eq!(
			kinds,
			vec![PropKind::Name, PropKind::Opacity, PropKind::Position, PropKind::ScaleX]
		);
		assert_eq!(props.get(PropKind::Position), Some(&PropValue::Vec2(DVec2::new(10.0, 20.5))));
		assert!(!props.contains(PropKind::ContentSize));
	}

	#[test]
	fn every_node_field_maps_to_its_setter() {
		let value = record(
			r#"{
				"_contentSize": { "width": 960, "height": 640 },
				"_enabled": true,
				"_name": "root",
				"_anchorPoint": { "x": 0.5, "y": 0.5 },
				"_cascadeOpacityEnabled": true,
				"_color": { "r": 255, "g": 255, "b": 255, "a": 255 },
				"_globalZOrder": 0,
				"_localZOrder": 0,
				"_opacity": 255,
				"_opacityModifyRGB": false,
				"_position": { "x": 480, "y": 320 },
				"_rotationX": 0,
				"_rotationY": 0,
				"_scaleX": 1,
				"_scaleY": 1,
				"_skewX": 0,
				"_skewY": 0,
				"_tag": -1
			}"#,
		);
		let obj = JsonObject::from_value("node", &value).unwrap();
		let props = PropertyMap::from_node_record(&obj).unwrap();

		let lines = props
			.iter()
			.map(|(kind, value)| format!("{}({value})", kind.setter()))
			.collect::<Vec<_>>();
		assert_eq!(
			lines,
			vec![
				"setContentSize(Size(960, 640))",
				"setEnabled(true)",
				"setName(\"root\")",
				"setAnchorPoint(Vec2(0.5, 0.5))",
				"setCascadeOpacityEnabled(true)",
				"setColor(Color3B(255, 255, 255))",
				"setGlobalZOrder(0)",
				"setLocalZOrder(0)",
				"setOpacity(255)",
				"setOpacityModifyRGB(false)",
				"setPosition(Vec2(480, 320))",
				"setRotationSkewX(0)",
				"setRotationSkewY(0)",
				"setScaleX(1)",
				"setScaleY(1)",
				"setSkewX(0)",
				"setSkewY(0)",
				"setTag(-1)",
			]
		);
	}

	#[test]
	fn insert_keeps_first_position() {
		let mut props = PropertyMap::default();
		props.insert(PropKind::Name, PropValue::Str("a".into()));
		props.insert(PropKind::Tag, PropValue::Float(1.0));
		props.insert(PropKind::Name, PropValue::Str("b".into()));

		assert_eq!(props.kinds().collect::<Vec<_>>(), vec![PropKind::Name, PropKind::Tag]);
		assert_eq!(props.get(PropKind::Name), Some(&PropValue::Str("b".into())));

		assert_eq!(props.remove(PropKind::Name), Some(PropValue::Str("b".into())));
		assert_eq!(props.len(), 1);
	}

	#[test]
	fn remove_keeps_emission_order() {
		let mut props = PropertyMap::default();
		props.insert(PropKind::ContentSize, PropValue::Size(DVec2::new(10.0, 10.0)));
		props.insert(PropKind::Name, PropValue::Str("map".into()));
		props.insert(PropKind::Position, PropValue::Vec2(DVec2::ZERO));
		props.insert(PropKind::Tag, PropValue::Float(3.0));

		props.remove(PropKind::Name);
		assert_eq!(
			props.kinds().collect::<Vec<_>>(),
			vec![PropKind::ContentSize, PropKind::Position, PropKind::Tag]
		);
		assert_eq!(props.remove(PropKind::Name), None);
	}

	#[test]
	fn string_literals_are_escaped() {
		assert_eq!(PropValue::Str("two\nlines".into()).to_string(), r#""two\nlines""#);
		assert_eq!(PropValue::Str(r#"say "hi" \o/"#.into()).to_string(), r#""say \"hi\" \\o/""#);
	}
}
