//! JSON API wrapper over the `json` crate, with typed getters for the shapes
//! Cocos Creator writes: `{"__id__": n}` references, `{"__uuid__": s}` asset
//! handles, and `x`/`y`, `width`/`height`, `r`/`g`/`b` records.

use glam::DVec2;
use json::JsonValue;

pub(crate) trait SerialExtend {
	fn as_object(&self) -> Option<&json::object::Object>;
}

impl SerialExtend for json::JsonValue {
	fn as_object(&self) -> Option<&json::object::Object> {
		if let json::JsonValue::Object(obj) = self {
			Some(obj)
		} else {
			None
		}
	}
}

pub type JsonResult<T> = Result<T, JsonError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum JsonError {
	#[error("Key {0:?} does not exist")]
	KeyDoesNotExist(String),
	#[error("Value at {0:?} is not an object")]
	ValueIsNotObject(String),
	#[error("Value at {0:?} is not a list")]
	ValueIsNotList(String),
	#[error("Value at {0:?} is not a string")]
	ValueIsNotString(String),
	#[error("Value at {0:?} is not a number")]
	ValueIsNotNumber(String),
	#[error("Value at {0:?} is not a bool")]
	ValueIsNotBool(String),
	#[error("Error while parsing int at {0:?}\n  - number out of scope")]
	ParseIntError(String),
	#[error("Error in list at index {index}\n  - {inner}")]
	ErrorInList { index: usize, inner: Box<JsonError> },
	#[error("Error in object at {key:?}\n  - {inner}")]
	ErrorInObject { key: String, inner: Box<JsonError> },
}

impl JsonError {
	pub fn nested(self, key: &str) -> Self {
		Self::ErrorInObject {
			key: key.to_owned(),
			inner: Box::new(self),
		}
	}

	pub fn in_list(self, index: usize) -> Self {
		Self::ErrorInList {
			index,
			inner: Box::new(self),
		}
	}
}

#[derive(Clone, Copy)]
pub struct JsonObject<'a>(pub &'a json::object::Object);

impl<'a> JsonObject<'a> {
	pub fn from_value(key: &str, value: &'a JsonValue) -> JsonResult<Self> {
		match value.as_object() {
			Some(obj) => Ok(JsonObject(obj)),
			None => Err(JsonError::ValueIsNotObject(key.to_owned())),
		}
	}

	fn get(&self, key: &str) -> JsonResult<&'a json::JsonValue> {
		match self.0.get(key) {
			Some(value) => Ok(value),
			None => Err(JsonError::KeyDoesNotExist(key.to_owned())),
		}
	}

	/// Whether `key` is present with a non-null value.
	pub fn has(&self, key: &str) -> bool {
		self.0.get(key).map_or(false, |value| !value.is_null())
	}

	pub fn entries(&self) -> impl Iterator<Item = (&'a str, &'a JsonValue)> {
		self.0.iter()
	}

	/// The `__type__` tag every record and component carries.
	pub fn type_name(&self) -> JsonResult<&'a str> {
		self.get_str("__type__")
	}

	pub fn get_object(&self, key: &str) -> JsonResult<JsonObject<'a>> {
		Self::from_value(key, self.get(key)?)
	}

	pub fn get_list(&self, key: &str) -> JsonResult<&'a [JsonValue]> {
		match self.get(key)? {
			json::JsonValue::Array(arr) => Ok(arr),
			_ => Err(JsonError::ValueIsNotList(key.to_owned())),
		}
	}

	pub fn get_str(&self, key: &str) -> JsonResult<&'a str> {
		match self.get(key)?.as_str() {
			Some(val) => Ok(val),
			None => Err(JsonError::ValueIsNotString(key.to_owned())),
		}
	}

	pub fn get_number(&self, key: &str) -> JsonResult<json::number::Number> {
		match self.get(key)?.as_number() {
			Some(val) => Ok(val),
			None => Err(JsonError::ValueIsNotNumber(key.to_owned())),
		}
	}

	pub fn get_f64(&self, key: &str) -> JsonResult<f64> {
		Ok(self.get_number(key)?.into())
	}

	pub fn get_i64(&self, key: &str) -> JsonResult<i64> {
		self.get_number(key)?
			.try_into()
			.map_err(|_| JsonError::ParseIntError(key.to_owned()))
	}

	pub fn get_usize(&self, key: &str) -> JsonResult<usize> {
		self.get_number(key)?
			.try_into()
			.map_err(|_| JsonError::ParseIntError(key.to_owned()))
	}

	pub fn get_bool(&self, key: &str) -> JsonResult<bool> {
		match self.get(key)?.as_bool() {
			Some(val) => Ok(val),
			None => Err(JsonError::ValueIsNotBool(key.to_owned())),
		}
	}

	/// Reads an index reference of the form `{"__id__": n}`.
	pub fn get_ref(&self, key: &str) -> JsonResult<usize> {
		self.get_object(key)?.get_usize("__id__").map_err(|e| e.nested(key))
	}

	/// Reads an asset handle of the form `{"__uuid__": "..."}`.
	pub fn get_uuid(&self, key: &str) -> JsonResult<&'a str> {
		self.get_object(key)?.get_str("__uuid__").map_err(|e| e.nested(key))
	}

	/// Reads every `{"__id__": n}` in the list at `key`. A missing key reads as an empty list.
	pub fn get_refs(&self, key: &str) -> JsonResult<Vec<usize>> {
		if !self.has(key) {
			return Ok(Vec::new());
		}

		let mut refs = Vec::new();
		for (i, item) in self.get_list(key)?.iter().enumerate() {
			let index = JsonObject::from_value("__id__", item)
				.and_then(|obj| obj.get_usize("__id__"))
				.map_err(|e| e.in_list(i).nested(key))?;
			refs.push(index);
		}
		Ok(refs)
	}

	pub fn get_vec2(&self, key: &str) -> JsonResult<DVec2> {
		let obj = self.get_object(key)?;
		let x = obj.get_f64("x").map_err(|e| e.nested(key))?;
		let y = obj.get_f64("y").map_err(|e| e.nested(key))?;
		Ok(DVec2::new(x, y))
	}

	pub fn get_size(&self, key: &str) -> JsonResult<DVec2> {
		let obj = self.get_object(key)?;
		let width = obj.get_f64("width").map_err(|e| e.nested(key))?;
		let height = obj.get_f64("height").map_err(|e| e.nested(key))?;
		Ok(DVec2::new(width, height))
	}

	pub fn get_rgb(&self, key: &str) -> JsonResult<[u8; 3]> {
		let obj = self.get_object(key)?;
		let mut rgb = [0_u8; 3];
		for (channel, name) in rgb.iter_mut().zip(["r", "g", "b"]) {
			*channel = obj.get_f64(name).map_err(|e| e.nested(key))? as u8;
		}
		Ok(rgb)
	}
}
