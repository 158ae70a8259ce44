use json::JsonValue;

use super::json::{JsonError, JsonObject};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
	#[error("Scene document is not a list of records")]
	NotAList,
	#[error("Reference to record {index}, but the scene only has {len} records")]
	IndexOutOfRange { index: usize, len: usize },
	#[error("Record {0} is not an object")]
	RecordIsNotObject(usize),
	#[error("Scene document has no \"cc.SceneAsset\" record")]
	NoSceneAsset,
	#[error("In record {index}\n  - {inner}")]
	InRecord { index: usize, inner: JsonError },
}

impl StoreError {
	fn in_record(index: usize) -> impl Fn(JsonError) -> Self {
		move |inner| Self::InRecord { index, inner }
	}
}

/// Flat, index-addressed scene document. Records refer to each other only
/// through `{"__id__": n}`, where `n` is a position in this store.
pub struct ObjectStore {
	records: Vec<JsonValue>,
}

impl ObjectStore {
	pub fn from_json(document: JsonValue) -> StoreResult<Self> {
		match document {
			JsonValue::Array(records) => Ok(Self { records }),
			_ => Err(StoreError::NotAList),
		}
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn get(&self, index: usize) -> StoreResult<JsonObject<'_>> {
		let record = self.records.get(index).ok_or(StoreError::IndexOutOfRange {
			index,
			len: self.records.len(),
		})?;
		JsonObject::from_value("record", record).map_err(|_| StoreError::RecordIsNotObject(index))
	}

	/// `__type__` of the record at `index`.
	pub fn type_of(&self, index: usize) -> StoreResult<&str> {
		self.get(index)?.type_name().map_err(StoreError::in_record(index))
	}

	/// Components attached to the node record at `index`, in declaration order.
	pub fn components(&self, index: usize) -> StoreResult<Vec<JsonObject<'_>>> {
		let refs = self.get(index)?.get_refs("_components").map_err(StoreError::in_record(index))?;
		refs.into_iter().map(|component| self.get(component)).collect()
	}

	/// First component of type `ty` attached to the node record at `index`.
	pub fn component_of_type(&self, index: usize, ty: &str) -> StoreResult<Option<JsonObject<'_>>> {
		for component in self.components(index)? {
			if component.type_name().ok() == Some(ty) {
				return Ok(Some(component));
			}
		}
		Ok(None)
	}

	/// Child record indices of the node record at `index`, checked against the store bounds.
	pub fn children(&self, index: usize) -> StoreResult<Vec<usize>> {
		let refs = self.get(index)?.get_refs("_children").map_err(StoreError::in_record(index))?;
		for &child in &refs {
			self.get(child)?;
		}
		Ok(refs)
	}

	/// Index of the scene node, taken from the first `cc.SceneAsset` record.
	pub fn scene_root(&self) -> StoreResult<usize> {
		for (index, record) in self.records.iter().enumerate() {
			let Ok(record) = JsonObject::from_value("record", record) else {
				continue;
			};
			if record.type_name().ok() == Some("cc.SceneAsset") {
				let root = record.get_ref("scene").map_err(StoreError::in_record(index))?;
				self.get(root)?;
				return Ok(root);
			}
		}
		Err(StoreError::NoSceneAsset)
	}
}
