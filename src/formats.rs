pub mod json;
pub mod store;

pub use json::{JsonError, JsonObject, JsonResult};
pub use store::{ObjectStore, StoreError, StoreResult};
