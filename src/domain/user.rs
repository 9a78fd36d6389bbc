//! User domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User record as stored and served.
///
/// `id` is assigned by the store and immutable after creation. The cache
/// snapshot format is exactly the JSON serialization of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned unique identifier
    #[schema(example = 1)]
    pub id: i32,
    /// User display name
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// User email address
    #[schema(example = "ada@example.com")]
    pub email: String,
}
