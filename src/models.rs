use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A stored item record.
///
/// `id` is assigned by the server at creation time. Any fields beyond
/// `name` and `description` supplied by the caller are preserved verbatim
/// in `extra` and round-trip through the backing document unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, JsonValue>,
}

impl Item {
    /// Shallow-merge an update payload into this item.
    ///
    /// Payload fields overwrite the stored fields, stored fields absent from
    /// the payload survive. The server-assigned `id` is never overwritten.
    pub fn apply(&mut self, draft: ItemDraft) {
        self.name = draft.name;
        self.description = draft.description;
        for (key, value) in draft.extra {
            self.extra.insert(key, value);
        }
    }
}

/// A validated create/update payload.
///
/// Produced from a request body only when the body is a JSON object with
/// non-empty string `name` and `description`. Everything else the caller
/// sent, minus `id`, lands in `extra`.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub extra: Map<String, JsonValue>,
}

impl ItemDraft {
    pub fn from_value(payload: &JsonValue) -> Option<Self> {
        let object = payload.as_object()?;
        let name = non_empty_string(object, "name")?;
        let description = non_empty_string(object, "description")?;

        let mut extra = object.clone();
        extra.remove("id");
        extra.remove("name");
        extra.remove("description");

        Some(ItemDraft {
            name,
            description,
            extra,
        })
    }

    /// Promote this draft to a full item under the given server-assigned id.
    pub fn into_item(self, id: u64) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            extra: self.extra,
        }
    }
}

fn non_empty_string(object: &Map<String, JsonValue>, key: &str) -> Option<String> {
    object
        .get(key)?
        .as_str()
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Response type for successful DELETE operations
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
