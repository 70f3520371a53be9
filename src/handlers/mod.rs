pub mod health;
pub mod list;
pub mod get;
pub mod create;
pub mod update;
pub mod delete;

pub use health::health_handler;
pub use list::list_handler;
pub use get::get_handler;
pub use create::create_handler;
pub use update::update_handler;
pub use delete::delete_handler;

/// Parse the `{id}` path segment as a base-10 item id.
///
/// A non-numeric segment is treated as an id that matches no stored item,
/// so callers report not-found rather than a parse error.
pub(crate) fn parse_item_id(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok()
}
