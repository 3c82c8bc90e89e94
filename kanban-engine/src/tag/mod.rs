//! Tag operations
//!
//! Tags live in the app-wide [`TagRegistry`](crate::types::TagRegistry), not on
//! a board. Tasks keep referring to a deleted tag's id; readers drop ids that
//! no longer resolve.

mod add;
mod delete;
mod get;
mod list;
mod update;

pub use add::AddTag;
pub use delete::DeleteTag;
pub use get::GetTag;
pub use list::ListTags;
pub use update::UpdateTag;

/// Trimmed color, or `None` when blank
fn color_arg(color: Option<&str>) -> Option<String> {
    color.map(str::trim).filter(|c| !c.is_empty()).map(str::to_string)
}
