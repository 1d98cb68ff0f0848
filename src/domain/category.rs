use serde::Serialize;

pub type CategoryId = i64;

/// A spending category. Created ad hoc by an admin and referenced by
/// expenses; never deleted.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
