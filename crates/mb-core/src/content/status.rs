use serde::{Deserialize, Serialize};

/// Publication state of a CMS record.
///
/// New records start out `Inactive` so half-finished content never shows up
/// on the public site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Active,
    #[default]
    Inactive,
}

impl PublishStatus {
    /// String representation used on the wire and in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Active => "active",
            PublishStatus::Inactive => "inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PublishStatus::Active)
    }

    pub fn toggled(self) -> Self {
        match self {
            PublishStatus::Active => PublishStatus::Inactive,
            PublishStatus::Inactive => PublishStatus::Active,
        }
    }
}
