/// A fixed catalog label a habit may be associated with, for filtering.
///
/// Tags are static reference data, not persisted per-user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
}

/// The fixed tag catalog.
pub const TAG_CATALOG: &[Tag] = &[
    Tag {
        id: "health",
        name: "Health",
        color: "#10b981",
    },
    Tag {
        id: "productivity",
        name: "Productivity",
        color: "#3b82f6",
    },
    Tag {
        id: "mindfulness",
        name: "Mindfulness",
        color: "#8b5cf6",
    },
    Tag {
        id: "learning",
        name: "Learning",
        color: "#f59e0b",
    },
    Tag {
        id: "finance",
        name: "Finance",
        color: "#64748b",
    },
    Tag {
        id: "social",
        name: "Social",
        color: "#ec4899",
    },
    Tag {
        id: "creativity",
        name: "Creativity",
        color: "#ef4444",
    },
];

impl Tag {
    /// Look up a catalog tag by its id.
    pub fn find(tag_id: &str) -> Option<Tag> {
        TAG_CATALOG.iter().copied().find(|t| t.id == tag_id)
    }

    /// Check that every id in `tag_ids` names a catalog tag.
    pub fn all_known(tag_ids: &[String]) -> bool {
        tag_ids.iter().all(|id| Tag::find(id).is_some())
    }
}
