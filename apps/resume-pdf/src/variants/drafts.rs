/// A resume draft the site build is known to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftInfo {
    pub id: &'static str,
    pub label: &'static str,
}

/// Drafts rendered by the site, in the order the site lists them.
pub const KNOWN_DRAFTS: &[DraftInfo] = &[
    DraftInfo {
        id: "general",
        label: "General",
    },
    DraftInfo {
        id: "everything",
        label: "Everything",
    },
    DraftInfo {
        id: "data-engineer",
        label: "Data Engineer",
    },
    DraftInfo {
        id: "data-scientist",
        label: "Data Scientist",
    },
    DraftInfo {
        id: "ml-engineer",
        label: "ML Engineer",
    },
    DraftInfo {
        id: "software-engineer",
        label: "Software Engineer",
    },
];

pub fn label_for(key: &str) -> Option<&'static str> {
    KNOWN_DRAFTS
        .iter()
        .find(|draft| draft.id == key)
        .map(|draft| draft.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_draft_ids_are_unique() {
        let mut ids: Vec<_> = KNOWN_DRAFTS.iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), KNOWN_DRAFTS.len());
    }

    #[test]
    fn test_label_for_unknown_is_none() {
        assert_eq!(label_for("general"), Some("General"));
        assert_eq!(label_for("GENERAL"), None);
    }
}
