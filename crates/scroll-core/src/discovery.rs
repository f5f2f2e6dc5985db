use crate::constants::PAGE_LABEL;
use crate::target::{ScrollTarget, TargetId};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    Page,
    Element,
}

/// One entry in the target picker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub target: ScrollTarget,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: CandidateKind,
}

impl Candidate {
    pub fn page() -> Self {
        Self {
            target: ScrollTarget::Page,
            label: PAGE_LABEL.to_string(),
            kind: CandidateKind::Page,
        }
    }

    pub fn element(id: TargetId, label: String) -> Self {
        Self {
            target: ScrollTarget::Element(id),
            label,
            kind: CandidateKind::Element,
        }
    }
}

/// Human-readable label: `#id` if present, else `.firstClass`, else the
/// lower-case tag name.
pub fn candidate_label(tag_name: &str, id: &str, class_name: &str) -> String {
    if !id.is_empty() {
        return format!("#{id}");
    }
    match class_name.split_whitespace().next() {
        Some(first) => format!(".{first}"),
        None => tag_name.to_ascii_lowercase(),
    }
}
