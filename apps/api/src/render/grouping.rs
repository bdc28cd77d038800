use crate::models::section::{SectionKind, SectionRow};
use crate::sections::ordering::sort_sections;

/// Kinds that have a dedicated slot in every layout. Anything else is
/// rendered by the generic section renderer after them.
pub const DEDICATED_KINDS: [SectionKind; 5] = [
    SectionKind::Profile,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Projects,
];

/// Visible sections grouped by type. Groups keep first-seen order and the
/// sections inside a group keep position order.
#[derive(Debug, Default)]
pub struct SectionGroups {
    groups: Vec<(SectionKind, Vec<SectionRow>)>,
}

pub fn group_sections(sections: &[SectionRow]) -> SectionGroups {
    let mut ordered: Vec<SectionRow> = sections.iter().filter(|s| s.is_visible).cloned().collect();
    sort_sections(&mut ordered);

    let mut groups: Vec<(SectionKind, Vec<SectionRow>)> = Vec::new();
    for section in ordered {
        let kind = SectionKind::from_type(&section.section_type);
        match groups.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, members)) => members.push(section),
            None => groups.push((kind, vec![section])),
        }
    }
    SectionGroups { groups }
}

impl SectionGroups {
    pub fn get(&self, kind: &SectionKind) -> &[SectionRow] {
        self.groups
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, members)| members.as_slice())
            .unwrap_or(&[])
    }

    /// The first visible profile section, which feeds the header.
    pub fn profile(&self) -> Option<&SectionRow> {
        self.get(&SectionKind::Profile).first()
    }

    /// Groups without a dedicated layout slot, in first-seen order.
    pub fn others(&self) -> impl Iterator<Item = &(SectionKind, Vec<SectionRow>)> {
        self.groups
            .iter()
            .filter(|(kind, _)| !DEDICATED_KINDS.contains(kind))
    }

    pub fn kinds(&self) -> Vec<&SectionKind> {
        self.groups.iter().map(|(kind, _)| kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
