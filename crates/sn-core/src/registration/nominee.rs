//! Nominee roster.
//!
//! A member may name up to [`MAX_NOMINEES`] nominees. Each nominee is a
//! small sub-form with its own bank details and document uploads. The
//! roster owns the primary flag: while at least one nominee exists, exactly
//! one of them is primary, and every mutation here maintains that.

use serde::{Deserialize, Serialize};

use crate::registration::draft::FileAttachment;

/// Hard cap on the number of nominees.
pub const MAX_NOMINEES: usize = 2;

/// Stable identity assigned when a nominee slot is created.
///
/// Positions in the roster shift as nominees are removed; uploads and edits
/// are tied to this id instead. Positional indexes appear only in the
/// submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NomineeId(String);

impl NomineeId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NomineeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NomineeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of nominee relations offered in the relation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relation {
    Spouse,
    Son,
    Daughter,
    Father,
    Mother,
    Brother,
    Sister,
    Other,
}

impl Relation {
    pub fn all() -> &'static [Relation] {
        &[
            Relation::Spouse,
            Relation::Son,
            Relation::Daughter,
            Relation::Father,
            Relation::Mother,
            Relation::Brother,
            Relation::Sister,
            Relation::Other,
        ]
    }

    /// Catalog key the surface resolves through the localizer.
    pub fn label_key(&self) -> &'static str {
        match self {
            Relation::Spouse => "relation.spouse",
            Relation::Son => "relation.son",
            Relation::Daughter => "relation.daughter",
            Relation::Father => "relation.father",
            Relation::Mother => "relation.mother",
            Relation::Brother => "relation.brother",
            Relation::Sister => "relation.sister",
            Relation::Other => "relation.other",
        }
    }

    /// English label used when the catalog has no entry for the key.
    pub fn fallback_label(&self) -> &'static str {
        match self {
            Relation::Spouse => "Spouse",
            Relation::Son => "Son",
            Relation::Daughter => "Daughter",
            Relation::Father => "Father",
            Relation::Mother => "Mother",
            Relation::Brother => "Brother",
            Relation::Sister => "Sister",
            Relation::Other => "Other",
        }
    }
}

/// Bank account of a nominee.
///
/// `account_number_confirmation` is a client-side re-entry check, excluded
/// from the submission payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NomineeBank {
    pub account_number: String,
    pub account_number_confirmation: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub branch_name: String,
}

/// One nominee slot in the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NomineeDraft {
    pub id: NomineeId,
    pub name: String,
    pub relation: Option<Relation>,
    pub date_of_birth: String,
    pub aadhaar_number: String,
    pub bank: NomineeBank,
    pub aadhaar_front: Option<FileAttachment>,
    pub aadhaar_back: Option<FileAttachment>,
    pub is_primary: bool,
}

impl NomineeDraft {
    fn new() -> Self {
        Self {
            id: NomineeId::new(),
            name: String::new(),
            relation: None,
            date_of_birth: String::new(),
            aadhaar_number: String::new(),
            bank: NomineeBank::default(),
            aadhaar_front: None,
            aadhaar_back: None,
            is_primary: false,
        }
    }

    /// True once the member has entered anything identifying into this slot.
    ///
    /// Untouched slots are skipped by validation and dropped from the
    /// submission payload.
    pub fn is_dirty(&self) -> bool {
        !self.name.is_empty()
            || self.relation.is_some()
            || !self.date_of_birth.is_empty()
            || !self.aadhaar_number.is_empty()
    }
}

/// Ordered collection of nominee slots, capped at [`MAX_NOMINEES`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NomineeRoster {
    nominees: Vec<NomineeDraft>,
}

impl NomineeRoster {
    /// Appends a fresh slot and returns it, or `None` when the roster is
    /// already at the cap.
    ///
    /// The first nominee ever added becomes primary so the roster never
    /// holds nominees without a primary.
    pub fn add(&mut self) -> Option<&mut NomineeDraft> {
        if self.nominees.len() >= MAX_NOMINEES {
            return None;
        }
        let mut nominee = NomineeDraft::new();
        nominee.is_primary = self.nominees.is_empty();
        self.nominees.push(nominee);
        self.nominees.last_mut()
    }

    /// Removes the slot at `index`; out-of-range indexes are ignored.
    ///
    /// If the removed nominee was primary, the first remaining nominee
    /// inherits the flag.
    pub fn remove(&mut self, index: usize) {
        if index >= self.nominees.len() {
            return;
        }
        self.nominees.remove(index);
        let has_primary = self.nominees.iter().any(|n| n.is_primary);
        if !has_primary {
            if let Some(first) = self.nominees.first_mut() {
                first.is_primary = true;
            }
        }
    }

    /// Makes the nominee at `index` the primary one, clearing the flag on
    /// every other nominee in the same update. Out-of-range indexes are
    /// ignored.
    pub fn set_primary(&mut self, index: usize) {
        if index >= self.nominees.len() {
            return;
        }
        for (i, nominee) in self.nominees.iter_mut().enumerate() {
            nominee.is_primary = i == index;
        }
    }

    pub fn get(&self, index: usize) -> Option<&NomineeDraft> {
        self.nominees.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut NomineeDraft> {
        self.nominees.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.nominees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nominees.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NomineeDraft> {
        self.nominees.iter()
    }

    pub fn primary_index(&self) -> Option<usize> {
        self.nominees.iter().position(|n| n.is_primary)
    }
}
