//! Department to organisation mapping.
//!
//! The organisation selector on the service step depends on the chosen
//! department. The mapping is a fixed table shipped with the client; keys
//! are the stable values sent to the registry, labels are the keys with
//! the underscore separator replaced by a space.

use serde::{Deserialize, Serialize};

/// An organisation offered in the organisation selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgOption {
    /// Stable key submitted to the registry, e.g. `"Basic_Shiksha_Parishad"`.
    pub key: String,
    /// Display label, e.g. `"Basic Shiksha Parishad"`.
    pub label: String,
}

/// Department key -> organisation keys under it.
static DEPARTMENT_ORGS: &[(&str, &[&str])] = &[
    (
        "Basic_Education",
        &[
            "Basic_Shiksha_Parishad",
            "District_Basic_Education_Office",
            "State_Educational_Research_Council",
        ],
    ),
    (
        "Secondary_Education",
        &[
            "Madhyamik_Shiksha_Parishad",
            "District_Inspector_Of_Schools_Office",
            "Aided_Secondary_Schools",
        ],
    ),
    (
        "Medical_Health",
        &[
            "Directorate_Of_Medical_Health",
            "District_Hospitals",
            "Community_Health_Centres",
        ],
    ),
    (
        "Revenue",
        &["Board_Of_Revenue", "District_Collectorate", "Tehsil_Offices"],
    ),
    (
        "Home",
        &["Police_Headquarters", "District_Police", "Fire_Services"],
    ),
    (
        "Public_Works",
        &[
            "Public_Works_Department",
            "Rural_Engineering_Services",
            "Irrigation_Works_Circle",
        ],
    ),
    (
        "Panchayati_Raj",
        &[
            "District_Panchayat_Raj_Office",
            "Zila_Panchayat",
            "Kshetra_Panchayat",
        ],
    ),
];

/// All department keys, in table order.
pub fn departments() -> Vec<String> {
    DEPARTMENT_ORGS
        .iter()
        .map(|(dept, _)| (*dept).to_string())
        .collect()
}

/// Organisations belonging to `department`.
///
/// Unknown departments yield an empty list, which the surface renders as a
/// disabled selector.
pub fn options_for_department(department: &str) -> Vec<OrgOption> {
    DEPARTMENT_ORGS
        .iter()
        .find(|(dept, _)| *dept == department)
        .map(|(_, orgs)| {
            orgs.iter()
                .map(|key| OrgOption {
                    key: (*key).to_string(),
                    label: display_label(key),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Display label for a key: the underscore separator becomes a space. The
/// key itself is what gets submitted.
pub fn display_label(key: &str) -> String {
    key.replace('_', " ")
}
