use serde::{Deserialize, Serialize};

/// Information card for one medicine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MedicineRecord {
    pub name: String,
    pub description: String,
    pub dosage: String,
    pub side_effects: Vec<String>,
    pub precautions: Vec<String>,
}

const GENERIC_DESCRIPTION: &str = "This medication is used to treat various conditions. \
Detailed information about this specific medication is not available in our database. \
Please consult your healthcare provider or pharmacist for more detailed information.";

const GENERIC_DOSAGE: &str = "Take as directed by your healthcare provider. \
Follow all directions on your prescription label.";

const GENERIC_SIDE_EFFECTS: &[&str] = &[
    "Common side effects may include nausea, headache, or dizziness",
    "Contact your doctor if you experience severe side effects",
    "This is not a complete list of possible side effects",
];

const GENERIC_PRECAUTIONS: &[&str] = &[
    "Tell your doctor about any medical conditions and allergies you have",
    "Inform your doctor about all other medications you are taking",
    "Follow dosage instructions carefully",
    "Keep all medications away from children",
    "Store properly as indicated on the label",
];

impl MedicineRecord {
    /// Templated record for a medicine the table does not know.
    /// Only `name` varies; every other field is the fixed template.
    pub fn generic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: GENERIC_DESCRIPTION.to_string(),
            dosage: GENERIC_DOSAGE.to_string(),
            side_effects: to_owned_list(GENERIC_SIDE_EFFECTS),
            precautions: to_owned_list(GENERIC_PRECAUTIONS),
        }
    }
}

pub(crate) fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
