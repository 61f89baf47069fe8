use super::MedicineLookup;
use crate::error::LookupError;
use crate::models::medicine::{to_owned_list, MedicineRecord};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

struct Entry {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    dosage: &'static str,
    side_effects: &'static [&'static str],
    precautions: &'static [&'static str],
}

impl Entry {
    fn to_record(&self) -> MedicineRecord {
        MedicineRecord {
            name: self.name.to_string(),
            description: self.description.to_string(),
            dosage: self.dosage.to_string(),
            side_effects: to_owned_list(self.side_effects),
            precautions: to_owned_list(self.precautions),
        }
    }
}

// Matched in this order; first key contained in the name wins
const TABLE: &[Entry] = &[
    Entry {
        key: "paracetamol",
        name: "Paracetamol",
        description: "Paracetamol (acetaminophen) is a pain reliever and fever reducer. It is used to treat many conditions such as headache, muscle aches, arthritis, backache, toothaches, colds, and fevers. It relieves pain in mild arthritis but has no effect on the underlying inflammation and swelling of the joint.",
        dosage: "The recommended dose for adults is 1-2 tablets (500-1000 mg) every 4-6 hours as needed, with a maximum of 4 grams (8 tablets) in a 24-hour period.",
        side_effects: &[
            "Nausea and vomiting",
            "Stomach pain",
            "Loss of appetite",
            "Headache",
            "Rash or itching",
        ],
        precautions: &[
            "Do not exceed the recommended dose",
            "Avoid alcohol while taking this medication",
            "Consult a doctor if you have liver disease",
            "Not recommended for long-term pain management without medical supervision",
            "Keep out of reach of children",
        ],
    },
    Entry {
        key: "amoxicillin",
        name: "Amoxicillin",
        description: "Amoxicillin is a penicillin antibiotic that fights bacteria in the body. It is used to treat many different types of infection caused by bacteria, such as tonsillitis, bronchitis, pneumonia, and infections of the ear, nose, throat, skin, or urinary tract.",
        dosage: "For adults and children weighing 40 kg or more, the recommended dose is 250-500 mg every 8 hours or 500-875 mg every 12 hours, depending on the severity of the infection.",
        side_effects: &[
            "Diarrhea",
            "Stomach upset",
            "Headache",
            "Vaginal itching or discharge",
            "Rash, itching, or hives",
        ],
        precautions: &[
            "Tell your doctor if you are allergic to penicillin",
            "Complete the full course of treatment, even if symptoms improve",
            "May reduce the effectiveness of birth control pills",
            "Take with food to reduce stomach upset",
            "Call your doctor if you develop severe diarrhea",
        ],
    },
    Entry {
        key: "ibuprofen",
        name: "Ibuprofen",
        description: "Ibuprofen is a nonsteroidal anti-inflammatory drug (NSAID). It works by reducing hormones that cause inflammation and pain in the body. It is used to reduce fever and treat pain or inflammation caused by many conditions such as headache, toothache, back pain, arthritis, menstrual cramps, or minor injury.",
        dosage: "The recommended dose for adults is 200-400 mg every 4-6 hours as needed, with a maximum of 1,200 mg in a 24-hour period unless directed by a doctor.",
        side_effects: &[
            "Upset stomach",
            "Mild heartburn",
            "Nausea, vomiting",
            "Bloating, gas, diarrhea, constipation",
            "Dizziness, headache",
        ],
        precautions: &[
            "Take with food or milk to prevent stomach upset",
            "Avoid alcohol and tobacco",
            "Not recommended for people with heart conditions or high blood pressure",
            "Stop taking and seek medical attention if you experience chest pain, shortness of breath, or slurred speech",
            "Avoid taking other NSAIDs at the same time",
        ],
    },
];

/// Built-in medicine table with a simulated network delay
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    delay: Duration,
}

impl StaticLookup {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Synchronous part of the lookup: table match or generic record
    pub fn find(name: &str) -> MedicineRecord {
        let normalized = name.to_lowercase();

        match TABLE.iter().find(|entry| normalized.contains(entry.key)) {
            Some(entry) => entry.to_record(),
            None => MedicineRecord::generic(name),
        }
    }

    /// Keys of the built-in table, in match order
    pub fn keys() -> impl Iterator<Item = &'static str> {
        TABLE.iter().map(|entry| entry.key)
    }
}

#[async_trait]
impl MedicineLookup for StaticLookup {
    async fn lookup(&self, name: &str) -> Result<MedicineRecord, LookupError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let record = Self::find(name);
        debug!(query = name, matched = %record.name, "static lookup");
        Ok(record)
    }
}
