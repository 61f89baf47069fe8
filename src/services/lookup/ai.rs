use super::MedicineLookup;
use crate::error::LookupError;
use crate::models::medicine::MedicineRecord;
use crate::services::ai::TextGenerator;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Medicine lookup backed by a generative text service.
/// The answer is free prose; fields are filled best-effort.
#[derive(Clone)]
pub struct AiLookup {
    generator: Arc<dyn TextGenerator>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Description,
    Dosage,
    SideEffects,
    Precautions,
}

impl AiLookup {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn prompt(name: &str) -> String {
        format!(
            "As a medical information assistant, describe the medicine: {}.\n\
             Answer using exactly these four section headings, each on its own line:\n\
             DESCRIPTION:\n\
             DOSAGE:\n\
             SIDE EFFECTS:\n\
             PRECAUTIONS:\n\
             Under SIDE EFFECTS and PRECAUTIONS give one item per line starting with \"- \".\n\
             Use clear, simple language.",
            name
        )
    }

    /// Split the model's answer into record fields.
    /// Text before the first heading belongs to the description; with no
    /// recognizable heading the whole answer is the description.
    pub fn parse_answer(name: &str, answer: &str) -> MedicineRecord {
        let mut description = Vec::new();
        let mut dosage = Vec::new();
        let mut side_effects = Vec::new();
        let mut precautions = Vec::new();
        let mut current = Section::Description;
        let mut saw_heading = false;

        for raw in answer.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some((section, rest)) = parse_heading(line) {
                current = section;
                saw_heading = true;
                if rest.is_empty() {
                    continue;
                }
                push_line(section, rest, &mut description, &mut dosage, &mut side_effects, &mut precautions);
                continue;
            }

            push_line(current, line, &mut description, &mut dosage, &mut side_effects, &mut precautions);
        }

        if !saw_heading {
            return MedicineRecord {
                name: name.to_string(),
                description: answer.trim().to_string(),
                dosage: String::new(),
                side_effects: Vec::new(),
                precautions: Vec::new(),
            };
        }

        MedicineRecord {
            name: name.to_string(),
            description: description.join(" "),
            dosage: dosage.join(" "),
            side_effects,
            precautions,
        }
    }
}

fn push_line(
    section: Section,
    line: &str,
    description: &mut Vec<String>,
    dosage: &mut Vec<String>,
    side_effects: &mut Vec<String>,
    precautions: &mut Vec<String>,
) {
    match section {
        Section::Description => description.push(line.to_string()),
        Section::Dosage => dosage.push(line.to_string()),
        Section::SideEffects => side_effects.push(strip_bullet(line).to_string()),
        Section::Precautions => precautions.push(strip_bullet(line).to_string()),
    }
}

/// Recognize a heading line such as "## Side Effects:" or "**DOSAGE:** 500mg".
/// Returns the section and any text after the colon.
fn parse_heading(line: &str) -> Option<(Section, &str)> {
    let stripped = line.trim_start_matches(|c: char| c == '#' || c == '*' || c == ' ');
    let (label, rest) = match stripped.split_once(':') {
        Some((label, rest)) => (label, rest),
        None => (stripped, ""),
    };
    let label = label.trim_end_matches(|c: char| c == '*' || c == ' ').to_lowercase();

    let section = match label.as_str() {
        "description" => Section::Description,
        "dosage" => Section::Dosage,
        "side effects" => Section::SideEffects,
        "precautions" => Section::Precautions,
        _ => return None,
    };

    Some((section, rest.trim_start_matches('*').trim()))
}

fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim_start_matches(|c: char| c == '-' || c == '*' || c == '•').trim_start();
    // "1. item" / "2) item"
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &trimmed[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim_start();
        }
    }
    trimmed
}

#[async_trait]
impl MedicineLookup for AiLookup {
    async fn lookup(&self, name: &str) -> Result<MedicineRecord, LookupError> {
        let answer = self
            .generator
            .generate(&Self::prompt(name))
            .await
            .map_err(|source| LookupError::Ai {
                name: name.to_string(),
                source,
            })?;

        debug!(query = name, answer_len = answer.len(), "AI lookup answered");
        Ok(Self::parse_answer(name, &answer))
    }
}
