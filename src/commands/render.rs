use crate::models::analysis::AnalysisReport;
use crate::models::medicine::MedicineRecord;
use std::fmt::Write as _;

pub const DISCLAIMER: &str = "Important Disclaimer: This information is for educational purposes only. \
Always consult with a qualified healthcare professional before making any decisions \
about your medications or treatment plans.";

/// One medicine as a text card
pub fn render_medicine(medicine: &MedicineRecord) -> String {
    let mut out = String::new();
    let rule = "-".repeat(medicine.name.chars().count().max(12));

    let _ = writeln!(out, "{}", medicine.name);
    let _ = writeln!(out, "{}", rule);
    if !medicine.description.is_empty() {
        let _ = writeln!(out, "Information:\n  {}", medicine.description);
    }
    if !medicine.dosage.is_empty() {
        let _ = writeln!(out, "Dosage:\n  {}", medicine.dosage);
    }
    write_list(&mut out, "Side Effects", &medicine.side_effects);
    write_list(&mut out, "Precautions", &medicine.precautions);

    out
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}:", title);
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

/// Full results view as text
pub fn render_report(report: &AnalysisReport, show_text: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Prescription Analysis");
    let _ = writeln!(out, "=====================\n");

    if show_text {
        let text = if report.ocr_text.trim().is_empty() {
            "No text extracted."
        } else {
            report.ocr_text.trim_end()
        };
        let _ = writeln!(out, "OCR Results:\n{}\n", text);
    }

    let _ = writeln!(out, "Identified Medicines:");
    for candidate in &report.candidates {
        let _ = writeln!(out, "  * {}", candidate);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Medicine Information:\n");
    for medicine in &report.medicines {
        let _ = writeln!(out, "{}", render_medicine(medicine));
    }

    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn report(ocr_text: &str) -> AnalysisReport {
        AnalysisReport {
            ocr_text: ocr_text.to_string(),
            image_preview: None,
            candidates: vec!["Xylostatin".to_string()],
            medicines: vec![MedicineRecord::generic("Xylostatin")],
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_medicine_sections() {
        let card = render_medicine(&MedicineRecord::generic("Xylostatin"));

        assert!(card.starts_with("Xylostatin\n"));
        assert!(card.contains("Information:"));
        assert!(card.contains("Dosage:"));
        assert!(card.contains("Side Effects:\n  - Common side effects"));
        assert!(card.contains("Precautions:\n  - Tell your doctor"));
    }

    #[test]
    fn test_render_medicine_skips_empty_fields() {
        let record = MedicineRecord {
            name: "Metformin".to_string(),
            description: "Prose answer".to_string(),
            dosage: String::new(),
            side_effects: Vec::new(),
            precautions: Vec::new(),
        };
        let card = render_medicine(&record);

        assert!(!card.contains("Dosage:"));
        assert!(!card.contains("Side Effects:"));
    }

    #[test]
    fn test_render_report_text_toggle() {
        let with_text = render_report(&report("Xylostatin\n"), true);
        assert!(with_text.contains("OCR Results:\nXylostatin\n"));
        assert!(with_text.contains("  * Xylostatin"));
        assert!(with_text.ends_with(&format!("{}\n", DISCLAIMER)));

        let without = render_report(&report("Xylostatin\n"), false);
        assert!(!without.contains("OCR Results:"));
    }

    #[test]
    fn test_render_report_empty_text() {
        let out = render_report(&report("  "), true);
        assert!(out.contains("No text extracted."));
    }
}
