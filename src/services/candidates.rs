use once_cell::sync::Lazy;
use regex::Regex;

/// Most candidates returned for one prescription
pub const MAX_CANDIDATES: usize = 3;

/// Returned when no line of the text qualifies
pub const FALLBACK_CANDIDATES: [&str; 3] = ["Paracetamol", "Amoxicillin", "Ibuprofen"];

static DIGITS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s]+$").expect("digits pattern is valid"));

static HEADER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(Dr|Mr|Mrs|Miss|Patient|Name|Address|Date|Tel|Phone)")
        .expect("header pattern is valid")
});

/// Guess medicine names from OCR text
/// Keeps the first 3 plausible lines in source order, trimmed.
/// Falls back to a fixed sample list when nothing qualifies.
pub fn extract_candidates(text: &str) -> Vec<String> {
    let found: Vec<String> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| is_candidate(line))
        .take(MAX_CANDIDATES)
        .map(str::to_string)
        .collect();

    if found.is_empty() {
        return FALLBACK_CANDIDATES.iter().map(|s| s.to_string()).collect();
    }

    found
}

/// Whether a trimmed line looks like a medicine name
pub fn is_candidate(line: &str) -> bool {
    validate_length(line) && !is_numeric(line) && !is_header(line)
}

/// Length in characters must be in 4..=29
pub fn validate_length(line: &str) -> bool {
    let len = line.chars().count();
    len > 3 && len < 30
}

/// Only digits and whitespace (phone numbers, dates without separators, ids)
pub fn is_numeric(line: &str) -> bool {
    DIGITS_ONLY.is_match(line)
}

/// Starts with a header-like token such as "Patient" or "Date"
pub fn is_header(line: &str) -> bool {
    HEADER_PREFIX.is_match(line)
}
