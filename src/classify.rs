// Keyword classification of free-text problem descriptions.
//
// The rules live in a single ordered table so the matching sequence is
// visible and testable on its own. Order matters: a description mentioning
// both a LAN cable and the wifi is a LAN ticket, because that is how the
// technicians file them.
use crate::util::is_missing_text;

/// Ordered (keywords, category) rules. The first rule whose keyword appears
/// in the lowercased description wins.
pub const CATEGORY_RULES: &[(&[&str], &str)] = &[
    (&["lan", "utp", "kabel"], "Troubleshoot Jaringan LAN"),
    (&["internet", "wifi", "konek"], "Troubleshoot Jaringan Internet"),
    (&["ups", "listrik"], "Maintenance UPS"),
    (&["cctv"], "Troubleshoot CCTV"),
];

/// Map a raw problem description to its canonical category.
///
/// Descriptions that match no rule keep their own wording, title-cased, so
/// one-off problems still group consistently ("printer error" and
/// "Printer ERROR" both become "Printer Error").
pub fn classify_problem(raw: &str) -> String {
    let text = raw.trim().to_lowercase();
    for (keywords, category) in CATEGORY_RULES {
        if keywords.iter().any(|k| text.contains(k)) {
            return (*category).to_string();
        }
    }
    title_case(&text)
}

/// True for problem cells that carry no real description: blank, the `-` and
/// `.` filler values the intake sheet accumulates, or a null sentinel.
pub fn is_placeholder_problem(raw: &str) -> bool {
    let t = raw.trim();
    is_missing_text(t) || t == "-" || t == "."
}

/// Capitalize the first letter of each whitespace-separated word.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_rules_map_to_canonical_categories() {
        assert_eq!(classify_problem("kabel utp putus"), "Troubleshoot Jaringan LAN");
        assert_eq!(classify_problem("wifi lambat"), "Troubleshoot Jaringan Internet");
        assert_eq!(classify_problem("listrik mati"), "Maintenance UPS");
        assert_eq!(classify_problem("cctv rusak"), "Troubleshoot CCTV");
    }

    #[test]
    fn matching_is_case_insensitive_and_trims() {
        assert_eq!(classify_problem("  CCTV pos satpam mati  "), "Troubleshoot CCTV");
        assert_eq!(classify_problem("Tidak KONEK ke server"), "Troubleshoot Jaringan Internet");
    }

    #[test]
    fn substring_matching_is_intentionally_greedy() {
        // "lantai" contains "lan", so the LAN rule fires before the CCTV
        // rule ever runs.
        assert_eq!(classify_problem("cctv lantai 2 mati"), "Troubleshoot Jaringan LAN");
    }

    #[test]
    fn first_matching_rule_wins() {
        // Mentions both LAN and wifi; the LAN rule is evaluated first.
        assert_eq!(
            classify_problem("kabel lan putus, wifi ikut mati"),
            "Troubleshoot Jaringan LAN"
        );
        // "ups" appears but the internet rule comes earlier.
        assert_eq!(
            classify_problem("internet mati karena ups"),
            "Troubleshoot Jaringan Internet"
        );
    }

    #[test]
    fn unmatched_text_falls_back_to_title_case() {
        assert_eq!(classify_problem("printer error"), "Printer Error");
        assert_eq!(classify_problem("GANTI toner"), "Ganti Toner");
        assert_eq!(classify_problem("proyektor  redup"), "Proyektor  Redup");
    }

    #[test]
    fn placeholder_problems_are_detected() {
        assert!(is_placeholder_problem(""));
        assert!(is_placeholder_problem("   "));
        assert!(is_placeholder_problem("-"));
        assert!(is_placeholder_problem("."));
        assert!(is_placeholder_problem("nan"));
        assert!(is_placeholder_problem(" NaN "));
        assert!(!is_placeholder_problem("mouse hilang"));
    }
}
