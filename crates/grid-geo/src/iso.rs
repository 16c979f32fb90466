/// Canonicalizes an ISO/control-area label by substring match (§4.6).
/// Any label not matching a known substring passes through unchanged.
pub fn canonicalize_iso(label: &str) -> String {
    let upper = label.to_ascii_uppercase();
    if upper.contains("NEW ENGLAND") || upper.contains("ISONE") {
        "ISONE".to_string()
    } else if upper.contains("NEW YORK") || upper.contains("NYISO") {
        "NYISO".to_string()
    } else if upper.contains("PJM") {
        "PJM".to_string()
    } else {
        label.to_string()
    }
}
