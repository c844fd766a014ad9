//! Output naming
//!
//! Derives a human-readable royalty name from the input filename. Marketplace
//! exports named like `listing-482.csv` become `"Listing 482"`; anything else
//! falls back to the file stem. Cosmetic only, not part of the valuation.

use regex::Regex;
use std::sync::OnceLock;

fn listing_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)listing[-_]?(\d+)").expect("valid regex"))
}

/// Derive the royalty name from an input filename.
pub fn royalty_name_from(filename: &str) -> String {
    let stem = file_stem(filename);

    if stem.to_lowercase().contains("listing") {
        if let Some(caps) = listing_re().captures(stem) {
            return format!("Listing {}", &caps[1]);
        }
    }

    stem.to_string()
}

/// The output workbook filename for a royalty name.
pub fn output_filename(royalty_name: &str) -> String {
    format!("{} Valuation.xlsx", royalty_name)
}

fn file_stem(filename: &str) -> &str {
    // Strip any directory components, then the final extension
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    match base.rfind('.') {
        Some(idx) if idx > 0 => &base[..idx],
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_listing_with_dash() {
        assert_eq!(royalty_name_from("listing-482.csv"), "Listing 482");
    }

    #[test]
    fn test_listing_with_underscore_and_case() {
        assert_eq!(royalty_name_from("My_Listing_77.xlsx"), "Listing 77");
    }

    #[test]
    fn test_listing_without_id_falls_back_to_stem() {
        assert_eq!(royalty_name_from("listing-final.csv"), "listing-final");
    }

    #[test]
    fn test_plain_name_uses_stem() {
        assert_eq!(royalty_name_from("my_artist_earnings.csv"), "my_artist_earnings");
    }

    #[test]
    fn test_path_components_stripped() {
        assert_eq!(royalty_name_from("/tmp/uploads/listing_9.csv"), "Listing 9");
    }

    #[test]
    fn test_output_filename() {
        assert_eq!(output_filename("Listing 482"), "Listing 482 Valuation.xlsx");
    }
}
