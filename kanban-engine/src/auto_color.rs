//! Color palettes and deterministic color assignment.
//!
//! Colors are stored by name (`"purple"`, `"amber"`); how a name is drawn is up
//! to the front end.

/// Preset tag colors.
pub const TAG_PALETTE: &[&str] = &[
    "purple", "pink", "orange", "cyan", "lime", "rose", "violet", "teal",
];

/// Preset column colors. The first entry is the default for new columns.
pub const COLUMN_PALETTE: &[&str] = &[
    "indigo", "amber", "emerald", "rose", "sky", "violet", "orange", "teal", "pink", "slate",
];

/// Color given to columns synthesized during migration
pub const FALLBACK_COLUMN_COLOR: &str = "slate";

/// Return a deterministic tag color for a label.
///
/// Uses a simple FNV-1a hash of the lower-cased label mapped to the palette index.
pub fn auto_color(label: &str) -> &'static str {
    let hash = fnv1a(&label.trim().to_lowercase());
    let idx = (hash as usize) % TAG_PALETTE.len();
    TAG_PALETTE[idx]
}

/// Default color for a new column
pub fn default_column_color() -> &'static str {
    COLUMN_PALETTE[0]
}

/// FNV-1a hash (32-bit) for short strings.
fn fnv1a(s: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in s.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_color_deterministic() {
        assert_eq!(auto_color("bug"), auto_color("bug"));
        assert_eq!(auto_color("Bug "), auto_color("bug"));
    }

    #[test]
    fn test_auto_color_from_palette() {
        for label in &["bug", "feature", "docs", "urgent", "low-priority", "v2"] {
            assert!(TAG_PALETTE.contains(&auto_color(label)));
        }
    }

    #[test]
    fn test_palette_coverage() {
        let mut seen = std::collections::HashSet::new();
        for i in 0..100 {
            seen.insert(auto_color(&format!("tag-{}", i)));
        }
        assert!(seen.len() >= 4, "Only hit {} palette entries", seen.len());
    }

    #[test]
    fn test_default_column_color() {
        assert_eq!(default_column_color(), "indigo");
    }
}
