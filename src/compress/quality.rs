//! Quality presets.
//!
//! Each preset maps to a starting image resolution and a Ghostscript
//! `-dPDFSETTINGS` distiller profile. Unknown values degrade to `High`
//! rather than failing the request.

/// Compression quality preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    /// 300 dpi, `/prepress` profile.
    High,
    /// 200 dpi, `/printer` profile.
    Medium,
    /// 150 dpi, `/ebook` profile.
    Low,
}

impl Quality {
    /// Parse a form value, case-insensitively. Anything unrecognised is
    /// treated as `High`.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "medium" => Quality::Medium,
            "low" => Quality::Low,
            _ => Quality::High,
        }
    }

    /// Starting image resolution for this preset.
    pub fn dpi(self) -> u32 {
        match self {
            Quality::High => 300,
            Quality::Medium => 200,
            Quality::Low => 150,
        }
    }

    /// Ghostscript distiller profile.
    pub fn pdf_settings(self) -> &'static str {
        match self {
            Quality::High => "/prepress",
            Quality::Medium => "/printer",
            Quality::Low => "/ebook",
        }
    }

    /// Canonical lowercase name, as echoed in the `X-Quality-Used` header.
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::High => "high",
            Quality::Medium => "medium",
            Quality::Low => "low",
        }
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality::High
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_map_to_dpi_and_profile() {
        assert_eq!(Quality::High.dpi(), 300);
        assert_eq!(Quality::High.pdf_settings(), "/prepress");
        assert_eq!(Quality::Medium.dpi(), 200);
        assert_eq!(Quality::Medium.pdf_settings(), "/printer");
        assert_eq!(Quality::Low.dpi(), 150);
        assert_eq!(Quality::Low.pdf_settings(), "/ebook");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Quality::parse("LOW"), Quality::Low);
        assert_eq!(Quality::parse("Medium"), Quality::Medium);
        assert_eq!(Quality::parse("high"), Quality::High);
    }

    #[test]
    fn unknown_values_degrade_to_high() {
        assert_eq!(Quality::parse("ultra"), Quality::High);
        assert_eq!(Quality::parse(""), Quality::High);
    }
}
