use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum lookback window, one week in hours.
pub const MAX_LOOKBACK_HOURS: u32 = 168;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BriefError {
    #[error("brand name must not be empty")]
    EmptyBrand,

    #[error("lookback_hours must be between 1 and {MAX_LOOKBACK_HOURS}, got {0}")]
    InvalidLookback(u32),
}

/// The monitoring input form: what to track and over which window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorBrief {
    pub brand: String,
    #[serde(default)]
    pub competitors: Vec<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub campaign_messages: Vec<String>,
    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: u32,
}

fn default_lookback_hours() -> u32 {
    24
}

impl MonitorBrief {
    /// Validate and normalize a brief: trims the brand and both lists,
    /// drops empty entries, and removes duplicate competitors.
    ///
    /// # Errors
    ///
    /// Returns [`BriefError`] when the brand is blank or the lookback
    /// window is outside `1..=168` hours.
    pub fn new(
        brand: &str,
        competitors: Vec<String>,
        industry: Option<String>,
        campaign_messages: Vec<String>,
        lookback_hours: u32,
    ) -> Result<Self, BriefError> {
        let brand = brand.trim().to_string();
        if brand.is_empty() {
            return Err(BriefError::EmptyBrand);
        }
        if lookback_hours == 0 || lookback_hours > MAX_LOOKBACK_HOURS {
            return Err(BriefError::InvalidLookback(lookback_hours));
        }

        let mut seen = std::collections::HashSet::new();
        let competitors: Vec<String> = competitors
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty() && *c != brand && seen.insert(c.to_lowercase()))
            .collect();

        let campaign_messages: Vec<String> = campaign_messages
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();

        let industry = industry
            .map(|i| i.trim().to_lowercase())
            .filter(|i| !i.is_empty());

        Ok(Self {
            brand,
            competitors,
            industry,
            campaign_messages,
            lookback_hours,
        })
    }

    /// Re-run validation on an already-deserialized brief (API input path).
    ///
    /// # Errors
    ///
    /// Same conditions as [`MonitorBrief::new`].
    pub fn validated(self) -> Result<Self, BriefError> {
        Self::new(
            &self.brand,
            self.competitors,
            self.industry,
            self.campaign_messages,
            self.lookback_hours,
        )
    }

    /// Brand plus competitors, brand first.
    #[must_use]
    pub fn tracked_brands(&self) -> Vec<String> {
        let mut all = Vec::with_capacity(1 + self.competitors.len());
        all.push(self.brand.clone());
        all.extend(self.competitors.iter().cloned());
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_dedups_competitors() {
        let brief = MonitorBrief::new(
            "  BrandX ",
            vec![
                " Rival ".to_string(),
                "rival".to_string(),
                String::new(),
                "Other".to_string(),
            ],
            None,
            vec![],
            24,
        )
        .expect("valid brief");
        assert_eq!(brief.brand, "BrandX");
        assert_eq!(brief.competitors, vec!["Rival", "Other"]);
    }

    #[test]
    fn competitor_equal_to_brand_is_dropped() {
        let brief = MonitorBrief::new("BrandX", vec!["BrandX".to_string()], None, vec![], 24)
            .expect("valid brief");
        assert!(brief.competitors.is_empty());
    }

    #[test]
    fn empty_brand_is_rejected() {
        let err = MonitorBrief::new("  ", vec![], None, vec![], 24).unwrap_err();
        assert_eq!(err, BriefError::EmptyBrand);
    }

    #[test]
    fn lookback_bounds_are_enforced() {
        assert_eq!(
            MonitorBrief::new("B", vec![], None, vec![], 0).unwrap_err(),
            BriefError::InvalidLookback(0)
        );
        assert_eq!(
            MonitorBrief::new("B", vec![], None, vec![], 169).unwrap_err(),
            BriefError::InvalidLookback(169)
        );
        assert!(MonitorBrief::new("B", vec![], None, vec![], 168).is_ok());
    }

    #[test]
    fn industry_is_lowercased() {
        let brief = MonitorBrief::new("B", vec![], Some(" Tech ".to_string()), vec![], 24)
            .expect("valid brief");
        assert_eq!(brief.industry.as_deref(), Some("tech"));
    }

    #[test]
    fn tracked_brands_puts_brand_first() {
        let brief = MonitorBrief::new("B", vec!["C".to_string()], None, vec![], 24)
            .expect("valid brief");
        assert_eq!(brief.tracked_brands(), vec!["B", "C"]);
    }
}
