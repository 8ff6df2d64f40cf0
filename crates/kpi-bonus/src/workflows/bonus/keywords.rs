/// Keywords marking a KPI name as a cost metric when a division configures none.
pub const DEFAULT_COST_KEYWORDS: [&str; 5] = ["biaya", "cost", "spend", "ads", "iklan"];

/// Lower-cased substrings that classify a KPI name as a cost metric.
///
/// Matching is case-insensitive substring containment; keyword order never changes the
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostKeywords {
    keywords: Vec<String>,
}

impl CostKeywords {
    /// Cleans a division's custom list, falling back to the defaults when nothing usable
    /// remains.
    pub fn from_custom<I, S>(custom: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = custom
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();

        if keywords.is_empty() {
            Self::default()
        } else {
            Self { keywords }
        }
    }

    pub fn is_cost(&self, kpi_name: &str) -> bool {
        let name = kpi_name.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| name.contains(keyword.as_str()))
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for CostKeywords {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_COST_KEYWORDS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_custom_list_uses_defaults() {
        let keywords = CostKeywords::from_custom(Vec::<String>::new());
        assert_eq!(keywords, CostKeywords::default());
        assert!(keywords.is_cost("Efisiensi Biaya Iklan Shopee"));
    }

    #[test]
    fn blank_entries_are_dropped_before_fallback() {
        let keywords = CostKeywords::from_custom(["  ", ""]);
        assert_eq!(keywords.keywords().len(), DEFAULT_COST_KEYWORDS.len());

        let custom = CostKeywords::from_custom([" Pengeluaran ", ""]);
        assert_eq!(custom.keywords(), ["pengeluaran".to_string()]);
    }

    #[test]
    fn custom_list_replaces_defaults() {
        let keywords = CostKeywords::from_custom(["Budget"]);
        assert!(keywords.is_cost("Marketing BUDGET"));
        assert!(!keywords.is_cost("Biaya Iklan"));
    }

    #[test]
    fn keyword_order_does_not_matter() {
        let forward = CostKeywords::from_custom(["spend", "biaya"]);
        let reverse = CostKeywords::from_custom(["biaya", "spend"]);
        for name in ["Ad Spend", "Biaya Operasional", "Omset"] {
            assert_eq!(forward.is_cost(name), reverse.is_cost(name));
        }
    }
}
