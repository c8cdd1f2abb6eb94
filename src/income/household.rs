use once_cell::sync::Lazy;
use std::collections::HashMap;

static STANDARD: Lazy<HouseholdTypeMap> = Lazy::new(|| {
    HouseholdTypeMap::from_pairs([
        ("Households without children", "Households without children"),
        ("Persons living alone", "Single person"),
        ("Two adults without children", "Two adults without children"),
        (
            "Three or more adults without children",
            "Three+ adults without children",
        ),
        ("Households with children", "Households with children"),
        ("Lone parents", "Single parents"),
        ("Two adults with children", "Two adults with children"),
        (
            "Three or more adults with children",
            "Three+ adults with children",
        ),
        ("Total", "Total"),
    ])
});

/// Raw source label → display label. Unknown labels map to themselves.
#[derive(Debug, Clone, Default)]
pub struct HouseholdTypeMap {
    labels: HashMap<String, String>,
}

impl HouseholdTypeMap {
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            labels: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Trim `raw` and look it up.
    pub fn canonical<'a>(&'a self, raw: &'a str) -> &'a str {
        let raw = raw.trim();
        self.labels.get(raw).map(String::as_str).unwrap_or(raw)
    }
}
