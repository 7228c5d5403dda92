use serde::{Deserialize, Serialize};

/// Row that survived normalization in Industry layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndustryRow {
    pub node_id: String,
    pub parent_id: Option<String>,
    pub description: String,
    pub url: String,
    pub tooltip: String,
    pub display_name: Option<String>,
}

impl IndustryRow {
    /// Identity used for the node: the display override when present.
    pub fn identity(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.node_id)
    }
}

/// Row that survived normalization in Country layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountryRow {
    pub node_id: String,
    pub category: String,
    pub description: String,
    pub url: String,
    pub country: Option<String>,
    pub tooltip: String,
    pub country_display_name: Option<String>,
}

/// Zero-based column positions for the Industry layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryColumns {
    pub node_id: usize,
    pub parent_id: usize,
    pub description: usize,
    pub url: usize,
    pub tooltip: usize,
    pub display_name: Option<usize>,
}

impl Default for IndustryColumns {
    fn default() -> Self {
        Self {
            node_id: 0,
            parent_id: 1,
            description: 2,
            url: 3,
            tooltip: 7,
            display_name: Some(11),
        }
    }
}

impl IndustryColumns {
    pub fn normalize(&self, row: &[String]) -> Option<IndustryRow> {
        let node_id = optional(row, self.node_id)?;
        Some(IndustryRow {
            node_id,
            parent_id: optional(row, self.parent_id),
            description: text(row, self.description),
            url: text(row, self.url),
            tooltip: text(row, self.tooltip),
            display_name: self.display_name.and_then(|column| optional(row, column)),
        })
    }
}

/// Zero-based column positions for the Country layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryColumns {
    pub node_id: usize,
    pub category: usize,
    pub description: usize,
    pub url: usize,
    pub country: usize,
    pub tooltip: usize,
    pub country_display_name: Option<usize>,
}

impl Default for CountryColumns {
    fn default() -> Self {
        Self {
            node_id: 0,
            category: 1,
            description: 2,
            url: 3,
            country: 4,
            tooltip: 7,
            country_display_name: Some(12),
        }
    }
}

impl CountryColumns {
    pub fn normalize(&self, row: &[String]) -> Option<CountryRow> {
        let node_id = optional(row, self.node_id)?;
        Some(CountryRow {
            node_id,
            category: text(row, self.category),
            description: text(row, self.description),
            url: text(row, self.url),
            country: optional(row, self.country),
            tooltip: text(row, self.tooltip),
            country_display_name: self
                .country_display_name
                .and_then(|column| optional(row, column)),
        })
    }
}

/// Normalized rows of one dataset plus how many data rows were dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalized<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

/// Drops the header row, then normalizes every data row with `normalize`.
pub fn normalize_rows<T>(
    raw: &[Vec<String>],
    normalize: impl Fn(&[String]) -> Option<T>,
) -> Normalized<T> {
    let mut rows = Vec::with_capacity(raw.len().saturating_sub(1));
    let mut skipped = 0usize;

    for (index, row) in raw.iter().enumerate().skip(1) {
        match normalize(row) {
            Some(record) => rows.push(record),
            None => {
                tracing::debug!(row = index, "skipping row without node id");
                skipped += 1;
            }
        }
    }

    Normalized { rows, skipped }
}

fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(|value| value.trim()).unwrap_or("")
}

fn text(row: &[String], column: usize) -> String {
    cell(row, column).to_owned()
}

fn optional(row: &[String], column: usize) -> Option<String> {
    let value = cell(row, column);
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| (*cell).to_owned()).collect()
    }

    #[test]
    fn industry_row_reads_default_columns() {
        let raw = row(&[
            "acme", "tools", "makes things", "https://acme.test", "", "", "", "hello", "", "", "",
            "ACME Corp",
        ]);
        let record = IndustryColumns::default().normalize(&raw).unwrap();
        assert_eq!(
            record,
            IndustryRow {
                node_id: "acme".into(),
                parent_id: Some("tools".into()),
                description: "makes things".into(),
                url: "https://acme.test".into(),
                tooltip: "hello".into(),
                display_name: Some("ACME Corp".into()),
            }
        );
        assert_eq!(record.identity(), "ACME Corp");
    }

    #[test]
    fn short_rows_fill_defaults() {
        let record = IndustryColumns::default().normalize(&row(&["solo"])).unwrap();
        assert_eq!(record.identity(), "solo");
        assert_eq!(record.parent_id, None);
        assert_eq!(record.tooltip, "");
        assert_eq!(record.url, "");
    }

    #[test]
    fn blank_identity_is_skipped() {
        let columns = IndustryColumns::default();
        assert_eq!(columns.normalize(&row(&["", "parent"])), None);
        assert_eq!(columns.normalize(&row(&["   ", "parent"])), None);
        assert_eq!(columns.normalize(&[]), None);
    }

    #[test]
    fn country_row_reads_default_columns() {
        let raw = row(&[
            "X", "Cat1", "", "", "USA", "", "", "tip", "", "", "", "", "United States",
        ]);
        let record = CountryColumns::default().normalize(&raw).unwrap();
        assert_eq!(record.node_id, "X");
        assert_eq!(record.category, "Cat1");
        assert_eq!(record.country.as_deref(), Some("USA"));
        assert_eq!(record.tooltip, "tip");
        assert_eq!(record.country_display_name.as_deref(), Some("United States"));
    }

    #[test]
    fn custom_columns_are_honored() {
        let columns = IndustryColumns {
            node_id: 1,
            parent_id: 0,
            description: 2,
            url: 3,
            tooltip: 4,
            display_name: None,
        };
        let record = columns.normalize(&row(&["root", "leaf", "", "", "tip", "x"])).unwrap();
        assert_eq!(record.node_id, "leaf");
        assert_eq!(record.parent_id.as_deref(), Some("root"));
        assert_eq!(record.tooltip, "tip");
        assert_eq!(record.display_name, None);
    }

    #[test]
    fn header_row_is_never_data() {
        let raw = vec![row(&["Node", "Parent"]), row(&["A"]), row(&[""]), row(&["B", "A"])];
        let normalized = normalize_rows(&raw, |r| IndustryColumns::default().normalize(r));
        assert_eq!(normalized.skipped, 1);
        let ids = normalized
            .rows
            .iter()
            .map(|r| r.node_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["A", "B"]);
    }
}
