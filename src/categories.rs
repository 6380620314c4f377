//! Report categories: the field paths found across a batch of payslips.

use crate::tree::FlatRecord;
use std::collections::BTreeMap;

/// Counts how many payslips carry each field path.
#[derive(Debug, Clone, Default)]
pub struct CategoryCounts {
    counts: BTreeMap<String, usize>,
    records: usize,
}

impl CategoryCounts {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every field path of one payslip.
    pub fn record(&mut self, fields: &FlatRecord) {
        for path in fields.keys() {
            *self.counts.entry(path.clone()).or_insert(0) += 1;
        }
        self.records += 1;
    }

    /// Number of payslips recorded.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Number of payslips carrying `path`.
    pub fn count(&self, path: &str) -> usize {
        self.counts.get(path).copied().unwrap_or(0)
    }

    /// Paths missing from at least one recorded payslip.
    pub fn incomplete(&self) -> Vec<&str> {
        self.counts
            .iter()
            .filter(|(_, count)| **count < self.records)
            .map(|(path, _)| path.as_str())
            .collect()
    }

    /// Returns all paths in report order; see [`order_categories`].
    pub fn ordered<S: AsRef<str>>(&self, prefixes: &[S]) -> Vec<String> {
        order_categories(self.counts.keys().cloned(), prefixes)
    }
}

/// Orders categories by priority prefix.
///
/// For each prefix in turn, the categories not yet taken that start with it
/// are appended in lexicographic order. Whatever no prefix claimed follows,
/// also sorted.
pub fn order_categories<I, S>(categories: I, prefixes: &[S]) -> Vec<String>
where
    I: IntoIterator<Item = String>,
    S: AsRef<str>,
{
    let mut remainder: Vec<String> = categories.into_iter().collect();
    let mut ordered = Vec::with_capacity(remainder.len());

    for prefix in prefixes {
        let (mut matching, rest): (Vec<String>, Vec<String>) = remainder
            .into_iter()
            .partition(|category| category.starts_with(prefix.as_ref()));
        matching.sort();
        ordered.append(&mut matching);
        remainder = rest;
    }

    remainder.sort();
    ordered.append(&mut remainder);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Value;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn record(paths: &[&str]) -> FlatRecord {
        paths
            .iter()
            .map(|path| (path.to_string(), Value::from("x")))
            .collect()
    }

    #[test]
    fn test_priority_groups_then_remainder() {
        let ordered = order_categories(strings(&["B.z", "A.y", "A.x", "C.c"]), &["A", "B"]);
        assert_eq!(ordered, strings(&["A.x", "A.y", "B.z", "C.c"]));
    }

    #[test]
    fn test_earlier_prefix_claims_first() {
        let ordered = order_categories(
            strings(&[".m.Tax Code", ".m.Pay Method", ".m.Pay Date", ".d.p.Bonus"]),
            &[".m.Pay Date", ".m.Pay", ".m.", ".d.p"],
        );
        assert_eq!(
            ordered,
            strings(&[".m.Pay Date", ".m.Pay Method", ".m.Tax Code", ".d.p.Bonus"])
        );
    }

    #[test]
    fn test_no_prefixes_sorts_everything() {
        let ordered = order_categories(strings(&["b", "a", "c"]), &[] as &[&str]);
        assert_eq!(ordered, strings(&["a", "b", "c"]));
    }

    #[test]
    fn test_counts_and_incomplete() {
        let mut counts = CategoryCounts::new();
        counts.record(&record(&[".m.Pay Date", ".d.p.Basic Salary"]));
        counts.record(&record(&[".m.Pay Date", ".d.p.Bonus"]));

        assert_eq!(counts.records(), 2);
        assert_eq!(counts.count(".m.Pay Date"), 2);
        assert_eq!(counts.count(".d.p.Bonus"), 1);
        assert_eq!(counts.count(".d.p.Overtime"), 0);
        assert_eq!(counts.incomplete(), vec![".d.p.Basic Salary", ".d.p.Bonus"]);
        assert_eq!(
            counts.ordered(&[".m."]),
            strings(&[".m.Pay Date", ".d.p.Basic Salary", ".d.p.Bonus"])
        );
    }
}
