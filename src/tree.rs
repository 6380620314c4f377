//! Nested payslip values and their flattened form.
//!
//! A parsed payslip is a tree of labeled branches whose leaves are text or
//! amounts. Reports address each leaf by its dotted path from the root, e.g.
//! `.m.Pay Date` or `.d.p.Basic Salary`.

use crate::amount::Amount;
use std::collections::BTreeMap;
use std::fmt;

/// Leaf paths mapped to their values, one per payslip.
pub type FlatRecord = BTreeMap<String, Value>;

/// A leaf value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Free text, e.g. a metadata value
    Text(String),

    /// A currency amount
    Amount(Amount),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Amount(amount) => fmt::Display::fmt(amount, f),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<Amount> for Value {
    fn from(amount: Amount) -> Self {
        Value::Amount(amount)
    }
}

/// A node of the payslip tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Value),
    Branch(BTreeMap<String, Node>),
}

impl Node {
    /// Builds a branch from `(key, child)` pairs.
    pub fn branch<K, I>(children: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Node::Branch(
            children
                .into_iter()
                .map(|(key, child)| (key.into(), child))
                .collect(),
        )
    }

    /// Builds a branch of leaves from `(key, value)` pairs.
    pub fn leaves<K, V, I>(values: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Node::branch(
            values
                .into_iter()
                .map(|(key, value)| (key, Node::Leaf(value.into()))),
        )
    }

    /// Flattens the tree into leaf paths.
    ///
    /// Each path joins the keys from the root with `.`, starting with a
    /// leading `.`. Empty branches contribute nothing.
    pub fn flatten(&self) -> FlatRecord {
        let mut flat = FlatRecord::new();
        self.flatten_into(&mut String::new(), &mut flat);
        flat
    }

    fn flatten_into(&self, path: &mut String, flat: &mut FlatRecord) {
        match self {
            Node::Leaf(value) => {
                flat.insert(path.clone(), value.clone());
            }
            Node::Branch(children) => {
                for (key, child) in children {
                    let len = path.len();
                    path.push('.');
                    path.push_str(key);
                    child.flatten_into(path, flat);
                    path.truncate(len);
                }
            }
        }
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match self {
            Node::Leaf(value) => writeln!(f, "{:indent$}{}", "", value),
            Node::Branch(children) => {
                for (key, child) in children {
                    writeln!(f, "{:indent$}{}:", "", key)?;
                    child.write_outline(f, indent + 4)?;
                }
                Ok(())
            }
        }
    }
}

/// Indented outline of the tree, one label per line with nested values
/// four spaces deeper.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amount(s: &str) -> Value {
        Value::Amount(Amount::from_str(s).unwrap())
    }

    #[test]
    fn test_flatten_nested_record() {
        let tree = Node::branch([
            ("m", Node::leaves([("x", amount("1"))])),
            (
                "d",
                Node::branch([("p", Node::leaves([("y", amount("2"))]))]),
            ),
        ]);

        let flat = tree.flatten();
        let expected: FlatRecord = [
            (".m.x".to_string(), amount("1")),
            (".d.p.y".to_string(), amount("2")),
        ]
        .into_iter()
        .collect();
        assert_eq!(flat, expected);
    }

    #[test]
    fn test_flatten_keeps_spaces_in_labels() {
        let tree = Node::branch([("m", Node::leaves([("Pay Date", "30/04/2019")]))]);
        let flat = tree.flatten();
        assert_eq!(flat[".m.Pay Date"], Value::from("30/04/2019"));
    }

    #[test]
    fn test_flatten_skips_empty_branches() {
        let tree = Node::branch([
            ("et", Node::Branch(BTreeMap::new())),
            ("t", Node::leaves([("Net Pay", amount("10"))])),
        ]);
        let flat = tree.flatten();
        assert_eq!(flat.len(), 1);
        assert!(flat.contains_key(".t.Net Pay"));
    }

    #[test]
    fn test_outline_display() {
        let tree = Node::branch([("m", Node::leaves([("Pay Date", "30/04/2019")]))]);
        assert_eq!(tree.to_string(), "m:\n    Pay Date:\n        30/04/2019\n");
    }
}
