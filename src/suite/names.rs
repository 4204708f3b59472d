// Spec name index - nested suite names with their spec descriptions

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::host::SuiteTreeNode;

/// Key under which a level lists its own spec descriptions
pub const SPECS_KEY: &str = "_";

/// Nested map from suite name to its specs and child suites.
///
/// Serializes as `{ "_": [specs...], "<child>": { ... } }` with children in
/// declaration order. The top level only carries `_` when it has specs of
/// its own; nested levels always do. A child suite literally named `_`
/// replaces the spec list in the output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecNameIndex {
    pub specs: Vec<String>,
    pub suites: Vec<(String, SpecNameIndex)>,
    nested: bool,
}

impl SpecNameIndex {
    /// Build the index for the whole declared tree
    pub fn collect(top_suite: &SuiteTreeNode) -> Self {
        let mut index = Self::default();
        index.collect_children(top_suite);
        index
    }

    fn collect_children(&mut self, suite: &SuiteTreeNode) {
        let Some(children) = &suite.children else {
            return;
        };

        for child in children {
            if child.is_suite() {
                let mut nested = Self {
                    nested: true,
                    ..Self::default()
                };
                nested.collect_children(child);
                self.insert_suite(child.description.clone(), nested);
            } else {
                self.specs.push(child.description.clone());
            }
        }
    }

    /// A later suite with the same name replaces the earlier one in place
    fn insert_suite(&mut self, name: String, index: SpecNameIndex) {
        match self.suites.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = index,
            None => self.suites.push((name, index)),
        }
    }

    /// Child index by suite name
    pub fn suite(&self, name: &str) -> Option<&SpecNameIndex> {
        self.suites
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, index)| index)
    }

    /// Total spec descriptions at this level and below
    pub fn spec_count(&self) -> usize {
        self.specs.len()
            + self
                .suites
                .iter()
                .map(|(_, index)| index.spec_count())
                .sum::<usize>()
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for SpecNameIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // A child suite named `_` takes the key over from the spec list.
        let shadowed = self.suite(SPECS_KEY).is_some();
        let with_specs = !shadowed && (self.nested || !self.specs.is_empty());
        let len = self.suites.len() + usize::from(with_specs);
        let mut map = serializer.serialize_map(Some(len))?;

        if with_specs {
            map.serialize_entry(SPECS_KEY, &self.specs)?;
        }
        for (name, index) in &self.suites {
            map.serialize_entry(name, index)?;
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collect_nested_names() {
        let tree = SuiteTreeNode::top(vec![
            SuiteTreeNode::suite(
                "one",
                vec![SuiteTreeNode::suite(
                    "nested",
                    vec![SuiteTreeNode::spec("should do something")],
                )],
            ),
            SuiteTreeNode::suite("two", vec![SuiteTreeNode::spec("should not do anything")]),
        ]);

        let index = SpecNameIndex::collect(&tree);

        assert_eq!(
            index.to_value(),
            json!({
                "one": {
                    "nested": { "_": ["should do something"] },
                    "_": []
                },
                "two": { "_": ["should not do anything"] }
            })
        );
        assert_eq!(index.spec_count(), 2);
    }

    #[test]
    fn test_top_level_specs_are_listed() {
        let tree = SuiteTreeNode::top(vec![
            SuiteTreeNode::spec("loose spec"),
            SuiteTreeNode::suite("suite", vec![]),
        ]);

        let index = SpecNameIndex::collect(&tree);

        assert_eq!(
            index.to_value(),
            json!({ "_": ["loose spec"], "suite": { "_": [] } })
        );
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let tree = SuiteTreeNode::top(vec![
            SuiteTreeNode::suite("zeta", vec![SuiteTreeNode::spec("b"), SuiteTreeNode::spec("a")]),
            SuiteTreeNode::suite("alpha", vec![]),
        ]);

        let index = SpecNameIndex::collect(&tree);
        let names: Vec<&str> = index.suites.iter().map(|(name, _)| name.as_str()).collect();

        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(
            index.suite("zeta").map(|s| s.specs.clone()),
            Some(vec!["b".to_string(), "a".to_string()])
        );

        let rendered = serde_json::to_string(&index).expect("serializable");
        assert!(rendered.find("zeta") < rendered.find("alpha"));
    }

    #[test]
    fn test_duplicate_suite_names_keep_last() {
        let tree = SuiteTreeNode::top(vec![
            SuiteTreeNode::suite("dup", vec![SuiteTreeNode::spec("first")]),
            SuiteTreeNode::suite("dup", vec![SuiteTreeNode::spec("second")]),
        ]);

        let index = SpecNameIndex::collect(&tree);

        assert_eq!(index.suites.len(), 1);
        assert_eq!(index.to_value(), json!({ "dup": { "_": ["second"] } }));
    }

    #[test]
    fn test_suite_named_like_specs_key() {
        let tree = SuiteTreeNode::top(vec![SuiteTreeNode::suite(
            "outer",
            vec![
                SuiteTreeNode::spec("own spec"),
                SuiteTreeNode::suite("_", vec![SuiteTreeNode::spec("x")]),
            ],
        )]);

        let index = SpecNameIndex::collect(&tree);
        let rendered = serde_json::to_string(&index).expect("serializable");

        assert_eq!(rendered, r#"{"outer":{"_":{"_":["x"]}}}"#);
        assert_eq!(index.suite("outer").map(|s| s.specs.len()), Some(1));
    }

    #[test]
    fn test_empty_tree() {
        let index = SpecNameIndex::collect(&SuiteTreeNode::top(vec![]));
        assert_eq!(index.to_value(), json!({}));
    }
}
