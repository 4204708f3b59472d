// Suite path tracker - rebuilds the suite nesting from flat start/done events

/// Index of a node inside the tracker arena
pub type NodeId = usize;

/// Label of a tracked suite node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuiteLabel {
    /// Synthetic root, never part of a reported path
    Root,
    Named(String),
}

/// A suite seen during the run
#[derive(Debug, Clone)]
pub struct SuiteNode {
    pub label: SuiteLabel,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl SuiteNode {
    /// Suite name, `None` for the synthetic root
    pub fn name(&self) -> Option<&str> {
        match &self.label {
            SuiteLabel::Root => None,
            SuiteLabel::Named(name) => Some(name),
        }
    }
}

/// Tracks the innermost open suite.
///
/// Nodes live in an arena and are linked by index. A closed suite stays in
/// the arena but is never visited again.
#[derive(Debug, Clone)]
pub struct SuitePathTracker {
    nodes: Vec<SuiteNode>,
    current: NodeId,
}

impl Default for SuitePathTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SuitePathTracker {
    const ROOT: NodeId = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![SuiteNode {
                label: SuiteLabel::Root,
                parent: None,
                children: Vec::new(),
            }],
            current: Self::ROOT,
        }
    }

    /// Open a child suite under the current one and descend into it
    pub fn suite_started(&mut self, name: &str) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(SuiteNode {
            label: SuiteLabel::Named(name.to_string()),
            parent: Some(self.current),
            children: Vec::new(),
        });
        self.nodes[self.current].children.push(id);
        self.current = id;
        id
    }

    /// Close the current suite if `name` matches it.
    ///
    /// Returns false and leaves the tracker untouched on a mismatch: a suite
    /// whose body was entirely disabled fires done without started.
    pub fn suite_done(&mut self, name: &str) -> bool {
        let node = &self.nodes[self.current];
        if node.name() != Some(name) {
            return false;
        }

        match node.parent {
            Some(parent) => {
                self.current = parent;
                true
            }
            None => false,
        }
    }

    /// Suite names from the outermost open suite to the innermost
    pub fn current_path(&self) -> Vec<String> {
        let mut path = Vec::with_capacity(self.depth());
        let mut cursor = self.current;

        while let Some(parent) = self.nodes[cursor].parent {
            if let Some(name) = self.nodes[cursor].name() {
                path.push(name.to_string());
            }
            cursor = parent;
        }

        path.reverse();
        path
    }

    /// Number of open suites
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.current;
        while let Some(parent) = self.nodes[cursor].parent {
            depth += 1;
            cursor = parent;
        }
        depth
    }

    /// Innermost open suite
    pub fn current(&self) -> &SuiteNode {
        &self.nodes[self.current]
    }

    pub fn node(&self, id: NodeId) -> Option<&SuiteNode> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> &SuiteNode {
        &self.nodes[Self::ROOT]
    }
}
