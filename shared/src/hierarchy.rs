//! Hierarchy Builder
//!
//! Turns the flat employee list into a rooted forest keyed by the
//! id-based manager reference, and derives the per-node display view
//! (expansion, has-children, search highlight) from it.
//!
//! Construction is pure and synchronous; it is safe to rebuild on
//! every render. Malformed input never panics: employees with a
//! dangling manager reference, and employees trapped in a reference
//! cycle, are omitted from the forest and reported via [`OrgForest::orphaned`].

use crate::models::Employee;
use std::collections::{HashMap, HashSet};

/// One employee and its direct reports
#[derive(Debug, Clone, PartialEq)]
pub struct OrgNode {
    pub employee: Employee,
    pub children: Vec<OrgNode>,
}

impl OrgNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including self
    fn count(&self) -> usize {
        1 + self.children.iter().map(OrgNode::count).sum::<usize>()
    }
}

/// Structural forest over the employee list
#[derive(Debug, Clone, PartialEq)]
pub struct OrgForest {
    roots: Vec<OrgNode>,
    orphaned: Vec<String>,
}

impl OrgForest {
    /// Build the forest from a flat list.
    ///
    /// Roots are employees without a manager reference. Children are
    /// resolved through a single `managerId -> [children]` adjacency
    /// map, so construction is one pass plus one traversal. Sibling
    /// order is deterministic: sorted by role, input order on ties.
    pub fn build(employees: &[Employee]) -> Self {
        let mut children_of: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut root_idx: Vec<usize> = Vec::new();
        for (i, e) in employees.iter().enumerate() {
            match e.reporting_id.as_deref() {
                None => root_idx.push(i),
                Some(mgr) => children_of.entry(mgr).or_default().push(i),
            }
        }

        // Every id placed exactly once; guards duplicate ids and
        // malformed chains that would otherwise recurse forever.
        let mut placed: HashSet<&str> = HashSet::new();

        fn expand<'a>(
            idx: usize,
            employees: &'a [Employee],
            children_of: &HashMap<&'a str, Vec<usize>>,
            placed: &mut HashSet<&'a str>,
        ) -> Option<OrgNode> {
            let employee = &employees[idx];
            if !placed.insert(employee.id.as_str()) {
                return None;
            }
            let mut children: Vec<OrgNode> = children_of
                .get(employee.id.as_str())
                .into_iter()
                .flatten()
                .filter_map(|&c| expand(c, employees, children_of, placed))
                .collect();
            children.sort_by(|a, b| a.employee.role.cmp(&b.employee.role));
            Some(OrgNode {
                employee: employee.clone(),
                children,
            })
        }

        let mut roots: Vec<OrgNode> = root_idx
            .into_iter()
            .filter_map(|i| expand(i, employees, &children_of, &mut placed))
            .collect();
        roots.sort_by(|a, b| a.employee.role.cmp(&b.employee.role));

        // Anything not reachable from a root was either dangling
        // (manager id names nobody) or sits on a reference cycle.
        let orphaned: Vec<String> = employees
            .iter()
            .filter(|e| !placed.contains(e.id.as_str()))
            .map(|e| e.id.clone())
            .collect();
        if !orphaned.is_empty() {
            tracing::warn!(
                omitted = orphaned.len(),
                ids = ?orphaned,
                "employees omitted from hierarchy (dangling or cyclic manager reference)"
            );
        }

        Self { roots, orphaned }
    }

    pub fn roots(&self) -> &[OrgNode] {
        &self.roots
    }

    /// Ids excluded from the forest because their reference chain
    /// never reaches a root. Known-gap behavior: callers may surface
    /// these for data repair, the builder only logs them.
    pub fn orphaned(&self) -> &[String] {
        &self.orphaned
    }

    /// Number of employees placed in the forest
    pub fn len(&self) -> usize {
        self.roots.iter().map(OrgNode::count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Derive the display view for the current expansion state and
    /// search term.
    ///
    /// Highlight-only filtering: the node set is identical for any
    /// term; matches are flagged, never pruned. A non-empty term
    /// forces every node expanded so results stay visible while the
    /// user types.
    pub fn view(&self, expanded: &ExpansionState, search_term: &str) -> Vec<DisplayNode> {
        let needle = search_term.trim().to_lowercase();
        self.roots
            .iter()
            .map(|n| Self::display(n, expanded, &needle))
            .collect()
    }

    fn display(node: &OrgNode, expanded: &ExpansionState, needle: &str) -> DisplayNode {
        let search_active = !needle.is_empty();
        let is_expanded = search_active || expanded.is_expanded(&node.employee.id);
        let children = if is_expanded {
            node.children
                .iter()
                .map(|c| Self::display(c, expanded, needle))
                .collect()
        } else {
            Vec::new()
        };
        DisplayNode {
            has_children: node.has_children(),
            highlighted: search_active && matches_search(&node.employee, needle),
            expanded: is_expanded,
            employee: node.employee.clone(),
            children,
        }
    }
}

/// Case-insensitive substring match over name, surname and role.
/// `needle` must already be trimmed and lowercased.
fn matches_search(employee: &Employee, needle: &str) -> bool {
    employee.name.to_lowercase().contains(needle)
        || employee.surname.to_lowercase().contains(needle)
        || employee.role.to_lowercase().contains(needle)
}

/// Renderable node: children are materialized only when expanded,
/// `has_children` reflects the structural forest regardless.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayNode {
    pub employee: Employee,
    pub children: Vec<DisplayNode>,
    pub has_children: bool,
    pub highlighted: bool,
    pub expanded: bool,
}

/// Per-employee expansion tracking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-expand every employee in the list (`expandedByDefault`)
    pub fn all(employees: &[Employee]) -> Self {
        Self {
            expanded: employees.iter().map(|e| e.id.clone()).collect(),
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flip expansion for one employee
    pub fn toggle(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}
