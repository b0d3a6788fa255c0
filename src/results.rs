use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Stable identifier of a node inside a [`CrawlTree`]
pub type NodeId = usize;

/// One crawled page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageNode {
    pub id: NodeId,

    /// Display title; not unique
    pub title: String,

    /// Absolute URL the page was fetched from
    pub url: String,

    /// Crawl depth, 1 for roots
    pub level: usize,

    /// Markdown fragment, None when no content region was found
    pub content: Option<String>,

    pub parent: Option<NodeId>,

    /// Child ids in discovery order
    pub children: Vec<NodeId>,
}

/// Forest of crawled pages stored in an arena.
///
/// Nodes are addressed by id, so pages sharing a title never overwrite each
/// other. Nodes are only ever appended.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CrawlTree {
    nodes: Vec<PageNode>,
    roots: Vec<NodeId>,
}

impl CrawlTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node under `parent` (or as a new root) and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not an id of this tree.
    pub fn insert(
        &mut self,
        parent: Option<NodeId>,
        title: String,
        url: String,
        content: Option<String>,
    ) -> NodeId {
        let id = self.nodes.len();
        let level = match parent {
            Some(p) => {
                let parent_node = &mut self.nodes[p];
                parent_node.children.push(id);
                parent_node.level + 1
            }
            None => {
                self.roots.push(id);
                1
            }
        };

        self.nodes.push(PageNode {
            id,
            title,
            url,
            level,
            content,
            parent,
            children: Vec::new(),
        });
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&PageNode> {
        self.nodes.get(id)
    }

    pub fn roots(&self) -> impl Iterator<Item = &PageNode> {
        let nodes = &self.nodes;
        self.roots.iter().map(move |&id| &nodes[id])
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &PageNode> {
        let nodes = &self.nodes;
        nodes
            .get(id)
            .into_iter()
            .flat_map(move |node| node.children.iter().map(move |&c| &nodes[c]))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in depth-first pre-order, each with its nesting depth (roots at 1)
    pub fn depth_first(&self) -> Vec<(&PageNode, usize)> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, usize)> = self.roots.iter().rev().map(|&id| (id, 1)).collect();

        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            order.push((node, depth));
            stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
        }

        order
    }

    /// Shape of the top-level pages, for the JSON debug summary
    pub fn summary(&self) -> Vec<RootSummary> {
        self.roots()
            .map(|root| RootSummary {
                title: root.title.clone(),
                url: root.url.clone(),
                level: root.level,
                children: self.children(root.id).map(|c| c.title.clone()).collect(),
            })
            .collect()
    }
}

/// A top-level page and the titles of its direct children
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootSummary {
    pub title: String,
    pub url: String,
    pub level: usize,
    pub children: Vec<String>,
}

/// Visited set and tree owned by one crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlState {
    pub visited: HashSet<String>,
    pub tree: CrawlTree,
    /// URLs whose fetch failed
    pub failed: Vec<String>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }
}
