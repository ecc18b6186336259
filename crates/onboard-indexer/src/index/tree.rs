//! Text file tree rendering.

use std::collections::BTreeMap;
use tracing::debug;

/// Placeholder rendered when there are no files.
pub const EMPTY_TREE: &str = "(no files)";

/// A node in the path tree. Files are leaves and never hold children.
#[derive(Debug)]
enum PathNode {
    File,
    Dir(BTreeMap<String, PathNode>),
}

/// Builds the nested path mapping and renders it as an ASCII tree.
#[derive(Debug, Default)]
pub struct FileTree {
    root: BTreeMap<String, PathNode>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from slash-separated relative paths.
    pub fn from_paths<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tree = Self::new();
        for path in paths {
            tree.insert(path);
        }
        tree
    }

    /// Insert a file path.
    ///
    /// A path that would need an existing file leaf as its directory is
    /// dropped; on a real file system such a pair cannot occur.
    pub fn insert(&mut self, rel_path: &str) {
        let parts: Vec<&str> = rel_path.split('/').filter(|p| !p.is_empty()).collect();
        let Some((file_name, dirs)) = parts.split_last() else {
            return;
        };

        let mut level = &mut self.root;
        for dir in dirs {
            let node = level
                .entry((*dir).to_string())
                .or_insert_with(|| PathNode::Dir(BTreeMap::new()));
            level = match node {
                PathNode::Dir(children) => children,
                PathNode::File => {
                    debug!(path = rel_path, "Path descends through a file; skipped");
                    return;
                }
            };
        }
        level
            .entry((*file_name).to_string())
            .or_insert(PathNode::File);
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Render depth-first with sorted siblings and box-drawing connectors.
    /// Directories carry a trailing `/`.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return EMPTY_TREE.to_string();
        }
        let mut lines = Vec::new();
        render_level(&self.root, "", &mut lines);
        lines.join("\n")
    }
}

fn render_level(level: &BTreeMap<String, PathNode>, prefix: &str, lines: &mut Vec<String>) {
    let count = level.len();
    for (i, (name, node)) in level.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "└── " } else { "├── " };
        match node {
            PathNode::File => lines.push(format!("{}{}{}", prefix, connector, name)),
            PathNode::Dir(children) => {
                lines.push(format!("{}{}{}/", prefix, connector, name));
                let extension = if is_last { "    " } else { "│   " };
                render_level(children, &format!("{}{}", prefix, extension), lines);
            }
        }
    }
}
