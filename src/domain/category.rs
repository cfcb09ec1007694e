use std::collections::{HashMap, HashSet};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Domain representation of a hierarchical product category belonging to a hub.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Optional identifier of the parent category when building a tree.
    pub parent_id: Option<i32>,
    /// Human-readable name of the category, unique within the hub.
    pub name: String,
    /// URL identifier derived from the name, unique within the hub.
    pub slug: String,
    /// Optional description that expands upon the category name.
    pub description: Option<String>,
    /// Timestamp for when the category record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the category record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category for a hub.
///
/// The slug is not part of the payload; the repository derives it from the
/// name when the row is written.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Optional identifier of the parent category when building a tree.
    pub parent_id: Option<i32>,
    /// Human-readable name of the category.
    pub name: String,
    /// Optional description that expands upon the category name.
    pub description: Option<String>,
    /// Timestamp captured when the category payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewCategory {
    /// Build a new category payload with the supplied details and current timestamp.
    pub fn new(hub_id: i32, name: impl Into<String>) -> Self {
        let now = Local::now().naive_utc();
        Self {
            hub_id,
            parent_id: None,
            name: name.into(),
            description: None,
            updated_at: now,
        }
    }

    /// Attach a parent identifier to the category payload.
    pub fn with_parent_id(mut self, parent_id: i32) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Attach a descriptive text to the category payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Patch data applied when renaming an existing category.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    /// Updated name for the category; the slug is re-derived from it.
    pub name: String,
    /// New description value; `None` clears the description.
    pub description: Option<String>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateCategory {
    /// Build a category update payload with the supplied values.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Node representation of a category and its children for tree traversal.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CategoryTreeNode {
    /// Category data represented by this node.
    pub category: Category,
    /// Children that belong to this node, ordered by name.
    pub children: Vec<CategoryTreeNode>,
}

impl CategoryTreeNode {
    /// Create a new category tree node with no children.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            children: Vec::new(),
        }
    }

    /// Attach a collection of children to the node.
    pub fn with_children(mut self, children: impl Into<Vec<CategoryTreeNode>>) -> Self {
        self.children = children.into();
        self
    }
}

/// Build the forest of categories, ordering siblings by name.
///
/// Categories whose parent is missing from `categories` are treated as roots
/// so a partial listing still renders.
pub fn build_category_tree(categories: &[Category]) -> Vec<CategoryTreeNode> {
    let known: HashSet<i32> = categories.iter().map(|category| category.id).collect();
    let mut children_by_parent: HashMap<Option<i32>, Vec<&Category>> = HashMap::new();

    for category in categories {
        let parent = category.parent_id.filter(|parent| known.contains(parent));
        children_by_parent.entry(parent).or_default().push(category);
    }

    for children in children_by_parent.values_mut() {
        children.sort_by(|a, b| a.name.cmp(&b.name));
    }

    fn build_branch(
        parent_id: Option<i32>,
        grouped: &HashMap<Option<i32>, Vec<&Category>>,
    ) -> Vec<CategoryTreeNode> {
        match grouped.get(&parent_id) {
            Some(children) => children
                .iter()
                .map(|category| {
                    let sub_tree = build_branch(Some(category.id), grouped);
                    CategoryTreeNode::new((*category).clone()).with_children(sub_tree)
                })
                .collect(),
            None => Vec::new(),
        }
    }

    build_branch(None, &children_by_parent)
}

/// Chain of categories from the root down to `category_id`.
///
/// Returns an empty list when the category is unknown.
pub fn category_path(categories: &[Category], category_id: i32) -> Vec<Category> {
    let by_id: HashMap<i32, &Category> = categories
        .iter()
        .map(|category| (category.id, category))
        .collect();

    let mut path = Vec::new();
    let mut visited = HashSet::new();
    let mut current = by_id.get(&category_id).copied();

    while let Some(category) = current {
        if !visited.insert(category.id) {
            break;
        }
        path.push(category.clone());
        current = category.parent_id.and_then(|parent| by_id.get(&parent).copied());
    }

    path.reverse();
    path
}

/// Identifiers of `category_id` and every category beneath it.
pub fn descendant_ids(categories: &[Category], category_id: i32) -> Vec<i32> {
    let mut children_by_parent: HashMap<i32, Vec<i32>> = HashMap::new();
    for category in categories {
        if let Some(parent) = category.parent_id {
            children_by_parent.entry(parent).or_default().push(category.id);
        }
    }

    let mut result = Vec::new();
    let mut seen = HashSet::new();
    let mut stack = vec![category_id];

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        result.push(id);
        if let Some(children) = children_by_parent.get(&id) {
            stack.extend(children.iter().copied());
        }
    }

    result.sort_unstable();
    result
}
