use crate::domain::ProjectCoordinates;
use crate::error::{GitTimestampError, Result};
use std::collections::HashSet;

const EXPR_START: &str = "@{";
const EXPR_END: &str = "}";

/// Prefixes accepted in front of a placeholder name; `@{project.version}`,
/// `@{pom.version}` and `@{version}` all resolve to the same value.
const PLACEHOLDER_PREFIXES: [&str; 2] = ["project.", "pom."];

/// Default tag name format, `<artifactId>-<version>`
pub const DEFAULT_TAG_NAME_FORMAT: &str = "@{project.artifactId}-@{project.version}";

/// The set of tag names known when resolution starts.
///
/// Used purely as a membership oracle; ordering is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInventory {
    tags: HashSet<String>,
}

impl TagInventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        TagInventory::default()
    }

    /// Add a tag name, ignoring blank entries
    pub fn insert(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !tag.trim().is_empty() {
            self.tags.insert(tag);
        }
    }

    /// Whether a tag with exactly this name exists
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tag names in lexical order, for display
    pub fn sorted(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl<S: Into<String>> FromIterator<S> for TagInventory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut inventory = TagInventory::new();
        for tag in iter {
            inventory.insert(tag);
        }
        inventory
    }
}

/// Tag naming template (e.g., "@{project.artifactId}-@{project.version}", "v@{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNameTemplate {
    pub format: String,
}

impl Default for TagNameTemplate {
    fn default() -> Self {
        TagNameTemplate::new(DEFAULT_TAG_NAME_FORMAT)
    }
}

impl TagNameTemplate {
    /// Create a new tag name template
    pub fn new(format: impl Into<String>) -> Self {
        TagNameTemplate {
            format: format.into(),
        }
    }

    /// Render the tag name for a candidate version.
    ///
    /// Placeholder values are themselves interpolated, so a group id of
    /// `@{project.artifactId}` renders as the artifact id. A placeholder that
    /// refers back to itself, directly or through another value, is an error,
    /// as is any placeholder other than `artifactId`, `groupId` and `version`.
    /// An `@{` with no closing brace is copied through literally.
    ///
    /// # Example
    /// ```ignore
    /// let coords = ProjectCoordinates::new("com.example", "widget", "1-SNAPSHOT");
    /// let template = TagNameTemplate::default();
    /// assert_eq!(template.interpolate(&coords, "1.57")?, "widget-1.57");
    /// ```
    pub fn interpolate(&self, coords: &ProjectCoordinates, version: &str) -> Result<String> {
        let values = TemplateValues { coords, version };
        let mut resolving = Vec::new();
        render(&self.format, &values, &mut resolving).map_err(|reason| {
            GitTimestampError::template(format!(
                "Could not interpolate specified tag name format '{}': {}",
                self.format, reason
            ))
        })
    }
}

struct TemplateValues<'a> {
    coords: &'a ProjectCoordinates,
    version: &'a str,
}

impl TemplateValues<'_> {
    fn get(&self, name: &str) -> Option<&str> {
        match name {
            "artifactId" => Some(&self.coords.artifact_id),
            "groupId" => Some(&self.coords.group_id),
            "version" => Some(self.version),
            _ => None,
        }
    }
}

fn placeholder_name(expression: &str) -> &str {
    PLACEHOLDER_PREFIXES
        .iter()
        .find_map(|prefix| expression.strip_prefix(*prefix))
        .unwrap_or(expression)
}

fn render(
    text: &str,
    values: &TemplateValues<'_>,
    resolving: &mut Vec<String>,
) -> std::result::Result<String, String> {
    let mut rendered = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(EXPR_START) {
        rendered.push_str(&rest[..start]);
        let after_start = &rest[start + EXPR_START.len()..];
        let Some(end) = after_start.find(EXPR_END) else {
            rendered.push_str(&rest[start..]);
            return Ok(rendered);
        };

        let expression = &after_start[..end];
        let name = placeholder_name(expression);
        if resolving.iter().any(|active| active == name) {
            return Err(format!(
                "circular reference to '{}' (via {})",
                expression,
                resolving.join(" -> ")
            ));
        }
        let value = values
            .get(name)
            .ok_or_else(|| format!("unresolvable placeholder '{}'", expression))?;

        resolving.push(name.to_string());
        let value = render(value, values, resolving)?;
        resolving.pop();

        rendered.push_str(&value);
        rest = &after_start[end + EXPR_END.len()..];
    }

    rendered.push_str(rest);
    Ok(rendered)
}
