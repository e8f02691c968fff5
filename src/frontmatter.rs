use serde::Deserialize;
use std::collections::BTreeMap;

/// YAML header of a guide page
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GuideFrontmatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Parse the `---` fenced YAML block at the start of a markdown document.
///
/// Documents without a header, or with one that isn't valid YAML, yield an
/// empty frontmatter.
pub fn extract_frontmatter(markdown: &str) -> GuideFrontmatter {
    frontmatter_block(markdown)
        .and_then(|yaml| serde_yaml::from_str::<Option<GuideFrontmatter>>(yaml).ok())
        .flatten()
        .unwrap_or_default()
}

fn frontmatter_block(markdown: &str) -> Option<&str> {
    let markdown = markdown.strip_prefix('\u{feff}').unwrap_or(markdown);
    let mut lines = markdown.split_inclusive('\n');
    if lines.next()?.trim_end() != "---" {
        return None;
    }

    let start = markdown.find('\n')? + 1;
    let mut offset = start;
    for line in lines {
        if line.trim_end() == "---" {
            return Some(&markdown[start..offset]);
        }
        offset += line.len();
    }
    None
}
