//! Parsers for the parts of an Obsidian note that property application
//! reads: the frontmatter block and inline tags.

pub mod frontmatter;
pub mod tag;

pub use frontmatter::{
    parse_frontmatter, render_frontmatter, replace_frontmatter, split_frontmatter,
    FrontmatterSplit,
};
pub use tag::parse_inline_tags;
