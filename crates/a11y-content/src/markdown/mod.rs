//! Markdown primitives used by the pattern and rule mappers.
//!
//! - [`frontmatter`]: `---`-delimited YAML metadata
//! - [`blocks`]: heading segments, bullet lists, fenced code blocks

pub mod blocks;
pub mod frontmatter;

pub use blocks::{
    FencedBlock, HeadingPattern, Segment, find_all_fenced_blocks, find_first_fenced_block,
    normalize_heading_label, split_by_heading, to_bullet_list,
};
pub use frontmatter::{FrontmatterResult, extract_frontmatter, scalar_str, string_list};
