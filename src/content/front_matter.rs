use std::path::Path;
use std::{fs, io};

use spdlog::{debug, info};

const FENCE: &str = "---";
const COVER_KEY: &str = "cover:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Patched,
    /// A `cover:` entry is already present. Never overwritten
    CoverExists,
    /// The post has no `---` fenced front matter. Left untouched
    NoFrontMatter,
}

fn cover_block(image_path: &str) -> String {
    format!("\ncover:\n    image: \"{}\"\n    hidden: false", image_path)
}

/// Returns the content with a cover entry inserted right before the closing fence
/// of the front matter, or `None` if the content has no front matter.
pub fn insert_cover(content: &str, image_path: &str) -> Option<String> {
    let parts: Vec<&str> = content.splitn(3, FENCE).collect();
    if parts.len() < 3 {
        return None;
    }

    let (before, front_matter, body) = (parts[0], parts[1], parts[2]);
    Some(format!("{}{}{}{}\n{}{}", before, FENCE, front_matter, cover_block(image_path), FENCE, body))
}

pub fn has_cover(content: &str) -> bool {
    content.contains(COVER_KEY)
}

pub fn patch_content(content: &str, image_path: &str) -> (PatchOutcome, Option<String>) {
    if has_cover(content) {
        return (PatchOutcome::CoverExists, None);
    }

    match insert_cover(content, image_path) {
        Some(patched) => (PatchOutcome::Patched, Some(patched)),
        None => (PatchOutcome::NoFrontMatter, None),
    }
}

/// Adds a cover image to the front matter of the post, rewriting it in place
pub fn patch_file(post_path: &Path, image_path: &str) -> io::Result<PatchOutcome> {
    let content = fs::read_to_string(post_path)?;

    let (outcome, patched) = patch_content(&content, image_path);
    match outcome {
        PatchOutcome::Patched => {
            if let Some(patched) = patched {
                fs::write(post_path, patched)?;
            }
            info!("    Updated front matter");
        }
        PatchOutcome::CoverExists => info!("    Cover already exists, skipping"),
        PatchOutcome::NoFrontMatter => debug!("No front matter in {}", post_path.display()),
    }

    Ok(outcome)
}
