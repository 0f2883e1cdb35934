use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::{fmt, fs, io};

pub mod embed;
pub mod front_matter;

/// A post file as read from the content directory
pub struct Post {
    pub file_path: PathBuf,
    /// File name without extension. Names the downloaded cover image
    pub stem: String,
    pub raw_content: String,
}

impl Post {
    pub fn from_file(file_path: PathBuf) -> io::Result<Post> {
        let stem = match file_path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_string(),
            None => return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("Post file name is not valid UTF-8: {}", file_path.display()))),
        };

        let raw_content = fs::read_to_string(&file_path)?;

        Ok(Post {
            file_path,
            stem,
            raw_content,
        })
    }
}

/// Identifier of the external post referenced by the embed shortcode
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct EmbedId(pub String);

impl EmbedId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EmbedId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
