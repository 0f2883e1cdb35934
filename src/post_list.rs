use std::{fs, io};
use std::path::PathBuf;

pub struct PostList {
    pub root_dir: PathBuf,
    /// Extension of the post files, without the dot
    pub extension: String,
}

impl PostList {
    /// Lists the post files directly inside `root_dir`, sorted by name
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let suffix = format!(".{}", self.extension);
        let mut posts = vec![];
        let entries = fs::read_dir(self.root_dir.as_path())?;
        for entry in entries {
            if let Ok(entry) = entry {
                if let Ok(file_type) = entry.file_type() {
                    if !file_type.is_file() {
                        continue;
                    }
                    let file_name = entry.file_name();
                    if let Some(file_name) = file_name.to_str() {
                        if file_name.ends_with(&suffix) {
                            posts.push(entry.path());
                        }
                    }
                }
            }
        }
        posts.sort();
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir, write};

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_only_post_files() -> io::Result<()> {
        let dir = TempDir::new()?;
        write(dir.path().join("b_post.md"), "b")?;
        write(dir.path().join("a_post.md"), "a")?;
        write(dir.path().join("notes.txt"), "not a post")?;
        write(dir.path().join("md"), "no extension")?;
        create_dir(dir.path().join("folder.md"))?;

        let post_list = PostList { root_dir: dir.path().to_path_buf(), extension: "md".to_string() };
        let files = post_list.retrieve_files()?;

        assert_eq!(files, vec![dir.path().join("a_post.md"), dir.path().join("b_post.md")]);
        Ok(())
    }

    #[test]
    fn test_missing_dir() {
        let post_list = PostList { root_dir: PathBuf::from("/no/such/posts/dir"), extension: "md".to_string() };
        assert!(post_list.retrieve_files().is_err());
    }
}
