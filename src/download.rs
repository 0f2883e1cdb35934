use std::path::Path;
use std::time::Duration;
use std::{fs, io};

use crate::http::{FetchError, HttpFetch};

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("download error: {0}")]
    Fetch(#[from] FetchError),
    #[error("error writing {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Downloads `url` into `dest`, replacing it if present. Returns the number of bytes written
pub fn download_image<H: HttpFetch + ?Sized>(http: &H, url: &str, dest: &Path, timeout: Duration) -> Result<usize, DownloadError> {
    let bytes = http.get_bytes(url, timeout)?;

    if let Err(source) = fs::write(dest, &bytes) {
        // A partial file would mark the post as done on the next run
        let _ = fs::remove_file(dest);
        return Err(DownloadError::Write { path: dest.display().to_string(), source });
    }

    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    struct FakeImage(Result<Vec<u8>, u16>);

    impl HttpFetch for FakeImage {
        fn get_text(&self, _url: &str, _timeout: Duration) -> Result<String, FetchError> {
            unreachable!("images are fetched as bytes")
        }

        fn get_bytes(&self, url: &str, _timeout: Duration) -> Result<Vec<u8>, FetchError> {
            match self.0 {
                Ok(ref bytes) => Ok(bytes.clone()),
                Err(status) => Err(FetchError::Status { url: url.to_string(), status }),
            }
        }
    }

    #[test]
    fn test_download_overwrites() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let dest = dir.path().join("post.jpg");
        fs::write(&dest, b"old image, much longer than the new one")?;

        let http = FakeImage(Ok(vec![0xff, 0xd8, 0xff, 0xe0]));
        let written = download_image(&http, "https://cdn/x.jpg", &dest, Duration::from_secs(30))?;

        assert_eq!(written, 4);
        assert_eq!(fs::read(&dest)?, vec![0xff, 0xd8, 0xff, 0xe0]);
        Ok(())
    }

    #[test]
    fn test_fetch_error_leaves_no_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let dest = dir.path().join("post.jpg");

        let http = FakeImage(Err(403));
        let err = download_image(&http, "https://cdn/x.jpg", &dest, Duration::from_secs(30)).unwrap_err();

        assert!(matches!(err, DownloadError::Fetch(FetchError::Status { status: 403, .. })));
        assert!(!dest.exists());
        Ok(())
    }

    #[test]
    fn test_write_error() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let dest = dir.path().join("missing_dir").join("post.jpg");

        let http = FakeImage(Ok(vec![1, 2, 3]));
        let err = download_image(&http, "https://cdn/x.jpg", &dest, Duration::from_secs(30)).unwrap_err();

        assert!(matches!(err, DownloadError::Write { .. }));
        assert!(!dest.exists());
        Ok(())
    }
}
