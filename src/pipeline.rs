use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::{fmt, fs, thread};

use anyhow::{Context, Result};
use spdlog::{info, warn};

use crate::config::Config;
use crate::content::embed::EmbedScanner;
use crate::content::front_matter::{patch_file, PatchOutcome};
use crate::content::{EmbedId, Post};
use crate::download::download_image;
use crate::http::HttpFetch;
use crate::post_list::PostList;
use crate::thumbnail::{ResolveError, ThumbnailResolver};

/// What happened to a single post during a run
#[derive(Debug)]
pub enum PostOutcome {
    ReadFailed { reason: String },
    NoEmbed,
    ImageExists { image: PathBuf },
    ThumbnailNotFound { id: EmbedId },
    ResolveFailed { id: EmbedId, reason: String },
    DownloadFailed { id: EmbedId, reason: String },
    Downloaded { id: EmbedId, image: PathBuf, patch: PatchOutcome },
    /// The image was saved but the post could not be rewritten
    PatchFailed { id: EmbedId, image: PathBuf, reason: String },
}

impl PostOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self,
            PostOutcome::ReadFailed { .. }
            | PostOutcome::ResolveFailed { .. }
            | PostOutcome::DownloadFailed { .. }
            | PostOutcome::PatchFailed { .. })
    }
}

#[derive(Debug)]
pub struct PostReport {
    pub file_path: PathBuf,
    pub outcome: PostOutcome,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub posts: Vec<PostReport>,
}

impl RunReport {
    pub fn downloaded(&self) -> usize {
        self.count(|o| matches!(o, PostOutcome::Downloaded { .. } | PostOutcome::PatchFailed { .. }))
    }

    pub fn patched(&self) -> usize {
        self.count(|o| matches!(o, PostOutcome::Downloaded { patch: PatchOutcome::Patched, .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(PostOutcome::is_failure)
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o,
            PostOutcome::NoEmbed
            | PostOutcome::ImageExists { .. }
            | PostOutcome::ThumbnailNotFound { .. }))
    }

    fn count<F: Fn(&PostOutcome) -> bool>(&self, f: F) -> usize {
        self.posts.iter().filter(|p| f(&p.outcome)).count()
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} posts: {} images downloaded, {} posts updated, {} skipped, {} failed",
               self.posts.len(),
               self.downloaded(),
               self.patched(),
               self.skipped(),
               self.failed()
        )
    }
}

pub struct CoverPipeline<'a, H: HttpFetch> {
    config: &'a Config,
    http: H,
    scanner: EmbedScanner,
    resolver: ThumbnailResolver,
}

impl<'a, H: HttpFetch> CoverPipeline<'a, H> {
    pub fn new(config: &'a Config, http: H) -> Result<Self> {
        let scanner = EmbedScanner::new(&config.embed.shortcode)
            .with_context(|| format!("Invalid shortcode {}", config.embed.shortcode))?;
        let resolver = ThumbnailResolver::new(&config.embed, config.fetch.page_timeout());

        Ok(CoverPipeline {
            config,
            http,
            scanner,
            resolver,
        })
    }

    /// Where the cover of the post is saved on disk
    pub fn image_path(&self, stem: &str) -> PathBuf {
        self.config.paths.images_dir.join(self.image_file_name(stem))
    }

    /// Cover path written in the front matter
    pub fn image_url(&self, stem: &str) -> String {
        let prefix = self.config.paths.image_url_prefix.trim_end_matches('/');
        format!("{}/{}", prefix, self.image_file_name(stem))
    }

    fn image_file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.config.fetch.image_extension)
    }

    fn post_files(&self) -> Vec<PathBuf> {
        let post_list = PostList {
            root_dir: self.config.paths.content_dir.clone(),
            extension: self.config.paths.post_extension.clone(),
        };

        match post_list.retrieve_files() {
            Ok(files) => files,
            Err(e) => {
                warn!("Error listing posts in {}: {}", self.config.paths.content_dir.display(), e);
                vec![]
            }
        }
    }

    /// Processes every post in the content directory, one at a time.
    /// Only failing to create the images directory stops the run.
    pub fn run(&self) -> Result<RunReport> {
        let images_dir = &self.config.paths.images_dir;
        fs::create_dir_all(images_dir)
            .with_context(|| format!("Error creating images directory {}", images_dir.display()))?;

        info!("Scanning posts for {} embeds in {}", self.config.embed.shortcode, self.config.paths.content_dir.display());

        let delay = self.config.fetch.delay();
        let mut report = RunReport::default();

        for (i, file_path) in self.post_files().into_iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                thread::sleep(delay);
            }

            let outcome = self.process_post(&file_path);
            report.posts.push(PostReport { file_path, outcome });
        }

        Ok(report)
    }

    pub fn process_post(&self, file_path: &Path) -> PostOutcome {
        let post = match Post::from_file(file_path.to_path_buf()) {
            Ok(post) => post,
            Err(e) => {
                warn!("  Error reading {}: {}", file_path.display(), e);
                return PostOutcome::ReadFailed { reason: e.to_string() };
            }
        };

        let Some(id) = self.scanner.extract_id(&post.raw_content) else {
            info!("  Skipping {} (no {} embed)", post.stem, self.config.embed.shortcode);
            return PostOutcome::NoEmbed;
        };

        let image = self.image_path(&post.stem);
        if image.exists() {
            info!("  Skipping {} (image exists)", post.stem);
            return PostOutcome::ImageExists { image };
        }

        info!("  Processing {} (post: {})...", post.stem, id);

        let thumbnail_url = match self.resolver.resolve(&self.http, &id) {
            Ok(url) => url,
            Err(ResolveError::NoThumbnail { .. }) => {
                info!("    Could not find thumbnail URL");
                return PostOutcome::ThumbnailNotFound { id };
            }
            Err(e) => {
                warn!("    Error fetching {}: {}", id, e);
                return PostOutcome::ResolveFailed { id, reason: e.to_string() };
            }
        };

        info!("    Downloading thumbnail...");
        if let Err(e) = download_image(&self.http, &thumbnail_url, &image, self.config.fetch.image_timeout()) {
            warn!("    Download error: {}", e);
            return PostOutcome::DownloadFailed { id, reason: e.to_string() };
        }
        info!("    Saved to {}", image.display());

        match patch_file(&post.file_path, &self.image_url(&post.stem)) {
            Ok(patch) => PostOutcome::Downloaded { id, image, patch },
            Err(e) => {
                warn!("    Error updating front matter of {}: {}", post.file_path.display(), e);
                PostOutcome::PatchFailed { id, image, reason: e.to_string() }
            }
        }
    }
}
