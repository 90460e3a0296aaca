use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::{
    assets::{
        decode::decode_frame,
        frame_set::{DecodedFrame, FrameSet},
        naming::normalize_rel_path,
    },
    foundation::error::{AniError, AniResult, LoadError},
};

/// Where frame bytes come from.
///
/// Implementations are called concurrently from the decode pool.
pub trait FrameSource: Sync {
    /// Fetch the encoded bytes behind `url`.
    fn fetch(&self, url: &str) -> AniResult<Vec<u8>>;
}

/// Reads frame URLs as paths relative to a root directory.
///
/// A leading `/` is treated as the root itself, so `/hero/a_000.jpg` resolves to
/// `<root>/hero/a_000.jpg`.
#[derive(Clone, Debug)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path for `url`.
    pub fn resolve(&self, url: &str) -> AniResult<PathBuf> {
        let norm = normalize_rel_path(url.trim_start_matches('/'))?;
        Ok(self.root.join(Path::new(&norm)))
    }
}

impl FrameSource for FsSource {
    fn fetch(&self, url: &str) -> AniResult<Vec<u8>> {
        let path = self.resolve(url)?;
        let bytes =
            std::fs::read(&path).with_context(|| format!("read frame '{}'", path.display()))?;
        Ok(bytes)
    }
}

/// Preload settings.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadOpts {
    /// Decoder threads; `None` uses rayon's default.
    pub threads: Option<usize>,
}

/// Progress of an in-flight preload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadProgress {
    /// Requests that finished, successfully or not.
    pub settled: usize,
    /// Requests issued.
    pub total: usize,
}

/// Fetch and decode every URL, returning a [`FrameSet`] only if all of them succeed.
///
/// See [`load_all_with_progress`].
pub fn load_all(urls: &[String], source: &dyn FrameSource, opts: LoadOpts) -> AniResult<FrameSet> {
    load_all_with_progress(urls, source, opts, &|_| {})
}

/// Fetch and decode every URL in parallel, then join.
///
/// All requests are allowed to settle. If any failed, the failure with the lowest index is
/// returned as [`AniError::Load`] and every decoded frame is dropped. `on_settled` is invoked from
/// decoder threads once per request.
#[tracing::instrument(skip_all, fields(frames = urls.len()))]
pub fn load_all_with_progress(
    urls: &[String],
    source: &dyn FrameSource,
    opts: LoadOpts,
    on_settled: &(dyn Fn(LoadProgress) + Sync),
) -> AniResult<FrameSet> {
    if urls.is_empty() {
        return Err(LoadError::new(0, "", "no frames requested").into());
    }

    let pool = build_thread_pool(opts.threads)?;
    let total = urls.len();
    let settled = AtomicUsize::new(0);

    let results: Vec<Result<DecodedFrame, LoadError>> = pool.install(|| {
        urls.par_iter()
            .enumerate()
            .map(|(index, url)| {
                let out = source
                    .fetch(url)
                    .and_then(|bytes| decode_frame(&bytes))
                    .map_err(|e| LoadError::new(index, url.as_str(), error_reason(&e)));
                let done = settled.fetch_add(1, Ordering::AcqRel) + 1;
                on_settled(LoadProgress {
                    settled: done,
                    total,
                });
                out
            })
            .collect()
    });

    let mut frames = Vec::with_capacity(total);
    for r in results {
        frames.push(r?);
    }
    tracing::debug!(frames = frames.len(), "frame sequence decoded");
    FrameSet::from_frames(frames)
}

fn error_reason(err: &AniError) -> String {
    match err {
        // Keep the whole context chain: "read frame '..': No such file or directory".
        AniError::Other(e) => format!("{e:#}"),
        other => other.to_string(),
    }
}

fn build_thread_pool(threads: Option<usize>) -> AniResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(AniError::validation(
            "loader 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| AniError::Other(anyhow::anyhow!("failed to build decode thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
