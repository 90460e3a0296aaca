use crate::config::SequenceConfig;
use crate::foundation::error::{AniError, AniResult};

/// URL of frame `index`: `<base>/<prefix>_<index:03>.<ext>`.
///
/// A trailing `/` on `base` is not doubled; an empty `base` yields a bare file name.
pub fn frame_url(base: &str, prefix: &str, index: usize, ext: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        format!("{prefix}_{index:03}.{ext}")
    } else {
        format!("{base}/{prefix}_{index:03}.{ext}")
    }
}

/// All frame URLs of a sequence, in playback order.
pub fn sequence_urls(seq: &SequenceConfig) -> Vec<String> {
    (0..seq.frame_count)
        .map(|i| frame_url(&seq.base_path, &seq.prefix, i, &seq.extension))
        .collect()
}

/// Normalize a relative asset path: `\` becomes `/`, `.` and empty segments are dropped.
///
/// Absolute paths and `..` segments are rejected.
pub fn normalize_rel_path(source: &str) -> AniResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(AniError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(AniError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(AniError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(AniError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/naming.rs"]
mod tests;
