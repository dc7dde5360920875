//! Descriptor identity: padded names and the remote location of each descriptor.

use crate::config::SourceConfig;
use anyhow::{Context, Result};
use std::fmt;
use url::Url;

/// Width of the zero-padded index in descriptor names.
const PAD_WIDTH: usize = 4;

/// A numbered descriptor, e.g. index 7 is `0007`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DescriptorId(u32);

impl DescriptorId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    /// Zero-padded index (`0007`).
    pub fn padded(&self) -> String {
        format!("{:0width$}", self.0, width = PAD_WIDTH)
    }

    /// Name shared by the remote file stem and the local output directory (`data0007`).
    pub fn stem(&self, source: &SourceConfig) -> String {
        format!("{}{}", source.file_prefix, self.padded())
    }

    /// Remote file name (`data0007.R`).
    pub fn file_name(&self, source: &SourceConfig) -> String {
        let ext = source.file_extension.trim_start_matches('.');
        if ext.is_empty() {
            self.stem(source)
        } else {
            format!("{}.{}", self.stem(source), ext)
        }
    }

    /// Full location: `<base_url>/<owner>/<repo>/<branch>/<path_prefix>/<file_name>`.
    pub fn location(&self, source: &SourceConfig) -> Result<Url> {
        let mut url = Url::parse(&source.base_url)
            .with_context(|| format!("invalid source base_url: {}", source.base_url))?;
        let file_name = self.file_name(source);
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow::anyhow!("base_url cannot be a base: {}", source.base_url))?;
            segments.pop_if_empty();
            segments.extend(
                [
                    source.owner.as_str(),
                    source.repo.as_str(),
                    source.branch.as_str(),
                ]
                .into_iter()
                .chain(source.path_prefix.split('/'))
                .filter(|s| !s.is_empty()),
            );
            segments.push(&file_name);
        }
        Ok(url)
    }
}

impl fmt::Display for DescriptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.padded())
    }
}
