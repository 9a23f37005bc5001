//! Compression codecs wrapped around tar streams.
//!
//! - **Gzip** (.tar.gz, .tgz): what the GitHub tarball endpoint serves
//! - **Xz** (.tar.xz, .txz): what the upstream release mirror publishes

use std::io::Read;

use flate2::read::MultiGzDecoder;
use xz2::read::XzDecoder;

/// Compression codec for archive files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionCodec {
    /// Gzip compression (deflate algorithm).
    Gzip,

    /// Xz compression (LZMA2 algorithm).
    Xz,
}

impl CompressionCodec {
    /// Returns a human-readable name for this codec.
    ///
    /// # Examples
    ///
    /// ```
    /// use xzsrc_core::formats::compression::CompressionCodec;
    ///
    /// assert_eq!(CompressionCodec::Gzip.name(), "gzip");
    /// assert_eq!(CompressionCodec::Xz.name(), "xz");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Xz => "xz",
        }
    }

    /// Wraps `reader` in the matching streaming decoder.
    pub fn decoder<'a, R: Read + 'a>(self, reader: R) -> Box<dyn Read + 'a> {
        match self {
            Self::Gzip => Box::new(MultiGzDecoder::new(reader)),
            Self::Xz => Box::new(XzDecoder::new(reader)),
        }
    }
}
