//! Decompression of metadata feeds.

use std::io::{self, Read};

/// Compression of a feed, detected from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
	/// Plain JSON.
	None,
	/// `.gz`
	Gzip,
	/// `.zst`
	Zstd,
}

impl CompressionFormat {
	pub fn from_extension(path: &str) -> Self {
		if path.ends_with(".gz") {
			Self::Gzip
		} else if path.ends_with(".zst") || path.ends_with(".zstd") {
			Self::Zstd
		} else {
			Self::None
		}
	}

	pub fn decompress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
		match self {
			Self::None => Ok(data.to_vec()),
			Self::Gzip => {
				let mut v = Vec::<u8>::new();
				flate2::bufread::GzDecoder::new(data).read_to_end(&mut v)?;
				Ok(v)
			},
			Self::Zstd => zstd::stream::decode_all(data),
		}
	}
}
