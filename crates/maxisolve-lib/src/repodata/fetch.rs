use std::io::Read;

/// Something that can fetch the raw bytes of a feed.
pub trait Fetch {
	fn fetch(&self, url: &str) -> crate::Result<Vec<u8>>;
}

/// Fetches feeds over HTTP(S).
pub struct HttpFetcher {
	client: reqwest::blocking::Client,
}

impl HttpFetcher {
	pub fn new(config: &crate::Config) -> crate::Result<Self> {
		let client = reqwest::blocking::Client::builder()
			.https_only(config.https_only())
			.build()?;
		Ok(Self { client })
	}
}

impl Fetch for HttpFetcher {
	fn fetch(&self, url: &str) -> crate::Result<Vec<u8>> {
		log::info!("Downloading repository metadata from {}", url);
		let mut v = Vec::<u8>::new();
		self.client
			.get(url)
			.send()?
			.error_for_status()?
			.read_to_end(&mut v)?;
		log::debug!("Downloaded {} bytes from {}", v.len(), url);
		Ok(v)
	}
}
