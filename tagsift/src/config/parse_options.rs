/// Options to control how tagsift parses a file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) read_tags: bool,
	pub(crate) read_properties: bool,
	pub(crate) read_cover_art: bool,
	pub(crate) max_estimation_secs: u32,
	pub(crate) ogg_search_window: u64,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	read_tags: true,
	/// 	read_properties: true,
	/// 	read_cover_art: false,
	/// 	max_estimation_secs: 30,
	/// 	ogg_search_window: 65536,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default number of seconds of MPEG audio to scan before extrapolating
	pub const DEFAULT_MAX_ESTIMATION_SECS: u32 = 30;

	/// Default number of bytes searched back from the end of an OGG stream
	pub const DEFAULT_OGG_SEARCH_WINDOW: u64 = 65536;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagsift::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			read_tags: true,
			read_properties: true,
			read_cover_art: false,
			max_estimation_secs: Self::DEFAULT_MAX_ESTIMATION_SECS,
			ogg_search_window: Self::DEFAULT_OGG_SEARCH_WINDOW,
		}
	}

	/// Whether or not to read the tags
	///
	/// # Examples
	///
	/// ```rust
	/// use tagsift::config::ParseOptions;
	///
	/// // By default, `read_tags` is enabled. Here, only the duration is wanted.
	/// let parsing_options = ParseOptions::new().read_tags(false);
	/// ```
	pub fn read_tags(&mut self, read_tags: bool) -> Self {
		self.read_tags = read_tags;
		*self
	}

	/// Whether or not to read the audio properties (duration, bitrate, sample rate, ...)
	///
	/// # Examples
	///
	/// ```rust
	/// use tagsift::config::ParseOptions;
	///
	/// // By default, `read_properties` is enabled. Here, we don't want to read them.
	/// let parsing_options = ParseOptions::new().read_properties(false);
	/// ```
	pub fn read_properties(&mut self, read_properties: bool) -> Self {
		self.read_properties = read_properties;
		*self
	}

	/// Whether or not to read cover art
	///
	/// This is disabled by default. Pictures that are found while it is disabled are skipped
	/// without being copied.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagsift::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().read_cover_art(true);
	/// ```
	pub fn read_cover_art(&mut self, read_cover_art: bool) -> Self {
		self.read_cover_art = read_cover_art;
		*self
	}

	/// The number of seconds of MPEG audio to scan frame by frame
	///
	/// Once this many seconds worth of frames have been read, the total duration is extrapolated
	/// from the mean frame size. A value of `0` is treated as `1`.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagsift::config::ParseOptions;
	///
	/// // Accuracy matters more than speed here
	/// let parsing_options = ParseOptions::new().max_estimation_secs(600);
	/// ```
	pub fn max_estimation_secs(&mut self, max_estimation_secs: u32) -> Self {
		self.max_estimation_secs = max_estimation_secs.max(1);
		*self
	}

	/// The number of bytes, counted back from the end of an OGG stream, to search for the final
	/// granule position
	///
	/// # Examples
	///
	/// ```rust
	/// use tagsift::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new().ogg_search_window(128 * 1024);
	/// ```
	pub fn ogg_search_window(&mut self, ogg_search_window: u64) -> Self {
		self.ogg_search_window = ogg_search_window;
		*self
	}
}
