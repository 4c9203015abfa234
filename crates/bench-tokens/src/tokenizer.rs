//! Token counting backends.
//!
//! The reporter only relies on one contract: identical input text and the same
//! encoding always produce the same integer count. [`TiktokenCounter`] fulfils
//! it with the BPE encodings shipped by `tiktoken-rs`.

use mcp_bench_core::{Error, Result};
use tiktoken_rs::{CoreBPE, cl100k_base, o200k_base, p50k_base, r50k_base};

/// Encoding used when none is requested.
pub const DEFAULT_ENCODING: &str = "cl100k_base";

/// Encodings accepted by [`TiktokenCounter::new`].
pub const SUPPORTED_ENCODINGS: &[&str] = &["cl100k_base", "o200k_base", "p50k_base", "r50k_base"];

/// Deterministic text-to-token-count mapping.
pub trait TokenCounter: Send + Sync {
    /// Encoding name, used in logs and reports.
    fn name(&self) -> &str;

    /// Number of tokens in `text`.
    fn count(&self, text: &str) -> usize;
}

/// Token counter backed by a tiktoken BPE encoding.
pub struct TiktokenCounter {
    encoding: String,
    encoder: CoreBPE,
}

impl std::fmt::Debug for TiktokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenCounter")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl TiktokenCounter {
    /// Loads the named encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an unknown encoding name and
    /// [`Error::TokenizerUnavailable`] when the encoding data cannot be loaded.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_bench_tokens::tokenizer::{TiktokenCounter, TokenCounter};
    ///
    /// let counter = TiktokenCounter::new("cl100k_base")?;
    /// assert_eq!(counter.name(), "cl100k_base");
    /// assert!(counter.count("Hello, world!") > 0);
    /// # Ok::<(), mcp_bench_core::Error>(())
    /// ```
    pub fn new(encoding: &str) -> Result<Self> {
        let loaded = match encoding {
            "cl100k_base" => cl100k_base(),
            "o200k_base" => o200k_base(),
            "p50k_base" => p50k_base(),
            "r50k_base" => r50k_base(),
            other => {
                return Err(Error::InvalidArgument(format!(
                    "unknown encoding '{other}' (expected one of: {})",
                    SUPPORTED_ENCODINGS.join(", ")
                )));
            }
        };

        let encoder = loaded.map_err(|e| Error::TokenizerUnavailable {
            encoding: encoding.to_string(),
            source: e.into(),
        })?;

        tracing::debug!(encoding, "loaded tokenizer");

        Ok(Self {
            encoding: encoding.to_string(),
            encoder,
        })
    }

    /// Loads [`DEFAULT_ENCODING`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenizerUnavailable`] if the encoding cannot be loaded.
    pub fn cl100k() -> Result<Self> {
        Self::new(DEFAULT_ENCODING)
    }
}

impl TokenCounter for TiktokenCounter {
    fn name(&self) -> &str {
        &self.encoding
    }

    fn count(&self, text: &str) -> usize {
        self.encoder.encode_ordinary(text).len()
    }
}
