//! Configurable limits for bounded decoding and encoding.

/// Format limits.
///
/// These limits are enforced while decoding to bound memory use on hostile
/// input, and while encoding so that no file is produced that a decoder
/// with the same limits would reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of params.
    pub max_params: usize,

    /// Maximum number of locations.
    pub max_locations: usize,

    /// Maximum number of jumps.
    pub max_jumps: usize,

    /// Maximum number of paragraphs in a location.
    pub max_paragraphs: usize,

    /// Maximum length of a single string in bytes.
    pub max_string_bytes: usize,

    /// Maximum number of embedded media blobs.
    pub max_media_blobs: usize,

    /// Maximum total size of embedded media in bytes.
    pub max_media_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // The largest legacy quests use 96 params
            max_params: 96,
            max_locations: 4096,
            max_jumps: 16 * 1024,
            max_paragraphs: 32,
            max_string_bytes: 64 * 1024,
            max_media_blobs: 1024,
            max_media_bytes: 32 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_params: 16,
            max_locations: 64,
            max_jumps: 256,
            max_paragraphs: 8,
            max_string_bytes: 1024,
            max_media_blobs: 8,
            max_media_bytes: 4096,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_params: usize::MAX,
            max_locations: usize::MAX,
            max_jumps: usize::MAX,
            max_paragraphs: usize::MAX,
            max_string_bytes: usize::MAX,
            max_media_blobs: usize::MAX,
            max_media_bytes: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_reasonable() {
        let limits = Limits::default();
        assert!(limits.max_params >= 48);
        assert!(limits.max_locations >= 1024);
        assert!(limits.max_string_bytes >= 4096);
    }

    #[test]
    fn testing_limits_smaller() {
        let test_limits = Limits::for_testing();
        let default_limits = Limits::default();
        assert!(test_limits.max_params < default_limits.max_params);
        assert!(test_limits.max_jumps < default_limits.max_jumps);
        assert!(test_limits.max_media_bytes < default_limits.max_media_bytes);
    }

    #[test]
    fn unlimited_limits() {
        let limits = Limits::unlimited();
        assert_eq!(limits.max_params, usize::MAX);
        assert_eq!(limits.max_media_bytes, usize::MAX);
    }

    #[test]
    fn limits_const_constructible() {
        const LIMITS: Limits = Limits::for_testing();
        assert_eq!(LIMITS.max_params, 16);
    }
}
