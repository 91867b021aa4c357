use crate::errors::KbResult;

/// Word → root reduction.
///
/// Implementations may fail; callers substitute the original word.
pub trait IStemmer: Send + Sync {
    fn stem(&self, word: &str) -> KbResult<String>;

    fn name(&self) -> &str;
}
