use chrono::{DateTime, Utc};
use folio_core::constants::{DEFAULT_RANDOM_SUFFIX_BYTES, MIN_RANDOM_SUFFIX_BYTES};
use rand::RngCore;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Names stored files `<UTC timestamp>_<random hex>.<ext>`.
///
/// Nothing from the client filename survives except the validated extension.
#[derive(Debug, Clone, Copy)]
pub struct FileNameGenerator {
    random_bytes: usize,
}

impl Default for FileNameGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_RANDOM_SUFFIX_BYTES)
    }
}

impl FileNameGenerator {
    /// `random_bytes` is clamped to at least `MIN_RANDOM_SUFFIX_BYTES`.
    pub fn new(random_bytes: usize) -> Self {
        Self {
            random_bytes: random_bytes.max(MIN_RANDOM_SUFFIX_BYTES),
        }
    }

    pub fn generate(&self, extension: &str) -> String {
        self.generate_at(Utc::now(), extension)
    }

    pub fn generate_at(&self, now: DateTime<Utc>, extension: &str) -> String {
        let mut suffix = vec![0u8; self.random_bytes];
        rand::rng().fill_bytes(&mut suffix);

        format!(
            "{}_{}.{}",
            now.format(TIMESTAMP_FORMAT),
            hex::encode(suffix),
            extension.trim_start_matches('.').to_lowercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_filename_layout() {
        let names = FileNameGenerator::default();
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let name = names.generate_at(at, "PNG");

        assert!(name.starts_with("2024-03-09_07-05-01_"));
        assert!(name.ends_with(".png"));

        let random = name
            .trim_start_matches("2024-03-09_07-05-01_")
            .trim_end_matches(".png");
        assert_eq!(random.len(), DEFAULT_RANDOM_SUFFIX_BYTES * 2);
        assert!(random.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_same_second_names_differ() {
        let names = FileNameGenerator::default();
        let at = Utc::now();
        assert_ne!(names.generate_at(at, "jpg"), names.generate_at(at, "jpg"));
    }

    #[test]
    fn test_random_bytes_floor() {
        let names = FileNameGenerator::new(1);
        let name = names.generate_at(Utc::now(), "gif");
        let random = name.rsplit('_').next().unwrap().trim_end_matches(".gif");
        assert_eq!(random.len(), MIN_RANDOM_SUFFIX_BYTES * 2);
    }

    #[test]
    fn test_no_path_characters() {
        let name = FileNameGenerator::default().generate(".webp");
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
        assert!(name.ends_with(".webp"));
    }
}
