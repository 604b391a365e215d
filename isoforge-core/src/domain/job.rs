//! Job identity and on-disk naming conventions
//!
//! A job has no persisted record of its own: its public name doubles as the
//! artifact file name, and `<name>.log` is its progress log. The set of log
//! files in the image directory is the complete job registry.

use uuid::Uuid;

/// Prefix of every generated image name.
pub const ISO_NAME_PREFIX: &str = "custom_ubuntu_";

/// Extension of the built artifact.
pub const ISO_EXTENSION: &str = ".iso";

/// Suffix appended to an iso name to form its log file name.
pub const LOG_SUFFIX: &str = ".log";

/// Generates a fresh unique iso name for a new build job.
///
/// The uuid v4 payload makes collisions across all jobs ever created
/// negligible, so no index of previously issued names is kept.
pub fn new_iso_name() -> String {
    format!("{}{}{}", ISO_NAME_PREFIX, Uuid::new_v4(), ISO_EXTENSION)
}

/// Log file name for an iso name.
pub fn log_file_name(iso_name: &str) -> String {
    format!("{}{}", iso_name, LOG_SUFFIX)
}

/// Recovers the iso name from a directory entry, if it is a log file.
pub fn iso_name_from_log(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(LOG_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_iso_name_follows_convention() {
        let name = new_iso_name();
        assert!(name.starts_with(ISO_NAME_PREFIX));
        assert!(name.ends_with(ISO_EXTENSION));
    }

    #[test]
    fn test_new_iso_names_are_unique() {
        let a = new_iso_name();
        let b = new_iso_name();
        assert_ne!(a, b);
    }

    #[test]
    fn test_log_name_round_trip() {
        let iso_name = new_iso_name();
        let log_name = log_file_name(&iso_name);
        assert_eq!(iso_name_from_log(&log_name), Some(iso_name.as_str()));
    }

    #[test]
    fn test_iso_name_from_log_rejects_non_logs() {
        assert_eq!(iso_name_from_log("custom_ubuntu_abc.iso"), None);
        assert_eq!(
            iso_name_from_log("custom_ubuntu_abc.iso.log"),
            Some("custom_ubuntu_abc.iso")
        );
    }
}
