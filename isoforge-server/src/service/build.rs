//! Build service
//!
//! Validates submissions, allocates job names and hands off to the external
//! build tool. The hand-off is fire-and-forget: the caller gets the new iso
//! name back as soon as the process is launched, and nothing ever waits on
//! build duration. There is no concurrency cap and no retry.

use std::process::Stdio;

use isoforge_core::domain::job;
use isoforge_core::dto::job::GenerateIsoRequest;
use tokio::process::Command;

use crate::config::Config;

/// Service error type
#[derive(Debug, PartialEq, Eq)]
pub enum BuildError {
    /// Submission carried no packages; rejected before any state is created.
    EmptyPackages,
}

/// Validates a build request and launches the build in the background.
///
/// On success the returned iso name is already final: it names the log file
/// the build tool will append to and the artifact it will produce. Launch
/// and build failures are recorded to operational logs only; the job then
/// simply never advances past whatever its log last said.
pub fn start_build(config: &Config, req: GenerateIsoRequest) -> Result<String, BuildError> {
    if req.packages.is_empty() {
        return Err(BuildError::EmptyPackages);
    }

    let iso_name = job::new_iso_name();
    let iso_url = req
        .iso_url
        .unwrap_or_else(|| config.default_iso_url.clone());

    spawn_build_tool(config, &iso_name, &req.packages, &iso_url);

    Ok(iso_name)
}

/// Launches the build tool as an independent process and registers a
/// detached observer that only logs the outcome.
///
/// The exit status never feeds back into job state: progress is always
/// derived from the log file, and a failed build is observable to clients
/// only as a percentage that stops advancing.
fn spawn_build_tool(config: &Config, iso_name: &str, packages: &[String], iso_url: &str) {
    // The tool takes the package list as one whitespace-joined argument, so
    // a package name containing whitespace would corrupt its arguments.
    // Submissions are not sanitized for that; the tool's interface is
    // trusted as-is.
    let package_list = packages.join(" ");

    tracing::info!(
        "Launching build tool {:?} for {} ({} packages, base {})",
        config.build_tool,
        iso_name,
        packages.len(),
        iso_url
    );

    let child = Command::new(&config.build_tool)
        .arg(iso_name)
        .arg(&package_list)
        .arg(iso_url)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) => {
            tracing::error!("Failed to launch build tool for {}: {}", iso_name, e);
            return;
        }
    };

    let iso_name = iso_name.to_string();
    tokio::spawn(async move {
        match child.wait_with_output().await {
            Ok(output) if output.status.success() => {
                tracing::info!("Build finished for {}", iso_name);
                let stdout = String::from_utf8_lossy(&output.stdout);
                if !stdout.trim().is_empty() {
                    tracing::debug!("Build tool output for {}: {}", iso_name, stdout.trim());
                }
            }
            Ok(output) => {
                tracing::error!(
                    "Build tool exited with {} for {}",
                    output.status,
                    iso_name
                );
                let stderr = String::from_utf8_lossy(&output.stderr);
                if !stderr.trim().is_empty() {
                    tracing::error!("Build tool stderr for {}: {}", iso_name, stderr.trim());
                }
            }
            Err(e) => {
                tracing::error!("Failed to wait on build tool for {}: {}", iso_name, e);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_store(dir: &tempfile::TempDir) -> Config {
        Config {
            image_dir: dir.path().to_path_buf(),
            // Points at nothing; launch failure must not affect submission.
            build_tool: dir.path().join("no-such-tool.sh"),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_empty_packages_rejected_without_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_store(&dir);

        let result = start_build(
            &config,
            GenerateIsoRequest {
                packages: vec![],
                iso_url: None,
            },
        );
        assert_eq!(result, Err(BuildError::EmptyPackages));

        // No log or artifact may appear for a rejected submission.
        let mut entries = std::fs::read_dir(dir.path()).unwrap();
        assert!(entries.next().is_none());
    }

    #[tokio::test]
    async fn test_submission_returns_fresh_name_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_store(&dir);

        let first = start_build(
            &config,
            GenerateIsoRequest {
                packages: vec!["curl".to_string(), "vim".to_string()],
                iso_url: None,
            },
        )
        .unwrap();

        let second = start_build(
            &config,
            GenerateIsoRequest {
                packages: vec!["curl".to_string()],
                iso_url: Some("http://mirror.example/base.iso".to_string()),
            },
        )
        .unwrap();

        assert!(first.starts_with(job::ISO_NAME_PREFIX));
        assert!(first.ends_with(job::ISO_EXTENSION));
        assert_ne!(first, second);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_build_tool_runs_detached_with_arguments() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("create_iso.sh");
        let out = dir.path().join("invocation");
        std::fs::write(
            &tool,
            format!(
                "#!/bin/sh\necho building\nprintf '%s|%s|%s' \"$1\" \"$2\" \"$3\" > {}\n",
                out.display()
            ),
        )
        .unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let config = Config {
            image_dir: dir.path().to_path_buf(),
            build_tool: tool,
            ..Config::default()
        };

        let iso_name = start_build(
            &config,
            GenerateIsoRequest {
                packages: vec!["curl".to_string(), "vim".to_string()],
                iso_url: None,
            },
        )
        .unwrap();

        // The tool runs in the background with its output piped to the
        // observer task; poll briefly for the file it writes.
        let mut recorded = None;
        for _ in 0..50 {
            if let Ok(text) = std::fs::read_to_string(&out) {
                recorded = Some(text);
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }

        let recorded = recorded.expect("build tool did not run");
        assert_eq!(
            recorded,
            format!("{}|curl vim|{}", iso_name, config.default_iso_url)
        );
    }

    #[tokio::test]
    async fn test_launch_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_store(&dir);

        // The tool does not exist, yet submission still succeeds.
        let result = start_build(
            &config,
            GenerateIsoRequest {
                packages: vec!["htop".to_string()],
                iso_url: None,
            },
        );
        assert!(result.is_ok());
    }
}
