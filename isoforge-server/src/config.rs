//! Server configuration
//!
//! Defines all configurable parameters for the server: bind address, the
//! image directory, the external build tool, and the default base image.

use std::path::PathBuf;

/// Base image used when a submission does not name one.
pub const DEFAULT_ISO_URL: &str =
    "http://releases.ubuntu.com/20.04/ubuntu-20.04.6-desktop-amd64.iso";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to
    pub bind_addr: String,

    /// Directory holding build logs and finished artifacts
    pub image_dir: PathBuf,

    /// External build tool invoked once per job
    pub build_tool: PathBuf,

    /// Base image URL substituted when a request omits `isoUrl`
    pub default_iso_url: String,

    /// Host used in client-facing URLs when a request carries no Host header
    pub public_host: String,

    /// Directory with the built frontend assets
    pub frontend_dir: PathBuf,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Recognized environment variables (all optional):
    /// - BIND_ADDR (default: 0.0.0.0:3000)
    /// - IMAGE_DIR (default: isos)
    /// - BUILD_TOOL (default: ./create_iso.sh)
    /// - DEFAULT_ISO_URL (default: the Ubuntu 20.04 desktop image)
    /// - PUBLIC_HOST (default: localhost:3000)
    /// - FRONTEND_DIR (default: dist)
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let image_dir = std::env::var("IMAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("isos"));

        let build_tool = std::env::var("BUILD_TOOL")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./create_iso.sh"));

        let default_iso_url =
            std::env::var("DEFAULT_ISO_URL").unwrap_or_else(|_| DEFAULT_ISO_URL.to_string());

        let public_host =
            std::env::var("PUBLIC_HOST").unwrap_or_else(|_| "localhost:3000".to_string());

        let frontend_dir = std::env::var("FRONTEND_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("dist"));

        Self {
            bind_addr,
            image_dir,
            build_tool,
            default_iso_url,
            public_host,
            frontend_dir,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.image_dir.as_os_str().is_empty() {
            anyhow::bail!("image_dir cannot be empty");
        }

        if self.build_tool.as_os_str().is_empty() {
            anyhow::bail!("build_tool cannot be empty");
        }

        if !self.default_iso_url.starts_with("http://")
            && !self.default_iso_url.starts_with("https://")
        {
            anyhow::bail!("default_iso_url must start with http:// or https://");
        }

        if self.public_host.is_empty() {
            anyhow::bail!("public_host cannot be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            image_dir: PathBuf::from("isos"),
            build_tool: PathBuf::from("./create_iso.sh"),
            default_iso_url: DEFAULT_ISO_URL.to_string(),
            public_host: "localhost:3000".to_string(),
            frontend_dir: PathBuf::from("dist"),
        }
    }
}
