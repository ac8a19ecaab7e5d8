use anyhow::{bail, Context, Result};
use clap::{ArgEnum, Parser};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ARCH: &str = "x86_64";

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\$[A-Za-z_]+").unwrap();
    static ref RELEASE_NAME: Regex = Regex::new("^[A-Za-z0-9._-]+$").unwrap();
    static ref ARCH_NAME: Regex = Regex::new("^[A-Za-z0-9._/-]+$").unwrap();
    static ref FEED_NAME: Regex = Regex::new("^[A-Za-z0-9._-]+$").unwrap();
}

#[derive(Parser)]
#[clap(about)]
pub struct Opts {
    #[clap(
        short = 'r',
        long = "version",
        help = "OpenWRT release to compare against, e.g. 23.05.5"
    )]
    pub release: String,
    #[clap(short, long, help = "Target package architecture [default: x86_64]")]
    pub arch: Option<String>,
    #[clap(long, arg_enum, help = "Built-in URL layout of the upstream feeds")]
    pub layout: Option<Layout>,
    #[clap(long = "feed", help = "Also compare against this feed, e.g. luci (repeatable)")]
    pub feeds: Vec<String>,
    #[clap(short, long, help = "Read URL templates and defaults from this TOML file")]
    pub config: Option<PathBuf>,
    #[clap(short, long, help = "Print additional debug information")]
    pub verbose: bool,
    #[clap(short, long, help = "Don't pause between tables")]
    pub yes: bool,
    /// Firmware manifest to compare, read from stdin if omitted
    pub manifest: Option<PathBuf>,
}

/// Built-in sets of URL templates
#[derive(ArgEnum, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Package directory chosen by `$ARCH`
    #[clap(name = "per-arch")]
    #[serde(rename = "per-arch")]
    PerArch,
    /// Historical layout, always x86_64
    #[clap(name = "fixed-x86-64")]
    #[serde(rename = "fixed-x86-64")]
    FixedX86,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::PerArch
    }
}

/// URL templates for upstream indices.
///
/// `$VERSION`, `$ARCH` and `$FEED` are replaced with the release, the
/// architecture and the feed name.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct UrlTemplates {
    pub base: String,
    pub addon: String,
    pub feed: String,
}

impl UrlTemplates {
    pub fn from_layout(layout: Layout) -> Self {
        let arch = match layout {
            Layout::PerArch => "$ARCH",
            Layout::FixedX86 => "x86_64",
        };
        let prefix = format!("https://downloads.openwrt.org/releases/$VERSION/packages/{arch}");
        UrlTemplates {
            base: format!("{prefix}/base/Packages"),
            addon: format!("{prefix}/packages/Packages"),
            feed: format!("{prefix}/$FEED/Packages"),
        }
    }

    pub fn check_sanity(&self) -> Result<()> {
        for (name, template, required) in [
            ("base", &self.base, &["$VERSION"][..]),
            ("addon", &self.addon, &["$VERSION"][..]),
            ("feed", &self.feed, &["$VERSION", "$FEED"][..]),
        ] {
            for placeholder in PLACEHOLDER.find_iter(template) {
                if !["$VERSION", "$ARCH", "$FEED"].contains(&placeholder.as_str()) {
                    bail!(
                        "Unknown placeholder {} in {} URL template",
                        placeholder.as_str(),
                        name
                    );
                }
            }
            for placeholder in required {
                if !template.contains(placeholder) {
                    bail!("{} URL template must contain {}", name, placeholder);
                }
            }
        }
        Ok(())
    }

    fn render(template: &str, release: &str, arch: &str, feed: &str) -> String {
        template
            .replace("$VERSION", release)
            .replace("$ARCH", arch)
            .replace("$FEED", feed)
    }
}

/// Optional config file
#[derive(Deserialize, Serialize, Default, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub arch: Option<String>,
    pub layout: Option<Layout>,
    pub templates: Option<UrlTemplates>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

/// Everything needed to locate the upstream indices of one release
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upstream {
    pub release: String,
    pub arch: String,
    pub templates: UrlTemplates,
    pub feeds: Vec<String>,
}

impl Upstream {
    /// Combine command line options with the config file. Command line wins.
    pub fn new(opts: &Opts, config: Config) -> Result<Self> {
        let release = opts.release.trim();
        if release.is_empty() {
            bail!("Release version cannot be empty");
        }
        if !RELEASE_NAME.is_match(release) {
            bail!("Invalid release version: {}", release);
        }

        let arch = opts
            .arch
            .clone()
            .or(config.arch)
            .unwrap_or_else(|| DEFAULT_ARCH.to_owned());
        if !ARCH_NAME.is_match(&arch) {
            bail!("Invalid architecture: {}", arch);
        }

        for feed in &opts.feeds {
            if !FEED_NAME.is_match(feed) {
                bail!("Invalid feed name: {}", feed);
            }
        }

        let templates = match (opts.layout, config.templates) {
            (Some(layout), _) => UrlTemplates::from_layout(layout),
            (None, Some(templates)) => templates,
            (None, None) => UrlTemplates::from_layout(config.layout.unwrap_or_default()),
        };
        templates
            .check_sanity()
            .context("Invalid URL templates")?;

        Ok(Upstream {
            release: release.to_owned(),
            arch,
            templates,
            feeds: opts.feeds.clone(),
        })
    }

    /// Index URLs in fetch order: base, addon, then extra feeds
    pub fn urls(&self) -> Vec<String> {
        let t = &self.templates;
        let mut res = vec![
            UrlTemplates::render(&t.base, &self.release, &self.arch, ""),
            UrlTemplates::render(&t.addon, &self.release, &self.arch, ""),
        ];
        for feed in &self.feeds {
            res.push(UrlTemplates::render(&t.feed, &self.release, &self.arch, feed));
        }
        res
    }
}
