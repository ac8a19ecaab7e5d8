use crate::{
    cli,
    config::{Config, Opts, Upstream},
    debug, info, success,
    types::{diff, DiffReport, PkgCollection},
    utils::{downloader::Downloader, manifest::parse_manifest},
};

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Compare the firmware manifest against upstream and print the results
pub async fn compare_release(opts: &Opts) -> Result<()> {
    let (report, manifest_from_stdin) = gen_report(opts).await?;

    let mut out = std::io::stdout();
    cli::show_differences(&mut out, &report.differences)?;
    out.flush()?;
    // Stdin is already drained if the manifest came from there
    cli::pause(opts.yes || manifest_from_stdin)?;
    cli::show_downstream_only(&mut out, &report.downstream_only)?;
    out.flush()?;

    if report.is_empty() {
        success!("Firmware matches upstream {}.", opts.release.trim());
    }
    Ok(())
}

/// Fetch upstream, read the manifest and diff them.
/// Also returns whether the manifest was read from stdin.
async fn gen_report(opts: &Opts) -> Result<(DiffReport, bool)> {
    let config = match &opts.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let upstream = Upstream::new(opts, config)?;
    debug!("Release: {}", upstream.release);
    debug!("Architecture: {}", upstream.arch);

    info!("Fetching upstream package indices...");
    let downloader = Downloader::new();
    let upstream_pkgs = fetch_upstream(&downloader, &upstream.urls()).await?;
    debug!("Loaded {} upstream packages", upstream_pkgs.len());

    let manifest = opts
        .manifest
        .as_deref()
        .filter(|path| *path != Path::new("-"));
    let downstream = read_manifest(manifest)?;
    debug!("Loaded {} downstream packages", downstream.len());

    let report = diff(&downstream, &upstream_pkgs);
    debug!(
        "Found {} differences and {} downstream-only packages",
        report.differences.len(),
        report.downstream_only.len()
    );

    Ok((report, manifest.is_none()))
}

/// Fetch indices one after another. Later indices win on name collision.
pub async fn fetch_upstream(downloader: &Downloader, urls: &[String]) -> Result<PkgCollection> {
    let mut res = PkgCollection::new();
    for url in urls {
        let pkgs: PkgCollection = downloader.fetch_index(url).await?.into_iter().collect();
        debug!("{} packages in {}", pkgs.len(), url);
        res = res.merge(pkgs);
    }
    Ok(res)
}

/// Read the manifest from a file, or stdin if no path is given
pub fn read_manifest(path: Option<&Path>) -> Result<PkgCollection> {
    match path {
        Some(path) => {
            info!("Reading firmware manifest {}...", path.display());
            let f = File::open(path)
                .with_context(|| format!("Failed to open manifest {}", path.display()))?;
            parse_manifest(BufReader::new(f))
                .with_context(|| format!("Failed to parse manifest {}", path.display()))
        }
        None => {
            info!("Reading firmware manifest from stdin...");
            let stdin = std::io::stdin();
            let res = parse_manifest(stdin.lock()).context("Failed to parse manifest from stdin")?;
            Ok(res)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{error::FetchError, utils::downloader::test::serve_once};
    use clap::Parser;
    use std::io::Write;

    #[tokio::test]
    async fn addon_overrides_base() {
        let base = serve_once(
            "200 OK",
            b"Package: A\nVersion: 1\n\nPackage: C\nVersion: 7\n".to_vec(),
        )
        .await;
        let addon = serve_once(
            "200 OK",
            b"Package: A\nVersion: 2\n\nPackage: B\nVersion: 1\n".to_vec(),
        )
        .await;
        let urls = vec![format!("{}/base/Packages", base), format!("{}/packages/Packages", addon)];
        let pkgs = fetch_upstream(&Downloader::new(), &urls).await.unwrap();
        assert_eq!(pkgs.len(), 3);
        assert_eq!(pkgs.get("A").unwrap().version, "2");
        assert_eq!(pkgs.get("B").unwrap().version, "1");
        assert_eq!(pkgs.get("C").unwrap().version, "7");
    }

    #[tokio::test]
    async fn failed_fetch_aborts() {
        let base = serve_once("200 OK", b"Package: A\nVersion: 1\n".to_vec()).await;
        let addon = serve_once("404 Not Found", Vec::new()).await;
        let urls = vec![base, addon];
        let err = fetch_upstream(&Downloader::new(), &urls).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::Status { .. })
        ));
    }

    #[test]
    fn manifest_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "6in4 - 28\nbusybox - 1.36.1-r2").unwrap();
        let pkgs = read_manifest(Some(f.path())).unwrap();
        assert_eq!(pkgs.len(), 2);
        assert_eq!(pkgs.get("6in4").unwrap().version, "28");
    }

    #[test]
    fn missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_manifest(Some(dir.path().join("nope.manifest").as_path())).unwrap_err();
        assert!(err.to_string().starts_with("Failed to open manifest"));
    }

    #[tokio::test]
    async fn full_report() {
        let base = serve_once(
            "200 OK",
            b"Package: A\nVersion: 1\nPackage: B\nVersion: 3\nPackage: C\nVersion: 9\n".to_vec(),
        )
        .await;
        let addon = serve_once("200 OK", b"Package: luci\nVersion: 24.1\n".to_vec()).await;

        let mut config = tempfile::NamedTempFile::new().unwrap();
        write!(
            config,
            "[templates]\nbase = \"{base}/$VERSION/$ARCH/base/Packages\"\naddon = \"{addon}/$VERSION/$ARCH/packages/Packages\"\nfeed = \"{addon}/$VERSION/$ARCH/$FEED/Packages\"\n"
        )
        .unwrap();
        let mut manifest = tempfile::NamedTempFile::new().unwrap();
        write!(manifest, "A - 1\nB - 2\nlocal-tool - 0.1\nluci - 24.1\n").unwrap();

        let config_path = config.path().display().to_string();
        let manifest_path = manifest.path().display().to_string();
        let opts = Opts::try_parse_from([
            "owrt-pkgdiff",
            "-r",
            "23.05.5",
            "-c",
            config_path.as_str(),
            manifest_path.as_str(),
        ])
        .unwrap();
        let (report, from_stdin) = gen_report(&opts).await.unwrap();
        assert!(!from_stdin);
        assert_eq!(report.differences.len(), 1);
        assert_eq!(report.differences[0].name, "B");
        assert_eq!(report.differences[0].upstream_version, "3");
        assert_eq!(report.differences[0].downstream_version, "2");
        assert_eq!(report.downstream_only.len(), 1);
        assert_eq!(report.downstream_only[0].name, "local-tool");
    }
}
