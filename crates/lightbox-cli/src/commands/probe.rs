use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use lightbox_core::config::SiteConfig;
use lightbox_core::page::{ImageId, Page};
use lightbox_core::probe::{FsProbe, PathResolver, ProbeReporter, Resolution};
use tracing::{info, warn};

use crate::summary;

#[derive(Args)]
pub struct ProbeArgs {
    /// Site root directory, served as `/`
    pub site_root: PathBuf,

    /// HTML page inside the site root
    pub page: PathBuf,

    /// Rewrite repaired image sources in the page file
    #[arg(long)]
    pub write: bool,

    /// Exit with an error if any image is still broken
    #[arg(long)]
    pub strict: bool,
}

/// Drives an indicatif bar from resolver callbacks.
struct BarReporter {
    pb: ProgressBar,
}

impl ProbeReporter for BarReporter {
    fn begin(&self, total_images: usize) {
        self.pb.set_length(total_images as u64);
    }

    fn image_resolved(&self, _id: ImageId, _resolution: &Resolution) {
        self.pb.inc(1);
    }

    fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

pub fn run(args: &ProbeArgs, config: &SiteConfig) -> Result<()> {
    let html = std::fs::read_to_string(&args.page)
        .with_context(|| format!("Failed to read {}", args.page.display()))?;
    let page_path = url_path_within(&args.site_root, &args.page)?;
    let mut page = Page::from_html(page_path, &html)
        .with_context(|| format!("Failed to scan {}", args.page.display()))?;

    let original_srcs: HashMap<ImageId, String> = page
        .images()
        .iter()
        .map(|img| (img.id, img.src.clone()))
        .collect();

    info!(page = page.path(), images = original_srcs.len(), "probing page");

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Probing [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = BarReporter { pb };

    let probe = FsProbe::new(&args.site_root, page.path());
    let resolver = PathResolver::from_config(config);
    let results = resolver.resolve_page_reported(&mut page, &probe, &reporter);

    summary::print_probe_summary(&page, &results);

    if args.write {
        let (rewritten, missed) = rewrite_sources(&html, &results, &original_srcs);
        for id in missed {
            let original = original_srcs.get(&id).map(String::as_str).unwrap_or_default();
            warn!(%id, src = original, "repaired source not found in page markup; left unchanged");
        }
        if rewritten != html {
            std::fs::write(&args.page, rewritten)
                .with_context(|| format!("Failed to write {}", args.page.display()))?;
            println!("Updated {}", args.page.display());
        }
    }

    let broken = results.iter().filter(|(_, r)| r.is_broken()).count();
    if args.strict && broken > 0 {
        bail!("{broken} image(s) could not be resolved");
    }
    Ok(())
}

/// URL path of `page` when `root` is served as `/`.
fn url_path_within(root: &Path, page: &Path) -> Result<String> {
    let root = root
        .canonicalize()
        .with_context(|| format!("Site root not found: {}", root.display()))?;
    let page = page
        .canonicalize()
        .with_context(|| format!("Page not found: {}", page.display()))?;
    let relative = page.strip_prefix(&root).with_context(|| {
        format!("{} is not inside {}", page.display(), root.display())
    })?;

    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(format!("/{}", segments.join("/")))
}

/// Replace each repaired image's original `src` attribute value. Returns the
/// rewritten markup and the repaired images whose source was not found.
fn rewrite_sources(
    html: &str,
    results: &[(ImageId, Resolution)],
    original_srcs: &HashMap<ImageId, String>,
) -> (String, Vec<ImageId>) {
    let mut out = html.to_string();
    let mut rewritten: HashSet<&str> = HashSet::new();
    let mut missed = Vec::new();

    for (id, resolution) in results {
        let Resolution::Repaired { src, .. } = resolution else {
            continue;
        };
        let Some(original) = original_srcs.get(id) else {
            continue;
        };
        if rewritten.contains(original.as_str()) {
            continue;
        }
        let (next, count) = replace_src_value(&out, original, src);
        if count == 0 {
            missed.push(*id);
        } else {
            rewritten.insert(original.as_str());
            out = next;
        }
    }
    (out, missed)
}

/// Replace the value of every `src` attribute equal to `original`, whether
/// double-quoted, single-quoted or unquoted, with optional spaces around `=`.
fn replace_src_value(html: &str, original: &str, replacement: &str) -> (String, usize) {
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    let mut search = 0;
    let mut replaced = 0;

    while let Some(rel) = lower[search..].find("src") {
        let name_start = search + rel;
        search = name_start + 3;
        if !html[..name_start].ends_with(|c: char| c.is_ascii_whitespace()) {
            continue;
        }
        let Some(rest) = html[search..].trim_start().strip_prefix('=') else {
            continue;
        };
        let value_area = rest.trim_start();
        let area_start = html.len() - value_area.len();

        let (value_start, value_end) = match value_area.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let value_start = area_start + 1;
                match html[value_start..].find(quote) {
                    Some(len) => (value_start, value_start + len),
                    None => continue,
                }
            }
            _ => {
                let len = value_area
                    .find(|c: char| c.is_ascii_whitespace() || c == '>')
                    .unwrap_or(value_area.len());
                (area_start, area_start + len)
            }
        };

        if &html[value_start..value_end] == original {
            out.push_str(&html[cursor..value_start]);
            out.push_str(replacement);
            cursor = value_end;
            replaced += 1;
        }
        search = search.max(value_end);
    }
    out.push_str(&html[cursor..]);
    (out, replaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_sources_handles_both_quote_styles() {
        let html = r#"<img src="images/a.png"><img src='images/a.png'><img src="images/b.png">"#;
        let results = vec![
            (
                ImageId(0),
                Resolution::Repaired {
                    src: "/PAM4Receiver/images/a.png".into(),
                    attempts: 3,
                },
            ),
            (ImageId(2), Resolution::Loaded),
        ];
        let originals = HashMap::from([
            (ImageId(0), "images/a.png".to_string()),
            (ImageId(2), "images/b.png".to_string()),
        ]);

        let (out, missed) = rewrite_sources(html, &results, &originals);
        assert_eq!(
            out,
            r#"<img src="/PAM4Receiver/images/a.png"><img src='/PAM4Receiver/images/a.png'><img src="images/b.png">"#
        );
        assert!(missed.is_empty());
    }

    #[test]
    fn test_rewrite_sources_handles_unquoted_and_spaced_values() {
        let html = "<img src=images/a.png alt=a><img SRC = \"images/c.png\"><img data-src=\"images/a.png\">";
        let results = vec![
            (
                ImageId(0),
                Resolution::Repaired {
                    src: "/images/a.png".into(),
                    attempts: 2,
                },
            ),
            (
                ImageId(1),
                Resolution::Repaired {
                    src: "/images/c.png".into(),
                    attempts: 2,
                },
            ),
        ];
        let originals = HashMap::from([
            (ImageId(0), "images/a.png".to_string()),
            (ImageId(1), "images/c.png".to_string()),
        ]);

        let (out, missed) = rewrite_sources(html, &results, &originals);
        assert_eq!(
            out,
            "<img src=/images/a.png alt=a><img SRC = \"/images/c.png\"><img data-src=\"images/a.png\">"
        );
        assert!(missed.is_empty());
    }

    #[test]
    fn test_rewrite_sources_reports_sources_it_cannot_find() {
        let html = r#"<img src="images/a&amp;b.png">"#;
        let results = vec![(
            ImageId(0),
            Resolution::Repaired {
                src: "/images/a&b.png".into(),
                attempts: 2,
            },
        )];
        let originals = HashMap::from([(ImageId(0), "images/a&b.png".to_string())]);

        let (out, missed) = rewrite_sources(html, &results, &originals);
        assert_eq!(out, html);
        assert_eq!(missed, vec![ImageId(0)]);
    }

    #[test]
    fn test_url_path_within_root() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("docs").join("index.html");
        std::fs::create_dir_all(page.parent().unwrap()).unwrap();
        std::fs::write(&page, "<html></html>").unwrap();

        assert_eq!(url_path_within(dir.path(), &page).unwrap(), "/docs/index.html");
    }

    #[test]
    fn test_url_path_outside_root_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let page = other.path().join("index.html");
        std::fs::write(&page, "<html></html>").unwrap();

        assert!(url_path_within(root.path(), &page).is_err());
    }
}
