//! Report and table rendering
//!
//! The report fragment is consumed by an external report aggregator that
//! expects this exact layout, so the header lines and indentation are fixed.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::collector::CollectedVersions;
use crate::error::TableError;

const REPORT_HEADER: &str = "
id: 'software_versions'
section_name: 'singlecellopenproblems/nf-openproblems Software Versions'
section_href: 'https://github.com/singlecellopenproblems/nf-openproblems'
plot_type: 'html'
description: 'are collected at run time from the software output.'
data: |
    <dl class=\"dl-horizontal\">

";

const REPORT_FOOTER: &str = "    </dl>\n";

/// Render the YAML/HTML report fragment.
pub fn render_report(versions: &CollectedVersions) -> String {
    let mut out = String::from(REPORT_HEADER);
    for (label, version) in versions.iter() {
        out.push_str(&format!(
            "        <dt>{}</dt><dd><samp>{}</samp></dd>\n",
            label, version
        ));
    }
    out.push_str(REPORT_FOOTER);
    out
}

/// Render the tab-separated table, one `label\tversion` row per component.
pub fn render_table(versions: &CollectedVersions) -> String {
    let mut out = String::new();
    for (label, version) in versions.iter() {
        out.push_str(&format!("{}\t{}\n", label, version));
    }
    out
}

/// Write the table to `path`, truncating any existing file.
pub fn write_table(versions: &CollectedVersions, path: &Path) -> Result<(), TableError> {
    let to_error = |source| TableError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(render_table(versions).as_bytes())
        .map_err(to_error)?;
    writer.flush().map_err(to_error)?;

    info!("Wrote {} rows to {:?}", versions.len(), path);
    Ok(())
}
