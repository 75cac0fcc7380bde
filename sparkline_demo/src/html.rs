// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-page HTML report of rendered sparklines.

use std::fmt::Write as _;

use crate::svg::escape_xml;

/// One report row: an inline SVG plus its accessible summary.
#[derive(Debug)]
pub(crate) struct HtmlRow {
    pub(crate) summary: String,
    pub(crate) svg: String,
}

pub(crate) fn render_report(title: &str, rows: &[HtmlRow]) -> String {
    let title = escape_xml(title);
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 2em; }}
table {{ border-collapse: collapse; }}
td {{ padding: 4px 12px; border-bottom: 1px solid #eee; vertical-align: middle; }}
td.summary {{ color: #666; font-size: 0.85em; }}
</style>
</head>
<body>
<h1>{title}</h1>
<table>
"#
    );
    for row in rows {
        let summary = escape_xml(&row.summary);
        let _ = write!(
            out,
            "<tr><td role=\"img\" aria-label=\"{summary}\">\n{}</td><td class=\"summary\">{summary}</td></tr>\n",
            row.svg
        );
    }
    out.push_str("</table>\n</body>\n</html>\n");
    out
}
