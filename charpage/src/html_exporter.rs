//! HTML exporter for character pages
//!
//! This module renders a [`Document`] to a single standalone HTML file with:
//! - An inline stylesheet whose color variables come from the theme
//! - A stats table beside an image slider
//! - Memo panels, a two-column grid of mini-sections, and nested pulldowns
//! - An inline script driving the slider
//!
//! Rendering is a pure function of the document and [`RenderOptions`]:
//! equal inputs always produce byte-identical output.

use crate::document_model::{
    is_safe_color, Document, MemoPanel, MiniSection, Pulldown, PulldownChild, StatEntry, Theme,
    ThemeSlot,
};
use crate::escape::escape_html;
use crate::slider::{SliderCursor, SLIDER_SCRIPT};
use itertools::Itertools;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during HTML export
#[derive(Error, Debug)]
pub enum HtmlExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// How theme values reach the stylesheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemePolicy {
    /// Emit every slot verbatim
    #[default]
    Trusted,
    /// Replace values outside the safe color grammar with the default preset's
    Strict,
}

/// Rendering options that are not part of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Value of the `<html lang>` attribute
    pub lang: String,
    /// Theme value handling
    pub theme_policy: ThemePolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            theme_policy: ThemePolicy::Trusted,
        }
    }
}

/// Render a document with default options
pub fn render(doc: &Document) -> String {
    render_with(doc, &RenderOptions::default())
}

/// Render a document to a complete HTML page
///
/// # Parameters
/// * `doc` - The document to render
/// * `options` - Language and theme handling
///
/// # Returns
/// * `String` - The standalone HTML document
pub fn render_with(doc: &Document, options: &RenderOptions) -> String {
    let mut output = String::new();

    write_html_header(&mut output, doc, options);

    output.push_str("<body>\n");
    output.push_str("<div class=\"container\">\n");

    write_page_header(&mut output, &doc.title, &doc.subtitle);
    output.push_str("  <section class=\"grid-2\">\n");
    write_stats_card(&mut output, &doc.stats);
    output.push('\n');
    write_slider_card(&mut output, &doc.images());
    output.push_str("  </section>\n\n");

    write_memo_panels(&mut output, &doc.memo_panels);
    output.push('\n');
    write_mini_sections(&mut output, &doc.mini_sections);
    output.push('\n');
    write_pulldowns(&mut output, &doc.pulldowns);

    output.push_str("</div>\n");
    output.push_str("<script>\n");
    output.push_str(SLIDER_SCRIPT);
    output.push_str("\n</script>\n");
    output.push_str("</body>\n");
    output.push_str("</html>\n");

    output
}

/// Render a document and write it to a file
///
/// # Parameters
/// * `doc` - The document to export
/// * `options` - Language and theme handling
/// * `output_path` - Path where the HTML file will be written
///
/// # Returns
/// * `Ok(usize)` - Number of bytes written
/// * `Err(HtmlExportError)` - Error creating directories or writing the file
pub fn to_html(
    doc: &Document,
    options: &RenderOptions,
    output_path: &Path,
) -> Result<usize, HtmlExportError> {
    let output = render_with(doc, options);
    write_file(output_path, &output)?;
    Ok(output.len())
}

/// Write rendered HTML, creating parent directories if they don't exist
pub(crate) fn write_file(output_path: &Path, html: &str) -> Result<(), HtmlExportError> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(output_path)?;
    file.write_all(html.as_bytes())?;
    Ok(())
}

/// Write the document head with the themed stylesheet
fn write_html_header(output: &mut String, doc: &Document, options: &RenderOptions) {
    output.push_str("<!doctype html>\n");
    output.push_str(&format!("<html lang=\"{}\">\n", escape_html(&options.lang)));
    output.push_str("<head>\n");
    output.push_str("<meta charset=\"utf-8\"/>\n");
    output.push_str("<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\"/>\n");
    output.push_str(&format!("<title>{}</title>\n", escape_html(&doc.title)));
    output.push_str("<style>\n");
    write_theme_variables(output, &doc.theme, options.theme_policy);
    output.push_str(CSS_STYLES);
    output.push_str("</style>\n");
    output.push_str("</head>\n");
}

/// Write the `:root` block mapping theme slots to CSS custom properties
///
/// Values are CSS, not HTML text, so they are not HTML-escaped.
fn write_theme_variables(output: &mut String, theme: &Theme, policy: ThemePolicy) {
    let fallback = Theme::default();

    output.push_str(":root{\n");
    for slot in ThemeSlot::ALL {
        let value = theme.get(slot);
        let value = match policy {
            ThemePolicy::Trusted => value,
            ThemePolicy::Strict if is_safe_color(value) => value,
            ThemePolicy::Strict => {
                log::warn!(
                    "Theme slot {} has unsafe value {:?}; using {}",
                    slot,
                    value,
                    fallback.get(slot)
                );
                fallback.get(slot)
            }
        };
        output.push_str(&format!("  {}:{};\n", slot.css_variable(), value));
    }
    output.push_str("  --radius-xl:24px; --shadow:0 10px 30px rgba(0,0,0,.3);\n");
    output.push_str("}\n");
}

/// Write the title block
fn write_page_header(output: &mut String, title: &str, subtitle: &str) {
    output.push_str("  <header>\n");
    output.push_str(&format!(
        "    <h1><span class=\"underline\">{}</span></h1>\n",
        escape_html(title)
    ));
    output.push_str(&format!(
        "    <p class=\"subtitle\">{}</p>\n",
        escape_html(subtitle)
    ));
    output.push_str("  </header>\n\n");
}

/// Write the stats table card
fn write_stats_card(output: &mut String, stats: &[StatEntry]) {
    let rows = stats
        .iter()
        .map(|stat| {
            format!(
                "          <tr><td>{}</td><td>{}</td></tr>\n",
                escape_html(&stat.name),
                escape_html(&stat.value)
            )
        })
        .join("");

    output.push_str("    <div class=\"card\">\n");
    output.push_str("      <table class=\"stats\">\n");
    output.push_str("        <thead><tr><th>Item</th><th>Value</th></tr></thead>\n");
    output.push_str("        <tbody>\n");
    output.push_str(&rows);
    output.push_str("        </tbody>\n");
    output.push_str("      </table>\n");
    output.push_str("    </div>\n");
}

/// Write the image slider card
///
/// Only the cursor's starting image carries the `active` class; thumbnails
/// are added by the embedded script.
fn write_slider_card(output: &mut String, images: &[String]) {
    let cursor = SliderCursor::new(images.len());

    output.push_str("    <div class=\"card\">\n");
    output.push_str("      <div class=\"slider\" id=\"slider\">\n");
    output.push_str("        <button class=\"navbtn prev\" aria-label=\"Previous\">&lsaquo;</button>\n");
    for (i, url) in images.iter().enumerate() {
        let class = if cursor.is_active(i) {
            "mainimg active"
        } else {
            "mainimg"
        };
        output.push_str(&format!(
            "        <img class=\"{}\" src=\"{}\" alt=\"Portrait {}\">\n",
            class,
            escape_html(url),
            i + 1
        ));
    }
    output.push_str("        <button class=\"navbtn next\" aria-label=\"Next\">&rsaquo;</button>\n");
    output.push_str("        <div class=\"thumbs\" aria-label=\"Thumbnails\"></div>\n");
    output.push_str("      </div>\n");
    output.push_str("    </div>\n");
}

/// Write every memo panel, in order, inside a wrapper that is always present
fn write_memo_panels(output: &mut String, panels: &[MemoPanel]) {
    output.push_str("  <div class=\"memos\">\n");
    for panel in panels {
        output.push_str(&format!(
            "    <section class=\"panel\"><h2>{}</h2><p>{}</p></section>\n",
            escape_html(&panel.title),
            escape_html(&panel.body)
        ));
    }
    output.push_str("  </div>\n");
}

/// Write the mini-section grid
fn write_mini_sections(output: &mut String, sections: &[MiniSection]) {
    output.push_str("  <section class=\"panel\">\n");
    output.push_str("    <div class=\"panel-grid\">\n");
    for section in sections {
        output.push_str(&format!(
            "      <div><h3>{}</h3><ul>{}</ul></div>\n",
            escape_html(&section.title),
            list_items(&section.items())
        ));
    }
    output.push_str("    </div>\n");
    output.push_str("  </section>\n");
}

/// Write the two-level pulldowns
fn write_pulldowns(output: &mut String, pulldowns: &[Pulldown]) {
    output.push_str("  <section class=\"panel\">\n");
    for pulldown in pulldowns {
        output.push_str("    <details class=\"details\">\n");
        output.push_str(&format!(
            "      <summary><span class=\"caret\">&#9660;</span> {}</summary>\n",
            escape_html(&pulldown.title)
        ));
        for child in &pulldown.children {
            write_pulldown_child(output, child);
        }
        output.push_str("    </details>\n");
    }
    output.push_str("  </section>\n");
}

/// Write one nested pulldown
fn write_pulldown_child(output: &mut String, child: &PulldownChild) {
    output.push_str("      <details class=\"details nested\">\n");
    output.push_str(&format!(
        "        <summary><span class=\"caret\">&#9660;</span> {}</summary>\n",
        escape_html(&child.title)
    ));
    output.push_str("        <div class=\"nested-content\">\n");
    output.push_str(&format!("          <ul>{}</ul>\n", list_items(&child.items())));
    output.push_str("        </div>\n");
    output.push_str("      </details>\n");
}

/// Convert derived items to escaped `<li>` elements
fn list_items(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .join("")
}

/// Layout and typography rules; colors come from the `:root` variables
const CSS_STYLES: &str = r#"*{box-sizing:border-box}
body{margin:0;background:var(--bg);color:var(--ink);
  font:14px/1.6 system-ui,-apple-system,"Segoe UI",Roboto,"Noto Sans JP","Hiragino Kaku Gothic ProN",Meiryo,Arial,sans-serif}
.container{max-width:1200px;margin:0 auto;padding:24px 16px 64px}

h1{font-size:clamp(32px,5vw,48px);margin:0 0 6px;font-weight:900;color:var(--title-color)}
.subtitle{font-weight:700;font-size:clamp(18px,2.5vw,24px);margin:0 0 20px;color:var(--subtitle-color)}
.underline{
  display:inline-block; padding-bottom:6px; padding-right:10px;
  background-image:repeating-linear-gradient(-45deg,var(--underline-color),var(--underline-color) 6px,transparent 6px,transparent 12px);
  background-repeat:repeat-x; background-size:12px 12px; background-position:0 100%;
}

.grid-2{display:grid;gap:24px}
@media(min-width:1024px){ .grid-2{grid-template-columns:1fr 2fr} }

.card{background:var(--panel);border-radius:var(--radius-xl);box-shadow:var(--shadow);padding:24px}
.panel{background:var(--panel);color:var(--ink);border-radius:48px;box-shadow:var(--shadow);padding:24px;margin-top:40px}
.panel h2,.panel h3{color:var(--heading-color)}
.panel h3{margin:0 0 8px;font-size:22px;font-weight:900}
.panel p{white-space:pre-wrap}

table{width:220px;margin:auto;border-collapse:collapse;font-size:18px;color:var(--ink)}
thead th{background:var(--panel);padding:8px;text-align:left;border-bottom:1px solid #444}
tbody td{padding:8px;border-bottom:1px solid #333}
tbody tr:nth-child(odd){background:var(--table-alt);color:var(--table-alt-ink)}
.card table{margin-top:16px}

.slider{position:relative;height:700px;display:flex;align-items:center;justify-content:center}
.mainimg{max-height:100%;max-width:100%;object-fit:contain;border-radius:18px;display:none}
.mainimg.active{display:block}
.navbtn{position:absolute;top:50%;transform:translateY(-50%);width:44px;height:44px;border:none;border-radius:9999px;color:#fff;background:rgba(0,0,0,.6);font-size:26px;cursor:pointer}
.navbtn.prev{left:8px}.navbtn.next{right:8px}
.thumbs{position:absolute;bottom:-8px;left:50%;transform:translateX(-50%);display:flex;gap:8px}
.thumb{width:60px;height:60px;padding:0;border-radius:10px;overflow:hidden;border:3px solid transparent;cursor:pointer}
.thumb img{width:100%;height:100%;object-fit:cover}
.thumb.active{border-color:var(--title-color)}
@media(max-width:768px){ .slider{height:420px} }

.panel-grid{display:grid;gap:24px}
@media(min-width:768px){ .panel-grid{grid-template-columns:1fr 1fr} }

.details summary{cursor:pointer;list-style:none;display:flex;gap:10px;font-weight:900;font-size:20px;color:var(--heading-color)}
.details summary::-webkit-details-marker{display:none}
.caret{font-size:20px}
.details.nested{margin-left:20px;margin-top:12px}
.nested-content{margin-top:10px;background:var(--nested-bg);border-radius:16px;padding:12px;max-height:240px;overflow:auto}
"#;
