//! Worksheet XML details calamine does not surface
//!
//! Data validations and cell fill colours live in the raw package parts
//! (`xl/worksheets/sheetN.xml`, `xl/styles.xml`). This module opens the
//! archive, resolves the sheet part through the workbook relationships and
//! reads those two things out of it.

use anyhow::{Context, Result, anyhow};
use log::{debug, trace};
use roxmltree::{Document, Node};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

use super::address::{CellRange, parse_cell, parse_sqref};

/// One `<dataValidation>` definition
#[derive(Debug, Clone, PartialEq)]
pub struct DataValidation {
    pub sqref: String,
    pub ranges: Vec<CellRange>,
    /// Validation type as written in the file ("list", "whole", ...); empty when absent
    pub kind: String,
    pub formula1: Option<String>,
}

impl DataValidation {
    pub fn contains(&self, row: u32, col: u32) -> bool {
        self.ranges.iter().any(|range| range.contains(row, col))
    }

    pub fn is_list(&self) -> bool {
        self.kind == "list"
    }
}

#[derive(Debug, Clone, Default)]
pub struct SheetXml {
    validations: Vec<DataValidation>,
    cell_styles: HashMap<(u32, u32), usize>,
    xf_fills: Vec<Option<String>>,
}

impl SheetXml {
    /// Read validations and fills for `sheet_name` from the workbook at `path`
    pub fn load<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open workbook: {}", path.display()))?;
        let mut archive = ZipArchive::new(file)
            .with_context(|| format!("Not an xlsx package: {}", path.display()))?;

        let workbook_xml = read_part(&mut archive, "xl/workbook.xml")?
            .ok_or_else(|| anyhow!("Workbook part missing from {}", path.display()))?;
        let rels_xml = read_part(&mut archive, "xl/_rels/workbook.xml.rels")?
            .ok_or_else(|| anyhow!("Workbook relationships missing from {}", path.display()))?;

        let sheet_part = resolve_sheet_part(&workbook_xml, &rels_xml, sheet_name)?;
        debug!("Sheet '{}' lives in {}", sheet_name, sheet_part);

        let sheet_xml = read_part(&mut archive, &sheet_part)?
            .ok_or_else(|| anyhow!("Sheet part {} missing", sheet_part))?;
        let styles_xml = read_part(&mut archive, "xl/styles.xml")?;

        Self::parse(&sheet_xml, styles_xml.as_deref())
    }

    /// Parse already extracted sheet and styles parts
    pub fn parse(sheet_xml: &str, styles_xml: Option<&str>) -> Result<Self> {
        let sheet = Document::parse(sheet_xml)
            .map_err(|e| anyhow!("Failed to parse worksheet XML: {}", e))?;

        let validations: Vec<DataValidation> = sheet
            .descendants()
            .filter(|n| n.has_tag_name("dataValidation"))
            .filter_map(parse_validation)
            .collect();
        debug!("Found {} data validations", validations.len());

        let mut cell_styles = HashMap::new();
        for cell in sheet.descendants().filter(|n| n.has_tag_name("c")) {
            let (Some(reference), Some(style)) = (cell.attribute("r"), cell.attribute("s")) else {
                continue;
            };
            if let (Some(pos), Ok(style)) = (parse_cell(reference), style.parse::<usize>()) {
                cell_styles.insert(pos, style);
            }
        }

        let xf_fills = match styles_xml {
            Some(xml) => parse_xf_fills(xml)?,
            None => Vec::new(),
        };

        Ok(Self {
            validations,
            cell_styles,
            xf_fills,
        })
    }

    pub fn validations(&self) -> &[DataValidation] {
        &self.validations
    }

    /// First validation whose sqref covers the cell
    pub fn validation_for(&self, row: u32, col: u32) -> Option<&DataValidation> {
        self.validations.iter().find(|v| v.contains(row, col))
    }

    /// Foreground colour of the cell's pattern fill
    pub fn fill_color(&self, row: u32, col: u32) -> Option<&str> {
        let style = *self.cell_styles.get(&(row, col))?;
        self.xf_fills.get(style)?.as_deref()
    }
}

fn read_part(archive: &mut ZipArchive<File>, name: &str) -> Result<Option<String>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", name)),
    };

    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .with_context(|| format!("Part {} is not valid UTF-8", name))?;
    Ok(Some(content))
}

/// Map a sheet name to its part path via workbook.xml and its relationships
fn resolve_sheet_part(workbook_xml: &str, rels_xml: &str, sheet_name: &str) -> Result<String> {
    let workbook = Document::parse(workbook_xml)
        .map_err(|e| anyhow!("Failed to parse workbook XML: {}", e))?;

    let rel_id = workbook
        .descendants()
        .find(|n| n.has_tag_name("sheet") && n.attribute("name") == Some(sheet_name))
        .and_then(|n| n.attributes().find(|a| a.name() == "id").map(|a| a.value().to_string()))
        .ok_or_else(|| anyhow!("Sheet '{}' not found in workbook", sheet_name))?;

    let rels = Document::parse(rels_xml)
        .map_err(|e| anyhow!("Failed to parse workbook relationships: {}", e))?;

    let target = rels
        .descendants()
        .find(|n| n.has_tag_name("Relationship") && n.attribute("Id") == Some(rel_id.as_str()))
        .and_then(|n| n.attribute("Target"))
        .ok_or_else(|| anyhow!("No relationship target for sheet '{}' ({})", sheet_name, rel_id))?;

    Ok(match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    })
}

fn parse_validation(node: Node) -> Option<DataValidation> {
    // Extension-list validations carry sqref and formula as <xm:sqref>/<xm:f> children
    let sqref = node
        .attribute("sqref")
        .map(str::to_string)
        .or_else(|| child_text(node, "sqref"))?;

    let formula1 = node
        .children()
        .find(|n| n.has_tag_name("formula1"))
        .and_then(|f| {
            f.text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .or_else(|| child_text(f, "f"))
        });

    let validation = DataValidation {
        ranges: parse_sqref(&sqref),
        sqref,
        kind: node.attribute("type").unwrap_or_default().to_string(),
        formula1,
    };
    trace!("Parsed validation {:?}", validation);
    Some(validation)
}

fn child_text(node: Node, tag: &str) -> Option<String> {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
}

/// For each entry of `<cellXfs>`, the foreground colour of its fill
fn parse_xf_fills(styles_xml: &str) -> Result<Vec<Option<String>>> {
    let styles = Document::parse(styles_xml)
        .map_err(|e| anyhow!("Failed to parse styles XML: {}", e))?;

    let fills: Vec<Option<String>> = styles
        .descendants()
        .find(|n| n.has_tag_name("fills"))
        .map(|fills| {
            fills
                .children()
                .filter(|n| n.has_tag_name("fill"))
                .map(fill_color)
                .collect()
        })
        .unwrap_or_default();

    let xf_fills = styles
        .descendants()
        .find(|n| n.has_tag_name("cellXfs"))
        .map(|xfs| {
            xfs.children()
                .filter(|n| n.has_tag_name("xf"))
                .map(|xf| {
                    xf.attribute("fillId")
                        .and_then(|id| id.parse::<usize>().ok())
                        .and_then(|id| fills.get(id).cloned().flatten())
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(xf_fills)
}

fn fill_color(fill: Node) -> Option<String> {
    let pattern = fill.children().find(|n| n.has_tag_name("patternFill"))?;
    if pattern.attribute("patternType") == Some("none") {
        return None;
    }

    let fg = pattern.children().find(|n| n.has_tag_name("fgColor"))?;
    if let Some(rgb) = fg.attribute("rgb") {
        Some(rgb.to_string())
    } else if let Some(theme) = fg.attribute("theme") {
        Some(format!("theme:{}", theme))
    } else {
        fg.attribute("indexed").map(|i| format!("indexed:{}", i))
    }
}
