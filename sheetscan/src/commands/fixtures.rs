//! Offer workbooks and configuration files for command tests

use super::SheetArgs;
use sheetscan_core::config::{DEFAULT_DATA_SHEET, DEFAULT_IDENTIFIER_HEADER};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub fn sheet_args() -> SheetArgs {
    SheetArgs {
        data_sheet: DEFAULT_DATA_SHEET.to_string(),
        id_sheets: Vec::new(),
        id_header: DEFAULT_IDENTIFIER_HEADER.to_string(),
        strict: false,
    }
}

/// Field configuration reading the client name right of its label
pub fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("cell_addresses.json");
    fs::write(
        &path,
        r#"{"client": {"regex": "^Cliente:$", "offset_x": 1, "offset_y": 0}}"#,
    )
    .unwrap();
    path
}

// Helper to create an XLSX with a FICHA sheet (client in B1) and a SAP sheet
// (identifiers under "Registral"); every cell is a shared string
pub fn write_offer(path: &Path, client: &str, ids: &[&str]) {
    let mut shared = vec!["Cliente:".to_string(), client.to_string(), "Registral".to_string()];
    let mut id_rows = String::from(r#"<row r="1"><c r="A1" t="s"><v>2</v></c></row>"#);
    for (i, id) in ids.iter().enumerate() {
        shared.push(id.to_string());
        id_rows.push_str(&format!(
            r#"<row r="{0}"><c r="A{0}" t="s"><v>{1}</v></c></row>"#,
            i + 2,
            shared.len() - 1
        ));
    }
    let data_rows =
        r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>"#;

    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    let mut part = |name: &str, body: String| {
        zip.start_file(name, options).unwrap();
        zip.write_all(format!("{}\n{}", XML_HEADER, body).as_bytes())
            .unwrap();
    };

    part(
        "[Content_Types].xml",
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/worksheets/sheet2.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#
            .to_string(),
    );
    part(
        "_rels/.rels",
        format!(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="{}/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
            REL_NS
        ),
    );
    part(
        "xl/workbook.xml",
        format!(
            r#"<workbook xmlns="{}" xmlns:r="{}"><sheets>
<sheet name="FICHA" sheetId="1" r:id="rId1"/>
<sheet name="SAP" sheetId="2" r:id="rId2"/>
</sheets></workbook>"#,
            MAIN_NS, REL_NS
        ),
    );
    part(
        "xl/_rels/workbook.xml.rels",
        format!(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="{0}/worksheet" Target="worksheets/sheet1.xml"/>
<Relationship Id="rId2" Type="{0}/worksheet" Target="worksheets/sheet2.xml"/>
<Relationship Id="rId3" Type="{0}/sharedStrings" Target="sharedStrings.xml"/>
</Relationships>"#,
            REL_NS
        ),
    );
    for (name, rows) in [("sheet1", data_rows.to_string()), ("sheet2", id_rows)] {
        part(
            &format!("xl/worksheets/{}.xml", name),
            format!(
                r#"<worksheet xmlns="{}"><sheetData>{}</sheetData></worksheet>"#,
                MAIN_NS, rows
            ),
        );
    }
    let strings: String = shared
        .iter()
        .map(|s| format!("<si><t>{}</t></si>", s))
        .collect();
    part(
        "xl/sharedStrings.xml",
        format!(
            r#"<sst xmlns="{0}" count="{1}" uniqueCount="{1}">{2}</sst>"#,
            MAIN_NS,
            shared.len(),
            strings
        ),
    );

    zip.finish().unwrap();
}
