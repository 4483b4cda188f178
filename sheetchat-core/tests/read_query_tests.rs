use sheetchat_core::{
    AskError, CellRange, CellValue, ChatClient, ChatConfig, QueryError, ReadError, SheetChat,
    build_prompt, read_range, spawn_query,
};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

// Helper to create a minimal valid XLSX file with one sheet for testing
fn create_mock_xlsx(path: &Path, sheet_data_xml: &str) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#
            .as_bytes(),
    )?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#
            .as_bytes(),
    )?;

    zip.start_file("xl/workbook.xml", options)?;
    zip.write_all(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#
            .as_bytes(),
    )?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip.write_all(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#
            .as_bytes(),
    )?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    let worksheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_data_xml}</sheetData></worksheet>"#
    );
    zip.write_all(worksheet.as_bytes())?;

    zip.finish()?;
    Ok(())
}

// A1:B3 = [["id","amt"],[1,10],[2,20]]
fn orders_sheet_data() -> &'static str {
    r#"<row r="1"><c r="A1" t="inlineStr"><is><t>id</t></is></c><c r="B1" t="inlineStr"><is><t>amt</t></is></c></row>
<row r="2"><c r="A2"><v>1</v></c><c r="B2"><v>10</v></c></row>
<row r="3"><c r="A3"><v>2</v></c><c r="B3"><v>20</v></c></row>"#
}

fn orders_grid_rows() -> Vec<Vec<CellValue>> {
    vec![
        vec![
            CellValue::Text("id".to_string()),
            CellValue::Text("amt".to_string()),
        ],
        vec![CellValue::Number(1.0), CellValue::Number(10.0)],
        vec![CellValue::Number(2.0), CellValue::Number(20.0)],
    ]
}

#[test]
fn test_read_exact_range() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("orders.xlsx");
    create_mock_xlsx(&path, orders_sheet_data())?;

    let range: CellRange = "A1:B3".parse()?;
    let grid = read_range(&path, Some(&range))?;
    assert_eq!(grid.rows, orders_grid_rows());

    Ok(())
}

#[test]
fn test_read_range_pads_to_requested_dimensions() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("orders.xlsx");
    create_mock_xlsx(&path, orders_sheet_data())?;

    let range: CellRange = "A1:B10".parse()?;
    let grid = read_range(&path, Some(&range))?;

    assert_eq!(grid.row_count(), 10);
    assert_eq!(grid.col_count(), 2);
    assert_eq!(grid.cell(2, 1), Some(&CellValue::Number(20.0)));
    for row in 3..10 {
        assert_eq!(grid.cell(row, 0), Some(&CellValue::Empty));
        assert_eq!(grid.cell(row, 1), Some(&CellValue::Empty));
    }

    Ok(())
}

#[test]
fn test_read_whole_sheet_covers_populated_extent() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("orders.xlsx");
    create_mock_xlsx(&path, orders_sheet_data())?;

    let grid = read_range(&path, None)?;
    assert_eq!(grid.rows, orders_grid_rows());

    Ok(())
}

#[test]
fn test_repeated_reads_are_identical() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("orders.xlsx");
    create_mock_xlsx(&path, orders_sheet_data())?;

    let range: CellRange = "A1:B10".parse()?;
    let first = read_range(&path, Some(&range))?;
    let second = read_range(&path, Some(&range))?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_empty_sheet() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("empty.xlsx");
    create_mock_xlsx(&path, "")?;

    let grid = read_range(&path, None)?;
    assert_eq!(grid.row_count(), 0);

    // A range over an empty sheet still has the requested dimensions.
    let range: CellRange = "A1:B2".parse()?;
    let grid = read_range(&path, Some(&range))?;
    assert_eq!(grid.row_count(), 2);
    assert_eq!(grid.col_count(), 2);
    assert!(grid.rows.iter().flatten().all(CellValue::is_empty));

    Ok(())
}

#[test]
fn test_unparseable_container_is_file_access_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("not-a-workbook.xlsx");
    std::fs::write(&path, b"this is not a zip container")?;

    assert!(matches!(
        read_range(&path, None),
        Err(ReadError::FileAccess { .. })
    ));

    Ok(())
}

#[test]
fn test_prompt_from_file_matches_reference_flow() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("orders.xlsx");
    create_mock_xlsx(&path, orders_sheet_data())?;

    let range: CellRange = "A1:B3".parse()?;
    let grid = read_range(&path, Some(&range))?;
    assert_eq!(
        build_prompt("total?", &grid),
        "total?\n\nExcel Data Summary:\nid, amt\n1, 10\n2, 20 请用中文回答。"
    );

    Ok(())
}

#[test]
fn test_facade_validates_selected_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("orders.xlsx");
    create_mock_xlsx(&path, orders_sheet_data())?;

    let chat = SheetChat::new(ChatConfig::with_api_key("sk-test"))?;

    // Default range is A1:B10.
    let grid = chat.validate_file(&path)?;
    assert_eq!(grid.row_count(), 10);
    assert_eq!(grid.col_count(), 2);

    assert!(chat.validate_file(dir.path().join("missing.xlsx")).is_err());

    Ok(())
}

#[test]
fn test_background_query_reports_network_failure() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("orders.xlsx");
    create_mock_xlsx(&path, orders_sheet_data())?;

    let config = ChatConfig {
        api_key: "sk-test".to_string(),
        endpoint: "http://127.0.0.1:9/chat/completions".to_string(),
        timeout_secs: 2,
        ..ChatConfig::default()
    };
    let client = ChatClient::new(config)?;
    let range: CellRange = "A1:B3".parse()?;
    let handle = spawn_query(client, path, Some(range), "total?".to_string());

    // The file read succeeds on the worker; the network call fails; the
    // completion still arrives, so a shell's submit control is restored.
    assert!(matches!(
        handle.wait(),
        Err(AskError::Query(QueryError::Network(_)))
    ));

    Ok(())
}
