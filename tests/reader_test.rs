//! 読み込みの統合テスト
//!
//! CSV（区切り文字の自動判定）と Excel（シート選択）を検証

use picking_sizer::error::PickingError;
use picking_sizer::reader;
use picking_sizer_common::Scalar;
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

fn add_sheet(workbook: &mut Workbook, name: &str, headers: &[&str], rows: &[(&str, &str, f64)]) {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name).unwrap();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (idx, (code, department, output)) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, *code).unwrap();
        sheet.write_string(row, 1, *department).unwrap();
        sheet.write_number(row, 2, *output).unwrap();
    }
}

#[test]
fn test_read_semicolon_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("base.csv");
    std::fs::write(
        &path,
        "Código SKU;Categoria;Volume Diário (m³)\n1001;Alimentos;0,025492\n;;\n1002;Bebidas;0,027583\n",
    )
    .unwrap();

    let sheet = reader::read_sheet(&path, "Base").unwrap();
    assert!(sheet.name.is_none());
    assert_eq!(sheet.headers, vec!["Código SKU", "Categoria", "Volume Diário (m³)"]);
    assert_eq!(sheet.rows.len(), 2);
    assert_eq!(
        sheet.rows[0].get("Volume Diário (m³)"),
        Some(&Scalar::Text("0,025492".into()))
    );
}

#[test]
fn test_read_excel_prefers_base_sheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("base.xlsx");
    let mut workbook = Workbook::new();
    add_sheet(&mut workbook, "Capa", &["Outro", "X", "Y"], &[("a", "b", 1.0)]);
    add_sheet(
        &mut workbook,
        "Base",
        &["Código", "Setor", "Saída Cúbica"],
        &[("A1", "Bebidas", 0.5), ("A2", "Limpeza", 0.01)],
    );
    workbook.save(&path).unwrap();

    let sheet = reader::read_sheet(&path, "base").unwrap();
    assert_eq!(sheet.name.as_deref(), Some("Base"));
    assert_eq!(sheet.headers, vec!["Código", "Setor", "Saída Cúbica"]);
    assert_eq!(sheet.rows.len(), 2);
    assert_eq!(sheet.rows[0].get("Saída Cúbica"), Some(&Scalar::Number(0.5)));
    assert_eq!(sheet.rows[1].get("Setor"), Some(&Scalar::Text("Limpeza".into())));
}

#[test]
fn test_read_excel_falls_back_to_first_sheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dados.xlsx");
    let mut workbook = Workbook::new();
    add_sheet(
        &mut workbook,
        "Planilha1",
        &["SKU", "Departamento", "Consumo"],
        &[("B1", "Mercearia", 0.2)],
    );
    workbook.save(&path).unwrap();

    let sheet = reader::read_sheet(&path, "Base").unwrap();
    assert_eq!(sheet.name.as_deref(), Some("Planilha1"));
    assert_eq!(sheet.rows.len(), 1);
}

#[test]
fn test_read_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("base.pdf");
    std::fs::write(&path, "x").unwrap();

    let result = reader::read_sheet(&path, "Base");
    assert!(matches!(result, Err(PickingError::UnsupportedFormat(ext)) if ext == "pdf"));
}
