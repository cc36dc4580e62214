//! Loading catalogs from spreadsheet workbooks on disk.

use std::io::Write;
use std::path::PathBuf;

use quotedesk_core::{CatalogSchema, RawCell, SkipReason};
use quotedesk_source::{
    load_catalog, source_for_path, CatalogSource, SourceError, XlsxCatalogSource,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[tokio::test]
async fn test_workbook_cells_keep_their_types() {
    let rows = XlsxCatalogSource::new(fixture("exames.xlsx")).rows().await.unwrap();

    assert_eq!(rows[0][0], RawCell::Text("CÓDIGO".to_string()));
    assert_eq!(rows[1][0], RawCell::Text("001".to_string()));
    assert_eq!(rows[1][2], RawCell::Number(50.0));
    assert_eq!(rows[2][2], RawCell::Text("R$ 30,00".to_string()));
    assert_eq!(rows[4][1], RawCell::Empty);
}

#[tokio::test]
async fn test_load_workbook_catalog() {
    let source = source_for_path(fixture("exames.xlsx"));
    let catalog = load_catalog(source.as_ref(), &CatalogSchema::default()).await.unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.find("hemograma").unwrap().price.cents(), 5000);
    assert_eq!(catalog.find("002").unwrap().price.cents(), 3000);
    assert_eq!(
        catalog.find("HB-10 - Hemoglobina glicada").unwrap().price.cents(),
        4550
    );
}

#[tokio::test]
async fn test_workbook_rows_are_typed_for_the_catalog() {
    let rows = XlsxCatalogSource::new(fixture("exames.xlsx")).rows().await.unwrap();
    let build = quotedesk_core::Catalog::build(&rows, &CatalogSchema::default()).unwrap();

    assert_eq!(build.skipped.len(), 1);
    assert_eq!(build.skipped[0].row, 5);
    assert_eq!(build.skipped[0].reason, SkipReason::MissingName);
}

#[tokio::test]
async fn test_corrupt_workbook_is_reported() {
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(b"CODIGO;EXAME;VALOR\n").unwrap();
    file.flush().unwrap();

    let err = source_for_path(file.path()).rows().await.unwrap_err();
    assert!(matches!(err, SourceError::Workbook(_)), "{err}");
}

#[tokio::test]
async fn test_missing_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let err = XlsxCatalogSource::new(dir.path().join("exames.xlsx"))
        .rows()
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::NotFound { .. }));
}
