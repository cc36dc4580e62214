//! # Catalog Loader
//!
//! Reads a source, builds the catalog and reports what was left out.

use quotedesk_core::{Catalog, CatalogBuild, CatalogSchema};
use tracing::{error, info, warn};

use crate::error::SourceResult;
use crate::source::CatalogSource;

/// Loads and builds the catalog from `source`.
///
/// Each skipped row is logged at `warn`; the load still succeeds as long as
/// one row is usable.
///
/// ## Errors
/// - `NotFound` / `Io` / `Csv` when the export cannot be read
/// - `Catalog(MalformedInput)` when the rows do not form a catalog
pub async fn load_catalog<S>(source: &S, schema: &CatalogSchema) -> SourceResult<Catalog>
where
    S: CatalogSource + ?Sized,
{
    let origin = source.describe();

    let build = match read_and_build(source, schema).await {
        Ok(build) => build,
        Err(e) => {
            error!(source = %origin, error = %e, "Catalog load failed");
            return Err(e);
        }
    };

    for skipped in &build.skipped {
        warn!(
            source = %origin,
            row = skipped.row,
            reason = %skipped.reason,
            "Skipping catalog row"
        );
    }

    info!(
        source = %origin,
        entries = build.catalog.len(),
        skipped = build.skipped.len(),
        "Catalog loaded"
    );

    Ok(build.catalog)
}

async fn read_and_build<S>(source: &S, schema: &CatalogSchema) -> SourceResult<CatalogBuild>
where
    S: CatalogSource + ?Sized,
{
    let rows = source.rows().await?;
    Ok(Catalog::build(&rows, schema)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::source::StaticSource;
    use quotedesk_core::{CoreError, RawCell};

    #[tokio::test]
    async fn test_load_from_memory() {
        let source = StaticSource::from_csv(
            "CODIGO;EXAME;VALOR\n001;Hemograma;50\n002;;30\n003;Glicose;R$ 30,00\n",
        )
        .unwrap();

        let catalog = load_catalog(&source, &CatalogSchema::default()).await.unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("glicose").unwrap().price.cents(), 3000);
    }

    #[tokio::test]
    async fn test_load_malformed_rows() {
        let source = StaticSource::new(vec![vec![RawCell::text("CODIGO")]]);

        let err = load_catalog(&source, &CatalogSchema::default()).await.unwrap_err();
        assert!(matches!(
            err,
            SourceError::Catalog(CoreError::MalformedInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_through_trait_object() {
        let source: Box<dyn CatalogSource> =
            Box::new(StaticSource::from_csv("code,name,price\nA1,Panel,10.5\n").unwrap());

        let catalog = load_catalog(source.as_ref(), &CatalogSchema::default())
            .await
            .unwrap();
        assert_eq!(catalog.entries()[0].price.cents(), 1050);
    }
}
