//! Export stored pages as static HTML

use anyhow::Result;

use crate::generator::Generator;
use crate::Folio;

pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let store = folio.open_store()?;
    tracing::info!("Loaded {} pages", store.len());

    let report = Generator::new(folio).generate(&store)?;

    if !report.protected.is_empty() {
        tracing::info!(
            "Left out {} protected pages: {}",
            report.protected.len(),
            report.protected.join(", ")
        );
    }

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages in {:.2}s",
        report.written,
        duration.as_secs_f64()
    );

    Ok(())
}
