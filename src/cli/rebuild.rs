//! Rebuild command - one-shot knowledge base rebuild

use crate::infrastructure::services::RebuildOutcome;

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let services = crate::build_services(&config)?;

    let outcome = services.knowledge_base.rebuild().await?;

    match &outcome {
        RebuildOutcome::Rebuilt(stats) => {
            println!(
                "Rebuilt index: {} documents, {} chunks, fingerprint {}",
                stats.documents, stats.chunks, stats.fingerprint
            );
            for skipped in &stats.skipped_files {
                println!("  skipped {}: {}", skipped.source, skipped.reason);
            }
        }
        RebuildOutcome::SkippedEmpty => println!("Document store is empty, index left unchanged"),
        RebuildOutcome::Coalesced => println!("A concurrent rebuild already covered this request"),
    }

    Ok(())
}
