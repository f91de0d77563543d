//! Ask command - one-shot answer printed to stdout

use clap::Args;
use tracing::{info, warn};

use crate::Services;

#[derive(Debug, Args)]
pub struct AskArgs {
    /// Question to answer
    pub question: String,
}

pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let services = crate::build_services(&config)?;

    ensure_index(&services).await?;

    let answer = services.answering.answer(&args.question).await?;
    println!("{}", answer);

    Ok(())
}

/// Publish the persisted index, building a fresh one when it is missing or unreadable
async fn ensure_index(services: &Services) -> anyhow::Result<()> {
    let restored = match services.knowledge_base.index().restore().await {
        Ok(restored) => restored,
        Err(e) => {
            warn!(error = %e, "Could not read persisted index");
            false
        }
    };

    if !restored {
        info!("No usable persisted index, building one first");
        services.knowledge_base.rebuild().await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppConfig;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.knowledge.faq_path = dir.path().join("FAQ.txt");
        config.knowledge.upload_dir = dir.path().join("uploads");
        config.knowledge.index_dir = dir.path().join("index");
        config
    }

    #[tokio::test]
    async fn test_corrupt_index_is_rebuilt() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("FAQ.txt"), "Q: What are your hours? A: 9-5.").unwrap();
        std::fs::create_dir_all(dir.path().join("index")).unwrap();
        std::fs::write(dir.path().join("index").join("index.json"), "{ not json").unwrap();
        let services = crate::build_services(&config(&dir)).unwrap();

        ensure_index(&services).await.unwrap();

        let status = services.knowledge_base.index().status().await;
        assert!(status.ready);
        assert_eq!(status.chunks, 1);
    }
}
