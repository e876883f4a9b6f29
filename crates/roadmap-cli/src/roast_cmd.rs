//! `roadmap roast` command: a short jab about an unfinished task.

use anyhow::{Result, bail};

use roadmap_core::RoadmapService;
use roadmap_core::prompt::RoastContext;

/// Ask for a roast and print it. Falls back to a plain reminder on failure.
pub async fn run_roast(service: &RoadmapService, ctx: RoastContext) -> Result<()> {
    if ctx.task_title.trim().is_empty() {
        bail!("--task must not be empty");
    }
    let message = service.roast_message(&ctx).await;
    println!("{message}");
    Ok(())
}
