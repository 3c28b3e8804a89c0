use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use log::{error, info};

use super::{ShareImage, SummaryCard};

/// Whatever hands the card to the outside world (share sheet, messenger...).
pub trait ShareTarget {
    fn share(&self, image: &ShareImage, caption: &str) -> Result<()>;
}

/// Captures the card and shares it. Failures are logged and reported as
/// `false`; they never interrupt the slideshow.
pub fn share_summary(target: &dyn ShareTarget, card: &SummaryCard) -> bool {
    let image = match card.capture_shareable_image() {
        Ok(image) => image,
        Err(err) => {
            error!("Failed to capture summary card: {err:#}");
            return false;
        }
    };

    match target.share(&image, &card.caption()) {
        Ok(()) => {
            info!("Shared {} summary ({} bytes)", card.period.label(), image.bytes.len());
            true
        }
        Err(err) => {
            error!("Failed to share summary: {err:#}");
            false
        }
    }
}

/// Writes the PNG and its caption side by side into a directory.
pub struct DirectoryShareTarget {
    dir: PathBuf,
}

impl DirectoryShareTarget {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl ShareTarget for DirectoryShareTarget {
    fn share(&self, image: &ShareImage, caption: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create share directory {}", self.dir.display()))?;

        let stem = format!("health-wrapped-{}", Local::now().format("%Y%m%d-%H%M%S"));
        let image_path = self.dir.join(format!("{stem}.png"));
        let caption_path = self.dir.join(format!("{stem}.txt"));

        fs::write(&image_path, &image.bytes)
            .with_context(|| format!("failed to write {}", image_path.display()))?;
        fs::write(&caption_path, caption)
            .with_context(|| format!("failed to write {}", caption_path.display()))?;
        Ok(())
    }
}
