use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;

impl Repository {
    pub async fn init(&self) -> anyhow::Result<()> {
        let metadata_path = self.metadata_path();

        if self.is_initialized() {
            writeln!(
                self.writer(),
                "Already a kit repository in {}",
                metadata_path.display()
            )?;
            return Ok(());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .kit/objects directory")?;

        self.refs()
            .init()
            .context("Failed to create initial HEAD reference")?;

        let index = self.index();
        let mut index = index.lock().await;
        // nothing is loaded yet, so this writes an empty index
        index
            .write_updates()
            .context("Failed to create .kit/index file")?;

        writeln!(
            self.writer(),
            "Initialized empty kit repository in {}",
            metadata_path.display()
        )?;

        Ok(())
    }
}
