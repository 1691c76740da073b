use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use evalchain_core::{Document, Value};

pub struct TextLoader {
    path: PathBuf,
}

impl TextLoader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<Vec<Document>, std::io::Error> {
        let content = fs::read_to_string(&self.path)?;
        let mut metadata = HashMap::new();
        metadata.insert(
            "source".to_string(),
            Value::String(self.path.to_string_lossy().to_string()),
        );

        Ok(vec![Document {
            id: self.path.to_string_lossy().to_string(),
            content,
            metadata,
            embedding: None,
        }])
    }
}
