//! FormRegistry — YAML-on-disk store for form schemas.
//!
//! Manages form definitions as YAML files under a `forms/` directory, one
//! file per form, with an in-memory index for lookup by form name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::fs;
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::types::{duplicate_names, FormSchema};

/// Builder for `FormRegistry`. Created by `FormRegistry::open()`.
pub struct FormRegistryBuilder {
    root: PathBuf,
    defaults: Vec<FormSchema>,
}

impl FormRegistryBuilder {
    /// Provide default forms to ship with the application.
    /// Defaults are seeded on first open; existing files are preserved.
    pub fn with_defaults(mut self, forms: Vec<FormSchema>) -> Self {
        self.defaults = forms;
        self
    }

    /// Build the registry: create the directory, seed defaults, load from disk.
    pub async fn build(self) -> Result<FormRegistry> {
        let root = self.root;
        fs::create_dir_all(&root).await?;

        // Seed defaults before loading; matched by form name
        for form in &self.defaults {
            let path = form_path(&root, &form.name);
            if !path.exists() {
                let yaml = serde_yaml::to_string(form)?;
                atomic_write(&path, yaml.as_bytes()).await?;
                debug!(name = %form.name, "seeded default form");
            }
        }

        let mut registry = FormRegistry {
            root,
            forms: Vec::new(),
            name_index: HashMap::new(),
        };
        registry.load_forms().await?;

        debug!(forms = registry.forms.len(), "form registry opened");

        Ok(registry)
    }
}

/// Registry of form schemas backed by a directory on disk.
///
/// ```text
/// forms/
///   User Registration.yaml
///   Job Application.yaml
/// ```
pub struct FormRegistry {
    root: PathBuf,
    forms: Vec<FormSchema>,
    name_index: HashMap<String, usize>,
}

impl FormRegistry {
    /// Open or create a forms directory. Returns a builder for optional
    /// configuration.
    pub fn open(root: impl Into<PathBuf>) -> FormRegistryBuilder {
        FormRegistryBuilder {
            root: root.into(),
            defaults: Vec::new(),
        }
    }

    /// Get a form by name.
    pub fn get_form(&self, name: &str) -> Option<&FormSchema> {
        self.name_index.get(name).map(|&i| &self.forms[i])
    }

    /// All loaded forms.
    pub fn all_forms(&self) -> &[FormSchema] {
        &self.forms
    }

    /// Write (create or update) a form. Persists to YAML immediately.
    pub async fn write_form(&mut self, form: &FormSchema) -> Result<()> {
        let yaml = serde_yaml::to_string(form)?;
        let path = form_path(&self.root, &form.name);
        atomic_write(&path, yaml.as_bytes()).await?;

        if let Some(&idx) = self.name_index.get(&form.name) {
            self.forms[idx] = form.clone();
        } else {
            let idx = self.forms.len();
            self.forms.push(form.clone());
            self.name_index.insert(form.name.clone(), idx);
        }

        Ok(())
    }

    /// Delete a form by name.
    pub async fn delete_form(&mut self, name: &str) -> Result<()> {
        let idx = self
            .name_index
            .get(name)
            .copied()
            .ok_or_else(|| SchemaError::FormNotFound { name: name.into() })?;

        let path = form_path(&self.root, name);
        let _ = fs::remove_file(&path).await;

        self.name_index.remove(name);

        // Swap-remove and fix the index
        self.forms.swap_remove(idx);
        if idx < self.forms.len() {
            let moved = &self.forms[idx];
            self.name_index.insert(moved.name.clone(), idx);
        }

        Ok(())
    }

    /// The root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn load_forms(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let content = fs::read_to_string(&path).await?;
            match serde_yaml::from_str::<FormSchema>(&content) {
                Ok(form) => {
                    let dupes = duplicate_names(&form.fields);
                    if !dupes.is_empty() {
                        tracing::warn!(name = %form.name, ?dupes, "duplicate field names in form");
                    }
                    let idx = self.forms.len();
                    self.name_index.insert(form.name.clone(), idx);
                    self.forms.push(form);
                }
                Err(e) => {
                    tracing::warn!(?path, %e, "skipping invalid form definition");
                }
            }
        }
        Ok(())
    }
}

fn form_path(root: &Path, name: &str) -> PathBuf {
    root.join(format!("{name}.yaml"))
}

/// Write to a temp file then rename for atomic persistence.
async fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent dir"))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let tmp = dir.join(format!(".tmp_{}_{nanos}", std::process::id()));
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
