//! Template collection management
//!
//! Layers the rules the raw store does not know about: system templates
//! cannot be deleted, local state stays untouched when the store fails,
//! and deleting the selected template falls back to the next remaining
//! one.

use crate::store::TemplateStore;
use crate::{EditorError, Result};
use cert_model::{is_system_template, system_templates, CertificateData, Template};

pub struct TemplateManager<S: TemplateStore> {
    store: S,
    templates: Vec<Template>,
    selected_id: Option<String>,
}

impl<S: TemplateStore> TemplateManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            templates: Vec::new(),
            selected_id: None,
        }
    }

    /// Load templates from the store, seeding the built-in system
    /// templates ahead of any user templates the store holds
    pub fn load(&mut self) -> Result<()> {
        let stored = self.store.list_templates()?;
        let mut templates = system_templates();
        for template in stored {
            if !templates.iter().any(|t| t.id == template.id) {
                templates.push(template);
            }
        }

        if self.selected_id.is_none() {
            self.selected_id = templates.first().map(|t| t.id.clone());
        }
        self.templates = templates;
        Ok(())
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn selected(&self) -> Option<&Template> {
        let id = self.selected_id.as_deref()?;
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn select(&mut self, id: &str) {
        if self.templates.iter().any(|t| t.id == id) {
            self.selected_id = Some(id.to_string());
        }
    }

    /// The template a certificate renders with
    ///
    /// A missing or dangling `templateId` falls back to the first
    /// template, so a certificate always stays renderable after its
    /// template was deleted.
    pub fn template_for(&self, data: &CertificateData) -> Option<&Template> {
        data.template_id
            .as_deref()
            .and_then(|id| self.templates.iter().find(|t| t.id == id))
            .or_else(|| self.templates.first())
    }

    /// Validate and persist a template, then mirror it locally
    ///
    /// The local collection is only updated after the store accepts the
    /// save, so a failure never leaves the UI showing unpersisted state.
    pub fn save_template(&mut self, template: Template) -> Result<()> {
        template.validate()?;
        let saved = self.store.save_template(&template).map_err(|e| {
            log::warn!("template save failed for {}: {e}", template.id);
            e
        })?;

        match self.templates.iter_mut().find(|t| t.id == saved.id) {
            Some(existing) => *existing = saved,
            None => self.templates.push(saved),
        }
        Ok(())
    }

    /// Delete a user template; system templates are rejected
    ///
    /// When the deleted template was selected, selection falls back to
    /// the first remaining template, or clears if none remain.
    pub fn delete_template(&mut self, id: &str) -> Result<bool> {
        if is_system_template(id) {
            return Err(EditorError::SystemTemplateProtected(id.to_string()));
        }

        let deleted = self.store.delete_template(id).map_err(|e| {
            log::warn!("template delete failed for {id}: {e}");
            e
        })?;
        if deleted {
            self.templates.retain(|t| t.id != id);
            if self.selected_id.as_deref() == Some(id) {
                self.selected_id = self.templates.first().map(|t| t.id.clone());
            }
            log::info!("deleted template {id}");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn user_template(id: &str) -> Template {
        let mut template = system_templates().remove(0);
        template.id = id.to_string();
        template.name = "Custom".to_string();
        template
    }

    fn loaded_manager() -> TemplateManager<MemoryStore> {
        let mut manager = TemplateManager::new(MemoryStore::new());
        manager.load().unwrap();
        manager
    }

    #[test]
    fn load_seeds_system_templates() {
        let manager = loaded_manager();
        assert_eq!(manager.templates().len(), 4);
        assert_eq!(manager.selected().map(|t| t.id.as_str()), Some("classic-gold"));
    }

    #[test]
    fn dangling_template_id_falls_back_to_the_first_template() {
        let mut manager = loaded_manager();
        manager.save_template(user_template("custom-1")).unwrap();

        let data = CertificateData {
            template_id: Some("custom-1".to_string()),
            ..CertificateData::default()
        };
        assert_eq!(
            manager.template_for(&data).map(|t| t.id.as_str()),
            Some("custom-1")
        );

        // Deleting the template leaves certificates pointing at a stale
        // id; they keep rendering with the first template
        manager.delete_template("custom-1").unwrap();
        assert_eq!(
            manager.template_for(&data).map(|t| t.id.as_str()),
            Some("classic-gold")
        );
    }

    #[test]
    fn certificate_without_a_template_id_uses_the_first_template() {
        let manager = loaded_manager();
        assert_eq!(
            manager
                .template_for(&CertificateData::default())
                .map(|t| t.id.as_str()),
            Some("classic-gold")
        );
    }

    #[test]
    fn deleting_a_system_template_is_rejected() {
        let mut manager = loaded_manager();
        let result = manager.delete_template("classic-gold");
        assert!(matches!(
            result,
            Err(EditorError::SystemTemplateProtected(_))
        ));
        assert_eq!(manager.templates().len(), 4);
    }

    #[test]
    fn deleting_the_selected_user_template_falls_back() {
        let mut manager = loaded_manager();
        manager.save_template(user_template("custom-1699999999")).unwrap();
        manager.select("custom-1699999999");

        assert!(manager.delete_template("custom-1699999999").unwrap());
        assert!(manager
            .templates()
            .iter()
            .all(|t| t.id != "custom-1699999999"));
        // Selection falls back to the first remaining template
        assert_eq!(manager.selected().map(|t| t.id.as_str()), Some("classic-gold"));
    }

    #[test]
    fn deleting_an_unknown_template_returns_false() {
        let mut manager = loaded_manager();
        assert!(!manager.delete_template("custom-missing").unwrap());
    }

    #[test]
    fn save_failure_leaves_local_state_unchanged() {
        let mut manager = loaded_manager();
        manager.store.set_failing(true);

        let result = manager.save_template(user_template("custom-1"));
        assert!(matches!(result, Err(EditorError::Store(_))));
        assert_eq!(manager.templates().len(), 4);
        assert!(manager.templates().iter().all(|t| t.id != "custom-1"));
    }

    #[test]
    fn delete_failure_leaves_local_state_unchanged() {
        let mut manager = loaded_manager();
        manager.save_template(user_template("custom-1")).unwrap();
        manager.select("custom-1");
        manager.store.set_failing(true);

        assert!(manager.delete_template("custom-1").is_err());
        assert!(manager.templates().iter().any(|t| t.id == "custom-1"));
        assert_eq!(manager.selected().map(|t| t.id.as_str()), Some("custom-1"));
    }

    #[test]
    fn invalid_template_is_rejected_before_the_store() {
        let mut manager = loaded_manager();
        let mut template = user_template("custom-1");
        template.elements[0].set_position(120.0, 50.0);

        assert!(matches!(
            manager.save_template(template),
            Err(EditorError::Model(_))
        ));
        assert_eq!(manager.templates().len(), 4);
    }

    #[test]
    fn save_replaces_an_existing_template() {
        let mut manager = loaded_manager();
        manager.save_template(user_template("custom-1")).unwrap();

        let mut edited = user_template("custom-1");
        edited.name = "Renamed".to_string();
        manager.save_template(edited).unwrap();

        assert_eq!(manager.templates().len(), 5);
        let stored = manager.templates().iter().find(|t| t.id == "custom-1").unwrap();
        assert_eq!(stored.name, "Renamed");
    }
}
