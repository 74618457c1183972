use crate::{
    document::snapshot::DocumentDefaults,
    foundation::error::CardResult,
    store::backend::{TemplateStore, validate_name},
    store::record::TemplateRecord,
};

/// One named template slot opened against a store.
///
/// Lifecycle is `open → load/save → close`; the slot borrows the store for its lifetime.
pub struct TemplateSlot<'s> {
    store: &'s mut dyn TemplateStore,
    name: String,
}

impl std::fmt::Debug for TemplateSlot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateSlot")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<'s> TemplateSlot<'s> {
    /// Open `name` on `store`.
    pub fn open(store: &'s mut dyn TemplateStore, name: impl Into<String>) -> CardResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        tracing::debug!(name = %name, "template slot opened");
        Ok(Self { store, name })
    }

    /// Slot name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the record, or `None` when nothing was saved yet.
    #[tracing::instrument(skip(self, defaults), fields(name = %self.name))]
    pub fn load(&self, defaults: &DocumentDefaults) -> CardResult<Option<TemplateRecord>> {
        let Some(v) = self.store.get(&self.name)? else {
            return Ok(None);
        };
        let record = TemplateRecord::from_value(&v, defaults);
        tracing::info!(
            elements = record.snapshot.elements.len(),
            "template loaded"
        );
        Ok(Some(record))
    }

    /// Overwrite the record.
    pub fn save(&mut self, record: &TemplateRecord) -> CardResult<()> {
        let v = record.to_value()?;
        self.store.put(&self.name, &v)?;
        tracing::info!(name = %self.name, "template saved");
        Ok(())
    }

    /// Release the slot.
    pub fn close(self) {
        tracing::debug!(name = %self.name, "template slot closed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/slot.rs"]
mod tests;
