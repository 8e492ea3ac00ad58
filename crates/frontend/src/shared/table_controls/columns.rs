use super::{ColumnDef, TableControlError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSetting {
    pub key: String,
    pub visible: bool,
}

/// Visibility of the configured columns. Order is fixed by the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnState {
    columns: Vec<ColumnSetting>,
}

impl ColumnState {
    pub fn new(defs: &[ColumnDef], hidden: &[String]) -> Self {
        let mut state = Self {
            columns: defs
                .iter()
                .map(|d| ColumnSetting {
                    key: d.key.clone(),
                    visible: !hidden.contains(&d.key),
                })
                .collect(),
        };
        if !defs.is_empty() && state.visible_count() == 0 {
            // never start with nothing to render
            for c in state.columns.iter_mut() {
                c.visible = true;
            }
        }
        state
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.columns
            .iter()
            .any(|c| c.key == key && c.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.columns.iter().filter(|c| c.visible).count()
    }

    pub fn visible_keys(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.visible)
            .map(|c| c.key.as_str())
            .collect()
    }

    pub fn hidden_keys(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !c.visible)
            .map(|c| c.key.clone())
            .collect()
    }

    pub fn set_visible(&mut self, key: &str, visible: bool) -> Result<(), TableControlError> {
        let visible_count = self.visible_count();
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.key == key)
            .ok_or_else(|| TableControlError::UnknownColumn(key.to_string()))?;
        if !visible && column.visible && visible_count == 1 {
            return Err(TableControlError::LastVisibleColumn);
        }
        column.visible = visible;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs() -> Vec<ColumnDef> {
        vec![ColumnDef::new("name", "Name"), ColumnDef::new("version", "Version")]
    }

    #[test]
    fn test_hidden_by_default() {
        let state = ColumnState::new(&defs(), &["version".to_string()]);
        assert_eq!(state.visible_keys(), vec!["name"]);
        assert_eq!(state.hidden_keys(), vec!["version".to_string()]);
    }

    #[test]
    fn test_cannot_hide_last_visible() {
        let mut state = ColumnState::new(&defs(), &[]);
        state.set_visible("name", false).unwrap();
        assert_eq!(
            state.set_visible("version", false),
            Err(TableControlError::LastVisibleColumn)
        );
        assert_eq!(state.visible_count(), 1);
    }

    #[test]
    fn test_all_hidden_config_falls_back_to_all_visible() {
        let state = ColumnState::new(&defs(), &["name".to_string(), "version".to_string()]);
        assert_eq!(state.visible_count(), 2);
    }

    #[test]
    fn test_unknown_column() {
        let mut state = ColumnState::new(&defs(), &[]);
        assert!(matches!(
            state.set_visible("nope", true),
            Err(TableControlError::UnknownColumn(_))
        ));
    }
}
