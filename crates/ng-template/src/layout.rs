use crate::error::{TemplateError, TemplateResult};

/// Bootstrap grid widths for one form-group and the model variable it binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormGroupLayout {
    model_name: String,
    label_grid: u32,
    input_grid: u32,
    form_grid: u32,
}

impl FormGroupLayout {
    /// Explicit label and input widths.
    pub fn new(model_name: impl Into<String>, label_grid: u32, input_grid: u32, form_grid: u32) -> Self {
        Self {
            model_name: model_name.into(),
            label_grid,
            input_grid,
            form_grid,
        }
    }

    /// Derives label and input widths from a standard form grid:
    ///
    /// | grid | label | input |
    /// |------|-------|-------|
    /// | 3    | 8     | 4     |
    /// | 4    | 6     | 6     |
    /// | 6    | 4     | 8     |
    /// | 8    | 3     | 9     |
    /// | 12   | 2     | 10    |
    pub fn from_form_grid(model_name: impl Into<String>, form_grid: u32) -> TemplateResult<Self> {
        let (label, input) = match form_grid {
            3 => (8, 4),
            4 => (6, 6),
            6 => (4, 8),
            8 => (3, 9),
            12 => (2, 10),
            other => return Err(TemplateError::InvalidFormGrid(other)),
        };
        Ok(Self::new(model_name, label, input, form_grid))
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn label_grid(&self) -> u32 {
        self.label_grid
    }

    pub fn input_grid(&self) -> u32 {
        self.input_grid
    }

    pub fn form_grid(&self) -> u32 {
        self.form_grid
    }

    /// How many form-groups fit in one row.
    pub fn groups_per_row(&self) -> usize {
        (12 / self.form_grid.max(1)).max(1) as usize
    }
}

impl Default for FormGroupLayout {
    fn default() -> Self {
        Self::new("model", 6, 6, 4)
    }
}
