//! Structured description of the package selection form
//!
//! Package names come straight from the backend. They are carried as plain
//! values here and rendered as literal text, never spliced into markup.

/// One selectable entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageForm {
    prompt: String,
    options: Vec<PackageOption>,
    ok_label: String,
    cancel_label: String,
}

impl PackageForm {
    pub fn builder() -> PackageFormBuilder {
        PackageFormBuilder::default()
    }

    /// Form offering `names` in order, each as both value and label
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder().names(names).build()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[PackageOption] {
        &self.options
    }

    pub fn ok_label(&self) -> &str {
        &self.ok_label
    }

    pub fn cancel_label(&self) -> &str {
        &self.cancel_label
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

pub struct PackageFormBuilder {
    prompt: String,
    options: Vec<PackageOption>,
    ok_label: String,
    cancel_label: String,
}

impl Default for PackageFormBuilder {
    fn default() -> Self {
        Self {
            prompt: "Select a package to open:".to_string(),
            options: Vec::new(),
            ok_label: "Ok".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}

impl PackageFormBuilder {
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(PackageOption {
            value: value.into(),
            label: label.into(),
        });
        self
    }

    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            self = self.option(name.clone(), name);
        }
        self
    }

    pub fn build(self) -> PackageForm {
        PackageForm {
            prompt: self.prompt,
            options: self.options,
            ok_label: self.ok_label,
            cancel_label: self.cancel_label,
        }
    }
}
