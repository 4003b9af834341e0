//! Label Index - class index <-> class name
//!
//! Indices are contiguous from zero, in the order the label encoder sorted
//! the classes at training time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ModelError;

#[derive(Debug, Clone, PartialEq)]
pub struct LabelIndex {
    classes: Vec<String>,
    by_name: HashMap<String, usize>,
}

/// On-disk form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelFile {
    pub classes: Vec<String>,
}

impl LabelIndex {
    pub fn new(classes: Vec<String>) -> Result<Self, ModelError> {
        if classes.is_empty() {
            return Err(ModelError::Invalid("label index has no classes".to_string()));
        }

        let mut by_name = HashMap::with_capacity(classes.len());
        for (i, name) in classes.iter().enumerate() {
            if by_name.insert(name.clone(), i).is_some() {
                return Err(ModelError::Invalid(format!("duplicate class label '{}'", name)));
            }
        }

        Ok(Self { classes, by_name })
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

impl TryFrom<LabelFile> for LabelIndex {
    type Error = ModelError;

    fn try_from(file: LabelFile) -> Result<Self, Self::Error> {
        LabelIndex::new(file.classes)
    }
}
