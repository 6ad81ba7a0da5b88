//! Field schemas describing each resource's declarative surface: the field
//! type, whether it is required, whether changing it forces replacement, and
//! a human-readable description.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Bool,
    Int,
    /// String-keyed map, e.g. labels.
    Map,
    /// Nested single block, e.g. the meta block.
    Block,
    /// Repeated nested block, e.g. nodepools.
    BlockList,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Map => "map",
            FieldType::Block => "block",
            FieldType::BlockList => "block list",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub field_type: FieldType,
    pub required: bool,
    /// Populated by the server; never set from configuration.
    pub computed: bool,
    /// Changing this field replaces the resource instead of updating it.
    pub force_new: bool,
    pub description: &'static str,
}

impl FieldSchema {
    pub fn required_string(description: &'static str) -> Self {
        Self {
            field_type: FieldType::String,
            required: true,
            computed: false,
            force_new: false,
            description,
        }
    }

    pub fn optional_string(description: &'static str) -> Self {
        Self {
            field_type: FieldType::String,
            required: false,
            computed: false,
            force_new: false,
            description,
        }
    }

    pub fn computed_string(description: &'static str) -> Self {
        Self {
            field_type: FieldType::String,
            required: false,
            computed: true,
            force_new: false,
            description,
        }
    }

    pub fn optional_block(description: &'static str) -> Self {
        Self {
            field_type: FieldType::Block,
            required: false,
            computed: false,
            force_new: false,
            description,
        }
    }

    pub fn optional_block_list(description: &'static str) -> Self {
        Self {
            field_type: FieldType::BlockList,
            required: false,
            computed: false,
            force_new: false,
            description,
        }
    }

    pub fn computed_block_list(description: &'static str) -> Self {
        Self {
            field_type: FieldType::BlockList,
            required: false,
            computed: true,
            force_new: false,
            description,
        }
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }
}

/// Field name to schema, ordered for stable display.
pub type SchemaMap = BTreeMap<&'static str, FieldSchema>;
