//! Method definitions for RPC schemas.
//!
//! This module contains the data structures representing RPC methods and the
//! four-way shape classification every generator dispatches on.

use crate::error::ParseError;
use crate::types::{FieldDef, push_unique};
use std::fmt;

/// RPC method definition.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    /// Method name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Input fields in declaration order.
    pub inputs: Vec<FieldDef>,
    /// Output fields in declaration order.
    pub outputs: Vec<FieldDef>,
}

impl MethodDef {
    /// Creates a new method definition without inputs or outputs.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds an input field.
    ///
    /// # Errors
    /// Returns `ParseError::DuplicateDefinition` if the name is already an input.
    pub fn add_input(&mut self, field: FieldDef) -> Result<(), ParseError> {
        push_unique(&mut self.inputs, field)
    }

    /// Adds an output field.
    ///
    /// # Errors
    /// Returns `ParseError::DuplicateDefinition` if the name is already an output.
    pub fn add_output(&mut self, field: FieldDef) -> Result<(), ParseError> {
        push_unique(&mut self.outputs, field)
    }

    /// Returns the shape classification of this method.
    #[must_use]
    pub fn shape(&self) -> MethodShape {
        MethodShape::classify(!self.inputs.is_empty(), !self.outputs.is_empty())
    }
}

/// Shape of a method, derived from which of its field lists are non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodShape {
    /// Inputs only: call takes an argument and returns nothing.
    InputOnly,
    /// Outputs only: call takes no argument and returns a value.
    OutputOnly,
    /// Both: call takes an argument and returns a value.
    Bidirectional,
    /// Neither: call takes no argument, returns nothing, and has no payload types.
    Empty,
}

impl MethodShape {
    /// Classifies a method from the presence of inputs and outputs.
    #[must_use]
    pub const fn classify(has_inputs: bool, has_outputs: bool) -> Self {
        match (has_inputs, has_outputs) {
            (true, false) => Self::InputOnly,
            (false, true) => Self::OutputOnly,
            (true, true) => Self::Bidirectional,
            (false, false) => Self::Empty,
        }
    }

    /// Returns true if the call takes an input payload.
    #[must_use]
    pub const fn has_input(self) -> bool {
        matches!(self, Self::InputOnly | Self::Bidirectional)
    }

    /// Returns true if the call returns an output payload.
    #[must_use]
    pub const fn has_output(self) -> bool {
        matches!(self, Self::OutputOnly | Self::Bidirectional)
    }
}

impl fmt::Display for MethodShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InputOnly => "input-only",
            Self::OutputOnly => "output-only",
            Self::Bidirectional => "bidirectional",
            Self::Empty => "empty",
        })
    }
}
