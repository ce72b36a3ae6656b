//! Request-body binding: JSON body in, [`Mapping`] or a logged failure out.

use std::any::TypeId;
use std::io::Read;

use tracing::{debug, error};

use crate::decode;
use crate::error::ConfigurationError;
use crate::options::Options;
use crate::value::Mapping;

const BINDER_NAME: &str = "MappingBinder";

/// Descriptor of the model type a request body is being bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetShape {
    id: TypeId,
    name: &'static str,
}

impl TargetShape {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn is_mapping(&self) -> bool {
        self.id == TypeId::of::<Mapping>()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BindingResult {
    Bound(Mapping),
    /// Decoding failed; the cause was already logged.
    Failed,
}

impl BindingResult {
    pub fn is_bound(&self) -> bool {
        matches!(self, BindingResult::Bound(_))
    }

    pub fn model(&self) -> Option<&Mapping> {
        match self {
            BindingResult::Bound(m) => Some(m),
            BindingResult::Failed => None,
        }
    }

    pub fn into_model(self) -> Option<Mapping> {
        match self {
            BindingResult::Bound(m) => Some(m),
            BindingResult::Failed => None,
        }
    }
}

/// Binds request bodies to [`Mapping`] models. Holds immutable options only, so one
/// instance can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct MappingBinder {
    options: Options,
}

impl MappingBinder {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Decode `body` into a mapping.
    ///
    /// A target other than [`Mapping`] is a wiring mistake and fails before `body` is read.
    /// Malformed bodies yield [`BindingResult::Failed`] after a single error record.
    pub fn bind(
        &self,
        body: impl Read,
        target: &TargetShape,
    ) -> Result<BindingResult, ConfigurationError> {
        if !target.is_mapping() {
            return Err(ConfigurationError::UnsupportedShape {
                binder: BINDER_NAME,
                shape: target.name(),
            });
        }
        match decode::mapping_from_reader(body, &self.options) {
            Ok(mapping) => {
                debug!(members = mapping.len(), "bound request body");
                Ok(BindingResult::Bound(mapping))
            }
            Err(err) => {
                error!(error = %err, offset = ?err.offset(), "failed to bind request body");
                Ok(BindingResult::Failed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_names_the_type() {
        let shape = TargetShape::of::<Vec<String>>();
        assert!(shape.name().contains("Vec"));
        assert!(!shape.is_mapping());
        assert!(TargetShape::of::<Mapping>().is_mapping());
    }

    #[test]
    fn binder_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MappingBinder>();
    }
}
